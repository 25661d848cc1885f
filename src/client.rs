//! High-level client for the chat backend.
//!
//! This module provides [`ChatClient`], the main entry point for sending
//! a message and consuming the streamed reply.
//!
//! # Example
//!
//! ```ignore
//! use chatstream::{ChatClient, LoggingSink, MarkdownFormatter, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::new()?;
//!     let answer = client.send_and_collect("What is 2+2?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::protocol::ChatRequest;
use crate::render::{apply_effects, PresentationSink, RichTextFormatter};
use crate::session::ResponseSession;
use crate::stream::{collect_answer, render_stream, with_timeout, EventStream};
use crate::{Error, Result};

/// The typed event stream returned by [`ChatClient::send`].
pub type ChatEventStream = EventStream<BoxStream<'static, Result<Bytes>>>;

/// A client for a chat backend that streams newline-delimited JSON
/// events.
///
/// One request is in flight per call; the library does not multiplex
/// requests over a session. Each call creates a fresh
/// [`ResponseSession`], so nothing is shared between replies.
///
/// # Thread Safety
///
/// `ChatClient` is `Send + Sync` and cheap to clone; the underlying
/// connection pool is shared between clones.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ChatClient {
    /// Create a new client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration fails validation.
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(ClientConfig::builder().build()?))
    }

    /// Create a new client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Create a configuration builder; pass the result to
    /// [`with_config`](Self::with_config).
    pub fn builder() -> ClientConfigBuilder {
        ClientConfig::builder()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a message and return the typed event stream.
    ///
    /// This is the low-level API; the caller consumes
    /// [`StreamEvent`](crate::protocol::StreamEvent)s directly. For
    /// driving a presentation, prefer
    /// [`send_to_sink`](Self::send_to_sink).
    ///
    /// # Errors
    ///
    /// A failed request or non-success status is a transport failure;
    /// no stream is returned.
    ///
    /// # Cancellation
    ///
    /// Dropping the returned stream closes the connection.
    pub async fn send(&self, message: &str) -> Result<ChatEventStream> {
        let response = self
            .http
            .post(self.config.chat_url())
            .json(&ChatRequest::new(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let chunks = response.bytes_stream().map_err(Error::from).boxed();
        Ok(EventStream::new(chunks))
    }

    /// Send a message and drive the full reply into a presentation sink.
    ///
    /// The sink receives reasoning and answer updates as they stream in,
    /// the collapsed reasoning summary, and the finalized answer rendered
    /// through `formatter`. On any failure the sink receives exactly one
    /// generic notice and the underlying error is returned.
    pub async fn send_to_sink(
        &self,
        message: &str,
        sink: &dyn PresentationSink,
        formatter: &dyn RichTextFormatter,
    ) -> Result<ResponseSession> {
        let drive = async {
            let events = match self.send(message).await {
                Ok(events) => events,
                Err(error) => {
                    let mut session = ResponseSession::new();
                    let effects = session.fail_transport(&error.to_string());
                    apply_effects(&effects, sink, formatter);
                    return Err(error);
                }
            };
            render_stream(events, sink, formatter).await
        };

        let result = match self.config.timeout() {
            Some(timeout) => with_timeout(timeout, drive).await,
            None => drive.await,
        };

        // A timeout abandons the drive mid-flight, so the sink has not
        // been notified yet.
        if let Err(Error::Timeout(duration)) = &result {
            let mut session = ResponseSession::new();
            let effects = session.fail_transport(&format!("timed out after {duration:?}"));
            apply_effects(&effects, sink, formatter);
        }

        result
    }

    /// Send a message and collect the full answer text.
    ///
    /// This is the simplest way to get a reply: reasoning fragments are
    /// consumed but discarded, and the raw (unformatted) answer is
    /// returned once the stream ends.
    pub async fn send_and_collect(&self, message: &str) -> Result<String> {
        let collect = async {
            let events = self.send(message).await?;
            collect_answer(events).await
        };

        match self.config.timeout() {
            Some(timeout) => with_timeout(timeout, collect).await,
            None => collect.await,
        }
    }
}
