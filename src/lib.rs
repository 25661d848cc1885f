//! # chatstream
//!
//! Async Rust client for chat backends that stream replies as
//! newline-delimited JSON events.
//!
//! The backend answers `POST /chat` with an unbounded byte stream; each
//! line is one event (`reasoning`, `answer`, or `error` fragments, plus
//! content-free markers). This crate reassembles records from arbitrary
//! chunk boundaries, parses them permissively, and drives a per-reply
//! state machine that tells a presentation layer exactly when to open,
//! update, and collapse the reasoning region and when to finalize the
//! formatted answer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chatstream::{ChatClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::new()?;
//!     let answer = client.send_and_collect("What is 2+2?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```ignore
//! use futures::StreamExt;
//! use chatstream::{ChatClient, StreamEvent};
//!
//! let client = ChatClient::new()?;
//! let mut events = client.send("Write a poem").await?;
//! while let Some(event) = events.next().await {
//!     if let StreamEvent::Answer { content } = event? {
//!         print!("{content}");
//!     }
//! }
//! ```
//!
//! ## Driving a UI
//!
//! ```ignore
//! use chatstream::{ChatClient, MarkdownFormatter, PresentationSink};
//!
//! struct MySink { /* handles to the view */ }
//! impl PresentationSink for MySink {
//!     fn update_answer(&self, text: &str) { /* show plain text */ }
//!     fn finalize(&self, formatted: &str) { /* swap in rich output */ }
//! }
//!
//! let client = ChatClient::new()?;
//! client.send_to_sink("Hello", &MySink {}, &MarkdownFormatter::new()).await?;
//! ```

mod client;
pub mod config;
mod error;
pub mod protocol;
pub mod render;
pub mod session;
pub mod stream;

pub use error::{Error, Result};

// Re-export the main client types at crate root
pub use client::{ChatClient, ChatEventStream};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export commonly used protocol types at crate root
pub use protocol::{ChatRequest, StreamEvent};

// Re-export the state machine types at crate root
pub use session::{Phase, ResponseSession, SideEffect};

// Re-export presentation collaborators at crate root
pub use render::{
    LoggingSink, MarkdownFormatter, PlainFormatter, PresentationSink, RichTextFormatter,
    FAILURE_NOTICE,
};

// Re-export stream helpers at crate root
pub use stream::{collect_answer, render_stream, with_timeout, EventStream, LineBuffer};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}
    fn assert_send<T: Send>() {}

    /// All major public types must be Send + Sync for use across async tasks.
    #[test]
    fn public_types_are_send_sync() {
        // Client types
        assert_send_sync::<ChatClient>();
        assert_send_sync::<ClientConfig>();
        assert_send_sync::<ClientConfigBuilder>();

        // Protocol types
        assert_send_sync::<ChatRequest>();
        assert_send_sync::<StreamEvent>();

        // State machine types
        assert_send_sync::<Phase>();
        assert_send_sync::<ResponseSession>();
        assert_send_sync::<SideEffect>();

        // Presentation types
        assert_send_sync::<LoggingSink>();
        assert_send_sync::<MarkdownFormatter>();
        assert_send_sync::<PlainFormatter>();

        // Error type
        assert_send_sync::<Error>();
    }

    /// The event stream is Send but not Sync (contains mutable state).
    #[test]
    fn event_stream_is_send() {
        assert_send::<ChatEventStream>();
    }
}
