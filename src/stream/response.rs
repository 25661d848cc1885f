//! Event dispatch over a streamed response body.
//!
//! [`EventStream`] adapts a stream of raw byte chunks into a stream of
//! typed [`StreamEvent`]s: chunks go through the [`LineBuffer`], each
//! complete record is parsed, and records that are blank or malformed
//! are skipped with a diagnostic instead of ending the stream.
//! [`render_stream`] drives a full session from such a stream, applying
//! the state machine and interpreting its side effects.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::time::timeout as tokio_timeout;

use super::lines::LineBuffer;
use crate::protocol::StreamEvent;
use crate::render::{apply_effects, PlainFormatter, PresentationSink, RichTextFormatter};
use crate::session::ResponseSession;
use crate::{Error, Result};

/// A stream of typed events parsed from a response body.
///
/// Wraps any stream of byte chunks (the transport makes no framing
/// guarantee beyond newline separation) and yields one [`StreamEvent`]
/// per well-formed record, in arrival order.
///
/// # Permissive parsing
///
/// The wire format offers no schema guarantee, so a record that is not
/// valid JSON, or that carries an unrecognized `type`, is logged and
/// skipped. Blank records are skipped silently. Only transport errors
/// from the underlying chunk stream end the stream early.
pub struct EventStream<S> {
    chunks: S,
    lines: LineBuffer,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

impl<S> EventStream<S>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    /// Create an event stream over a stream of byte chunks.
    pub fn new(chunks: S) -> Self {
        Self {
            chunks,
            lines: LineBuffer::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<S> Stream for EventStream<S>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    type Item = Result<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.chunks).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    for record in this.lines.push_chunk(&chunk) {
                        if record.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<StreamEvent>(&record) {
                            Ok(event) => this.pending.push_back(event),
                            Err(error) => {
                                tracing::warn!(record = %record, %error, "skipping malformed record");
                            }
                        }
                    }
                }
                Poll::Ready(Some(Err(error))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    // A record missing its terminator cannot be trusted;
                    // surface it in the logs rather than guessing.
                    if let Some(rest) = this.lines.take_remainder() {
                        tracing::warn!(record = %rest, "dropping unterminated trailing record");
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Drive a full response session from an event stream.
///
/// Events are applied strictly in arrival order to a fresh
/// [`ResponseSession`], and each transition's side effects are applied
/// to `sink` before the next event is consumed. Consumption stops at the
/// first backend `error` record or transport failure; either way the
/// sink receives exactly one failure notice. A clean end of stream
/// finalizes the answer through `formatter`.
///
/// Returns the terminal session on success, or the error that failed it.
pub async fn render_stream<S>(
    mut events: S,
    sink: &dyn PresentationSink,
    formatter: &dyn RichTextFormatter,
) -> Result<ResponseSession>
where
    S: Stream<Item = Result<StreamEvent>> + Unpin,
{
    let mut session = ResponseSession::new();

    while let Some(next) = events.next().await {
        match next {
            Ok(event) => {
                let backend_error = match &event {
                    StreamEvent::Error { content } => Some(content.clone()),
                    _ => None,
                };
                let effects = session.apply(&event);
                apply_effects(&effects, sink, formatter);
                if let Some(message) = backend_error {
                    return Err(Error::Backend { message });
                }
            }
            Err(error) => {
                let effects = session.fail_transport(&error.to_string());
                apply_effects(&effects, sink, formatter);
                return Err(error);
            }
        }
    }

    let effects = session.finish();
    apply_effects(&effects, sink, formatter);
    Ok(session)
}

/// Collect the answer text from an event stream, ignoring presentation.
///
/// This is a convenience for headless use cases where only the final
/// answer matters.
pub async fn collect_answer<S>(events: S) -> Result<String>
where
    S: Stream<Item = Result<StreamEvent>> + Unpin,
{
    struct NullSink;
    impl PresentationSink for NullSink {}

    let session = render_stream(events, &NullSink, &PlainFormatter).await?;
    Ok(session.answer().to_string())
}

/// Run a future with a timeout.
///
/// Returns an error if the future doesn't complete within the specified
/// duration.
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio_timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(duration)),
    }
}
