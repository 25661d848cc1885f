//! Test utilities for chatstream integration tests.

use std::sync::Mutex;

use bytes::Bytes;
use chatstream::{EventStream, PresentationSink, Result};
use futures::stream;
use futures::Stream;

/// Install a test subscriber so skipped-record diagnostics are visible
/// in failing test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// One observed call on the [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    OpenReasoning,
    UpdateReasoning(String),
    CollapseReasoning(String),
    UpdateAnswer(String),
    Finalize(String),
    Fail(String),
}

/// A presentation sink that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far, in order.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// How many recorded calls satisfy the predicate.
    pub fn count(&self, predicate: impl Fn(&SinkCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PresentationSink for RecordingSink {
    fn open_reasoning(&self) {
        self.push(SinkCall::OpenReasoning);
    }

    fn update_reasoning(&self, text: &str) {
        self.push(SinkCall::UpdateReasoning(text.to_string()));
    }

    fn collapse_reasoning(&self, text: &str) {
        self.push(SinkCall::CollapseReasoning(text.to_string()));
    }

    fn update_answer(&self, text: &str) {
        self.push(SinkCall::UpdateAnswer(text.to_string()));
    }

    fn finalize(&self, formatted: &str) {
        self.push(SinkCall::Finalize(formatted.to_string()));
    }

    fn fail(&self, notice: &str) {
        self.push(SinkCall::Fail(notice.to_string()));
    }
}

/// Builder for NDJSON response payloads.
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    payload: String,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reasoning fragment record.
    pub fn reasoning(mut self, content: &str) -> Self {
        self.payload.push_str(
            &serde_json::json!({"type": "reasoning", "content": content}).to_string(),
        );
        self.payload.push('\n');
        self
    }

    /// Add an answer fragment record.
    pub fn answer(mut self, content: &str) -> Self {
        self.payload
            .push_str(&serde_json::json!({"type": "answer", "content": content}).to_string());
        self.payload.push('\n');
        self
    }

    /// Add a backend error record.
    pub fn error(mut self, content: &str) -> Self {
        self.payload
            .push_str(&serde_json::json!({"type": "error", "content": content}).to_string());
        self.payload.push('\n');
        self
    }

    /// Add a content-free marker record (`reasoning_start` and friends).
    pub fn marker(mut self, kind: &str) -> Self {
        self.payload
            .push_str(&serde_json::json!({"type": kind}).to_string());
        self.payload.push('\n');
        self
    }

    /// Add a raw line verbatim (for malformed-record scenarios).
    pub fn raw_line(mut self, line: &str) -> Self {
        self.payload.push_str(line);
        self.payload.push('\n');
        self
    }

    /// Add an empty record.
    pub fn blank(mut self) -> Self {
        self.payload.push('\n');
        self
    }

    /// Append raw bytes without a terminator (for truncation scenarios).
    pub fn truncated(mut self, fragment: &str) -> Self {
        self.payload.push_str(fragment);
        self
    }

    /// The complete payload as it would cross the wire.
    pub fn build(self) -> String {
        self.payload
    }
}

/// Turn a payload into a chunk stream, cutting every `chunk_size` bytes.
pub fn chunked(payload: &str, chunk_size: usize) -> impl Stream<Item = Result<Bytes>> + Unpin {
    let chunks: Vec<Result<Bytes>> = payload
        .as_bytes()
        .chunks(chunk_size)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    stream::iter(chunks)
}

/// Event stream over a payload delivered in `chunk_size`-byte chunks.
pub fn event_stream(
    payload: &str,
    chunk_size: usize,
) -> EventStream<impl Stream<Item = Result<Bytes>> + Unpin> {
    EventStream::new(chunked(payload, chunk_size))
}
