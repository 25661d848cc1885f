//! Streaming response handling.
//!
//! This module turns the raw response body into presentation updates in
//! two steps:
//!
//! - [`LineBuffer`] - reassembles newline-delimited records from
//!   arbitrarily-sized byte chunks
//! - [`EventStream`] - parses records into typed
//!   [`StreamEvent`](crate::protocol::StreamEvent)s, skipping blank and
//!   malformed records
//!
//! [`render_stream`] then applies the events to a
//! [`ResponseSession`](crate::session::ResponseSession) and interprets
//! the resulting side effects against a presentation sink.
//!
//! # Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use chatstream::protocol::StreamEvent;
//!
//! let mut events = client.send("Hello").await?;
//! while let Some(event) = events.next().await {
//!     if let StreamEvent::Answer { content } = event? {
//!         print!("{content}");
//!     }
//! }
//! ```
//!
//! # Cancellation
//!
//! Dropping an [`EventStream`] drops the underlying body stream, which
//! closes the connection. There is no background task to clean up; the
//! stream only does work while being polled.

pub mod lines;
pub mod response;

pub use lines::LineBuffer;
pub use response::{collect_answer, render_stream, with_timeout, EventStream};
