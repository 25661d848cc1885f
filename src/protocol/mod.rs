//! Wire format for the chat backend.
//!
//! The backend streams one JSON object per newline-terminated line:
//!
//! ```text
//! {"type": "reasoning", "content": "<fragment>"}
//! {"type": "answer",    "content": "<fragment>"}
//! {"type": "error",     "content": "<message>"}
//! ```
//!
//! There is no envelope and no explicit end-of-stream marker; the stream
//! ends when the transport closes. The backend also emits bare marker
//! records (`reasoning_start`, `answer_start`, `complete`) that carry no
//! content and require no action from clients.

pub mod events;
pub mod request;

pub use events::StreamEvent;
pub use request::ChatRequest;
