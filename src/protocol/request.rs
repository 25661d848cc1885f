//! Request body for the chat endpoint.

use serde::{Deserialize, Serialize};

/// Body of a `POST /chat` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

impl ChatRequest {
    /// Create a new request from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
