//! Typed stream events parsed from wire records.

use serde::{Deserialize, Serialize};

/// One event from the backend stream.
///
/// Each newline-delimited record is expected to decode to exactly one of
/// these variants. Records with an unrecognized `type` tag fail to decode
/// and are skipped by the dispatcher rather than treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Marker preceding the first reasoning fragment. Carries no content.
    ReasoningStart,
    /// An incremental fragment of the model's internal deliberation.
    Reasoning {
        /// The reasoning text fragment.
        content: String,
    },
    /// Marker preceding the first answer fragment. Carries no content.
    AnswerStart,
    /// An incremental fragment of the user-facing response.
    Answer {
        /// The answer text fragment.
        content: String,
    },
    /// Marker sent after the last answer fragment. Carries no content.
    Complete,
    /// A terminal failure reported by the backend.
    Error {
        /// The backend's failure message. Diagnostic only; not shown to
        /// end users directly.
        content: String,
    },
}

impl StreamEvent {
    /// Check if this is a content-free marker event.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            StreamEvent::ReasoningStart | StreamEvent::AnswerStart | StreamEvent::Complete
        )
    }

    /// Check if this is a backend error event.
    pub fn is_error(&self) -> bool {
        matches!(self, StreamEvent::Error { .. })
    }

    /// Get the content fragment, if this event carries one.
    pub fn content(&self) -> Option<&str> {
        match self {
            StreamEvent::Reasoning { content }
            | StreamEvent::Answer { content }
            | StreamEvent::Error { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reasoning() {
        let json = r#"{"type": "reasoning", "content": "Let me think"}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            StreamEvent::Reasoning {
                content: "Let me think".to_string()
            }
        );
        assert_eq!(event.content(), Some("Let me think"));
        assert!(!event.is_marker());
    }

    #[test]
    fn parse_answer() {
        let json = r#"{"type": "answer", "content": "The answer is 42"}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            StreamEvent::Answer {
                content: "The answer is 42".to_string()
            }
        );
    }

    #[test]
    fn parse_error() {
        let json = r#"{"type": "error", "content": "model overloaded"}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert!(event.is_error());
        assert_eq!(event.content(), Some("model overloaded"));
    }

    #[test]
    fn parse_markers() {
        for (json, expected) in [
            (r#"{"type": "reasoning_start"}"#, StreamEvent::ReasoningStart),
            (r#"{"type": "answer_start"}"#, StreamEvent::AnswerStart),
            (r#"{"type": "complete"}"#, StreamEvent::Complete),
        ] {
            let event: StreamEvent = serde_json::from_str(json).unwrap();
            assert_eq!(event, expected);
            assert!(event.is_marker());
            assert!(event.content().is_none());
        }
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let json = r#"{"type": "unknown", "content": "x"}"#;
        assert!(serde_json::from_str::<StreamEvent>(json).is_err());
    }

    #[test]
    fn missing_type_fails_to_parse() {
        let json = r#"{"content": "x"}"#;
        assert!(serde_json::from_str::<StreamEvent>(json).is_err());
    }

    #[test]
    fn unicode_content_roundtrips() {
        let event = StreamEvent::Answer {
            content: "\u{4F60}\u{597D} \u{1F600}".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
