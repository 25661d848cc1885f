//! Per-response session state and the phase state machine.
//!
//! A [`ResponseSession`] owns the mutable state for one streamed reply.
//! Applying an event is a pure state transition that returns the
//! presentation [`SideEffect`]s to perform; translating effects into UI
//! calls lives in [`crate::render`], which keeps the machine testable
//! without a presentation layer.

use crate::protocol::StreamEvent;

/// The current stage of rendering a single streamed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No content has arrived yet.
    #[default]
    Idle,
    /// Reasoning fragments are streaming in.
    Reasoning,
    /// Answer fragments are streaming in.
    Answering,
    /// The stream ended and the answer was finalized. Terminal.
    Done,
    /// A backend error or transport failure ended the session. Terminal.
    Failed,
}

impl Phase {
    /// Check if no further events will be processed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}

/// A presentation side effect produced by a state transition.
///
/// Text-carrying effects always hold the full accumulator value rather
/// than the incoming delta: intermediate renders overwrite rather than
/// append, so a coalesced update still converges to the latest state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Create the visible, growing reasoning region. Fires at most once.
    OpenReasoning,
    /// Replace the visible reasoning text with the full accumulator.
    UpdateReasoning(String),
    /// Collapse the reasoning region into an expandable summary holding
    /// the final reasoning text. Fires at most once, on the first answer
    /// record, and only if reasoning content arrived.
    CollapseReasoning(String),
    /// Replace the visible answer text with the full accumulator, as
    /// plain text. Formatting is deferred to finalization so partial
    /// markup (an unclosed code fence, say) never renders mid-stream.
    UpdateAnswer(String),
    /// Render the accumulated answer through the formatting collaborator.
    /// Fires at most once, at stream end.
    Finalize(String),
    /// The session failed. Carries the diagnostic detail, which is logged
    /// but never shown to the end user.
    Fail(String),
}

/// Mutable state for one streamed reply.
///
/// Created when a send is initiated, mutated exclusively by applying
/// events in arrival order, and discarded once terminal. Never shared
/// across concurrent requests.
#[derive(Debug, Default)]
pub struct ResponseSession {
    reasoning: String,
    answer: String,
    phase: Phase,
}

impl ResponseSession {
    /// Create a fresh session in the `Idle` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// All reasoning fragments seen so far, in arrival order.
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// All answer fragments seen so far, in arrival order.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Check if the session reached `Done` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Apply one event and return the side effects to perform.
    ///
    /// Events applied after the session is terminal are discarded: a
    /// `Failed` session produces exactly one user-visible notice no
    /// matter what arrives afterwards.
    pub fn apply(&mut self, event: &StreamEvent) -> Vec<SideEffect> {
        if self.is_terminal() {
            return Vec::new();
        }

        match event {
            StreamEvent::Reasoning { content } => {
                let mut effects = Vec::new();
                if self.phase == Phase::Idle {
                    self.phase = Phase::Reasoning;
                    effects.push(SideEffect::OpenReasoning);
                }
                self.reasoning.push_str(content);
                effects.push(SideEffect::UpdateReasoning(self.reasoning.clone()));
                effects
            }
            StreamEvent::Answer { content } => {
                let mut effects = Vec::new();
                if self.phase == Phase::Reasoning && !self.reasoning.is_empty() {
                    effects.push(SideEffect::CollapseReasoning(self.reasoning.clone()));
                }
                self.phase = Phase::Answering;
                self.answer.push_str(content);
                effects.push(SideEffect::UpdateAnswer(self.answer.clone()));
                effects
            }
            StreamEvent::Error { content } => {
                self.phase = Phase::Failed;
                vec![SideEffect::Fail(content.clone())]
            }
            // Markers carry no content and require no transition.
            StreamEvent::ReasoningStart | StreamEvent::AnswerStart | StreamEvent::Complete => {
                Vec::new()
            }
        }
    }

    /// Mark the stream as cleanly ended.
    ///
    /// Transitions any non-terminal phase to `Done` and emits the
    /// one-time finalize effect. An empty answer finalizes to nothing,
    /// so no effect is produced for it.
    pub fn finish(&mut self) -> Vec<SideEffect> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.phase = Phase::Done;
        if self.answer.is_empty() {
            Vec::new()
        } else {
            vec![SideEffect::Finalize(self.answer.clone())]
        }
    }

    /// Mark the session as failed by a transport problem.
    ///
    /// Used when the request fails or the byte stream breaks before a
    /// terminal event. Emits the failure effect once; a session that is
    /// already terminal stays as it is.
    pub fn fail_transport(&mut self, reason: &str) -> Vec<SideEffect> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.phase = Phase::Failed;
        vec![SideEffect::Fail(reason.to_string())]
    }
}
