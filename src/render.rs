//! Presentation collaborators and the side-effect interpreter.
//!
//! The state machine in [`crate::session`] produces [`SideEffect`]s;
//! [`apply_effects`] translates them into calls on a [`PresentationSink`],
//! formatting the final answer through a [`RichTextFormatter`] on the way.
//! Both collaborators are traits so the machine can be exercised against
//! recording fakes in tests.

use crate::session::SideEffect;

/// The generic, user-facing failure notice.
///
/// Backend and transport failure details are logged for diagnostics but
/// never shown to the end user.
pub const FAILURE_NOTICE: &str = "Sorry, something went wrong. Please try again later.";

/// Sink for presentation updates during a streamed reply.
///
/// Methods have default empty implementations for selective handling.
/// Implementations must be lightweight; blocking delays stream processing.
pub trait PresentationSink: Send + Sync {
    /// Create the visible, growing reasoning region.
    fn open_reasoning(&self) {}

    /// Replace the visible reasoning text. `text` is the full accumulated
    /// reasoning, not a delta.
    fn update_reasoning(&self, text: &str) {
        let _ = text;
    }

    /// Collapse the reasoning region into an expandable summary of `text`.
    fn collapse_reasoning(&self, text: &str) {
        let _ = text;
    }

    /// Replace the visible answer text with `text`, rendered as plain
    /// text. `text` is the full accumulated answer, not a delta.
    fn update_answer(&self, text: &str) {
        let _ = text;
    }

    /// Show the finalized, formatted answer. Called at most once, at
    /// stream end, with the formatter's output.
    fn finalize(&self, formatted: &str) {
        let _ = formatted;
    }

    /// Show a terminal failure notice. Called at most once per session.
    fn fail(&self, notice: &str) {
        let _ = notice;
    }
}

/// Formats accumulated plain answer text into rich output.
///
/// Implementations must accept arbitrary, possibly malformed input
/// without panicking, and must be pure: the same input always yields the
/// same output (finalization may be retried).
pub trait RichTextFormatter: Send + Sync {
    /// Transform plain text into formatted output.
    fn format_rich_text(&self, plain: &str) -> String;

    /// Post-render highlighting pass, applied only after
    /// [`format_rich_text`](Self::format_rich_text). Defaults to a
    /// passthrough.
    fn highlight(&self, rendered: &str) -> String {
        rendered.to_string()
    }
}

/// Markdown formatter backed by `pulldown-cmark`.
///
/// Enables the GitHub-flavored extensions the backend's answers tend to
/// use: tables, strikethrough, and task lists.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter.
    pub fn new() -> Self {
        Self
    }
}

impl RichTextFormatter for MarkdownFormatter {
    fn format_rich_text(&self, plain: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(plain, options);
        let mut output = String::with_capacity(plain.len() * 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Identity formatter for consumers that render plain text themselves.
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl RichTextFormatter for PlainFormatter {
    fn format_rich_text(&self, plain: &str) -> String {
        plain.to_string()
    }
}

/// Sink that logs presentation transitions using tracing.
///
/// Useful for headless consumers and debugging; pairs with any
/// `tracing-subscriber` setup the application already has.
#[derive(Debug, Clone, Default)]
pub struct LoggingSink;

impl LoggingSink {
    /// Create a new logging sink.
    pub fn new() -> Self {
        Self
    }
}

impl PresentationSink for LoggingSink {
    fn open_reasoning(&self) {
        tracing::debug!("reasoning region opened");
    }

    fn update_reasoning(&self, text: &str) {
        tracing::trace!(chars = text.chars().count(), "reasoning updated");
    }

    fn collapse_reasoning(&self, text: &str) {
        tracing::debug!(chars = text.chars().count(), "reasoning collapsed");
    }

    fn update_answer(&self, text: &str) {
        tracing::trace!(chars = text.chars().count(), "answer updated");
    }

    fn finalize(&self, formatted: &str) {
        tracing::debug!(bytes = formatted.len(), "answer finalized");
    }

    fn fail(&self, notice: &str) {
        tracing::warn!(notice = %notice, "session failed");
    }
}

/// Apply side effects to a presentation sink, in order.
///
/// `Finalize` routes the raw answer through the formatter and then the
/// highlighting pass before reaching the sink. `Fail` logs the diagnostic
/// detail and surfaces only the generic [`FAILURE_NOTICE`].
pub fn apply_effects(
    effects: &[SideEffect],
    sink: &dyn PresentationSink,
    formatter: &dyn RichTextFormatter,
) {
    for effect in effects {
        match effect {
            SideEffect::OpenReasoning => sink.open_reasoning(),
            SideEffect::UpdateReasoning(text) => sink.update_reasoning(text),
            SideEffect::CollapseReasoning(text) => sink.collapse_reasoning(text),
            SideEffect::UpdateAnswer(text) => sink.update_answer(text),
            SideEffect::Finalize(raw) => {
                let rendered = formatter.format_rich_text(raw);
                let rendered = formatter.highlight(&rendered);
                sink.finalize(&rendered);
            }
            SideEffect::Fail(detail) => {
                tracing::error!(detail = %detail, "chat stream failed");
                sink.fail(FAILURE_NOTICE);
            }
        }
    }
}
