use std::time::Duration;

/// Errors that can occur when using chatstream.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Transport errors: the request failed or the byte stream broke
/// - Backend errors: the backend reported a failure over the stream
///
/// A record that fails to parse is deliberately *not* an error: the wire
/// format carries no schema guarantee, so malformed records are skipped
/// with a diagnostic and processing continues.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Transport errors
    // -------------------------------------------------------------------------
    /// The HTTP request failed or the response body stream broke.
    #[error("transport error: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    /// Request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    // -------------------------------------------------------------------------
    // Backend errors
    // -------------------------------------------------------------------------
    /// The backend sent an `error` record over the stream.
    ///
    /// The message is the raw backend text. It is meant for diagnostics;
    /// user-facing surfaces show a generic notice instead (see
    /// [`FAILURE_NOTICE`](crate::render::FAILURE_NOTICE)).
    #[error("backend error: {message}")]
    Backend { message: String },
}

/// A specialized Result type for chatstream operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a transport failure (as opposed to a failure
    /// reported by the backend over a healthy stream).
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Error::Request(_) | Error::HttpStatus { .. } | Error::Timeout(_)
        )
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Request(_) | Error::Timeout(_) => true,
            Error::HttpStatus { status } => *status >= 500,
            _ => false,
        }
    }
}
