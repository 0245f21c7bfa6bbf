//! Upstream REST API error types.

/// Kinds of failures talking to the upstream hero statistics API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// The endpoint could not be reached
    #[display("Upstream unavailable: {}", _0)]
    Unavailable(String),
    /// The endpoint answered with a non-success status
    #[display("Upstream {} returned HTTP {}", endpoint, status)]
    Status {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
    },
    /// The response body was not the document we expected
    #[display("Upstream response malformed: {}", _0)]
    Malformed(String),
    /// The request did not complete in time
    #[display("Upstream {} timed out after {}ms", endpoint, millis)]
    Timeout {
        /// Endpoint path that was requested
        endpoint: String,
        /// Timeout that elapsed, in milliseconds
        millis: u64,
    },
}

impl UpstreamErrorKind {
    /// True when the upstream could not be reached or refused to answer.
    ///
    /// Malformed bodies are the only kind that reached the upstream
    /// successfully.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, UpstreamErrorKind::Malformed(_))
    }
}

/// Upstream error with location tracking.
///
/// # Examples
///
/// ```
/// use mlbb_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::Malformed("expected object".into()));
/// assert!(!err.kind.is_unavailable());
/// assert!(format!("{}", err).contains("malformed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new upstream error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_malformed_bodies_count_as_reachable() {
        let down = [
            UpstreamErrorKind::Unavailable("connection refused".to_string()),
            UpstreamErrorKind::Status {
                endpoint: "hero-list/".to_string(),
                status: 503,
            },
            UpstreamErrorKind::Timeout {
                endpoint: "hero-list/".to_string(),
                millis: 15_000,
            },
        ];
        assert!(down.iter().all(UpstreamErrorKind::is_unavailable));
        assert!(!UpstreamErrorKind::Malformed("{}".to_string()).is_unavailable());
    }
}
