//! Hero cache error types.

use crate::UpstreamErrorKind;

/// Reasons a refresh cycle did not install a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CacheErrorKind {
    /// Fetching the hero list failed; the previous snapshot is retained
    #[display("Hero list fetch failed: {}", _0)]
    ListFetch(UpstreamErrorKind),
    /// Another refresh is already running
    #[display("A refresh is already in progress")]
    RefreshInProgress,
    /// The upstream list parsed but contained no heroes
    #[display("Upstream hero list was empty")]
    EmptyHeroList,
}

/// Cache error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
