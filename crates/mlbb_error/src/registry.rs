//! Tournament registration error types.

use crate::{StorageError, StorageErrorKind};

/// Tournament bracket a registration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Bracket {
    /// Single-player bracket
    #[display("solo")]
    Solo,
    /// Two-player bracket
    #[display("duo")]
    Duo,
}

/// Kinds of registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RegistryErrorKind {
    /// The user already holds a registration in this bracket
    #[display("User {} is already registered for {}", user_id, bracket)]
    AlreadyRegistered {
        /// Submitter or partner identity that collided
        user_id: String,
        /// Bracket the collision happened in
        bracket: Bracket,
    },
    /// The submitted entry failed validation
    #[display("Invalid registration: {}", _0)]
    InvalidEntry(String),
    /// The store could not be persisted
    #[display("Registration storage failed: {}", _0)]
    Storage(StorageErrorKind),
}

/// Registration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    /// The kind of error that occurred
    pub kind: RegistryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RegistryError {
    /// Create a new registry error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<StorageError> for RegistryError {
    #[track_caller]
    fn from(err: StorageError) -> Self {
        Self::new(RegistryErrorKind::Storage(err.kind))
    }
}
