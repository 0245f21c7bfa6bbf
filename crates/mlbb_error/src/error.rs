//! Top-level error wrapper types.

use crate::{
    CacheError, ConfigError, HttpError, JsonError, RegistryError, StorageError, UpstreamError,
};

/// Union of every error the workspace can surface.
///
/// # Examples
///
/// ```
/// use mlbb_error::{MlbbError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: MlbbError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MlbbErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Upstream API error
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Hero cache error
    #[from(CacheError)]
    Cache(CacheError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Registration error
    #[from(RegistryError)]
    Registry(RegistryError),
}

/// MLBB error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("MLBB Error: {}", _0)]
pub struct MlbbError(Box<MlbbErrorKind>);

impl MlbbError {
    /// Create a new error from a kind.
    pub fn new(kind: MlbbErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MlbbErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MlbbErrorKind
impl<T> From<T> for MlbbError
where
    T: Into<MlbbErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for workspace-level operations.
pub type MlbbResult<T> = std::result::Result<T, MlbbError>;
