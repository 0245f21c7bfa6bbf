//! Error types for the MLBB hero data service.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Lookups that find nothing are not errors; they return `Option`.
//!
//! # Examples
//!
//! ```
//! use mlbb_error::{MlbbResult, UpstreamError, UpstreamErrorKind};
//!
//! fn fetch_list() -> MlbbResult<Vec<String>> {
//!     Err(UpstreamError::new(UpstreamErrorKind::Status {
//!         endpoint: "hero-list/".to_string(),
//!         status: 500,
//!     }))?
//! }
//!
//! assert!(fetch_list().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod http;
mod json;
mod registry;
mod storage;
mod upstream;

pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use error::{MlbbError, MlbbErrorKind, MlbbResult};
pub use http::HttpError;
pub use json::JsonError;
pub use registry::{Bracket, RegistryError, RegistryErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use upstream::{UpstreamError, UpstreamErrorKind};
