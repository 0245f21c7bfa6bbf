//! Tournament registration store.
//!
//! Solo and duo sign-ups are kept in memory and mirrored to a single JSON
//! document that is rewritten in full on every change.

#![warn(missing_docs)]

mod entry;
mod store;

pub use entry::{DuoEntry, Registrations, SoloEntry};
pub use mlbb_error::{Bracket, RegistryError, RegistryErrorKind, StorageError, StorageErrorKind};
pub use store::RegistrationStore;

/// Result type for registration operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
