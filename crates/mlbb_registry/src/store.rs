//! Lock-guarded registration store with full-document persistence.

use crate::{DuoEntry, RegistryResult, Registrations, SoloEntry};
use mlbb_error::{
    Bracket, RegistryError, RegistryErrorKind, StorageError, StorageErrorKind,
};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Tournament registrations persisted as one JSON document.
///
/// Every mutation runs under a single lock: validate, build the next
/// document, write it in full (temp file + rename), then publish it in
/// memory. A failed write leaves both memory and disk at the previous state.
///
/// # Example
///
/// ```no_run
/// use mlbb_registry::{RegistrationStore, SoloEntry};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = RegistrationStore::open("data/registrations.json").await?;
/// store
///     .register_solo(SoloEntry::new("123", "Ayu", "98765432", "Mythic"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RegistrationStore {
    path: PathBuf,
    state: Mutex<Registrations>,
    recovered: Option<StorageError>,
}

impl RegistrationStore {
    /// Load the store from `path`.
    ///
    /// A missing file or one that does not parse yields an empty store; a
    /// corrupt file is replaced by the next successful write and reported
    /// through [`recovered_from`](Self::recovered_from).
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    #[instrument(skip_all)]
    pub async fn open(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        let path = path.into();

        let mut recovered = None;
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Registrations>(&bytes) {
                Ok(registrations) => {
                    info!(
                        path = %path.display(),
                        solo = registrations.solo.len(),
                        duo = registrations.duo.len(),
                        "Loaded registrations"
                    );
                    registrations
                }
                Err(e) => {
                    let corrupt = StorageError::new(StorageErrorKind::Corrupt(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )));
                    warn!(error = %corrupt.kind, "Starting with an empty registration store");
                    recovered = Some(corrupt);
                    Registrations::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No registration file yet; starting empty");
                Registrations::default()
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
            recovered,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error that made [`open`](Self::open) discard an unreadable
    /// document, if it did.
    pub fn recovered_from(&self) -> Option<&StorageError> {
        self.recovered.as_ref()
    }

    /// Add a solo registration.
    ///
    /// # Errors
    ///
    /// - [`RegistryErrorKind::InvalidEntry`] for a blank user or game id.
    /// - [`RegistryErrorKind::AlreadyRegistered`] if the user is already in
    ///   the solo bracket.
    /// - [`RegistryErrorKind::Storage`] if the document could not be written.
    /// Ids and names are trimmed before they are checked and stored.
    #[instrument(skip(self, entry), fields(user_id = %entry.user_id))]
    pub async fn register_solo(&self, entry: SoloEntry) -> RegistryResult<()> {
        let entry = entry.normalized();
        require("user id", &entry.user_id)?;
        require("game id", &entry.game_id)?;

        let mut state = self.state.lock().await;
        if state.find_solo(&entry.user_id).is_some() {
            return Err(already_registered(&entry.user_id, Bracket::Solo));
        }

        let mut next = state.clone();
        next.solo.push(entry);
        self.persist(&next).await?;
        *state = next;

        info!(solo = state.solo.len(), "Solo registration accepted");
        Ok(())
    }

    /// Add a duo registration.
    ///
    /// Neither member may already appear in the duo bracket, as submitter or
    /// as partner.
    ///
    /// # Errors
    ///
    /// - [`RegistryErrorKind::InvalidEntry`] for blank ids or a partner equal
    ///   to the submitter.
    /// - [`RegistryErrorKind::AlreadyRegistered`] naming the member who
    ///   collided.
    /// - [`RegistryErrorKind::Storage`] if the document could not be written.
    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, partner_id = %entry.partner_id))]
    pub async fn register_duo(&self, entry: DuoEntry) -> RegistryResult<()> {
        let entry = entry.normalized();
        require("user id", &entry.user_id)?;
        require("partner id", &entry.partner_id)?;
        require("game id", &entry.game_id)?;
        require("partner game id", &entry.partner_game_id)?;
        if entry.user_id == entry.partner_id {
            return Err(RegistryError::new(RegistryErrorKind::InvalidEntry(
                "partner must be a different user".to_string(),
            )));
        }

        let mut state = self.state.lock().await;
        for member in [&entry.user_id, &entry.partner_id] {
            if state.find_duo(member).is_some() {
                return Err(already_registered(member, Bracket::Duo));
            }
        }

        let mut next = state.clone();
        next.duo.push(entry);
        self.persist(&next).await?;
        *state = next;

        info!(duo = state.duo.len(), "Duo registration accepted");
        Ok(())
    }

    /// Remove the registration `user_id` takes part in. Returns whether one
    /// was removed.
    ///
    /// In the duo bracket either member can withdraw the pair.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryErrorKind::Storage`] if the document could not be
    /// written; nothing is removed in that case.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, bracket: Bracket, user_id: &str) -> RegistryResult<bool> {
        let user_id = user_id.trim();
        let mut state = self.state.lock().await;

        let mut next = state.clone();
        match bracket {
            Bracket::Solo => next.solo.retain(|entry| entry.user_id != user_id),
            Bracket::Duo => next.duo.retain(|entry| !entry.involves(user_id)),
        }
        if next == *state {
            debug!("Nothing to withdraw");
            return Ok(false);
        }

        self.persist(&next).await?;
        *state = next;
        info!("Registration withdrawn");
        Ok(true)
    }

    /// Solo entries in sign-up order.
    pub async fn solo_entries(&self) -> Vec<SoloEntry> {
        self.state.lock().await.solo.clone()
    }

    /// Duo entries in sign-up order.
    pub async fn duo_entries(&self) -> Vec<DuoEntry> {
        self.state.lock().await.duo.clone()
    }

    /// Copy of the whole document.
    pub async fn registrations(&self) -> Registrations {
        self.state.lock().await.clone()
    }

    /// Number of entries in `bracket`.
    pub async fn len(&self, bracket: Bracket) -> usize {
        let state = self.state.lock().await;
        match bracket {
            Bracket::Solo => state.solo.len(),
            Bracket::Duo => state.duo.len(),
        }
    }

    /// Serialize `registrations` and replace the backing file.
    async fn persist(&self, registrations: &Registrations) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(registrations)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialize(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        debug!(bytes = bytes.len(), path = %self.path.display(), "Persisted registrations");
        Ok(())
    }
}

fn require(field: &str, value: &str) -> RegistryResult<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::new(RegistryErrorKind::InvalidEntry(format!(
            "{} must not be blank",
            field
        ))));
    }
    Ok(())
}

#[track_caller]
fn already_registered(user_id: &str, bracket: Bracket) -> RegistryError {
    RegistryError::new(RegistryErrorKind::AlreadyRegistered {
        user_id: user_id.to_string(),
        bracket,
    })
}
