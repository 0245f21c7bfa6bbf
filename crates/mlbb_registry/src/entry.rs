//! Registration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single-player sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloEntry {
    /// Chat identity of the submitter
    pub user_id: String,
    /// Submitter's display name at sign-up time
    pub display_name: String,
    /// In-game id
    pub game_id: String,
    /// Self-reported rank, free text
    pub rank: String,
    /// When the entry was accepted
    pub registered_at: DateTime<Utc>,
}

impl SoloEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        game_id: impl Into<String>,
        rank: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            game_id: game_id.into(),
            rank: rank.into(),
            registered_at: Utc::now(),
        }
    }

    /// Trim surrounding whitespace from every text field.
    pub(crate) fn normalized(self) -> Self {
        Self {
            user_id: trimmed(self.user_id),
            display_name: trimmed(self.display_name),
            game_id: trimmed(self.game_id),
            rank: trimmed(self.rank),
            ..self
        }
    }
}

/// A two-player sign-up submitted by one member of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuoEntry {
    /// Chat identity of the submitter
    pub user_id: String,
    /// Submitter's display name
    pub display_name: String,
    /// Chat identity of the partner
    pub partner_id: String,
    /// Partner's display name
    pub partner_name: String,
    /// Submitter's in-game id
    pub game_id: String,
    /// Partner's in-game id
    pub partner_game_id: String,
    /// Team rank, free text
    pub rank: String,
    /// When the entry was accepted
    pub registered_at: DateTime<Utc>,
}

impl DuoEntry {
    /// True if `user_id` is either member of the pair.
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.partner_id == user_id
    }

    /// Trim surrounding whitespace from every text field.
    pub(crate) fn normalized(self) -> Self {
        Self {
            user_id: trimmed(self.user_id),
            display_name: trimmed(self.display_name),
            partner_id: trimmed(self.partner_id),
            partner_name: trimmed(self.partner_name),
            game_id: trimmed(self.game_id),
            partner_game_id: trimmed(self.partner_game_id),
            rank: trimmed(self.rank),
            ..self
        }
    }
}

/// The persisted document: both brackets in sign-up order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrations {
    /// Solo bracket
    #[serde(default)]
    pub solo: Vec<SoloEntry>,
    /// Duo bracket
    #[serde(default)]
    pub duo: Vec<DuoEntry>,
}

impl Registrations {
    /// Solo entry for `user_id`, if any.
    pub fn find_solo(&self, user_id: &str) -> Option<&SoloEntry> {
        self.solo.iter().find(|entry| entry.user_id == user_id)
    }

    /// Duo entry in which `user_id` takes part, if any.
    pub fn find_duo(&self, user_id: &str) -> Option<&DuoEntry> {
        self.duo.iter().find(|entry| entry.involves(user_id))
    }
}

fn trimmed(value: String) -> String {
    match value.trim() {
        t if t.len() == value.len() => value,
        t => t.to_string(),
    }
}
