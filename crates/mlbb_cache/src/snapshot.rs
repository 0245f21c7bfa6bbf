//! Immutable hero snapshots.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use mlbb_api::{HeroDetail, HeroEntry, HeroId};
use std::collections::HashMap;
use tracing::warn;

/// Case-fold a hero name for lookup.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One complete, internally consistent view of the hero data.
///
/// A snapshot is never mutated after construction. The cache replaces it
/// wholesale, so `name_to_id`, `id_to_name` and `details` always come from
/// the same refresh cycle.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Snapshot {
    /// Refresh cycle that produced this snapshot, starting at 1
    generation: u64,
    /// When the snapshot was installed
    refreshed_at: DateTime<Utc>,
    /// Case-folded name → id
    name_to_id: HashMap<String, HeroId>,
    /// Id → display name with original casing
    id_to_name: HashMap<HeroId, String>,
    /// Id → detail document, for ids whose detail fetch succeeded
    details: HashMap<HeroId, HeroDetail>,
}

/// Identity maps built from a hero list before details are fetched.
#[derive(Debug, Clone, Default)]
pub(crate) struct Identity {
    pub(crate) name_to_id: HashMap<String, HeroId>,
    pub(crate) id_to_name: HashMap<HeroId, String>,
    /// Ids in list order, after de-duplication
    pub(crate) ids: Vec<HeroId>,
}

impl Identity {
    /// Build mutually inverse maps from the upstream list.
    ///
    /// When two ids share a case-folded name, or one id appears twice, the
    /// first entry wins and the rest are dropped.
    pub(crate) fn from_entries(entries: Vec<HeroEntry>) -> Self {
        let mut identity = Self::default();
        for HeroEntry { id, name } in entries {
            let folded = fold_name(&name);
            if folded.is_empty() {
                continue;
            }
            if identity.id_to_name.contains_key(&id) {
                warn!(hero_id = %id, name = %name, "Duplicate hero id in list; keeping first");
                continue;
            }
            if let Some(existing) = identity.name_to_id.get(&folded) {
                warn!(
                    hero_id = %id,
                    kept = %existing,
                    name = %name,
                    "Duplicate hero name in list; keeping first"
                );
                continue;
            }
            identity.name_to_id.insert(folded, id.clone());
            identity.id_to_name.insert(id.clone(), name.trim().to_string());
            identity.ids.push(id);
        }
        identity
    }
}

impl Snapshot {
    pub(crate) fn assemble(
        generation: u64,
        identity: Identity,
        details: HashMap<HeroId, HeroDetail>,
    ) -> Self {
        Self {
            generation,
            refreshed_at: Utc::now(),
            name_to_id: identity.name_to_id,
            id_to_name: identity.id_to_name,
            details,
        }
    }

    /// Case-insensitive exact match.
    pub fn lookup_by_name(&self, name: &str) -> Option<&HeroId> {
        self.name_to_id.get(&fold_name(name))
    }

    /// Detail document for `id`, if its fetch succeeded this cycle.
    pub fn get_detail(&self, id: &HeroId) -> Option<&HeroDetail> {
        self.details.get(id)
    }

    /// Display name for `id`.
    pub fn display_name(&self, id: &HeroId) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str)
    }

    /// Number of heroes with identity information.
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    /// True if the snapshot holds no heroes.
    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Number of heroes with a detail document.
    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    /// Display names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.id_to_name.values().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_keep_first_id() {
        let identity = Identity::from_entries(vec![
            HeroEntry::new("1", "Layla"),
            HeroEntry::new("2", "LAYLA"),
            HeroEntry::new("3", "Tigreal"),
            HeroEntry::new("3", "Miya"),
        ]);

        assert_eq!(identity.ids, vec![HeroId::from("1"), HeroId::from("3")]);
        assert_eq!(identity.name_to_id.get("layla"), Some(&HeroId::from("1")));
        assert!(!identity.name_to_id.contains_key("miya"));
    }

    #[test]
    fn lookup_folds_case_and_whitespace() {
        let identity = Identity::from_entries(vec![HeroEntry::new("1", " Layla ")]);
        let snapshot = Snapshot::assemble(1, identity, HashMap::new());

        assert_eq!(snapshot.lookup_by_name("  lAyLa"), Some(&HeroId::from("1")));
        assert_eq!(snapshot.display_name(&HeroId::from("1")), Some("Layla"));
    }
}
