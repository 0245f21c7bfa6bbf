//! Curated matchup knowledge shipped with the crate.
//!
//! Two tables complement what the live API reports: per-hero strong/weak
//! matchups, and counter groups that explain *why* a set of heroes answers a
//! playstyle. Names in the tables follow community spelling, so lookups go
//! through [`matchup_key`] rather than exact comparison.

use derive_getters::Getters;
use mlbb_error::JsonError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

const MATCHUPS_JSON: &str = include_str!("../data/matchups.json");
const COUNTER_GROUPS_JSON: &str = include_str!("../data/counter_groups.json");

/// Lookup key for a hero or group name.
///
/// Case, spacing and punctuation are ignored, so `"Yi Sun-shin"`,
/// `"Yisunshin"` and `"yi sun shin"` share a key.
///
/// ```
/// use mlbb_api::matchup_key;
///
/// assert_eq!(matchup_key("Yi Sun-shin"), matchup_key("Yisunshin"));
/// assert_eq!(matchup_key("X.Borg"), "xborg");
/// assert_eq!(matchup_key("Chang’e"), matchup_key("Chang'e"));
/// ```
pub fn matchup_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One hero's curated matchups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Matchup {
    /// Hero the row describes
    hero: String,
    /// Heroes this hero is strong against
    #[serde(default)]
    strong_against: Vec<String>,
    /// Heroes this hero is weak against
    #[serde(default)]
    weak_against: Vec<String>,
}

impl Matchup {
    /// Create a matchup row.
    pub fn new(
        hero: impl Into<String>,
        strong_against: Vec<String>,
        weak_against: Vec<String>,
    ) -> Self {
        Self {
            hero: hero.into(),
            strong_against,
            weak_against,
        }
    }

    /// True if this hero is listed as strong against `other`.
    pub fn beats(&self, other: &str) -> bool {
        contains_key(&self.strong_against, &matchup_key(other))
    }

    /// True if this hero is listed as weak against `other`.
    pub fn loses_to(&self, other: &str) -> bool {
        contains_key(&self.weak_against, &matchup_key(other))
    }

    fn deduplicated(self) -> Self {
        Self {
            strong_against: dedup_by_key(self.strong_against),
            weak_against: dedup_by_key(self.weak_against),
            ..self
        }
    }
}

/// Heroes that answer a playstyle, with the reasoning behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CounterGroup {
    /// Group identifier, e.g. `anti-heal`
    key: String,
    /// Heroes in the group
    heroes: Vec<String>,
    /// Why the group works
    reason: String,
    /// Heroes the group is aimed at, when the table names them
    #[serde(default)]
    counters: Vec<String>,
    /// Battle spells that support the group
    #[serde(default)]
    spells: Vec<String>,
    /// Items that support the group
    #[serde(default)]
    items: Vec<String>,
    /// Playing tips
    #[serde(default)]
    tips: Vec<String>,
}

impl CounterGroup {
    /// Human-readable group name: `anti_dive` becomes `anti dive`.
    pub fn title(&self) -> String {
        self.key.replace(['_', '-'], " ")
    }

    /// True if `hero` belongs to the group.
    pub fn includes(&self, hero: &str) -> bool {
        contains_key(&self.heroes, &matchup_key(hero))
    }
}

/// Indexed matchup tables and counter groups.
///
/// ```
/// use mlbb_api::MatchupBook;
///
/// let book = MatchupBook::bundled().unwrap();
/// let tigreal = book.matchup("tigreal").unwrap();
/// assert!(tigreal.beats("Layla"));
/// assert!(book.group("anti heal").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchupBook {
    matchups: Vec<Matchup>,
    index: HashMap<String, usize>,
    groups: Vec<CounterGroup>,
}

impl MatchupBook {
    /// Load the tables bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if a bundled table does not parse.
    pub fn bundled() -> Result<Self, JsonError> {
        Self::from_json(MATCHUPS_JSON, COUNTER_GROUPS_JSON)
    }

    /// Parse tables from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] naming the table that failed to parse.
    pub fn from_json(matchups: &str, groups: &str) -> Result<Self, JsonError> {
        let matchups: Vec<Matchup> = serde_json::from_str(matchups)
            .map_err(|e| JsonError::new("matchups.json", e.to_string()))?;
        let groups: Vec<CounterGroup> = serde_json::from_str(groups)
            .map_err(|e| JsonError::new("counter_groups.json", e.to_string()))?;
        Ok(Self::from_parts(matchups, groups))
    }

    /// Index already-parsed tables.
    ///
    /// The first row for a hero wins; repeated names within a row are
    /// dropped.
    pub fn from_parts(matchups: Vec<Matchup>, groups: Vec<CounterGroup>) -> Self {
        let mut book = Self {
            groups,
            ..Self::default()
        };
        for matchup in matchups {
            let key = matchup_key(&matchup.hero);
            if key.is_empty() || book.index.contains_key(&key) {
                debug!(hero = %matchup.hero, "Skipping repeated matchup row");
                continue;
            }
            book.index.insert(key, book.matchups.len());
            book.matchups.push(matchup.deduplicated());
        }
        book
    }

    /// Matchup row for `hero`.
    pub fn matchup(&self, hero: &str) -> Option<&Matchup> {
        self.index
            .get(&matchup_key(hero))
            .and_then(|idx| self.matchups.get(*idx))
    }

    /// All matchup rows in table order.
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    /// Heroes known to counter `hero`: its own weak-against list, then every
    /// hero whose row says it is strong against `hero`.
    pub fn counters_of(&self, hero: &str) -> Vec<String> {
        let mut counters = self
            .matchup(hero)
            .map(|row| row.weak_against.clone())
            .unwrap_or_default();
        for row in &self.matchups {
            if row.beats(hero) && !contains_key(&counters, &matchup_key(&row.hero)) {
                counters.push(row.hero.clone());
            }
        }
        counters
    }

    /// Every counter group in table order.
    pub fn groups(&self) -> &[CounterGroup] {
        &self.groups
    }

    /// Counter group by key; `anti heal`, `anti-heal` and `anti_heal` match.
    pub fn group(&self, key: &str) -> Option<&CounterGroup> {
        let wanted = matchup_key(key);
        self.groups.iter().find(|group| matchup_key(&group.key) == wanted)
    }

    /// Groups `hero` belongs to.
    pub fn groups_for(&self, hero: &str) -> Vec<&CounterGroup> {
        self.groups.iter().filter(|group| group.includes(hero)).collect()
    }

    /// Number of heroes with a matchup row.
    pub fn len(&self) -> usize {
        self.matchups.len()
    }

    /// True if no matchup rows are loaded.
    pub fn is_empty(&self) -> bool {
        self.matchups.is_empty()
    }
}

fn contains_key(names: &[String], key: &str) -> bool {
    names.iter().any(|name| matchup_key(name) == key)
}

fn dedup_by_key(names: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !contains_key(&kept, &matchup_key(&name)) {
            kept.push(name);
        }
    }
    kept
}
