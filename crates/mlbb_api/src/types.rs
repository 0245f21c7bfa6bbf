//! Hero identity and detail types.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identifier assigned to a hero by the upstream API.
///
/// The upstream mixes numeric and string ids; both are normalised to their
/// decimal string form so `18` and `"18"` name the same hero.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct HeroId(String);

impl HeroId {
    /// Create an id from any string-like value, trimming whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeroId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for HeroId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<u64> for HeroId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// One row of the upstream hero list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroEntry {
    /// Upstream identifier
    pub id: HeroId,
    /// Display name with its original casing
    pub name: String,
}

impl HeroEntry {
    /// Create a new list entry.
    pub fn new(id: impl Into<HeroId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Walk a JSON document along `segments`.
///
/// Object levels are indexed by key and array levels by a decimal index.
/// Any missing level, type mismatch, or `null` yields `None`.
///
/// # Examples
///
/// ```
/// use mlbb_api::value_at;
/// use serde_json::json;
///
/// let doc = json!({"data": {"records": [{"name": "Layla"}]}});
/// assert_eq!(value_at(&doc, &["data", "records", "0", "name"]), Some(&json!("Layla")));
/// assert_eq!(value_at(&doc, &["data", "records", "3", "name"]), None);
/// ```
pub fn value_at<'a>(value: &'a JsonValue, segments: &[&str]) -> Option<&'a JsonValue> {
    let mut current = value;
    for segment in segments {
        current = match current {
            JsonValue::Object(map) => map.get(*segment)?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// Kinds of hero relationship the detail document records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Heroes this hero combines well with
    Assist,
    /// Heroes this hero is strong against
    Strong,
    /// Heroes this hero is weak against
    Weak,
}

impl Relation {
    fn path<'a>(&'a self, tail: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["data", "records", "0", "data", "relation", self.as_ref()];
        segments.extend_from_slice(tail);
        segments
    }
}

/// Full per-hero document as returned by the detail endpoint.
///
/// The cache treats this as an opaque blob. Consumers read the few paths
/// they need through the accessors, each of which tolerates absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroDetail(JsonValue);

impl HeroDetail {
    /// Wrap a raw upstream document.
    pub fn new(document: JsonValue) -> Self {
        Self(document)
    }

    /// The raw document.
    pub fn document(&self) -> &JsonValue {
        &self.0
    }

    /// Value at a nested path, if every level exists.
    pub fn get_path(&self, segments: &[&str]) -> Option<&JsonValue> {
        value_at(&self.0, segments)
    }

    /// String at a nested path.
    pub fn str_at(&self, segments: &[&str]) -> Option<&str> {
        self.get_path(segments).and_then(JsonValue::as_str)
    }

    /// Number at a nested path; numeric strings are accepted.
    pub fn f64_at(&self, segments: &[&str]) -> Option<f64> {
        match self.get_path(segments)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Hero name as recorded in the detail document.
    pub fn name(&self) -> Option<&str> {
        self.str_at(&["data", "records", "0", "data", "hero", "data", "name"])
    }

    /// Role labels, e.g. `["Mage", "Support"]`.
    pub fn roles(&self) -> Vec<String> {
        self.labels(&["data", "records", "0", "data", "hero", "data", "sortlabel"])
    }

    /// Lane labels, e.g. `["Mid Lane"]`.
    pub fn lanes(&self) -> Vec<String> {
        self.labels(&["data", "records", "0", "data", "hero", "data", "roadsortlabel"])
    }

    /// Short narrative blurb.
    pub fn story(&self) -> Option<&str> {
        self.str_at(&["data", "records", "0", "data", "hero", "data", "story"])
    }

    /// Heroes listed under `relation` in the detail document.
    ///
    /// Ids may be numbers or strings; the upstream pads short lists with
    /// `0`, which is dropped along with repeats.
    pub fn relation(&self, relation: Relation) -> Vec<HeroId> {
        let mut ids: Vec<HeroId> = Vec::new();
        let Some(JsonValue::Array(targets)) = self.get_path(&relation.path(&["target_hero_id"]))
        else {
            return ids;
        };
        for target in targets {
            let id = match target {
                JsonValue::Number(n) => n.as_u64().filter(|n| *n != 0).map(HeroId::from),
                JsonValue::String(s) => Some(HeroId::new(s)).filter(|id| {
                    !id.as_str().is_empty() && id.as_str() != "0"
                }),
                _ => None,
            };
            if let Some(id) = id
                && !ids.contains(&id)
            {
                ids.push(id);
            }
        }
        ids
    }

    /// Upstream's prose for a relation, when present.
    pub fn relation_note(&self, relation: Relation) -> Option<&str> {
        self.str_at(&relation.path(&["desc"]))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn labels(&self, segments: &[&str]) -> Vec<String> {
        match self.get_path(segments) {
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Some(JsonValue::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }
}

impl From<JsonValue> for HeroDetail {
    fn from(document: JsonValue) -> Self {
        Self::new(document)
    }
}
