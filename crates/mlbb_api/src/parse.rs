//! Defensive readers for upstream response bodies.
//!
//! The upstream schema is a third-party contract, so each reader accepts the
//! shapes observed in the wild and treats anything else as malformed.

use crate::{ApiResult, CounterPick, HeroEntry, HeroId, HeroRanking, value_at};
use mlbb_error::{UpstreamError, UpstreamErrorKind};
use serde_json::Value as JsonValue;
use tracing::debug;

const ID_KEYS: [&str; 3] = ["hero_id", "heroid", "id"];
const NAME_KEYS: [&str; 2] = ["name", "hero_name"];

/// Extract id → name entries from a hero list body.
///
/// Accepted shapes:
/// - `{"1": "Miya", "2": "Balmond"}`
/// - `[{"id": 1, "name": "Miya"}, ...]` (also `hero_id` / `heroid`)
/// - either of the above under `data`, or as `data.records[*].data`
///
/// In the map shape every key must be a numeric hero id; an object such as
/// `{"status": "error", "message": "..."}` is not a hero list. Entries with a
/// blank name or no id are skipped.
///
/// # Errors
///
/// Returns [`UpstreamErrorKind::Malformed`] when no entries can be found.
pub fn parse_hero_list(body: &JsonValue) -> ApiResult<Vec<HeroEntry>> {
    check_api_code(body)?;

    let entries = entries_from(body).unwrap_or_default();
    if entries.is_empty() {
        return Err(UpstreamError::new(UpstreamErrorKind::Malformed(
            "hero list contained no recognisable entries".to_string(),
        )));
    }

    debug!(count = entries.len(), "Parsed hero list");
    Ok(entries)
}

fn entries_from(value: &JsonValue) -> Option<Vec<HeroEntry>> {
    match value {
        JsonValue::Object(map)
            if !map.is_empty()
                && map.keys().all(|key| is_numeric_id(key))
                && map.values().all(JsonValue::is_string) =>
        {
            Some(
                map.iter()
                    .filter_map(|(id, name)| entry(HeroId::new(id), name.as_str()?))
                    .collect(),
            )
        }
        JsonValue::Object(map) => map
            .get("data")
            .or_else(|| map.get("records"))
            .and_then(entries_from),
        JsonValue::Array(items) => Some(items.iter().filter_map(entry_from_item).collect()),
        _ => None,
    }
}

fn is_numeric_id(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn entry_from_item(item: &JsonValue) -> Option<HeroEntry> {
    let object = item.as_object()?;

    let id = ID_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(id_from_value);
    let name = NAME_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(JsonValue::as_str);

    match (id, name) {
        (Some(id), Some(name)) => entry(id, name),
        _ => object.get("data").and_then(entry_from_item),
    }
}

fn entry(id: HeroId, name: &str) -> Option<HeroEntry> {
    let name = name.trim();
    if name.is_empty() || id.as_str().is_empty() {
        return None;
    }
    Some(HeroEntry::new(id, name))
}

fn id_from_value(value: &JsonValue) -> Option<HeroId> {
    match value {
        JsonValue::Number(n) => n.as_u64().map(HeroId::from),
        JsonValue::String(s) if !s.trim().is_empty() => Some(HeroId::new(s)),
        _ => None,
    }
}

/// Reject bodies whose API-level status code signals failure.
fn check_api_code(body: &JsonValue) -> ApiResult<()> {
    match body.get("code").and_then(JsonValue::as_i64) {
        Some(code) if code != 0 => {
            let message = body
                .get("message")
                .and_then(JsonValue::as_str)
                .unwrap_or("No message from API.");
            Err(UpstreamError::new(UpstreamErrorKind::Malformed(format!(
                "API reported code {}: {}",
                code, message
            ))))
        }
        _ => Ok(()),
    }
}

fn rate(value: &JsonValue, segments: &[&str]) -> Option<f64> {
    match value_at(value, segments)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

/// Extract up to `limit` ranking rows from a `hero-rank` body.
///
/// # Errors
///
/// Returns [`UpstreamErrorKind::Malformed`] if the API reports a non-zero
/// code or the `data.records` list is missing.
pub fn parse_rankings(body: &JsonValue, limit: usize) -> ApiResult<Vec<HeroRanking>> {
    check_api_code(body)?;

    let records = value_at(body, &["data", "records"])
        .and_then(JsonValue::as_array)
        .ok_or_else(|| {
            UpstreamError::new(UpstreamErrorKind::Malformed(
                "ranking response has no data.records".to_string(),
            ))
        })?;

    Ok(records
        .iter()
        .filter_map(|record| record.get("data").filter(|d| d.is_object()))
        .take(limit)
        .map(|data| HeroRanking {
            name: value_at(data, &["main_hero", "data", "name"])
                .and_then(JsonValue::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            win_rate: rate(data, &["main_hero_win_rate"]),
            pick_rate: rate(data, &["main_hero_appearance_rate"]),
            ban_rate: rate(data, &["main_hero_ban_rate"]),
        })
        .collect())
}

/// Extract up to `limit` counter picks from a `hero-counter` body.
///
/// Missing levels produce an empty list rather than an error; an empty
/// list means the upstream has no counter data for the hero.
pub fn parse_counters(body: &JsonValue, limit: usize) -> ApiResult<Vec<CounterPick>> {
    check_api_code(body)?;

    let Some(sub_heroes) = value_at(body, &["data", "records", "0", "data", "sub_hero"])
        .and_then(JsonValue::as_array)
    else {
        return Ok(Vec::new());
    };

    Ok(sub_heroes
        .iter()
        .take(limit)
        .map(|sub| CounterPick {
            name: value_at(sub, &["hero", "data", "name"])
                .and_then(JsonValue::as_str)
                .unwrap_or("Unknown Hero")
                .to_string(),
            increase_win_rate: rate(sub, &["increase_win_rate"]),
        })
        .collect())
}
