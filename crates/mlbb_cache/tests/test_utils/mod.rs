//! In-memory hero source for cache tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mlbb_api::{ApiResult, HeroDetail, HeroEntry, HeroId, HeroSource};
use mlbb_error::{UpstreamError, UpstreamErrorKind};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted behaviour for the hero list endpoint.
#[derive(Debug, Clone)]
pub enum ListBehavior {
    /// Return these entries
    Entries(Vec<HeroEntry>),
    /// Fail with this error
    Error(UpstreamErrorKind),
    /// Never answer
    Hang,
}

/// Scripted behaviour for one hero's detail endpoint.
#[derive(Debug, Clone)]
pub enum DetailBehavior {
    /// Return a document immediately
    Ok,
    /// Return a document after a delay
    Delay(Duration),
    /// Fail with this error
    Error(UpstreamErrorKind),
    /// Never answer
    Hang,
}

/// Mock upstream with per-endpoint scripted behaviour.
///
/// Detail documents carry the current `tag` so tests can tell which refresh
/// cycle produced them.
pub struct MockHeroSource {
    list: Mutex<ListBehavior>,
    details: Mutex<HashMap<HeroId, DetailBehavior>>,
    tag: Mutex<String>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockHeroSource {
    /// A source listing `heroes` (id, name) whose details all succeed.
    pub fn with_heroes(heroes: &[(&str, &str)]) -> Self {
        let entries = heroes
            .iter()
            .map(|(id, name)| HeroEntry::new(*id, *name))
            .collect();
        Self {
            list: Mutex::new(ListBehavior::Entries(entries)),
            details: Mutex::new(HashMap::new()),
            tag: Mutex::new("cycle-1".to_string()),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Replace the list behaviour.
    pub fn set_list(&self, behavior: ListBehavior) {
        *self.list.lock().unwrap() = behavior;
    }

    /// Script the detail behaviour for one id.
    pub fn set_detail(&self, id: &str, behavior: DetailBehavior) {
        self.details
            .lock()
            .unwrap()
            .insert(HeroId::from(id), behavior);
    }

    /// Reset every detail to succeed.
    pub fn clear_details(&self) {
        self.details.lock().unwrap().clear();
    }

    /// Set the tag stamped into subsequent detail documents.
    pub fn set_tag(&self, tag: &str) {
        *self.tag.lock().unwrap() = tag.to_string();
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Highest number of detail fetches observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn document(&self, id: &HeroId) -> HeroDetail {
        let tag = self.tag.lock().unwrap().clone();
        HeroDetail::new(json!({
            "code": 0,
            "tag": tag,
            "data": {"records": [{"data": {"hero": {"data": {
                "heroid": id.as_str(),
                "sortlabel": ["Marksman"],
                "roadsortlabel": ["Gold Lane"]
            }}}}]}
        }))
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HeroSource for MockHeroSource {
    async fn hero_list(&self) -> ApiResult<Vec<HeroEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.list.lock().unwrap().clone();
        match behavior {
            ListBehavior::Entries(entries) => Ok(entries),
            ListBehavior::Error(kind) => Err(UpstreamError::new(kind)),
            ListBehavior::Hang => std::future::pending().await,
        }
    }

    async fn hero_detail(&self, id: &HeroId) -> ApiResult<HeroDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let behavior = self
            .details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(DetailBehavior::Ok);
        match behavior {
            DetailBehavior::Ok => Ok(self.document(id)),
            DetailBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(self.document(id))
            }
            DetailBehavior::Error(kind) => Err(UpstreamError::new(kind)),
            DetailBehavior::Hang => std::future::pending().await,
        }
    }
}

/// The two-hero roster used by most scenarios.
pub fn layla_and_tigreal() -> MockHeroSource {
    MockHeroSource::with_heroes(&[("1", "Layla"), ("2", "Tigreal")])
}
