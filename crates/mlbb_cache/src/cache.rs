//! The hero data cache and its refresh cycle.

use crate::snapshot::Identity;
use crate::{CacheConfig, CacheResult, Snapshot};
use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use mlbb_api::{HeroDetail, HeroId, HeroSource};
use mlbb_error::{CacheError, CacheErrorKind, UpstreamErrorKind};
use std::collections::HashMap;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, watch};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Outcome bookkeeping for the most recent refresh attempts.
#[derive(Debug, Clone, Default)]
struct RefreshHealth {
    last_error: Option<String>,
    consecutive_failures: u32,
    last_attempt: Option<DateTime<Utc>>,
}

/// Diagnostic view of the cache.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
#[display(
    "ready={} heroes={} details={} generation={} failures={}",
    ready,
    heroes,
    details,
    generation,
    consecutive_failures
)]
pub struct CacheStatus {
    /// True once the first refresh has installed a snapshot
    pub ready: bool,
    /// Heroes with identity information
    pub heroes: usize,
    /// Heroes with a detail document
    pub details: usize,
    /// Generation of the installed snapshot, 0 if none
    pub generation: u64,
    /// When the installed snapshot was built
    pub refreshed_at: Option<DateTime<Utc>>,
    /// When a refresh last ran to completion or failure
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error of the last refresh, if it failed
    pub last_error: Option<String>,
    /// Failed refreshes since the last success
    pub consecutive_failures: u32,
    /// True while a refresh is running
    pub refreshing: bool,
}

/// Hero identity and detail cache backed by a [`HeroSource`].
///
/// Readers load the current [`Snapshot`] through an atomic pointer and never
/// wait on a refresh. A refresh builds a complete new snapshot off to the
/// side and swaps it in as one step; a refresh whose hero list fetch fails
/// leaves the installed snapshot untouched.
///
/// # Example
///
/// ```no_run
/// use mlbb_api::{ApiConfig, MlbbApiClient};
/// use mlbb_cache::{CacheConfig, HeroCache};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MlbbApiClient::new(ApiConfig::default())?;
/// let cache = HeroCache::new(client, CacheConfig::default());
///
/// cache.refresh().await?;
/// if let Some(id) = cache.lookup_by_name("layla") {
///     println!("Layla is hero {}", id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HeroCache<S> {
    source: S,
    config: CacheConfig,
    current: ArcSwapOption<Snapshot>,
    refresh_guard: Mutex<()>,
    refreshing: AtomicBool,
    health: ArcSwap<RefreshHealth>,
    installed: watch::Sender<u64>,
}

/// Clears the in-flight flag when the refresh holding it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn mark(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: HeroSource> HeroCache<S> {
    /// Create an empty cache. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn new(source: S, config: CacheConfig) -> Self {
        debug!(
            max_in_flight = config.max_in_flight(),
            refresh_interval_secs = config.refresh_interval_secs(),
            "Creating HeroCache"
        );
        let (installed, _) = watch::channel(0);
        Self {
            source,
            config,
            current: ArcSwapOption::empty(),
            refresh_guard: Mutex::new(()),
            refreshing: AtomicBool::new(false),
            health: ArcSwap::from_pointee(RefreshHealth::default()),
            installed,
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The upstream this cache refreshes from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one full refresh cycle.
    ///
    /// Fetches the hero list, fans out detail fetches, and installs the
    /// resulting snapshot atomically. Detail fetches that fail or time out
    /// leave their id without detail; they never fail the refresh.
    ///
    /// # Errors
    ///
    /// - [`CacheErrorKind::RefreshInProgress`] if another refresh is running.
    ///   The running refresh is not disturbed.
    /// - [`CacheErrorKind::ListFetch`] if the hero list could not be fetched
    ///   or parsed. The installed snapshot is retained.
    /// - [`CacheErrorKind::EmptyHeroList`] if the list held no heroes.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> CacheResult<Arc<Snapshot>> {
        let Ok(_guard) = self.refresh_guard.try_lock() else {
            debug!("Refresh already in flight");
            return Err(CacheError::new(CacheErrorKind::RefreshInProgress));
        };
        let _in_flight = InFlight::mark(&self.refreshing);

        let started = Instant::now();
        let result = self.run_cycle().await;
        self.record_outcome(&result);

        match &result {
            Ok(snapshot) => info!(
                generation = snapshot.generation(),
                heroes = snapshot.len(),
                details = snapshot.detail_count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Hero snapshot installed"
            ),
            Err(e) => warn!(error = %e.kind, "Refresh failed; keeping previous snapshot"),
        }
        result
    }

    async fn run_cycle(&self) -> CacheResult<Arc<Snapshot>> {
        let entries = match timeout(self.config.list_timeout(), self.source.hero_list()).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => return Err(CacheError::new(CacheErrorKind::ListFetch(e.kind))),
            Err(_) => {
                return Err(CacheError::new(CacheErrorKind::ListFetch(
                    UpstreamErrorKind::Timeout {
                        endpoint: "hero list".to_string(),
                        millis: self.config.list_timeout().as_millis() as u64,
                    },
                )));
            }
        };

        let identity = Identity::from_entries(entries);
        if identity.ids.is_empty() {
            return Err(CacheError::new(CacheErrorKind::EmptyHeroList));
        }

        let details = self.fetch_details(identity.ids.clone()).await;

        let generation = self
            .current
            .load()
            .as_ref()
            .map_or(0, |snapshot| *snapshot.generation())
            + 1;
        let snapshot = Arc::new(Snapshot::assemble(generation, identity, details));
        self.current.store(Some(Arc::clone(&snapshot)));
        self.installed.send_replace(generation);
        Ok(snapshot)
    }

    /// Fetch every detail with at most `max_in_flight` requests outstanding.
    ///
    /// Whatever has not completed when the fan-out deadline elapses is
    /// dropped and counted as missing.
    async fn fetch_details(&self, ids: Vec<HeroId>) -> HashMap<HeroId, HeroDetail> {
        let total = ids.len();
        let detail_timeout = self.config.detail_timeout();
        let source = &self.source;
        let mut fetches = pin!(
            stream::iter(ids)
                .map(|id| async move {
                    let outcome = timeout(detail_timeout, source.hero_detail(&id)).await;
                    (id, outcome)
                })
                .buffer_unordered(self.config.concurrency())
        );
        let mut deadline = pin!(tokio::time::sleep(self.config.refresh_timeout()));

        let mut details = HashMap::with_capacity(total);
        let mut failed = 0usize;
        loop {
            tokio::select! {
                next = fetches.next() => match next {
                    Some((id, Ok(Ok(detail)))) => {
                        details.insert(id, detail);
                    }
                    Some((id, Ok(Err(e)))) => {
                        failed += 1;
                        debug!(hero_id = %id, error = %e.kind, "Detail fetch failed");
                    }
                    Some((id, Err(_))) => {
                        failed += 1;
                        debug!(hero_id = %id, timeout_ms = detail_timeout.as_millis() as u64, "Detail fetch timed out");
                    }
                    None => break,
                },
                _ = &mut deadline => {
                    warn!(
                        outstanding = total - details.len() - failed,
                        "Refresh deadline elapsed; outstanding details treated as missing"
                    );
                    break;
                }
            }
        }

        let missing = total - details.len();
        if missing > 0 {
            info!(missing, total, "Snapshot built with partial detail");
        }
        details
    }

    fn record_outcome(&self, result: &CacheResult<Arc<Snapshot>>) {
        let previous = self.health.load();
        let health = match result {
            Ok(_) => RefreshHealth {
                last_error: None,
                consecutive_failures: 0,
                last_attempt: Some(Utc::now()),
            },
            Err(e) => RefreshHealth {
                last_error: Some(e.kind.to_string()),
                consecutive_failures: previous.consecutive_failures.saturating_add(1),
                last_attempt: Some(Utc::now()),
            },
        };
        self.health.store(Arc::new(health));
    }
}

impl<S> HeroCache<S> {
    /// The installed snapshot, or `None` before the first successful refresh.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// True once the first refresh has installed a snapshot.
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    /// Case-insensitive exact lookup against the installed snapshot.
    pub fn lookup_by_name(&self, name: &str) -> Option<HeroId> {
        self.current
            .load()
            .as_ref()
            .and_then(|snapshot| snapshot.lookup_by_name(name).cloned())
    }

    /// Detail document for `id` from the installed snapshot.
    pub fn get_detail(&self, id: &HeroId) -> Option<HeroDetail> {
        self.current
            .load()
            .as_ref()
            .and_then(|snapshot| snapshot.get_detail(id).cloned())
    }

    /// Display name for `id` from the installed snapshot.
    pub fn display_name(&self, id: &HeroId) -> Option<String> {
        self.current
            .load()
            .as_ref()
            .and_then(|snapshot| snapshot.display_name(id).map(str::to_string))
    }

    /// Number of heroes in the installed snapshot, 0 before the first refresh.
    pub fn snapshot_size(&self) -> usize {
        self.current.load().as_ref().map_or(0, |snapshot| snapshot.len())
    }

    /// Sorted display names from the installed snapshot.
    pub fn hero_names(&self) -> Vec<String> {
        self.current.load().as_ref().map_or_else(Vec::new, |snapshot| {
            snapshot.names().into_iter().map(str::to_string).collect()
        })
    }

    /// Wait up to `limit` for the first snapshot. Returns readiness.
    pub async fn wait_until_ready(&self, limit: Duration) -> bool {
        if self.is_ready() {
            return true;
        }
        let mut installed = self.installed.subscribe();
        matches!(
            timeout(limit, installed.wait_for(|generation| *generation > 0)).await,
            Ok(Ok(_))
        )
    }

    /// Current readiness, sizes and refresh health.
    pub fn status(&self) -> CacheStatus {
        let snapshot = self.current.load_full();
        let health = self.health.load();
        CacheStatus {
            ready: snapshot.is_some(),
            heroes: snapshot.as_ref().map_or(0, |s| s.len()),
            details: snapshot.as_ref().map_or(0, |s| s.detail_count()),
            generation: snapshot.as_ref().map_or(0, |s| *s.generation()),
            refreshed_at: snapshot.as_ref().map(|s| *s.refreshed_at()),
            last_attempt: health.last_attempt,
            last_error: health.last_error.clone(),
            consecutive_failures: health.consecutive_failures,
            refreshing: self.refreshing.load(Ordering::Acquire),
        }
    }
}

impl<S> std::fmt::Debug for HeroCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroCache")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
