//! Background refresh loop.

use crate::HeroCache;
use mlbb_api::HeroSource;
use mlbb_error::CacheErrorKind;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

/// Handle to a running refresh loop.
///
/// Dropping the handle also stops the loop at its next suspension point.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the loop and wait for it to exit.
    ///
    /// A refresh in progress is abandoned; the installed snapshot is
    /// whatever the last completed refresh left.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await
            && !e.is_cancelled()
        {
            error!(error = ?e, "Refresh loop panicked");
        }
    }

    /// True once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Refresh `cache` immediately and then every `interval`.
///
/// Cycles never overlap: a slow refresh delays the next tick rather than
/// stacking another one behind it. Failures are logged and the next tick
/// tries again.
pub fn spawn_refresh_loop<S>(cache: Arc<HeroCache<S>>, interval: Duration) -> RefreshHandle
where
    S: HeroSource + 'static,
{
    let (shutdown, mut stop) = oneshot::channel();

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = interval.as_secs(), "Hero refresh loop started");

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = &mut stop => break,
                result = cache.refresh() => {
                    if let Err(e) = result {
                        let outage = matches!(
                            &e.kind,
                            CacheErrorKind::ListFetch(kind) if kind.is_unavailable()
                        );
                        warn!(
                            error = %e.kind,
                            outage,
                            heroes = cache.snapshot_size(),
                            "Scheduled refresh failed"
                        );
                    }
                }
            }
        }

        info!("Hero refresh loop stopped");
    });

    RefreshHandle { shutdown, task }
}
