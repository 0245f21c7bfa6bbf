mod test_utils;

use mlbb_api::UpstreamErrorKind;
use mlbb_cache::{CacheConfig, HeroCache, spawn_refresh_loop};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{ListBehavior, layla_and_tigreal};

#[tokio::test(start_paused = true)]
async fn test_not_ready_until_first_refresh() {
    let cache = Arc::new(HeroCache::new(layla_and_tigreal(), CacheConfig::default()));

    assert!(!cache.is_ready());
    assert!(!cache.wait_until_ready(Duration::from_secs(1)).await);
    assert!(cache.lookup_by_name("layla").is_none());
    assert!(cache.hero_names().is_empty());

    let handle = spawn_refresh_loop(Arc::clone(&cache), Duration::from_secs(3600));
    assert!(cache.wait_until_ready(Duration::from_secs(5)).await);
    assert_eq!(cache.hero_names(), vec!["Layla".to_string(), "Tigreal".to_string()]);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_loop_refreshes_on_interval() {
    let source = Arc::new(layla_and_tigreal());
    let cache = Arc::new(HeroCache::new(Arc::clone(&source), CacheConfig::default()));

    let handle = spawn_refresh_loop(Arc::clone(&cache), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_secs(125)).await;

    // Immediate run plus ticks at 60s and 120s.
    assert_eq!(source.list_calls(), 3);
    assert_eq!(*cache.snapshot().unwrap().generation(), 3);

    handle.shutdown().await;
    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(source.list_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_loop_survives_failed_cycles() {
    let source = Arc::new(layla_and_tigreal());
    source.set_list(ListBehavior::Error(UpstreamErrorKind::Status {
        endpoint: "hero-list/".to_string(),
        status: 500,
    }));
    let cache = Arc::new(HeroCache::new(Arc::clone(&source), CacheConfig::default()));

    let handle = spawn_refresh_loop(Arc::clone(&cache), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!cache.is_ready());
    assert_eq!(cache.status().consecutive_failures, 1);

    source.set_list(ListBehavior::Entries(vec![mlbb_api::HeroEntry::new("1", "Layla")]));
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert!(cache.is_ready());
    assert!(!handle.is_finished());
    handle.shutdown().await;
}
