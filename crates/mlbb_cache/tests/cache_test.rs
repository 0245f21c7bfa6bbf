mod test_utils;

use mlbb_api::{HeroId, UpstreamErrorKind};
use mlbb_cache::{CacheConfig, CacheErrorKind, HeroCache, fold_name};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{DetailBehavior, ListBehavior, MockHeroSource, layla_and_tigreal};

fn fast_config() -> CacheConfig {
    CacheConfig::default()
        .with_list_timeout_secs(2)
        .with_detail_timeout_secs(1)
        .with_refresh_timeout_secs(30)
}

fn tag_of(cache: &HeroCache<Arc<MockHeroSource>>, id: &str) -> Option<String> {
    cache
        .get_detail(&HeroId::from(id))
        .and_then(|detail| detail.str_at(&["tag"]).map(str::to_string))
}

#[tokio::test(start_paused = true)]
async fn test_detail_timeout_leaves_only_that_hero_without_detail() {
    let source = layla_and_tigreal();
    source.set_detail("2", DetailBehavior::Hang);
    let cache = HeroCache::new(source, fast_config());

    let snapshot = cache.refresh().await.unwrap();

    assert_eq!(snapshot.name_to_id().len(), 2);
    assert_eq!(snapshot.name_to_id().get("layla"), Some(&HeroId::from("1")));
    assert_eq!(snapshot.name_to_id().get("tigreal"), Some(&HeroId::from("2")));
    assert_eq!(snapshot.id_to_name().get(&HeroId::from("1")).map(String::as_str), Some("Layla"));
    assert_eq!(snapshot.id_to_name().get(&HeroId::from("2")).map(String::as_str), Some("Tigreal"));
    assert!(cache.get_detail(&HeroId::from("1")).is_some());
    assert!(cache.get_detail(&HeroId::from("2")).is_none());
    assert_eq!(cache.snapshot_size(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_list_failure_keeps_previous_snapshot() {
    let source = Arc::new(layla_and_tigreal());
    let cache = HeroCache::new(Arc::clone(&source), fast_config());
    cache.refresh().await.unwrap();

    let before = cache.snapshot().unwrap();
    let size_before = cache.snapshot_size();

    source.set_list(ListBehavior::Error(UpstreamErrorKind::Status {
        endpoint: "hero-list/".to_string(),
        status: 500,
    }));
    let err = cache.refresh().await.unwrap_err();

    assert!(matches!(
        err.kind,
        CacheErrorKind::ListFetch(UpstreamErrorKind::Status { status: 500, .. })
    ));
    let after = cache.snapshot().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
    assert_eq!(cache.snapshot_size(), size_before);

    let status = cache.status();
    assert!(status.ready);
    assert_eq!(status.consecutive_failures, 1);
    assert!(status.last_error.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_list_fails_refresh() {
    let source = layla_and_tigreal();
    source.set_list(ListBehavior::Error(UpstreamErrorKind::Malformed(
        "not json".to_string(),
    )));
    let cache = HeroCache::new(source, fast_config());

    let err = cache.refresh().await.unwrap_err();

    assert!(matches!(err.kind, CacheErrorKind::ListFetch(UpstreamErrorKind::Malformed(_))));
    assert!(!cache.is_ready());
    assert_eq!(cache.snapshot_size(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hung_list_times_out() {
    let source = layla_and_tigreal();
    source.set_list(ListBehavior::Hang);
    let cache = HeroCache::new(source, fast_config());

    let err = cache.refresh().await.unwrap_err();

    assert!(matches!(err.kind, CacheErrorKind::ListFetch(UpstreamErrorKind::Timeout { .. })));
    assert!(!cache.is_ready());
}

#[tokio::test(start_paused = true)]
async fn test_empty_list_is_rejected() {
    let source = MockHeroSource::with_heroes(&[]);
    let cache = HeroCache::new(source, fast_config());

    let err = cache.refresh().await.unwrap_err();

    assert!(matches!(err.kind, CacheErrorKind::EmptyHeroList));
    assert!(!cache.is_ready());
}

#[tokio::test(start_paused = true)]
async fn test_k_of_n_details_without_stale_entries() {
    let source = Arc::new(MockHeroSource::with_heroes(&[
        ("1", "Layla"),
        ("2", "Tigreal"),
        ("3", "Miya"),
        ("4", "Balmond"),
        ("5", "Saber"),
    ]));
    source.set_detail("2", DetailBehavior::Error(UpstreamErrorKind::Status {
        endpoint: "hero-detail/2/".to_string(),
        status: 502,
    }));
    source.set_detail("4", DetailBehavior::Hang);
    let cache = HeroCache::new(Arc::clone(&source), fast_config());

    let first = cache.refresh().await.unwrap();
    assert_eq!(first.details().len(), 3);
    assert!(cache.get_detail(&HeroId::from("2")).is_none());
    assert!(cache.get_detail(&HeroId::from("4")).is_none());

    // Heroes that had detail last cycle lose it when their fetch fails now.
    source.clear_details();
    source.set_tag("cycle-2");
    source.set_detail("1", DetailBehavior::Error(UpstreamErrorKind::Malformed(
        "truncated".to_string(),
    )));
    source.set_detail("3", DetailBehavior::Hang);

    let second = cache.refresh().await.unwrap();
    assert_eq!(second.details().len(), 3);
    assert!(cache.get_detail(&HeroId::from("1")).is_none());
    assert!(cache.get_detail(&HeroId::from("3")).is_none());
    for id in ["2", "4", "5"] {
        assert_eq!(tag_of(&cache, id).as_deref(), Some("cycle-2"));
    }
}

#[tokio::test(start_paused = true)]
async fn test_name_maps_are_mutual_inverses() {
    let source = MockHeroSource::with_heroes(&[
        ("1", "Layla"),
        ("2", "Tigreal"),
        ("3", "Chang'e"),
        ("4", "Yi Sun-shin"),
        ("5", "LAYLA"),
    ]);
    let cache = HeroCache::new(source, fast_config());

    let snapshot = cache.refresh().await.unwrap();

    assert_eq!(snapshot.name_to_id().len(), snapshot.id_to_name().len());
    for (folded, id) in snapshot.name_to_id() {
        let name = snapshot.id_to_name().get(id).unwrap();
        assert_eq!(&fold_name(name), folded);
    }
    for (id, name) in snapshot.id_to_name() {
        assert_eq!(snapshot.name_to_id().get(&fold_name(name)), Some(id));
    }
    // The later duplicate does not displace the first id.
    assert_eq!(cache.lookup_by_name("layla"), Some(HeroId::from("1")));
    assert!(cache.display_name(&HeroId::from("5")).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_readers_see_whole_snapshots_during_refresh() {
    let source = Arc::new(layla_and_tigreal());
    let cache = Arc::new(HeroCache::new(Arc::clone(&source), fast_config().with_detail_timeout_secs(60)));
    cache.refresh().await.unwrap();

    source.set_tag("cycle-2");
    source.set_list(ListBehavior::Entries(vec![
        mlbb_api::HeroEntry::new("1", "Layla"),
        mlbb_api::HeroEntry::new("2", "Tigreal"),
        mlbb_api::HeroEntry::new("3", "Miya"),
    ]));
    source.set_detail("3", DetailBehavior::Delay(Duration::from_secs(10)));

    let refreshing = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.refresh().await })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;

    // Mid-refresh: the old snapshot is still whole.
    let mid = cache.snapshot().unwrap();
    assert_eq!(*mid.generation(), 1);
    assert_eq!(mid.len(), 2);
    assert!(cache.lookup_by_name("miya").is_none());
    assert_eq!(tag_of(&cache, "1").as_deref(), Some("cycle-1"));
    assert!(cache.status().refreshing);

    let installed = refreshing.await.unwrap().unwrap();
    assert_eq!(*installed.generation(), 2);
    assert_eq!(cache.lookup_by_name("Miya"), Some(HeroId::from("3")));
    for id in ["1", "2", "3"] {
        assert_eq!(tag_of(&cache, id).as_deref(), Some("cycle-2"));
    }
    // The earlier Arc still points at the untouched generation-1 snapshot.
    assert_eq!(*mid.generation(), 1);
    assert_eq!(mid.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_refresh_is_rejected() {
    let source = Arc::new(layla_and_tigreal());
    source.set_list(ListBehavior::Hang);
    let cache = Arc::new(HeroCache::new(Arc::clone(&source), fast_config().with_list_timeout_secs(60)));

    let first = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = cache.refresh().await.unwrap_err();
    assert!(matches!(err.kind, CacheErrorKind::RefreshInProgress));
    assert_eq!(source.list_calls(), 1);

    let first = first.await.unwrap();
    assert!(first.is_err());

    source.set_list(ListBehavior::Entries(vec![mlbb_api::HeroEntry::new("1", "Layla")]));
    assert!(cache.refresh().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_fan_out_respects_max_in_flight() {
    let heroes: Vec<(String, String)> = (1..=10)
        .map(|i| (i.to_string(), format!("Hero {}", i)))
        .collect();
    let borrowed: Vec<(&str, &str)> = heroes
        .iter()
        .map(|(id, name)| (id.as_str(), name.as_str()))
        .collect();
    let source = MockHeroSource::with_heroes(&borrowed);
    for (id, _) in &borrowed {
        source.set_detail(id, DetailBehavior::Delay(Duration::from_millis(100)));
    }
    let cache = HeroCache::new(source, fast_config().with_max_in_flight(3));

    let snapshot = cache.refresh().await.unwrap();

    assert_eq!(snapshot.detail_count(), 10);
    assert_eq!(cache.source().detail_calls(), 10);
    assert!(cache.source().max_in_flight() <= 3);
    assert!(cache.source().max_in_flight() >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_deadline_drops_outstanding_details() {
    let source = layla_and_tigreal();
    source.set_detail("2", DetailBehavior::Delay(Duration::from_secs(50)));
    let config = fast_config()
        .with_detail_timeout_secs(60)
        .with_refresh_timeout_secs(5);
    let cache = HeroCache::new(source, config);

    let snapshot = cache.refresh().await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.detail_count(), 1);
    assert!(cache.get_detail(&HeroId::from("2")).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_generation_increments_and_status_recovers() {
    let source = Arc::new(layla_and_tigreal());
    let cache = HeroCache::new(Arc::clone(&source), fast_config());

    assert_eq!(cache.status().generation, 0);
    cache.refresh().await.unwrap();

    source.set_list(ListBehavior::Error(UpstreamErrorKind::Unavailable(
        "connection refused".to_string(),
    )));
    cache.refresh().await.unwrap_err();
    cache.refresh().await.unwrap_err();
    assert_eq!(cache.status().consecutive_failures, 2);
    assert_eq!(cache.status().generation, 1);

    source.set_list(ListBehavior::Entries(vec![mlbb_api::HeroEntry::new("1", "Layla")]));
    let snapshot = cache.refresh().await.unwrap();

    let status = cache.status();
    assert_eq!(*snapshot.generation(), 2);
    assert_eq!(status.generation, 2);
    assert_eq!(status.consecutive_failures, 0);
    assert!(status.last_error.is_none());
    assert_eq!(status.heroes, 1);
    assert!(!status.refreshing);
}

#[tokio::test(start_paused = true)]
async fn test_status_reports_refreshing_without_taking_the_guard() {
    let source = Arc::new(layla_and_tigreal());
    source.set_detail("2", DetailBehavior::Delay(Duration::from_secs(5)));
    let cache = Arc::new(HeroCache::new(Arc::clone(&source), fast_config().with_detail_timeout_secs(10)));

    let running = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    for _ in 0..100 {
        assert!(cache.status().refreshing);
    }
    running.await.unwrap().unwrap();
    assert!(!cache.status().refreshing);

    // Polling status alongside a refresh never turns it away.
    let poll = async {
        for _ in 0..100 {
            let _ = cache.status();
            tokio::task::yield_now().await;
        }
    };
    let (_, refreshed) = tokio::join!(poll, cache.refresh());
    assert_eq!(*refreshed.unwrap().generation(), 2);
    assert!(!cache.status().refreshing);
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn test_refresh_future_can_be_spawned() {
    let cache = HeroCache::new(layla_and_tigreal(), fast_config());
    let refresh = cache.refresh();
    assert_send(&refresh);
}
