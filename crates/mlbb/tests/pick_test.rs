use async_trait::async_trait;
use mlbb::{
    CacheConfig, FALLBACK_ROSTER, HeroCache, HeroDetail, HeroEntry, HeroId, HeroSource,
    PickSource, random_from_list, random_hero,
};
use mlbb_api::ApiResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

struct FixedRoster(Vec<HeroEntry>);

#[async_trait]
impl HeroSource for FixedRoster {
    async fn hero_list(&self) -> ApiResult<Vec<HeroEntry>> {
        Ok(self.0.clone())
    }

    async fn hero_detail(&self, id: &HeroId) -> ApiResult<HeroDetail> {
        Ok(HeroDetail::new(json!({ "id": id.as_str() })))
    }
}

#[tokio::test]
async fn test_pick_uses_snapshot_when_ready() {
    let source = FixedRoster(vec![HeroEntry::new("1", "Layla"), HeroEntry::new("2", "Tigreal")]);
    let cache = HeroCache::new(source, CacheConfig::default());
    cache.refresh().await.unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let hero = random_hero(&cache, &mut rng);
        assert_eq!(hero.source, PickSource::Snapshot);
        assert!(hero.name == "Layla" || hero.name == "Tigreal");
    }
}

#[tokio::test]
async fn test_pick_falls_back_before_first_refresh() {
    let cache = HeroCache::new(FixedRoster(Vec::new()), CacheConfig::default());

    let hero = random_hero(&cache, &mut StdRng::seed_from_u64(7));

    assert_eq!(hero.source, PickSource::Fallback);
    assert!(FALLBACK_ROSTER.contains(&hero.name.as_str()));
}

#[test]
fn test_pick_from_fetched_list() {
    let entries = vec![HeroEntry::new("1", "Layla"), HeroEntry::new("2", "Tigreal")];
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let hero = random_from_list(&entries, &mut rng);
        assert_eq!(hero.source, PickSource::Upstream);
        assert!(hero.name == "Layla" || hero.name == "Tigreal");
    }

    let hero = random_from_list(&[], &mut rng);
    assert_eq!(hero.source, PickSource::Fallback);
    assert!(FALLBACK_ROSTER.contains(&hero.name.as_str()));
}
