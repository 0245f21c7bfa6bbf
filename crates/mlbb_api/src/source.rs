//! The seam between the hero cache and the upstream.

use crate::{ApiResult, HeroDetail, HeroEntry, HeroId};
use std::sync::Arc;

/// Anything that can supply the hero list and per-hero detail documents.
///
/// Implementations report failures through [`crate::UpstreamError`]; they do
/// not retry. Retrying is left to the next refresh cycle.
#[async_trait::async_trait]
pub trait HeroSource: Send + Sync {
    /// Fetch the full id → name list.
    async fn hero_list(&self) -> ApiResult<Vec<HeroEntry>>;

    /// Fetch the detail document for one hero.
    async fn hero_detail(&self, id: &HeroId) -> ApiResult<HeroDetail>;
}

#[async_trait::async_trait]
impl<T: HeroSource + ?Sized> HeroSource for Arc<T> {
    async fn hero_list(&self) -> ApiResult<Vec<HeroEntry>> {
        (**self).hero_list().await
    }

    async fn hero_detail(&self, id: &HeroId) -> ApiResult<HeroDetail> {
        (**self).hero_detail(id).await
    }
}
