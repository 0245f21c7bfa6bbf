//! reqwest implementation of the upstream client.

use crate::{
    ApiConfig, ApiResult, CounterPick, DaysWindow, HeroDetail, HeroEntry, HeroId, HeroRanking,
    HeroSource, RankFilter, parse_counters, parse_hero_list, parse_rankings,
};
use mlbb_error::{HttpError, UpstreamError, UpstreamErrorKind};
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

/// HTTP client for the hero statistics API.
///
/// Every request carries the configured timeout, so a hung upstream never
/// blocks a caller for longer than `request_timeout_secs`.
#[derive(Debug, Clone)]
pub struct MlbbApiClient {
    client: Client,
    config: ApiConfig,
}

impl MlbbApiClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: ApiConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent().as_str())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created MLBB API client");
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `path` and parse the body as JSON.
    async fn get_json(&self, path: &str) -> ApiResult<JsonValue> {
        let url = self.config.url_for(path);
        debug!(url = %url, "Sending MLBB API request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::new(UpstreamErrorKind::Timeout {
                    endpoint: path.to_string(),
                    millis: self.config.request_timeout().as_millis() as u64,
                })
            } else {
                UpstreamError::new(UpstreamErrorKind::Unavailable(format!(
                    "Request to {} failed: {}",
                    path, e
                )))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = path, status = status.as_u16(), "MLBB API returned error status");
            return Err(UpstreamError::new(UpstreamErrorKind::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            }));
        }

        let body = response.text().await.map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::Unavailable(format!(
                "Failed to read body from {}: {}",
                path, e
            )))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::Malformed(format!(
                "{} did not return valid JSON: {}",
                path, e
            )))
        })
    }

    fn detail_path(&self, id: &HeroId) -> String {
        self.config.hero_detail_path().replace("{id}", id.as_str())
    }

    /// Top hero rankings for a rank bracket and time window.
    ///
    /// # Errors
    ///
    /// Fails if the endpoint is unreachable or the body is not a ranking
    /// table.
    #[instrument(skip(self), fields(rank = %rank, days = days.days()))]
    pub async fn hero_rankings(
        &self,
        rank: RankFilter,
        days: DaysWindow,
        limit: usize,
    ) -> ApiResult<Vec<HeroRanking>> {
        let path = self
            .config
            .hero_rank_path()
            .replace("{rank}", rank.as_ref())
            .replace("{days}", &days.days().to_string());
        let body = self.get_json(&path).await?;
        parse_rankings(&body, limit)
    }

    /// Heroes that counter `id`, strongest first.
    ///
    /// # Errors
    ///
    /// Fails if the endpoint is unreachable or reports an API-level error.
    /// A hero without counter data yields an empty list.
    #[instrument(skip(self), fields(hero_id = %id))]
    pub async fn hero_counters(&self, id: &HeroId, limit: usize) -> ApiResult<Vec<CounterPick>> {
        let path = self.config.hero_counter_path().replace("{id}", id.as_str());
        let body = self.get_json(&path).await?;
        parse_counters(&body, limit)
    }
}

#[async_trait::async_trait]
impl HeroSource for MlbbApiClient {
    #[instrument(skip(self))]
    async fn hero_list(&self) -> ApiResult<Vec<HeroEntry>> {
        let body = self.get_json(self.config.hero_list_path()).await?;
        parse_hero_list(&body)
    }

    #[instrument(skip(self), fields(hero_id = %id))]
    async fn hero_detail(&self, id: &HeroId) -> ApiResult<HeroDetail> {
        let path = self.detail_path(id);
        let body = self.get_json(&path).await?;
        if let Some(code) = body.get("code").and_then(JsonValue::as_i64)
            && code != 0
        {
            return Err(UpstreamError::new(UpstreamErrorKind::Malformed(format!(
                "detail for hero {} reported code {}",
                id, code
            ))));
        }
        Ok(HeroDetail::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_path_substitutes_id() {
        let client = MlbbApiClient::new(ApiConfig::default()).unwrap();
        assert_eq!(client.detail_path(&HeroId::from(18u64)), "hero-detail/18/");
    }
}
