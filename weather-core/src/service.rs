use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;

use crate::{
    cache::WeatherCache,
    combine::combine,
    config::Config,
    location::{CACHE_KEY_PREFIX, resolve},
    model::WeatherReport,
    provider::{WeatherProvider, weatherapi::WeatherApiProvider},
};

/// What to evict from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTarget {
    /// Every cached weather report.
    All,
    /// The entry a manual search for this location would use.
    Location(String),
    /// The entry a lookup from this network origin would use.
    Origin(String),
}

/// Report plus whether it came from an explicit location search.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub report: WeatherReport,
    pub manual_search: bool,
}

/// Entry point used by request layers: resolve, consult the cache, fetch on miss.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<WeatherCache>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<WeatherCache>, ttl: Duration) -> Self {
        Self { provider, cache, ttl }
    }

    /// Service backed by WeatherAPI.com, with the API key falling back to the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = WeatherApiProvider::new(config.client_settings_from_env())?;
        Ok(Self::new(Arc::new(provider), Arc::new(WeatherCache::new()), config.cache_ttl()))
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Never fails: upstream problems come back as a report with `success == false`.
    /// Failed reports are cached for the same TTL as successful ones.
    pub async fn get_weather(&self, raw: Option<&str>) -> WeatherReport {
        let query = resolve(raw);
        let key = query.cache_key();

        if let Some(report) = self.cache.read(&key) {
            tracing::debug!(%key, "weather cache hit");
            return report;
        }
        tracing::debug!(%key, "weather cache miss");

        let (current, astronomy) = tokio::join!(
            self.provider.fetch_current(&query),
            self.provider.fetch_astronomy(&query),
        );
        let report = combine(current, astronomy, &query);

        if let Some(error) = &report.error {
            tracing::warn!(%key, %error, "weather lookup failed");
        }

        self.cache.write(key, report.clone(), self.ttl);
        report
    }

    /// A non-blank manual location wins over the caller's network origin.
    pub async fn lookup(&self, origin_ip: Option<&str>, location: Option<&str>) -> Lookup {
        match location.filter(|l| !l.trim().is_empty()) {
            Some(location) => {
                Lookup { report: self.get_weather(Some(location)).await, manual_search: true }
            }
            None => Lookup { report: self.get_weather(origin_ip).await, manual_search: false },
        }
    }

    /// Evict cached reports so the next lookup hits upstream. Returns how many were removed.
    pub fn refresh(&self, target: RefreshTarget) -> usize {
        let removed = match &target {
            RefreshTarget::All => self.cache.delete_matching(&format!("{CACHE_KEY_PREFIX}*")),
            RefreshTarget::Location(raw) | RefreshTarget::Origin(raw) => {
                usize::from(self.cache.delete(&resolve(Some(raw)).cache_key()))
            }
        };

        tracing::info!(?target, removed, "weather cache cleared");
        removed
    }
}
