//! Public client surface + builder.
//! Internals are split into `retry` (backoff + send loop) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::CfError;
use constants::{DEFAULT_BASE_COINGECKO, DEFAULT_BASE_NEWS, DEFAULT_ENRICHMENT_URL, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct ResponseCache {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

/// Shared HTTP client for every upstream the dashboard talks to.
///
/// Cloning is cheap; clones share the connection pool and the response cache.
#[derive(Debug, Clone)]
pub struct CfClient {
    http: Client,
    base_coingecko: Url,
    base_news: Url,
    enrichment_url: Url,
    news_api_key: Option<String>,
    retry: RetryConfig,

    cache: Option<Arc<ResponseCache>>,
}

impl Default for CfClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl CfClient {
    /// Create a new builder.
    pub fn builder() -> CfClientBuilder {
        CfClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_coingecko(&self) -> &Url {
        &self.base_coingecko
    }
    pub(crate) fn base_news(&self) -> &Url {
        &self.base_news
    }
    pub(crate) fn enrichment_url(&self) -> &Url {
        &self.enrichment_url
    }
    pub(crate) fn news_api_key(&self) -> Option<&str> {
        self.news_api_key.as_deref()
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(url.as_str())
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str) {
        let Some(store) = self.cache.clone() else {
            return;
        };
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: Instant::now() + store.default_ttl,
        };
        let mut guard = store.map.write().await;
        guard.insert(url.as_str().to_string(), entry);
    }

    /// GET `url` through the response cache and retry policy, returning the body text.
    ///
    /// `endpoint` and `key` name the fixture when recording is enabled.
    pub(crate) async fn get_cached(
        &self,
        url: Url,
        endpoint: &str,
        key: &str,
        cache_mode: CacheMode,
        retry_override: Option<&RetryConfig>,
    ) -> Result<String, CfError> {
        if cache_mode == CacheMode::Use
            && let Some(body) = self.cache_get(&url).await
        {
            tracing::debug!(%url, "response cache hit");
            return Ok(body);
        }

        let resp = self
            .send_with_retry(self.http.get(url.clone()), retry_override)
            .await?;
        if !resp.status().is_success() {
            return Err(CfError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = crate::core::net::get_text(resp, endpoint, key, "json").await?;

        if cache_mode != CacheMode::Bypass {
            self.cache_put(&url, &body).await;
        }

        Ok(body)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct CfClientBuilder {
    user_agent: Option<String>,
    base_coingecko: Option<Url>,
    base_news: Option<Url>,
    enrichment_url: Option<Url>,
    news_api_key: Option<String>,
    retry: Option<RetryConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
}

impl CfClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the CoinGecko API base (e.g., `https://api.coingecko.com/api/v3/`).
    pub fn base_coingecko(mut self, url: Url) -> Self {
        self.base_coingecko = Some(url);
        self
    }

    /// Override the NewsAPI base (e.g., `https://newsapi.org/`).
    pub fn base_news(mut self, url: Url) -> Self {
        self.base_news = Some(url);
        self
    }

    /// Override the full URL of the summarize-and-analyze endpoint.
    pub fn enrichment_url(mut self, url: Url) -> Self {
        self.enrichment_url = Some(url);
        self
    }

    /// API key sent to NewsAPI. Required for article fetches against the real service.
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Replace the client-wide retry policy.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory response caching with a default TTL.
    /// If not set, caching is disabled.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    pub fn build(self) -> Result<CfClient, CfError> {
        let base_coingecko = match self.base_coingecko {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_COINGECKO)?,
        };
        let base_news = match self.base_news {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_NEWS)?,
        };
        let enrichment_url = match self.enrichment_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_ENRICHMENT_URL)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(CfClient {
            http,
            base_coingecko,
            base_news,
            enrichment_url,
            news_api_key: self.news_api_key,
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(ResponseCache {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}
