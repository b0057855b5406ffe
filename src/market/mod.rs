mod api;
mod model;
mod wire;

pub use model::CoinMarket;

use crate::core::{
    CfClient, CfError,
    client::{CacheMode, RetryConfig},
};

/// A builder for fetching market snapshots for one or more coins.
#[derive(Clone)]
pub struct MarketsBuilder {
    client: CfClient,
    ids: Vec<String>,
    vs_currency: String,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl MarketsBuilder {
    /// Creates a new `MarketsBuilder` for a single CoinGecko coin id.
    pub fn new(client: &CfClient, id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            ids: vec![id.into()],
            vs_currency: "usd".into(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Request these coin ids (replaces).
    #[must_use]
    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the quote currency. (Default: `usd`)
    #[must_use]
    pub fn vs_currency(mut self, currency: impl Into<String>) -> Self {
        self.vs_currency = currency.into();
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the request and returns one snapshot per coin CoinGecko knows about.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if no ids are set, the request fails, or the response cannot be parsed.
    #[tracing::instrument(skip(self), err, fields(ids = %self.ids.join(",")))]
    pub async fn fetch(&self) -> Result<Vec<CoinMarket>, CfError> {
        api::fetch_markets(
            &self.client,
            &self.ids,
            &self.vs_currency,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Executes the request and returns the first snapshot.
    ///
    /// # Errors
    ///
    /// As [`MarketsBuilder::fetch`], plus `CfError::Data` when the response is empty.
    pub async fn fetch_one(&self) -> Result<CoinMarket, CfError> {
        self.fetch()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::Data("markets: empty response".into()))
    }
}
