//! Price series: fetching from CoinGecko and aligning for the chart.

mod align;
mod api;
mod model;
mod wire;

pub use align::{align, align_in, prior_day_target};
pub use model::{Alignment, PlotDataset};

use crate::core::{
    CfClient, CfError, Clock, PricePoint,
    client::{CacheMode, RetryConfig},
};
use chrono_tz::Tz;

/// A builder for fetching the recent price series of one coin.
#[derive(Clone)]
pub struct MarketChartBuilder {
    client: CfClient,
    coin: String,
    vs_currency: String,
    days: u32,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl MarketChartBuilder {
    /// Creates a new `MarketChartBuilder` for a CoinGecko coin id (e.g. `bitcoin`).
    ///
    /// Defaults to two days of USD prices, which covers the prior-day baseline.
    pub fn new(client: &CfClient, coin: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            coin: coin.into(),
            vs_currency: "usd".into(),
            days: 2,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
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

    /// Sets the quote currency. (Default: `usd`)
    #[must_use]
    pub fn vs_currency(mut self, currency: impl Into<String>) -> Self {
        self.vs_currency = currency.into();
        self
    }

    /// Sets how many days of history to request. (Default: `2`)
    #[must_use]
    pub const fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Executes the request and returns the price series, oldest first as delivered.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if the request fails, CoinGecko answers with an error payload,
    /// or the response has no price array.
    #[tracing::instrument(skip(self), err, fields(coin = %self.coin))]
    pub async fn fetch(&self) -> Result<Vec<PricePoint>, CfError> {
        api::fetch_market_chart(
            &self.client,
            &self.coin,
            &self.vs_currency,
            self.days,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches the series and aligns it, labelling the dataset after the coin and currency.
    ///
    /// # Errors
    ///
    /// Same as [`MarketChartBuilder::fetch`].
    pub async fn fetch_aligned(&self, clock: &dyn Clock, tz: Tz) -> Result<Alignment, CfError> {
        let series = self.fetch().await?;
        let mut alignment = align_in(&series, clock.now(), tz);
        alignment.dataset.label = Some(format!(
            "{} Price ({})",
            self.coin.to_uppercase(),
            self.vs_currency.to_uppercase()
        ));
        Ok(alignment)
    }
}
