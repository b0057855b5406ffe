use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct MarketChartEnvelope {
    /// `[epoch_ms, price]` pairs; CoinGecko sends `null` prices for gaps.
    #[serde(default)]
    pub(crate) prices: Option<Vec<(f64, Option<f64>)>>,
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<StatusNode>,
}

#[derive(Deserialize)]
pub(crate) struct StatusNode {
    pub(crate) error_code: Option<i64>,
    pub(crate) error_message: Option<String>,
}
