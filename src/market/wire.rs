use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct MarketNode {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) current_price: Option<f64>,
    #[serde(default)]
    pub(crate) market_cap: Option<f64>,
    #[serde(default)]
    pub(crate) fully_diluted_valuation: Option<f64>,
    #[serde(default)]
    pub(crate) total_volume: Option<f64>,
    #[serde(default)]
    pub(crate) high_24h: Option<f64>,
    #[serde(default)]
    pub(crate) low_24h: Option<f64>,
    #[serde(default)]
    pub(crate) price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub(crate) circulating_supply: Option<f64>,
    #[serde(default)]
    pub(crate) total_supply: Option<f64>,
    #[serde(default)]
    pub(crate) max_supply: Option<f64>,
    #[serde(default)]
    pub(crate) ath: Option<f64>,
    #[serde(default)]
    pub(crate) ath_change_percentage: Option<f64>,
    #[serde(default)]
    pub(crate) ath_date: Option<String>,
    #[serde(default)]
    pub(crate) atl: Option<f64>,
    #[serde(default)]
    pub(crate) atl_change_percentage: Option<f64>,
    #[serde(default)]
    pub(crate) atl_date: Option<String>,
    #[serde(default)]
    pub(crate) last_updated: Option<String>,
}

/// CoinGecko answers errors on this endpoint with an object instead of the usual array.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum MarketsResponse {
    Rows(Vec<MarketNode>),
    Error { error: String },
}
