//! Centralized constants for default endpoints and UA.

/// Crate UA, sent on every request.
pub(crate) const USER_AGENT: &str = concat!("coinfeed-rs/", env!("CARGO_PKG_VERSION"));

/// CoinGecko API base (paths such as `coins/{id}/market_chart` are appended).
pub(crate) const DEFAULT_BASE_COINGECKO: &str = "https://api.coingecko.com/api/v3/";

/// NewsAPI base (the `v2/everything` path is appended).
pub(crate) const DEFAULT_BASE_NEWS: &str = "https://newsapi.org/";

/// Summarize-and-analyze endpoint of the local enrichment service.
pub(crate) const DEFAULT_ENRICHMENT_URL: &str = "http://localhost:5000/summarize-and-analyze";
