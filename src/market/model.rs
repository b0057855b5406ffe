use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Market snapshot for one coin, as shown in the dashboard sidebar.
///
/// Figures are raw provider values; formatting (trillions, percentages) is left to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub current_price: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub fully_diluted_valuation: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub price_change_percentage_24h: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub ath: Option<Decimal>,
    pub ath_change_percentage: Option<Decimal>,
    pub ath_date: Option<DateTime<Utc>>,
    pub atl: Option<Decimal>,
    pub atl_change_percentage: Option<Decimal>,
    pub atl_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}
