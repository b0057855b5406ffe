use crate::{
    core::{
        CfClient, CfError,
        client::{CacheMode, RetryConfig},
        conversions::{f64_to_decimal, parse_rfc3339},
    },
    market::{
        model::CoinMarket,
        wire::{MarketNode, MarketsResponse},
    },
};

pub(super) async fn fetch_markets(
    client: &CfClient,
    ids: &[String],
    vs_currency: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<CoinMarket>, CfError> {
    if ids.is_empty() {
        return Err(CfError::Data("markets: at least one coin id required".into()));
    }

    let joined = ids.join(",");
    let mut url = client.base_coingecko().join("coins/markets")?;
    url.query_pairs_mut()
        .append_pair("vs_currency", vs_currency)
        .append_pair("ids", &joined)
        .append_pair("price_change_percentage", "1d")
        .append_pair("precision", "2");

    let body = client
        .get_cached(url, "markets", &joined, cache_mode, retry_override)
        .await?;

    match serde_json::from_str::<MarketsResponse>(&body)? {
        MarketsResponse::Rows(rows) => Ok(rows.into_iter().map(map_market).collect()),
        MarketsResponse::Error { error } => Err(CfError::Api {
            code: "coingecko".into(),
            message: error,
        }),
    }
}

fn map_market(n: MarketNode) -> CoinMarket {
    let dec = |v: Option<f64>| v.and_then(f64_to_decimal);
    let date = |v: Option<String>| v.as_deref().and_then(parse_rfc3339);

    CoinMarket {
        id: n.id,
        symbol: n.symbol,
        name: n.name,
        image: n.image,
        current_price: dec(n.current_price),
        market_cap: dec(n.market_cap),
        fully_diluted_valuation: dec(n.fully_diluted_valuation),
        total_volume: dec(n.total_volume),
        high_24h: dec(n.high_24h),
        low_24h: dec(n.low_24h),
        price_change_percentage_24h: dec(n.price_change_percentage_24h),
        circulating_supply: dec(n.circulating_supply),
        total_supply: dec(n.total_supply),
        max_supply: dec(n.max_supply),
        ath: dec(n.ath),
        ath_change_percentage: dec(n.ath_change_percentage),
        ath_date: date(n.ath_date),
        atl: dec(n.atl),
        atl_change_percentage: dec(n.atl_change_percentage),
        atl_date: date(n.atl_date),
        last_updated: date(n.last_updated),
    }
}
