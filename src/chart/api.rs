use crate::{
    chart::wire::MarketChartEnvelope,
    core::{
        CfClient, CfError, PricePoint,
        client::{CacheMode, RetryConfig},
        conversions::{f64_to_decimal, millis_to_datetime},
    },
};

pub(super) async fn fetch_market_chart(
    client: &CfClient,
    coin: &str,
    vs_currency: &str,
    days: u32,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<PricePoint>, CfError> {
    let mut url = client
        .base_coingecko()
        .join(&format!("coins/{coin}/market_chart"))?;
    url.query_pairs_mut()
        .append_pair("vs_currency", vs_currency)
        .append_pair("days", &days.to_string());

    let body = client
        .get_cached(url, "market_chart", coin, cache_mode, retry_override)
        .await?;
    decode_market_chart(&body)
}

fn decode_market_chart(body: &str) -> Result<Vec<PricePoint>, CfError> {
    let parsed: MarketChartEnvelope = serde_json::from_str(body)?;

    if let Some(message) = parsed.error {
        return Err(CfError::Api {
            code: "coingecko".into(),
            message,
        });
    }
    if let Some(status) = parsed.status
        && let Some(code) = status.error_code
    {
        return Err(CfError::Api {
            code: code.to_string(),
            message: status.error_message.unwrap_or_default(),
        });
    }

    let raw = parsed
        .prices
        .ok_or_else(|| CfError::Data("missing prices".into()))?;

    let total = raw.len();
    let points: Vec<PricePoint> = raw
        .into_iter()
        .filter_map(|(ms, price)| {
            let timestamp = millis_to_datetime(ms)?;
            let value = f64_to_decimal(price?)?;
            Some(PricePoint::new(timestamp, value))
        })
        .collect();

    if points.len() < total {
        tracing::debug!(
            skipped = total - points.len(),
            "market_chart: dropped samples with missing or non-finite values"
        );
    }

    Ok(points)
}
