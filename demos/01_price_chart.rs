use chrono_tz::Tz;
use coinfeed::{CfClient, MarketChartBuilder, MarketsBuilder, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CfClient::builder()
        .timeout(std::time::Duration::from_secs(10))
        .cache_ttl(std::time::Duration::from_secs(60))
        .build()?;

    let tz: Tz = std::env::var("TZ")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Tz::UTC);

    let chart = MarketChartBuilder::new(&client, "bitcoin")
        .fetch_aligned(&SystemClock::in_timezone(tz), tz)
        .await?;
    let ds = &chart.dataset;

    println!("--- {} ---", ds.label.as_deref().unwrap_or("price"));
    println!("{} points, generated at {}", ds.len(), chart.generated_at);
    match chart.baseline {
        Some(b) => println!("Prior-day baseline: {b}"),
        None => println!("Prior-day baseline: not enough history"),
    }
    for i in ds.len().saturating_sub(5)..ds.len() {
        let trend = match ds.slope_at(i) {
            Some(s) if s.is_sign_positive() => "up",
            Some(_) => "down",
            None => "-",
        };
        println!("  {}  {:>12}  {trend}", ds.labels[i], ds.values[i]);
    }
    println!();

    let btc = MarketsBuilder::new(&client, "bitcoin").fetch_one().await?;
    println!("--- Market snapshot ---");
    println!("Price:      {}", btc.current_price.unwrap_or_default());
    println!("24h change: {}%", btc.price_change_percentage_24h.unwrap_or_default());
    println!("Market cap: {}", btc.market_cap.unwrap_or_default());
    println!("Max supply: {}", btc.max_supply.unwrap_or_default());

    Ok(())
}
