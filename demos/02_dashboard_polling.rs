use std::sync::Arc;
use std::time::Duration;

use coinfeed::{
    Carousel, CfClient, DashboardPoller, DashboardUpdate, EnrichmentCache, EnrichmentClient,
    EnrichmentPipeline, FileStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = CfClient::builder().timeout(Duration::from_secs(15));
    if let Ok(key) = std::env::var("NEWSAPI_KEY") {
        builder = builder.news_api_key(key);
    }
    let client = builder.build()?;

    // Enriched articles survive restarts in ./.coinfeed until the date changes.
    let store = Arc::new(FileStore::open("./.coinfeed")?);
    let pipeline = EnrichmentPipeline::new(
        Arc::new(EnrichmentClient::new(&client)),
        EnrichmentCache::load(store)?,
    );

    let (handle, mut updates) = DashboardPoller::new(&client, "bitcoin")
        .news(pipeline, "bitcoin")
        .interval(Duration::from_secs(30))
        .start()?;

    println!("--- Polling every 30 seconds for 2 minutes ---");
    let mut carousel = Carousel::new(0);

    let ui = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            match update {
                DashboardUpdate::Chart(a) => println!(
                    "[chart] {} points, baseline {:?}",
                    a.dataset.len(),
                    a.baseline
                ),
                DashboardUpdate::Market(m) => println!(
                    "[market] {} @ {}",
                    m.id,
                    m.current_price.unwrap_or_default()
                ),
                DashboardUpdate::News(batch) => {
                    carousel.reset(batch.articles.len());
                    println!(
                        "[news] {} enriched ({} cached, {} calls, {} failed)",
                        batch.articles.len(),
                        batch.hits,
                        batch.calls,
                        batch.failures.len()
                    );
                    if let Some(a) = carousel.current().map(|i| &batch.articles[i]) {
                        println!("  [{}] {}: {}", a.sentiment, a.article.title, a.summary);
                    }
                }
                DashboardUpdate::ChartFailed(e)
                | DashboardUpdate::MarketFailed(e)
                | DashboardUpdate::NewsFailed(e) => println!("[error] {e}"),
            }
        }
    });

    tokio::select! {
        () = tokio::time::sleep(Duration::from_secs(120)) => {
            println!("Stopping.");
            handle.stop().await;
        }
        _ = ui => {}
    }

    Ok(())
}
