//! coinfeed-rs: data layer for a live crypto dashboard.
//!
//! - [`chart`]: recent price series from CoinGecko, aligned for plotting with a prior-day baseline.
//! - [`market`]: market snapshot for the sidebar.
//! - [`news`]: topic articles from NewsAPI.
//! - [`enrich`]: summary + sentiment per article through an external service, deduplicated
//!   against a cache that persists across restarts and resets once a day.
//! - [`poll`]: independent periodic refresh of every feed.
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use coinfeed::{
//! #     CfClient, EnrichmentCache, EnrichmentClient, EnrichmentPipeline, FileStore, NewsBuilder,
//! # };
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CfClient::builder().news_api_key("my-key").build()?;
//! let store = Arc::new(FileStore::open("./.coinfeed")?);
//! let pipeline = EnrichmentPipeline::new(
//!     Arc::new(EnrichmentClient::new(&client)),
//!     EnrichmentCache::load(store)?,
//! );
//!
//! let articles = NewsBuilder::new(&client, "bitcoin").fetch().await?;
//! let result = pipeline.enrich(&articles).await;
//! for a in &result.articles {
//!     println!("[{}] {}: {}", a.sentiment, a.article.title, a.summary);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;

pub mod chart;
pub mod enrich;
pub mod market;
pub mod news;
pub mod poll;

pub use core::{
    Analysis, Article, ArticleKey, Backoff, CacheMode, CfClient, CfClientBuilder, CfError, Clock,
    EnrichedArticle, EnrichmentService, FixedClock, PricePoint, RetryConfig, Sentiment,
    SystemClock,
};

pub use chart::{Alignment, MarketChartBuilder, PlotDataset, align, align_in, prior_day_target};
pub use enrich::{
    ArticleFailure, Carousel, CarouselState, Enrichment, EnrichmentCache, EnrichmentClient,
    EnrichmentPipeline, FileStore, KvStore, MemoryStore,
};
pub use market::{CoinMarket, MarketsBuilder};
pub use news::NewsBuilder;
pub use poll::{DashboardPoller, DashboardUpdate, PollConfig, PollHandle};

#[cfg(feature = "tracing-subscriber")]
/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `coinfeed=debug`).
///
/// Intended for demos and tests; applications usually bring their own subscriber.
pub fn init_tracing_for_tests() {
    use tracing_subscriber::{EnvFilter, fmt};
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coinfeed=debug"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}
