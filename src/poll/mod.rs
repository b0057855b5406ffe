//! Periodic refresh of every dashboard feed.
//!
//! Each feed (chart, market snapshot, news) runs in its own task on its own interval, so a
//! slow enrichment batch never holds back a chart update.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use tokio::{
    select,
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::{
    chart::{Alignment, MarketChartBuilder},
    core::{CfClient, CfError, Clock, SystemClock},
    enrich::{Enrichment, EnrichmentPipeline},
    market::{CoinMarket, MarketsBuilder},
    news::NewsBuilder,
};

/// Default refresh cadence for every feed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// One refresh result. Failures carry the error so the UI can keep its previous state.
#[derive(Debug)]
pub enum DashboardUpdate {
    Chart(Alignment),
    ChartFailed(CfError),
    Market(Box<CoinMarket>),
    MarketFailed(CfError),
    News(Enrichment),
    NewsFailed(CfError),
}

/// Configure polling behavior.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub chart_interval: Duration,
    pub market_interval: Duration,
    pub news_interval: Duration,
    /// Channel capacity for updates.
    pub buffer: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            chart_interval: DEFAULT_POLL_INTERVAL,
            market_interval: DEFAULT_POLL_INTERVAL,
            news_interval: DEFAULT_POLL_INTERVAL,
            buffer: 64,
        }
    }
}

/// A handle for the running feed tasks.
pub struct PollHandle {
    joins: Vec<JoinHandle<()>>,
    stop_tx: watch::Sender<bool>,
}

impl PollHandle {
    /// Ask every feed to stop and wait for them to finish.
    ///
    /// A feed in the middle of a refresh abandons it; enrichment results already cached
    /// stay cached.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        for join in self.joins {
            let _ = join.await;
        }
    }

    /// Immediately abort every feed task.
    pub fn abort(self) {
        for join in self.joins {
            join.abort();
        }
    }
}

/// Builder for the dashboard's refresh loop.
pub struct DashboardPoller {
    client: CfClient,
    coin: String,
    news: Option<(EnrichmentPipeline, String)>,
    tz: Tz,
    clock: Arc<dyn Clock>,
    cfg: PollConfig,
}

impl DashboardPoller {
    /// Poll chart and market data for a CoinGecko coin id.
    pub fn new(client: &CfClient, coin: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            coin: coin.into(),
            news: None,
            tz: Tz::UTC,
            clock: Arc::new(SystemClock::local()),
            cfg: PollConfig::default(),
        }
    }

    /// Also poll articles matching `query` and run them through `pipeline`.
    #[must_use]
    pub fn news(mut self, pipeline: EnrichmentPipeline, query: impl Into<String>) -> Self {
        self.news = Some((pipeline, query.into()));
        self
    }

    /// Timezone for chart labels and the prior-day calculation. (Default: UTC)
    #[must_use]
    pub const fn timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// Clock stamped on chart alignments.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the whole polling configuration.
    #[must_use]
    pub const fn config(mut self, cfg: PollConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the same interval for every feed.
    #[must_use]
    pub const fn interval(mut self, dur: Duration) -> Self {
        self.cfg.chart_interval = dur;
        self.cfg.market_interval = dur;
        self.cfg.news_interval = dur;
        self
    }

    /// Start the feeds. Each one refreshes immediately, then on its interval.
    ///
    /// Dropping the receiver stops each feed after its next refresh. Dropping the handle
    /// stops them right away, same as `handle.stop()` without waiting.
    ///
    /// # Errors
    ///
    /// Returns `CfError::Data` if the coin id is empty.
    pub fn start(self) -> Result<(PollHandle, mpsc::Receiver<DashboardUpdate>), CfError> {
        if self.coin.trim().is_empty() {
            return Err(CfError::Data("poll: coin id required".into()));
        }

        let (tx, rx) = mpsc::channel::<DashboardUpdate>(self.cfg.buffer.max(1));
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut joins = Vec::with_capacity(3);

        let chart = MarketChartBuilder::new(&self.client, self.coin.clone());
        let clock = self.clock;
        let tz = self.tz;
        joins.push(spawn_feed(
            "chart",
            self.cfg.chart_interval,
            tx.clone(),
            stop_rx.clone(),
            move || {
                let chart = chart.clone();
                let clock = clock.clone();
                async move {
                    match chart.fetch_aligned(clock.as_ref(), tz).await {
                        Ok(a) => DashboardUpdate::Chart(a),
                        Err(e) => DashboardUpdate::ChartFailed(e),
                    }
                }
            },
        ));

        let market = MarketsBuilder::new(&self.client, self.coin.clone());
        joins.push(spawn_feed(
            "market",
            self.cfg.market_interval,
            tx.clone(),
            stop_rx.clone(),
            move || {
                let market = market.clone();
                async move {
                    match market.fetch_one().await {
                        Ok(m) => DashboardUpdate::Market(Box::new(m)),
                        Err(e) => DashboardUpdate::MarketFailed(e),
                    }
                }
            },
        ));

        if let Some((pipeline, query)) = self.news {
            let news = NewsBuilder::new(&self.client, query);
            joins.push(spawn_feed(
                "news",
                self.cfg.news_interval,
                tx,
                stop_rx,
                move || {
                    let news = news.clone();
                    let pipeline = pipeline.clone();
                    async move {
                        match news.fetch().await {
                            Ok(articles) => DashboardUpdate::News(pipeline.enrich(&articles).await),
                            Err(e) => DashboardUpdate::NewsFailed(e),
                        }
                    }
                },
            ));
        }

        Ok((PollHandle { joins, stop_tx }, rx))
    }
}

fn spawn_feed<F, Fut>(
    feed: &'static str,
    period: Duration,
    tx: mpsc::Sender<DashboardUpdate>,
    mut stop_rx: watch::Receiver<bool>,
    mut refresh: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = DashboardUpdate> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                _ = ticker.tick() => {}
                _ = stop_rx.changed() => break,
            }

            let update = select! {
                update = refresh() => update,
                _ = stop_rx.changed() => break,
            };

            if let DashboardUpdate::ChartFailed(e)
            | DashboardUpdate::MarketFailed(e)
            | DashboardUpdate::NewsFailed(e) = &update
            {
                tracing::warn!(feed, error = %e, "poll: refresh failed");
            }

            if tx.send(update).await.is_err() {
                break;
            }
        }
        tracing::debug!(feed, "poll: feed stopped");
    })
}
