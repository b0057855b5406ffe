use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::core::{
    Article, ArticleKey, CfError, Clock, EnrichedArticle, EnrichmentService, SystemClock,
};
use crate::enrich::cache::{ENTRIES_KEY, EnrichmentCache, write_epoch};

/// An article that could not be enriched this cycle.
#[derive(Debug)]
pub struct ArticleFailure {
    /// Position of the article in the input batch.
    pub index: usize,
    pub key: ArticleKey,
    /// Shared between duplicates of one identity that waited on the same call.
    pub error: Arc<CfError>,
}

/// Result of one [`EnrichmentPipeline::enrich`] run.
#[derive(Debug, Default)]
pub struct Enrichment {
    /// Enriched articles in input order, minus failures.
    pub articles: Vec<EnrichedArticle>,
    /// Articles dropped from `articles`, in input order.
    pub failures: Vec<ArticleFailure>,
    /// Articles answered from the cache.
    pub hits: usize,
    /// Requests made to the enrichment service.
    pub calls: usize,
}

/// How one input article gets its answer.
enum Plan {
    Ready(EnrichedArticle),
    Invalid(CfError),
    /// Waits on the service call at this index of the pending list.
    Pending(usize),
}

/// Fetch-side half of the news panel: dedups articles against the persisted cache, asks
/// the enrichment service about the rest, and keeps the cache valid for one calendar day.
///
/// Clones share the cache, service and clock.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    service: Arc<dyn EnrichmentService>,
    cache: Arc<Mutex<EnrichmentCache>>,
    clock: Arc<dyn Clock>,
}

impl EnrichmentPipeline {
    /// Creates a pipeline that takes "today" from the machine's local timezone.
    pub fn new(service: Arc<dyn EnrichmentService>, cache: EnrichmentCache) -> Self {
        Self {
            service,
            cache: Arc::new(Mutex::new(cache)),
            clock: Arc::new(SystemClock::local()),
        }
    }

    /// Replaces the clock that decides when a new day starts.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The shared cache, for inspection.
    #[must_use]
    pub fn cache(&self) -> &Arc<Mutex<EnrichmentCache>> {
        &self.cache
    }

    /// Enriches `articles`, returning them in input order.
    ///
    /// The cache is invalidated first if the date moved on since it was last validated.
    /// Cache hits are reused verbatim. Misses are sent to the service concurrently, one call
    /// per distinct identity, and every success is written to the cache before this returns.
    /// Failures never abort the batch: the article is left out of
    /// [`Enrichment::articles`] and reported in [`Enrichment::failures`].
    ///
    /// Dropping the returned future abandons calls still in flight; entries already
    /// cached stay cached.
    #[tracing::instrument(skip_all, fields(articles = articles.len()))]
    pub async fn enrich(&self, articles: &[Article]) -> Enrichment {
        let today = self.clock.today();
        let mut out = Enrichment::default();

        let mut pending: Vec<&Article> = Vec::new();
        let plans: Vec<Plan> = {
            let mut cache = self.cache.lock().await;
            if cache.advance_epoch(today) {
                tracing::debug!(%today, "enrichment cache invalidated for new day");
                let store = cache.store();
                if let Err(e) = off_worker(move || write_epoch(store.as_ref(), today)).await {
                    tracing::warn!(error = %e, "failed to persist cache invalidation");
                }
            }

            let mut scheduled: HashMap<ArticleKey, usize> = HashMap::new();
            articles
                .iter()
                .map(|article| {
                    if let Err(e) = validate(article) {
                        return Plan::Invalid(e);
                    }
                    let key = article.key();
                    if let Some(hit) = cache.get(&key) {
                        out.hits += 1;
                        return Plan::Ready(hit.clone());
                    }
                    let slot = *scheduled.entry(key).or_insert_with(|| {
                        pending.push(article);
                        pending.len() - 1
                    });
                    Plan::Pending(slot)
                })
                .collect()
        };

        out.calls = pending.len();
        let settled: Vec<Result<EnrichedArticle, Arc<CfError>>> =
            join_all(pending.iter().map(|article| self.resolve_miss(article)))
                .await
                .into_iter()
                .map(|r| r.map_err(Arc::new))
                .collect();

        for (index, (article, plan)) in articles.iter().zip(plans).enumerate() {
            let resolved = match plan {
                Plan::Ready(enriched) => Ok(enriched),
                Plan::Invalid(e) => Err(Arc::new(e)),
                Plan::Pending(slot) => settled[slot].clone(),
            };
            match resolved {
                Ok(enriched) => out.articles.push(enriched),
                Err(error) => {
                    let key = article.key();
                    tracing::warn!(%key, %error, "article dropped from enrichment");
                    out.failures.push(ArticleFailure { index, key, error });
                }
            }
        }

        tracing::debug!(
            enriched = out.articles.len(),
            failed = out.failures.len(),
            hits = out.hits,
            calls = out.calls,
            "enrichment batch settled"
        );
        out
    }

    async fn resolve_miss(&self, article: &Article) -> Result<EnrichedArticle, CfError> {
        let analysis = self.service.analyze(&article.content).await?;
        let enriched = EnrichedArticle {
            article: article.clone(),
            summary: analysis.summary,
            sentiment: analysis.sentiment,
        };

        let mut cache = self.cache.lock().await;
        // A concurrent run may have cached this identity while the call was in flight.
        if let Some(existing) = cache.get(&enriched.key()) {
            return Ok(existing.clone());
        }
        cache.insert_unpersisted(enriched.clone());
        // Written while the lock is held so snapshots land in insertion order.
        let persisted = match cache.serialized_entries() {
            Ok(raw) => {
                let store = cache.store();
                off_worker(move || store.set(ENTRIES_KEY, &raw)).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = persisted {
            tracing::warn!(key = %enriched.key(), error = %e, "failed to persist enrichment cache");
        }
        Ok(enriched)
    }
}

/// Runs a blocking store write on tokio's blocking pool.
async fn off_worker<F>(write: F) -> Result<(), CfError>
where
    F: FnOnce() -> Result<(), CfError> + Send + 'static,
{
    tokio::task::spawn_blocking(write)
        .await
        .map_err(|e| CfError::Store(std::io::Error::other(e)))?
}

fn validate(article: &Article) -> Result<(), CfError> {
    if article.title.trim().is_empty() {
        return Err(CfError::MalformedInput("article has no title".into()));
    }
    if article.content.trim().is_empty() {
        return Err(CfError::MalformedInput(format!(
            "article {:?} has no content",
            article.title
        )));
    }
    Ok(())
}
