use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::{ArticleKey, CfError, EnrichedArticle};
use crate::enrich::store::{KvStore, MemoryStore};

/// Store key holding the JSON array of enriched articles.
pub const ENTRIES_KEY: &str = "cachedNews";
/// Store key holding the calendar date (`YYYY-MM-DD`) the cache was last validated on.
pub const EPOCH_KEY: &str = "lastCachedDate";

/// Persisted identity -> enriched article mapping with a daily epoch marker.
///
/// Every mutation is written through to the backing [`KvStore`] immediately. If a write
/// fails the in-memory state still reflects the mutation and the error is returned to the
/// caller; the next successful write persists the full state again.
#[derive(Debug)]
pub struct EnrichmentCache {
    store: Arc<dyn KvStore>,
    entries: Vec<EnrichedArticle>,
    index: HashMap<ArticleKey, usize>,
    epoch: Option<NaiveDate>,
}

impl EnrichmentCache {
    /// Loads the cache from `store`.
    ///
    /// A stored value that cannot be parsed is discarded with a warning and the cache
    /// starts empty, the same as a first run.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read at all.
    pub fn load(store: Arc<dyn KvStore>) -> Result<Self, CfError> {
        let entries: Vec<EnrichedArticle> = match store.get(ENTRIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "enrichment cache: discarding unreadable entries");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let epoch = store.get(EPOCH_KEY)?.and_then(|raw| {
            raw.trim()
                .parse::<NaiveDate>()
                .inspect_err(|e| {
                    tracing::warn!(
                        error = %e,
                        raw = %raw,
                        "enrichment cache: discarding unreadable epoch marker"
                    );
                })
                .ok()
        });

        let mut cache = Self {
            store,
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::new(),
            epoch,
        };
        for entry in entries {
            cache.put(entry);
        }
        tracing::debug!(entries = cache.len(), epoch = ?cache.epoch, "enrichment cache loaded");
        Ok(cache)
    }

    /// An empty cache backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            entries: Vec::new(),
            index: HashMap::new(),
            epoch: None,
        }
    }

    /// The date the cache was last validated on, if ever.
    #[must_use]
    pub const fn epoch(&self) -> Option<NaiveDate> {
        self.epoch
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[EnrichedArticle] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, key: &ArticleKey) -> Option<&EnrichedArticle> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, key: &ArticleKey) -> bool {
        self.index.contains_key(key)
    }

    /// Clears every entry and advances the marker if `today` differs from the stored epoch.
    ///
    /// Returns `true` when the cache was invalidated.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the cleared state could not be persisted.
    pub fn refresh_epoch(&mut self, today: NaiveDate) -> Result<bool, CfError> {
        if !self.advance_epoch(today) {
            return Ok(false);
        }
        write_epoch(self.store.as_ref(), today)?;
        Ok(true)
    }

    /// Inserts `enriched` under its identity and persists the cache.
    ///
    /// # Errors
    ///
    /// Returns `CfError::Store` (or the store's own error) if persisting fails.
    pub fn insert(&mut self, enriched: EnrichedArticle) -> Result<(), CfError> {
        self.put(enriched);
        self.store.set(ENTRIES_KEY, &self.serialized_entries()?)
    }

    /// In-memory half of [`EnrichmentCache::refresh_epoch`]; the caller persists with
    /// [`write_epoch`].
    pub(crate) fn advance_epoch(&mut self, today: NaiveDate) -> bool {
        if self.epoch == Some(today) {
            return false;
        }
        tracing::debug!(
            previous = ?self.epoch,
            %today,
            dropped = self.entries.len(),
            "enrichment cache: new day, clearing"
        );
        self.entries.clear();
        self.index.clear();
        self.epoch = Some(today);
        true
    }

    /// In-memory half of [`EnrichmentCache::insert`]; the caller writes
    /// [`EnrichmentCache::serialized_entries`] under [`ENTRIES_KEY`].
    pub(crate) fn insert_unpersisted(&mut self, enriched: EnrichedArticle) {
        self.put(enriched);
    }

    pub(crate) fn store(&self) -> Arc<dyn KvStore> {
        Arc::clone(&self.store)
    }

    pub(crate) fn serialized_entries(&self) -> Result<String, CfError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    fn put(&mut self, enriched: EnrichedArticle) {
        let key = enriched.key();
        match self.index.get(&key) {
            Some(&i) => self.entries[i] = enriched,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(enriched);
            }
        }
    }
}

/// Persists an invalidation: entries dropped, marker set to `today`.
pub(crate) fn write_epoch(store: &dyn KvStore, today: NaiveDate) -> Result<(), CfError> {
    store.remove(ENTRIES_KEY)?;
    store.set(EPOCH_KEY, &today.to_string())
}
