use std::fs;
use std::sync::Arc;

use chrono::NaiveDate;
use coinfeed::{
    EnrichedArticle, EnrichmentCache, FileStore, KvStore, MemoryStore, Sentiment,
    enrich::{ENTRIES_KEY, EPOCH_KEY},
};

use crate::common::{article, temp_dir, utc};

fn enriched(title: &str, hour: u32) -> EnrichedArticle {
    EnrichedArticle {
        article: article(title, utc(2025, 10, 19, hour, 0), "body"),
        summary: format!("{title} in brief"),
        sentiment: Sentiment::Positive,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

fn file_cache(store: &FileStore) -> EnrichmentCache {
    let store: Arc<dyn KvStore> = Arc::new(store.clone());
    EnrichmentCache::load(store).unwrap()
}

#[test]
fn file_store_missing_keys() {
    let tmp = temp_dir("missing");
    let store = FileStore::open(tmp.path()).unwrap();
    assert_eq!(store.dir(), tmp.path());

    assert_eq!(store.get("nothing").unwrap(), None);
    store.remove("nothing").unwrap();
}

#[test]
fn file_store_overwrites_and_removes() {
    let tmp = temp_dir("overwrite");
    let dir = tmp.path();
    let store = FileStore::open(dir).unwrap();

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    assert!(dir.join("k.json").exists());
    assert!(!dir.join("k.json.tmp").exists());

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn entries_and_epoch_persist_across_reload() {
    let tmp = temp_dir("reload");
    let store = FileStore::open(tmp.path()).unwrap();

    let mut cache = file_cache(&store);
    assert!(cache.is_empty());
    assert_eq!(cache.epoch(), None);

    assert!(cache.refresh_epoch(day(19)).unwrap());
    cache.insert(enriched("A", 8)).unwrap();
    cache.insert(enriched("B", 9)).unwrap();
    drop(cache);

    let reloaded = file_cache(&store);
    assert_eq!(reloaded.epoch(), Some(day(19)));
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.entries()[0], enriched("A", 8));
    assert!(reloaded.contains(&enriched("B", 9).key()));
    assert_eq!(
        store.get(EPOCH_KEY).unwrap().as_deref(),
        Some("2025-10-19")
    );
}

#[test]
fn persisted_entries_are_a_json_array() {
    let store = MemoryStore::new();
    let mut cache = EnrichmentCache::load(Arc::new(store.clone())).unwrap();
    cache.insert(enriched("A", 8)).unwrap();

    let raw = store.get(ENTRIES_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["title"], "A");
    assert_eq!(first["publishedAt"], "2025-10-19T08:00:00Z");
    assert_eq!(first["summary"], "A in brief");
    assert_eq!(first["sentiment"], "Positive");
}

#[test]
fn insert_replaces_existing_identity() {
    let mut cache = EnrichmentCache::in_memory();
    cache.insert(enriched("A", 8)).unwrap();

    let mut updated = enriched("A", 8);
    updated.summary = "newer".into();
    cache.insert(updated.clone()).unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&updated.key()), Some(&updated));
}

#[test]
fn same_day_refresh_keeps_entries() {
    let mut cache = EnrichmentCache::in_memory();
    cache.refresh_epoch(day(19)).unwrap();
    cache.insert(enriched("A", 8)).unwrap();

    assert!(!cache.refresh_epoch(day(19)).unwrap());
    assert_eq!(cache.len(), 1);
}

#[test]
fn new_day_clears_entries_in_store() {
    let store = MemoryStore::new();
    let mut cache = EnrichmentCache::load(Arc::new(store.clone())).unwrap();
    cache.refresh_epoch(day(19)).unwrap();
    cache.insert(enriched("A", 8)).unwrap();

    assert!(cache.refresh_epoch(day(20)).unwrap());
    assert!(cache.is_empty());
    assert_eq!(store.get(ENTRIES_KEY).unwrap(), None);
    assert_eq!(store.get(EPOCH_KEY).unwrap().as_deref(), Some("2025-10-20"));
}

#[test]
fn corrupt_entries_load_as_empty() {
    let tmp = temp_dir("corrupt-entries");
    let dir = tmp.path();
    fs::write(dir.join(format!("{ENTRIES_KEY}.json")), "{not json").unwrap();
    fs::write(dir.join(format!("{EPOCH_KEY}.json")), "2025-10-19").unwrap();

    let cache = file_cache(&FileStore::open(dir).unwrap());
    assert!(cache.is_empty());
    assert_eq!(cache.epoch(), Some(day(19)));
}

#[test]
fn corrupt_epoch_forces_invalidation() {
    let store = MemoryStore::new();
    {
        let mut cache = EnrichmentCache::load(Arc::new(store.clone())).unwrap();
        cache.insert(enriched("A", 8)).unwrap();
    }
    store.set(EPOCH_KEY, "yesterday-ish").unwrap();

    let mut cache = EnrichmentCache::load(Arc::new(store.clone())).unwrap();
    assert_eq!(cache.epoch(), None);
    assert_eq!(cache.len(), 1);
    assert!(cache.refresh_epoch(day(19)).unwrap());
    assert!(cache.is_empty());
}
