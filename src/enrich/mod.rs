//! News enrichment: summary + sentiment for each article, cached per calendar day.

mod cache;
mod carousel;
mod pipeline;
mod service;
mod store;
mod wire;

pub use cache::{ENTRIES_KEY, EPOCH_KEY, EnrichmentCache};
pub use carousel::{Carousel, CarouselState};
pub use pipeline::{ArticleFailure, Enrichment, EnrichmentPipeline};
pub use service::EnrichmentClient;
pub use store::{FileStore, KvStore, MemoryStore};
