//! Core components of the `coinfeed-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`CfClient`] and its builder.
//! - The primary [`CfError`] type.
//! - Shared data models like [`PricePoint`] and [`Article`].
//! - The [`Clock`] used for day-boundary decisions.
//! - Internal networking logic.

/// The main client (`CfClient`), builder, and configuration.
pub mod client;
/// Time sources (`SystemClock`, `FixedClock`).
pub mod clock;
/// Conversions from provider wire values.
pub mod conversions;
/// The primary error type (`CfError`) for the crate.
pub mod error;
/// Shared data models used across multiple API modules.
pub mod models;
/// Service traits for abstracting external collaborators.
pub mod services;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::CfClient`
pub use client::{Backoff, CacheMode, CfClient, CfClientBuilder, RetryConfig};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CfError;
pub use models::{Analysis, Article, ArticleKey, EnrichedArticle, PricePoint, Sentiment};
pub use services::EnrichmentService;
