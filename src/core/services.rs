use crate::core::{Analysis, CfError};

/// A trait for services that can summarize a piece of article content and label its sentiment.
///
/// This decouples the enrichment pipeline from the HTTP client that talks to the real
/// service, so the pipeline can be driven by any backend (or a fake in tests).
/// It is implemented by [`crate::enrich::EnrichmentClient`].
pub trait EnrichmentService: Send + Sync {
    /// Asynchronously analyzes `content`.
    ///
    /// # Returns
    /// A `Future` that resolves to the summary and sentiment, or a `CfError` if the
    /// service could not be reached, answered with an error payload, or sent a response
    /// that could not be understood.
    fn analyze<'a>(
        &'a self,
        content: &'a str,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Analysis, CfError>> + Send + 'a>,
    >;
}
