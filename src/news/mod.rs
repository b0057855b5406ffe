mod api;
mod wire;

use crate::core::{Article, CfClient, CfError, client::RetryConfig};

/// A builder for fetching recent articles matching a topic query.
///
/// Article lists are never served from the response cache; each fetch goes to the network.
#[derive(Clone)]
pub struct NewsBuilder {
    client: CfClient,
    query: String,
    page_size: u32,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder` for a topic query (e.g. `bitcoin`).
    pub fn new(client: &CfClient, query: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            query: query.into(),
            page_size: 20,
            retry_override: None,
        }
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Sets the maximum number of articles to return. (Default: `20`)
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Executes the request and fetches the articles, newest-first as the source orders them.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if the request fails, NewsAPI answers with an error payload,
    /// or the response cannot be parsed.
    #[tracing::instrument(skip(self), err, fields(query = %self.query))]
    pub async fn fetch(&self) -> Result<Vec<Article>, CfError> {
        api::fetch_everything(
            &self.client,
            &self.query,
            self.page_size,
            self.retry_override.as_ref(),
        )
        .await
    }
}
