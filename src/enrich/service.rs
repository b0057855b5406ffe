use std::future::Future;
use std::pin::Pin;

use crate::{
    core::{
        Analysis, CfClient, CfError, EnrichmentService, Sentiment, client::RetryConfig, net,
    },
    enrich::wire::{AnalyzeRequest, AnalyzeResponse},
};

/// HTTP client for the summarize-and-analyze service.
///
/// Posts `{"content": ...}` to the client's enrichment URL and expects
/// `{"summary": ..., "sentiment": "Positive" | "Negative"}` back, or `{"error": ...}`.
#[derive(Clone)]
pub struct EnrichmentClient {
    client: CfClient,
    retry_override: Option<RetryConfig>,
}

impl EnrichmentClient {
    pub fn new(client: &CfClient) -> Self {
        Self {
            client: client.clone(),
            retry_override: None,
        }
    }

    /// Overrides the client's retry policy for enrichment calls.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Summarizes `content` and labels its sentiment.
    ///
    /// # Errors
    ///
    /// - `CfError::Enrichment` when the service answers with an error payload.
    /// - `CfError::Status` for any other non-2xx response.
    /// - `CfError::Json` / `CfError::Data` when the response cannot be understood.
    /// - `CfError::Http` for transport failures.
    pub async fn analyze_content(&self, content: &str) -> Result<Analysis, CfError> {
        let url = self.client.enrichment_url().clone();
        let req = self
            .client
            .http()
            .post(url.clone())
            .json(&AnalyzeRequest { content });
        let resp = self
            .client
            .send_with_retry(req, self.retry_override.as_ref())
            .await?;

        let status = resp.status();
        let body = net::get_text(resp, "enrichment", "analyze", "json").await?;

        let parsed = serde_json::from_str::<AnalyzeResponse>(&body);
        if let Ok(AnalyzeResponse {
            error: Some(err), ..
        }) = &parsed
        {
            let message = err
                .as_str()
                .map_or_else(|| err.to_string(), str::to_string);
            return Err(CfError::Enrichment(message));
        }
        if !status.is_success() {
            return Err(CfError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let parsed = parsed?;
        let summary = parsed
            .summary
            .ok_or_else(|| CfError::Data("enrichment: missing summary".into()))?;
        let sentiment = parsed
            .sentiment
            .ok_or_else(|| CfError::Data("enrichment: missing sentiment".into()))?
            .parse::<Sentiment>()
            .map_err(|e| CfError::Data(format!("enrichment: {e}")))?;

        Ok(Analysis { summary, sentiment })
    }
}

impl EnrichmentService for EnrichmentClient {
    fn analyze<'a>(
        &'a self,
        content: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Analysis, CfError>> + Send + 'a>> {
        Box::pin(self.analyze_content(content))
    }
}
