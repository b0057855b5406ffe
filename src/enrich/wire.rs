use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub(crate) content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct AnalyzeResponse {
    #[serde(default)]
    pub(crate) summary: Option<String>,
    #[serde(default)]
    pub(crate) sentiment: Option<String>,
    /// Present when the service rejects the request; `null` reads as absent.
    #[serde(default)]
    pub(crate) error: Option<serde_json::Value>,
}
