use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum CfError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A response body was not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The upstream API answered with an explicit error payload.
    #[error("API error {code}: {message}")]
    Api {
        /// The provider's error code.
        code: String,
        /// The provider's error message.
        message: String,
    },

    /// The enrichment service reported a failure for an article.
    #[error("enrichment failed: {0}")]
    Enrichment(String),

    /// An article was missing a field required for enrichment.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Reading or writing the persisted cache failed.
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
}

impl CfError {
    /// Whether this error means a data source could not be reached or refused the request.
    ///
    /// Callers use this to keep their previous state for the current poll cycle instead of
    /// treating the failure as a crash.
    #[must_use]
    pub const fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::Api { .. }
        )
    }
}
