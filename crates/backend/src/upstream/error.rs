use thiserror::Error;

/// Failure talking to one of the store-information services.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service answered but has no record for the id or query.
    #[error("not found")]
    NotFound,

    /// Non-2xx HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The service reported an error inside a 2xx body.
    #[error("{service} API error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No credential configured for the service.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound)
    }
}
