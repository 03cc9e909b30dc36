//! Errors raised while talking to the gateway

/// Failure of the view-call fetch. Rendered to the user as `Error: <message>`.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response
    #[error("Failed to fetch {url}: {source}")]
    Request {
        /// Absolute URL that was requested
        url: String,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
