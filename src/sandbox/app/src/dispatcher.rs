//! Hands built URLs to the gateway: a GET for view calls, a navigation
//! target for everything else.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};
use web4::endpoints::absolute;

use crate::{config::SandboxConfig, errors::GatewayError};

/// The web4 gateway as seen by the sandbox
pub trait Gateway {
    /// Base URL root-relative paths are resolved against
    fn base_url(&self) -> &str;

    /// GET `path` and return the body text, whatever the status code
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Absolute URL for a root-relative gateway path
    fn resolve(&self, path: &str) -> String {
        absolute(self.base_url(), path)
    }
}

/// Gateway reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Gateway at `base_url` with a default HTTP client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Gateway built from the sandbox configuration
    pub fn from_config(config: &SandboxConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().map_err(GatewayError::Client)?;

        Ok(Self {
            base_url: config.gateway_url.clone(),
            client,
        })
    }
}

impl Gateway for HttpGateway {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_text(&self, path: &str) -> Result<String, GatewayError> {
        let url = self.resolve(path);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| GatewayError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // The body is still what the user wants to see.
            warn!("Gateway returned {} for {}", status, url);
        }

        response.text().await.map_err(GatewayError::Body)
    }
}

/// Outcome of a view call as shown in the output panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutput {
    /// Raw response body, unmodified
    Body(String),
    /// Fetch failure message
    Failed(String),
}

impl ViewOutput {
    /// Text for the output panel
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Whether the fetch failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<String, GatewayError>> for ViewOutput {
    fn from(result: Result<String, GatewayError>) -> Self {
        match result {
            Ok(body) => Self::Body(body),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

impl fmt::Display for ViewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(body) => f.write_str(body),
            Self::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}

impl Serialize for ViewOutput {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full-page navigation handed to the browser; no response is observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Absolute URL to navigate to
    pub url: String,
}

impl Navigation {
    /// Navigation to a root-relative gateway path
    pub fn to<G: Gateway>(gateway: &G, path: &str) -> Self {
        Self {
            url: gateway.resolve(path),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records requested paths and answers with a fixed body, or fails
    /// with a real client error when there is none
    pub(crate) struct StaticGateway {
        pub base_url: String,
        pub body: Option<String>,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticGateway {
        pub fn ok(body: &str) -> Self {
            Self {
                base_url: "http://gateway.test".to_string(),
                body: Some(body.to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                body: None,
                ..Self::ok("")
            }
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    /// A `reqwest::Error` produced without touching the network
    pub(crate) fn client_error() -> reqwest::Error {
        reqwest::Client::new().get("not a url").build().unwrap_err()
    }

    impl Gateway for StaticGateway {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        async fn fetch_text(&self, path: &str) -> Result<String, GatewayError> {
            self.requested.lock().unwrap().push(path.to_string());
            self.body.clone().ok_or_else(|| GatewayError::Request {
                url: self.resolve(path),
                source: client_error(),
            })
        }
    }

    #[test]
    fn test_view_output_rendering() {
        assert_eq!(ViewOutput::Body("{\"ok\":true}".into()).render(), "{\"ok\":true}");
        let failed = ViewOutput::from(Err::<String, _>(GatewayError::Body(client_error())));
        assert!(failed.is_error());
        assert!(failed.render().starts_with("Error: Failed to read response body: "));
        assert_eq!(serde_json::to_value(&failed).unwrap(), failed.render());
    }

    #[test]
    fn test_navigation_resolves_against_gateway() {
        let gateway = HttpGateway::new("https://near.page/");
        assert_eq!(
            Navigation::to(&gateway, "/web4/login").url,
            "https://near.page/web4/login"
        );
    }

    #[test]
    fn test_gateway_from_config() {
        let config = SandboxConfig::new()
            .with_gateway_url("http://127.0.0.1:1")
            .with_user_agent("web4-sandbox/test");
        let gateway = HttpGateway::from_config(&config).unwrap();
        assert_eq!(gateway.base_url(), "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_an_error() {
        // Port 1 is never listening on the loopback interface.
        let gateway = HttpGateway::new("http://127.0.0.1:1");
        let output = ViewOutput::from(gateway.fetch_text("/web4/contract/a/b?").await);
        assert!(output.is_error());
        assert!(output.render().starts_with("Error: Failed to fetch http://127.0.0.1:1/web4/contract/a/b?"));
    }
}
