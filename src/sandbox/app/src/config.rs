//! Sandbox configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`SandboxConfig::gateway_url`]
pub const GATEWAY_URL_ENV: &str = "WEB4_GATEWAY_URL";

/// Environment variable overriding the port of [`SandboxConfig::listen_addr`]
pub const PORT_ENV: &str = "PORT";

/// Where the gateway lives and how the sandbox talks to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Base URL the `/web4/...` paths are resolved against
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Address the API server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Optional `User-Agent` for gateway requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_gateway_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:3001".to_string()
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            listen_addr: default_listen_addr(),
            user_agent: None,
        }
    }
}

impl SandboxConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    /// File configuration if a path is given, defaults otherwise, then
    /// environment overrides on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Apply `WEB4_GATEWAY_URL` and `PORT` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(GATEWAY_URL_ENV).filter(|url| !url.is_empty()) {
            self.gateway_url = url;
        }
        if let Some(port) = lookup(PORT_ENV).and_then(|p| p.parse::<u16>().ok()) {
            let host = self
                .listen_addr
                .rsplit_once(':')
                .map_or(self.listen_addr.as_str(), |(host, _)| host);
            self.listen_addr = format!("{host}:{port}");
        }
        self
    }

    /// Override the gateway base URL
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Set the `User-Agent` header sent to the gateway
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SandboxConfig::default();
        assert_eq!(config.gateway_url, "http://localhost:3000");
        assert_eq!(config.listen_addr, "0.0.0.0:3001");
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sandbox.toml");

        let config = SandboxConfig::new()
            .with_gateway_url("https://near.page")
            .with_user_agent("web4-sandbox/test");
        config.save_to_file(&path).unwrap();

        let loaded = SandboxConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sandbox.toml");
        std::fs::write(&path, "gateway_url = \"https://testnet.page\"\n").unwrap();

        let loaded = SandboxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.gateway_url, "https://testnet.page");
        assert_eq!(loaded.listen_addr, "0.0.0.0:3001");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = SandboxConfig::from_file(temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(GATEWAY_URL_ENV, "http://gw:8080"), (PORT_ENV, "9000")]);
        let config = SandboxConfig::default().apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.gateway_url, "http://gw:8080");
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let config = SandboxConfig::default()
            .apply_env(|k| (k == PORT_ENV).then(|| "not-a-port".to_string()));
        assert_eq!(config, SandboxConfig::default());
    }
}
