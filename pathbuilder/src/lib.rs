//! Minimal Pathbuilder 2e export client.
//!
//! This crate provides:
//! - The [`Build`] model of a Pathbuilder character export, read leniently
//! - An async client that fetches a build by its numeric share ID
//! - Offline helpers to validate IDs and unwrap saved `json.php` responses

pub mod build;
pub mod lenient;

pub use build::{
    AcTotal, Abilities, Ability, Armor, Attributes, Build, EquipmentItem, Feat, FocusCell,
    FocusMap, Lore, Money, Proficiencies, SpellCaster, SpellRank, Weapon, CHILD_CHOICE,
};

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://pathbuilder2e.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur before a build reaches the mapping engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ID must be numeric, got {0:?}")]
    InvalidId(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Pathbuilder fetch failed (status {status})")]
    Status { status: u16 },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid Pathbuilder JSON shape: missing `build` object")]
    MissingBuild,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host serving `json.php`.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read overrides from `PATHBUILDER_BASE_URL` and `PATHBUILDER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("PATHBUILDER_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(secs) = std::env::var("PATHBUILDER_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PATHBUILDER_TIMEOUT_SECS is not a number: {secs}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Export URL for a validated build ID.
    pub fn build_url(&self, id: &str) -> String {
        format!("{}/json.php?id={}", self.base_url, id)
    }
}

/// Pathbuilder export client.
#[derive(Clone)]
pub struct Pathbuilder {
    client: reqwest::Client,
    config: ClientConfig,
}

impl Pathbuilder {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the raw `build` object for a share ID.
    pub async fn fetch_build_value(&self, id: &str) -> Result<Value, Error> {
        let id = validate_id(id)?;
        let url = self.config.build_url(id);
        tracing::debug!(%url, "fetching pathbuilder build");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, id, "pathbuilder returned an error status");
            return Err(Error::Status { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        unwrap_build_value(&body)
    }

    /// Fetch and read the build for a share ID.
    pub async fn fetch_build(&self, id: &str) -> Result<Build, Error> {
        let value = self.fetch_build_value(id).await?;
        let build = Build::from_value(value);
        tracing::info!(id, name = %build.name, level = build.level, "fetched build");
        Ok(build)
    }
}

/// Check that a share ID is a non-empty run of ASCII digits, returning it trimmed.
pub fn validate_id(id: &str) -> Result<&str, Error> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(trimmed)
}

/// Extract the `build` object from a `json.php` response body.
pub fn unwrap_build_value(body: &str) -> Result<Value, Error> {
    let mut data: Value = serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    match data.get_mut("build").map(Value::take) {
        Some(build @ Value::Object(_)) => Ok(build),
        _ => Err(Error::MissingBuild),
    }
}

/// Extract and read the build from a `json.php` response body.
pub fn unwrap_build(body: &str) -> Result<Build, Error> {
    unwrap_build_value(body).map(Build::from_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("182461").unwrap(), "182461");
        assert_eq!(validate_id(" 42 ").unwrap(), "42");
        assert!(matches!(validate_id(""), Err(Error::InvalidId(_))));
        assert!(matches!(validate_id("12a"), Err(Error::InvalidId(_))));
        assert!(matches!(validate_id("-5"), Err(Error::InvalidId(_))));
        assert!(matches!(validate_id("1 2"), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_unwrap_build() {
        let build = unwrap_build(r#"{"success": true, "build": {"name": "Kyra", "level": 3}}"#).unwrap();
        assert_eq!(build.name, "Kyra");
        assert_eq!(build.level, 3);
    }

    #[test]
    fn test_unwrap_build_missing_wrapper() {
        assert!(matches!(unwrap_build(r#"{"success": false}"#), Err(Error::MissingBuild)));
        assert!(matches!(unwrap_build(r#"{"build": null}"#), Err(Error::MissingBuild)));
        assert!(matches!(unwrap_build(r#"[1, 2]"#), Err(Error::MissingBuild)));
    }

    #[test]
    fn test_unwrap_build_not_json() {
        assert!(matches!(unwrap_build("<html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.build_url("7"), "http://localhost:8080/json.php?id=7");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_client_creation() {
        let client = Pathbuilder::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_id_before_network() {
        let client = Pathbuilder::new(ClientConfig::default()).unwrap();
        let err = client.fetch_build("abc").await.unwrap_err();
        assert!(matches!(err, Error::InvalidId(_)));
    }
}
