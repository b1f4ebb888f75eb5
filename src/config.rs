//! Client configuration

use crate::errors::{JcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Production console API
pub const DEFAULT_BASE_URL: &str = "https://console.jumpcloud.com/api";

/// Records requested per page by the list operations
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Environment variable holding the administrator API key
pub const API_KEY_ENV: &str = "JUMPCLOUD_APIKEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "JUMPCLOUD_URL";

/// Credentials and endpoint for one directory organization
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Administrator API key sent as `x-api-key`
    pub api_key: String,
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport tuning
    #[serde(default)]
    pub settings: ClientSettings,
}

/// Request timeout and page size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Request timeout in seconds; `None` keeps the HTTP client's default
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Page size used by the pagination loop
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

// The key must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("settings", &self.settings)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the production service
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            settings: ClientSettings::default(),
        }
    }

    /// Read the key from `JUMPCLOUD_APIKEY` and an optional base URL from `JUMPCLOUD_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            JcError::Config(format!(
                "No API key configured. Please run: export {}=<your-JumpCloud-API-key>",
                API_KEY_ENV
            ))
        })?;

        let mut builder = ConfigBuilder::new().api_key(&api_key);
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(&url);
        }

        builder.build()
    }

    /// Load and validate a YAML config file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JcError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;

        let config: ClientConfig = serde_yaml::from_str(&content).map_err(|e| {
            JcError::Config(format!("Failed to parse config file {}: {}", path, e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the values the transport relies on
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(JcError::Config("API key must not be empty".to_string()));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| JcError::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(JcError::Config(format!(
                "Base URL '{}' must use http or https",
                self.base_url
            )));
        }

        if self.settings.page_size == 0 {
            return Err(JcError::Config("page_size must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Fluent construction of a validated [`ClientConfig`]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new(String::new()),
        }
    }

    pub fn api_key(mut self, api_key: &str) -> Self {
        self.config.api_key = api_key.to_string();
        self
    }

    /// Trailing slashes are dropped so paths can be appended verbatim
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout in seconds; unset means no timeout
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.settings.timeout = Some(timeout);
        self
    }

    /// Records requested per page when listing
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.settings.page_size = page_size;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
