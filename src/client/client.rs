//! Core client implementation

use super::transport::{Op, item_path};
use crate::config::ClientConfig;
use crate::errors::{JcError, Result};
use crate::models::{Resource, codec};
use std::time::Duration;
use tracing::{debug, info};

/// Client for the directory service REST API
///
/// Holds no mutable state, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct JcClient {
    pub(crate) config: ClientConfig,
    pub(crate) http_client: reqwest::Client,
}

impl JcClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.settings.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let http_client = builder
            .build()
            .map_err(|e| JcError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!("JcClient created for {}", config.base_url);

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Shorthand for a client against `base_url` with default settings
    pub fn with_key(api_key: &str, base_url: &str) -> Result<Self> {
        Self::new(
            crate::config::ConfigBuilder::new()
                .api_key(api_key)
                .base_url(base_url)
                .build()?,
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch one record of `T` by id
    pub(crate) async fn fetch<T: Resource>(&self, id: &str) -> Result<T> {
        let body = self.execute(Op::Read, &item_path(T::PATH, id)?, None).await?;
        codec::decode_one(T::KIND, &body)
    }

    /// Create or update a record and return the id the service assigned.
    ///
    /// The natural key in the response must equal the one sent; otherwise the
    /// response is discarded and [`JcError::Integrity`] is returned.
    pub(crate) async fn save<T: Resource>(&self, op: Op, record: &T) -> Result<String> {
        let path = match op {
            Op::Insert => T::PATH.to_string(),
            Op::Update => item_path(T::PATH, record.id())?,
            other => {
                return Err(JcError::InvalidRequest(format!(
                    "{} cannot save a {}",
                    other.as_str(),
                    T::KIND
                )));
            }
        };

        let response = self.execute(op, &path, Some(record.encode(op)?)).await?;
        let saved = T::decode_saved(&response)?;

        if let Some(expected) = record.natural_key() {
            let actual = saved.natural_key().unwrap_or_default();
            if actual != expected {
                return Err(JcError::integrity(T::KIND, expected, actual));
            }
        }

        debug!(resource = T::KIND, id = saved.id(), "saved");
        Ok(saved.id().to_string())
    }

    /// Delete a record of `T` by id
    pub(crate) async fn remove<T: Resource>(&self, id: &str) -> Result<()> {
        self.execute(Op::Delete, &item_path(T::PATH, id)?, None)
            .await?;
        Ok(())
    }
}
