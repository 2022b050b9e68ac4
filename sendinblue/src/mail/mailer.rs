//! Mailer trait and Sendinblue implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::dispatch::{self, require_api_key, DeliveryResponse};
use super::http::{HttpClient, ReqwestClient};
use super::payload::{ApiVersion, Dialect, V2, V3};
use super::{Email, MailError};
use crate::config::EnvConfig;

/// Production endpoint of the provider.
pub const DEFAULT_BASE_URI: &str = "https://api.sendinblue.com";

/// Async email sending trait.
///
/// Implement this trait to provide alternative email backends.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<DeliveryResponse, MailError>;
}

/// Configuration for [`SendinblueMailer`].
#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    /// API key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider endpoint; point it at a fake server in tests.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Payload dialect (default: v3).
    #[serde(default)]
    pub api_version: ApiVersion,
}

fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

impl MailerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        MailerConfig {
            api_key: Some(api_key.into()),
            base_uri: default_base_uri(),
            api_version: ApiVersion::default(),
        }
    }

    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Read `SENDINBLUE_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, MailError> {
        dotenvy::dotenv().ok();

        MailerConfig::from_env_with_prefix("SENDINBLUE")
            .map_err(|e| MailError::MissingConfig(e.to_string()))
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        MailerConfig {
            api_key: None,
            base_uri: default_base_uri(),
            api_version: ApiVersion::default(),
        }
    }
}

/// Mailer for the Sendinblue transactional email API.
///
/// Holds no per-message state, so clones can send concurrently.
pub struct SendinblueMailer<C = ReqwestClient> {
    client: Arc<C>,
    config: Arc<MailerConfig>,
}

impl<C> Clone for SendinblueMailer<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: Arc::clone(&self.config),
        }
    }
}

impl SendinblueMailer {
    /// Create a mailer from environment variables.
    ///
    /// Reads `SENDINBLUE_API_KEY`, `SENDINBLUE_BASE_URI`, `SENDINBLUE_API_VERSION`.
    pub fn from_env() -> Result<Self, MailError> {
        Ok(Self::from_config(MailerConfig::from_env()?))
    }

    /// Create a mailer from explicit configuration.
    pub fn from_config(config: MailerConfig) -> Self {
        Self::with_client(config, ReqwestClient::new())
    }
}

impl<C: HttpClient> SendinblueMailer<C> {
    /// Create a mailer that sends through `client`.
    pub fn with_client(config: MailerConfig, client: C) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    async fn send_as<D: Dialect>(&self, email: &Email) -> Result<DeliveryResponse, MailError> {
        let payload = D::build(email)?;
        dispatch::deliver::<D>(
            self.client.as_ref(),
            &payload,
            self.config.api_key.as_deref(),
            &self.config.base_uri,
        )
        .await
    }
}

#[async_trait]
impl<C: HttpClient> Mailer for SendinblueMailer<C> {
    async fn send(&self, email: &Email) -> Result<DeliveryResponse, MailError> {
        // Fail on configuration before reading any attachment.
        require_api_key(self.config.api_key.as_deref())?;

        match self.config.api_version {
            ApiVersion::V2 => self.send_as::<V2>(email).await,
            ApiVersion::V3 => self.send_as::<V3>(email).await,
        }
    }
}
