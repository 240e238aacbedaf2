//! HTTP client for fetching the response body
//!
//! Provides a thin wrapper around reqwest that handles:
//! - Basic authentication
//! - The certificate validation policy
//! - Status classification into crate errors

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::loader::Configuration;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Accept any TLS certificate, including self-signed and expired ones
    pub accept_invalid_certs: bool,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            user_agent: format!("request-to-csv/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Validate TLS certificates (disabled by default)
    pub fn verify_certificates(mut self, verify: bool) -> Self {
        self.config.accept_invalid_certs = !verify;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with authentication
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration and no auth
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::default(),
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.authenticator = Authenticator::new(auth_config);
        Ok(client)
    }

    /// Create the client described by a configuration: its credentials and
    /// its certificate policy
    pub fn from_configuration(config: &Configuration) -> Result<Self> {
        let http_config = HttpClientConfig::builder()
            .verify_certificates(config.verify_certificates())
            .build();
        if http_config.accept_invalid_certs {
            warn!("TLS certificate validation is disabled for {}", config.url());
        }
        Self::with_auth(http_config, AuthConfig::from_configuration(config))
    }

    /// Whether invalid certificates are accepted
    pub fn accepts_invalid_certs(&self) -> bool {
        self.config.accept_invalid_certs
    }

    /// GET a URL and return the response body as text.
    ///
    /// Server errors and connection failures are errors. Client errors are
    /// logged and their body is returned so the caller can still inspect it.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let req = self.authenticator.apply(self.client.get(url));

        let response = req.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() || e.is_request() {
                Error::Connection(e)
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        if status.is_client_error() {
            warn!("{} replied with {}", url, describe(status));
        }

        debug!("Request succeeded: GET {} ({})", url, status.as_u16());
        Ok(response.text().await?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("auth", self.authenticator.config())
            .finish_non_exhaustive()
    }
}

fn describe(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
