//! Top-level handle for one Checkmk site.

use std::sync::Arc;

use log::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{CheckmkApi, Credential, Transport, equals_query};
use crate::models::{Host, Service};

/// A connected client for one Checkmk site.
///
/// Owns a single [`CheckmkApi`] (and with it one HTTP session) that is shared
/// with every entity it returns.
///
/// # Example
///
/// ```rust,no_run
/// use checkmk::{Client, ClientConfig};
///
/// # async fn example() -> Result<(), checkmk::ClientError> {
/// let client = Client::new(ClientConfig {
///     host: "monitor.example.com".to_string(),
///     site: "prod".to_string(),
///     secret: "automation-secret".to_string(),
///     ..Default::default()
/// })?;
///
/// for host in client.get_hosts().await? {
///     if host.problem() && !host.acknowledged() {
///         println!("{} is {}", host.name(), host.state());
///     }
/// }
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    config: ClientConfig,
    api: Arc<CheckmkApi>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = validated_base_url(&config)?;
        let transport = Transport::new(config.session_settings(), config.retry_policy());
        Self::with_transport(config, base_url, transport)
    }

    /// Builds a client over an existing transport. The transport's credential
    /// is replaced by the one from `config`.
    pub fn with_transport(config: ClientConfig, base_url: String, transport: Transport) -> Result<Self, ClientError> {
        let transport = transport.with_credential(config.credential());

        info!(
            base_url = &*base_url,
            max_retries = config.max_retries,
            verify_ssl = config.verify_ssl;
            "Checkmk client created"
        );
        let api = Arc::new(CheckmkApi::new(base_url, transport));
        Ok(Self { config, api })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<CheckmkApi> {
        &self.api
    }

    pub async fn get_hosts(&self) -> Result<Vec<Host>, ClientError> {
        let values = self.api.get_hosts(None).await?;
        Host::decode_all(&self.api, values)
    }

    pub async fn get_services(&self) -> Result<Vec<Service>, ClientError> {
        let values = self.api.get_services(None).await?;
        Service::decode_all(&self.api, values)
    }

    pub async fn services_for_host(&self, host_name: &str) -> Result<Vec<Service>, ClientError> {
        let values = self.api.get_services(Some(equals_query("host_name", host_name))).await?;
        Service::decode_all(&self.api, values)
    }

    /// Switches every later request to bearer authentication.
    pub async fn set_bearer_token(&self, token: impl Into<String>) {
        self.api.transport().set_credential(Credential::bearer(token)).await;
    }

    /// Closes the HTTP session. Entities fetched through this client can no
    /// longer issue requests afterwards.
    pub async fn close(&self) -> Result<(), ClientError> {
        debug!("Closing Checkmk client");
        Ok(self.api.close().await?)
    }
}

fn validated_base_url(config: &ClientConfig) -> Result<String, ClientError> {
    if config.host.trim().is_empty() {
        return Err(ClientError::InvalidConfig("host must not be empty".to_string()));
    }
    if config.site.trim().is_empty() {
        return Err(ClientError::InvalidConfig("site must not be empty".to_string()));
    }

    let base_url = config.base_url();
    let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidConfig(format!("{}: {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidConfig(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(base_url)
}
