//! Client configuration.
//!
//! Settings are read from a TOML file (created from an embedded default when
//! missing) and `CHECKMK_*` environment variables, in that order of
//! precedence. See [`load_configuration`].

mod loader;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{Credential, DEFAULT_TIMEOUT_SECS, RetryPolicy, SessionSettings};
use crate::log::mask_secret;

pub use loader::{get_default_config, load_configuration, write_config_to};

/// Connection settings for one Checkmk site.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub site: String,
    pub api_version: String,
    pub username: String,
    pub secret: String,
    /// Takes precedence over `username`/`secret` when set.
    pub bearer_token: Option<String>,
    pub verify_ssl: bool,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 443,
            scheme: "https".to_string(),
            site: "cmk".to_string(),
            api_version: "1.0".to_string(),
            username: "automation".to_string(),
            secret: String::new(),
            bearer_token: None,
            verify_ssl: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }
}

impl ClientConfig {
    /// The site API root: `{scheme}://{host}:{port}/{site}/check_mk/api/{api_version}/`.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}/check_mk/api/{}/",
            self.scheme, self.host, self.port, self.site, self.api_version
        )
    }

    pub fn credential(&self) -> Credential {
        match self.bearer_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Credential::bearer(token),
            None => Credential::basic(self.username.as_str(), self.secret.as_str()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.backoff_base_ms))
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            verify_ssl: self.verify_ssl,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("site", &self.site)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("secret", &mask_secret(&self.secret))
            .field("bearer_token", &self.bearer_token.as_deref().map(mask_secret))
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish()
    }
}
