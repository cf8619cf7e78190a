//! HTTP layer for the Checkmk REST API.
//!
//! The module is organized in three layers, leaf first:
//!
//! - [`Route`] - resolves a base URL, method and path into a request target
//! - [`Transport`] - owns the HTTP session and the active [`Credential`], and
//!   executes a [`RequestSpec`] with bounded retries, exponential backoff and
//!   status classification into [`HttpError`]
//! - [`CheckmkApi`] - per-resource gateway (hosts, services, comments,
//!   acknowledgements) that builds request bodies and scopes failures as
//!   [`GatewayError`]
//!
//! # Retries
//!
//! | Status | Behaviour |
//! |---|---|
//! | 2xx | success |
//! | 401, 403, 404 | fail immediately |
//! | 429 | wait `Retry-After` seconds (60 when missing), then retry |
//! | 500, 502, 503, 504, 524 | wait `base * 2^attempt`, then retry |
//! | anything else | fail immediately |
//!
//! Connection faults are retried like server errors. When no attempts are
//! left the last failure is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use checkmk::http::{CheckmkApi, Credential, Transport};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let transport = Transport::default();
//! transport.set_credential(Credential::basic("automation", "secret")).await;
//!
//! let api = CheckmkApi::new("https://monitor.example.com:443/prod/check_mk/api/1.0/", transport);
//! for host in api.get_hosts(None).await? {
//!     println!("{}", host["id"]);
//! }
//! api.close().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod checkmk_api;
mod error;
mod http_client;
mod requests;
mod route;
#[cfg(test)]
pub(crate) mod testing;
mod transport;
mod types;

pub use auth::Credential;
pub use checkmk_api::CheckmkApi;
pub use error::{GatewayError, HttpError, Resource};
pub use http_client::{DEFAULT_TIMEOUT_SECS, HttpBackend, PreparedRequest, RawResponse, ReqwestBackend, SessionSettings};
pub use requests::{
    AcknowledgeOptions, ColumnsRequest, HOST_COLUMNS, HostAcknowledgement, HostComment, SERVICE_COLUMNS,
    ServiceAcknowledgement, ServiceComment, equals_query,
};
pub use route::{
    HOST_ACKNOWLEDGE_ENDPOINT, HOST_COMMENT_ENDPOINT, HOSTS_ENDPOINT, Route, SERVICE_ACKNOWLEDGE_ENDPOINT,
    SERVICE_COMMENT_ENDPOINT, SERVICES_ENDPOINT,
};
pub use transport::{DEFAULT_RETRY_AFTER, LIBRARY_USER_AGENT, RETRYABLE_SERVER_STATUSES, Transport};
pub use types::{ApiResponse, DEFAULT_BACKOFF_BASE, DEFAULT_MAX_RETRIES, Payload, RequestSpec, RetryPolicy};
