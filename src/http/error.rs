// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for Checkmk REST API operations.
//!
//! This module defines two layers of errors:
//!
//! - [`HttpError`] describes what went wrong while executing a single logical
//!   HTTP request (status classification, transport faults, local misuse).
//! - [`GatewayError`] scopes a failure to the resource that was being fetched
//!   or written (hosts, services, comments, acknowledgements), and adds the
//!   domain preconditions that are checked before any request is issued.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while executing a request through the transport.
///
/// Status-classified failures carry the HTTP status, the raw response body and
/// the request URL so callers can report them without holding on to the
/// response.
///
/// # Error Categories
///
/// - **Authentication** (terminal): [`Unauthorized`](HttpError::Unauthorized),
///   [`Forbidden`](HttpError::Forbidden)
/// - **Missing resource** (terminal): [`NotFound`](HttpError::NotFound)
/// - **Retried, then surfaced**: [`TooManyRequests`](HttpError::TooManyRequests),
///   [`ServiceUnavailable`](HttpError::ServiceUnavailable),
///   [`RequestFailed`](HttpError::RequestFailed)
/// - **Other status** (terminal): [`Status`](HttpError::Status)
/// - **Local errors** (no network I/O): [`UnsupportedMethod`](HttpError::UnsupportedMethod),
///   [`InvalidHeader`](HttpError::InvalidHeader), [`JsonError`](HttpError::JsonError),
///   [`SessionClosed`](HttpError::SessionClosed), [`Client`](HttpError::Client)
///
/// # Example
///
/// ```rust,no_run
/// use checkmk::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::Unauthorized { url, .. } => eprintln!("Check credentials for {url}"),
///         HttpError::ServiceUnavailable { status, .. } => eprintln!("Site is down ({status})"),
///         HttpError::RequestFailed(e) => eprintln!("Network error: {e}"),
///         other => eprintln!("Other error: {other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server rejected the credentials (401).
    #[error("Unauthorized: {status} {url}: {body}")]
    Unauthorized {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// The credentials are valid but lack permission (403).
    #[error("Forbidden: {status} {url}: {body}")]
    Forbidden {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// The endpoint or object does not exist (404).
    #[error("Not Found: {status} {url}: {body}")]
    NotFound {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// The server kept rate limiting (429) until no attempts were left.
    #[error("Too Many Requests: {status} {url}: {body}")]
    TooManyRequests {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// The server kept answering with a gateway or server error until no
    /// attempts were left.
    #[error("Service Unavailable: {status} {url}: {body}")]
    ServiceUnavailable {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// Any other non-success status. Never retried.
    #[error("Server error {status} {url}: {body}")]
    Status {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// The request never produced a response: connection refused, timeout,
    /// DNS resolution failure or TLS handshake error.
    ///
    /// This is the fault from the final attempt, returned exactly as reqwest
    /// reported it.
    #[error(transparent)]
    RequestFailed(#[from] reqwest::Error),

    /// Only `GET` and `POST` are supported.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(reqwest::Method),

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}")]
    InvalidHeader { name: String },

    /// The request body could not be serialized.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The transport was used after [`Transport::close`](super::Transport::close).
    #[error("HTTP session is closed")]
    SessionClosed,

    /// The underlying HTTP client could not be constructed.
    #[error("Could not build HTTP client: {0}")]
    Client(String),
}

impl HttpError {
    /// The HTTP status of a status-classified failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Unauthorized { status, .. }
            | HttpError::Forbidden { status, .. }
            | HttpError::NotFound { status, .. }
            | HttpError::TooManyRequests { status, .. }
            | HttpError::ServiceUnavailable { status, .. }
            | HttpError::Status { status, .. } => Some(*status),
            HttpError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }

    /// True for 401 and 403 failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, HttpError::Unauthorized { .. } | HttpError::Forbidden { .. })
    }

    /// True for failures that surfaced only after the retry budget ran out.
    pub fn is_exhausted_retry(&self) -> bool {
        matches!(
            self,
            HttpError::TooManyRequests { .. } | HttpError::ServiceUnavailable { .. } | HttpError::RequestFailed(_)
        )
    }
}

/// The kind of resource a gateway operation was working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Host,
    Service,
    Comment,
    Acknowledgement,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Host => write!(f, "host"),
            Resource::Service => write!(f, "service"),
            Resource::Comment => write!(f, "comment"),
            Resource::Acknowledgement => write!(f, "acknowledgement"),
        }
    }
}

/// Errors returned by [`CheckmkApi`](super::CheckmkApi).
///
/// A [`Fetch`](GatewayError::Fetch) means the request itself failed; a
/// [`Parse`](GatewayError::Parse) means the request succeeded but the payload
/// did not have the expected shape. The two precondition variants are raised
/// before any request is sent.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Could not fetch {resource}: {source}")]
    Fetch {
        resource: Resource,
        #[source]
        source: HttpError,
    },

    #[error("Could not parse {resource} response: {message}")]
    Parse {
        resource: Resource,
        message: String,
        raw: String,
    },

    #[error("Problem on {resource} '{name}' is already acknowledged")]
    AlreadyAcknowledged { resource: Resource, name: String },

    #[error("{resource} '{name}' has no problem to acknowledge")]
    NoProblem { resource: Resource, name: String },
}

impl GatewayError {
    /// True when the error was raised without issuing any request.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GatewayError::AlreadyAcknowledged { .. } | GatewayError::NoProblem { .. }
        )
    }

    /// The transport error behind a [`Fetch`](GatewayError::Fetch) failure.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            GatewayError::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}
