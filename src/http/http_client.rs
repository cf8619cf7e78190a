// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tokio::sync::Mutex;

use super::error::HttpError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A request with every header and the body already resolved.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A response as read off the wire, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Sends a single attempt of a request.
///
/// The transport owns retry and classification; a backend only moves bytes.
/// Connection-level faults must be reported as [`HttpError::RequestFailed`] so
/// the transport can retry them.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, HttpError>;

    /// Opens the underlying session ahead of the first request.
    async fn open(&self) -> Result<(), HttpError> {
        Ok(())
    }

    /// Releases the underlying session. Must be called at most once.
    async fn close(&self) -> Result<(), HttpError> {
        Ok(())
    }
}

/// Settings for the pooled reqwest session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub timeout: Duration,
    pub verify_ssl: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_ssl: false,
        }
    }
}

enum Session {
    Unopened,
    Open(reqwest::Client),
    Closed,
}

/// [`HttpBackend`] over a single lazily created `reqwest::Client`.
///
/// The client (and with it the connection pool) is built on first use rather
/// than at construction, so a `ReqwestBackend` can be created before a tokio
/// runtime is running.
pub struct ReqwestBackend {
    settings: SessionSettings,
    session: Mutex<Session>,
}

impl ReqwestBackend {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            session: Mutex::new(Session::Unopened),
        }
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub async fn is_open(&self) -> bool {
        matches!(*self.session.lock().await, Session::Open(_))
    }

    async fn client(&self) -> Result<reqwest::Client, HttpError> {
        let mut session = self.session.lock().await;
        match &*session {
            Session::Open(client) => Ok(client.clone()),
            Session::Closed => Err(HttpError::SessionClosed),
            Session::Unopened => {
                let client = reqwest::Client::builder()
                    .timeout(self.settings.timeout)
                    .danger_accept_invalid_certs(!self.settings.verify_ssl)
                    .build()
                    .map_err(|e| HttpError::Client(e.to_string()))?;
                debug!(
                    timeout_secs = self.settings.timeout.as_secs(),
                    verify_ssl = self.settings.verify_ssl;
                    "HTTP: Session opened"
                );
                *session = Session::Open(client.clone());
                Ok(client)
            },
        }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, HttpError> {
        let client = self.client().await?;

        let mut builder = client
            .request(request.method.clone(), request.url.as_str())
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse { status, headers, body })
    }

    async fn open(&self) -> Result<(), HttpError> {
        self.client().await.map(|_| ())
    }

    async fn close(&self) -> Result<(), HttpError> {
        let mut session = self.session.lock().await;
        match std::mem::replace(&mut *session, Session::Closed) {
            Session::Closed => Err(HttpError::SessionClosed),
            Session::Open(_) => {
                debug!("HTTP: Session closed");
                Ok(())
            },
            Session::Unopened => Ok(()),
        }
    }
}
