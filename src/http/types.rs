// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use super::route::Route;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// One logical request. Built per call and moved into the transport.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub route: Route,
    pub query: Vec<(String, String)>,
    pub json_body: Option<Value>,
    pub raw_body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            query: Vec::new(),
            json_body: None,
            raw_body: None,
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body. When both a JSON and a raw body are set, only the JSON
    /// body is sent.
    pub fn json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Adds a header that replaces any default header with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The body that goes on the wire, if any.
    pub(crate) fn body(&self) -> Result<Option<String>, serde_json::Error> {
        match (&self.json_body, &self.raw_body) {
            (Some(json), _) => serde_json::to_string(json).map(Some),
            (None, Some(raw)) => Ok(Some(raw.clone())),
            (None, None) => Ok(None),
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes `body` as JSON when the content type mentions `json`, falling
    /// back to text when it does not parse.
    pub fn decode(content_type: Option<&str>, body: String) -> Self {
        let is_json = content_type.map(|ct| ct.contains("json")).unwrap_or(false);
        if is_json {
            if let Ok(value) = serde_json::from_str(&body) {
                return Payload::Json(value);
            }
        }
        Payload::Text(body)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// The body as it would be shown to a user.
    pub fn to_text(&self) -> String {
        match self {
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text.clone(),
        }
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub payload: Payload,
}

/// How many attempts a request gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_retries: u32,
    /// Delay before the second attempt; doubled for every attempt after that.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_backoff: Duration) -> Self {
        Self {
            max_retries,
            base_backoff,
        }
    }

    /// Backoff after the 0-indexed `attempt` failed: `base * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BACKOFF_BASE,
        }
    }
}
