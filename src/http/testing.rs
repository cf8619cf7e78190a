//! Scripted [`HttpBackend`] used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::{Value, json};
use tokio::time::Instant;

use super::checkmk_api::CheckmkApi;
use super::error::HttpError;
use super::http_client::{HttpBackend, PreparedRequest, RawResponse};
use super::transport::Transport;
use super::types::RetryPolicy;

pub(crate) const TEST_BASE_URL: &str = "https://cmk.example.com:443/prod/check_mk/api/1.0/";

pub(crate) fn text_response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers: HeaderMap::new(),
        body: body.to_string(),
    }
}

pub(crate) fn json_response(status: u16, body: Value) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    RawResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers,
        body: body.to_string(),
    }
}

pub(crate) fn rate_limited(retry_after: Option<&'static str>) -> RawResponse {
    let mut response = text_response(429, "slow down");
    if let Some(value) = retry_after {
        response.headers.insert(RETRY_AFTER, HeaderValue::from_static(value));
    }
    response
}

/// Replays scripted responses in order and records every request it sees.
///
/// Once the script runs out the last response is repeated.
pub(crate) struct SpyBackend {
    script: Mutex<VecDeque<RawResponse>>,
    last: Mutex<Option<RawResponse>>,
    calls: Mutex<Vec<(Instant, PreparedRequest)>>,
}

impl SpyBackend {
    pub(crate) fn new(script: Vec<RawResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<PreparedRequest> {
        self.calls.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl HttpBackend for SpyBackend {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, HttpError> {
        self.calls.lock().unwrap().push((Instant::now(), request.clone()));

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(response) => {
                *last = Some(response.clone());
                Ok(response)
            },
            None => Ok(last.clone().expect("SpyBackend has no scripted responses")),
        }
    }
}

/// A gateway over `backend` with the default retry policy.
pub(crate) fn spy_api(backend: SpyBackend) -> (Arc<SpyBackend>, Arc<CheckmkApi>) {
    let backend = Arc::new(backend);
    let transport = Transport::with_backend(backend.clone(), RetryPolicy::default());
    (backend, Arc::new(CheckmkApi::new(TEST_BASE_URL, transport)))
}

pub(crate) fn host_json(name: &str, state: i64, acknowledged: bool) -> Value {
    json!({
        "domainType": "host",
        "id": name,
        "title": name,
        "links": [],
        "extensions": {
            "name": name,
            "state": state,
            "last_check": 1700000000,
            "acknowledged": if acknowledged { 1 } else { 0 },
            "acknowledgement_type": if acknowledged { 1 } else { 0 },
            "comments_with_extra_info": []
        }
    })
}

pub(crate) fn service_json(host_name: &str, description: &str, state: i64, acknowledged: bool) -> Value {
    json!({
        "domainType": "service",
        "id": format!("{}:{}", host_name, description),
        "title": description,
        "links": [],
        "extensions": {
            "host_name": host_name,
            "description": description,
            "state": state,
            "last_check": 1700000000,
            "acknowledged": if acknowledged { 1 } else { 0 },
            "plugin_output": "output"
        }
    })
}
