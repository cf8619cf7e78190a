// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt;

use reqwest::Method;

pub const HOSTS_ENDPOINT: &str = "domain-types/host/collections/all";
pub const SERVICES_ENDPOINT: &str = "domain-types/service/collections/all";
pub const HOST_COMMENT_ENDPOINT: &str = "domain-types/comment/collections/host";
pub const SERVICE_COMMENT_ENDPOINT: &str = "domain-types/comment/collections/service";
pub const HOST_ACKNOWLEDGE_ENDPOINT: &str = "domain-types/acknowledge/collections/host";
pub const SERVICE_ACKNOWLEDGE_ENDPOINT: &str = "domain-types/acknowledge/collections/service";

/// A resolved request target: base URL, method and path.
///
/// The URL is the plain concatenation of `base_url` and `path`. No slashes are
/// added or collapsed, so callers control the exact shape of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    base_url: String,
    method: Method,
    path: String,
}

impl Route {
    pub fn new(base_url: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            method,
            path: path.into(),
        }
    }

    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, Method::GET, path)
    }

    pub fn post(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, Method::POST, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.method, self.base_url, self.path)
    }
}
