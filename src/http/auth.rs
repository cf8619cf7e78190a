// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::log::mask_secret;

/// Credentials used to build the `Authorization` header.
///
/// Checkmk accepts HTTP basic auth with an automation user and its secret, or a
/// bearer token obtained after login.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Basic { username: String, secret: String },
    Bearer { token: String },
}

impl Credential {
    pub fn basic(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Credential::Basic {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::Bearer { token: token.into() }
    }

    /// The full `Authorization` header value, scheme included.
    pub fn header_value(&self) -> String {
        match self {
            Credential::Basic { username, secret } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, secret));
                format!("Basic {}", encoded)
            },
            Credential::Bearer { token } => format!("Bearer {}", token),
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Credential::Basic { .. } => "basic",
            Credential::Bearer { .. } => "bearer",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Basic { username, secret } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("secret", &mask_secret(secret))
                .finish(),
            Credential::Bearer { token } => f.debug_struct("Bearer").field("token", &mask_secret(token)).finish(),
        }
    }
}
