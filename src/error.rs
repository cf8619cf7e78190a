use thiserror::Error;

use crate::http::{GatewayError, HttpError, Resource};

/// Errors returned by [`Client`](crate::Client) and the entity operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// One item of a collection did not have the expected shape.
    #[error("Could not decode {resource} '{id}': {message}")]
    EntityParse {
        resource: Resource,
        id: String,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// The transport failure behind this error, if there was one.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            ClientError::Gateway(e) => e.http_error(),
            ClientError::Http(e) => Some(e),
            _ => None,
        }
    }
}
