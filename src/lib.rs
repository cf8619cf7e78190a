pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod models;

pub use crate::client::Client;
pub use crate::config::{ClientConfig, load_configuration};
pub use crate::error::ClientError;
pub use crate::models::{Host, Service};
