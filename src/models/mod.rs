//! Monitoring entities returned by the Checkmk REST API.
//!
//! Every collection endpoint answers with a list of domain objects of the form
//! `{domainType, id, title, links, extensions}`. [`DomainObject`] captures that
//! envelope; the `extensions` type differs per resource:
//!
//! - [`HostExtensions`] decodes directly into the fields a [`Host`] exposes.
//! - [`ServiceRecord`] is the flat column map of a service. It is regrouped
//!   into [`ServiceDetails`] before it is handed out as a [`Service`].
//!
//! Entities keep a handle to the [`CheckmkApi`](crate::http::CheckmkApi) they
//! were fetched through so they can issue follow-up writes (acknowledge,
//! comment) themselves.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::Resource;

mod comment;
mod de;
pub mod host;
pub mod service;
mod state;

pub use comment::Comment;
pub use host::{Host, HostExtensions};
pub use service::{
    AcknowledgementInfo, CheckInfo, CustomData, DowntimeCommentInfo, FlappingInfo, NotesInfo, NotificationInfo,
    OutputInfo, PerformanceInfo, Service, ServiceDetails, ServiceRecord, StateHistory,
};
pub use state::{HostState, ServiceState};

/// A hypermedia link attached to a domain object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    #[serde(rename = "domainType", default)]
    pub domain_type: Option<String>,
    pub href: String,
    pub method: String,
    pub rel: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
}

/// The envelope shared by every object in a `collections/all` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainObject<E> {
    #[serde(rename = "domainType")]
    pub domain_type: String,
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub links: Vec<Link>,
    pub extensions: E,
}

/// Decodes one item of a collection, naming the item in the error when its
/// shape is wrong.
pub(crate) fn decode_object<E: DeserializeOwned>(resource: Resource, value: Value) -> Result<DomainObject<E>, ClientError> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    serde_json::from_value(value).map_err(|e| ClientError::EntityParse {
        resource,
        id,
        message: e.to_string(),
    })
}
