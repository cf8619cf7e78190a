use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::de::{flag, timestamp};
use super::service::Tags;
use super::{Comment, DomainObject, HostState, Link, Service, decode_object};
use crate::error::ClientError;
use crate::http::{AcknowledgeOptions, CheckmkApi, GatewayError, HostComment, Resource, equals_query};

/// Host columns as returned under `extensions`.
#[derive(Debug, Clone, Deserialize)]
pub struct HostExtensions {
    pub name: String,
    pub state: HostState,
    #[serde(default, deserialize_with = "timestamp")]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flag")]
    pub acknowledged: Option<bool>,
    #[serde(default)]
    pub acknowledgement_type: Option<i64>,
    #[serde(default)]
    pub comments_with_extra_info: Option<Vec<Comment>>,
    #[serde(default)]
    pub custom_variables: Option<Tags>,
}

/// A monitored host.
#[derive(Clone)]
pub struct Host {
    pub domain_type: String,
    pub id: String,
    pub title: String,
    pub links: Vec<Link>,
    pub extensions: HostExtensions,
    api: Arc<CheckmkApi>,
}

impl Host {
    pub fn new(object: DomainObject<HostExtensions>, api: Arc<CheckmkApi>) -> Self {
        Self {
            domain_type: object.domain_type,
            id: object.id,
            title: object.title,
            links: object.links,
            extensions: object.extensions,
            api,
        }
    }

    pub(crate) fn decode_all(api: &Arc<CheckmkApi>, values: Vec<Value>) -> Result<Vec<Host>, ClientError> {
        values
            .into_iter()
            .map(|value| decode_object(Resource::Host, value).map(|object| Host::new(object, api.clone())))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.extensions.name
    }

    pub fn state(&self) -> HostState {
        self.extensions.state
    }

    pub fn acknowledged(&self) -> bool {
        self.extensions.acknowledged.unwrap_or(false)
    }

    /// True whenever the host is not UP.
    pub fn problem(&self) -> bool {
        self.state().is_problem()
    }

    pub fn last_check(&self) -> Option<DateTime<Utc>> {
        self.extensions.last_check
    }

    pub fn comments(&self) -> &[Comment] {
        self.extensions.comments_with_extra_info.as_deref().unwrap_or(&[])
    }

    pub fn custom_variables(&self) -> Option<&Tags> {
        self.extensions.custom_variables.as_ref()
    }

    /// Acknowledges the current host problem.
    ///
    /// Fails with [`GatewayError::AlreadyAcknowledged`] or
    /// [`GatewayError::NoProblem`] without contacting the site.
    pub async fn acknowledge(&self, comment: &str, options: AcknowledgeOptions) -> Result<(), GatewayError> {
        self.api.acknowledge_host(self, comment, options).await
    }

    pub async fn add_comment(&self, comment: &str, persistent: bool) -> Result<HostComment, GatewayError> {
        let data = HostComment::new(self.name(), comment, persistent);
        self.api.add_host_comment(&data).await?;
        Ok(data)
    }

    /// Fetches the services that belong to this host.
    pub async fn services(&self) -> Result<Vec<Service>, ClientError> {
        let values = self
            .api
            .get_services(Some(equals_query("host_name", self.name())))
            .await?;
        Service::decode_all(&self.api, values)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{SpyBackend, host_json, json_response, service_json, spy_api};
    use serde_json::json;

    fn host(api: &Arc<CheckmkApi>, value: Value) -> Host {
        Host::decode_all(api, vec![value]).unwrap().remove(0)
    }

    #[test]
    fn test_accessors_read_extensions() {
        let (_, api) = spy_api(SpyBackend::new(vec![]));
        let mut value = host_json("web01", 1, false);
        value["extensions"]["comments_with_extra_info"] = json!([[3, "cmkadmin", "investigating", 1, 1700000000]]);
        let host = host(&api, value);

        assert_eq!(host.name(), "web01");
        assert_eq!(host.state(), HostState::Down);
        assert!(host.problem());
        assert!(!host.acknowledged());
        assert_eq!(host.comments().len(), 1);
        assert_eq!(host.comments()[0].comment, "investigating");
        assert_eq!(host.custom_variables(), None);
    }

    #[test]
    fn test_custom_variables_are_exposed() {
        let (_, api) = spy_api(SpyBackend::new(vec![]));
        let mut value = host_json("web01", 0, false);
        value["extensions"]["custom_variables"] = json!({"ESCALATION": "team-a", "TAGS": "/wato/ prod"});
        let host = host(&api, value);

        let variables = host.custom_variables().unwrap();
        assert_eq!(variables.len(), 2);
        assert_eq!(variables["ESCALATION"], "team-a");
    }

    #[tokio::test]
    async fn test_services_are_filtered_by_host_name() {
        let (backend, api) = spy_api(SpyBackend::new(vec![json_response(
            200,
            json!({"value": [service_json("web01", "CPU load", 2, false)]}),
        )]));
        let host = host(&api, host_json("web01", 0, false));

        let services = host.services().await.unwrap();

        assert_eq!(services.len(), 1);
        assert_eq!(services[0].description(), "CPU load");
        let body: Value = serde_json::from_str(backend.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["query"], json!({"op": "=", "left": "host_name", "right": "web01"}));
    }

    #[tokio::test]
    async fn test_add_comment_posts_host_comment() {
        let (backend, api) = spy_api(SpyBackend::new(vec![json_response(200, json!({}))]));
        let host = host(&api, host_json("web01", 1, false));

        let sent = host.add_comment("rebooting", true).await.unwrap();

        assert_eq!(sent.comment_type, "host");
        let request = &backend.requests()[0];
        assert!(request.url.ends_with("domain-types/comment/collections/host"));
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["persistent"], json!(true));
    }
}
