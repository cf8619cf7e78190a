//! Resource-level access to a Checkmk site.

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use super::error::{GatewayError, HttpError, Resource};
use super::requests::{
    AcknowledgeOptions, ColumnsRequest, HOST_COLUMNS, HostAcknowledgement, HostComment, SERVICE_COLUMNS,
    ServiceAcknowledgement, ServiceComment,
};
use super::route::{
    HOST_ACKNOWLEDGE_ENDPOINT, HOST_COMMENT_ENDPOINT, HOSTS_ENDPOINT, Route, SERVICE_ACKNOWLEDGE_ENDPOINT,
    SERVICE_COMMENT_ENDPOINT, SERVICES_ENDPOINT,
};
use super::transport::Transport;
use super::types::{Payload, RequestSpec};
use crate::models::{Host, Service};

/// Gateway for the host, service, comment and acknowledgement endpoints.
///
/// `CheckmkApi` builds request bodies, hands them to its [`Transport`] and
/// scopes any failure to the resource being accessed. Collection queries
/// return the raw items under `"value"`; turning them into entities is left to
/// the caller.
pub struct CheckmkApi {
    base_url: String,
    transport: Transport,
}

impl CheckmkApi {
    /// `base_url` is the site API root and must end with `/`, for example
    /// `https://monitor.example.com:443/prod/check_mk/api/1.0/`.
    pub fn new(base_url: impl Into<String>, transport: Transport) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Lists hosts, optionally narrowed by a Livestatus query expression.
    pub async fn get_hosts(&self, query: Option<Value>) -> Result<Vec<Value>, GatewayError> {
        self.collection(Resource::Host, HOSTS_ENDPOINT, HOST_COLUMNS, query).await
    }

    /// Lists services, optionally narrowed by a Livestatus query expression.
    pub async fn get_services(&self, query: Option<Value>) -> Result<Vec<Value>, GatewayError> {
        self.collection(Resource::Service, SERVICES_ENDPOINT, SERVICE_COLUMNS, query)
            .await
    }

    pub async fn add_host_comment(&self, comment: &HostComment) -> Result<(), GatewayError> {
        self.submit(Resource::Comment, HOST_COMMENT_ENDPOINT, comment).await
    }

    pub async fn add_service_comment(&self, comment: &ServiceComment) -> Result<(), GatewayError> {
        self.submit(Resource::Comment, SERVICE_COMMENT_ENDPOINT, comment).await
    }

    pub async fn add_host_acknowledgement(&self, acknowledgement: &HostAcknowledgement) -> Result<(), GatewayError> {
        self.submit(Resource::Acknowledgement, HOST_ACKNOWLEDGE_ENDPOINT, acknowledgement)
            .await
    }

    pub async fn add_service_acknowledgement(
        &self,
        acknowledgement: &ServiceAcknowledgement,
    ) -> Result<(), GatewayError> {
        self.submit(Resource::Acknowledgement, SERVICE_ACKNOWLEDGE_ENDPOINT, acknowledgement)
            .await
    }

    /// Acknowledges a host problem.
    ///
    /// # Errors
    ///
    /// [`GatewayError::AlreadyAcknowledged`] if the host is already
    /// acknowledged, otherwise [`GatewayError::NoProblem`] if it is UP. Both
    /// are returned before any request is sent.
    pub async fn acknowledge_host(
        &self,
        host: &Host,
        comment: &str,
        options: AcknowledgeOptions,
    ) -> Result<(), GatewayError> {
        if host.acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged {
                resource: Resource::Host,
                name: host.name().to_string(),
            });
        }
        if !host.problem() {
            return Err(GatewayError::NoProblem {
                resource: Resource::Host,
                name: host.name().to_string(),
            });
        }

        info!(host = host.name(), state:% = host.state(); "Acknowledging host problem");
        self.add_host_acknowledgement(&HostAcknowledgement::new(host.name(), comment, options))
            .await
    }

    /// Acknowledges a service problem. Same preconditions as
    /// [`acknowledge_host`](Self::acknowledge_host).
    pub async fn acknowledge_service(
        &self,
        service: &Service,
        comment: &str,
        options: AcknowledgeOptions,
    ) -> Result<(), GatewayError> {
        if service.acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged {
                resource: Resource::Service,
                name: service.description().to_string(),
            });
        }
        if !service.problem() {
            return Err(GatewayError::NoProblem {
                resource: Resource::Service,
                name: service.description().to_string(),
            });
        }

        info!(
            host = service.host_name(),
            service = service.description(),
            state:% = service.state();
            "Acknowledging service problem"
        );
        self.add_service_acknowledgement(&ServiceAcknowledgement::new(
            service.host_name(),
            service.description(),
            comment,
            options,
        ))
        .await
    }

    /// Closes the underlying transport session.
    pub async fn close(&self) -> Result<(), HttpError> {
        self.transport.close().await
    }

    async fn collection(
        &self,
        resource: Resource,
        endpoint: &str,
        columns: &[&str],
        query: Option<Value>,
    ) -> Result<Vec<Value>, GatewayError> {
        let body = ColumnsRequest::new(columns).with_query(query);
        let response = self.post(resource, endpoint, &body).await?;

        let items = extract_values(resource, response)?;
        debug!(resource:% = resource, count = items.len(); "Fetched collection");
        Ok(items)
    }

    async fn submit<T: Serialize>(&self, resource: Resource, endpoint: &str, body: &T) -> Result<(), GatewayError> {
        self.post(resource, endpoint, body).await.map(|_| ())
    }

    async fn post<T: Serialize>(&self, resource: Resource, endpoint: &str, body: &T) -> Result<Payload, GatewayError> {
        let fetch_error = |source| GatewayError::Fetch { resource, source };

        let body = serde_json::to_value(body).map_err(|e| fetch_error(HttpError::JsonError(e)))?;
        let spec = RequestSpec::new(Route::post(self.base_url.as_str(), endpoint)).json(body);
        let response = self.transport.execute(spec).await.map_err(fetch_error)?;
        Ok(response.payload)
    }
}

fn extract_values(resource: Resource, payload: Payload) -> Result<Vec<Value>, GatewayError> {
    let raw = payload.to_text();
    match payload {
        Payload::Json(Value::Object(mut object)) => match object.remove("value") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(GatewayError::Parse {
                resource,
                message: "\"value\" is not an array".to_string(),
                raw,
            }),
            None => Err(GatewayError::Parse {
                resource,
                message: "response has no \"value\" field".to_string(),
                raw,
            }),
        },
        Payload::Json(_) => Err(GatewayError::Parse {
            resource,
            message: "response is not a JSON object".to_string(),
            raw,
        }),
        Payload::Text(_) => Err(GatewayError::Parse {
            resource,
            message: "response is not JSON".to_string(),
            raw,
        }),
    }
}
