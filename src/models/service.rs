//! Service entities.
//!
//! The API returns a service as one flat map of Livestatus columns. Decoding
//! happens in two steps: serde fills a [`ServiceRecord`] with the flat columns,
//! then `From<ServiceRecord>` regroups them into the [`ServiceDetails`] a
//! [`Service`] exposes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::de::{flag, timestamp};
use super::{Comment, DomainObject, Link, ServiceState, decode_object};
use crate::error::ClientError;
use crate::http::{AcknowledgeOptions, CheckmkApi, GatewayError, Resource, ServiceComment};

pub type Tags = BTreeMap<String, String>;

/// The flat service columns, one field per entry in
/// [`SERVICE_COLUMNS`](crate::http::SERVICE_COLUMNS).
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecord {
    pub host_name: String,
    pub description: String,
    pub state: ServiceState,
    #[serde(default)]
    pub last_state: Option<ServiceState>,
    #[serde(default, deserialize_with = "timestamp")]
    pub last_state_change: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_hard_state: Option<ServiceState>,
    #[serde(default, deserialize_with = "timestamp")]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub next_check: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flag")]
    pub acknowledged: Option<bool>,
    #[serde(default)]
    pub acknowledgement_type: Option<i64>,
    #[serde(default)]
    pub check_command: Option<String>,
    #[serde(default)]
    pub check_command_expanded: Option<String>,
    #[serde(default)]
    pub check_interval: Option<f64>,
    #[serde(default)]
    pub check_period: Option<String>,
    #[serde(default)]
    pub check_type: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub checks_enabled: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub has_been_checked: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub is_executing: Option<bool>,
    #[serde(default)]
    pub max_check_attempts: Option<i64>,
    #[serde(default)]
    pub retry_interval: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub is_flapping: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub flap_detection_enabled: Option<bool>,
    #[serde(default)]
    pub flappiness: Option<f64>,
    #[serde(default)]
    pub percent_state_change: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub notifications_enabled: Option<bool>,
    #[serde(default, deserialize_with = "timestamp")]
    pub last_notification: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub next_notification: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notification_interval: Option<f64>,
    #[serde(default)]
    pub notification_period: Option<String>,
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub latency: Option<f64>,
    #[serde(default)]
    pub perf_data: Option<String>,
    #[serde(default)]
    pub plugin_output: Option<String>,
    #[serde(default)]
    pub long_plugin_output: Option<String>,
    #[serde(default)]
    pub comments_with_extra_info: Option<Vec<Comment>>,
    #[serde(default)]
    pub scheduled_downtime_depth: Option<i64>,
    #[serde(default)]
    pub custom_variables: Option<Tags>,
    #[serde(default)]
    pub host_tags: Option<Tags>,
    #[serde(default)]
    pub labels: Option<Tags>,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub notes_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInfo {
    pub check_command: Option<String>,
    pub check_command_expanded: Option<String>,
    pub check_interval: Option<f64>,
    pub check_period: Option<String>,
    pub check_type: Option<i64>,
    pub checks_enabled: Option<bool>,
    pub has_been_checked: Option<bool>,
    pub is_executing: Option<bool>,
    pub last_check: Option<DateTime<Utc>>,
    pub max_check_attempts: Option<i64>,
    pub next_check: Option<DateTime<Utc>>,
    pub retry_interval: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateHistory {
    pub state: ServiceState,
    pub last_state: Option<ServiceState>,
    pub last_state_change: Option<DateTime<Utc>>,
    pub last_hard_state: Option<ServiceState>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlappingInfo {
    pub is_flapping: Option<bool>,
    pub flap_detection_enabled: Option<bool>,
    pub flappiness: Option<f64>,
    pub percent_state_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationInfo {
    pub notifications_enabled: Option<bool>,
    pub last_notification: Option<DateTime<Utc>>,
    pub next_notification: Option<DateTime<Utc>>,
    pub notification_interval: Option<f64>,
    pub notification_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceInfo {
    pub execution_time: Option<f64>,
    pub latency: Option<f64>,
    pub perf_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputInfo {
    pub plugin_output: Option<String>,
    pub long_plugin_output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DowntimeCommentInfo {
    pub comments: Vec<Comment>,
    pub scheduled_downtime_depth: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomData {
    pub custom_variables: Option<Tags>,
    pub host_tags: Option<Tags>,
    pub labels: Option<Tags>,
    pub tags: Option<Tags>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotesInfo {
    pub notes: Option<String>,
    pub notes_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcknowledgementInfo {
    pub acknowledged: bool,
    pub acknowledgement_type: Option<i64>,
}

/// Service columns grouped by concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetails {
    pub host_name: String,
    pub description: String,
    pub check: CheckInfo,
    pub state_history: StateHistory,
    pub flapping: FlappingInfo,
    pub notification: NotificationInfo,
    pub performance: PerformanceInfo,
    pub output: OutputInfo,
    pub downtime_comment: DowntimeCommentInfo,
    pub custom_data: CustomData,
    pub notes: NotesInfo,
    pub acknowledgement: AcknowledgementInfo,
}

impl From<ServiceRecord> for ServiceDetails {
    fn from(record: ServiceRecord) -> Self {
        Self {
            host_name: record.host_name,
            description: record.description,
            check: CheckInfo {
                check_command: record.check_command,
                check_command_expanded: record.check_command_expanded,
                check_interval: record.check_interval,
                check_period: record.check_period,
                check_type: record.check_type,
                checks_enabled: record.checks_enabled,
                has_been_checked: record.has_been_checked,
                is_executing: record.is_executing,
                last_check: record.last_check,
                max_check_attempts: record.max_check_attempts,
                next_check: record.next_check,
                retry_interval: record.retry_interval,
            },
            state_history: StateHistory {
                state: record.state,
                last_state: record.last_state,
                last_state_change: record.last_state_change,
                last_hard_state: record.last_hard_state,
            },
            flapping: FlappingInfo {
                is_flapping: record.is_flapping,
                flap_detection_enabled: record.flap_detection_enabled,
                flappiness: record.flappiness,
                percent_state_change: record.percent_state_change,
            },
            notification: NotificationInfo {
                notifications_enabled: record.notifications_enabled,
                last_notification: record.last_notification,
                next_notification: record.next_notification,
                notification_interval: record.notification_interval,
                notification_period: record.notification_period,
            },
            performance: PerformanceInfo {
                execution_time: record.execution_time,
                latency: record.latency,
                perf_data: record.perf_data,
            },
            output: OutputInfo {
                plugin_output: record.plugin_output,
                long_plugin_output: record.long_plugin_output,
            },
            downtime_comment: DowntimeCommentInfo {
                comments: record.comments_with_extra_info.unwrap_or_default(),
                scheduled_downtime_depth: record.scheduled_downtime_depth,
            },
            custom_data: CustomData {
                custom_variables: record.custom_variables,
                host_tags: record.host_tags,
                labels: record.labels,
                tags: record.tags,
            },
            notes: NotesInfo {
                notes: record.notes,
                notes_url: record.notes_url,
            },
            acknowledgement: AcknowledgementInfo {
                acknowledged: record.acknowledged.unwrap_or(false),
                acknowledgement_type: record.acknowledgement_type,
            },
        }
    }
}

/// A monitored service.
#[derive(Clone)]
pub struct Service {
    pub domain_type: String,
    pub id: String,
    pub title: String,
    pub links: Vec<Link>,
    pub details: ServiceDetails,
    api: Arc<CheckmkApi>,
}

impl Service {
    pub fn new(object: DomainObject<ServiceRecord>, api: Arc<CheckmkApi>) -> Self {
        Self {
            domain_type: object.domain_type,
            id: object.id,
            title: object.title,
            links: object.links,
            details: object.extensions.into(),
            api,
        }
    }

    pub(crate) fn decode_all(api: &Arc<CheckmkApi>, values: Vec<Value>) -> Result<Vec<Service>, ClientError> {
        values
            .into_iter()
            .map(|value| decode_object(Resource::Service, value).map(|object| Service::new(object, api.clone())))
            .collect()
    }

    pub fn host_name(&self) -> &str {
        &self.details.host_name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn state(&self) -> ServiceState {
        self.details.state_history.state
    }

    pub fn problem(&self) -> bool {
        self.state().is_problem()
    }

    pub fn acknowledged(&self) -> bool {
        self.details.acknowledgement.acknowledged
    }

    pub fn acknowledgement_type(&self) -> Option<i64> {
        self.details.acknowledgement.acknowledgement_type
    }

    pub fn last_check(&self) -> Option<DateTime<Utc>> {
        self.details.check.last_check
    }

    pub fn comments(&self) -> &[Comment] {
        &self.details.downtime_comment.comments
    }

    pub fn tags(&self) -> Option<&Tags> {
        self.details.custom_data.tags.as_ref()
    }

    pub fn host_tags(&self) -> Option<&Tags> {
        self.details.custom_data.host_tags.as_ref()
    }

    pub fn custom_variables(&self) -> Option<&Tags> {
        self.details.custom_data.custom_variables.as_ref()
    }

    /// Acknowledges the current service problem. Preconditions are checked
    /// before any request is sent.
    pub async fn acknowledge(&self, comment: &str, options: AcknowledgeOptions) -> Result<(), GatewayError> {
        self.api.acknowledge_service(self, comment, options).await
    }

    pub async fn add_comment(&self, comment: &str, persistent: bool) -> Result<ServiceComment, GatewayError> {
        let data = ServiceComment::new(self.host_name(), self.description(), comment, persistent);
        self.api.add_service_comment(&data).await?;
        Ok(data)
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("details", &self.details)
            .finish_non_exhaustive()
    }
}
