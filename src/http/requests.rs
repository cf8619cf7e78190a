//! Request bodies sent to the Checkmk REST API.

use serde::Serialize;
use serde_json::{Value, json};

/// Columns requested for every host.
pub const HOST_COLUMNS: &[&str] = &[
    "name",
    "state",
    "last_check",
    "acknowledged",
    "acknowledgement_type",
    "comments_with_extra_info",
    "custom_variables",
];

/// Columns requested for every service. These match the flat fields decoded by
/// [`ServiceRecord`](crate::models::ServiceRecord).
pub const SERVICE_COLUMNS: &[&str] = &[
    "host_name",
    "description",
    "state",
    "last_state",
    "last_state_change",
    "last_hard_state",
    "last_check",
    "next_check",
    "acknowledged",
    "acknowledgement_type",
    "check_command",
    "check_command_expanded",
    "check_interval",
    "check_period",
    "check_type",
    "checks_enabled",
    "has_been_checked",
    "is_executing",
    "max_check_attempts",
    "retry_interval",
    "is_flapping",
    "flap_detection_enabled",
    "flappiness",
    "percent_state_change",
    "notifications_enabled",
    "last_notification",
    "next_notification",
    "notification_interval",
    "notification_period",
    "execution_time",
    "latency",
    "perf_data",
    "plugin_output",
    "long_plugin_output",
    "comments_with_extra_info",
    "scheduled_downtime_depth",
    "custom_variables",
    "host_tags",
    "labels",
    "tags",
    "notes",
    "notes_url",
];

/// Body of a `collections/all` query.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsRequest {
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

impl ColumnsRequest {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: Option<Value>) -> Self {
        self.query = query;
        self
    }
}

/// A Livestatus equality filter, e.g. `host_name = web01`.
pub fn equals_query(column: &str, value: &str) -> Value {
    json!({ "op": "=", "left": column, "right": value })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostComment {
    pub host_name: String,
    pub comment: String,
    pub persistent: bool,
    pub comment_type: &'static str,
}

impl HostComment {
    pub fn new(host_name: impl Into<String>, comment: impl Into<String>, persistent: bool) -> Self {
        Self {
            host_name: host_name.into(),
            comment: comment.into(),
            persistent,
            comment_type: "host",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceComment {
    pub host_name: String,
    pub service_description: String,
    pub comment: String,
    pub persistent: bool,
    pub comment_type: &'static str,
}

impl ServiceComment {
    pub fn new(
        host_name: impl Into<String>,
        service_description: impl Into<String>,
        comment: impl Into<String>,
        persistent: bool,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            service_description: service_description.into(),
            comment: comment.into(),
            persistent,
            comment_type: "service",
        }
    }
}

/// Flags shared by host and service acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgeOptions {
    /// Keep the acknowledgement until the object returns to OK/UP.
    pub sticky: bool,
    /// Keep the acknowledgement comment across core restarts.
    pub persistent: bool,
    /// Send an acknowledgement notification.
    pub notify: bool,
}

impl Default for AcknowledgeOptions {
    fn default() -> Self {
        Self {
            sticky: true,
            persistent: false,
            notify: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostAcknowledgement {
    pub host_name: String,
    pub sticky: bool,
    pub persistent: bool,
    pub notify: bool,
    pub comment: String,
    pub acknowledge_type: &'static str,
}

impl HostAcknowledgement {
    pub fn new(host_name: impl Into<String>, comment: impl Into<String>, options: AcknowledgeOptions) -> Self {
        Self {
            host_name: host_name.into(),
            sticky: options.sticky,
            persistent: options.persistent,
            notify: options.notify,
            comment: comment.into(),
            acknowledge_type: "host",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAcknowledgement {
    pub host_name: String,
    pub service_description: String,
    pub sticky: bool,
    pub persistent: bool,
    pub notify: bool,
    pub comment: String,
    pub acknowledge_type: &'static str,
}

impl ServiceAcknowledgement {
    pub fn new(
        host_name: impl Into<String>,
        service_description: impl Into<String>,
        comment: impl Into<String>,
        options: AcknowledgeOptions,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            service_description: service_description.into(),
            sticky: options.sticky,
            persistent: options.persistent,
            notify: options.notify,
            comment: comment.into(),
            acknowledge_type: "service",
        }
    }
}
