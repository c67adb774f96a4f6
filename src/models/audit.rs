//! Audit log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Filters for `GET /api/audit/logs`.
///
/// Every field is optional; unset filters are left out of the query string.
///
/// # Example
///
/// ```
/// use coreauth_rs::models::AuditLogQuery;
///
/// let query = AuditLogQuery::new()
///     .tenant("tenant-1")
///     .event_types("user.login,user.logout")
///     .limit(50);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogQuery {
    /// Tenant id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Comma separated event types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<String>,
    /// Only events performed by this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Inclusive lower bound, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Records to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl AuditLogQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one tenant.
    pub fn tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Restrict to the given event types (comma separated).
    pub fn event_types(mut self, event_types: impl Into<String>) -> Self {
        self.event_types = Some(event_types.into());
        self
    }

    /// Restrict to one acting user.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restrict to a time window.
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start.to_rfc3339());
        self.end_date = Some(end.to_rfc3339());
        self
    }

    /// Page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of records to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// A single audit record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Dotted event name, e.g. `user.login`
    #[serde(default)]
    pub event_type: Option<String>,
    /// `authentication`, `authorization`, `user_management`, ...
    #[serde(default)]
    pub event_category: Option<String>,
    /// Action within the category
    #[serde(default)]
    pub event_action: Option<String>,
    /// `user`, `application` or `system`
    #[serde(default)]
    pub actor_type: Option<String>,
    /// Id of the actor
    #[serde(default)]
    pub actor_id: Option<String>,
    /// Display name of the actor
    #[serde(default)]
    pub actor_name: Option<String>,
    /// Client IP address
    #[serde(default)]
    pub actor_ip_address: Option<String>,
    /// Client user agent
    #[serde(default)]
    pub actor_user_agent: Option<String>,
    /// Kind of the affected resource
    #[serde(default)]
    pub target_type: Option<String>,
    /// Id of the affected resource
    #[serde(default)]
    pub target_id: Option<String>,
    /// Name of the affected resource
    #[serde(default)]
    pub target_name: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Arbitrary metadata
    #[serde(default)]
    pub metadata: Option<Value>,
    /// `success`, `failure` or `error`
    #[serde(default)]
    pub status: Option<String>,
    /// Failure detail
    #[serde(default)]
    pub error_message: Option<String>,
    /// Correlation id of the request
    #[serde(default)]
    pub request_id: Option<String>,
    /// Session the event belongs to
    #[serde(default)]
    pub session_id: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A page of audit records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogsResponse {
    /// Records on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<AuditLog>,
    /// Total matching records
    #[serde(default)]
    pub total: i64,
    /// Page size
    #[serde(default)]
    pub limit: i64,
    /// Records to skip
    #[serde(default)]
    pub offset: i64,
}

impl AuditLogsResponse {
    /// Whether records remain after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.logs.len() as i64) < self.total
    }
}
