//! Platform administration models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tenant as seen by the platform router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantRegistryEntry {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// URL-safe identifier
    #[serde(default)]
    pub slug: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// `active`, `suspended` or `provisioning`
    #[serde(default)]
    pub status: Option<String>,
    /// `shared` or `dedicated`
    #[serde(default)]
    pub isolation_mode: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tenant counts across the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRouterStats {
    /// All registered tenants
    #[serde(default)]
    pub total_tenants: i64,
    /// Tenants currently serving traffic
    #[serde(default)]
    pub active_tenants: i64,
    /// Tenants on the shared database
    #[serde(default)]
    pub shared_tenants: i64,
    /// Tenants with their own database
    #[serde(default)]
    pub dedicated_tenants: i64,
}

/// Result of probing a tenant's database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,
    /// Human readable result
    #[serde(default)]
    pub message: String,
    /// Round trip time of the connection test
    #[serde(default)]
    pub latency_ms: Option<i64>,
}

/// A server-side hook run on a trigger such as `post_login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// `pre_login`, `post_login`, `pre_registration`, ...
    #[serde(default)]
    pub trigger_type: Option<String>,
    /// Source code of the action
    #[serde(default)]
    pub code: Option<String>,
    /// Execution runtime
    #[serde(default)]
    pub runtime: Option<String>,
    /// Run time limit
    #[serde(default)]
    pub timeout_seconds: Option<i32>,
    /// Enabled flag
    #[serde(default)]
    pub is_enabled: Option<bool>,
    /// Runs so far
    #[serde(default)]
    pub total_executions: Option<i64>,
    /// Failed runs so far
    #[serde(default)]
    pub total_failures: Option<i64>,
    /// Most recent run
    #[serde(default)]
    pub last_executed_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Optional fields for action creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateActionOptions {
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Execution runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Run time limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    /// Values exposed to the action at run time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<HashMap<String, String>>,
    /// Position among actions on the same trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_order: Option<i32>,
}

/// Changes to an action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActionRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source code of the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Execution runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Run time limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    /// Values exposed to the action at run time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<HashMap<String, String>>,
    /// Position among actions on the same trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_order: Option<i32>,
    /// Enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

/// A recorded action run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionExecution {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Action that ran
    #[serde(default)]
    pub action_id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Trigger the action runs on
    #[serde(default)]
    pub trigger_type: Option<String>,
    /// User id
    #[serde(default)]
    pub user_id: Option<String>,
    /// `success`, `failure` or `timeout`
    #[serde(default)]
    pub status: Option<String>,
    /// Run time
    #[serde(default)]
    pub execution_time_ms: Option<i64>,
    /// Trigger payload
    #[serde(default)]
    pub input_data: Option<Value>,
    /// Action output
    #[serde(default)]
    pub output_data: Option<Value>,
    /// Failure detail
    #[serde(default)]
    pub error_message: Option<String>,
    /// When the action ran
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
}

/// Result of a dry run of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTestResponse {
    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,
    /// Output of the action
    #[serde(default)]
    pub data: Option<Value>,
    /// Error message, if the run failed
    #[serde(default)]
    pub error: Option<String>,
}

/// Service health.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when healthy
    #[serde(default)]
    pub status: String,
    /// Server version
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthResponse {
    /// Whether the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}
