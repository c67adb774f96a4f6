//! Authentication connection models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An authentication connection (OIDC, SAML, social or database).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection id
    pub id: String,
    /// Display name
    pub name: String,
    /// `oidc`, `saml`, `social` or `database`
    pub connection_type: String,
    /// `organization` or `platform`
    pub scope: String,
    /// Owning organization for org-scoped connections
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Provider specific settings
    #[serde(default)]
    pub config: Value,
    /// Whether the connection can be used to log in
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn enabled() -> bool {
    true
}

/// Body for creating a connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateConnectionRequest {
    /// Display name
    pub name: String,
    /// `oidc`, `saml`, `social` or `database`
    pub connection_type: String,
    /// Provider specific settings
    #[serde(default)]
    pub config: Value,
}

/// Changes to a connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConnectionRequest {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// Enable or disable the connection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

/// A login method offered to an organization's users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthMethod {
    /// Backing connection
    pub connection_id: String,
    /// Label shown on the login page
    pub name: String,
    /// Kind of method
    pub method_type: String,
    /// `organization` or `platform`
    pub scope: String,
}
