//! Group and invitation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional fields for group creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGroupOptions {
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the group in an external directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Changes to a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A group of users within a tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Id in the external directory
    #[serde(default)]
    pub external_id: Option<String>,
    /// Number of members
    #[serde(default)]
    pub member_count: Option<i64>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Membership of a user in a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// User id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Group id
    #[serde(default)]
    pub group_id: Option<String>,
    /// `member` or `owner`
    #[serde(default)]
    pub role: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// When the user joined
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

/// A role granted to every member of a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupRole {
    /// Role id
    #[serde(default)]
    pub role_id: Option<String>,
    /// Group id
    #[serde(default)]
    pub group_id: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional fields for an invitation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInvitationOptions {
    /// Role assigned when the invitation is accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    /// Copied onto the new user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Validity window, server default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

/// A pending or settled invitation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Role id
    #[serde(default)]
    pub role_id: Option<String>,
    /// `pending`, `accepted`, `revoked` or `expired`
    #[serde(default)]
    pub status: Option<String>,
    /// Id of the inviting user
    #[serde(default)]
    pub invited_by: Option<String>,
    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for accepting an invitation and creating the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceptInvitationRequest {
    /// Token from the invitation email
    pub token: String,
    /// Password for the new account
    pub password: String,
    /// Display name for the new account
    pub full_name: String,
    /// Arbitrary metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
