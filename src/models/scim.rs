//! SCIM 2.0 resources, SCIM tokens, sessions and OIDC provider models.
//!
//! SCIM resources use the camelCase attribute names from RFC 7643.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Core schema URN for users.
pub const SCIM_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// Core schema URN for groups.
pub const SCIM_GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
/// Message schema URN for PATCH requests.
pub const SCIM_PATCH_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";

/// A user's name components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimName {
    /// Full name, formatted for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
}

/// A multi-valued attribute entry such as an email or phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimMultiValue {
    /// The address or number
    pub value: String,
    /// `work`, `home`, ...
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Whether this is the primary value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

/// A SCIM user resource.
///
/// Used for both directions: as a response from the server and as the body
/// of create and replace requests, where read-only attributes are left
/// unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    /// Schema URNs
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id in the provisioning client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Unique login name
    #[serde(default)]
    pub user_name: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ScimName>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email addresses
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ScimMultiValue>,
    /// Phone numbers
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<ScimMultiValue>,
    /// Whether the user may log in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Write-only initial password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Groups the user belongs to (read-only)
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Value>,
    /// Resource metadata (read-only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ScimUser {
    /// A new user with the core schema and the given user name.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            schemas: vec![SCIM_USER_SCHEMA.to_string()],
            user_name: user_name.into(),
            active: Some(true),
            ..Default::default()
        }
    }

    /// Add a primary work email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(ScimMultiValue {
            value: email.into(),
            kind: Some("work".to_string()),
            primary: Some(true),
        });
        self
    }
}

/// A member reference inside a SCIM group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimMember {
    /// User id
    pub value: String,
    /// Display name of the member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// URI of the member resource
    #[serde(default, rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A SCIM group resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimGroup {
    /// Schema URNs
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    /// Unique id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id in the external directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Group members
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ScimMember>,
    /// Resource metadata (read-only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ScimGroup {
    /// A new group with the core schema.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            schemas: vec![SCIM_GROUP_SCHEMA.to_string()],
            display_name: display_name.into(),
            ..Default::default()
        }
    }
}

/// A page of SCIM resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimListResponse<T> {
    /// Schema URNs
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: Vec<String>,
    /// Total matching resources
    #[serde(rename = "totalResults", default)]
    pub total_results: i64,
    /// Resources on this page
    #[serde(rename = "itemsPerPage", default)]
    pub items_per_page: i64,
    /// 1-based index of the first resource on this page
    #[serde(rename = "startIndex", default)]
    pub start_index: i64,
    /// Resources on this page
    #[serde(rename = "Resources", default = "Vec::new")]
    pub resources: Vec<T>,
}

/// Filter and paging for SCIM list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScimListQuery {
    /// SCIM filter expression, e.g. `userName eq "jane"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// 1-based start index
    #[serde(rename = "startIndex", skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    /// Other SCIM list parameters, e.g. `sortBy` or `attributes`
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ScimListQuery {
    /// Query with a filter expression.
    pub fn filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Default::default()
        }
    }

    /// Add a parameter sent under its SCIM name.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// A single PATCH operation.
///
/// # Example
///
/// ```
/// use coreauth_rs::models::ScimPatchOperation;
///
/// let op = ScimPatchOperation::replace("active", serde_json::json!(false));
/// assert_eq!(op.op, "replace");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScimPatchOperation {
    /// `add`, `remove` or `replace`
    pub op: String,
    /// Attribute path; absent for whole-resource operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// New value; absent for `remove`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ScimPatchOperation {
    /// Add a value at `path`.
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "add".to_string(),
            path: Some(path.into()),
            value: Some(value),
        }
    }

    /// Replace the value at `path`.
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "replace".to_string(),
            path: Some(path.into()),
            value: Some(value),
        }
    }

    /// Remove the value at `path`.
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: "remove".to_string(),
            path: Some(path.into()),
            value: None,
        }
    }
}

/// A SCIM bearer token used by a provisioning client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimToken {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// First characters of the token, for identification
    #[serde(default)]
    pub token_prefix: Option<String>,
    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A newly created SCIM token with its secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimTokenWithSecret {
    /// Token metadata
    #[serde(flatten)]
    pub token: ScimToken,
    /// The bearer token; shown only once
    #[serde(default, alias = "token")]
    pub secret: Option<String>,
}

/// An active login session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// User id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Client IP address
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Client user agent
    #[serde(default)]
    pub user_agent: Option<String>,
    /// When the user authenticated
    #[serde(default)]
    pub authenticated_at: Option<DateTime<Utc>>,
    /// Last request on the session
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An upstream OpenID Connect identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OidcProvider {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// `google`, `azure_ad`, `okta`, `generic`, ...
    #[serde(default)]
    pub provider_type: Option<String>,
    /// Issuer identifier
    #[serde(default)]
    pub issuer: Option<String>,
    /// Client identifier
    #[serde(default)]
    pub client_id: Option<String>,
    /// Upstream authorization endpoint
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    /// Token endpoint
    #[serde(default)]
    pub token_endpoint: Option<String>,
    /// Userinfo endpoint
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    /// JWKS URL
    #[serde(default)]
    pub jwks_uri: Option<String>,
    /// Requested scopes
    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes: Vec<String>,
    /// Claim carrying the user's groups
    #[serde(default)]
    pub groups_claim: Option<String>,
    /// Upstream group to local role
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_role_mappings: HashMap<String, String>,
    /// Only members of this group may log in
    #[serde(default)]
    pub allowed_group_id: Option<String>,
    /// Enabled flag
    #[serde(default)]
    pub is_enabled: Option<bool>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for registering an OIDC provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOidcProviderRequest {
    /// Tenant id
    pub tenant_id: String,
    /// Display name
    pub name: String,
    /// Provider template
    pub provider_type: String,
    /// Issuer identifier
    pub issuer: String,
    /// Client identifier
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Upstream authorization endpoint
    pub authorization_endpoint: String,
    /// Token endpoint
    pub token_endpoint: String,
    /// Userinfo endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userinfo_endpoint: Option<String>,
    /// JWKS URL
    pub jwks_uri: String,
    /// Requested scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Claim carrying the user's groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_claim: Option<String>,
    /// Upstream group to local role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_role_mappings: Option<HashMap<String, String>>,
    /// Only members of this upstream group may log in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_group_id: Option<String>,
}

/// Changes to an OIDC provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOidcProviderRequest {
    /// Enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Result of an SSO discovery lookup for an email address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoCheckResponse {
    /// Whether the email's domain is bound to an SSO provider
    #[serde(default)]
    pub has_sso: bool,
    /// Matching providers
    #[serde(default, deserialize_with = "null_as_default")]
    pub providers: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scim_user_wire_names() {
        let user = ScimUser::new("jane").with_email("jane@example.com");
        let body = serde_json::to_value(&user).unwrap();

        assert_eq!(body["userName"], "jane");
        assert_eq!(body["schemas"][0], SCIM_USER_SCHEMA);
        assert_eq!(body["emails"][0]["type"], "work");
        assert!(body.get("id").is_none());
        assert!(body.get("phoneNumbers").is_none());
    }

    #[test]
    fn test_list_response() {
        let json = r#"{
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "totalResults": 1,
            "itemsPerPage": 1,
            "startIndex": 1,
            "Resources": [{"id": "u-1", "userName": "jane", "displayName": "Jane"}]
        }"#;

        let page: ScimListResponse<ScimUser> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_results, 1);
        assert_eq!(page.resources[0].user_name, "jane");
        assert_eq!(page.resources[0].display_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_list_query_start_index() {
        let query = ScimListQuery {
            count: Some(10),
            start_index: Some(11),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"count": 10, "startIndex": 11})
        );
    }

    #[test]
    fn test_list_query_extra_params() {
        let query = ScimListQuery::filter("active eq true")
            .param("sortBy", "userName")
            .param("attributes", "userName,emails");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({
                "filter": "active eq true",
                "sortBy": "userName",
                "attributes": "userName,emails"
            })
        );
    }

    #[test]
    fn test_patch_remove_has_no_value() {
        let op = serde_json::to_value(ScimPatchOperation::remove("members")).unwrap();
        assert_eq!(op, serde_json::json!({"op": "remove", "path": "members"}));
    }
}
