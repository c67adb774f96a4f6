//! Application, OAuth client and email template models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// A registered application (OAuth client).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Application id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant for tenant-scoped applications
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Organization for org-scoped OAuth apps
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// URL-safe identifier
    #[serde(default)]
    pub slug: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Logo shown on consent screens
    #[serde(default)]
    pub logo_url: Option<String>,
    /// `spa`, `web`, `native` or `m2m`
    #[serde(default)]
    pub app_type: Option<String>,
    /// Public client identifier
    #[serde(default)]
    pub client_id: Option<String>,
    /// Allowed redirect URIs
    #[serde(default, deserialize_with = "null_as_default")]
    pub callback_urls: Vec<String>,
    /// Allowed post-logout redirect URIs
    #[serde(default, deserialize_with = "null_as_default")]
    pub logout_urls: Vec<String>,
    /// Allowed CORS origins
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_origins: Vec<String>,
    /// Enabled OAuth2 grants
    #[serde(default, deserialize_with = "null_as_default")]
    pub grant_types: Vec<String>,
    /// Enabled response types
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_types: Vec<String>,
    /// Scopes the client may request
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_scopes: Vec<String>,
    /// Whether the client can be used
    #[serde(default)]
    pub is_enabled: Option<bool>,
    /// First-party clients skip the consent screen
    #[serde(default)]
    pub is_first_party: Option<bool>,
    /// Access token lifetime
    #[serde(default)]
    pub access_token_lifetime_seconds: Option<i64>,
    /// Refresh token lifetime
    #[serde(default)]
    pub refresh_token_lifetime_seconds: Option<i64>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An application together with its plaintext client secret.
///
/// Returned once on creation and secret rotation; the server does not store
/// the plaintext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWithSecret {
    /// The application record
    #[serde(flatten)]
    pub application: Application,
    /// The client secret
    #[serde(default, alias = "client_secret")]
    pub client_secret_plain: Option<String>,
}

/// Optional fields for tenant-scoped application creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateApplicationOptions {
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arbitrary metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Changes to a tenant-scoped application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement redirect URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,
    /// Replacement scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_scopes: Option<Vec<String>>,
    /// Enable or disable the application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Replacement metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Optional fields for org-scoped OAuth app creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOAuthAppOptions {
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logo image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Allowed post-logout redirect URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_urls: Option<Vec<String>>,
    /// Allowed CORS origins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_origins: Option<Vec<String>>,
    /// Access token lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime_seconds: Option<i64>,
    /// Refresh token lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime_seconds: Option<i64>,
    /// Enabled OAuth2 grants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_types: Option<Vec<String>>,
    /// Scopes the client may request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_scopes: Option<Vec<String>>,
}

/// Changes to an org-scoped OAuth app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOAuthAppRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logo image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Allowed redirect URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_urls: Option<Vec<String>>,
    /// Allowed post-logout redirect URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_urls: Option<Vec<String>>,
    /// Allowed CORS origins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_origins: Option<Vec<String>>,
    /// Connections users of this app may log in with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_connections: Option<Vec<String>>,
    /// Require an organization context at login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_organization: Option<bool>,
    /// Access token lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime_seconds: Option<i64>,
    /// Refresh token lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime_seconds: Option<i64>,
    /// Enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

/// A transactional email template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// `verification`, `password_reset`, `invitation`, ...
    #[serde(default)]
    pub template_type: Option<String>,
    /// Email subject line
    #[serde(default)]
    pub subject: Option<String>,
    /// HTML body
    #[serde(default)]
    pub html_body: Option<String>,
    /// Plain text body
    #[serde(default)]
    pub text_body: Option<String>,
    /// Placeholders available to the template
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Vec<String>,
    /// `false` while the platform default is in use
    #[serde(default)]
    pub is_custom: Option<bool>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Changes to an email template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmailTemplateRequest {
    /// Email subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Plain text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
}

/// Unsaved template content to render in a preview.
///
/// Fields left empty fall back to the stored template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewTemplateRequest {
    /// Draft subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Draft HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Draft plain text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
}
