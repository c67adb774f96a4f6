//! Tenant (organization) models.

use serde::{Deserialize, Serialize};

/// Body for `POST /api/tenants`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    /// Display name
    pub name: String,
    /// URL-safe identifier, unique across the platform
    pub slug: String,
    /// Email of the first administrator
    pub admin_email: String,
    /// Password of the first administrator
    pub admin_password: String,
    /// Display name of the first administrator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_full_name: Option<String>,
    /// `personal` or `business`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// `shared` or `dedicated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolation_mode: Option<String>,
}

impl CreateTenantRequest {
    /// A request with the required fields set.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        admin_email: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            admin_email: admin_email.into(),
            admin_password: admin_password.into(),
            ..Default::default()
        }
    }
}

/// Reply to tenant creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTenantResponse {
    /// Id of the new tenant
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Name of the new tenant
    #[serde(default)]
    pub tenant_name: Option<String>,
    /// Id of the first administrator
    #[serde(default)]
    pub admin_user_id: Option<String>,
    /// Status message
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the administrator must confirm their email first
    #[serde(default)]
    pub email_verification_required: Option<bool>,
    /// Isolation mode that was applied
    #[serde(default)]
    pub isolation_mode: Option<String>,
    /// Whether a dedicated database must still be configured
    #[serde(default)]
    pub database_setup_required: Option<bool>,
}

/// Organization security policy.
///
/// Used both to read the policy and to update it; on update only the fields
/// that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Require MFA for every user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_required: Option<bool>,
    /// Minimum password length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_min_length: Option<i32>,
    /// Failed logins before lockout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_login_attempts: Option<i32>,
    /// Lockout length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockout_duration_minutes: Option<i32>,
    /// Idle session lifetime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout_hours: Option<i32>,
    /// Block login until the email is confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_email_verification: Option<bool>,
    /// Password must contain an uppercase letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_require_uppercase: Option<bool>,
    /// Password must contain a lowercase letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_require_lowercase: Option<bool>,
    /// Password must contain a digit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_require_number: Option<bool>,
    /// Password must contain a symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_require_special: Option<bool>,
    /// Disable password login in favour of SSO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_sso: Option<bool>,
}

/// Organization branding for hosted pages and emails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingSettings {
    /// Logo image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Hex color, e.g. `#4f46e5`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Favicon for hosted pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    /// Stylesheet injected into hosted pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Product name shown to users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Page background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Terms of service link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_url: Option<String>,
    /// Privacy policy link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_url: Option<String>,
    /// Support link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
}
