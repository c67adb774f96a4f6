//! Authentication, profile and self-service flow models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Tokens returned by login, refresh and passwordless verification.
///
/// When the account must complete or enroll a second factor the server
/// answers with a `status` of `mfa_required` (carrying a `challenge_token`)
/// or `mfa_enrollment_required` (carrying an `enrollment_token`) instead of
/// a usable token pair. The token fields decode to empty strings in that
/// case. Fields this record does not name are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Outcome tag: `success`, `mfa_required` or `mfa_enrollment_required`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Bearer access token
    #[serde(default)]
    pub access_token: String,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: String,
    /// Token type, normally `Bearer`
    #[serde(default)]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
    /// The authenticated user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    /// Whether a second factor must be completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_required: Option<bool>,
    /// Challenge token for the MFA step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_token: Option<String>,
    /// Challenge token for the MFA step, as issued by the login endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_token: Option<String>,
    /// Token for enrolling a factor before a session is issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_token: Option<String>,
    /// Factors the user may answer the challenge with
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// Human-readable explanation from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other fields of the reply
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl AuthResponse {
    /// Whether the login is waiting on a second factor.
    pub fn requires_mfa(&self) -> bool {
        self.mfa_required.unwrap_or(false)
            || self.status.as_deref() == Some("mfa_required")
            || self.challenge_token.is_some()
    }

    /// Whether the account must enroll a factor before logging in.
    pub fn requires_mfa_enrollment(&self) -> bool {
        self.status.as_deref() == Some("mfa_enrollment_required")
            || self.enrollment_token.is_some()
    }

    /// The token to present when answering the MFA challenge.
    pub fn mfa_challenge(&self) -> Option<&str> {
        self.challenge_token
            .as_deref()
            .or(self.mfa_token.as_deref())
    }
}

/// Profile metadata attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Full display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Preferred language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// IANA time zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Tenant-defined custom attributes
    #[serde(flatten)]
    pub custom: serde_json::Map<String, Value>,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id
    pub id: String,
    /// Primary email
    pub email: String,
    /// Whether the email address was confirmed
    #[serde(default)]
    pub email_verified: bool,
    /// Phone number, if one is on file
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the phone number was confirmed
    #[serde(default)]
    pub phone_verified: bool,
    /// Profile metadata
    #[serde(default)]
    pub metadata: UserMetadata,
    /// Organization the user logs into by default
    #[serde(default)]
    pub default_tenant_id: Option<String>,
    /// Whether the account is enabled
    #[serde(default)]
    pub is_active: bool,
    /// Whether at least one MFA method is active
    #[serde(default)]
    pub mfa_enabled: bool,
    /// Last successful login
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields accepted by `PATCH /api/auth/me`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Full display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Preferred language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// IANA time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Reply to a passwordless start request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordlessStartResponse {
    /// Whether a code was sent
    #[serde(default)]
    pub success: Option<bool>,
    /// Human readable status
    #[serde(default)]
    pub message: String,
    /// `email` or `sms`
    #[serde(default)]
    pub delivery_method: Option<String>,
    /// Masked address the code was sent to, e.g. `j***@example.com`
    #[serde(default)]
    pub masked_destination: Option<String>,
    /// Identifies the pending token in resend requests
    #[serde(default)]
    pub token_id: Option<String>,
    /// Lifetime of the code in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiry of the code
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Options for `passwordless/resend`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordlessResendRequest {
    /// Token id from [`PasswordlessStartResponse::token_id`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    /// Email address to resend to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The current self-service session (`/sessions/whoami`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session id
    pub id: String,
    /// Whether the session is still valid
    #[serde(default)]
    pub active: Option<bool>,
    /// The identity behind the session
    #[serde(default)]
    pub identity: Option<Value>,
    /// When the session was established
    #[serde(default)]
    pub authenticated_at: Option<DateTime<Utc>>,
    /// Session expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Methods used to establish the session
    #[serde(default, deserialize_with = "null_as_default")]
    pub authentication_methods: Vec<Value>,
}

/// Fields submitted with a login flow, alongside the flow id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginFlowSubmit {
    /// `password`, `oidc`, `totp`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// CSRF token for browser flows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// Email or username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Password for the `password` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Social provider for the `oidc` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Enterprise connection to authenticate against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Code for the `totp` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_code: Option<String>,
}

/// Fields submitted with a registration flow, alongside the flow id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationFlowSubmit {
    /// `password` or `oidc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// CSRF token for browser flows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// Email to register
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Password for the `password` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Display name for the new account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Social provider for the `oidc` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Enterprise connection to authenticate against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}
