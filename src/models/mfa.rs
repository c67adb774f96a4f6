//! Multi-factor authentication models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Result of starting TOTP enrollment.
///
/// The `secret` and `qr_code_uri` are shown to the user once; the method
/// stays unverified until a code is confirmed with `verify_totp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MfaEnrollResponse {
    /// Id of the pending method
    #[serde(default)]
    pub method_id: Option<String>,
    /// `totp`
    #[serde(default)]
    pub method_type: Option<String>,
    /// Base32 shared secret
    #[serde(default)]
    pub secret: Option<String>,
    /// `otpauth://` URI for authenticator apps
    #[serde(default)]
    pub qr_code_uri: Option<String>,
    /// One-time recovery codes
    #[serde(default, deserialize_with = "null_as_default")]
    pub backup_codes: Vec<String>,
}

/// Result of starting SMS enrollment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsMfaEnrollResponse {
    /// Id of the pending method
    #[serde(default)]
    pub method_id: Option<String>,
    /// `sms`
    #[serde(default)]
    pub method_type: Option<String>,
    /// Number the code was sent to
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Number with the middle digits hidden
    #[serde(default)]
    pub masked_phone: Option<String>,
    /// When the sent code expires
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// An enrolled MFA method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MfaMethod {
    /// Method id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning user
    #[serde(default)]
    pub user_id: Option<String>,
    /// `totp` or `sms`
    #[serde(default)]
    pub method_type: Option<String>,
    /// Whether a code has been confirmed for this method
    #[serde(default)]
    pub verified: Option<bool>,
    /// User supplied label
    #[serde(default)]
    pub name: Option<String>,
    /// Enrollment time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last successful verification
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Freshly generated backup codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupCodesResponse {
    /// The new codes; previous codes stop working
    #[serde(default, deserialize_with = "null_as_default")]
    pub backup_codes: Vec<String>,
}
