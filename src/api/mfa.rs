//! MFA service.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::{ApiRequest, Transport};
use crate::models::{BackupCodesResponse, MfaEnrollResponse, SmsMfaEnrollResponse};
use crate::Result;

/// Service for TOTP and SMS second factors of the current user.
///
/// The `*_with_token` variants are used during login, when the account must
/// enroll a factor before it receives a session; they authenticate with the
/// enrollment token instead of a bearer token.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let enrollment = client.mfa().enroll_totp().await?;
/// println!("Scan {:?}", enrollment.qr_code_uri);
///
/// let method_id = enrollment.method_id.unwrap_or_default();
/// client.mfa().verify_totp(&method_id, "123456").await?;
/// # Ok(())
/// # }
/// ```
pub struct MfaService {
    inner: Arc<Transport>,
}

impl MfaService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Start TOTP enrollment.
    pub async fn enroll_totp(&self) -> Result<MfaEnrollResponse> {
        self.inner.post_empty("/api/mfa/enroll/totp").await
    }

    /// Confirm a TOTP method with a code from the authenticator.
    pub async fn verify_totp(&self, method_id: &str, code: &str) -> Result<Value> {
        self.inner
            .post(&format!("/api/mfa/totp/{}/verify", method_id), &json!({ "code": code }))
            .await
    }

    /// Start SMS enrollment; a code is sent to `phone_number`.
    pub async fn enroll_sms(&self, phone_number: &str) -> Result<SmsMfaEnrollResponse> {
        self.inner
            .post("/api/mfa/enroll/sms", &json!({ "phone_number": phone_number }))
            .await
    }

    /// Confirm an SMS method with the received code.
    pub async fn verify_sms(&self, method_id: &str, code: &str) -> Result<Value> {
        self.inner
            .post(&format!("/api/mfa/sms/{}/verify", method_id), &json!({ "code": code }))
            .await
    }

    /// Send the SMS code again.
    pub async fn resend_sms(&self, method_id: &str) -> Result<Value> {
        self.inner
            .post_empty(&format!("/api/mfa/sms/{}/resend", method_id))
            .await
    }

    /// List the current user's MFA methods.
    pub async fn list_methods(&self) -> Result<Value> {
        self.inner.get("/api/mfa/methods").await
    }

    /// Remove an MFA method.
    pub async fn delete_method(&self, method_id: &str) -> Result<()> {
        self.inner.delete(&format!("/api/mfa/methods/{}", method_id)).await
    }

    /// Replace the backup codes.
    pub async fn regenerate_backup_codes(&self) -> Result<BackupCodesResponse> {
        self.inner.post_empty("/api/mfa/backup-codes/regenerate").await
    }

    /// Start TOTP enrollment during login.
    pub async fn enroll_totp_with_token(&self, enrollment_token: &str) -> Result<MfaEnrollResponse> {
        self.inner
            .post(
                "/api/mfa/enroll-with-token/totp",
                &json!({ "enrollment_token": enrollment_token }),
            )
            .await
    }

    /// Confirm TOTP enrollment during login.
    ///
    /// On success the reply carries the session tokens.
    pub async fn verify_totp_with_token(
        &self,
        method_id: &str,
        enrollment_token: &str,
        code: &str,
    ) -> Result<Value> {
        self.inner
            .send(
                ApiRequest::post(format!("/api/mfa/verify-with-token/totp/{}", method_id)).json(
                    &json!({
                        "enrollment_token": enrollment_token,
                        "code": code,
                    }),
                )?,
            )
            .await
    }
}
