//! Authentication service: credentials, profile, passwords and self-service flows.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{ApiRequest, Transport};
use crate::models::{
    AuthResponse, LoginFlowSubmit, PasswordlessResendRequest, PasswordlessStartResponse,
    RegistrationFlowSubmit, SessionResponse, UpdateProfileRequest, UserProfile,
};
use crate::Result;

/// Service for end-user authentication.
///
/// Methods here do not touch the client's stored token; use
/// [`CoreAuthClient::login`](crate::CoreAuthClient::login) to log in and keep
/// the token in one step.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let tokens = client.auth().login("tenant-1", "jane@example.com", "hunter2").await?;
/// if tokens.requires_mfa() {
///     println!("second factor needed");
/// }
///
/// client.auth().forgot_password("tenant-1", "jane@example.com").await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthService {
    inner: Arc<Transport>,
}

#[derive(Serialize)]
struct FlowSubmission<'a, T> {
    flow: &'a str,
    #[serde(flatten)]
    fields: &'a T,
}

#[derive(Serialize)]
struct FlowQuery<'a> {
    organization_id: Option<&'a str>,
    request_id: Option<&'a str>,
}

impl AuthService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Register a new user in a tenant.
    pub async fn register(
        &self,
        tenant_id: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Request<'a> {
            tenant_id: &'a str,
            email: &'a str,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            phone: Option<&'a str>,
        }

        self.inner
            .post(
                "/api/auth/register",
                &Request {
                    tenant_id,
                    email,
                    password,
                    phone,
                },
            )
            .await
    }

    /// Log in with email and password.
    pub async fn login(&self, tenant_id: &str, email: &str, password: &str) -> Result<AuthResponse> {
        self.inner
            .post(
                "/api/auth/login",
                &json!({
                    "tenant_id": tenant_id,
                    "email": email,
                    "password": password,
                }),
            )
            .await
    }

    /// Log in without knowing the tenant id up front.
    ///
    /// The server resolves the organization from `organization_slug`, or from
    /// the user's default organization when no slug is given.
    pub async fn login_hierarchical(
        &self,
        email: &str,
        password: &str,
        organization_slug: Option<&str>,
    ) -> Result<AuthResponse> {
        #[derive(Serialize)]
        struct Request<'a> {
            email: &'a str,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            organization_slug: Option<&'a str>,
        }

        self.inner
            .post(
                "/api/auth/login-hierarchical",
                &Request {
                    email,
                    password,
                    organization_slug,
                },
            )
            .await
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse> {
        self.inner
            .post("/api/auth/refresh", &json!({ "refresh_token": refresh_token }))
            .await
    }

    /// End the server-side session of the current token.
    pub async fn logout(&self) -> Result<()> {
        self.inner.send_unit(ApiRequest::post("/api/auth/logout")).await
    }

    /// Get the authenticated user's profile.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.inner.get("/api/auth/me").await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(&self, changes: &UpdateProfileRequest) -> Result<UserProfile> {
        self.inner.patch("/api/auth/me", changes).await
    }

    /// Change the password of the authenticated user.
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<Value> {
        self.inner
            .post(
                "/api/auth/change-password",
                &json!({
                    "current_password": current_password,
                    "new_password": new_password,
                }),
            )
            .await
    }

    /// Confirm an email address with the token from the verification email.
    pub async fn verify_email(&self, token: &str) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/verify-email").query_param("token", Some(token)))
            .await
    }

    /// Send the verification email again.
    pub async fn resend_verification(&self) -> Result<Value> {
        self.inner.post_empty("/api/auth/resend-verification").await
    }

    /// Start a password reset.
    pub async fn forgot_password(&self, tenant_id: &str, email: &str) -> Result<Value> {
        self.inner
            .post(
                "/api/auth/forgot-password",
                &json!({ "tenant_id": tenant_id, "email": email }),
            )
            .await
    }

    /// Check that a password reset token is still valid.
    pub async fn verify_reset_token(&self, token: &str) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/auth/verify-reset-token").query_param("token", Some(token)))
            .await
    }

    /// Set a new password using a reset token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Value> {
        self.inner
            .post(
                "/api/auth/reset-password",
                &json!({ "token": token, "new_password": new_password }),
            )
            .await
    }

    /// Send a magic link or one-time code.
    ///
    /// `method` is `magic_link` or `otp`.
    pub async fn passwordless_start(
        &self,
        tenant_id: &str,
        method: &str,
        email: &str,
    ) -> Result<PasswordlessStartResponse> {
        self.inner
            .post(
                &format!("/api/tenants/{}/passwordless/start", tenant_id),
                &json!({ "method": method, "email": email }),
            )
            .await
    }

    /// Complete passwordless login with the link token or the code.
    pub async fn passwordless_verify(&self, tenant_id: &str, token_or_code: &str) -> Result<AuthResponse> {
        self.inner
            .post(
                &format!("/api/tenants/{}/passwordless/verify", tenant_id),
                &json!({ "token_or_code": token_or_code }),
            )
            .await
    }

    /// Send the pending passwordless code again.
    pub async fn passwordless_resend(
        &self,
        tenant_id: &str,
        request: &PasswordlessResendRequest,
    ) -> Result<Value> {
        self.inner
            .post(&format!("/api/tenants/{}/passwordless/resend", tenant_id), request)
            .await
    }

    /// Start a browser login flow.
    ///
    /// The server may answer with a redirect, which surfaces as
    /// [`Error::Api`](crate::Error::Api) unless redirects are followed.
    pub async fn create_login_flow_browser(
        &self,
        organization_id: Option<&str>,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.create_flow("/self-service/login/browser", organization_id, request_id)
            .await
    }

    /// Start a login flow for native or API clients.
    pub async fn create_login_flow_api(
        &self,
        organization_id: Option<&str>,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.create_flow("/self-service/login/api", organization_id, request_id)
            .await
    }

    /// Fetch a login flow by id.
    pub async fn get_login_flow(&self, flow_id: &str) -> Result<Value> {
        self.get_flow("/self-service/login", flow_id).await
    }

    /// Submit credentials to a login flow.
    pub async fn submit_login_flow(&self, flow_id: &str, fields: &LoginFlowSubmit) -> Result<Value> {
        self.inner
            .post(
                "/self-service/login",
                &FlowSubmission {
                    flow: flow_id,
                    fields,
                },
            )
            .await
    }

    /// Start a browser registration flow.
    pub async fn create_registration_flow_browser(&self, organization_id: Option<&str>) -> Result<Value> {
        self.create_flow("/self-service/registration/browser", organization_id, None)
            .await
    }

    /// Start a registration flow for native or API clients.
    pub async fn create_registration_flow_api(&self, organization_id: Option<&str>) -> Result<Value> {
        self.create_flow("/self-service/registration/api", organization_id, None)
            .await
    }

    /// Fetch a registration flow by id.
    pub async fn get_registration_flow(&self, flow_id: &str) -> Result<Value> {
        self.get_flow("/self-service/registration", flow_id).await
    }

    /// Submit traits and credentials to a registration flow.
    pub async fn submit_registration_flow(
        &self,
        flow_id: &str,
        fields: &RegistrationFlowSubmit,
    ) -> Result<Value> {
        self.inner
            .post(
                "/self-service/registration",
                &FlowSubmission {
                    flow: flow_id,
                    fields,
                },
            )
            .await
    }

    /// Get the session behind the current token.
    pub async fn whoami(&self) -> Result<SessionResponse> {
        self.inner.get("/sessions/whoami").await
    }

    async fn create_flow(
        &self,
        path: &str,
        organization_id: Option<&str>,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.inner
            .get_with_query(
                path,
                &FlowQuery {
                    organization_id,
                    request_id,
                },
            )
            .await
    }

    async fn get_flow(&self, path: &str, flow_id: &str) -> Result<Value> {
        self.inner
            .send(ApiRequest::get(path).query_param("flow", Some(flow_id)))
            .await
    }
}
