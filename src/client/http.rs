//! The main CoreAuth client.

use std::sync::Arc;

use crate::api::{
    AdminService, ApplicationsService, AuditService, AuthService, ConnectionsService,
    FgaService, GroupsService, MfaService, OAuth2Service, ScimService, TenantsService,
    WebhooksService,
};
use crate::models::AuthResponse;
use crate::Result;

use super::config::ClientConfig;
use super::transport::Transport;

/// The main client for interacting with the CoreAuth API.
///
/// The client owns a single [`Transport`] (connection pool plus bearer
/// credential) and hands out lightweight service handles that share it.
/// Cloning the client is cheap and every clone shares the same credential.
/// The connection pool is released when the last clone is dropped or
/// [`close`](Self::close)d.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::CoreAuthClient;
///
/// # async fn example() -> coreauth_rs::Result<()> {
/// let client = CoreAuthClient::new("http://localhost:3000")?;
///
/// let tokens = client.auth().login("my-tenant", "user@example.com", "password").await?;
/// client.set_token(&tokens.access_token);
///
/// let profile = client.auth().get_profile().await?;
/// println!("Logged in as {}", profile.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CoreAuthClient {
    pub(crate) inner: Arc<Transport>,
}

impl CoreAuthClient {
    /// Create an unauthenticated client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, None, ClientConfig::default())
    }

    /// Create a client that starts with a bearer token.
    pub fn with_token(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, Some(token.into()), ClientConfig::default())
    }

    /// Create a client with an optional token and custom configuration.
    pub fn with_config(
        base_url: &str,
        token: Option<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let transport = Transport::configure(base_url, token, config)?;
        Ok(Self {
            inner: Arc::new(transport),
        })
    }

    /// Authentication, password and self-service flows.
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.inner.clone())
    }

    /// OAuth2 and OpenID Connect endpoints.
    pub fn oauth2(&self) -> OAuth2Service {
        OAuth2Service::new(self.inner.clone())
    }

    /// Multi-factor authentication enrollment and verification.
    pub fn mfa(&self) -> MfaService {
        MfaService::new(self.inner.clone())
    }

    /// Tenant (organization) management.
    pub fn tenants(&self) -> TenantsService {
        TenantsService::new(self.inner.clone())
    }

    /// Applications, OAuth apps and email templates.
    pub fn applications(&self) -> ApplicationsService {
        ApplicationsService::new(self.inner.clone())
    }

    /// Fine-grained authorization: tuples, checks, stores, models and keys.
    pub fn fga(&self) -> FgaService {
        FgaService::new(self.inner.clone())
    }

    /// Audit logs.
    pub fn audit(&self) -> AuditService {
        AuditService::new(self.inner.clone())
    }

    /// Webhooks and their deliveries.
    pub fn webhooks(&self) -> WebhooksService {
        WebhooksService::new(self.inner.clone())
    }

    /// Groups, memberships and invitations.
    pub fn groups(&self) -> GroupsService {
        GroupsService::new(self.inner.clone())
    }

    /// SCIM 2.0 provisioning, sessions and OIDC providers.
    pub fn scim(&self) -> ScimService {
        ScimService::new(self.inner.clone())
    }

    /// Platform administration.
    pub fn admin(&self) -> AdminService {
        AdminService::new(self.inner.clone())
    }

    /// Authentication connections (SSO, social, database).
    pub fn connections(&self) -> ConnectionsService {
        ConnectionsService::new(self.inner.clone())
    }

    /// The underlying transport, for endpoints without a service wrapper.
    pub fn transport(&self) -> &Transport {
        &self.inner
    }

    /// The normalized base address.
    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Set the bearer token for all subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.set_token(token);
    }

    /// Remove the bearer token.
    pub fn clear_token(&self) {
        self.inner.clear_token();
    }

    /// Log in with email and password and keep the returned access token.
    ///
    /// When the server asks for a second factor no access token is issued and
    /// the stored credential is left untouched; check
    /// [`AuthResponse::requires_mfa`].
    pub async fn login(&self, tenant_id: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let response = self.auth().login(tenant_id, email, password).await?;
        self.keep_token(&response);
        Ok(response)
    }

    /// Exchange a refresh token and keep the new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse> {
        let response = self.auth().refresh_token(refresh_token).await?;
        self.keep_token(&response);
        Ok(response)
    }

    /// End the server-side session and clear the local token.
    ///
    /// The token is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.auth().logout().await;
        self.clear_token();
        result
    }

    fn keep_token(&self, response: &AuthResponse) {
        if response.access_token.is_empty() {
            tracing::debug!("No access token in response, keeping current credential");
        } else {
            self.set_token(&response.access_token);
        }
    }

    /// Close this handle.
    ///
    /// The connection pool is released once every clone of the client has
    /// been closed or dropped.
    pub fn close(self) {
        drop(self);
    }
}

impl std::fmt::Debug for CoreAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreAuthClient")
            .field("base_url", &self.inner.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = CoreAuthClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(
            format!("{:?}", client),
            "CoreAuthClient { base_url: \"http://localhost:3000\" }"
        );
    }

    #[test]
    fn test_clones_share_credential() {
        let client = CoreAuthClient::new("http://localhost:3000").unwrap();
        let other = client.clone();

        client.set_token("abc");
        assert!(other.transport().has_token());

        other.clear_token();
        assert!(!client.transport().has_token());
    }

    #[test]
    fn test_close_releases_last_handle() {
        let client = CoreAuthClient::with_token("http://localhost:3000", "abc").unwrap();
        let weak = Arc::downgrade(&client.inner);
        let other = client.clone();

        client.close();
        assert!(weak.upgrade().is_some());

        other.close();
        assert!(weak.upgrade().is_none());
    }
}
