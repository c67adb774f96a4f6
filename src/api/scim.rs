//! SCIM 2.0 provisioning, sessions and enterprise SSO.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiRequest, Transport};
use crate::models::{
    CreateOidcProviderRequest, OidcProvider, ScimGroup, ScimListQuery, ScimListResponse,
    ScimPatchOperation, ScimTokenWithSecret, ScimUser, SsoCheckResponse, UpdateOidcProviderRequest,
    SCIM_PATCH_SCHEMA,
};
use crate::Result;

/// Service for SCIM 2.0 resources and the related organization settings.
///
/// The `/scim/v2` endpoints expect a SCIM bearer token (see
/// [`create_token`](Self::create_token)) rather than a user session.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::{ScimListQuery, ScimPatchOperation};
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let page = client
///     .scim()
///     .list_users(&ScimListQuery::filter(r#"userName eq "jane""#))
///     .await?;
///
/// if let Some(user) = page.resources.first() {
///     let id = user.id.clone().unwrap_or_default();
///     client
///         .scim()
///         .patch_user(&id, &[ScimPatchOperation::replace("active", serde_json::json!(false))])
///         .await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct ScimService {
    inner: Arc<Transport>,
}

#[derive(Serialize)]
struct PatchRequest<'a> {
    schemas: [&'static str; 1],
    #[serde(rename = "Operations")]
    operations: &'a [ScimPatchOperation],
}

impl<'a> PatchRequest<'a> {
    fn new(operations: &'a [ScimPatchOperation]) -> Self {
        Self {
            schemas: [SCIM_PATCH_SCHEMA],
            operations,
        }
    }
}

impl ScimService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Service provider configuration.
    pub async fn get_config(&self) -> Result<Value> {
        self.inner.get("/scim/v2/ServiceProviderConfig").await
    }

    /// Supported resource types.
    pub async fn get_resource_types(&self) -> Result<Value> {
        self.inner.get("/scim/v2/ResourceTypes").await
    }

    /// Supported schemas.
    pub async fn get_schemas(&self) -> Result<Value> {
        self.inner.get("/scim/v2/Schemas").await
    }

    /// List users.
    pub async fn list_users(&self, query: &ScimListQuery) -> Result<ScimListResponse<ScimUser>> {
        self.inner.get_with_query("/scim/v2/Users", query).await
    }

    /// Provision a user.
    pub async fn create_user(&self, user: &ScimUser) -> Result<ScimUser> {
        self.inner.post("/scim/v2/Users", user).await
    }

    /// Get a user.
    pub async fn get_user(&self, user_id: &str) -> Result<ScimUser> {
        self.inner.get(&format!("/scim/v2/Users/{}", user_id)).await
    }

    /// Replace every attribute of a user.
    pub async fn replace_user(&self, user_id: &str, user: &ScimUser) -> Result<ScimUser> {
        self.inner
            .put(&format!("/scim/v2/Users/{}", user_id), user)
            .await
    }

    /// Apply PATCH operations to a user.
    pub async fn patch_user(&self, user_id: &str, operations: &[ScimPatchOperation]) -> Result<ScimUser> {
        self.inner
            .patch(
                &format!("/scim/v2/Users/{}", user_id),
                &PatchRequest::new(operations),
            )
            .await
    }

    /// Deprovision a user.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.inner.delete(&format!("/scim/v2/Users/{}", user_id)).await
    }

    /// List groups.
    pub async fn list_groups(&self, query: &ScimListQuery) -> Result<ScimListResponse<ScimGroup>> {
        self.inner.get_with_query("/scim/v2/Groups", query).await
    }

    /// Create a group.
    pub async fn create_group(&self, group: &ScimGroup) -> Result<ScimGroup> {
        self.inner.post("/scim/v2/Groups", group).await
    }

    /// Get a group.
    pub async fn get_group(&self, group_id: &str) -> Result<ScimGroup> {
        self.inner.get(&format!("/scim/v2/Groups/{}", group_id)).await
    }

    /// Apply PATCH operations to a group, typically member changes.
    pub async fn patch_group(
        &self,
        group_id: &str,
        operations: &[ScimPatchOperation],
    ) -> Result<ScimGroup> {
        self.inner
            .patch(
                &format!("/scim/v2/Groups/{}", group_id),
                &PatchRequest::new(operations),
            )
            .await
    }

    /// Delete a group.
    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("/scim/v2/Groups/{}", group_id))
            .await
    }

    /// List an organization's SCIM tokens.
    pub async fn list_tokens(&self, org_id: &str) -> Result<Value> {
        self.inner.get(&tokens_path(org_id)).await
    }

    /// Create a SCIM token. The secret is only in this reply.
    pub async fn create_token(
        &self,
        org_id: &str,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ScimTokenWithSecret> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            expires_at: Option<DateTime<Utc>>,
        }

        self.inner
            .post(&tokens_path(org_id), &Request { name, expires_at })
            .await
    }

    /// Revoke a SCIM token.
    pub async fn revoke_token(&self, org_id: &str, token_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("{}/{}", tokens_path(org_id), token_id))
            .await
    }

    /// List active sessions, optionally of one user.
    pub async fn list_sessions(&self, user_id: Option<&str>) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/sessions").query_param("user_id", user_id))
            .await
    }

    /// Revoke one session.
    pub async fn revoke_session(&self, session_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("/api/sessions/{}", session_id))
            .await
    }

    /// Revoke every session of the current user.
    pub async fn revoke_all_sessions(&self) -> Result<Value> {
        self.inner.post_empty("/api/sessions/revoke-all").await
    }

    /// List a tenant's OIDC providers.
    pub async fn list_oidc_providers(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/oidc/providers").query_param("tenant_id", Some(tenant_id)))
            .await
    }

    /// Register an upstream OIDC provider.
    pub async fn create_oidc_provider(&self, provider: &CreateOidcProviderRequest) -> Result<OidcProvider> {
        self.inner.post("/api/oidc/providers", provider).await
    }

    /// Update an OIDC provider.
    pub async fn update_oidc_provider(
        &self,
        provider_id: &str,
        changes: &UpdateOidcProviderRequest,
    ) -> Result<OidcProvider> {
        self.inner
            .patch(&format!("/api/oidc/providers/{}", provider_id), changes)
            .await
    }

    /// Remove an OIDC provider.
    pub async fn delete_oidc_provider(&self, provider_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("/api/oidc/providers/{}", provider_id))
            .await
    }

    /// Providers shown on a tenant's login page. No authentication needed.
    pub async fn list_public_providers(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .send(
                ApiRequest::get("/api/oidc/providers/public")
                    .query_param("tenant_id", Some(tenant_id)),
            )
            .await
    }

    /// Preset configurations for well-known providers.
    pub async fn list_provider_templates(&self) -> Result<Value> {
        self.inner.get("/api/oidc/templates").await
    }

    /// One provider preset.
    pub async fn get_provider_template(&self, provider_type: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/oidc/templates/{}", provider_type))
            .await
    }

    /// Find out whether an email address should log in through SSO.
    pub async fn sso_check(&self, email: &str) -> Result<SsoCheckResponse> {
        self.inner
            .send(ApiRequest::get("/api/oidc/sso-check").query_param("email", Some(email)))
            .await
    }
}

fn tokens_path(org_id: &str) -> String {
    format!("/api/organizations/{}/scim/tokens", org_id)
}
