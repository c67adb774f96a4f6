//! Tenant (organization) service.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::Transport;
use crate::models::{BrandingSettings, CreateTenantRequest, CreateTenantResponse, SecuritySettings};
use crate::Result;

/// Service for organizations, their users and their policies.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::{CreateTenantRequest, SecuritySettings};
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let created = client
///     .tenants()
///     .create(&CreateTenantRequest::new("Acme", "acme", "admin@acme.test", "s3cret!"))
///     .await?;
///
/// let org_id = created.tenant_id.unwrap_or_default();
/// client
///     .tenants()
///     .update_security(
///         &org_id,
///         &SecuritySettings {
///             mfa_required: Some(true),
///             ..Default::default()
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct TenantsService {
    inner: Arc<Transport>,
}

impl TenantsService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Create an organization together with its first administrator.
    pub async fn create(&self, request: &CreateTenantRequest) -> Result<CreateTenantResponse> {
        self.inner.post("/api/tenants", request).await
    }

    /// Look an organization up by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/organizations/by-slug/{}", slug))
            .await
    }

    /// List the users of a tenant.
    pub async fn list_users(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/tenants/{}/users", tenant_id))
            .await
    }

    /// Change a user's role within a tenant.
    pub async fn update_user_role(&self, tenant_id: &str, user_id: &str, role: &str) -> Result<Value> {
        self.inner
            .put(
                &format!("/api/tenants/{}/users/{}/role", tenant_id, user_id),
                &json!({ "role": role }),
            )
            .await
    }

    /// Read the security policy.
    pub async fn get_security(&self, org_id: &str) -> Result<SecuritySettings> {
        self.inner
            .get(&format!("/api/organizations/{}/security", org_id))
            .await
    }

    /// Update the security policy. Unset fields keep their value.
    pub async fn update_security(
        &self,
        org_id: &str,
        settings: &SecuritySettings,
    ) -> Result<SecuritySettings> {
        self.inner
            .put(&format!("/api/organizations/{}/security", org_id), settings)
            .await
    }

    /// Read the branding.
    pub async fn get_branding(&self, org_id: &str) -> Result<BrandingSettings> {
        self.inner
            .get(&format!("/api/organizations/{}/branding", org_id))
            .await
    }

    /// Update the branding. Unset fields keep their value.
    pub async fn update_branding(
        &self,
        org_id: &str,
        settings: &BrandingSettings,
    ) -> Result<BrandingSettings> {
        self.inner
            .put(&format!("/api/organizations/{}/branding", org_id), settings)
            .await
    }
}
