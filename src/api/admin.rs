//! Platform administration service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::Transport;
use crate::models::{
    Action, ActionTestResponse, ConnectionTestResult, CreateActionOptions, HealthResponse,
    TenantRegistryEntry, TenantRouterStats, UpdateActionRequest,
};
use crate::Result;

/// Service for the tenant registry, actions, rate limits, token claims and
/// health.
///
/// Most of these endpoints require a platform administrator token.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// if client.admin().health().await?.is_healthy() {
///     let stats = client.admin().get_stats().await?;
///     println!("{} tenants", stats.total_tenants);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AdminService {
    inner: Arc<Transport>,
}

impl AdminService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// List registered tenants.
    pub async fn list_tenants(&self) -> Result<Value> {
        self.inner.get("/api/admin/tenants").await
    }

    /// Register a tenant with the router.
    ///
    /// `isolation_mode` is `shared` or `dedicated`; the server default
    /// applies when unset.
    pub async fn create_tenant(
        &self,
        slug: &str,
        name: &str,
        isolation_mode: Option<&str>,
    ) -> Result<TenantRegistryEntry> {
        #[derive(Serialize)]
        struct Request<'a> {
            slug: &'a str,
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            isolation_mode: Option<&'a str>,
        }

        self.inner
            .post(
                "/api/admin/tenants",
                &Request {
                    slug,
                    name,
                    isolation_mode,
                },
            )
            .await
    }

    /// Tenant counts.
    pub async fn get_stats(&self) -> Result<TenantRouterStats> {
        self.inner.get("/api/admin/tenants/stats").await
    }

    /// Get one registry entry.
    pub async fn get_tenant(&self, tenant_id: &str) -> Result<TenantRegistryEntry> {
        self.inner.get(&tenant_path(tenant_id)).await
    }

    /// Point a dedicated tenant at its database.
    pub async fn configure_database(&self, tenant_id: &str, connection_string: &str) -> Result<Value> {
        self.inner
            .post(
                &format!("{}/database", tenant_path(tenant_id)),
                &json!({ "connection_string": connection_string }),
            )
            .await
    }

    /// Start routing traffic to a tenant.
    pub async fn activate(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .post_empty(&format!("{}/activate", tenant_path(tenant_id)))
            .await
    }

    /// Stop routing traffic to a tenant.
    pub async fn suspend(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .post_empty(&format!("{}/suspend", tenant_path(tenant_id)))
            .await
    }

    /// Probe a tenant's database.
    pub async fn test_connection(&self, tenant_id: &str) -> Result<ConnectionTestResult> {
        self.inner
            .post_empty(&format!("{}/test-connection", tenant_path(tenant_id)))
            .await
    }

    /// Create an action on a trigger.
    pub async fn create_action(
        &self,
        org_id: &str,
        name: &str,
        trigger_type: &str,
        code: &str,
        options: CreateActionOptions,
    ) -> Result<Action> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            trigger_type: &'a str,
            code: &'a str,
            #[serde(flatten)]
            options: CreateActionOptions,
        }

        self.inner
            .post(
                &actions_path(org_id),
                &Request {
                    name,
                    trigger_type,
                    code,
                    options,
                },
            )
            .await
    }

    /// List an organization's actions.
    pub async fn list_actions(&self, org_id: &str) -> Result<Value> {
        self.inner.get(&actions_path(org_id)).await
    }

    /// Get an action.
    pub async fn get_action(&self, org_id: &str, action_id: &str) -> Result<Action> {
        self.inner.get(&action_path(org_id, action_id)).await
    }

    /// Update an action.
    pub async fn update_action(
        &self,
        org_id: &str,
        action_id: &str,
        changes: &UpdateActionRequest,
    ) -> Result<Action> {
        self.inner.put(&action_path(org_id, action_id), changes).await
    }

    /// Delete an action.
    pub async fn delete_action(&self, org_id: &str, action_id: &str) -> Result<()> {
        self.inner.delete(&action_path(org_id, action_id)).await
    }

    /// Run an action against a sample trigger context without side effects.
    pub async fn test_action(
        &self,
        org_id: &str,
        action_id: &str,
        context: &Value,
    ) -> Result<ActionTestResponse> {
        self.inner
            .post(&format!("{}/test", action_path(org_id, action_id)), context)
            .await
    }

    /// Run history of one action.
    pub async fn get_action_executions(&self, org_id: &str, action_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/executions", action_path(org_id, action_id)))
            .await
    }

    /// Run history of every action in an organization.
    pub async fn get_org_executions(&self, org_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/executions", actions_path(org_id)))
            .await
    }

    /// Read a tenant's rate limits.
    pub async fn get_rate_limits(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/tenants/{}/rate-limits", tenant_id))
            .await
    }

    /// Replace a tenant's rate limits.
    pub async fn update_rate_limits(&self, tenant_id: &str, config: &Value) -> Result<Value> {
        self.inner
            .put(&format!("/api/tenants/{}/rate-limits", tenant_id), config)
            .await
    }

    /// Read the custom claims added to an application's tokens.
    pub async fn get_token_claims(&self, tenant_id: &str, app_id: &str) -> Result<Value> {
        self.inner.get(&claims_path(tenant_id, app_id)).await
    }

    /// Replace the custom claims added to an application's tokens.
    pub async fn update_token_claims(&self, tenant_id: &str, app_id: &str, config: &Value) -> Result<Value> {
        self.inner.put(&claims_path(tenant_id, app_id), config).await
    }

    /// Service health. Needs no token.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.inner.get("/health").await
    }
}

fn tenant_path(tenant_id: &str) -> String {
    format!("/api/admin/tenants/{}", tenant_id)
}

fn actions_path(org_id: &str) -> String {
    format!("/api/organizations/{}/actions", org_id)
}

fn action_path(org_id: &str, action_id: &str) -> String {
    format!("{}/{}", actions_path(org_id), action_id)
}

fn claims_path(tenant_id: &str, app_id: &str) -> String {
    format!("/api/tenants/{}/applications/{}/token-claims", tenant_id, app_id)
}
