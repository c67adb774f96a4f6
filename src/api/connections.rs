//! Authentication connection service.

use std::sync::Arc;

use serde_json::Value;

use crate::client::Transport;
use crate::models::{Connection, CreateConnectionRequest, UpdateConnectionRequest};
use crate::Result;

/// Service for the SSO, social and database connections users log in with.
///
/// Organization connections are managed per org; platform connections are
/// shared by every organization and need an administrator token.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::CreateConnectionRequest;
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let connection = client
///     .connections()
///     .create(
///         "org-1",
///         &CreateConnectionRequest {
///             name: "Okta".into(),
///             connection_type: "oidc".into(),
///             config: serde_json::json!({ "issuer": "https://acme.okta.com" }),
///         },
///     )
///     .await?;
/// println!("created {}", connection.id);
/// # Ok(())
/// # }
/// ```
pub struct ConnectionsService {
    inner: Arc<Transport>,
}

impl ConnectionsService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Connections available to an organization, platform ones included.
    pub async fn list(&self, org_id: &str) -> Result<Value> {
        self.inner.get(&connections_path(org_id)).await
    }

    /// Create an organization connection.
    pub async fn create(&self, org_id: &str, request: &CreateConnectionRequest) -> Result<Connection> {
        self.inner.post(&connections_path(org_id), request).await
    }

    /// Get a connection.
    pub async fn get(&self, org_id: &str, connection_id: &str) -> Result<Connection> {
        self.inner
            .get(&format!("{}/{}", connections_path(org_id), connection_id))
            .await
    }

    /// Update a connection.
    pub async fn update(
        &self,
        org_id: &str,
        connection_id: &str,
        changes: &UpdateConnectionRequest,
    ) -> Result<Connection> {
        self.inner
            .put(&format!("{}/{}", connections_path(org_id), connection_id), changes)
            .await
    }

    /// Delete a connection.
    pub async fn delete(&self, org_id: &str, connection_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("{}/{}", connections_path(org_id), connection_id))
            .await
    }

    /// Login methods offered to an organization's users.
    pub async fn get_auth_methods(&self, org_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/auth-methods", connections_path(org_id)))
            .await
    }

    /// Every connection on the platform.
    pub async fn list_all(&self) -> Result<Value> {
        self.inner.get("/api/admin/connections").await
    }

    /// Create a platform connection.
    pub async fn create_platform(&self, request: &CreateConnectionRequest) -> Result<Connection> {
        self.inner.post("/api/admin/connections", request).await
    }
}

fn connections_path(org_id: &str) -> String {
    format!("/api/organizations/{}/connections", org_id)
}
