//! Audit log service.

use std::sync::Arc;

use serde_json::Value;

use crate::client::Transport;
use crate::models::{AuditLog, AuditLogQuery, AuditLogsResponse};
use crate::Result;

/// Service for reading audit and security logs.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::AuditLogQuery;
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let page = client
///     .audit()
///     .query(&AuditLogQuery::new().tenant("t1").event_types("user.login").limit(50))
///     .await?;
/// for log in &page.logs {
///     println!("{:?} {:?}", log.created_at, log.event_type);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AuditService {
    inner: Arc<Transport>,
}

impl AuditService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Search audit logs. Unset filters are not sent.
    pub async fn query(&self, query: &AuditLogQuery) -> Result<AuditLogsResponse> {
        self.inner.get_with_query("/api/audit/logs", query).await
    }

    /// Get one audit log entry.
    pub async fn get(&self, log_id: &str) -> Result<AuditLog> {
        self.inner.get(&format!("/api/audit/logs/{}", log_id)).await
    }

    /// Recent security-relevant events.
    pub async fn security_events(&self) -> Result<Value> {
        self.inner.get("/api/audit/security-events").await
    }

    /// Failed login attempts of a user.
    pub async fn failed_logins(&self, user_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/audit/failed-logins/{}", user_id))
            .await
    }

    /// Export audit logs.
    pub async fn export(&self) -> Result<Value> {
        self.inner.get("/api/audit/export").await
    }

    /// Aggregate counts over the audit log.
    pub async fn stats(&self) -> Result<Value> {
        self.inner.get("/api/audit/stats").await
    }

    /// Login history of the current user.
    pub async fn login_history(&self) -> Result<Value> {
        self.inner.get("/api/login-history").await
    }

    /// Security audit log of the current organization.
    pub async fn security_audit_logs(&self) -> Result<Value> {
        self.inner.get("/api/security/audit-logs").await
    }
}
