//! Webhook service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{ApiRequest, Transport};
use crate::models::{
    CreateWebhookOptions, DeliveryQuery, TestWebhookResponse, UpdateWebhookRequest, Webhook,
    WebhookDelivery, WebhookWithSecret,
};
use crate::Result;

/// Service for organization webhooks and their deliveries.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let hook = client
///     .webhooks()
///     .create(
///         "org-1",
///         "audit sink",
///         "https://hooks.example.com/coreauth",
///         &["user.created".to_string()],
///         true,
///         Default::default(),
///     )
///     .await?;
///
/// let id = hook.webhook.id.unwrap_or_default();
/// let result = client.webhooks().test("org-1", &id, None).await?;
/// println!("endpoint answered: {}", result.success);
/// # Ok(())
/// # }
/// ```
pub struct WebhooksService {
    inner: Arc<Transport>,
}

impl WebhooksService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Subscribe an endpoint to events.
    pub async fn create(
        &self,
        org_id: &str,
        name: &str,
        url: &str,
        events: &[String],
        is_enabled: bool,
        options: CreateWebhookOptions,
    ) -> Result<WebhookWithSecret> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            url: &'a str,
            events: &'a [String],
            is_enabled: bool,
            #[serde(flatten)]
            options: CreateWebhookOptions,
        }

        self.inner
            .post(
                &webhooks_path(org_id),
                &Request {
                    name,
                    url,
                    events,
                    is_enabled,
                    options,
                },
            )
            .await
    }

    /// List the webhooks of an organization.
    pub async fn list(&self, org_id: &str) -> Result<Value> {
        self.inner.get(&webhooks_path(org_id)).await
    }

    /// Get a webhook.
    pub async fn get(&self, org_id: &str, webhook_id: &str) -> Result<Webhook> {
        self.inner.get(&webhook_path(org_id, webhook_id)).await
    }

    /// Update a webhook.
    pub async fn update(
        &self,
        org_id: &str,
        webhook_id: &str,
        changes: &UpdateWebhookRequest,
    ) -> Result<Webhook> {
        self.inner.put(&webhook_path(org_id, webhook_id), changes).await
    }

    /// Delete a webhook.
    pub async fn delete(&self, org_id: &str, webhook_id: &str) -> Result<()> {
        self.inner.delete(&webhook_path(org_id, webhook_id)).await
    }

    /// Replace the signing secret.
    pub async fn rotate_secret(&self, org_id: &str, webhook_id: &str) -> Result<WebhookWithSecret> {
        self.inner
            .post_empty(&format!("{}/rotate-secret", webhook_path(org_id, webhook_id)))
            .await
    }

    /// Send a test event. Without `event_type` the request has no body and
    /// the server picks the event.
    pub async fn test(
        &self,
        org_id: &str,
        webhook_id: &str,
        event_type: Option<&str>,
    ) -> Result<TestWebhookResponse> {
        let mut request = ApiRequest::post(format!("{}/test", webhook_path(org_id, webhook_id)));
        if let Some(event_type) = event_type {
            request = request.json(&json!({ "event_type": event_type }))?;
        }
        self.inner.send(request).await
    }

    /// List deliveries, newest first.
    pub async fn list_deliveries(
        &self,
        org_id: &str,
        webhook_id: &str,
        query: &DeliveryQuery,
    ) -> Result<Value> {
        self.inner
            .get_with_query(
                &format!("{}/deliveries", webhook_path(org_id, webhook_id)),
                query,
            )
            .await
    }

    /// Get one delivery.
    pub async fn get_delivery(
        &self,
        org_id: &str,
        webhook_id: &str,
        delivery_id: &str,
    ) -> Result<WebhookDelivery> {
        self.inner
            .get(&delivery_path(org_id, webhook_id, delivery_id))
            .await
    }

    /// Queue a failed delivery for another attempt.
    pub async fn retry_delivery(
        &self,
        org_id: &str,
        webhook_id: &str,
        delivery_id: &str,
    ) -> Result<WebhookDelivery> {
        self.inner
            .post_empty(&format!(
                "{}/retry",
                delivery_path(org_id, webhook_id, delivery_id)
            ))
            .await
    }

    /// Event types that can be subscribed to.
    pub async fn list_event_types(&self) -> Result<Value> {
        self.inner.get("/api/webhooks/event-types").await
    }
}

fn webhooks_path(org_id: &str) -> String {
    format!("/api/organizations/{}/webhooks", org_id)
}

fn webhook_path(org_id: &str, webhook_id: &str) -> String {
    format!("{}/{}", webhooks_path(org_id), webhook_id)
}

fn delivery_path(org_id: &str, webhook_id: &str, delivery_id: &str) -> String {
    format!("{}/deliveries/{}", webhook_path(org_id, webhook_id), delivery_id)
}
