//! Webhook models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Optional fields for webhook creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWebhookOptions {
    /// Retry schedule, e.g. `{"max_attempts": 5, "backoff_seconds": 30}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<Value>,
    /// Extra headers sent with every delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

/// Changes to a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWebhookRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Delivery endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Replacement event subscriptions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Retry schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<Value>,
    /// Extra headers sent with every delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

/// A webhook subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Delivery endpoint
    #[serde(default)]
    pub url: Option<String>,
    /// Subscribed event types
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<String>,
    /// Enabled flag
    #[serde(default)]
    pub is_enabled: Option<bool>,
    /// Retry schedule
    #[serde(default)]
    pub retry_policy: Option<Value>,
    /// Extra headers sent with every delivery
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_headers: HashMap<String, String>,
    /// Deliveries attempted
    #[serde(default)]
    pub total_deliveries: Option<i64>,
    /// Deliveries acknowledged with a 2xx
    #[serde(default)]
    pub successful_deliveries: Option<i64>,
    /// Deliveries that exhausted their retries
    #[serde(default)]
    pub failed_deliveries: Option<i64>,
    /// Most recent event
    #[serde(default)]
    pub last_triggered_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A webhook together with its signing secret.
///
/// Returned on creation and secret rotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookWithSecret {
    /// The webhook
    #[serde(flatten)]
    pub webhook: Webhook,
    /// HMAC signing secret
    #[serde(default)]
    pub secret: Option<String>,
}

/// Result of a test delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestWebhookResponse {
    /// Whether the endpoint answered with a 2xx
    #[serde(default)]
    pub success: bool,
    /// Status returned by the endpoint
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Endpoint latency
    #[serde(default)]
    pub response_time_ms: Option<i64>,
    /// Body returned by the endpoint
    #[serde(default)]
    pub response_body: Option<String>,
    /// Transport failure, if the endpoint could not be reached
    #[serde(default)]
    pub error: Option<String>,
}

/// One delivery attempt series for an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning webhook
    #[serde(default)]
    pub webhook_id: Option<String>,
    /// Id of the triggering event
    #[serde(default)]
    pub event_id: Option<String>,
    /// Event type
    #[serde(default)]
    pub event_type: Option<String>,
    /// The delivered body
    #[serde(default)]
    pub payload: Option<Value>,
    /// `pending`, `delivered`, `failed` or `retrying`
    #[serde(default)]
    pub status: Option<String>,
    /// HTTP status returned by the endpoint
    #[serde(default)]
    pub response_status: Option<u16>,
    /// Endpoint latency
    #[serde(default)]
    pub response_time_ms: Option<i64>,
    /// Attempts made so far
    #[serde(default)]
    pub attempt_count: Option<i32>,
    /// Attempt limit
    #[serde(default)]
    pub max_attempts: Option<i32>,
    /// Next scheduled attempt
    #[serde(default)]
    pub next_retry_at: Option<DateTime<Utc>>,
    /// Most recent failure
    #[serde(default)]
    pub last_error: Option<String>,
    /// Time of successful delivery
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Time the delivery was abandoned
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for listing deliveries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryQuery {
    /// Event type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Delivery status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Records to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
