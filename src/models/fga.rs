//! Fine-grained authorization models.
//!
//! Relationships are stored as tuples of the form
//! `namespace:object_id#relation@subject_type:subject_id`, optionally with a
//! subject relation for usersets (`group:eng#member`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// A relation tuple to write or delete.
///
/// # Example
///
/// ```
/// use coreauth_rs::models::TupleKey;
///
/// let tuple = TupleKey::new("tenant-1", "document", "readme", "viewer", "user", "alice");
/// assert_eq!(tuple.to_string(), "document:readme#viewer@user:alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleKey {
    /// Tenant owning the tuple
    pub tenant_id: String,
    /// Object type, e.g. `document`
    pub namespace: String,
    /// Object id
    pub object_id: String,
    /// Relation name, e.g. `viewer`
    pub relation: String,
    /// Subject type, e.g. `user`
    pub subject_type: String,
    /// Subject id
    pub subject_id: String,
    /// Relation on the subject for userset subjects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_relation: Option<String>,
}

impl TupleKey {
    /// A tuple with a direct subject.
    pub fn new(
        tenant_id: impl Into<String>,
        namespace: impl Into<String>,
        object_id: impl Into<String>,
        relation: impl Into<String>,
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            namespace: namespace.into(),
            object_id: object_id.into(),
            relation: relation.into(),
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            subject_relation: None,
        }
    }

    /// Turn the subject into a userset, e.g. `group:eng#member`.
    pub fn with_subject_relation(mut self, relation: impl Into<String>) -> Self {
        self.subject_relation = Some(relation.into());
        self
    }
}

impl std::fmt::Display for TupleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}#{}@{}:{}",
            self.namespace, self.object_id, self.relation, self.subject_type, self.subject_id
        )?;
        if let Some(relation) = &self.subject_relation {
            write!(f, "#{}", relation)?;
        }
        Ok(())
    }
}

/// A stored relation tuple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationTuple {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Object type
    #[serde(default)]
    pub namespace: Option<String>,
    /// Object id
    #[serde(default)]
    pub object_id: Option<String>,
    /// Relation name
    #[serde(default)]
    pub relation: Option<String>,
    /// Subject type
    #[serde(default)]
    pub subject_type: Option<String>,
    /// Subject id
    #[serde(default)]
    pub subject_id: Option<String>,
    /// Relation on the subject for userset subjects
    #[serde(default)]
    pub subject_relation: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for `query_tuples`. Unset filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TupleFilter {
    /// Object type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Object id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Relation name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Subject type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    /// Subject id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// A permission check: may `subject` hold `relation` on `object`?
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Tenant to evaluate in
    pub tenant_id: String,
    /// Subject type, e.g. `user`
    pub subject_type: String,
    /// Subject id
    pub subject_id: String,
    /// Relation or permission to test
    pub relation: String,
    /// Object type
    pub namespace: String,
    /// Object id
    pub object_id: String,
    /// Contextual data for conditional relations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl CheckRequest {
    /// A check without context.
    pub fn new(
        tenant_id: impl Into<String>,
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
        relation: impl Into<String>,
        namespace: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            relation: relation.into(),
            namespace: namespace.into(),
            object_id: object_id.into(),
            context: None,
        }
    }

    /// Attach contextual data.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// A permission check scoped to a store.
///
/// The store supplies the tenant, and objects are addressed by
/// `object_type` rather than `namespace`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreCheckRequest {
    /// Subject type, e.g. `user`
    pub subject_type: String,
    /// Subject id
    pub subject_id: String,
    /// Relation or permission to test
    pub relation: String,
    /// Object type as declared in the store's model
    pub object_type: String,
    /// Object id
    pub object_id: String,
    /// Contextual data for conditional relations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StoreCheckRequest {
    /// A store check without context.
    pub fn new(
        subject_type: impl Into<String>,
        subject_id: impl Into<String>,
        relation: impl Into<String>,
        object_type: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_type: subject_type.into(),
            subject_id: subject_id.into(),
            relation: relation.into(),
            object_type: object_type.into(),
            object_id: object_id.into(),
            context: None,
        }
    }

    /// Attach contextual data.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Whether the relation holds
    pub allowed: bool,
    /// Explanation, when the server provides one
    #[serde(default)]
    pub reason: Option<String>,
}

/// An authorization store: an isolated set of tuples and models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FgaStore {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Version of the active authorization model
    #[serde(default)]
    pub current_model_version: Option<i64>,
    /// Inactive entries are rejected
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Number of stored tuples
    #[serde(default)]
    pub tuple_count: Option<i64>,
    /// Store settings
    #[serde(default)]
    pub settings: Option<Value>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Changes to a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStoreRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deactivated stores reject checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A versioned authorization model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationModel {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning store
    #[serde(default)]
    pub store_id: Option<String>,
    /// Monotonic version within the store
    #[serde(default)]
    pub version: Option<i64>,
    /// The model in JSON form
    #[serde(default)]
    pub schema_json: Option<Value>,
    /// The model in DSL form
    #[serde(default)]
    pub schema_dsl: Option<String>,
    /// Whether the model passed validation
    #[serde(default)]
    pub is_valid: Option<bool>,
    /// Problems found during validation
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation_errors: Vec<String>,
    /// Author of this version
    #[serde(default)]
    pub created_by: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional fields for store API key creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateApiKeyOptions {
    /// Requests per minute before throttling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<i32>,
    /// Expiry; keys without one never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A store API key. The secret itself is never returned after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FgaStoreApiKey {
    /// Unique id
    #[serde(default)]
    pub id: Option<String>,
    /// Owning store
    #[serde(default)]
    pub store_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// First characters of the key, for identification
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Granted permissions
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    /// Requests per minute before throttling
    #[serde(default)]
    pub rate_limit_per_minute: Option<i32>,
    /// Inactive entries are rejected
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Last use
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A newly created store API key, including the plaintext key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FgaStoreApiKeyWithSecret {
    /// Key metadata
    #[serde(flatten)]
    pub api_key: FgaStoreApiKey,
    /// The plaintext key; shown only once
    pub key: String,
}

/// Filters for reading a store's tuples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreTupleQuery {
    /// Object type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Object id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Relation name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Subject type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    /// Subject id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// A batch of tuple writes and deletes applied to a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteTuplesRequest {
    /// Tuples to add
    pub writes: Vec<Value>,
    /// Tuples to remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletes: Option<Vec<Value>>,
}
