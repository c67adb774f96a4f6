//! Fine-grained authorization service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiRequest, Transport};
use crate::models::{
    AuthorizationModel, CheckRequest, CheckResponse, CreateApiKeyOptions, FgaStore,
    FgaStoreApiKeyWithSecret, RelationTuple, StoreCheckRequest, StoreTupleQuery, TupleFilter,
    TupleKey, UpdateStoreRequest, WriteTuplesRequest,
};
use crate::Result;

/// Service for relation tuples, permission checks and authorization stores.
///
/// Tenant tuples live under `/api/authz`; stores are isolated tuple sets
/// with their own versioned models and API keys.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::{CheckRequest, TupleKey};
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// client
///     .fga()
///     .create_tuple(&TupleKey::new("t1", "document", "readme", "viewer", "user", "alice"))
///     .await?;
///
/// let check = client
///     .fga()
///     .check(&CheckRequest::new("t1", "user", "alice", "viewer", "document", "readme"))
///     .await?;
/// assert!(check.allowed);
/// # Ok(())
/// # }
/// ```
pub struct FgaService {
    inner: Arc<Transport>,
}

impl FgaService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Write a relation tuple.
    pub async fn create_tuple(&self, tuple: &TupleKey) -> Result<RelationTuple> {
        self.inner.post("/api/authz/tuples", tuple).await
    }

    /// Delete a relation tuple. The tuple travels in the request body.
    pub async fn delete_tuple(&self, tuple: &TupleKey) -> Result<()> {
        self.inner
            .send_unit(ApiRequest::delete("/api/authz/tuples").json(tuple)?)
            .await
    }

    /// Find tuples of a tenant matching `filter`.
    pub async fn query_tuples(&self, tenant_id: &str, filter: &TupleFilter) -> Result<Value> {
        #[derive(Serialize)]
        struct Request<'a> {
            tenant_id: &'a str,
            #[serde(flatten)]
            filter: &'a TupleFilter,
        }

        self.inner
            .post("/api/authz/tuples/query", &Request { tenant_id, filter })
            .await
    }

    /// All tuples on one object.
    pub async fn get_object_tuples(
        &self,
        tenant_id: &str,
        namespace: &str,
        object_id: &str,
    ) -> Result<Value> {
        self.inner
            .get(&format!(
                "/api/authz/tuples/by-object/{}/{}/{}",
                tenant_id, namespace, object_id
            ))
            .await
    }

    /// All tuples naming one subject.
    pub async fn get_subject_tuples(
        &self,
        tenant_id: &str,
        subject_type: &str,
        subject_id: &str,
    ) -> Result<Value> {
        self.inner
            .get(&format!(
                "/api/authz/tuples/by-subject/{}/{}/{}",
                tenant_id, subject_type, subject_id
            ))
            .await
    }

    /// Check whether a subject holds a relation on an object.
    pub async fn check(&self, request: &CheckRequest) -> Result<CheckResponse> {
        self.inner.post("/api/authz/check", request).await
    }

    /// Expand a relation into the tree of subjects that hold it.
    pub async fn expand(
        &self,
        tenant_id: &str,
        namespace: &str,
        object_id: &str,
        relation: &str,
    ) -> Result<Value> {
        self.inner
            .get(&format!(
                "/api/authz/expand/{}/{}/{}/{}",
                tenant_id, namespace, object_id, relation
            ))
            .await
    }

    /// Check endpoint meant for reverse proxies.
    pub async fn forward_auth(&self, request: &CheckRequest) -> Result<Value> {
        self.inner.post("/authz/forward-auth", request).await
    }

    /// Create a store.
    pub async fn create_store(&self, name: &str, description: Option<&str>) -> Result<FgaStore> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
        }

        self.inner
            .post("/api/fga/stores", &Request { name, description })
            .await
    }

    /// List stores; deactivated ones only when `include_inactive` is set.
    pub async fn list_stores(&self, include_inactive: Option<bool>) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/fga/stores").query_param("include_inactive", include_inactive))
            .await
    }

    /// Get a store.
    pub async fn get_store(&self, store_id: &str) -> Result<FgaStore> {
        self.inner.get(&store_path(store_id)).await
    }

    /// Update a store.
    pub async fn update_store(&self, store_id: &str, changes: &UpdateStoreRequest) -> Result<FgaStore> {
        self.inner.patch(&store_path(store_id), changes).await
    }

    /// Delete a store with its tuples and models.
    pub async fn delete_store(&self, store_id: &str) -> Result<()> {
        self.inner.delete(&store_path(store_id)).await
    }

    /// Upload a new model version. It becomes current when it validates.
    pub async fn write_model(
        &self,
        store_id: &str,
        schema: &Value,
        created_by: Option<&str>,
    ) -> Result<AuthorizationModel> {
        #[derive(Serialize)]
        struct Request<'a> {
            schema: &'a Value,
            #[serde(skip_serializing_if = "Option::is_none")]
            created_by: Option<&'a str>,
        }

        self.inner
            .post(
                &format!("{}/models", store_path(store_id)),
                &Request { schema, created_by },
            )
            .await
    }

    /// List model versions.
    pub async fn list_models(&self, store_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/models", store_path(store_id)))
            .await
    }

    /// The model used for checks.
    pub async fn get_current_model(&self, store_id: &str) -> Result<AuthorizationModel> {
        self.inner
            .get(&format!("{}/models/current", store_path(store_id)))
            .await
    }

    /// One model version.
    pub async fn get_model_version(&self, store_id: &str, version: i64) -> Result<AuthorizationModel> {
        self.inner
            .get(&format!("{}/models/{}", store_path(store_id), version))
            .await
    }

    /// Create an API key for a store. The plaintext key is only in this reply.
    pub async fn create_api_key(
        &self,
        store_id: &str,
        name: &str,
        permissions: &[String],
        options: CreateApiKeyOptions,
    ) -> Result<FgaStoreApiKeyWithSecret> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            permissions: &'a [String],
            #[serde(flatten)]
            options: CreateApiKeyOptions,
        }

        self.inner
            .post(
                &format!("{}/api-keys", store_path(store_id)),
                &Request {
                    name,
                    permissions,
                    options,
                },
            )
            .await
    }

    /// List a store's API keys.
    pub async fn list_api_keys(&self, store_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/api-keys", store_path(store_id)))
            .await
    }

    /// Revoke a store API key.
    pub async fn revoke_api_key(&self, store_id: &str, key_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("{}/api-keys/{}", store_path(store_id), key_id))
            .await
    }

    /// Check a relation against a store's current model.
    pub async fn store_check(
        &self,
        store_id: &str,
        request: &StoreCheckRequest,
    ) -> Result<CheckResponse> {
        self.inner
            .post(&format!("{}/check", store_path(store_id)), request)
            .await
    }

    /// Read a store's tuples.
    pub async fn read_store_tuples(&self, store_id: &str, query: &StoreTupleQuery) -> Result<Value> {
        self.inner
            .get_with_query(&format!("{}/tuples", store_path(store_id)), query)
            .await
    }

    /// Apply a batch of writes and deletes to a store.
    pub async fn write_store_tuples(&self, store_id: &str, request: &WriteTuplesRequest) -> Result<Value> {
        self.inner
            .post(&format!("{}/tuples", store_path(store_id)), request)
            .await
    }
}

fn store_path(store_id: &str) -> String {
    format!("/api/fga/stores/{}", store_id)
}
