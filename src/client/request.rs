//! Request descriptors.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as `application/json`
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// A single outbound call: method, path, query and optional body.
///
/// Descriptors are built per call and consumed by
/// [`Transport::request`](crate::client::Transport::request).
///
/// # Example
///
/// ```
/// use coreauth_rs::client::ApiRequest;
///
/// let request = ApiRequest::get("/scim/v2/Users")
///     .query_param("filter", Some("userName eq \"jane\""))
///     .query_param("count", None::<u32>);
///
/// assert_eq!(request.path(), "/scim/v2/Users");
/// assert_eq!(request.query_pairs().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl ApiRequest {
    /// Create a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append every present field of `query` to the query string.
    ///
    /// `query` must serialize to a map. Fields that serialize to `null`
    /// (typically `None` options) are dropped entirely.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        self.query.extend(to_pairs(query)?);
        Ok(self)
    }

    /// Append a single query parameter, skipping it when `value` is `None`.
    pub fn query_param<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attach a form-encoded body. Same field rules as [`query`](Self::query).
    pub fn form<F: Serialize + ?Sized>(mut self, form: &F) -> Result<Self> {
        self.body = Some(RequestBody::Form(to_pairs(form)?));
        Ok(self)
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path, relative to the client's base address.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Method, String, Vec<(String, String)>, Option<RequestBody>) {
        (self.method, self.path, self.query, self.body)
    }
}

/// Flatten a serializable map into string pairs, dropping null fields.
fn to_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| render(value).map(|value| (key, value)))
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::InvalidInput(format!(
            "expected a map of parameters, got {}",
            other
        ))),
    }
}

fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // nested values have no canonical form encoding; send their JSON text
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Filters {
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        count: Option<u32>,
        include_inactive: Option<bool>,
    }

    #[test]
    fn test_query_drops_absent_fields() {
        let request = ApiRequest::get("/x")
            .query(&Filters {
                filter: None,
                count: None,
                include_inactive: Some(false),
            })
            .unwrap();

        assert_eq!(
            request.query_pairs(),
            &[("include_inactive".to_string(), "false".to_string())]
        );
    }

    #[test]
    fn test_query_renders_scalars() {
        let request = ApiRequest::get("/x")
            .query(&Filters {
                filter: Some("a b".into()),
                count: Some(25),
                include_inactive: None,
            })
            .unwrap();

        let pairs = request.query_pairs();
        assert!(pairs.contains(&("filter".to_string(), "a b".to_string())));
        assert!(pairs.contains(&("count".to_string(), "25".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_query_rejects_non_map() {
        let result = ApiRequest::get("/x").query(&vec![1, 2, 3]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_query_param_skips_none() {
        let request = ApiRequest::get("/x")
            .query_param("user_id", None::<&str>)
            .query_param("limit", Some(10));
        assert_eq!(request.query_pairs(), &[("limit".to_string(), "10".to_string())]);
    }

    #[test]
    fn test_form_body() {
        let request = ApiRequest::post("/oauth/revoke")
            .form(&serde_json::json!({"token": "abc", "token_type_hint": null}))
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.body(),
            Some(&RequestBody::Form(vec![("token".to_string(), "abc".to_string())]))
        );
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::put("/y").json(&serde_json::json!({"role": "admin"})).unwrap();
        assert_eq!(
            request.body(),
            Some(&RequestBody::Json(serde_json::json!({"role": "admin"})))
        );
    }
}
