//! HTTP transport: credential handling, request dispatch and response classification.

use std::sync::RwLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use super::config::ClientConfig;
use super::request::{ApiRequest, RequestBody};
use crate::{Error, Result};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Low-level HTTP transport shared by every service.
///
/// The transport owns the connection pool, the base address and the bearer
/// credential. Each call reads the credential once while the request is
/// being built, so [`set_token`](Self::set_token) and
/// [`clear_token`](Self::clear_token) affect the next call and never one
/// already in flight.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    credential: RwLock<Option<SecretString>>,
    config: ClientConfig,
}

impl Transport {
    /// Build a transport for `base_url`, optionally starting with a token.
    ///
    /// Trailing `/` characters are stripped from the base address.
    pub fn configure(
        base_url: &str,
        token: Option<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(redirect)
            .build()?;

        Ok(Self {
            http,
            base_url,
            credential: RwLock::new(token.map(SecretString::from)),
            config,
        })
    }

    /// The normalized base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replace the bearer token used by subsequent requests.
    ///
    /// An empty token sends no `Authorization` header.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut credential = self.credential.write().unwrap_or_else(|e| e.into_inner());
        *credential = Some(SecretString::from(token.into()));
    }

    /// Remove the bearer token; subsequent requests are unauthenticated.
    pub fn clear_token(&self) {
        let mut credential = self.credential.write().unwrap_or_else(|e| e.into_inner());
        *credential = None;
    }

    /// Whether a non-empty bearer token is currently set.
    pub fn has_token(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty())
    }

    /// Build request headers for a single call.
    ///
    /// This is the only place the credential is read during a request.
    fn build_headers(&self, content_type: &'static str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

        let credential = self.credential.read().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = credential.as_ref().filter(|t| !t.expose_secret().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Perform one HTTP call and classify the response.
    ///
    /// Returns `Ok(None)` for 204 responses and for 2xx responses with an
    /// empty body, `Ok(Some(json))` for any other 2xx, and the matching
    /// [`Error`] variant for everything else. Nothing is retried.
    pub async fn request(&self, request: ApiRequest) -> Result<Option<Value>> {
        let (method, path, query, body) = request.into_parts();

        let content_type = match body {
            Some(RequestBody::Form(_)) => FORM,
            _ => JSON,
        };
        let headers = self.build_headers(content_type)?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %method,
            path = %path,
            authenticated = headers.contains_key(AUTHORIZATION),
            "Sending request"
        );

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Form(pairs)) => builder.form(&pairs),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(method = %method, path = %path, status, "Received response");

        let result = classify(status, &text);
        if let Err(err) = &result {
            tracing::warn!(method = %method, path = %path, error = %err, "Request failed");
        }
        result
    }

    /// Perform a call and decode the response into `T`.
    ///
    /// An empty reply decodes from `null`, so `T` must accept `null`
    /// (e.g. `Option<_>` or `serde_json::Value`) when the endpoint may
    /// answer 204.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let value = self.request(request).await?;
        Ok(serde_json::from_value(value.unwrap_or(Value::Null))?)
    }

    /// Perform a call and discard any response body.
    pub(crate) async fn send_unit(&self, request: ApiRequest) -> Result<()> {
        self.request(request).await.map(|_| ())
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path)).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.send(ApiRequest::get(path).query(query)?).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// Make a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::post(path)).await
    }

    /// Make a form-encoded POST request.
    pub(crate) async fn post_form<T: DeserializeOwned, F: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<T> {
        self.send(ApiRequest::post(path).form(form)?).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    /// Make a DELETE request, ignoring the reply body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send_unit(ApiRequest::delete(path)).await
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("token", &if self.has_token() { "[REDACTED]" } else { "None" })
            .field("config", &self.config)
            .finish()
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim_end_matches('/');
    let parsed = Url::parse(trimmed)?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidInput(format!(
            "base URL must be hierarchical: {}",
            base_url
        )));
    }
    Ok(trimmed.to_string())
}

/// Turn a status code and body text into a success value or a typed error.
pub(crate) fn classify(status: u16, body: &str) -> Result<Option<Value>> {
    if status == 204 {
        return Ok(None);
    }

    if (200..300).contains(&status) {
        if body.is_empty() {
            return Ok(None);
        }
        return Ok(Some(serde_json::from_str(body)?));
    }

    let (error, message) = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => (
            text_field(map.get("error")),
            text_field(map.get("message")),
        ),
        _ => (String::new(), body.to_string()),
    };

    Err(Error::from_status(status, error, message))
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_content_ignores_body() {
        assert_eq!(classify(204, "").unwrap(), None);
        assert_eq!(classify(204, "{\"a\":1}").unwrap(), None);
        assert_eq!(classify(204, "garbage").unwrap(), None);
    }

    #[test]
    fn test_success_bodies() {
        assert_eq!(classify(200, "").unwrap(), None);
        assert_eq!(classify(201, "{\"a\":1}").unwrap(), Some(json!({"a": 1})));
        assert_eq!(classify(200, "[1,2]").unwrap(), Some(json!([1, 2])));
    }

    #[test]
    fn test_success_non_json_is_decode_error() {
        assert!(matches!(classify(200, "<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn test_error_json_body_passed_through() {
        let err = classify(409, r#"{"error":"email_taken","message":"Email in use"}"#).unwrap_err();
        match err {
            Error::Conflict(api) => {
                assert_eq!(api.status, 409);
                assert_eq!(api.error, "email_taken");
                assert_eq!(api.message, "Email in use");
            }
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_error_json_missing_fields_are_empty() {
        let err = classify(401, r#"{"detail":"nope"}"#).unwrap_err();
        let api = err.api_error().unwrap();
        assert!(matches!(err, Error::Authentication(_)));
        assert_eq!(api.error, "");
        assert_eq!(api.message, "");
    }

    #[test]
    fn test_error_raw_text_body() {
        let err = classify(404, "Not Found").unwrap_err();
        match err {
            Error::NotFound(api) => {
                assert_eq!(api.error, "");
                assert_eq!(api.message, "Not Found");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }

        // JSON that is not an object is treated as raw text
        let err = classify(400, "[\"a\",\"b\"]").unwrap_err();
        assert_eq!(err.api_error().unwrap().message, "[\"a\",\"b\"]");
    }

    #[test]
    fn test_error_generic_status() {
        let err = classify(500, r#"{"error":"x","message":"y"}"#).unwrap_err();
        assert!(matches!(&err, Error::Api(api) if api.status == 500 && api.error == "x" && api.message == "y"));

        let err = classify(302, "").unwrap_err();
        assert_eq!(err.status(), Some(302));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:3000/").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            normalize_base_url("https://auth.example.com/base//").unwrap(),
            "https://auth.example.com/base"
        );
        assert!(matches!(normalize_base_url("not a url"), Err(Error::UrlParse(_))));
        assert!(matches!(normalize_base_url("mailto:someone"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_token_lifecycle() {
        let transport =
            Transport::configure("http://localhost:3000", None, ClientConfig::default()).unwrap();
        assert!(!transport.has_token());

        transport.set_token("abc");
        assert!(transport.has_token());
        let headers = transport.build_headers(JSON).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON);

        transport.clear_token();
        let headers = transport.build_headers(FORM).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), FORM);
    }

    #[test]
    fn test_empty_token_sends_no_header() {
        let transport =
            Transport::configure("http://localhost:3000", None, ClientConfig::default()).unwrap();

        transport.set_token("");
        assert!(!transport.has_token());
        let headers = transport.build_headers(JSON).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let transport = Transport::configure(
            "http://localhost:3000",
            Some("bad\ntoken".to_string()),
            ClientConfig::default(),
        )
        .unwrap();

        let result = transport.build_headers(JSON);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let transport = Transport::configure(
            "http://localhost:3000",
            Some("super-secret-token".to_string()),
            ClientConfig::default(),
        )
        .unwrap();

        let debug_str = format!("{:?}", transport);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }
}
