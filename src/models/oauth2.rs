//! OAuth2 and OpenID Connect models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Parameters for the token endpoint, sent form-encoded.
///
/// `grant_type` is always sent; the remaining fields are included only when
/// set, so one struct covers the `authorization_code`, `refresh_token` and
/// `client_credentials` grants.
///
/// # Example
///
/// ```
/// use coreauth_rs::models::TokenRequest;
///
/// let request = TokenRequest::authorization_code("abc", "https://app.example.com/cb")
///     .with_client("my-client", Some("my-secret"));
/// assert_eq!(request.grant_type, "authorization_code");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    /// The OAuth2 grant type
    pub grant_type: String,
    /// Authorization code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Redirect URI used in the authorization request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// Client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Client secret, for confidential clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// PKCE verifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    /// Refresh token, for the `refresh_token` grant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Space separated scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Target API audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl TokenRequest {
    /// A request for an arbitrary grant type with no other fields.
    pub fn new(grant_type: impl Into<String>) -> Self {
        Self {
            grant_type: grant_type.into(),
            ..Default::default()
        }
    }

    /// Exchange an authorization code.
    pub fn authorization_code(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            redirect_uri: Some(redirect_uri.into()),
            ..Self::new("authorization_code")
        }
    }

    /// Exchange a refresh token.
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Self::new("refresh_token")
        }
    }

    /// Machine-to-machine client credentials grant.
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::new("client_credentials").with_client(client_id, Some(client_secret))
    }

    /// Set the client id and, for confidential clients, the secret.
    pub fn with_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: Option<impl Into<String>>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = client_secret.map(Into::into);
        self
    }

    /// Set the PKCE code verifier.
    pub fn with_code_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.code_verifier = Some(verifier.into());
        self
    }

    /// Set the requested scopes.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Normally `Bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Refresh token, when issued
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// OpenID Connect ID token
    #[serde(default)]
    pub id_token: Option<String>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}

/// Standard OIDC claims returned by `/userinfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// Subject identifier
    #[serde(default)]
    pub sub: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Given name
    #[serde(default)]
    pub given_name: Option<String>,
    /// Family name
    #[serde(default)]
    pub family_name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the email address was confirmed
    #[serde(default)]
    pub email_verified: Option<bool>,
    /// Profile picture URL
    #[serde(default)]
    pub picture: Option<String>,
    /// Preferred locale
    #[serde(default)]
    pub locale: Option<String>,
    /// Seconds since the epoch
    #[serde(default)]
    pub updated_at: Option<i64>,
    /// Organization the token was issued for
    #[serde(default)]
    pub org_id: Option<String>,
    /// Organization name
    #[serde(default)]
    pub org_name: Option<String>,
}

/// Token introspection result (RFC 7662).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    /// Whether the token is currently active
    #[serde(default)]
    pub active: bool,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// Client identifier
    #[serde(default)]
    pub client_id: Option<String>,
    /// Resource owner
    #[serde(default)]
    pub username: Option<String>,
    /// Token type
    #[serde(default)]
    pub token_type: Option<String>,
    /// Expiry, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued at, seconds since the epoch
    #[serde(default)]
    pub iat: Option<i64>,
    /// Subject
    #[serde(default)]
    pub sub: Option<String>,
    /// Audience, a string or a list of strings
    #[serde(default)]
    pub aud: Option<Value>,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// Token id
    #[serde(default)]
    pub jti: Option<String>,
}

/// OpenID Provider metadata from `/.well-known/openid-configuration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcDiscovery {
    /// Issuer identifier
    pub issuer: String,
    /// Authorization endpoint URL
    pub authorization_endpoint: String,
    /// Token endpoint URL
    pub token_endpoint: String,
    /// JWKS URL
    pub jwks_uri: String,
    /// Userinfo endpoint
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    /// Dynamic client registration endpoint
    #[serde(default)]
    pub registration_endpoint: Option<String>,
    /// Token introspection endpoint
    #[serde(default)]
    pub introspection_endpoint: Option<String>,
    /// Token revocation endpoint
    #[serde(default)]
    pub revocation_endpoint: Option<String>,
    /// RP-initiated logout endpoint
    #[serde(default)]
    pub end_session_endpoint: Option<String>,
    /// Supported scopes
    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes_supported: Vec<String>,
    /// Supported response types
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_types_supported: Vec<String>,
    /// Supported response modes
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_modes_supported: Vec<String>,
    /// Supported grant types
    #[serde(default, deserialize_with = "null_as_default")]
    pub grant_types_supported: Vec<String>,
    /// Supported subject types
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject_types_supported: Vec<String>,
    /// ID token signing algorithms
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_token_signing_alg_values_supported: Vec<String>,
    /// Client authentication methods
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_endpoint_auth_methods_supported: Vec<String>,
    /// Supported claims
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims_supported: Vec<String>,
    /// Supported PKCE methods
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_challenge_methods_supported: Vec<String>,
}

/// A JSON Web Key Set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwks {
    /// The keys, kept as raw JWK objects
    pub keys: Vec<Value>,
}

impl Jwks {
    /// Find a key by its `kid`.
    pub fn find(&self, kid: &str) -> Option<&Value> {
        self.keys
            .iter()
            .find(|key| key.get("kid").and_then(Value::as_str) == Some(kid))
    }
}

/// Optional parameters for the authorization URL.
#[derive(Debug, Clone, Default)]
pub struct AuthorizeOptions {
    /// Defaults to `code`
    pub response_type: Option<String>,
    /// Defaults to `openid`
    pub scope: Option<String>,
    /// Opaque state echoed back to the redirect URI
    pub state: Option<String>,
    /// Replay protection nonce
    pub nonce: Option<String>,
    /// PKCE challenge
    pub code_challenge: Option<String>,
    /// PKCE challenge method, usually `S256`
    pub code_challenge_method: Option<String>,
    /// Any further parameters, appended in order
    pub extra: Vec<(String, String)>,
}

impl AuthorizeOptions {
    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (
                "response_type".to_string(),
                self.response_type.unwrap_or_else(|| "code".to_string()),
            ),
            (
                "scope".to_string(),
                self.scope.unwrap_or_else(|| "openid".to_string()),
            ),
        ];
        let optional = [
            ("state", self.state),
            ("nonce", self.nonce),
            ("code_challenge", self.code_challenge),
            ("code_challenge_method", self.code_challenge_method),
        ];
        pairs.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key.to_string(), value))),
        );
        pairs.extend(self.extra);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_form_fields() {
        let request = TokenRequest::refresh_token("rt-1").with_scope("openid email");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "grant_type": "refresh_token",
                "refresh_token": "rt-1",
                "scope": "openid email"
            })
        );
    }

    #[test]
    fn test_client_credentials() {
        let request = TokenRequest::client_credentials("id", "secret");
        assert_eq!(request.client_id.as_deref(), Some("id"));
        assert_eq!(request.client_secret.as_deref(), Some("secret"));
        assert!(request.code.is_none());
    }

    #[test]
    fn test_authorize_defaults() {
        let pairs = AuthorizeOptions::default().into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("response_type".to_string(), "code".to_string()),
                ("scope".to_string(), "openid".to_string()),
            ]
        );
    }

    #[test]
    fn test_jwks_find() {
        let jwks: Jwks = serde_json::from_str(
            r#"{"keys": [{"kid": "a", "kty": "RSA"}, {"kid": "b", "kty": "EC"}]}"#,
        )
        .unwrap();
        assert_eq!(jwks.find("b").unwrap()["kty"], "EC");
        assert!(jwks.find("c").is_none());
    }

    #[test]
    fn test_discovery_minimal() {
        let discovery: OidcDiscovery = serde_json::from_str(
            r#"{
                "issuer": "https://auth.example.com",
                "authorization_endpoint": "https://auth.example.com/authorize",
                "token_endpoint": "https://auth.example.com/oauth/token",
                "jwks_uri": "https://auth.example.com/.well-known/jwks.json"
            }"#,
        )
        .unwrap();
        assert!(discovery.scopes_supported.is_empty());
        assert!(discovery.end_session_endpoint.is_none());
    }
}
