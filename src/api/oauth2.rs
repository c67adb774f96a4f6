//! OAuth2 and OpenID Connect service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::client::{ApiRequest, Transport};
use crate::models::{
    AuthorizeOptions, IntrospectionResponse, Jwks, OidcDiscovery, TokenRequest, TokenResponse,
    UserInfoResponse,
};
use crate::Result;

/// Service for the OAuth2 authorization server endpoints.
///
/// Token, revocation and introspection requests are sent form-encoded as
/// required by RFC 6749; everything else is JSON.
///
/// # Example
///
/// ```no_run
/// use coreauth_rs::models::{AuthorizeOptions, TokenRequest};
///
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let url = client.oauth2().authorize_url(
///     "my-client",
///     "https://app.example.com/callback",
///     AuthorizeOptions {
///         state: Some("xyz".into()),
///         ..Default::default()
///     },
/// )?;
/// println!("Send the browser to {}", url);
///
/// // ... later, with the code from the callback
/// let tokens = client
///     .oauth2()
///     .token(&TokenRequest::authorization_code("code", "https://app.example.com/callback"))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct OAuth2Service {
    inner: Arc<Transport>,
}

#[derive(Serialize)]
struct TokenHint<'a> {
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_type_hint: Option<&'a str>,
}

impl OAuth2Service {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Fetch the OpenID Provider metadata.
    pub async fn discovery(&self) -> Result<OidcDiscovery> {
        self.inner.get("/.well-known/openid-configuration").await
    }

    /// Fetch the signing keys.
    pub async fn jwks(&self) -> Result<Jwks> {
        self.inner.get("/.well-known/jwks.json").await
    }

    /// Build the URL of the authorization endpoint. No request is made.
    ///
    /// `response_type` defaults to `code` and `scope` to `openid`.
    pub fn authorize_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        options: AuthorizeOptions,
    ) -> Result<String> {
        let mut url = Url::parse(&format!("{}/authorize", self.inner.base_url()))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .extend_pairs(options.into_pairs());
        Ok(url.into())
    }

    /// Call the token endpoint.
    pub async fn token(&self, request: &TokenRequest) -> Result<TokenResponse> {
        self.inner.post_form("/oauth/token", request).await
    }

    /// Get the OIDC claims of the current access token.
    pub async fn userinfo(&self) -> Result<UserInfoResponse> {
        self.inner.get("/userinfo").await
    }

    /// Revoke an access or refresh token.
    pub async fn revoke(&self, token: &str, token_type_hint: Option<&str>) -> Result<()> {
        self.inner
            .send_unit(ApiRequest::post("/oauth/revoke").form(&TokenHint {
                token,
                token_type_hint,
            })?)
            .await
    }

    /// Ask the server whether a token is active.
    pub async fn introspect(
        &self,
        token: &str,
        token_type_hint: Option<&str>,
    ) -> Result<IntrospectionResponse> {
        self.inner
            .post_form(
                "/oauth/introspect",
                &TokenHint {
                    token,
                    token_type_hint,
                },
            )
            .await
    }

    /// RP-initiated logout.
    ///
    /// The server usually answers with a redirect to
    /// `post_logout_redirect_uri`, which is reported as
    /// [`Error::Api`](crate::Error::Api) with the 3xx status unless the client
    /// follows redirects.
    pub async fn oidc_logout(
        &self,
        id_token_hint: Option<&str>,
        post_logout_redirect_uri: Option<&str>,
        state: Option<&str>,
    ) -> Result<Value> {
        let request = ApiRequest::get("/logout")
            .query_param("id_token_hint", id_token_hint)
            .query_param("post_logout_redirect_uri", post_logout_redirect_uri)
            .query_param("state", state);
        self.inner.send(request).await
    }
}
