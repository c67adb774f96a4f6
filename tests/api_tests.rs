//! Service-level tests against a mock CoreAuth server.
//!
//! Each test mounts the endpoints one service call needs and checks the
//! method, path, query and body the client produced, then the decoded reply.
//!
//! Run with: cargo test --test api_tests

use std::collections::HashMap;
use std::sync::Once;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use coreauth_rs::models::{
    AcceptInvitationRequest, CreateApplicationOptions, CreateConnectionRequest,
    CreateTenantRequest, LoginFlowSubmit, PreviewTemplateRequest, ScimUser, SecuritySettings,
    StoreCheckRequest, StoreTupleQuery, TupleFilter, WriteTuplesRequest,
};
use coreauth_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

async fn setup() -> (MockServer, CoreAuthClient) {
    init_logging();
    let server = MockServer::start().await;
    let client = CoreAuthClient::new(&server.uri()).unwrap();
    (server, client)
}

fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_login_keeps_token() {
    let (server, client) = setup().await;
    let tokens = json!({
        "access_token": "A",
        "refresh_token": "R",
        "token_type": "Bearer",
        "expires_in": 3600,
    });

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "tenant_id": "t1",
            "email": "u@x.com",
            "password": "pw",
        })))
        .respond_with(ok_json(tokens))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ok_json(json!({
            "id": "u-1",
            "email": "u@x.com",
            "email_verified": true,
            "metadata": { "full_name": "U X", "department": "ops" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.login("t1", "u@x.com", "pw").await.unwrap();
    assert_eq!(response.access_token, "A");
    assert_eq!(response.refresh_token, "R");
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);
    assert!(!response.requires_mfa());

    let profile = client.auth().get_profile().await.unwrap();
    assert_eq!(profile.email, "u@x.com");
    assert!(profile.email_verified);
    assert_eq!(profile.metadata.full_name.as_deref(), Some("U X"));
    assert_eq!(profile.metadata.custom["department"], "ops");
}

#[tokio::test]
async fn test_login_pending_mfa_keeps_credential() {
    let (server, client) = setup().await;
    client.set_token("previous");

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ok_json(json!({
            "mfa_required": true,
            "mfa_token": "M",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("authorization", "Bearer previous"))
        .respond_with(ok_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.login("t1", "u@x.com", "pw").await.unwrap();
    assert!(response.requires_mfa());
    assert_eq!(response.mfa_token.as_deref(), Some("M"));
    assert!(response.access_token.is_empty());

    client.admin().health().await.unwrap();
}

#[tokio::test]
async fn test_login_challenge_reply_kept_whole() {
    let (server, client) = setup().await;
    client.set_token("previous");

    let reply = json!({
        "status": "mfa_required",
        "challenge_token": "C",
        "methods": ["totp"],
        "message": "MFA verification required",
    });
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ok_json(reply.clone()))
        .mount(&server)
        .await;

    let response = client.login("t1", "u@x.com", "pw").await.unwrap();
    assert!(response.requires_mfa());
    assert_eq!(response.mfa_challenge(), Some("C"));
    assert_eq!(response.methods, vec!["totp"]);
    assert!(client.transport().has_token());

    let round_trip = serde_json::to_value(&response).unwrap();
    for key in ["status", "challenge_token", "methods", "message"] {
        assert_eq!(round_trip[key], reply[key], "field {}", key);
    }
}

#[tokio::test]
async fn test_empty_token_sends_no_authorization() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ok_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    client.set_token("");
    client.admin().health().await.unwrap();

    let request = single_request(&server).await;
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_logout_clears_token_even_on_failure() {
    let (server, client) = setup().await;
    client.set_token("abc");

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.logout().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!client.transport().has_token());
}

#[tokio::test]
async fn test_refresh_replaces_token() {
    let (server, client) = setup().await;
    client.set_token("old");

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "R" })))
        .respond_with(ok_json(json!({
            "access_token": "new",
            "refresh_token": "R2",
            "token_type": "Bearer",
            "expires_in": 900,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sessions/whoami"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ok_json(json!({ "id": "s-1", "active": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.refresh("R").await.unwrap();
    let session = client.auth().whoami().await.unwrap();
    assert_eq!(session.id, "s-1");
}

#[tokio::test]
async fn test_register_omits_missing_phone() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "tenant_id": "t1",
            "email": "new@x.com",
            "password": "pw",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "u-9" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .auth()
        .register("t1", "new@x.com", "pw", None)
        .await
        .unwrap();
    assert_eq!(created["id"], "u-9");
}

#[tokio::test]
async fn test_verify_email_uses_query() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/verify-email"))
        .and(query_param("token", "tok 1"))
        .respond_with(ok_json(json!({ "verified": true })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client.auth().verify_email("tok 1").await.unwrap();
    assert_eq!(reply["verified"], true);
}

#[tokio::test]
async fn test_submit_login_flow_merges_fields() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/self-service/login"))
        .and(body_json(json!({
            "flow": "f-1",
            "method": "password",
            "identifier": "u@x.com",
            "password": "pw",
        })))
        .respond_with(ok_json(json!({ "session": { "id": "s-1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let fields = LoginFlowSubmit {
        method: Some("password".into()),
        identifier: Some("u@x.com".into()),
        password: Some("pw".into()),
        ..Default::default()
    };
    let reply = client.auth().submit_login_flow("f-1", &fields).await.unwrap();
    assert_eq!(reply["session"]["id"], "s-1");
}

#[tokio::test]
async fn test_passwordless_start() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/tenants/t1/passwordless/start"))
        .and(body_json(json!({ "method": "otp", "email": "u@x.com" })))
        .respond_with(ok_json(json!({
            "success": true,
            "delivery_method": "email",
            "masked_destination": "u***@x.com",
            "expires_in": 600,
        })))
        .mount(&server)
        .await;

    let started = client
        .auth()
        .passwordless_start("t1", "otp", "u@x.com")
        .await
        .unwrap();
    assert_eq!(started.success, Some(true));
    assert_eq!(started.masked_destination.as_deref(), Some("u***@x.com"));
}

// =============================================================================
// OAuth2
// =============================================================================

#[tokio::test]
async fn test_token_request_is_form_encoded() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ok_json(json!({
            "access_token": "at",
            "token_type": "Bearer",
            "expires_in": 3600,
            "id_token": "idt",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TokenRequest::authorization_code("c0de", "https://app.test/cb")
        .with_client("app", None::<String>)
        .with_code_verifier("verifier");
    let tokens = client.oauth2().token(&request).await.unwrap();
    assert_eq!(tokens.access_token, "at");
    assert_eq!(tokens.id_token.as_deref(), Some("idt"));

    let fields = form_fields(&single_request(&server).await);
    assert_eq!(fields["grant_type"], "authorization_code");
    assert_eq!(fields["code"], "c0de");
    assert_eq!(fields["redirect_uri"], "https://app.test/cb");
    assert_eq!(fields["client_id"], "app");
    assert_eq!(fields["code_verifier"], "verifier");
    assert!(!fields.contains_key("client_secret"));
}

#[tokio::test]
async fn test_revoke_and_introspect() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/oauth/revoke"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/introspect"))
        .respond_with(ok_json(json!({ "active": true, "sub": "u-1", "aud": ["api"] })))
        .mount(&server)
        .await;

    client
        .oauth2()
        .revoke("rt", Some("refresh_token"))
        .await
        .unwrap();
    let info = client.oauth2().introspect("at", None).await.unwrap();
    assert!(info.active);
    assert_eq!(info.sub.as_deref(), Some("u-1"));

    let requests = server.received_requests().await.unwrap();
    let revoke = form_fields(&requests[0]);
    assert_eq!(revoke["token"], "rt");
    assert_eq!(revoke["token_type_hint"], "refresh_token");

    let introspect = form_fields(&requests[1]);
    assert_eq!(introspect.len(), 1);
    assert_eq!(introspect["token"], "at");
}

#[tokio::test]
async fn test_discovery_document() {
    let (server, client) = setup().await;
    let issuer = server.uri();
    Mock::given(method("GET"))
        .and(path("/.well-known/openid-configuration"))
        .respond_with(ok_json(json!({
            "issuer": issuer,
            "authorization_endpoint": format!("{}/authorize", issuer),
            "token_endpoint": format!("{}/oauth/token", issuer),
            "jwks_uri": format!("{}/.well-known/jwks.json", issuer),
            "scopes_supported": ["openid", "email"],
            "grant_types_supported": null,
        })))
        .mount(&server)
        .await;

    let discovery = client.oauth2().discovery().await.unwrap();
    assert_eq!(discovery.issuer, issuer);
    assert_eq!(discovery.scopes_supported, vec!["openid", "email"]);
    assert!(discovery.grant_types_supported.is_empty());
}

#[tokio::test]
async fn test_authorize_url_with_options() {
    init_logging();
    let client = CoreAuthClient::new("https://auth.example.com/").unwrap();
    let url = client
        .oauth2()
        .authorize_url(
            "app",
            "https://app.test/cb",
            AuthorizeOptions {
                scope: Some("openid email".into()),
                state: Some("xyz".into()),
                code_challenge: Some("abc".into()),
                code_challenge_method: Some("S256".into()),
                ..Default::default()
            },
        )
        .unwrap();

    let parsed = url::Url::parse(&url).unwrap();
    assert_eq!(parsed.path(), "/authorize");
    let pairs: HashMap<String, String> = parsed.query_pairs().into_owned().collect();
    assert_eq!(pairs["client_id"], "app");
    assert_eq!(pairs["response_type"], "code");
    assert_eq!(pairs["scope"], "openid email");
    assert_eq!(pairs["state"], "xyz");
    assert_eq!(pairs["code_challenge_method"], "S256");
    assert!(!pairs.contains_key("nonce"));
}

#[tokio::test]
async fn test_oidc_logout_sends_only_given_params() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let reply = client
        .oauth2()
        .oidc_logout(Some("idt"), None, Some("s"))
        .await
        .unwrap();
    assert!(reply.is_null());

    let request = single_request(&server).await;
    assert_eq!(request.url.query(), Some("id_token_hint=idt&state=s"));
}

// =============================================================================
// MFA
// =============================================================================

#[tokio::test]
async fn test_totp_enrollment_and_verification() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/mfa/enroll/totp"))
        .respond_with(ok_json(json!({
            "method_id": "m-1",
            "secret": "JBSWY3DP",
            "qr_code_uri": "otpauth://totp/CoreAuth:u",
            "backup_codes": ["a", "b"],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mfa/totp/m-1/verify"))
        .and(body_json(json!({ "code": "123456" })))
        .respond_with(ok_json(json!({ "verified": true })))
        .expect(1)
        .mount(&server)
        .await;

    let enrollment = client.mfa().enroll_totp().await.unwrap();
    let method_id = enrollment.method_id.unwrap();
    let reply = client.mfa().verify_totp(&method_id, "123456").await.unwrap();
    assert_eq!(reply["verified"], true);
}

#[tokio::test]
async fn test_delete_mfa_method_ignores_body() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/mfa/methods/m-1"))
        .respond_with(ok_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    client.mfa().delete_method("m-1").await.unwrap();
}

// =============================================================================
// Tenants & applications
// =============================================================================

#[tokio::test]
async fn test_create_tenant() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/tenants"))
        .and(body_json(json!({
            "name": "Acme",
            "slug": "acme",
            "admin_email": "a@acme.test",
            "admin_password": "pw",
            "isolation_mode": "dedicated",
        })))
        .respond_with(ok_json(json!({
            "tenant_id": "t-1",
            "database_setup_required": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = CreateTenantRequest::new("Acme", "acme", "a@acme.test", "pw");
    request.isolation_mode = Some("dedicated".into());
    let created = client.tenants().create(&request).await.unwrap();
    assert_eq!(created.tenant_id.as_deref(), Some("t-1"));
    assert_eq!(created.database_setup_required, Some(true));
}

#[tokio::test]
async fn test_update_security_sends_only_set_fields() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/organizations/org-1/security"))
        .and(body_json(json!({ "mfa_required": true })))
        .respond_with(ok_json(json!({ "mfa_required": true })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = SecuritySettings {
        mfa_required: Some(true),
        ..Default::default()
    };
    let updated = client
        .tenants()
        .update_security("org-1", &settings)
        .await
        .unwrap();
    assert_eq!(updated.mfa_required, Some(true));
}

#[tokio::test]
async fn test_create_application_flattens_options() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/applications"))
        .and(body_json(json!({
            "tenant_id": "t1",
            "name": "Worker",
            "application_type": "service",
            "redirect_uris": [],
            "allowed_scopes": ["read"],
            "description": "batch jobs",
        })))
        .respond_with(ok_json(json!({
            "id": "app-1",
            "client_id": "cid",
            "client_secret": "shh",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateApplicationOptions {
        description: Some("batch jobs".into()),
        ..Default::default()
    };
    let app = client
        .applications()
        .create("t1", "Worker", "service", &[], &["read".to_string()], options)
        .await
        .unwrap();
    assert_eq!(app.client_secret_plain.as_deref(), Some("shh"));
    assert_eq!(app.application.client_id.as_deref(), Some("cid"));
}

#[tokio::test]
async fn test_update_application_is_post() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/applications/app-1/tenants/t1"))
        .respond_with(ok_json(json!({ "id": "app-1", "name": "Renamed" })))
        .expect(1)
        .mount(&server)
        .await;

    let changes = coreauth_rs::models::UpdateApplicationRequest {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    let app = client
        .applications()
        .update("app-1", "t1", &changes)
        .await
        .unwrap();
    assert_eq!(app.name.as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn test_preview_email_template_draft() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/email-templates/welcome/preview"))
        .respond_with(ok_json(json!({ "subject": "Hi Jane", "html_body": "<p>Hi</p>" })))
        .mount(&server)
        .await;

    let stored = client
        .applications()
        .preview_email_template("org-1", "welcome", None)
        .await
        .unwrap();
    assert_eq!(stored["subject"], "Hi Jane");

    let draft = PreviewTemplateRequest {
        subject: Some("Hi {{user_name}}".into()),
        html_body: Some("<p>Hi</p>".into()),
        ..Default::default()
    };
    client
        .applications()
        .preview_email_template("org-1", "welcome", Some(&draft))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(
        body,
        json!({ "subject": "Hi {{user_name}}", "html_body": "<p>Hi</p>" })
    );
}

// =============================================================================
// Fine-grained authorization
// =============================================================================

#[tokio::test]
async fn test_delete_tuple_sends_body() {
    let (server, client) = setup().await;
    let tuple = TupleKey::new("t1", "document", "readme", "viewer", "user", "alice");

    Mock::given(method("DELETE"))
        .and(path("/api/authz/tuples"))
        .and(body_json(json!({
            "tenant_id": "t1",
            "namespace": "document",
            "object_id": "readme",
            "relation": "viewer",
            "subject_type": "user",
            "subject_id": "alice",
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.fga().delete_tuple(&tuple).await.unwrap();
}

#[tokio::test]
async fn test_check_with_context() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/authz/check"))
        .and(body_json(json!({
            "tenant_id": "t1",
            "subject_type": "user",
            "subject_id": "alice",
            "relation": "viewer",
            "namespace": "document",
            "object_id": "readme",
            "context": { "ip": "10.0.0.1" },
        })))
        .respond_with(ok_json(json!({ "allowed": false, "reason": "no path" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CheckRequest::new("t1", "user", "alice", "viewer", "document", "readme")
        .with_context(json!({ "ip": "10.0.0.1" }));
    let check = client.fga().check(&request).await.unwrap();
    assert!(!check.allowed);
    assert_eq!(check.reason.as_deref(), Some("no path"));
}

#[tokio::test]
async fn test_query_tuples_flattens_filter() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/authz/tuples/query"))
        .and(body_json(json!({ "tenant_id": "t1", "namespace": "folder" })))
        .respond_with(ok_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = TupleFilter {
        namespace: Some("folder".into()),
        ..Default::default()
    };
    let tuples = client.fga().query_tuples("t1", &filter).await.unwrap();
    assert_eq!(tuples, json!([]));
}

#[tokio::test]
async fn test_store_tuples_read_and_write() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/fga/stores/st-1/tuples"))
        .and(query_param("object_type", "doc"))
        .respond_with(ok_json(json!({ "tuples": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/fga/stores/st-1/tuples"))
        .and(body_json(json!({ "writes": [{ "object": "doc:1" }] })))
        .respond_with(ok_json(json!({ "written": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let query = StoreTupleQuery {
        object_type: Some("doc".into()),
        ..Default::default()
    };
    client.fga().read_store_tuples("st-1", &query).await.unwrap();

    let writes = WriteTuplesRequest {
        writes: vec![json!({ "object": "doc:1" })],
        deletes: None,
    };
    let reply = client.fga().write_store_tuples("st-1", &writes).await.unwrap();
    assert_eq!(reply["written"], 1);
}

#[tokio::test]
async fn test_create_store_api_key_returns_secret() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/fga/stores/st-1/api-keys"))
        .and(body_json(json!({ "name": "ci", "permissions": ["check"] })))
        .respond_with(ok_json(json!({
            "id": "k-1",
            "key_prefix": "fga_ab",
            "permissions": ["check"],
            "key": "fga_abcdef",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let key = client
        .fga()
        .create_api_key("st-1", "ci", &["check".to_string()], Default::default())
        .await
        .unwrap();
    assert_eq!(key.key, "fga_abcdef");
    assert_eq!(key.api_key.permissions, vec!["check"]);
}

#[tokio::test]
async fn test_store_check_addresses_object_type() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/fga/stores/s-1/check"))
        .and(body_json(json!({
            "subject_type": "user",
            "subject_id": "alice",
            "relation": "viewer",
            "object_type": "document",
            "object_id": "readme",
            "context": { "ip": "10.0.0.1" },
        })))
        .respond_with(ok_json(json!({ "allowed": true })))
        .expect(1)
        .mount(&server)
        .await;

    let check = StoreCheckRequest::new("user", "alice", "viewer", "document", "readme")
        .with_context(json!({ "ip": "10.0.0.1" }));
    let result = client.fga().store_check("s-1", &check).await.unwrap();
    assert!(result.allowed);
}

// =============================================================================
// Webhooks
// =============================================================================

#[tokio::test]
async fn test_webhook_test_without_event_has_no_body() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/webhooks/wh-1/test"))
        .respond_with(ok_json(json!({ "success": true, "status_code": 200 })))
        .mount(&server)
        .await;

    let result = client.webhooks().test("org-1", "wh-1", None).await.unwrap();
    assert!(result.success);
    assert_eq!(result.status_code, Some(200));

    client
        .webhooks()
        .test("org-1", "wh-1", Some("user.created"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body, json!({ "event_type": "user.created" }));
}

#[tokio::test]
async fn test_retry_delivery() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/webhooks/wh-1/deliveries/d-1/retry"))
        .respond_with(ok_json(json!({ "id": "d-1", "status": "pending", "attempts": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = client
        .webhooks()
        .retry_delivery("org-1", "wh-1", "d-1")
        .await
        .unwrap();
    assert_eq!(delivery.status.as_deref(), Some("pending"));
}

#[tokio::test]
async fn test_create_webhook_defaults() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/webhooks"))
        .and(body_json(json!({
            "name": "sink",
            "url": "https://hooks.test",
            "events": ["user.created"],
            "is_enabled": false,
        })))
        .respond_with(ok_json(json!({ "id": "wh-1", "secret": "whsec" })))
        .expect(1)
        .mount(&server)
        .await;

    let hook = client
        .webhooks()
        .create(
            "org-1",
            "sink",
            "https://hooks.test",
            &["user.created".to_string()],
            false,
            Default::default(),
        )
        .await
        .unwrap();
    assert_eq!(hook.secret.as_deref(), Some("whsec"));
}

// =============================================================================
// Groups & invitations
// =============================================================================

#[tokio::test]
async fn test_group_membership() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/tenants/t1/groups/g-1/members"))
        .and(body_json(json!({ "user_id": "u-1" })))
        .respond_with(ok_json(json!({ "user_id": "u-1", "group_id": "g-1", "role": "member" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/tenants/t1/groups/g-1/members/u-1"))
        .and(body_json(json!({ "role": "admin" })))
        .respond_with(ok_json(json!({ "user_id": "u-1", "role": "admin" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tenants/t1/groups/g-1/members/u-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let member = client
        .groups()
        .add_member("t1", "g-1", "u-1", None)
        .await
        .unwrap();
    assert_eq!(member.role.as_deref(), Some("member"));

    let member = client
        .groups()
        .update_member("t1", "g-1", "u-1", "admin")
        .await
        .unwrap();
    assert_eq!(member.role.as_deref(), Some("admin"));

    client
        .groups()
        .remove_member("t1", "g-1", "u-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invitation_verify_and_accept() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/invitations/verify"))
        .and(query_param("token", "inv"))
        .respond_with(ok_json(json!({ "valid": true, "email": "n@x.com" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/invitations/accept"))
        .and(body_json(json!({
            "token": "inv",
            "password": "pw",
            "full_name": "New Hire",
        })))
        .respond_with(ok_json(json!({ "user_id": "u-7" })))
        .expect(1)
        .mount(&server)
        .await;

    let check = client.groups().verify_invitation("inv").await.unwrap();
    assert_eq!(check["valid"], true);

    let accept = AcceptInvitationRequest {
        token: "inv".into(),
        password: "pw".into(),
        full_name: "New Hire".into(),
        metadata: None,
    };
    let reply = client.groups().accept_invitation(&accept).await.unwrap();
    assert_eq!(reply["user_id"], "u-7");
}

// =============================================================================
// SCIM
// =============================================================================

#[tokio::test]
async fn test_scim_list_users() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/scim/v2/Users"))
        .and(query_param("filter", "userName eq \"jane\""))
        .and(query_param("startIndex", "1"))
        .respond_with(ok_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "totalResults": 1,
            "itemsPerPage": 1,
            "startIndex": 1,
            "Resources": [{ "id": "u-1", "userName": "jane", "active": true }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = ScimListQuery::filter("userName eq \"jane\"");
    query.start_index = Some(1);
    let page = client.scim().list_users(&query).await.unwrap();
    assert_eq!(page.total_results, 1);
    assert_eq!(page.resources[0].user_name, "jane");
}

#[tokio::test]
async fn test_scim_list_groups_extra_params() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/scim/v2/Groups"))
        .and(query_param("sortBy", "displayName"))
        .and(query_param("count", "5"))
        .respond_with(ok_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "totalResults": 0,
            "Resources": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = ScimListQuery::default().param("sortBy", "displayName");
    query.count = Some(5);
    let page = client.scim().list_groups(&query).await.unwrap();
    assert_eq!(page.total_results, 0);
}

#[tokio::test]
async fn test_scim_patch_user_wraps_operations() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/scim/v2/Users/u-1"))
        .respond_with(ok_json(json!({ "id": "u-1", "userName": "jane", "active": false })))
        .mount(&server)
        .await;

    let user = client
        .scim()
        .patch_user(
            "u-1",
            &[ScimPatchOperation::replace("active", json!(false))],
        )
        .await
        .unwrap();
    assert_eq!(user.active, Some(false));

    let body: Value = serde_json::from_slice(&single_request(&server).await.body).unwrap();
    assert_eq!(
        body["Operations"],
        json!([{ "op": "replace", "path": "active", "value": false }])
    );
    assert_eq!(
        body["schemas"],
        json!(["urn:ietf:params:scim:api:messages:2.0:PatchOp"])
    );
}

#[tokio::test]
async fn test_scim_create_user() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/scim/v2/Users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "u-2",
            "userName": "joe",
            "emails": [{ "value": "joe@x.com", "primary": true }],
        })))
        .mount(&server)
        .await;

    let user = ScimUser::new("joe").with_email("joe@x.com");
    let created = client.scim().create_user(&user).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("u-2"));

    let body: Value = serde_json::from_slice(&single_request(&server).await.body).unwrap();
    assert_eq!(body["userName"], "joe");
    assert_eq!(body["emails"][0]["value"], "joe@x.com");
}

#[tokio::test]
async fn test_sso_check() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/oidc/sso-check"))
        .and(query_param("email", "u@corp.test"))
        .respond_with(ok_json(json!({ "has_sso": true, "providers": [{ "id": "p-1" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let check = client.scim().sso_check("u@corp.test").await.unwrap();
    assert!(check.has_sso);
    assert_eq!(check.providers.len(), 1);
}

// =============================================================================
// Admin & connections
// =============================================================================

#[tokio::test]
async fn test_admin_tenant_registry() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/tenants/stats"))
        .respond_with(ok_json(json!({
            "total_tenants": 5,
            "active_tenants": 4,
            "shared_tenants": 3,
            "dedicated_tenants": 2,
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/tenants/t1/test-connection"))
        .respond_with(ok_json(json!({ "success": true, "message": "ok", "latency_ms": 4 })))
        .mount(&server)
        .await;

    let stats = client.admin().get_stats().await.unwrap();
    assert_eq!(stats.total_tenants, 5);
    assert_eq!(stats.dedicated_tenants, 2);

    let outcome = client.admin().test_connection("t1").await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.latency_ms, Some(4));
}

#[tokio::test]
async fn test_admin_action_test_sends_context() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/actions/a-1/test"))
        .and(body_json(json!({ "user": { "id": "u-1" } })))
        .respond_with(ok_json(json!({ "success": true, "data": { "allow": true } })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .admin()
        .test_action("org-1", "a-1", &json!({ "user": { "id": "u-1" } }))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.data, Some(json!({ "allow": true })));
}

#[tokio::test]
async fn test_create_connection() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/organizations/org-1/connections"))
        .and(body_json(json!({
            "name": "Okta",
            "connection_type": "oidc",
            "config": { "issuer": "https://okta.test" },
        })))
        .respond_with(ok_json(json!({
            "id": "c-1",
            "name": "Okta",
            "connection_type": "oidc",
            "scope": "organization",
            "organization_id": "org-1",
            "config": { "issuer": "https://okta.test" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateConnectionRequest {
        name: "Okta".into(),
        connection_type: "oidc".into(),
        config: json!({ "issuer": "https://okta.test" }),
    };
    let connection = client
        .connections()
        .create("org-1", &request)
        .await
        .unwrap();
    assert_eq!(connection.id, "c-1");
    assert!(connection.is_enabled);
}

#[tokio::test]
async fn test_not_found_surfaces_from_service() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/organizations/org-1/connections/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "not_found",
            "message": "Connection not found",
        })))
        .mount(&server)
        .await;

    let err = client
        .connections()
        .get("org-1", "missing")
        .await
        .unwrap_err();
    match err {
        Error::NotFound(api) => assert_eq!(api.message, "Connection not found"),
        other => panic!("Expected Error::NotFound, got {:?}", other),
    }
}
