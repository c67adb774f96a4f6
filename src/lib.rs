//! # coreauth-rs
//!
//! An async Rust client for the CoreAuth identity platform.
//!
//! The crate wraps CoreAuth's REST API: authentication and self-service
//! flows, OAuth2/OpenID Connect, MFA, tenants, applications, fine-grained
//! authorization, audit logs, webhooks, groups and invitations, SCIM 2.0
//! provisioning, platform administration and connections.
//!
//! ## Features
//!
//! - **One shared transport**: a single connection pool and bearer token
//!   behind every service handle
//! - **Typed errors**: non-2xx responses map to [`Error`] variants by status
//! - **Typed models**: request and response records for the well-defined
//!   objects, `serde_json::Value` where the payload varies
//! - **Escape hatch**: [`Transport::request`](client::Transport::request)
//!   reaches endpoints the services do not wrap
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coreauth_rs::CoreAuthClient;
//!
//! #[tokio::main]
//! async fn main() -> coreauth_rs::Result<()> {
//!     let client = CoreAuthClient::new("http://localhost:3000")?;
//!
//!     // Log in and keep the access token for later calls
//!     let tokens = client.login("my-tenant", "jane@example.com", "password").await?;
//!     if tokens.requires_mfa() {
//!         println!("A second factor is required");
//!         return Ok(());
//!     }
//!
//!     let profile = client.auth().get_profile().await?;
//!     println!("Logged in as {}", profile.email);
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use coreauth_rs::{CoreAuthClient, Error};
//!
//! # async fn example(client: CoreAuthClient) {
//! match client.auth().get_profile().await {
//!     Ok(profile) => println!("{}", profile.email),
//!     Err(Error::Authentication(api)) => println!("log in again: {}", api.message),
//!     Err(err) if err.is_retryable() => println!("try later: {}", err),
//!     Err(err) => println!("failed: {}", err),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use client::{ClientConfig, CoreAuthClient};
pub use error::{ApiError, Error, Result};

/// Prelude module for convenient imports.
///
/// ```rust
/// use coreauth_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{ApiRequest, ClientConfig, CoreAuthClient, Transport};
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::models::{
        // Authentication
        AuthResponse, UserProfile,
        // OAuth2
        AuthorizeOptions, TokenRequest, TokenResponse,
        // Authorization
        CheckRequest, CheckResponse, TupleKey,
        // SCIM
        ScimListQuery, ScimPatchOperation, ScimUser,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let client = CoreAuthClient::with_config(
            "https://auth.example.com/",
            None,
            ClientConfig::default(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://auth.example.com");
    }

    #[test]
    fn test_authorize_url_defaults() {
        let client = CoreAuthClient::new("https://auth.example.com").unwrap();
        let url = client
            .oauth2()
            .authorize_url("app", "https://app.test/cb", Default::default())
            .unwrap();
        assert_eq!(
            url,
            "https://auth.example.com/authorize?client_id=app&redirect_uri=https%3A%2F%2Fapp.test%2Fcb&response_type=code&scope=openid"
        );
    }
}
