//! Data models for the CoreAuth API.
//!
//! Request and response types, organized by service:
//!
//! - [`auth`] - Tokens, profiles, passwordless and self-service flows
//! - [`oauth2`] - Token endpoint, userinfo, introspection and discovery
//! - [`mfa`] - TOTP and SMS enrollment
//! - [`tenants`] - Tenant creation, security policy and branding
//! - [`applications`] - Applications, OAuth apps and email templates
//! - [`fga`] - Relation tuples, checks, stores, models and store keys
//! - [`audit`] - Audit log records and queries
//! - [`webhooks`] - Webhooks and deliveries
//! - [`groups`] - Groups, members, roles and invitations
//! - [`scim`] - SCIM resources, tokens, sessions and OIDC providers
//! - [`admin`] - Tenant registry, actions and health
//! - [`connections`] - Authentication connections
//!
//! Most response fields are optional: the server omits fields it has no
//! value for, and records are shared between several endpoints that fill
//! them to different degrees.

use serde::{Deserialize, Deserializer};

pub mod admin;
pub mod applications;
pub mod audit;
pub mod auth;
pub mod connections;
pub mod fga;
pub mod groups;
pub mod mfa;
pub mod oauth2;
pub mod scim;
pub mod tenants;
pub mod webhooks;

// Re-export commonly used types
pub use admin::*;
pub use applications::*;
pub use audit::*;
pub use auth::*;
pub use connections::*;
pub use fga::*;
pub use groups::*;
pub use mfa::*;
pub use oauth2::*;
pub use scim::*;
pub use tenants::*;
pub use webhooks::*;

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
