//! API service modules for CoreAuth endpoints.
//!
//! Each service wraps one area of the API and shares the client's
//! [`Transport`](crate::client::Transport). Services are obtained from
//! [`CoreAuthClient`](crate::CoreAuthClient) accessors and are cheap to
//! create.

mod admin;
mod applications;
mod audit;
mod auth;
mod connections;
mod fga;
mod groups;
mod mfa;
mod oauth2;
mod scim;
mod tenants;
mod webhooks;

pub use admin::AdminService;
pub use applications::ApplicationsService;
pub use audit::AuditService;
pub use auth::AuthService;
pub use connections::ConnectionsService;
pub use fga::FgaService;
pub use groups::GroupsService;
pub use mfa::MfaService;
pub use oauth2::OAuth2Service;
pub use scim::ScimService;
pub use tenants::TenantsService;
pub use webhooks::WebhooksService;
