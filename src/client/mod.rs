//! HTTP client and service layer for the CoreAuth API.
//!
//! This module provides the main entry point [`CoreAuthClient`], the
//! [`Transport`] it shares with every service, and the [`ApiRequest`]
//! descriptor for calling endpoints directly.
//!
//! # Example
//!
//! ```no_run
//! use coreauth_rs::CoreAuthClient;
//! use coreauth_rs::client::ApiRequest;
//!
//! # async fn example() -> coreauth_rs::Result<()> {
//! let client = CoreAuthClient::with_token("http://localhost:3000", "access-token")?;
//!
//! // Raw call through the shared transport
//! let health = client
//!     .transport()
//!     .request(ApiRequest::get("/health"))
//!     .await?;
//! println!("{:?}", health);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod request;
mod transport;

pub use config::ClientConfig;
pub use http::CoreAuthClient;
pub use request::{ApiRequest, RequestBody};
pub use transport::Transport;
