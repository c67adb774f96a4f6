//! Client configuration options.

use std::time::Duration;

/// Configuration for the CoreAuth client.
///
/// # Example
///
/// ```
/// use coreauth_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout, applied to every call
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Whether 3xx responses are followed.
    ///
    /// Off by default: a redirect (e.g. from the self-service browser flows
    /// or `/logout`) is reported as [`Error::Api`](crate::Error::Api) carrying
    /// the 3xx status.
    pub follow_redirects: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("coreauth-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            follow_redirects: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Follow (or stop following) HTTP redirects.
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}
