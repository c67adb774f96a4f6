//! Error types for the CoreAuth API client.
//!
//! Every failure a caller can observe is an [`Error`]. Non-2xx responses are
//! split by status code into dedicated variants so callers can match on the
//! kind of failure (re-authenticate on [`Error::Authentication`], back off on
//! [`Error::RateLimit`], ...) without inspecting raw status codes.

use std::fmt;

use thiserror::Error;

/// A specialized `Result` type for CoreAuth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Details of a non-2xx response from the CoreAuth API.
///
/// `error` is the short machine-readable code (e.g. `"not_found"`) and
/// `message` the human-readable text. When the server replied with a body
/// that is not JSON, `error` is empty and `message` holds the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Short error code supplied by the server
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error.is_empty() {
            write!(f, "[{}] {}", self.status, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.status, self.error, self.message)
        }
    }
}

/// The main error type for all CoreAuth API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A body could not be serialized or a response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 400 Bad Request
    #[error("Validation error: {0}")]
    Validation(ApiError),

    /// 401 Unauthorized
    #[error("Authentication error: {0}")]
    Authentication(ApiError),

    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ApiError),

    /// 404 Not Found
    #[error("Not found: {0}")]
    NotFound(ApiError),

    /// 409 Conflict
    #[error("Conflict: {0}")]
    Conflict(ApiError),

    /// 429 Too Many Requests
    #[error("Rate limited: {0}")]
    RateLimit(ApiError),

    /// Any other non-2xx response
    #[error("API error: {0}")]
    Api(ApiError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Classify a non-2xx response by status code.
    ///
    /// The supplied `error` and `message` are kept as-is; the per-kind
    /// defaults are only used by the dedicated constructors such as
    /// [`Error::not_found`].
    ///
    /// ```
    /// use coreauth_rs::Error;
    ///
    /// let err = Error::from_status(404, "user_not_found", "No such user");
    /// assert!(matches!(err, Error::NotFound(_)));
    ///
    /// let err = Error::from_status(503, "", "upstream down");
    /// assert_eq!(err.status(), Some(503));
    /// ```
    pub fn from_status(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        let api = ApiError::new(status, error, message);
        match status {
            400 => Error::Validation(api),
            401 => Error::Authentication(api),
            403 => Error::Forbidden(api),
            404 => Error::NotFound(api),
            409 => Error::Conflict(api),
            429 => Error::RateLimit(api),
            _ => Error::Api(api),
        }
    }

    /// A 400 error with the default code and message.
    pub fn validation() -> Self {
        Error::Validation(ApiError::new(400, "validation_error", "Invalid request"))
    }

    /// A 401 error with the default code and message.
    pub fn unauthorized() -> Self {
        Error::Authentication(ApiError::new(401, "unauthorized", "Authentication required"))
    }

    /// A 403 error with the default code and message.
    pub fn forbidden() -> Self {
        Error::Forbidden(ApiError::new(403, "forbidden", "Insufficient permissions"))
    }

    /// A 404 error with the default code and message.
    pub fn not_found() -> Self {
        Error::NotFound(ApiError::new(404, "not_found", "Resource not found"))
    }

    /// A 409 error with the default code and message.
    pub fn conflict() -> Self {
        Error::Conflict(ApiError::new(409, "conflict", "Resource already exists"))
    }

    /// A 429 error with the default code and message.
    pub fn rate_limited() -> Self {
        Error::RateLimit(ApiError::new(429, "rate_limited", "Rate limit exceeded"))
    }

    /// The response details, if this error came from a non-2xx response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Validation(api)
            | Error::Authentication(api)
            | Error::Forbidden(api)
            | Error::NotFound(api)
            | Error::Conflict(api)
            | Error::RateLimit(api)
            | Error::Api(api) => Some(api),
            _ => None,
        }
    }

    /// The HTTP status code, if this error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|api| api.status)
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(err) if err.is_timeout())
    }

    /// Returns `true` if this error is potentially transient.
    ///
    /// The client never retries on its own; this is a hint for callers that
    /// implement their own retry policy.
    ///
    /// # Example
    ///
    /// ```
    /// use coreauth_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimit(_) => true,
            Error::Api(api) => api.status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the credential is missing, expired or insufficient.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::Forbidden(_))
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self.api_error() {
            Some(api) => (400..500).contains(&api.status),
            None => matches!(self, Error::InvalidInput(_) | Error::UrlParse(_)),
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}
