//! Routing client error types.

/// Errors from a routing service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered but reported a failure status
    #[error("routing service returned {status}: {message}")]
    Status { status: String, message: String },

    /// The service rejected the API key
    #[error("unauthorized: the API key was rejected by the routing service")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the routing service")]
    RateLimited,

    /// A route's distance could not be read
    #[error("invalid distance in response: {0:?}")]
    InvalidDistance(String),

    /// Client not configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}
