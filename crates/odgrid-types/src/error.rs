use std::fmt;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure taxonomy for the remote data gateway.
///
/// Every remote operation fails with exactly one of these; callers decide
/// whether to surface, log, or exit. No variant implies a retry.
#[derive(Debug)]
pub enum GatewayError {
    /// Request never reached the server or produced no response
    Network(String),
    /// Non-2xx response on a create/update/delete
    RemoteWrite { status: u16, body: String },
    /// Response body was not in the expected shape
    Parse(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "Network error: {}", msg),
            GatewayError::RemoteWrite { status, body } => {
                write!(f, "Remote write rejected (HTTP {}): {}", status, body)
            }
            GatewayError::Parse(msg) => write!(f, "Unexpected response shape: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}
