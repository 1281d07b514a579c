use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload attached under `data` in a JSON-RPC error object. Odoo reports
/// the server-side exception class as a dotted name in `name` and the
/// exception message in `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcErrorData {
    pub name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub arguments: Vec<Value>,
    pub debug: Option<String>,
    #[serde(flatten, default)]
    pub extra: serde_json::Map<String, Value>,
}

/// JSON-RPC error object as returned by the Odoo web endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<RpcErrorData>,
}

impl RpcError {
    /// Dotted exception-class name reported by the server, if any.
    pub fn exception_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.name.as_deref())
    }

    /// Server exception message when present, envelope-level message
    /// otherwise.
    pub fn display_message(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.message.as_deref())
            .unwrap_or(&self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OdooError {
    /// Network or HTTP-layer failure, surfaced as-is from the transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Body did not conform to the JSON-RPC envelope shape.
    #[error("invalid RPC response from {context}: {body}")]
    InvalidResponse { context: String, body: String },

    /// Well-formed RPC error with no specific mapping.
    #[error("RPC error: {message}")]
    Rpc { message: String, error: RpcError },

    /// RPC error whose payload names an access-control exception.
    #[error("access denied: {message}")]
    AccessDenied { message: String, error: RpcError },

    /// Login-specific: a success envelope whose payload carries no
    /// authenticated user.
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String, result: Value },
}

impl OdooError {
    /// True for failures raised by the RPC layer itself, as opposed to the
    /// transport or the login payload check. Lets callers catch the whole
    /// RPC family in one arm.
    pub fn is_rpc_failure(&self) -> bool {
        matches!(
            self,
            OdooError::InvalidResponse { .. }
                | OdooError::Rpc { .. }
                | OdooError::AccessDenied { .. }
        )
    }
}

impl From<reqwest::Error> for OdooError {
    fn from(err: reqwest::Error) -> Self {
        OdooError::Transport(Box::new(err))
    }
}

pub type OdooResult<T> = Result<T, OdooError>;
