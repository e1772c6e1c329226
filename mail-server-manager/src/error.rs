use serde::{Deserialize, Serialize};

use crate::types::{AccountAction, UnsupportedAction};

/// Unified error type for all server manager operations.
///
/// Each variant includes a `server_type` field naming the mail platform that
/// produced the error (e.g. `"Mailcow"`), plus variant-specific context. All
/// variants are serializable so the host can forward them as structured errors.
///
/// Human-facing messages follow the host's templates: the action that failed
/// and the server type are always part of the rendered text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum ServerError {
    /// The server rejected the configured API key.
    AuthenticationFailed {
        /// Server type that produced the error.
        server_type: String,
        /// Raw response body, if one was received.
        raw_message: Option<String>,
    },

    /// The connection check did not return the expected status payload.
    ConnectionFailed {
        /// Server type that produced the error.
        server_type: String,
        /// Raw response body, if one was received.
        raw_message: Option<String>,
    },

    /// A lifecycle step completed without a success marker in its response.
    OperationFailed {
        /// Server type that produced the error.
        server_type: String,
        /// The step that failed.
        action: AccountAction,
        /// Raw response body of the failing request.
        raw_message: Option<String>,
    },

    /// The server platform cannot perform the requested change.
    Unsupported {
        /// Server type that produced the error.
        server_type: String,
        /// The change that was requested.
        action: UnsupportedAction,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    NetworkError {
        /// Server type that produced the error.
        server_type: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Server type that produced the error.
        server_type: String,
        /// Error details.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Server type that produced the error.
        server_type: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The server configuration is unusable (empty host, malformed host, missing key).
    InvalidConfig {
        /// Server type that produced the error.
        server_type: String,
        /// Name of the offending configuration field.
        field: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl ServerError {
    /// 是否为预期行为（远端拒绝、平台不支持等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. }
                | Self::Unsupported { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Server type recorded on the error.
    pub fn server_type(&self) -> &str {
        match self {
            Self::AuthenticationFailed { server_type, .. }
            | Self::ConnectionFailed { server_type, .. }
            | Self::OperationFailed { server_type, .. }
            | Self::Unsupported { server_type, .. }
            | Self::NetworkError { server_type, .. }
            | Self::Timeout { server_type, .. }
            | Self::SerializationError { server_type, .. }
            | Self::InvalidConfig { server_type, .. } => server_type,
        }
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { server_type, .. }
            | Self::ConnectionFailed { server_type, .. } => write!(
                f,
                "Failed to connect to the {server_type} server. Please verify your credentials and configuration"
            ),
            Self::OperationFailed {
                server_type,
                action,
                ..
            } => write!(
                f,
                "Failed to {action} on the {server_type} server, check the error logs for further details"
            ),
            Self::Unsupported {
                server_type,
                action,
            } => write!(f, "{server_type} does not support {action}"),
            Self::NetworkError {
                server_type,
                detail,
            } => write!(f, "[{server_type}] Network error: {detail}"),
            Self::Timeout {
                server_type,
                detail,
            } => write!(f, "[{server_type}] Request timeout: {detail}"),
            Self::SerializationError {
                server_type,
                detail,
            } => write!(f, "[{server_type}] Serialization error: {detail}"),
            Self::InvalidConfig {
                server_type,
                field,
                detail,
            } => write!(
                f,
                "[{server_type}] Invalid configuration '{field}': {detail}"
            ),
        }
    }
}

impl std::error::Error for ServerError {}

/// Convenience type alias for `Result<T, ServerError>`.
pub type Result<T> = std::result::Result<T, ServerError>;
