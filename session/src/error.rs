//! Error types for the session layer.
//!
//! Each seam gets its own enum: the gateway reports what the backend said,
//! the store reports persistence failures, and the controller only ever
//! hands a user-visible message back to callers.

/// Failures reported by a Remote Auth Gateway implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered and refused the request.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The backend answered 401. Login endpoints usually include a message.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// The request never produced a response (DNS, TLS, timeout, offline).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response arrived but did not match the expected envelope.
    #[error("invalid response: {0}")]
    Decode(String),

    /// No gateway exists in this environment (server-side render).
    #[error("auth gateway not available")]
    Unavailable,
}

impl GatewayError {
    /// Message suitable for showing to the user, when the backend supplied one.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message.as_str()),
            Self::Unauthorized { message } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) | Self::Unavailable => None,
        }
    }
}

/// Failures while writing or clearing the persisted credential record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token store io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode user record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Browser storage missing or refusing writes (private mode, quota).
    #[error("token store unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by controller operations that a caller may want to display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Login or registration was refused; the message is user-facing.
    #[error("{0}")]
    Rejected(String),
}

/// Invalid configuration values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
