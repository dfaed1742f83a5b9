//! Error types for gearadmin
//!
//! Provides a unified error type for all admin operations.
//!
//! A failed connect is deliberately NOT an error: it is reported through
//! [`Outcome::Failed`](crate::protocol::Outcome) so callers can poll a server
//! that may be down without matching on errors.

use thiserror::Error;

use crate::protocol::{Failure, ServerError};

/// Result type alias using AdminError
pub type Result<T> = std::result::Result<T, AdminError>;

/// Unified error type for gearadmin operations
#[derive(Debug, Error)]
pub enum AdminError {
    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Server returned error: {0}")]
    Server(ServerError),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Transport fault while {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Server unavailable: {0}")]
    Unavailable(Failure),
}

impl AdminError {
    /// Build a transport fault for a failed I/O step
    pub fn transport(action: &'static str, source: std::io::Error) -> Self {
        AdminError::Transport { action, source }
    }

    /// The server error, if this is an `ERR` reply
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            AdminError::Server(err) => Some(err),
            _ => None,
        }
    }
}
