//! # Cashdesk Error Types
//!
//! Typed error handling for the cashdesk terminal.
//! All backend operations return `Result<T, DeskError>`.

use thiserror::Error;

/// Core error type for all cashdesk operations
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration errors (missing env vars, invalid keymap file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Identifier has no catalog match
    #[error("Identifier not found: {identifier}")]
    IdentifierNotFound { identifier: String },

    /// A referenced entity does not exist on the backend
    #[error("Resource not found: {resource}")]
    ResourceNotFound { resource: String },

    /// Network/HTTP error communicating with the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend replied with a non-success status
    #[error("Backend error [{status}]: {message}")]
    Backend { status: u16, message: String },

    /// Payment was declined by the backend
    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// Returns true if this error means "no catalog match".
    ///
    /// The cashdesk surfaces transport failures and true misses through the
    /// same operator alert; this distinction only matters for logging.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DeskError::IdentifierNotFound { .. } | DeskError::ResourceNotFound { .. }
        )
    }

    /// Returns true if retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            DeskError::Network(_) => true,
            DeskError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for cashdesk operations
pub type DeskResult<T> = Result<T, DeskError>;
