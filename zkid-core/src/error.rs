//! Error types for zkid-core.
//!
//! Covers configuration validation, registry bookkeeping and logging setup,
//! and wraps proof-layer errors. A rejected proof is not an error here
//! either: the gate reports it as a denied decision.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use thiserror::Error;
use zkid_zkp::ZkpError;

/// Result type for zkid-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the identity gate and its supporting services.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid input provided to an operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The identity is already bound to a different public key.
    #[error("Identity already registered with a different key: {0}")]
    IdentityAlreadyRegistered(String),

    /// No public key is registered for the identity.
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),

    /// Error from the proof layer.
    #[error(transparent)]
    Proof(#[from] ZkpError),
}
