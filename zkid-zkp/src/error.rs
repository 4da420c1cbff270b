//! Error types for zkid-zkp
//!
//! A proof that fails to verify is not an error: the verifier answers with
//! `false`. The variants below cover structural problems with inputs (keys,
//! identities, encodings) and a missing entropy source.

use thiserror::Error;

/// Result type for proof operations
pub type Result<T> = std::result::Result<T, ZkpError>;

/// Errors that can occur while generating proofs or decoding proof material
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZkpError {
    /// Private scalar is zero or not below the curve order
    #[error("Invalid private key: scalar must lie in [1, n-1]")]
    InvalidKey,

    /// Private key bytes have the wrong width
    #[error("Invalid private key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// The secure random source failed or produced no usable nonce
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Proofs must be bound to a non-empty identity
    #[error("Identity must not be empty")]
    EmptyIdentity,

    /// Public key encoding is malformed or not a valid curve point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Transcript could not be decoded
    #[error("Malformed transcript: {0}")]
    MalformedTranscript(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_carry_key_material() {
        let err = ZkpError::InvalidKey;
        assert_eq!(err.to_string(), "Invalid private key: scalar must lie in [1, n-1]");

        let err = ZkpError::InvalidKeyLength { expected: 32, actual: 31 };
        assert_eq!(err.to_string(), "Invalid private key length: expected 32, got 31");
    }

    #[test]
    fn test_malformed_transcript_message() {
        let err = ZkpError::MalformedTranscript("response out of range".to_string());
        assert!(err.to_string().contains("response out of range"));
    }
}
