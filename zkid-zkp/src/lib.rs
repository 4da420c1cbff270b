#![doc = "Identity-bound Schnorr proofs of knowledge"]
//!
//! # zkid-zkp
//!
//! Non-interactive proof of knowledge of a discrete logarithm on a
//! prime-order elliptic curve, made non-interactive with the Fiat-Shamir
//! transform and bound to an identity string. A holder of `x` with public key
//! `P = x·G` proves "I control the key for this user id" without revealing `x`.
//!
//! ## Protocol
//!
//! 1. Prover picks random `k`, computes `R = k·G`
//! 2. Challenge `c = SHA-256(identity || x(R)) mod n`
//! 3. Response `s = k - x·c mod n`
//! 4. Verifier checks `s·G + c·P == R`
//!
//! ## Example
//!
//! ```
//! use zkid_zkp::{KeyPair, NistP256, verify_proof, verify_proof_for_key};
//!
//! let keys = KeyPair::<NistP256>::generate().unwrap();
//! let transcript = keys.prove(b"alice").unwrap();
//!
//! assert!(verify_proof(b"alice", &transcript));
//! assert!(verify_proof_for_key(b"alice", keys.public_key(), &transcript));
//! assert!(!verify_proof(b"bob", &transcript));
//! ```
//!
//! ## Security
//!
//! - Nonces come from the OS CSPRNG; generation fails rather than falling back
//!   when it is unavailable
//! - Points travel as SEC1 compressed encodings and are validated on decode
//! - Verification is a total function returning `bool`
//! - Curve arithmetic is the constant-time RustCrypto `p256` / `k256` code

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod challenge;
pub mod curve;
pub mod error;
pub mod keys;
pub mod prover;
pub mod transcript;
pub mod verifier;

pub use challenge::derive_challenge;
pub use curve::{DefaultCurve, NistP256, ProofCurve, Secp256k1};
pub use error::{Result, ZkpError};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use prover::{generate_proof, generate_proof_with_rng, prove};
pub use transcript::{TRANSCRIPT_LEN, Transcript};
pub use verifier::{verify_encoded, verify_proof, verify_proof_for_key};
