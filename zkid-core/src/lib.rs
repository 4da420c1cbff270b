#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # zkid-core
//!
//! Server-side plumbing around [`zkid_zkp`] identity proofs: a key registry,
//! an authorization gate, configuration and logging.
//!
//! ## Example
//!
//! ```rust
//! use zkid_core::{AuthorizationRequest, GateConfig, IdentityGate};
//! use zkid_core::zkp::NistP256;
//!
//! let gate = IdentityGate::<NistP256>::new(GateConfig::for_production()).unwrap();
//!
//! // Enrollment: the client keeps the key pair, the gate keeps the public key.
//! let keys = gate.enroll(b"user-1").unwrap();
//!
//! // The client attaches a proof to its request.
//! let request = AuthorizationRequest::prepare(&keys, "user-1", "update_care_plan").unwrap();
//!
//! assert!(gate.authorize_request(&request).is_granted());
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod registry;

pub use config::GateConfig;
pub use error::{CoreError, Result};
pub use gate::{AuthorizationDecision, AuthorizationRequest, DenialReason, IdentityGate};
pub use logging::{fingerprint, init_tracing, sanitize_data};
pub use registry::KeyRegistry;

/// Re-export of the proof crate.
pub use zkid_zkp as zkp;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
