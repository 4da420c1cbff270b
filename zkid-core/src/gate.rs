#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Identity gate
//!
//! Server-side check that runs before an action is carried out on behalf of
//! an identity. The client attaches a proof transcript to its request; the
//! gate checks the identity against its limits, looks up the enrolled key and
//! verifies the proof against it.
//!
//! The proof binds the identity only. The `action` field of an
//! [`AuthorizationRequest`] travels alongside it unauthenticated.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zkid_zkp::{DefaultCurve, KeyPair, ProofCurve, Transcript, verify_proof, verify_proof_for_key};

use crate::config::GateConfig;
use crate::error::{CoreError, Result};
use crate::logging::fingerprint;
use crate::registry::KeyRegistry;

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// The identity was empty.
    EmptyIdentity,
    /// The identity exceeded the configured maximum length.
    IdentityTooLong,
    /// No key is enrolled for the identity.
    UnknownIdentity,
    /// The proof was malformed, bound to another identity or made with
    /// another key.
    ProofRejected,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::EmptyIdentity => write!(f, "empty identity"),
            DenialReason::IdentityTooLong => write!(f, "identity too long"),
            DenialReason::UnknownIdentity => write!(f, "unknown identity"),
            DenialReason::ProofRejected => write!(f, "proof rejected"),
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationDecision {
    /// The proof checked out; the action may proceed.
    Granted,
    /// The request was refused.
    Denied(DenialReason),
}

impl AuthorizationDecision {
    /// Whether the action may proceed.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationDecision::Granted)
    }

    /// The denial reason, if denied.
    #[must_use]
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            AuthorizationDecision::Granted => None,
            AuthorizationDecision::Denied(reason) => Some(*reason),
        }
    }
}

/// An action request carrying an identity proof.
///
/// Serializes as `{"identity": ..., "action": ..., "proof": {...}}`, with the
/// proof in the transcript's JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AuthorizationRequest<C: ProofCurve = DefaultCurve> {
    /// Identity the proof is bound to.
    pub identity: String,
    /// Application-defined action name.
    pub action: String,
    /// Proof transcript.
    pub proof: Transcript<C>,
}

impl<C: ProofCurve> AuthorizationRequest<C> {
    /// Wrap an existing proof.
    #[must_use]
    pub fn new(identity: impl Into<String>, action: impl Into<String>, proof: Transcript<C>) -> Self {
        Self { identity: identity.into(), action: action.into(), proof }
    }

    /// Build a request on the client side, proving with `keys`.
    ///
    /// # Errors
    /// Propagates proof generation errors.
    pub fn prepare(
        keys: &KeyPair<C>,
        identity: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self> {
        let identity = identity.into();
        let proof = keys.prove(identity.as_bytes())?;
        Ok(Self { identity, action: action.into(), proof })
    }
}

/// Verifies identity proofs against enrolled keys.
pub struct IdentityGate<C: ProofCurve = DefaultCurve> {
    config: GateConfig,
    registry: KeyRegistry<C>,
}

impl<C: ProofCurve> IdentityGate<C> {
    /// Create a gate with an empty registry.
    ///
    /// # Errors
    /// Returns [`CoreError::ConfigurationError`] if `config` is invalid.
    pub fn new(config: GateConfig) -> Result<Self> {
        Self::with_registry(config, KeyRegistry::new())
    }

    /// Create a gate over an existing (possibly shared) registry.
    ///
    /// # Errors
    /// Returns [`CoreError::ConfigurationError`] if `config` is invalid.
    pub fn with_registry(config: GateConfig, registry: KeyRegistry<C>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// The key registry.
    #[must_use]
    pub fn registry(&self) -> &KeyRegistry<C> {
        &self.registry
    }

    /// Generate a key pair for `identity` and register its public key.
    ///
    /// The caller hands the returned pair to the identity's owner; the gate
    /// keeps only the public key.
    ///
    /// # Errors
    /// - [`CoreError::InvalidInput`] if the identity is empty or too long
    /// - [`CoreError::IdentityAlreadyRegistered`] if a key is already bound
    /// - [`CoreError::Proof`] if key generation fails
    pub fn enroll(&self, identity: &[u8]) -> Result<KeyPair<C>> {
        if let Some(reason) = self.check_identity(identity) {
            return Err(CoreError::InvalidInput(format!("Cannot enroll identity: {}", reason)));
        }

        let keys = KeyPair::<C>::generate()?;
        self.registry.register(identity, *keys.public_key())?;
        Ok(keys)
    }

    /// Decide whether `transcript` authorizes `identity`.
    #[must_use]
    pub fn authorize(&self, identity: &[u8], transcript: &Transcript<C>) -> AuthorizationDecision {
        if let Some(reason) = self.check_identity(identity) {
            return self.deny(identity, reason);
        }

        let accepted = if self.config.require_registered_key {
            match self.registry.lookup(identity) {
                Some(key) => verify_proof_for_key(identity, &key, transcript),
                None => return self.deny(identity, DenialReason::UnknownIdentity),
            }
        } else {
            verify_proof(identity, transcript)
        };

        if !accepted {
            return self.deny(identity, DenialReason::ProofRejected);
        }

        info!(identity = %fingerprint(identity), curve = C::NAME, "authorization granted");
        AuthorizationDecision::Granted
    }

    /// Decide on a binary-encoded transcript; undecodable input is a
    /// rejected proof.
    #[must_use]
    pub fn authorize_encoded(&self, identity: &[u8], bytes: &[u8]) -> AuthorizationDecision {
        if let Some(reason) = self.check_identity(identity) {
            return self.deny(identity, reason);
        }

        match Transcript::<C>::from_bytes(bytes) {
            Ok(transcript) => self.authorize(identity, &transcript),
            Err(_) => self.deny(identity, DenialReason::ProofRejected),
        }
    }

    /// Decide on a full action request.
    #[must_use]
    pub fn authorize_request(&self, request: &AuthorizationRequest<C>) -> AuthorizationDecision {
        let decision = self.authorize(request.identity.as_bytes(), &request.proof);
        if decision.is_granted() {
            info!(
                identity = %fingerprint(request.identity.as_bytes()),
                action = %request.action,
                "action authorized"
            );
        }
        decision
    }

    fn check_identity(&self, identity: &[u8]) -> Option<DenialReason> {
        if identity.is_empty() {
            Some(DenialReason::EmptyIdentity)
        } else if identity.len() > self.config.max_identity_len {
            Some(DenialReason::IdentityTooLong)
        } else {
            None
        }
    }

    fn deny(&self, identity: &[u8], reason: DenialReason) -> AuthorizationDecision {
        if self.config.log_rejections {
            warn!(identity = %fingerprint(identity), %reason, "authorization denied");
        }
        AuthorizationDecision::Denied(reason)
    }
}

impl<C: ProofCurve> fmt::Debug for IdentityGate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityGate")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}
