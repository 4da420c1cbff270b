#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Identity to public key bindings
//!
//! The registry is what turns "some key holder proved something about this
//! identity" into "the enrolled key holder for this identity proved it".
//! Clones share the same underlying map.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};
use zkid_zkp::{DefaultCurve, ProofCurve, PublicKey};

use crate::error::{CoreError, Result};
use crate::logging::fingerprint;

/// Thread-safe map from identity bytes to the public key enrolled for them.
pub struct KeyRegistry<C: ProofCurve = DefaultCurve> {
    keys: Arc<RwLock<HashMap<Vec<u8>, PublicKey<C>>>>,
}

impl<C: ProofCurve> KeyRegistry<C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { keys: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Bind `identity` to `public_key`.
    ///
    /// Registering the same key again is a no-op.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] for an empty identity and
    /// [`CoreError::IdentityAlreadyRegistered`] if a different key is bound.
    pub fn register(&self, identity: &[u8], public_key: PublicKey<C>) -> Result<()> {
        ensure_identity(identity)?;

        let mut keys = self.keys.write();
        match keys.get(identity) {
            Some(existing) if *existing == public_key => {
                debug!(identity = %fingerprint(identity), "identity already bound to this key");
                Ok(())
            }
            Some(_) => Err(CoreError::IdentityAlreadyRegistered(fingerprint(identity))),
            None => {
                keys.insert(identity.to_vec(), public_key);
                info!(identity = %fingerprint(identity), curve = C::NAME, "registered identity");
                Ok(())
            }
        }
    }

    /// Bind `identity` to `public_key`, returning any key it replaces.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] for an empty identity.
    pub fn replace(&self, identity: &[u8], public_key: PublicKey<C>) -> Result<Option<PublicKey<C>>> {
        ensure_identity(identity)?;

        let previous = self.keys.write().insert(identity.to_vec(), public_key);
        info!(
            identity = %fingerprint(identity),
            rotated = previous.is_some(),
            "replaced identity key"
        );
        Ok(previous)
    }

    /// Remove the binding for `identity` and return its key.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownIdentity`] if nothing is bound.
    pub fn revoke(&self, identity: &[u8]) -> Result<PublicKey<C>> {
        let removed = self
            .keys
            .write()
            .remove(identity)
            .ok_or_else(|| CoreError::UnknownIdentity(fingerprint(identity)))?;
        info!(identity = %fingerprint(identity), "revoked identity");
        Ok(removed)
    }

    /// The key bound to `identity`, if any.
    #[must_use]
    pub fn lookup(&self, identity: &[u8]) -> Option<PublicKey<C>> {
        self.keys.read().get(identity).copied()
    }

    /// Whether `identity` has a bound key.
    #[must_use]
    pub fn contains(&self, identity: &[u8]) -> bool {
        self.keys.read().contains_key(identity)
    }

    /// Number of registered identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// Whether no identities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl<C: ProofCurve> Default for KeyRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ProofCurve> Clone for KeyRegistry<C> {
    fn clone(&self) -> Self {
        Self { keys: Arc::clone(&self.keys) }
    }
}

impl<C: ProofCurve> fmt::Debug for KeyRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistry").field("curve", &C::NAME).field("len", &self.len()).finish()
    }
}

fn ensure_identity(identity: &[u8]) -> Result<()> {
    if identity.is_empty() {
        return Err(CoreError::InvalidInput("Identity cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use zkid_zkp::{KeyPair, NistP256, Secp256k1};

    #[test]
    fn test_register_and_lookup() {
        let registry = KeyRegistry::<NistP256>::new();
        let pair = KeyPair::<NistP256>::generate().unwrap();

        assert!(registry.is_empty());
        registry.register(b"user-1", *pair.public_key()).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(b"user-1"));
        assert_eq!(registry.lookup(b"user-1"), Some(*pair.public_key()));
        assert_eq!(registry.lookup(b"user-2"), None);
    }

    #[test]
    fn test_register_same_key_is_idempotent() {
        let registry = KeyRegistry::<Secp256k1>::new();
        let pair = KeyPair::<Secp256k1>::generate().unwrap();

        registry.register(b"user-1", *pair.public_key()).unwrap();
        registry.register(b"user-1", *pair.public_key()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_conflicting_key_fails() {
        let registry = KeyRegistry::<NistP256>::new();
        let first = KeyPair::<NistP256>::generate().unwrap();
        let second = KeyPair::<NistP256>::generate().unwrap();

        registry.register(b"user-1", *first.public_key()).unwrap();
        let err = registry.register(b"user-1", *second.public_key()).unwrap_err();

        assert!(matches!(err, CoreError::IdentityAlreadyRegistered(_)));
        assert_eq!(registry.lookup(b"user-1"), Some(*first.public_key()));
    }

    #[test]
    fn test_error_does_not_leak_identity() {
        let registry = KeyRegistry::<NistP256>::new();
        registry.register(b"secret-name", *KeyPair::<NistP256>::generate().unwrap().public_key()).unwrap();
        let err = registry
            .register(b"secret-name", *KeyPair::<NistP256>::generate().unwrap().public_key())
            .unwrap_err();
        assert!(!err.to_string().contains("secret-name"));
    }

    #[test]
    fn test_empty_identity_rejected() {
        let registry = KeyRegistry::<NistP256>::new();
        let pair = KeyPair::<NistP256>::generate().unwrap();

        assert!(matches!(registry.register(b"", *pair.public_key()), Err(CoreError::InvalidInput(_))));
        assert!(matches!(registry.replace(b"", *pair.public_key()), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_replace_and_revoke() {
        let registry = KeyRegistry::<NistP256>::new();
        let old = KeyPair::<NistP256>::generate().unwrap();
        let new = KeyPair::<NistP256>::generate().unwrap();

        assert_eq!(registry.replace(b"user-1", *old.public_key()).unwrap(), None);
        assert_eq!(registry.replace(b"user-1", *new.public_key()).unwrap(), Some(*old.public_key()));
        assert_eq!(registry.lookup(b"user-1"), Some(*new.public_key()));

        assert_eq!(registry.revoke(b"user-1").unwrap(), *new.public_key());
        assert!(matches!(registry.revoke(b"user-1"), Err(CoreError::UnknownIdentity(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = KeyRegistry::<NistP256>::new();
        let view = registry.clone();
        registry.register(b"user-1", *KeyPair::<NistP256>::generate().unwrap().public_key()).unwrap();
        assert!(view.contains(b"user-1"));
        assert!(format!("{:?}", view).contains("len: 1"));
    }
}
