//! Proof verification
//!
//! Accepts iff `s·G + c·P == R` with `c = H(id || x(R)) mod n`.
//!
//! From `s = k - x·c`: `s·G = R - c·P`, so the equation holds exactly when
//! the prover knew `x` with `P = x·G`. The comparison is full point equality,
//! so a commitment with the wrong y-parity is rejected even though it yields
//! the same challenge.
//!
//! Every entry point here is total: malformed input, invalid points and failed
//! equations all come back as `false`, and the individual checks are folded
//! into a single [`subtle::Choice`] so callers cannot tell which one failed.

use subtle::{Choice, ConstantTimeEq};
use tracing::trace;

use crate::challenge::derive_challenge;
use crate::curve::ProofCurve;
use crate::keys::PublicKey;
use crate::transcript::Transcript;

/// Check a transcript against a claimed identity.
///
/// The transcript's own public key is the statement being proven; callers
/// that hold a registered key for `identity` should use
/// [`verify_proof_for_key`].
#[must_use]
pub fn verify_proof<C: ProofCurve>(identity: &[u8], transcript: &Transcript<C>) -> bool {
    let accepted = bool::from(check_equation(identity, transcript));
    trace!(curve = C::NAME, identity_len = identity.len(), accepted, "verified identity proof");
    accepted
}

/// Check a transcript against a claimed identity and a claimed public key.
#[must_use]
pub fn verify_proof_for_key<C: ProofCurve>(
    identity: &[u8],
    public_key: &PublicKey<C>,
    transcript: &Transcript<C>,
) -> bool {
    let key_matches = public_key.ct_eq(transcript.public_key());
    let accepted = bool::from(key_matches & check_equation(identity, transcript));
    trace!(curve = C::NAME, identity_len = identity.len(), accepted, "verified identity proof for key");
    accepted
}

/// Decode a binary transcript and check it; any decode failure is `false`.
#[must_use]
pub fn verify_encoded<C: ProofCurve>(identity: &[u8], bytes: &[u8]) -> bool {
    match Transcript::<C>::from_bytes(bytes) {
        Ok(transcript) => verify_proof(identity, &transcript),
        Err(e) => {
            trace!(curve = C::NAME, error = %e, "rejected undecodable transcript");
            false
        }
    }
}

fn check_equation<C: ProofCurve>(identity: &[u8], transcript: &Transcript<C>) -> Choice {
    let r = transcript.commitment();
    let p = transcript.public_key().point();

    // Transcripts can only be built from valid non-identity points; the
    // re-check keeps this function sound on its own.
    let well_formed = Choice::from(u8::from(
        !identity.is_empty() && !C::is_identity(r) && !C::is_identity(p),
    ));

    let c = derive_challenge::<C>(identity, r);
    let lhs = C::add(&C::mul_generator(transcript.response()), &C::scalar_mul(&c, p));

    well_formed & C::points_eq(&lhs, r)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::{NistP256, Secp256k1};
    use crate::keys::KeyPair;
    use crate::prover::generate_proof;

    fn seven() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        bytes
    }

    #[test]
    fn test_alice_with_key_seven() {
        let t = generate_proof::<NistP256>(b"alice", &seven()).unwrap();
        assert!(verify_proof(b"alice", &t));
        assert!(!verify_proof(b"bob", &t));

        let t = generate_proof::<Secp256k1>(b"alice", &seven()).unwrap();
        assert!(verify_proof(b"alice", &t));
        assert!(!verify_proof(b"bob", &t));
    }

    #[test]
    fn test_empty_identity_is_rejected() {
        let t = generate_proof::<NistP256>(b"alice", &seven()).unwrap();
        assert!(!verify_proof(b"", &t));
    }

    #[test]
    fn test_wrong_registered_key_is_rejected() {
        let alice = KeyPair::<NistP256>::generate().unwrap();
        let mallory = KeyPair::<NistP256>::generate().unwrap();

        // Mallory's transcript is internally consistent but speaks about her key.
        let t = mallory.prove(b"alice").unwrap();
        assert!(verify_proof(b"alice", &t));
        assert!(!verify_proof_for_key(b"alice", alice.public_key(), &t));
        assert!(verify_proof_for_key(b"alice", mallory.public_key(), &t));
    }

    #[test]
    fn test_negated_commitment_is_rejected() {
        let pair = KeyPair::<NistP256>::generate().unwrap();
        let t = pair.prove(b"alice").unwrap();

        // Same x-coordinate, opposite parity: same challenge, different point.
        let mut bytes = t.to_bytes();
        bytes[0] ^= 0x01;
        assert!(!verify_encoded::<NistP256>(b"alice", &bytes));
    }

    #[test]
    fn test_swapped_public_key_is_rejected() {
        let a = KeyPair::<Secp256k1>::generate().unwrap();
        let b = KeyPair::<Secp256k1>::generate().unwrap();
        let t = a.prove(b"alice").unwrap();

        let forged = Transcript::new(*t.commitment(), *t.response(), *b.public_key()).unwrap();
        assert!(!verify_proof(b"alice", &forged));
    }

    #[test]
    fn test_encoded_garbage_is_false() {
        assert!(!verify_encoded::<NistP256>(b"alice", &[]));
        assert!(!verify_encoded::<NistP256>(b"alice", &[0u8; 98]));
        assert!(!verify_encoded::<NistP256>(b"alice", &[0xFFu8; 98]));
    }

    #[test]
    fn test_cross_curve_bytes_are_rejected() {
        let t = KeyPair::<Secp256k1>::generate().unwrap().prove(b"alice").unwrap();
        assert!(!verify_encoded::<NistP256>(b"alice", &t.to_bytes()));
    }
}
