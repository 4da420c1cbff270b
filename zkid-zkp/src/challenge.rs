//! Fiat-Shamir challenge derivation
//!
//! `c = SHA-256(identity || x(R)) mod n`
//!
//! `x(R)` is the commitment's affine x-coordinate as a 32-byte big-endian
//! string. Because it has a fixed width and sits last, the concatenation is
//! unambiguous for identities of any length.

use sha2::{Digest, Sha256};

use crate::curve::ProofCurve;

/// Derive the challenge scalar binding a commitment to an identity.
///
/// Deterministic in both inputs. A commitment equal to the identity element
/// hashes an all-zero x-coordinate instead of failing; the verifier rejects
/// such commitments separately.
#[must_use]
pub fn derive_challenge<C: ProofCurve>(identity: &[u8], commitment: &C::Point) -> C::Scalar {
    let mut hasher = Sha256::new();
    hasher.update(identity);
    hasher.update(C::x_coordinate(commitment));

    let digest: [u8; 32] = hasher.finalize().into();
    C::scalar_reduce(&digest)
}
