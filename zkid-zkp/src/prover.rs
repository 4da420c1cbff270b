//! Proof generation
//!
//! Given identity `id` and private key `x` with `P = x·G`:
//!
//! 1. draw `k` uniformly from [1, n-1]
//! 2. `R = k·G`
//! 3. `c = H(id || x(R)) mod n`
//! 4. `s = k - x·c mod n`
//!
//! and emit `(R, s, P)`. The nonce is wiped once `s` is known; a nonce reused
//! under two different challenges reveals `x`.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroize;

use crate::challenge::derive_challenge;
use crate::curve::{ProofCurve, random_nonzero_scalar};
use crate::error::{Result, ZkpError};
use crate::keys::PrivateKey;
use crate::transcript::Transcript;

/// Prove knowledge of a raw 32-byte big-endian private scalar.
///
/// # Errors
/// - [`ZkpError::InvalidKeyLength`] / [`ZkpError::InvalidKey`] if the key is
///   not 32 bytes or not in [1, n-1]
/// - [`ZkpError::EmptyIdentity`] if `identity` is empty
/// - [`ZkpError::RandomnessUnavailable`] if the OS CSPRNG fails
pub fn generate_proof<C: ProofCurve>(identity: &[u8], private_key: &[u8]) -> Result<Transcript<C>> {
    let key = PrivateKey::<C>::from_bytes(private_key)?;
    prove(identity, &key)
}

/// Prove knowledge of `private_key`, drawing the nonce from the OS CSPRNG.
///
/// # Errors
/// [`ZkpError::EmptyIdentity`] or [`ZkpError::RandomnessUnavailable`].
pub fn prove<C: ProofCurve>(identity: &[u8], private_key: &PrivateKey<C>) -> Result<Transcript<C>> {
    generate_proof_with_rng(&mut OsRng, identity, private_key)
}

/// Prove knowledge of `private_key` with a caller-supplied secure random source.
///
/// # Errors
/// [`ZkpError::EmptyIdentity`] or [`ZkpError::RandomnessUnavailable`].
pub fn generate_proof_with_rng<C, R>(
    rng: &mut R,
    identity: &[u8],
    private_key: &PrivateKey<C>,
) -> Result<Transcript<C>>
where
    C: ProofCurve,
    R: RngCore + CryptoRng + ?Sized,
{
    if identity.is_empty() {
        return Err(ZkpError::EmptyIdentity);
    }

    let mut k = random_nonzero_scalar::<C, R>(rng)?;
    let commitment = C::mul_generator(&k);
    let c = derive_challenge::<C>(identity, &commitment);

    let mut xc = C::scalar_mul_scalar(private_key.scalar(), &c);
    let s = C::scalar_sub(&k, &xc);
    k.zeroize();
    xc.zeroize();

    let transcript = Transcript::new(commitment, s, private_key.public_key())?;
    debug!(curve = C::NAME, identity_len = identity.len(), "generated identity proof");
    Ok(transcript)
}
