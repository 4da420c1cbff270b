//! Private keys, public keys, and key pairs

use core::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::{DefaultCurve, POINT_BYTES, ProofCurve, SCALAR_BYTES, random_nonzero_scalar};
use crate::error::{Result, ZkpError};
use crate::prover;
use crate::transcript::Transcript;

/// Secret scalar `x` in [1, n-1]
///
/// Never serialized by this crate. Zeroized on drop and redacted in `Debug`.
pub struct PrivateKey<C: ProofCurve = DefaultCurve> {
    scalar: C::Scalar,
}

impl<C: ProofCurve> PrivateKey<C> {
    /// Parse a big-endian 32-byte scalar.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidKeyLength`] for any other width and
    /// [`ZkpError::InvalidKey`] if the value is zero or not below n.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: &[u8; SCALAR_BYTES] = bytes.try_into().map_err(|_| {
            ZkpError::InvalidKeyLength { expected: SCALAR_BYTES, actual: bytes.len() }
        })?;

        let scalar = C::scalar_from_bytes(array).ok_or(ZkpError::InvalidKey)?;
        Self::from_scalar(scalar)
    }

    /// Wrap an already reduced scalar.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidKey`] if the scalar is zero.
    pub fn from_scalar(scalar: C::Scalar) -> Result<Self> {
        if C::scalar_is_zero(&scalar) {
            return Err(ZkpError::InvalidKey);
        }
        Ok(Self { scalar })
    }

    /// Generate a key from the given secure random source.
    ///
    /// # Errors
    /// Returns [`ZkpError::RandomnessUnavailable`] if the source fails.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self { scalar: random_nonzero_scalar::<C, R>(rng)? })
    }

    /// `P = x·G`
    #[must_use]
    pub fn public_key(&self) -> PublicKey<C> {
        PublicKey::from_validated_point(C::mul_generator(&self.scalar))
    }

    pub(crate) fn scalar(&self) -> &C::Scalar {
        &self.scalar
    }
}

impl<C: ProofCurve> Drop for PrivateKey<C> {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl<C: ProofCurve> ZeroizeOnDrop for PrivateKey<C> {}

impl<C: ProofCurve> fmt::Debug for PrivateKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("curve", &C::NAME).field("scalar", &"[REDACTED]").finish()
    }
}

/// Public point `P = x·G`, never the identity element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey<C: ProofCurve = DefaultCurve> {
    point: C::Point,
    encoded: [u8; POINT_BYTES],
}

impl<C: ProofCurve> PublicKey<C> {
    /// Decode a SEC1 compressed public key.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidPublicKey`] if the encoding has the wrong
    /// length, is not on the curve, or is the identity element.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: &[u8; POINT_BYTES] = bytes.try_into().map_err(|_| {
            ZkpError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                POINT_BYTES,
                bytes.len()
            ))
        })?;

        let point = C::decode_point(array)
            .ok_or_else(|| ZkpError::InvalidPublicKey("not a valid curve point".to_string()))?;

        Ok(Self { point, encoded: *array })
    }

    /// Decode a hex-encoded SEC1 compressed public key.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidPublicKey`] on invalid hex or an invalid point.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| ZkpError::InvalidPublicKey(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Build from a point produced by group arithmetic on a non-zero scalar.
    pub(crate) fn from_validated_point(point: C::Point) -> Self {
        // x·G with x in [1, n-1] is never the identity in a prime-order group,
        // so the compressed encoding always exists.
        let encoded = C::encode_point(&point).unwrap_or([0u8; POINT_BYTES]);
        Self { point, encoded }
    }

    /// The curve point.
    #[must_use]
    pub fn point(&self) -> &C::Point {
        &self.point
    }

    /// SEC1 compressed encoding.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; POINT_BYTES] {
        self.encoded
    }

    /// Lowercase hex of the compressed encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.encoded)
    }
}

impl<C: ProofCurve> ConstantTimeEq for PublicKey<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        C::points_eq(&self.point, &other.point)
    }
}

/// A private key together with its public key
pub struct KeyPair<C: ProofCurve = DefaultCurve> {
    private_key: PrivateKey<C>,
    public_key: PublicKey<C>,
}

impl<C: ProofCurve> KeyPair<C> {
    /// Generate a fresh key pair from the operating system's CSPRNG.
    ///
    /// # Errors
    /// Returns [`ZkpError::RandomnessUnavailable`] if the OS cannot supply entropy.
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a fresh key pair from the given secure random source.
    ///
    /// # Errors
    /// Returns [`ZkpError::RandomnessUnavailable`] if the source fails.
    pub fn generate_with_rng<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self::from_private_key(PrivateKey::random(rng)?))
    }

    /// Rebuild a key pair from a 32-byte big-endian secret.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidKeyLength`] or [`ZkpError::InvalidKey`].
    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self> {
        Ok(Self::from_private_key(PrivateKey::from_bytes(secret)?))
    }

    /// Derive the public half of `private_key`.
    #[must_use]
    pub fn from_private_key(private_key: PrivateKey<C>) -> Self {
        let public_key = private_key.public_key();
        Self { private_key, public_key }
    }

    /// The public key, to be registered with verifiers.
    #[must_use]
    pub fn public_key(&self) -> &PublicKey<C> {
        &self.public_key
    }

    /// The private key.
    #[must_use]
    pub fn private_key(&self) -> &PrivateKey<C> {
        &self.private_key
    }

    /// Prove knowledge of the private key, bound to `identity`.
    ///
    /// # Errors
    /// See [`prover::prove`].
    pub fn prove(&self, identity: &[u8]) -> Result<Transcript<C>> {
        prover::prove(identity, &self.private_key)
    }
}

impl<C: ProofCurve> fmt::Debug for KeyPair<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &self.private_key)
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::tests::{FailingRng, off_curve_encoding, scalar_from_u64};
    use crate::curve::{NistP256, Secp256k1};

    fn seven() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        bytes
    }

    #[test]
    fn test_private_key_rejects_zero() {
        let result = PrivateKey::<NistP256>::from_bytes(&[0u8; 32]);
        assert_eq!(result.unwrap_err(), ZkpError::InvalidKey);
    }

    #[test]
    fn test_private_key_rejects_out_of_range() {
        let result = PrivateKey::<Secp256k1>::from_bytes(&[0xFFu8; 32]);
        assert_eq!(result.unwrap_err(), ZkpError::InvalidKey);
    }

    #[test]
    fn test_private_key_rejects_wrong_length() {
        let result = PrivateKey::<NistP256>::from_bytes(&[1u8; 31]);
        assert_eq!(result.unwrap_err(), ZkpError::InvalidKeyLength { expected: 32, actual: 31 });

        let result = PrivateKey::<NistP256>::from_bytes(&[1u8; 33]);
        assert_eq!(result.unwrap_err(), ZkpError::InvalidKeyLength { expected: 32, actual: 33 });
    }

    #[test]
    fn test_public_key_is_x_times_generator() {
        let key = PrivateKey::<NistP256>::from_bytes(&seven()).unwrap();
        let expected = NistP256::mul_generator(&scalar_from_u64::<NistP256>(7));
        assert_eq!(key.public_key().point(), &expected);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let pair = KeyPair::<NistP256>::from_secret_bytes(&seven()).unwrap();
        let rendered = format!("{:?}", pair);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("0000000000000007"));
    }

    #[test]
    fn test_public_key_bytes_roundtrip() {
        let pair = KeyPair::<Secp256k1>::generate().unwrap();
        let bytes = pair.public_key().to_bytes();
        let decoded = PublicKey::<Secp256k1>::from_bytes(&bytes).unwrap();
        assert_eq!(&decoded, pair.public_key());

        let decoded = PublicKey::<Secp256k1>::from_hex(&pair.public_key().to_hex()).unwrap();
        assert_eq!(&decoded, pair.public_key());
    }

    #[test]
    fn test_public_key_rejects_invalid_points() {
        let off_curve = off_curve_encoding::<NistP256>();
        assert!(matches!(
            PublicKey::<NistP256>::from_bytes(&off_curve),
            Err(ZkpError::InvalidPublicKey(_))
        ));

        // x-coordinate only, no parity tag
        let pair = KeyPair::<NistP256>::generate().unwrap();
        let x_only = &pair.public_key().to_bytes()[1..];
        assert!(matches!(
            PublicKey::<NistP256>::from_bytes(x_only),
            Err(ZkpError::InvalidPublicKey(_))
        ));

        assert!(PublicKey::<NistP256>::from_hex("not hex").is_err());
    }

    #[test]
    fn test_public_key_constant_time_eq() {
        let a = KeyPair::<NistP256>::generate().unwrap();
        let b = KeyPair::<NistP256>::generate().unwrap();
        assert!(bool::from(a.public_key().ct_eq(a.public_key())));
        assert!(!bool::from(a.public_key().ct_eq(b.public_key())));
    }

    #[test]
    fn test_same_secret_same_public_key() {
        let a = KeyPair::<Secp256k1>::from_secret_bytes(&[42u8; 32]).unwrap();
        let b = KeyPair::<Secp256k1>::from_secret_bytes(&[42u8; 32]).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_generation_fails_without_entropy() {
        let result = KeyPair::<NistP256>::generate_with_rng(&mut FailingRng);
        assert!(matches!(result, Err(ZkpError::RandomnessUnavailable(_))));
    }
}
