//! Curve Arithmetic Provider
//!
//! The proof system is written against [`ProofCurve`], a narrow view of a
//! prime-order elliptic curve group: generator, group law, scalar field
//! arithmetic, and SEC1 point encoding. Arithmetic is delegated to the
//! RustCrypto curve crates, which are constant-time.
//!
//! ## Curves
//!
//! - [`NistP256`] (secp256r1), the default
//! - [`Secp256k1`]
//!
//! Both have 256-bit base and scalar fields, so every encoding in this crate
//! has a fixed width.
//!
//! ## Point validity
//!
//! Points only enter the system through group arithmetic or through
//! [`ProofCurve::decode_point`], which requires a compressed SEC1 encoding
//! (parity tag plus x-coordinate), recovers y from the curve equation, and
//! rejects the identity element. There is no constructor taking an
//! x-coordinate alone.

use core::fmt::Debug;

use rand::{CryptoRng, RngCore};
use subtle::Choice;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Result, ZkpError};

pub use k256::Secp256k1;
pub use p256::NistP256;

/// Curve used when callers do not pick one.
pub type DefaultCurve = NistP256;

/// Width of a canonical big-endian scalar encoding.
pub const SCALAR_BYTES: usize = 32;

/// Width of a big-endian base field coordinate.
pub const FIELD_BYTES: usize = 32;

/// Width of a SEC1 compressed point: parity tag followed by x.
pub const POINT_BYTES: usize = 1 + FIELD_BYTES;

/// Upper bound on rejection-sampling draws for a nonce.
///
/// For both supported curves the chance that a uniform 256-bit candidate is
/// rejected is below 2^-32, so exhausting this bound means the entropy source
/// is broken rather than unlucky.
const MAX_SCALAR_DRAWS: usize = 64;

/// Prime-order group operations consumed by the prover and verifier.
pub trait ProofCurve: Copy + Debug + Eq + Send + Sync + 'static {
    /// Curve name, recorded in text encodings.
    const NAME: &'static str;

    /// Element of the scalar field, always reduced mod n.
    type Scalar: Copy + Debug + Eq + Zeroize + Send + Sync;

    /// Group element; on the curve by construction.
    type Point: Copy + Debug + Eq + Send + Sync;

    /// Fixed base generator `G`.
    fn generator() -> Self::Point;

    /// Point at infinity.
    fn identity() -> Self::Point;

    /// Group law.
    fn add(a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// `k·P`.
    fn scalar_mul(k: &Self::Scalar, p: &Self::Point) -> Self::Point;

    /// `k·G`.
    fn mul_generator(k: &Self::Scalar) -> Self::Point {
        Self::scalar_mul(k, &Self::generator())
    }

    /// Constant-time point equality.
    fn points_eq(a: &Self::Point, b: &Self::Point) -> Choice;

    /// Whether `p` is the point at infinity.
    fn is_identity(p: &Self::Point) -> bool {
        bool::from(Self::points_eq(p, &Self::identity()))
    }

    /// Canonical decoding; `None` unless the big-endian value is below n.
    fn scalar_from_bytes(bytes: &[u8; SCALAR_BYTES]) -> Option<Self::Scalar>;

    /// Big-endian encoding.
    fn scalar_to_bytes(s: &Self::Scalar) -> [u8; SCALAR_BYTES];

    /// Interpret a 256-bit digest as a big-endian integer and reduce mod n.
    fn scalar_reduce(digest: &[u8; 32]) -> Self::Scalar;

    /// Whether `s == 0`.
    fn scalar_is_zero(s: &Self::Scalar) -> bool;

    /// `a - b mod n`.
    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// `a * b mod n`.
    fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Affine x-coordinate as fixed-width big-endian bytes.
    ///
    /// The identity element has no affine coordinates and maps to all zeroes.
    fn x_coordinate(p: &Self::Point) -> [u8; FIELD_BYTES];

    /// SEC1 compressed encoding; `None` for the identity element.
    fn encode_point(p: &Self::Point) -> Option<[u8; POINT_BYTES]>;

    /// Decode a SEC1 compressed point.
    ///
    /// Returns `None` for a bad tag, an x-coordinate that is not a canonical
    /// field element or has no square root on the curve, and the identity.
    fn decode_point(bytes: &[u8; POINT_BYTES]) -> Option<Self::Point>;
}

macro_rules! impl_proof_curve {
    ($curve:ty, $krate:ident, $name:literal) => {
        impl ProofCurve for $curve {
            const NAME: &'static str = $name;

            type Scalar = $krate::Scalar;
            type Point = $krate::ProjectivePoint;

            fn generator() -> Self::Point {
                $krate::ProjectivePoint::GENERATOR
            }

            fn identity() -> Self::Point {
                $krate::ProjectivePoint::IDENTITY
            }

            fn add(a: &Self::Point, b: &Self::Point) -> Self::Point {
                *a + *b
            }

            fn scalar_mul(k: &Self::Scalar, p: &Self::Point) -> Self::Point {
                *p * *k
            }

            fn points_eq(a: &Self::Point, b: &Self::Point) -> Choice {
                subtle::ConstantTimeEq::ct_eq(a, b)
            }

            fn scalar_from_bytes(bytes: &[u8; SCALAR_BYTES]) -> Option<Self::Scalar> {
                Option::from(<$krate::Scalar as $krate::elliptic_curve::PrimeField>::from_repr(
                    *$krate::FieldBytes::from_slice(bytes),
                ))
            }

            fn scalar_to_bytes(s: &Self::Scalar) -> [u8; SCALAR_BYTES] {
                let repr = <$krate::Scalar as $krate::elliptic_curve::PrimeField>::to_repr(s);
                let mut out = [0u8; SCALAR_BYTES];
                out.copy_from_slice(repr.as_slice());
                out
            }

            fn scalar_reduce(digest: &[u8; 32]) -> Self::Scalar {
                <$krate::Scalar as $krate::elliptic_curve::ops::Reduce<
                    $krate::elliptic_curve::bigint::U256,
                >>::reduce_bytes($krate::FieldBytes::from_slice(digest))
            }

            fn scalar_is_zero(s: &Self::Scalar) -> bool {
                bool::from(<$krate::Scalar as $krate::elliptic_curve::Field>::is_zero(s))
            }

            fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
                *a - *b
            }

            fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
                *a * *b
            }

            fn x_coordinate(p: &Self::Point) -> [u8; FIELD_BYTES] {
                let affine = $krate::AffinePoint::from(*p);
                let encoded = <$krate::AffinePoint as $krate::elliptic_curve::sec1::ToEncodedPoint<
                    $curve,
                >>::to_encoded_point(&affine, false);

                let mut out = [0u8; FIELD_BYTES];
                if let Some(x) = encoded.x() {
                    out.copy_from_slice(x.as_slice());
                }
                out
            }

            fn encode_point(p: &Self::Point) -> Option<[u8; POINT_BYTES]> {
                let affine = $krate::AffinePoint::from(*p);
                let encoded = <$krate::AffinePoint as $krate::elliptic_curve::sec1::ToEncodedPoint<
                    $curve,
                >>::to_encoded_point(&affine, true);
                <[u8; POINT_BYTES]>::try_from(encoded.as_bytes()).ok()
            }

            fn decode_point(bytes: &[u8; POINT_BYTES]) -> Option<Self::Point> {
                let encoded = $krate::EncodedPoint::from_bytes(bytes).ok()?;
                let affine: Option<$krate::AffinePoint> =
                    <$krate::AffinePoint as $krate::elliptic_curve::sec1::FromEncodedPoint<
                        $curve,
                    >>::from_encoded_point(&encoded)
                    .into();
                let point = $krate::ProjectivePoint::from(affine?);
                (point != $krate::ProjectivePoint::IDENTITY).then_some(point)
            }
        }
    };
}

impl_proof_curve!(NistP256, p256, "P-256");
impl_proof_curve!(Secp256k1, k256, "secp256k1");

/// Draw a scalar uniformly from [1, n-1].
///
/// Candidates are 32 random bytes taken as a big-endian integer; values that
/// are zero or not below n are discarded and redrawn.
///
/// # Errors
/// Returns [`ZkpError::RandomnessUnavailable`] if the generator reports a
/// failure, or if no candidate is accepted within a bounded number of draws.
pub fn random_nonzero_scalar<C, R>(rng: &mut R) -> Result<C::Scalar>
where
    C: ProofCurve,
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = Zeroizing::new([0u8; SCALAR_BYTES]);

    for _ in 0..MAX_SCALAR_DRAWS {
        rng.try_fill_bytes(candidate.as_mut_slice())
            .map_err(|e| ZkpError::RandomnessUnavailable(e.to_string()))?;

        if let Some(mut scalar) = C::scalar_from_bytes(&candidate) {
            if !C::scalar_is_zero(&scalar) {
                return Ok(scalar);
            }
            scalar.zeroize();
        }
    }

    Err(ZkpError::RandomnessUnavailable(format!(
        "no scalar in range after {} draws",
        MAX_SCALAR_DRAWS
    )))
}
