//! Proof transcripts and their wire encodings
//!
//! A transcript is `(R, s, P)`: the commitment point, the response scalar and
//! the prover's public key. It contains no secret material.
//!
//! ## Binary layout
//!
//! | Offset | Length | Field |
//! |--------|--------|-------|
//! | 0      | 33     | `R`, SEC1 compressed |
//! | 33     | 32     | `s`, big-endian, below n |
//! | 65     | 33     | `P`, SEC1 compressed |
//!
//! Both points carry their y-parity in the SEC1 tag byte.
//!
//! ## Text forms
//!
//! - [`Transcript::to_hex`]: lowercase hex of the binary layout
//! - with the `serde` feature: an object with `curve`, `commitment`,
//!   `response` and `public_key` fields, each value hex-encoded

use crate::curve::{DefaultCurve, POINT_BYTES, ProofCurve, SCALAR_BYTES};
use crate::error::{Result, ZkpError};
use crate::keys::PublicKey;

/// Length of an encoded transcript in bytes.
pub const TRANSCRIPT_LEN: usize = POINT_BYTES + SCALAR_BYTES + POINT_BYTES;

const RESPONSE_OFFSET: usize = POINT_BYTES;
const PUBLIC_KEY_OFFSET: usize = POINT_BYTES + SCALAR_BYTES;

/// A non-interactive proof of knowledge of the discrete log of `public_key`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transcript<C: ProofCurve = DefaultCurve> {
    commitment: C::Point,
    commitment_bytes: [u8; POINT_BYTES],
    response: C::Scalar,
    public_key: PublicKey<C>,
}

impl<C: ProofCurve> Transcript<C> {
    /// Assemble a transcript from its parts.
    ///
    /// # Errors
    /// Returns [`ZkpError::MalformedTranscript`] if the commitment is the
    /// identity element.
    pub fn new(commitment: C::Point, response: C::Scalar, public_key: PublicKey<C>) -> Result<Self> {
        let commitment_bytes = C::encode_point(&commitment).ok_or_else(|| {
            ZkpError::MalformedTranscript("commitment is the point at infinity".to_string())
        })?;

        Ok(Self { commitment, commitment_bytes, response, public_key })
    }

    /// Commitment `R = k·G`.
    #[must_use]
    pub fn commitment(&self) -> &C::Point {
        &self.commitment
    }

    /// Response `s = k - x·c mod n`.
    #[must_use]
    pub fn response(&self) -> &C::Scalar {
        &self.response
    }

    /// Public key `P` the proof speaks about.
    #[must_use]
    pub fn public_key(&self) -> &PublicKey<C> {
        &self.public_key
    }

    /// Encode to the fixed binary layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; TRANSCRIPT_LEN] {
        let mut out = [0u8; TRANSCRIPT_LEN];
        out[..RESPONSE_OFFSET].copy_from_slice(&self.commitment_bytes);
        out[RESPONSE_OFFSET..PUBLIC_KEY_OFFSET].copy_from_slice(&C::scalar_to_bytes(&self.response));
        out[PUBLIC_KEY_OFFSET..].copy_from_slice(&self.public_key.to_bytes());
        out
    }

    /// Decode the fixed binary layout.
    ///
    /// # Errors
    /// Returns [`ZkpError::MalformedTranscript`] if the length is wrong, the
    /// response is not below n, or either point is not a valid non-identity
    /// curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TRANSCRIPT_LEN {
            return Err(ZkpError::MalformedTranscript(format!(
                "expected {} bytes, got {}",
                TRANSCRIPT_LEN,
                bytes.len()
            )));
        }

        let (commitment_bytes, rest) = bytes.split_at(RESPONSE_OFFSET);
        let (response_bytes, public_key_bytes) = rest.split_at(SCALAR_BYTES);

        let (commitment, commitment_bytes) = decode_commitment::<C>(commitment_bytes)?;
        let response = decode_response::<C>(response_bytes)?;
        let public_key = PublicKey::from_bytes(public_key_bytes)
            .map_err(|e| ZkpError::MalformedTranscript(format!("public key: {}", e)))?;

        Ok(Self { commitment, commitment_bytes, response, public_key })
    }

    /// Lowercase hex of [`Self::to_bytes`].
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode the hex text form.
    ///
    /// # Errors
    /// Returns [`ZkpError::MalformedTranscript`] on invalid hex or any
    /// [`Self::from_bytes`] failure.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| ZkpError::MalformedTranscript(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

fn decode_commitment<C: ProofCurve>(bytes: &[u8]) -> Result<(C::Point, [u8; POINT_BYTES])> {
    let array: [u8; POINT_BYTES] = bytes.try_into().map_err(|_| {
        ZkpError::MalformedTranscript(format!("commitment must be {} bytes", POINT_BYTES))
    })?;
    let point = C::decode_point(&array).ok_or_else(|| {
        ZkpError::MalformedTranscript("commitment is not a valid curve point".to_string())
    })?;
    Ok((point, array))
}

fn decode_response<C: ProofCurve>(bytes: &[u8]) -> Result<C::Scalar> {
    let array: &[u8; SCALAR_BYTES] = bytes.try_into().map_err(|_| {
        ZkpError::MalformedTranscript(format!("response must be {} bytes", SCALAR_BYTES))
    })?;
    C::scalar_from_bytes(array)
        .ok_or_else(|| ZkpError::MalformedTranscript("response is not below the curve order".to_string()))
}

#[cfg(feature = "serde")]
mod text {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Transcript, decode_commitment, decode_response};
    use crate::curve::ProofCurve;
    use crate::error::ZkpError;
    use crate::keys::PublicKey;

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct TranscriptRepr {
        curve: String,
        commitment: String,
        response: String,
        public_key: String,
    }

    fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, ZkpError> {
        hex::decode(value).map_err(|e| ZkpError::MalformedTranscript(format!("{}: {}", name, e)))
    }

    impl<C: ProofCurve> From<&Transcript<C>> for TranscriptRepr {
        fn from(t: &Transcript<C>) -> Self {
            Self {
                curve: C::NAME.to_string(),
                commitment: hex::encode(t.commitment_bytes),
                response: hex::encode(C::scalar_to_bytes(&t.response)),
                public_key: t.public_key.to_hex(),
            }
        }
    }

    impl<C: ProofCurve> TryFrom<TranscriptRepr> for Transcript<C> {
        type Error = ZkpError;

        fn try_from(repr: TranscriptRepr) -> Result<Self, Self::Error> {
            if repr.curve != C::NAME {
                return Err(ZkpError::MalformedTranscript(format!(
                    "curve mismatch: expected {}, got {}",
                    C::NAME,
                    repr.curve
                )));
            }

            let (commitment, commitment_bytes) =
                decode_commitment::<C>(&decode_field("commitment", &repr.commitment)?)?;
            let response = decode_response::<C>(&decode_field("response", &repr.response)?)?;
            let public_key = PublicKey::from_bytes(&decode_field("public_key", &repr.public_key)?)
                .map_err(|e| ZkpError::MalformedTranscript(format!("public key: {}", e)))?;

            Ok(Self { commitment, commitment_bytes, response, public_key })
        }
    }

    impl<C: ProofCurve> Serialize for Transcript<C> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            TranscriptRepr::from(self).serialize(serializer)
        }
    }

    impl<'de, C: ProofCurve> Deserialize<'de> for Transcript<C> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = TranscriptRepr::deserialize(deserializer)?;
            Self::try_from(repr).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::tests::off_curve_encoding;
    use crate::curve::{NistP256, Secp256k1};
    use crate::keys::KeyPair;

    fn sample<C: ProofCurve>() -> Transcript<C> {
        KeyPair::<C>::generate().unwrap().prove(b"alice").unwrap()
    }

    #[test]
    fn test_binary_roundtrip() {
        let t = sample::<NistP256>();
        let bytes = t.to_bytes();
        assert_eq!(bytes.len(), TRANSCRIPT_LEN);
        assert_eq!(Transcript::<NistP256>::from_bytes(&bytes).unwrap(), t);

        let t = sample::<Secp256k1>();
        assert_eq!(Transcript::<Secp256k1>::from_bytes(&t.to_bytes()).unwrap(), t);
    }

    #[test]
    fn test_hex_roundtrip() {
        let t = sample::<NistP256>();
        let text = t.to_hex();
        assert_eq!(text.len(), TRANSCRIPT_LEN * 2);
        assert_eq!(Transcript::<NistP256>::from_hex(&text).unwrap(), t);
    }

    #[test]
    fn test_layout() {
        let t = sample::<NistP256>();
        let bytes = t.to_bytes();
        assert_eq!(&bytes[..33], &NistP256::encode_point(t.commitment()).unwrap());
        assert_eq!(&bytes[33..65], &NistP256::scalar_to_bytes(t.response()));
        assert_eq!(&bytes[65..], &t.public_key().to_bytes());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let bytes = sample::<NistP256>().to_bytes();
        assert!(matches!(
            Transcript::<NistP256>::from_bytes(&bytes[..TRANSCRIPT_LEN - 1]),
            Err(ZkpError::MalformedTranscript(_))
        ));

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(matches!(
            Transcript::<NistP256>::from_bytes(&long),
            Err(ZkpError::MalformedTranscript(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_response() {
        let mut bytes = sample::<Secp256k1>().to_bytes();
        bytes[RESPONSE_OFFSET..PUBLIC_KEY_OFFSET].fill(0xFF);
        assert!(matches!(
            Transcript::<Secp256k1>::from_bytes(&bytes),
            Err(ZkpError::MalformedTranscript(_))
        ));
    }

    #[test]
    fn test_rejects_off_curve_points() {
        let off_curve = off_curve_encoding::<NistP256>();

        let mut bad_commitment = sample::<NistP256>().to_bytes();
        bad_commitment[..RESPONSE_OFFSET].copy_from_slice(&off_curve);
        assert!(Transcript::<NistP256>::from_bytes(&bad_commitment).is_err());

        let mut bad_key = sample::<NistP256>().to_bytes();
        bad_key[PUBLIC_KEY_OFFSET..].copy_from_slice(&off_curve);
        assert!(Transcript::<NistP256>::from_bytes(&bad_key).is_err());
    }

    #[test]
    fn test_rejects_identity_commitment() {
        let pair = KeyPair::<NistP256>::generate().unwrap();
        let response = NistP256::scalar_reduce(&[1u8; 32]);
        let result = Transcript::new(NistP256::identity(), response, *pair.public_key());
        assert!(matches!(result, Err(ZkpError::MalformedTranscript(_))));
    }

    #[test]
    fn test_rejects_invalid_hex() {
        assert!(Transcript::<NistP256>::from_hex("zz").is_err());
        assert!(Transcript::<NistP256>::from_hex("").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_roundtrip() {
        let t = sample::<NistP256>();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"curve\":\"P-256\""));
        assert!(json.contains(&t.public_key().to_hex()));

        let decoded: Transcript<NistP256> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, t);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_curve_mismatch() {
        let json = serde_json::to_string(&sample::<NistP256>()).unwrap();
        assert!(serde_json::from_str::<Transcript<Secp256k1>>(&json).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_out_of_range_response() {
        let t = sample::<NistP256>();
        let mut value: serde_json::Value = serde_json::to_value(t).unwrap();
        value["response"] = serde_json::Value::String("ff".repeat(32));
        assert!(serde_json::from_value::<Transcript<NistP256>>(value).is_err());
    }
}
