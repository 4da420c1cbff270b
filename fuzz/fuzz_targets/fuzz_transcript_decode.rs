#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for transcript decoding
//!
//! Arbitrary bytes must never panic the decoder or the verifier, and any
//! transcript that does decode must re-encode to the same bytes.

use libfuzzer_sys::fuzz_target;
use zkid_zkp::{NistP256, ProofCurve, Secp256k1, Transcript, verify_encoded};

fn check<C: ProofCurve>(data: &[u8]) {
    let identity = data.get(..data.len().min(16)).unwrap_or_default();

    if let Ok(transcript) = Transcript::<C>::from_bytes(data) {
        assert_eq!(transcript.to_bytes().as_slice(), data, "decoding must be canonical");
    }

    // Forging a proof from fuzz input is infeasible.
    assert!(!verify_encoded::<C>(identity, data));

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Transcript::<C>::from_hex(text);
    }
}

fuzz_target!(|data: &[u8]| {
    check::<NistP256>(data);
    check::<Secp256k1>(data);
});
