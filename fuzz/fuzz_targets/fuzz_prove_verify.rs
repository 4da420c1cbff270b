#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for proof generation and the identity gate
//!
//! Arbitrary identities and secrets: generation either fails cleanly or
//! yields a proof that verifies for exactly that identity.

use libfuzzer_sys::fuzz_target;
use zkid_core::zkp::{NistP256, generate_proof, verify_proof};
use zkid_core::{GateConfig, IdentityGate};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (secret, identity) = data.split_at(32);

    let Ok(transcript) = generate_proof::<NistP256>(identity, secret) else {
        return;
    };
    assert!(verify_proof(identity, &transcript), "honest proof must verify");

    let mut other = identity.to_vec();
    other.push(0);
    assert!(!verify_proof(&other, &transcript), "proof must not transfer to another identity");

    if let Ok(gate) = IdentityGate::<NistP256>::new(GateConfig::new().with_rejection_logging(false)) {
        if gate.registry().register(identity, *transcript.public_key()).is_ok() {
            let granted = gate.authorize(identity, &transcript).is_granted();
            assert_eq!(granted, identity.len() <= gate.config().max_identity_len);
        }
    }
});
