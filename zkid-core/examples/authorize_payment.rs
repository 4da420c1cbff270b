//! Enroll a user, send a payment request with an attached proof, and have the
//! gate decide on it. A forged request for another user is turned away.
//!
//! ```text
//! RUST_LOG=zkid_core=debug cargo run -p zkid-core --example authorize_payment
//! ```

#![allow(clippy::expect_used)]

use zkid_core::zkp::NistP256;
use zkid_core::{AuthorizationRequest, GateConfig, IdentityGate, init_tracing};

fn main() {
    init_tracing().expect("tracing initializes once");

    let gate = IdentityGate::<NistP256>::new(GateConfig::for_production()).expect("valid config");

    let alice = gate.enroll(b"alice").expect("enroll alice");
    gate.enroll(b"bob").expect("enroll bob");

    // Client side
    let request =
        AuthorizationRequest::prepare(&alice, "alice", "submit_payment").expect("proof generation");
    let body = serde_json::to_string_pretty(&request).expect("request serializes");
    println!("Request body:\n{}", body);

    // Server side
    let received: AuthorizationRequest<NistP256> =
        serde_json::from_str(&body).expect("request parses");
    println!("Decision for alice: {:?}", gate.authorize_request(&received));

    let mut forged = received;
    forged.identity = "bob".to_string();
    println!("Decision for forged bob request: {:?}", gate.authorize_request(&forged));
}
