//! Generate a key, prove control of it for user "1", and verify the proof.
//!
//! ```text
//! cargo run -p zkid-zkp --example prove_and_verify
//! ```

#![allow(clippy::expect_used)]

use zkid_zkp::{KeyPair, NistP256, Transcript, verify_proof};

fn main() {
    let user_id = b"1";

    let keys = KeyPair::<NistP256>::generate().expect("OS entropy available");
    let transcript = keys.prove(user_id).expect("proof generation");

    println!("Public key: {}", keys.public_key().to_hex());
    println!("Proof:      {}", transcript.to_hex());
    println!(
        "JSON:       {}",
        serde_json::to_string(&transcript).expect("transcript serializes")
    );

    let received = Transcript::<NistP256>::from_hex(&transcript.to_hex()).expect("decode");
    println!("Verified:   {}", verify_proof(user_id, &received));
    println!("As user 2:  {}", verify_proof(b"2", &received));
}
