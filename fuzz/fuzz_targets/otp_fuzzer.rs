//! Fuzz target for the one-time-pad stream cipher
//!
//! # Strategy
//!
//! - Arbitrary messages (empty through multi-chunk)
//! - Arbitrary key material (too short, boundary, long)
//! - Supported and unsupported algorithm names
//!
//! # Invariants
//!
//! - crypt never panics
//! - Valid keys round-trip: crypt(crypt(m)) == m
//! - Ciphertext length always equals plaintext length
//! - Keys under 32 bytes are always rejected

#![no_main]

use arbitrary::Arbitrary;
use cryptkit_core::{Error, crypt};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct OtpScenario {
    message: Vec<u8>,
    key: Vec<u8>,
    algorithm_index: u8,
}

const ALGORITHMS: [&str; 6] =
    ["sha224", "sha256", "sha384", "sha512", "sha3-512", "not-a-hash"];

fuzz_target!(|scenario: OtpScenario| {
    let algorithm = ALGORITHMS[scenario.algorithm_index as usize % ALGORITHMS.len()];

    match crypt(&scenario.message, &scenario.key, algorithm) {
        Ok(ciphertext) => {
            assert!(scenario.key.len() >= 32, "short key must not succeed");
            assert_eq!(ciphertext.len(), scenario.message.len(), "length must be preserved");

            let plaintext = crypt(&ciphertext, &scenario.key, algorithm)
                .expect("decrypting valid ciphertext must succeed");
            assert_eq!(plaintext, scenario.message, "crypt must be its own inverse");
        },
        Err(Error::InvalidKeyLength { actual }) => {
            assert_eq!(actual, scenario.key.len());
            assert!(actual < 32, "valid key length must not be rejected");
        },
        Err(Error::Derivation { .. }) => {
            assert_eq!(algorithm, "not-a-hash", "supported algorithm must not fail");
        },
        Err(other) => panic!("unexpected error from crypt: {other}"),
    }
});
