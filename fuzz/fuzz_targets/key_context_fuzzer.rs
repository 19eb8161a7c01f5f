//! Fuzz target for key decoding and subkey derivation
//!
//! # Strategy
//!
//! - Arbitrary strings as encoded keys (mostly invalid base64)
//! - Well-formed base64 of arbitrary byte lengths around the 32-byte floor
//! - Arbitrary cipher tags, salts and info strings
//!
//! # Invariants
//!
//! - Construction never panics; it fails with exactly the documented errors
//! - Derivation is deterministic and output length equals the digest size
//! - Authentication and encryption subkeys always differ

#![no_main]

use arbitrary::Arbitrary;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use cryptkit_core::{Error, KeyContext};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct KeyScenario {
    raw_key: Vec<u8>,
    use_well_formed_encoding: bool,
    encoded_key: String,
    cipher: String,
    salt: Vec<u8>,
    info: String,
}

fuzz_target!(|scenario: KeyScenario| {
    let encoded = if scenario.use_well_formed_encoding {
        STANDARD.encode(&scenario.raw_key)
    } else {
        scenario.encoded_key.clone()
    };

    match KeyContext::from_encoded(&encoded, "sha256", &scenario.cipher, &scenario.salt) {
        Ok(context) => {
            let first = context.derive_key(&scenario.info).expect("sha256 derivation must succeed");
            let second = context.derive_key(&scenario.info).expect("sha256 derivation must succeed");
            assert_eq!(first, second, "derivation must be deterministic");
            assert_eq!(first.len(), 32, "output length must equal digest size");

            let auth = context.authentication_key().expect("derivation must succeed");
            let enc = context.encryption_key().expect("derivation must succeed");
            assert_ne!(auth, enc, "purpose subkeys must differ");

            let checksum = context.message_checksum(&scenario.raw_key).expect("checksum must succeed");
            assert!(
                context.verify_checksum(&scenario.raw_key, &checksum).expect("verify must succeed"),
                "checksum must verify against its own message"
            );
        },
        Err(Error::InvalidKeyEncoding) => {
            assert!(
                !scenario.use_well_formed_encoding,
                "well-formed base64 must not be an encoding error"
            );
        },
        Err(Error::InvalidKeyLength { actual }) => {
            assert!(actual < 32, "valid key length must not be rejected");
        },
        Err(other) => panic!("unexpected construction error: {other}"),
    }
});
