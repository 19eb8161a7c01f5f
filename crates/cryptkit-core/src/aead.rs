//! Authenticated cipher wrapper over `XChaCha20-Poly1305`.
//!
//! Pure glue: the key derivation engine supplies the per-message encryption
//! subkey (with the random nonce bound in as the derivation IV) and the
//! platform AEAD primitive does the rest. Wire format is
//! `nonce || ciphertext+tag`.

use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use zeroize::Zeroize;

use crate::{error::Error, keys::KeyContext, random};

/// XChaCha20 nonce size in bytes, prefixed to every ciphertext.
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size (16 bytes)
const POLY1305_TAG_SIZE: usize = 16;

/// Cipher tag mixed into the derivation info strings.
const CIPHER_TAG: &str = "xchacha20poly1305";

/// Hash algorithm for subkey derivation.
const ALGORITHM: &str = "sha3-512";

/// Build the AEAD instance for one message from the derivation engine.
fn cipher_for(key: &str, nonce: &[u8]) -> Result<XChaCha20Poly1305, Error> {
    let context = KeyContext::from_encoded(key, ALGORITHM, CIPHER_TAG, nonce)?;
    let mut variables = context.wrapper_variables()?;

    // sha3-512 derives 64 bytes; the AEAD takes the first 32
    let cipher = XChaCha20Poly1305::new(Key::from_slice(&variables.encryption_key[..32]));
    variables.encryption_key.zeroize();
    Ok(cipher)
}

/// Encrypt `plaintext` under a base64-encoded master key.
///
/// A fresh random nonce is drawn per message and bound into the subkey
/// derivation as the IV, so two encryptions of the same plaintext never
/// share a subkey or a keystream.
///
/// # Errors
///
/// - [`Error::InvalidKeyEncoding`] / [`Error::InvalidKeyLength`] for bad keys
/// - [`Error::RandomUnavailable`] if no secure nonce source exists
pub fn encrypt(plaintext: &[u8], key: &str) -> Result<Vec<u8>, Error> {
    let nonce = random::bytes(NONCE_SIZE)?;
    let cipher = cipher_for(key, &nonce)?;

    let Ok(sealed) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut output = nonce;
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Decrypt data produced by [`encrypt`].
///
/// # Errors
///
/// - [`Error::Decryption`] if the input is too short or fails authentication
pub fn decrypt(data: &[u8], key: &str) -> Result<Vec<u8>, Error> {
    if data.len() < NONCE_SIZE + POLY1305_TAG_SIZE {
        return Err(Error::Decryption {
            reason: "input shorter than nonce and tag".to_string(),
        });
    }

    let (nonce, sealed) = data.split_at(NONCE_SIZE);
    let cipher = cipher_for(key, nonce)?;

    cipher
        .decrypt(XNonce::from_slice(nonce), sealed)
        .map_err(|_| Error::Decryption { reason: "authentication failed".to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64 of a 32-byte secret
    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let sealed = encrypt(b"Hello, World!", KEY).unwrap();
        assert_eq!(decrypt(&sealed, KEY).unwrap(), b"Hello, World!");
    }

    #[test]
    fn empty_message_roundtrip() {
        let sealed = encrypt(b"", KEY).unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + POLY1305_TAG_SIZE);
        assert_eq!(decrypt(&sealed, KEY).unwrap(), b"");
    }

    #[test]
    fn ciphertexts_are_randomized() {
        let first = encrypt(b"same message", KEY).unwrap();
        let second = encrypt(b"same message", KEY).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let mut sealed = encrypt(b"original", KEY).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xFF;

        assert!(matches!(
            decrypt(&sealed, KEY),
            Err(Error::Decryption { reason }) if reason.contains("authentication")
        ));
    }

    #[test]
    fn tampered_nonce_is_rejected() {
        let mut sealed = encrypt(b"original", KEY).unwrap();
        sealed[0] ^= 0xFF;
        assert!(decrypt(&sealed, KEY).is_err());
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(matches!(
            decrypt(&[0u8; NONCE_SIZE], KEY),
            Err(Error::Decryption { reason }) if reason.contains("shorter")
        ));
    }

    #[test]
    fn wrong_key_fails_decryption() {
        // base64 of a different 32-byte secret
        let other_key = "ZmVkY2JhOTg3NjU0MzIxMGZlZGNiYTk4NzY1NDMyMTA=";
        let sealed = encrypt(b"secret message", KEY).unwrap();
        assert!(decrypt(&sealed, other_key).is_err());
    }

    #[test]
    fn bad_key_encoding_propagates() {
        assert_eq!(encrypt(b"data", "!!not base64!!").err(), Some(Error::InvalidKeyEncoding));
    }
}
