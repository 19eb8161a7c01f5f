//! One-time-pad stream cipher driven by the key derivation engine.
//!
//! The keystream is generated in digest-sized chunks: chunk `i` of a
//! `total`-byte message is XORed against
//! `derive_key(format!("{total}{i}"))` from a [`KeyContext`] whose salt is
//! the decimal total length. Binding the length into the salt and the index
//! into the info string means no `(salt, info)` pair repeats within one
//! message, and two messages of different lengths never share keystream at
//! the same chunk index. That is a deliberate, auditable policy choice, not
//! a general cryptographic guarantee.
//!
//! The operation is its own inverse, so encryption and decryption share one
//! code path.

use zeroize::Zeroize;

use crate::{error::Error, keys::KeyContext};

/// Keystream algorithm used by [`crypt_default`].
pub const DEFAULT_ALGORITHM: &str = "sha3-512";

/// Encrypt or decrypt `input` under `key` with the given keystream hash
/// algorithm.
///
/// Calling `crypt` on its own output with identical `key` and `algorithm`
/// reproduces the original input.
///
/// # Errors
///
/// - [`Error::InvalidKeyLength`] if `key` is shorter than 32 bytes
/// - [`Error::Derivation`] if the algorithm name is unsupported or the
///   derivation primitive fails; any chunk failure aborts the whole call
pub fn crypt(input: &[u8], key: &[u8], algorithm: &str) -> Result<Vec<u8>, Error> {
    let total = input.len().to_string();
    let context = KeyContext::from_raw(key, algorithm, "", total.as_bytes())?;
    let chunk_size = context.digest_size()?;

    let mut output = Vec::with_capacity(input.len());
    for (index, chunk) in input.chunks(chunk_size).enumerate() {
        let mut keystream = context.derive_key(&format!("{total}{index}"))?;
        output.extend(chunk.iter().zip(&keystream).map(|(byte, mask)| byte ^ mask));
        keystream.zeroize();
    }

    Ok(output)
}

/// [`crypt`] with the default keystream algorithm.
pub fn crypt_default(input: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    crypt(input, key, DEFAULT_ALGORITHM)
}
