//! Master-secret handling and domain-separated subkey derivation.
//!
//! A [`KeyContext`] is built once per encryption or decryption operation and
//! never mutates afterwards. Subkeys are pure functions of
//! `(secret, algorithm, salt, info)` and are recomputed on every call rather
//! than cached.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use zeroize::Zeroize;

use crate::{
    error::Error,
    hash::{self, HashAlgorithm},
    random,
};

/// Minimum master-key length in bytes, enforced on the decoded secret.
pub const MIN_KEY_BYTES: usize = 32;

/// Purpose label for authentication subkeys.
const AUTHENTICATION_LABEL: &str = "authenticationKey";

/// Purpose label for encryption subkeys.
const ENCRYPTION_LABEL: &str = "encryptionKey";

/// Read-only handoff values for an external authenticated-cipher primitive.
///
/// Exposes everything such a wrapper needs without re-exposing the master
/// secret itself. The derived encryption key is zeroized on drop.
pub struct WrapperVariables {
    /// Initialization vector / salt the context was built with
    pub iv: Vec<u8>,
    /// Derived encryption subkey
    pub encryption_key: Vec<u8>,
    /// Cipher-name tag mixed into the derivation info strings
    pub cipher: String,
}

impl Drop for WrapperVariables {
    fn drop(&mut self) {
        self.encryption_key.zeroize();
    }
}

/// The key derivation engine.
///
/// Owns a validated master secret together with a hash-algorithm name, an
/// IV/salt and a free-form cipher tag, and derives purpose-specific subkeys
/// via HKDF with domain-separated info strings.
///
/// # Security
///
/// - The decoded secret is owned exclusively by this context and zeroized
///   when the context is dropped
/// - Domain separation happens purely through distinct info strings; one
///   secret+salt pair is reusable across purposes as long as info strings
///   never collide
pub struct KeyContext {
    /// Decoded master secret, >= [`MIN_KEY_BYTES`]
    secret: Vec<u8>,
    /// Hash algorithm name, resolved lazily at derivation time
    algorithm: String,
    /// HKDF salt, may be empty
    salt: Vec<u8>,
    /// Cipher-name tag mixed into purpose labels, may be empty
    cipher: String,
}

impl KeyContext {
    /// Build a context from a base64-encoded master key.
    ///
    /// Decoding is strict: malformed input is rejected rather than silently
    /// truncated. The algorithm name is not validated here; an unsupported
    /// name surfaces as [`Error::Derivation`] from the first derivation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyEncoding`] if `key` is not valid base64
    /// - [`Error::InvalidKeyLength`] if the decoded key is shorter than
    ///   [`MIN_KEY_BYTES`]
    pub fn from_encoded(key: &str, algorithm: &str, cipher: &str, iv: &[u8]) -> Result<Self, Error> {
        let secret = STANDARD.decode(key).map_err(|_| Error::InvalidKeyEncoding)?;
        Self::from_secret(secret, algorithm, cipher, iv)
    }

    /// Build a context from raw master-key bytes, without decoding.
    ///
    /// Used by callers whose key material is already binary, such as the
    /// one-time-pad stream cipher.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `secret` is shorter than
    ///   [`MIN_KEY_BYTES`]
    pub fn from_raw(secret: &[u8], algorithm: &str, cipher: &str, iv: &[u8]) -> Result<Self, Error> {
        Self::from_secret(secret.to_vec(), algorithm, cipher, iv)
    }

    fn from_secret(
        mut secret: Vec<u8>,
        algorithm: &str,
        cipher: &str,
        iv: &[u8],
    ) -> Result<Self, Error> {
        if secret.len() < MIN_KEY_BYTES {
            let actual = secret.len();
            secret.zeroize();
            return Err(Error::InvalidKeyLength { actual });
        }

        Ok(Self {
            secret,
            algorithm: algorithm.to_owned(),
            salt: iv.to_vec(),
            cipher: cipher.to_owned(),
        })
    }

    /// Derive a subkey for the given info string.
    ///
    /// Runs HKDF over `(algorithm, secret, salt, info)` with the output
    /// length fixed to the algorithm's native digest size. Two calls with
    /// identical info strings yield byte-identical output.
    ///
    /// Info strings for the built-in purposes are plain concatenations
    /// (`"authenticationKey|<cipher>"`); no escaping is applied, so a cipher
    /// tag containing the separator could in principle collide with another
    /// tag/purpose pair. The encoding is kept as-is for compatibility with
    /// previously derived keys.
    pub fn derive_key(&self, info: &str) -> Result<Vec<u8>, Error> {
        let algorithm = HashAlgorithm::from_name(&self.algorithm)?;
        hash::derive(algorithm, &self.secret, &self.salt, info.as_bytes())
    }

    /// Derive the authentication subkey.
    pub fn authentication_key(&self) -> Result<Vec<u8>, Error> {
        self.derive_key(&format!("{AUTHENTICATION_LABEL}|{}", self.cipher))
    }

    /// Derive the encryption subkey.
    pub fn encryption_key(&self) -> Result<Vec<u8>, Error> {
        self.derive_key(&format!("{ENCRYPTION_LABEL}|{}", self.cipher))
    }

    /// Keyed checksum over `message`, using the authentication subkey as the
    /// MAC key. Returns raw digest bytes.
    pub fn message_checksum(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let algorithm = HashAlgorithm::from_name(&self.algorithm)?;
        let mut key = self.authentication_key()?;
        let digest = hash::checksum(algorithm, &key, message);
        key.zeroize();
        digest
    }

    /// Constant-time verification of a checksum produced by
    /// [`message_checksum`](Self::message_checksum).
    pub fn verify_checksum(&self, message: &[u8], checksum: &[u8]) -> Result<bool, Error> {
        let algorithm = HashAlgorithm::from_name(&self.algorithm)?;
        let mut key = self.authentication_key()?;
        let verdict = hash::verify_checksum(algorithm, &key, message, checksum);
        key.zeroize();
        verdict
    }

    /// Read-only variables for an external authenticated-cipher wrapper.
    pub fn wrapper_variables(&self) -> Result<WrapperVariables, Error> {
        Ok(WrapperVariables {
            iv: self.salt.clone(),
            encryption_key: self.encryption_key()?,
            cipher: self.cipher.clone(),
        })
    }

    /// Native digest size of the context's hash algorithm, in bytes.
    pub fn digest_size(&self) -> Result<usize, Error> {
        Ok(HashAlgorithm::from_name(&self.algorithm)?.output_size())
    }

    /// Generate a new base64-encoded master key of `bytes` random bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `bytes` is below [`MIN_KEY_BYTES`]
    /// - [`Error::RandomUnavailable`] if no secure random source exists
    pub fn generate(bytes: usize) -> Result<String, Error> {
        if bytes < MIN_KEY_BYTES {
            return Err(Error::InvalidKeyLength { actual: bytes });
        }

        let mut raw = random::bytes(bytes)?;
        let encoded = STANDARD.encode(&raw);
        raw.zeroize();
        Ok(encoded)
    }
}

impl Drop for KeyContext {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}
