//! Error types for the toolkit.
//!
//! All failures are reported synchronously at the call that triggered them.
//! Nothing is logged, retried or recovered internally, and there is no
//! partial-success state: a derivation failure on any keystream chunk aborts
//! the whole operation.

use thiserror::Error;

use crate::keys::MIN_KEY_BYTES;

/// Errors surfaced by key handling, derivation and the ciphers built on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The encoded master key was not valid strict base64.
    #[error("master key is not valid base64")]
    InvalidKeyEncoding,

    /// The master key was shorter than the 32-byte minimum.
    #[error("master key is {actual} bytes, minimum is {MIN_KEY_BYTES}")]
    InvalidKeyLength {
        /// Actual key length in bytes
        actual: usize,
    },

    /// The underlying derivation or MAC primitive reported an internal
    /// error. Treated as fatal and unexpected, never retried.
    #[error("key derivation failed: {reason}")]
    Derivation {
        /// What the primitive rejected
        reason: String,
    },

    /// Every secure random byte provider in the fallback chain failed.
    #[error("no secure random byte source is available")]
    RandomUnavailable,

    /// Authenticated decryption rejected the input.
    #[error("decryption failed: {reason}")]
    Decryption {
        /// Why the input was rejected
        reason: String,
    },
}
