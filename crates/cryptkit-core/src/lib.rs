//! Cryptkit core primitives
//!
//! A small cryptographic toolkit built around one idea: many independent
//! subkeys from a single master secret, separated purely by purpose labels.
//!
//! # Key Lifecycle
//!
//! A [`KeyContext`] owns a validated master secret for the duration of one
//! encryption or decryption operation. Every subkey is recomputed on demand
//! from `(secret, algorithm, salt, info)` and never cached.
//!
//! ```text
//! Master Secret (>= 32 bytes)
//!        │
//!        ▼
//! HKDF → purpose-bound subkeys ("authenticationKey|…", "encryptionKey|…")
//!        │
//!        ├─▶ HMAC message checksums
//!        ├─▶ One-time-pad keystream chunks (otp)
//!        └─▶ AEAD wrapper key (aead)
//! ```
//!
//! Alongside the derivation engine the crate ships:
//!
//! - [`otp`]: a self-inverse stream cipher whose keystream is generated in
//!   digest-sized chunks by the derivation engine, with the message length
//!   bound into the salt and the chunk index into the info string.
//! - [`shuffle`]: a deterministic, seed-driven permutation with two
//!   selectable generator variants, one of which reproduces a historical
//!   broken bit-generation algorithm bit-for-bit.
//! - [`random`]: a fail-safe chain of secure random byte providers.
//!
//! # Security
//!
//! Domain Separation:
//! - Distinct purposes derive distinct keys from one secret by varying only
//!   the HKDF info string; one secret+salt pair is safely reusable across
//!   purposes as long as info strings never collide
//!
//! Keystream Uniqueness:
//! - The stream cipher binds the total message length into the salt and the
//!   chunk index into the info string, so no `(salt, info)` pair repeats
//!   within a message or across messages of different lengths
//!
//! Secret Hygiene:
//! - Master secrets and derived key buffers are zeroized when dropped
//! - The decoded master secret is never re-exposed to callers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
mod error;
mod hash;
pub mod keys;
pub mod otp;
pub mod random;
pub mod shuffle;

pub use error::Error;
pub use keys::{KeyContext, MIN_KEY_BYTES, WrapperVariables};
pub use otp::{crypt, crypt_default};
pub use shuffle::{MtVariant, shuffle};
