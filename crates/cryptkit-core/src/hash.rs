//! Runtime-named hash algorithms backing derivation and checksums.
//!
//! Algorithm names are resolved at derivation time, not at key-context
//! construction, so an unsupported name surfaces as a generic
//! [`Error::Derivation`] from the first operation that needs the primitive.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};

use crate::error::Error;

/// A hash function usable in both HKDF and HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl HashAlgorithm {
    /// Resolve an algorithm name. Unknown names are a derivation failure.
    pub(crate) fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha3-224" => Ok(Self::Sha3_224),
            "sha3-256" => Ok(Self::Sha3_256),
            "sha3-384" => Ok(Self::Sha3_384),
            "sha3-512" => Ok(Self::Sha3_512),
            other => Err(Error::Derivation { reason: format!("unsupported hash algorithm: {other}") }),
        }
    }

    /// Native digest output size in bytes.
    pub(crate) fn output_size(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha3_224 => 28,
            Self::Sha256 | Self::Sha3_256 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 => 64,
        }
    }
}

/// Monomorphize `$body` over the digest type selected by `$algo`.
macro_rules! with_digest {
    ($algo:expr, $D:ident => $body:expr) => {
        match $algo {
            HashAlgorithm::Sha224 => {
                type $D = sha2::Sha224;
                $body
            },
            HashAlgorithm::Sha256 => {
                type $D = sha2::Sha256;
                $body
            },
            HashAlgorithm::Sha384 => {
                type $D = sha2::Sha384;
                $body
            },
            HashAlgorithm::Sha512 => {
                type $D = sha2::Sha512;
                $body
            },
            HashAlgorithm::Sha3_224 => {
                type $D = sha3::Sha3_224;
                $body
            },
            HashAlgorithm::Sha3_256 => {
                type $D = sha3::Sha3_256;
                $body
            },
            HashAlgorithm::Sha3_384 => {
                type $D = sha3::Sha3_384;
                $body
            },
            HashAlgorithm::Sha3_512 => {
                type $D = sha3::Sha3_512;
                $body
            },
        }
    };
}

/// HKDF extract+expand over `(secret, salt, info)`, output length fixed to
/// the algorithm's native digest size.
///
/// An empty salt is passed through as-is; under HMAC it is equivalent to the
/// RFC 5869 default of a zero-filled block.
pub(crate) fn derive(
    algo: HashAlgorithm,
    secret: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<Vec<u8>, Error> {
    with_digest!(algo, D => {
        let hkdf = Hkdf::<D>::new(Some(salt), secret);
        let mut okm = vec![0u8; algo.output_size()];
        hkdf.expand(info, &mut okm)
            .map_err(|_| Error::Derivation { reason: "hkdf rejected requested output length".to_string() })?;
        Ok(okm)
    })
}

/// Keyed message authentication code, returning raw digest bytes.
pub(crate) fn checksum(algo: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    with_digest!(algo, D => {
        let Ok(mut mac) = Hmac::<D>::new_from_slice(key) else {
            unreachable!("HMAC accepts any key size");
        };
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    })
}

/// Constant-time verification of a checksum produced by [`checksum`].
pub(crate) fn verify_checksum(
    algo: HashAlgorithm,
    key: &[u8],
    message: &[u8],
    expected: &[u8],
) -> Result<bool, Error> {
    with_digest!(algo, D => {
        let Ok(mut mac) = Hmac::<D>::new_from_slice(key) else {
            unreachable!("HMAC accepts any key size");
        };
        mac.update(message);
        Ok(mac.verify_slice(expected).is_ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(HashAlgorithm::from_name("sha256").unwrap(), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::from_name("sha3-512").unwrap(), HashAlgorithm::Sha3_512);
    }

    #[test]
    fn unknown_name_is_a_derivation_failure() {
        let result = HashAlgorithm::from_name("md5");
        assert!(matches!(
            result,
            Err(Error::Derivation { reason }) if reason.contains("md5")
        ));
    }

    #[test]
    fn output_sizes_match_digests() {
        assert_eq!(HashAlgorithm::Sha224.output_size(), 28);
        assert_eq!(HashAlgorithm::Sha256.output_size(), 32);
        assert_eq!(HashAlgorithm::Sha384.output_size(), 48);
        assert_eq!(HashAlgorithm::Sha512.output_size(), 64);
        assert_eq!(HashAlgorithm::Sha3_256.output_size(), 32);
        assert_eq!(HashAlgorithm::Sha3_512.output_size(), 64);
    }

    #[test]
    fn derive_output_length_equals_digest_size() {
        let secret = [0x0Bu8; 32];
        for name in ["sha224", "sha256", "sha384", "sha512", "sha3-256", "sha3-512"] {
            let algo = HashAlgorithm::from_name(name).unwrap();
            let okm = derive(algo, &secret, b"salt", b"info").unwrap();
            assert_eq!(okm.len(), algo.output_size(), "wrong length for {name}");
        }
    }

    #[test]
    fn empty_salt_matches_absent_salt() {
        // RFC 5869: absent salt defaults to a zero-filled string, which HMAC
        // key padding makes equivalent to an empty salt.
        let secret = [0x42u8; 32];
        let with_empty = derive(HashAlgorithm::Sha256, &secret, b"", b"info").unwrap();
        let hkdf = Hkdf::<sha2::Sha256>::new(None, &secret);
        let mut okm = [0u8; 32];
        hkdf.expand(b"info", &mut okm).unwrap();
        assert_eq!(with_empty, okm);
    }

    #[test]
    fn checksum_verifies_and_rejects() {
        let key = [0x13u8; 32];
        let tag = checksum(HashAlgorithm::Sha3_512, &key, b"payload").unwrap();
        assert_eq!(tag.len(), 64);
        assert!(verify_checksum(HashAlgorithm::Sha3_512, &key, b"payload", &tag).unwrap());
        assert!(!verify_checksum(HashAlgorithm::Sha3_512, &key, b"tampered", &tag).unwrap());
    }
}
