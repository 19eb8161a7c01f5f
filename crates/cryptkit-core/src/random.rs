//! Secure random byte source with an ordered provider fallback chain.
//!
//! Providers are attempted in order; each either fills the buffer or yields
//! to the next. Exhausting the chain is [`Error::RandomUnavailable`], a
//! fatal condition. There is no non-secure fallback.

use rand::RngCore;

use crate::error::Error;

/// A provider either fills the buffer with secure random bytes or reports
/// that the next provider should be tried.
type Provider = fn(&mut [u8]) -> bool;

/// Platform CSPRNG via the `getrandom` syscall interface.
fn platform_csprng(buffer: &mut [u8]) -> bool {
    getrandom::getrandom(buffer).is_ok()
}

/// Secondary source: the operating system RNG handle.
fn os_rng(buffer: &mut [u8]) -> bool {
    rand::rngs::OsRng.try_fill_bytes(buffer).is_ok()
}

const PROVIDERS: &[Provider] = &[platform_csprng, os_rng];

/// Return `count` securely generated random bytes.
///
/// # Errors
///
/// - [`Error::RandomUnavailable`] if every provider in the chain fails
pub fn bytes(count: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = vec![0u8; count];
    for provider in PROVIDERS {
        if provider(&mut buffer) {
            return Ok(buffer);
        }
    }

    Err(Error::RandomUnavailable)
}
