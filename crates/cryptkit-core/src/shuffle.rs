//! Deterministic seeded permutation.
//!
//! The seed bytes are hashed with SHA-256 and the first four digest bytes,
//! read little-endian, seed a non-cryptographic Mersenne Twister. The
//! generator then drives a swap loop over the input: for each position `a`
//! in original order, a position `b` is drawn from the full range and the
//! two values are swapped. Note `b` is not restricted to `b >= a`, so this
//! is not the variance-uniform Fisher-Yates; the historical algorithm is
//! reproduced exactly.
//!
//! # Determinism
//!
//! Same `(items, seed, variant)` always yields the same output sequence.
//! Two generator variants are retained for compatibility with previously
//! generated permutations; see [`MtVariant`]. Legacy output is never
//! silently upgraded.

use sha2::{Digest, Sha256};

const STATE_SIZE: usize = 624;
const RECURRENCE_OFFSET: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Which Mersenne Twister variant drives the permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MtVariant {
    /// Canonical MT19937 twist with an unbiased bounded draw.
    #[default]
    Secure,
    /// Historical variant with a broken twist (it feeds back the low bit of
    /// the wrong state word) and a biased floating-point range mapping.
    /// Retained bit-for-bit so previously generated permutations can be
    /// reproduced; do not use for new seeds.
    Legacy,
}

/// MT19937 with both twist variants and both historical range mappings.
struct Mt19937 {
    state: [u32; STATE_SIZE],
    index: usize,
    variant: MtVariant,
}

impl Mt19937 {
    fn new(seed: u32, variant: MtVariant) -> Self {
        let mut state = [0u32; STATE_SIZE];
        state[0] = seed;
        for i in 1..STATE_SIZE {
            let previous = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(previous ^ (previous >> 30))
                .wrapping_add(i as u32);
        }

        // Force a reload before the first draw
        Self { state, index: STATE_SIZE, variant }
    }

    /// Regenerate all state words in place. The wrapping indices make the
    /// single loop equivalent to the classic three-phase reload.
    fn reload(&mut self) {
        for i in 0..STATE_SIZE {
            let upper = self.state[i];
            let lower = self.state[(i + 1) % STATE_SIZE];
            let offset = self.state[(i + RECURRENCE_OFFSET) % STATE_SIZE];

            let mixed = (upper & UPPER_MASK) | (lower & LOWER_MASK);
            let feedback = match self.variant {
                MtVariant::Secure => lower,
                MtVariant::Legacy => upper,
            } & 1;

            self.state[i] =
                offset ^ (mixed >> 1) ^ (if feedback == 1 { MATRIX_A } else { 0 });
        }

        self.index = 0;
    }

    fn next_u32(&mut self) -> u32 {
        if self.index >= STATE_SIZE {
            self.reload();
        }

        let mut value = self.state[self.index];
        self.index += 1;

        value ^= value >> 11;
        value ^= (value << 7) & 0x9d2c_5680;
        value ^= (value << 15) & 0xefc6_0000;
        value ^ (value >> 18)
    }

    /// Draw an integer in `0..=max` using the variant's range mapping.
    fn bounded(&mut self, max: u32) -> u32 {
        match self.variant {
            MtVariant::Secure => {
                let mut draw = self.next_u32();
                if max == u32::MAX {
                    return draw;
                }

                let range = max + 1;
                if range.is_power_of_two() {
                    return draw & (range - 1);
                }

                // Reject draws above the largest multiple of `range`
                let limit = u32::MAX - (u32::MAX % range) - 1;
                while draw > limit {
                    draw = self.next_u32();
                }
                draw % range
            },
            MtVariant::Legacy => {
                // Historical scaling: a 31-bit draw mapped through floating
                // point. Biased, kept as-is.
                let draw = self.next_u32() >> 1;
                ((f64::from(max) + 1.0) * (f64::from(draw) / 2_147_483_648.0)) as u32
            },
        }
    }
}

/// Reduce arbitrary seed bytes to a generator seed: first four bytes of
/// SHA-256(seed), little-endian.
fn seed_integer(seed: &[u8]) -> u32 {
    let digest = Sha256::digest(seed);
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Deterministically permute `items` under `seed`.
///
/// Returns a new sequence; positions are not preserved, only values. Same
/// `(items, seed, variant)` always yields the same output.
pub fn shuffle<T: Clone>(items: &[T], seed: &[u8], variant: MtVariant) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let count = shuffled.len();
    if count == 0 {
        return shuffled;
    }

    let mut generator = Mt19937::new(seed_integer(seed), variant);
    let max = (count - 1) as u32;
    for a in 0..count {
        let b = generator.bounded(max) as usize;
        shuffled.swap(a, b);
    }

    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_generator_matches_reference_sequence() {
        // First draws of the canonical generator for seed 1, in the
        // historical 31-bit form (full output shifted right by one).
        let mut generator = Mt19937::new(1, MtVariant::Secure);
        let draws: Vec<u32> = (0..3).map(|_| generator.next_u32() >> 1).collect();
        assert_eq!(draws, [895_547_922, 2_141_438_069, 1_546_885_062]);
    }

    #[test]
    fn legacy_generator_matches_reference_sequence() {
        let mut generator = Mt19937::new(1, MtVariant::Legacy);
        let draws: Vec<u32> = (0..3).map(|_| generator.next_u32() >> 1).collect();
        assert_eq!(draws, [1_244_335_972, 15_217_923, 1_546_885_062]);
    }

    #[test]
    fn seed_integer_is_little_endian_digest_prefix() {
        assert_eq!(seed_integer(b"seed"), 1_448_653_337);
    }

    #[test]
    fn bounded_draws_match_reference_sequences() {
        let seed = seed_integer(b"deterministic");

        let mut secure = Mt19937::new(seed, MtVariant::Secure);
        let draws: Vec<u32> = (0..12).map(|_| secure.bounded(9)).collect();
        assert_eq!(draws, [4, 6, 3, 9, 7, 2, 2, 9, 8, 7, 7, 0]);

        let mut legacy = Mt19937::new(seed, MtVariant::Legacy);
        let draws: Vec<u32> = (0..12).map(|_| legacy.bounded(9)).collect();
        assert_eq!(draws, [5, 2, 6, 2, 1, 3, 8, 3, 8, 1, 6, 3]);
    }

    #[test]
    fn known_answer_orderings() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(
            shuffle(&items, b"seed", MtVariant::Secure),
            [1, 4, 2, 9, 0, 3, 6, 8, 5, 7]
        );
        assert_eq!(
            shuffle(&items, b"seed", MtVariant::Legacy),
            [4, 7, 5, 2, 8, 3, 0, 1, 6, 9]
        );

        let small = [1, 2, 3, 4, 5];
        assert_eq!(shuffle(&small, b"bc", MtVariant::Secure), [1, 4, 5, 2, 3]);
        assert_eq!(shuffle(&small, b"bc", MtVariant::Legacy), [1, 4, 2, 3, 5]);
    }

    #[test]
    fn works_on_non_copy_values() {
        let items: Vec<String> = "abcdef".chars().map(String::from).collect();
        let shuffled = shuffle(&items, b"another seed", MtVariant::Secure);
        assert_eq!(shuffled, ["a", "c", "f", "b", "d", "e"]);
    }

    #[test]
    fn variants_disagree_for_the_same_seed() {
        let items: Vec<u32> = (0..16).collect();
        assert_ne!(
            shuffle(&items, b"shared", MtVariant::Secure),
            shuffle(&items, b"shared", MtVariant::Legacy)
        );
    }

    #[test]
    fn empty_and_singleton_inputs() {
        let empty: [u8; 0] = [];
        assert!(shuffle(&empty, b"seed", MtVariant::Secure).is_empty());
        assert_eq!(shuffle(&[7u8], b"seed", MtVariant::Legacy), [7]);
    }

    #[test]
    fn input_is_left_untouched() {
        let items: Vec<u32> = (0..8).collect();
        let _ = shuffle(&items, b"seed", MtVariant::Secure);
        assert_eq!(items, (0..8).collect::<Vec<u32>>());
    }
}
