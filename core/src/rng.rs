//! Deterministic random stream derived from a seed string.
//!
//! The seed is first folded into a 32-bit state with a multiply-xor-rotate hash, then
//! that state drives a mulberry32 generator. Both stages only use wrapping 32-bit
//! integer arithmetic, so a seed yields the same stream on every platform.
//!
//! Sampling helpers are implemented here rather than through `rand::Rng` so daily
//! boards stay stable across `rand` upgrades.

use rand::RngCore;

/// Seeded pseudorandom generator used by every generation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self::from_state(hash_seed(seed))
    }

    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Uses `seed` when given, otherwise a fresh stream from thread entropy.
    #[cfg(feature = "std")]
    pub fn from_optional_seed(seed: Option<&str>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_state(rand::random()),
        }
    }

    /// Current generator state; a generator rebuilt with [`SeededRng::from_state`]
    /// continues the same stream.
    pub const fn state(&self) -> u32 {
        self.state
    }

    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / 4_294_967_296.0
    }

    /// Uniform float in `[low, high)`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// Uniform index in `0..n`; `0` when `n` is zero.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Uniform integer in `low..=high`.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        low + self.below(high.saturating_sub(low) + 1)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }

    /// Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_raw());
        let low = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Folds the characters of `seed` into a 32-bit generator state.
pub fn hash_seed(seed: &str) -> u32 {
    let length = seed.chars().count() as u32;
    let mut h = 1_779_033_703 ^ length;
    for ch in seed.chars() {
        h = (h ^ u32::from(ch)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRng::new("SEED_2025-08-11");
        let mut b = SeededRng::new("SEED_2025-08-11");

        for _ in 0..256 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<u32> = {
            let mut rng = SeededRng::new("SEED_2025-08-11");
            (0..8).map(|_| rng.next_u32()).collect()
        };
        let b: Vec<u32> = {
            let mut rng = SeededRng::new("SEED_2025-08-12");
            (0..8).map(|_| rng.next_u32()).collect()
        };

        assert_ne!(a, b);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = SeededRng::new("unit");
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn below_respects_bounds() {
        let mut rng = SeededRng::new("bounds");
        assert_eq!(rng.below(0), 0);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
            assert!((3..=5).contains(&rng.range_inclusive(3, 5)));
        }
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = SeededRng::new("shuffle");
        let mut items: Vec<u8> = (0..20).collect();

        rng.shuffle(&mut items);
        items.sort_unstable();

        assert_eq!(items, (0..20).collect::<Vec<u8>>());
    }

    #[test]
    fn state_resumes_stream() {
        let mut rng = SeededRng::new("resume");
        rng.next_u32();
        let mut resumed = SeededRng::from_state(rng.state());

        assert_eq!(rng.next_u32(), resumed.next_u32());
    }

    #[test]
    fn fill_bytes_handles_partial_chunks() {
        let mut rng = SeededRng::new("bytes");
        let mut buf = [0u8; 7];

        rng.fill_bytes(&mut buf);

        assert!(buf.iter().any(|&b| b != 0));
    }
}
