//! Randomness as an injected dependency.
//!
//! A small trait for the operations synthesis actually needs, built on top
//! of `rand`/`rand_xoshiro` rather than the full `rand` `Distribution`
//! machinery, with a default implementation seeded via
//! `rand_xoshiro::Xoroshiro128PlusPlus` and `rand::SeedableRng`.

use rand::{Rng as _, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// Operations a random source must expose to drive synthesis.
///
/// Implementations are thread-confined: `AudioGenerator` constructs one
/// instance per worker when running multi-threaded, and
/// nothing here is `Sync`.
pub trait RandomSource {
    fn uniform01(&mut self) -> f64;

    fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.uniform01() * (hi - lo)
    }

    fn uniform_int(&mut self, lo: i64, hi_exclusive: i64) -> i64 {
        assert!(hi_exclusive > lo);
        let span = (hi_exclusive - lo) as f64;
        lo + (self.uniform01() * span) as i64
    }

    /// Gaussian via Box-Muller, caching the second of each pair of draws.
    fn gaussian(&mut self, mean: f64, std: f64) -> f64;

    /// A full-width random `u64`, for seeding other RNG instances from this
    /// one rather than from a fixed or position-derived value.
    fn next_u64(&mut self) -> u64 {
        let hi = (self.uniform01() * u32::MAX as f64) as u64;
        let lo = (self.uniform01() * u32::MAX as f64) as u64;
        (hi << 32) | lo
    }
}

/// Default [`RandomSource`] backed by `rand_xoshiro`'s xoroshiro128++.
pub struct XoshiroRandomSource {
    rng: Xoroshiro128PlusPlus,
    cached_gaussian: Option<f64>,
}

impl XoshiroRandomSource {
    pub fn new_seeded(seed: u64) -> Self {
        XoshiroRandomSource {
            rng: Xoroshiro128PlusPlus::seed_from_u64(seed),
            cached_gaussian: None,
        }
    }

    /// Derive a worker-specific seed from a base seed, worker id, and tick
    /// counter, for reproducible output under multi-threaded dispatch.
    pub fn for_worker(base_seed: u64, worker_id: usize, tick_counter: u64) -> Self {
        let mixed = base_seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add((worker_id as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9))
            .wrapping_add(tick_counter.wrapping_mul(0x94D0_49BB_1331_11EB));
        Self::new_seeded(mixed)
    }

    pub fn from_entropy() -> Self {
        XoshiroRandomSource {
            rng: Xoroshiro128PlusPlus::from_entropy(),
            cached_gaussian: None,
        }
    }
}

impl RandomSource for XoshiroRandomSource {
    fn uniform01(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }

    fn gaussian(&mut self, mean: f64, std: f64) -> f64 {
        if let Some(cached) = self.cached_gaussian.take() {
            return mean + std * cached;
        }

        // Box-Muller, polar-free form: two uniforms in (0,1] produce two
        // independent standard normal draws; keep one for the next call.
        let u1 = (1.0 - self.uniform01()).max(f64::MIN_POSITIVE);
        let u2 = self.uniform01();
        let r = (-2.0 * u1.ln()).sqrt();
        let z0 = r * (std::f64::consts::TAU * u2).cos();
        let z1 = r * (std::f64::consts::TAU * u2).sin();

        self.cached_gaussian = Some(z1);
        mean + std * z0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_deterministic() {
        let mut a = XoshiroRandomSource::new_seeded(42);
        let mut b = XoshiroRandomSource::new_seeded(42);
        for _ in 0..16 {
            assert_eq!(a.uniform01(), b.uniform01());
        }
    }

    #[test]
    fn uniform01_is_in_unit_range() {
        let mut rng = XoshiroRandomSource::new_seeded(7);
        for _ in 0..1000 {
            let v = rng.uniform01();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn uniform_int_respects_bounds() {
        let mut rng = XoshiroRandomSource::new_seeded(3);
        for _ in 0..1000 {
            let v = rng.uniform_int(2, 5);
            assert!((2..5).contains(&v));
        }
    }

    #[test]
    fn next_u64_is_deterministic_given_the_same_seed() {
        let mut a = XoshiroRandomSource::new_seeded(9);
        let mut b = XoshiroRandomSource::new_seeded(9);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn gaussian_caches_every_other_draw() {
        let mut rng = XoshiroRandomSource::new_seeded(1);
        assert!(rng.cached_gaussian.is_none());
        rng.gaussian(0.0, 1.0);
        assert!(rng.cached_gaussian.is_some());
        rng.gaussian(0.0, 1.0);
        assert!(rng.cached_gaussian.is_none());
    }
}
