//! Random source for spawn parameters.
//! Entropy-seeded at runtime; tests seed it explicitly.

use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng};

#[derive(Debug, Clone)]
pub struct Rng {
    inner: SmallRng,
}

impl Rng {
    /// Deterministic generator for tests and tooling.
    pub fn new(seed: u64) -> Self {
        Rng {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the platform entropy source.
    pub fn from_entropy() -> Self {
        Rng {
            inner: SmallRng::from_entropy(),
        }
    }

    /// Uniform sample in [0, 1).
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform sample in [a, b). Returns `a` when the range is empty.
    pub fn range(&mut self, a: f32, b: f32) -> f32 {
        a + self.unit() * (b - a)
    }

    /// Uniform angle in [-PI, PI).
    pub fn angle(&mut self) -> f32 {
        self.range(-std::f32::consts::PI, std::f32::consts::PI)
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p.clamp(0.0, 1.0)
    }

    /// Pick one element. Panics on an empty slice, which is a programming error.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.inner.gen_range(0..items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range(-35.0, 35.0);
            assert!((-35.0..35.0).contains(&v), "{}", v);
        }
    }

    #[test]
    fn degenerate_range_returns_start() {
        let mut rng = Rng::new(7);
        assert_eq!(rng.range(4.0, 4.0), 4.0);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = Rng::new(1);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn pick_returns_member() {
        let mut rng = Rng::new(3);
        let items = [1, 2, 3];
        for _ in 0..50 {
            assert!(items.contains(&rng.pick(&items)));
        }
    }
}
