//! Seedable linear congruential generator
//!
//! Spawn-time randomness (scatter anchors, body point jitter, state jitter)
//! goes through this so a fixed seed reproduces a run exactly. Frame-time
//! turbulence deliberately does NOT use it; that is a pure function of
//! elapsed time and particle index.

/// Small LCG with the classic Numerical Recipes constants
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform index in [0, len)
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range() {
        let mut rng = Lcg::new(42);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!(v >= 0.0 && v < 1.0);
        }
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.range(-3.0, 5.0);
            assert!(v >= -3.0 && v < 5.0);
        }
    }

    #[test]
    fn test_reproducible() {
        let mut a = Lcg::new(123);
        let mut b = Lcg::new(123);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_index_in_bounds() {
        let mut rng = Lcg::new(99);
        for _ in 0..100 {
            assert!(rng.index(10) < 10);
        }
        assert_eq!(rng.index(0), 0);
    }
}
