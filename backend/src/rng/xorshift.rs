//! xorshift64* random number generator
//!
//! Fast 64-bit PRNG. Same seed → same sequence, which is what makes a
//! generated patient day reproducible across runs and machines.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use triage_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let percentile = rng.percentile(); // [0, 100)
/// assert!(percentile < 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed (zero is remapped, xorshift needs a non-zero state)
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: u64, max: u64) -> u64 {
        assert!(min < max, "min must be less than max");
        min + self.next() % (max - min)
    }

    /// Uniform index into a collection of `len` items
    ///
    /// # Panics
    /// Panics if `len` is zero.
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::RngManager;
    ///
    /// let areas = ["SAPU", "urgencia_adulto", "infantil"];
    /// let mut rng = RngManager::new(7);
    /// let area = areas[rng.index(areas.len())];
    /// assert!(areas.contains(&area));
    /// ```
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty collection");
        self.range(0, len as u64) as usize
    }

    /// Percentile draw in [0, 100), used for discrete category sampling
    pub fn percentile(&mut self) -> u8 {
        self.range(0, 100) as u8
    }

    /// Current RNG state (a new RNG seeded with it continues the same stream)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(100, 50);
    }

    #[test]
    #[should_panic(expected = "cannot pick from an empty collection")]
    fn test_index_empty_panics() {
        let mut rng = RngManager::new(12345);
        rng.index(0);
    }

    #[test]
    fn test_percentile_in_range() {
        let mut rng = RngManager::new(12345);
        for _ in 0..1000 {
            assert!(rng.percentile() < 100);
        }
    }

    #[test]
    fn test_state_resumes_stream() {
        let mut rng = RngManager::new(99);
        rng.next();
        let mut resumed = RngManager::new(rng.get_state());
        assert_eq!(rng.next(), resumed.next());
    }
}
