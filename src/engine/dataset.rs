//! Dataset generation and verification helpers.

use crate::config::DatasetConfig;
use crate::engine::rng::SortRng;

/// Produces fresh arrays of bar heights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetGenerator {
    /// Number of values per dataset.
    pub size: usize,
    /// Smallest value (inclusive).
    pub min_value: u32,
    /// Largest value (exclusive).
    pub max_value: u32,
}

impl DatasetGenerator {
    /// Create a generator for `size` values in `[min_value, max_value)`.
    #[must_use]
    pub const fn new(size: usize, min_value: u32, max_value: u32) -> Self {
        Self {
            size,
            min_value,
            max_value,
        }
    }

    /// Create a generator from the dataset section of the configuration.
    #[must_use]
    pub const fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.size, config.min_value, config.max_value)
    }

    /// Generate `size` random positive integers.
    pub fn generate(&self, rng: &mut SortRng) -> Vec<u32> {
        (0..self.size)
            .map(|_| rng.gen_range_u32(self.min_value, self.max_value))
            .collect()
    }
}

/// Returns true if `values` is in non-decreasing order.
#[must_use]
pub fn is_non_decreasing(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Returns true if `a` and `b` hold the same multiset of values.
#[must_use]
pub fn same_multiset(a: &[u32], b: &[u32]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_size_and_range() {
        let generator = DatasetGenerator::new(60, 20, 220);
        let mut rng = SortRng::new(42);
        let values = generator.generate(&mut rng);
        assert_eq!(values.len(), 60);
        assert!(values.iter().all(|&v| (20..220).contains(&v)));
    }

    #[test]
    fn test_generate_empty() {
        let generator = DatasetGenerator::new(0, 20, 220);
        let mut rng = SortRng::new(1);
        assert!(generator.generate(&mut rng).is_empty());
    }

    #[test]
    fn test_generate_reproducible() {
        let generator = DatasetGenerator::from_config(&DatasetConfig::default());
        let a = generator.generate(&mut SortRng::new(7));
        let b = generator.generate(&mut SortRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_non_decreasing() {
        assert!(is_non_decreasing(&[]));
        assert!(is_non_decreasing(&[4]));
        assert!(is_non_decreasing(&[1, 1, 2, 9]));
        assert!(!is_non_decreasing(&[3, 2]));
    }

    #[test]
    fn test_same_multiset() {
        assert!(same_multiset(&[5, 3, 8, 1], &[1, 3, 5, 8]));
        assert!(same_multiset(&[], &[]));
        assert!(!same_multiset(&[1, 1, 2], &[1, 2, 2]));
        assert!(!same_multiset(&[1], &[1, 1]));
    }
}
