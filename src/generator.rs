use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::InputError;

pub const DEFAULT_MIN: f64 = -10.0;
pub const DEFAULT_MAX: f64 = 10.0;

/// Half-open interval `[min, max)` that generated values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self, InputError> {
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(InputError::InvalidRange { min, max });
        }
        Ok(ValueRange { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        ValueRange {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

/// `size` values drawn uniformly from `range`.
pub fn make_random_array<R: Rng + ?Sized>(size: usize, range: ValueRange, rng: &mut R) -> Vec<f64> {
    (0..size).map(|_| range.sample(rng)).collect()
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_range() {
        let range = ValueRange::new(-2.5, 4.0).unwrap();
        let mut rng = rng_from_seed(Some(7));
        let values = make_random_array(1000, range, &mut rng);
        assert_eq!(values.len(), 1000);
        assert!(values.iter().all(|&v| (-2.5..4.0).contains(&v)));
    }

    #[test]
    fn every_slot_is_filled() {
        let range = ValueRange::new(1.0, 2.0).unwrap();
        let values = make_random_array(5, range, &mut rng_from_seed(Some(1)));
        assert!(values.iter().all(|&v| v >= 1.0));
    }

    #[test]
    fn same_seed_same_values() {
        let range = ValueRange::default();
        let a = make_random_array(32, range, &mut rng_from_seed(Some(42)));
        let b = make_random_array(32, range, &mut rng_from_seed(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn default_range_is_ten_either_side_of_zero() {
        let range = ValueRange::default();
        assert_eq!((range.min(), range.max()), (-10.0, 10.0));
    }

    #[test]
    fn rejects_empty_or_non_finite_ranges() {
        assert!(matches!(
            ValueRange::new(3.0, 3.0),
            Err(InputError::InvalidRange { .. })
        ));
        assert!(ValueRange::new(5.0, -5.0).is_err());
        assert!(ValueRange::new(f64::NAN, 1.0).is_err());
        assert!(ValueRange::new(0.0, f64::INFINITY).is_err());
        assert!(ValueRange::new(-f64::MAX, f64::MAX).is_err());
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(make_random_array(0, ValueRange::default(), &mut rng_from_seed(None)).is_empty());
    }
}
