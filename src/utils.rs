//! Utility functions shared by the library and its test suites.
//!
//! Indicator outputs use `NaN` to mean "undefined at this position", so the
//! comparison helpers here treat two `NaN`s as equal — convenient when
//! checking a computed series against a reference vector.

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point
/// operations, such as long rolling sums.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other, or if
/// both are `NaN`.
///
/// # Example
///
/// ```
/// use flux_ta::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(!approx_eq(1.0, 2.0, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Counts the `NaN` values in a slice.
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Counts the leading run of `NaN` values in a slice.
///
/// This is the observed warm-up of a computed series.
///
/// # Example
///
/// ```
/// use flux_ta::utils::count_nan_prefix;
///
/// let data = [f64::NAN, f64::NAN, 1.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_basics() {
        assert!(approx_eq(0.1 + 0.2, 0.3, EPSILON));
        assert!(!approx_eq(f64::NAN, 0.3, EPSILON));
        assert!(approx_eq(f32::NAN, f32::NAN, 1e-6));
    }

    #[test]
    fn nan_counting() {
        let data = [f64::NAN, 1.0, f64::NAN, 2.0];
        assert_eq!(count_nans(&data), 2);
        assert_eq!(count_nan_prefix(&data), 1);
        assert_eq!(count_nan_prefix(&[1.0_f64]), 0);
        let empty: [f64; 0] = [];
        assert_eq!(count_nan_prefix(&empty), 0);
    }
}
