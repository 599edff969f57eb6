//! Shared helpers for the integration test suites.

/// Approximate equality treating two NaNs as equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Asserts two series match element-wise within `eps`, NaN-aware.
#[allow(dead_code)]
pub fn assert_series_eq(actual: &[f64], expected: &[f64], eps: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx_eq(*a, *e, eps),
            "mismatch at index {i}: got {a}, expected {e}"
        );
    }
}

#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;
