//! Rolling-window kernels with NaN-poisoning semantics.
//!
//! These kernels back the Volume Flow Indicator's accumulation stages. They
//! follow the alignment convention used throughout the crate: the output has
//! the same length as the input, with `NaN` at every position where the
//! window is not fully defined.
//!
//! # NaN semantics
//!
//! A window that contains at least one `NaN` produces `NaN` — an undefined
//! input bar poisons every window it participates in, rather than being
//! silently skipped. This is what keeps warm-up regions exact when kernels
//! are chained (a lagged rolling mean feeding another rolling mean, as in
//! VFI).
//!
//! # Algorithm
//!
//! Both kernels maintain the window sum incrementally in O(n): values enter
//! and leave a running sum, and a separate count of `NaN`s currently inside
//! the window decides whether the output is defined. `NaN` never enters the
//! running sum, so a poisoned window recovers exact values once the `NaN`
//! leaves.

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// Computes the rolling sum of `data` over `period`.
///
/// The first `period - 1` outputs are `NaN`; any window containing a `NaN`
/// input is also `NaN`.
///
/// # Errors
///
/// Returns an error if the period is zero, the input is empty, or the input
/// is shorter than the period.
///
/// # Example
///
/// ```
/// use flux_ta::kernels::rolling_sum;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0];
/// let out = rolling_sum(&data, 2).unwrap();
/// assert!(out[0].is_nan());
/// assert!((out[1] - 3.0).abs() < 1e-10);
/// assert!((out[3] - 7.0).abs() < 1e-10);
/// ```
pub fn rolling_sum<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    rolling_sum_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the rolling sum into a pre-allocated output buffer.
///
/// # Errors
///
/// As [`rolling_sum`], plus `Error::BufferTooSmall` if `output` is shorter
/// than the input.
pub fn rolling_sum_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    crate::traits::validate_indicator_input(data, period, "rolling_sum")?;
    if output.len() < data.len() {
        return Err(Error::BufferTooSmall {
            indicator: "rolling_sum",
            required: data.len(),
            actual: output.len(),
        });
    }

    let mut sum = T::zero();
    let mut nan_in_window = 0usize;

    for i in 0..data.len() {
        let incoming = data[i];
        if incoming.is_nan() {
            nan_in_window += 1;
        } else {
            sum = sum + incoming;
        }

        if i >= period {
            let outgoing = data[i - period];
            if outgoing.is_nan() {
                nan_in_window -= 1;
            } else {
                sum = sum - outgoing;
            }
        }

        output[i] = if i + 1 < period || nan_in_window > 0 {
            T::nan()
        } else {
            sum
        };
    }

    Ok(())
}

/// Computes the rolling arithmetic mean of `data` over `period`.
///
/// Same alignment and NaN semantics as [`rolling_sum`].
///
/// # Errors
///
/// Returns an error if the period is zero, the input is empty, or the input
/// is shorter than the period.
pub fn rolling_mean<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = rolling_sum(data, period)?;
    let period_t = T::from_usize(period)?;
    for value in &mut output {
        *value = *value / period_t;
    }
    Ok(output)
}

/// Computes the first difference `data[i] - data[i - 1]`.
///
/// The output has the same length as the input; index 0 is `NaN` (no prior
/// value).
///
/// # Errors
///
/// Returns `Error::EmptyInput` for an empty slice.
pub fn diff<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    use crate::traits::ValidatedInput;
    data.validate_not_empty()?;

    let mut output = vec![T::nan(); data.len()];
    for i in 1..data.len() {
        output[i] = data[i] - data[i - 1];
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn rolling_sum_reference() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let out = rolling_sum(&data, 3).unwrap();
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(approx_eq(out[2], 6.0, EPSILON));
        assert!(approx_eq(out[3], 9.0, EPSILON));
        assert!(approx_eq(out[4], 12.0, EPSILON));
    }

    #[test]
    fn rolling_sum_period_one_is_identity() {
        let data = vec![3.0_f64, 1.0, 4.0];
        let out = rolling_sum(&data, 1).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn rolling_sum_nan_poisons_window() {
        let data = vec![1.0_f64, f64::NAN, 3.0, 4.0, 5.0];
        let out = rolling_sum(&data, 2).unwrap();
        assert!(out[0].is_nan());
        assert!(out[1].is_nan()); // window [1.0, NaN]
        assert!(out[2].is_nan()); // window [NaN, 3.0]
        assert!(approx_eq(out[3], 7.0, EPSILON));
        assert!(approx_eq(out[4], 9.0, EPSILON));
    }

    #[test]
    fn rolling_sum_recovers_exactly_after_nan() {
        // The NaN never enters the running sum, so post-NaN windows are
        // exact, not drifted.
        let data = vec![10.0_f64, f64::NAN, 10.0, 10.0, 10.0];
        let out = rolling_sum(&data, 3).unwrap();
        assert!(out[3].is_nan());
        assert!(approx_eq(out[4], 30.0, EPSILON));
    }

    #[test]
    fn rolling_mean_reference() {
        let data = vec![2.0_f64, 4.0, 6.0, 8.0];
        let out = rolling_mean(&data, 2).unwrap();
        assert!(out[0].is_nan());
        assert!(approx_eq(out[1], 3.0, EPSILON));
        assert!(approx_eq(out[2], 5.0, EPSILON));
        assert!(approx_eq(out[3], 7.0, EPSILON));
    }

    #[test]
    fn rolling_rejects_bad_input() {
        let data = vec![1.0_f64, 2.0];
        assert!(matches!(
            rolling_sum(&data, 0),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            rolling_sum(&data, 3),
            Err(Error::InsufficientData { .. })
        ));
        let empty: Vec<f64> = vec![];
        assert!(matches!(rolling_sum(&empty, 1), Err(Error::EmptyInput)));
    }

    #[test]
    fn diff_reference() {
        let data = vec![1.0_f64, 4.0, 2.0];
        let out = diff(&data).unwrap();
        assert!(out[0].is_nan());
        assert!(approx_eq(out[1], 3.0, EPSILON));
        assert!(approx_eq(out[2], -2.0, EPSILON));
    }
}
