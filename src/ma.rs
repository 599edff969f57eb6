//! Moving-average collaborator.
//!
//! The indicator engines never hard-code a smoothing family; they go through
//! [`ma`], which dispatches on a [`MaMode`]. Three families are recognized:
//!
//! - [`MaMode::Sma`] — simple (arithmetic) moving average
//! - [`MaMode::Ema`] — exponential moving average, α = 2 / (period + 1)
//! - [`MaMode::Rma`] — Wilder's moving average, α = 1 / period
//!
//! Mode strings parse permissively: an unrecognized or empty string falls
//! back to `Ema`, matching the permissive parameter policy used across the
//! crate.
//!
//! # Alignment
//!
//! All kernels return a series of the same length as the input with
//! `period - 1` leading `NaN`s. The EMA families seed with the SMA of the
//! first `period` values and then apply the recursive formula.
//!
//! # NaN-prefix handling
//!
//! [`ma`] tolerates a leading `NaN` run in its input: the run is preserved
//! in the output and the average is computed over the defined suffix. This
//! is what lets an engine smooth a series that already carries a warm-up
//! region (VFI smooths its raw oscillator this way). If the defined suffix
//! is shorter than the period, the result is all-`NaN` rather than an error
//! — the caller asked for a smoothing the data cannot support yet, which is
//! a warm-up condition, not a structural fault.

use crate::error::{Error, Result};
use crate::traits::{validate_indicator_input, SeriesElement};
use crate::utils::count_nan_prefix;

/// Moving-average family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaMode {
    /// Simple moving average.
    Sma,
    /// Exponential moving average (α = 2 / (period + 1)).
    #[default]
    Ema,
    /// Wilder's moving average (α = 1 / period), also known as RMA.
    Rma,
}

impl MaMode {
    /// Parses a mode string, case-insensitively.
    ///
    /// Unrecognized (or empty) strings fall back to [`MaMode::Ema`].
    ///
    /// # Example
    ///
    /// ```
    /// use flux_ta::ma::MaMode;
    ///
    /// assert_eq!(MaMode::parse("sma"), MaMode::Sma);
    /// assert_eq!(MaMode::parse("RMA"), MaMode::Rma);
    /// assert_eq!(MaMode::parse("wilder"), MaMode::Rma);
    /// assert_eq!(MaMode::parse("no-such-mode"), MaMode::Ema);
    /// ```
    #[must_use]
    pub fn parse(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "sma" => Self::Sma,
            "rma" | "wilder" => Self::Rma,
            _ => Self::Ema,
        }
    }

    /// Canonical lowercase name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rma => "rma",
        }
    }

    /// Uppercase initial used in derived indicator names (e.g. `PMAX_E_10_3.0`).
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Sma => 'S',
            Self::Ema => 'E',
            Self::Rma => 'R',
        }
    }
}

impl std::fmt::Display for MaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the number of leading `NaN`s produced by any MA kernel.
#[inline]
#[must_use]
pub const fn ma_lookback(period: usize) -> usize {
    period - 1
}

/// Computes the simple moving average of `data` over `period`.
///
/// The first `period - 1` outputs are `NaN`.
///
/// # Errors
///
/// Returns an error if the period is zero, the input is empty, or the input
/// is shorter than the period.
///
/// # Example
///
/// ```
/// use flux_ta::ma::sma;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let out = sma(&data, 3).unwrap();
/// assert!(out[1].is_nan());
/// assert!((out[2] - 2.0).abs() < 1e-10);
/// ```
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_indicator_input(data, period, "sma")?;
    crate::kernels::rolling_mean(data, period)
}

/// Computes the exponential moving average of `data` over `period`.
///
/// Seeded with the SMA of the first `period` values; `period - 1` leading
/// `NaN`s.
///
/// # Errors
///
/// Returns an error if the period is zero, the input is empty, or the input
/// is shorter than the period.
pub fn ema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_indicator_input(data, period, "ema")?;
    let period_t = T::from_usize(period)?;
    let alpha = (T::one() + T::one()) / (period_t + T::one());
    let mut output = vec![T::nan(); data.len()];
    ema_core(data, period, alpha, &mut output);
    Ok(output)
}

/// Computes Wilder's moving average (RMA) of `data` over `period`.
///
/// Identical to [`ema`] but with α = 1 / period, the smoothing used by
/// Wilder-family indicators such as ATR.
///
/// # Errors
///
/// Returns an error if the period is zero, the input is empty, or the input
/// is shorter than the period.
pub fn ema_wilder<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_indicator_input(data, period, "rma")?;
    let alpha = T::one() / T::from_usize(period)?;
    let mut output = vec![T::nan(); data.len()];
    ema_core(data, period, alpha, &mut output);
    Ok(output)
}

/// Shared recursive EMA scan: SMA seed at `period - 1`, then
/// `out[i] = α·data[i] + (1-α)·out[i-1]`. Fills `output[..data.len()]`;
/// callers guarantee `period >= 1`, `data.len() >= period` and a large
/// enough buffer.
fn ema_core<T: SeriesElement>(data: &[T], period: usize, alpha: T, output: &mut [T]) {
    let n = data.len();
    let one_minus_alpha = T::one() - alpha;

    for slot in output.iter_mut().take(period - 1) {
        *slot = T::nan();
    }

    // SMA seed; the division below is exact NumCast of a small integer.
    let mut sum = T::zero();
    for &value in data.iter().take(period) {
        sum = sum + value;
    }
    let mut prev = sum / <T as num_traits::NumCast>::from(period).unwrap();
    output[period - 1] = prev;

    for i in period..n {
        prev = alpha * data[i] + one_minus_alpha * prev;
        output[i] = prev;
    }
}

/// Computes a moving average of `data` over `period` in the given mode,
/// tolerating a leading `NaN` run.
///
/// The leading `NaN` run of `data` is preserved; the kernel runs over the
/// defined suffix, so the total warm-up is `prefix + period - 1`. If the
/// defined suffix is shorter than the period the result is entirely `NaN`.
///
/// # Errors
///
/// Returns an error if the period is zero or the input is empty.
///
/// # Example
///
/// ```
/// use flux_ta::ma::{ma, MaMode};
///
/// let data = vec![f64::NAN, f64::NAN, 2.0, 4.0, 6.0];
/// let out = ma(MaMode::Sma, &data, 2).unwrap();
/// assert!(out[2].is_nan()); // prefix preserved + kernel warm-up
/// assert!((out[3] - 3.0).abs() < 1e-10);
/// assert!((out[4] - 5.0).abs() < 1e-10);
/// ```
pub fn ma<T: SeriesElement>(mode: MaMode, data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ma_into(mode, data, period, &mut output)?;
    Ok(output)
}

/// Computes a moving average into a pre-allocated output buffer.
///
/// Only `output[..data.len()]` is written.
///
/// # Errors
///
/// As [`ma`], plus `Error::BufferTooSmall` if `output` is shorter than the
/// input.
pub fn ma_into<T: SeriesElement>(
    mode: MaMode,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    use crate::traits::ValidatedInput;

    crate::traits::validate_period(period)?;
    data.validate_not_empty()?;
    if output.len() < data.len() {
        return Err(Error::BufferTooSmall {
            indicator: "ma",
            required: data.len(),
            actual: output.len(),
        });
    }

    let skip = count_nan_prefix(data);
    let suffix = &data[skip..];
    let (head, tail) = output[..data.len()].split_at_mut(skip);
    for slot in head.iter_mut() {
        *slot = T::nan();
    }
    if suffix.len() < period {
        for slot in tail.iter_mut() {
            *slot = T::nan();
        }
        return Ok(());
    }

    match mode {
        MaMode::Sma => {
            crate::kernels::rolling_sum_into(suffix, period, tail)?;
            let period_t = T::from_usize(period)?;
            for value in tail.iter_mut() {
                *value = *value / period_t;
            }
        }
        MaMode::Ema => {
            let period_t = T::from_usize(period)?;
            let alpha = (T::one() + T::one()) / (period_t + T::one());
            ema_core(suffix, period, alpha, tail);
        }
        MaMode::Rma => {
            let alpha = T::one() / T::from_usize(period)?;
            ema_core(suffix, period, alpha, tail);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn mode_parse_fallback() {
        assert_eq!(MaMode::parse("ema"), MaMode::Ema);
        assert_eq!(MaMode::parse("SMA"), MaMode::Sma);
        assert_eq!(MaMode::parse(""), MaMode::Ema);
        assert_eq!(MaMode::parse("hull"), MaMode::Ema);
        assert_eq!(MaMode::default(), MaMode::Ema);
    }

    #[test]
    fn mode_initials() {
        assert_eq!(MaMode::Sma.initial(), 'S');
        assert_eq!(MaMode::Ema.initial(), 'E');
        assert_eq!(MaMode::Rma.initial(), 'R');
        assert_eq!(MaMode::Rma.to_string(), "rma");
    }

    #[test]
    fn sma_reference() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let out = sma(&data, 3).unwrap();
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(approx_eq(out[2], 2.0, EPSILON));
        assert!(approx_eq(out[4], 4.0, EPSILON));
    }

    #[test]
    fn ema_seed_is_sma() {
        let data = vec![2.0_f64, 4.0, 6.0, 8.0];
        let out = ema(&data, 3).unwrap();
        assert!(out[1].is_nan());
        assert!(approx_eq(out[2], 4.0, EPSILON)); // SMA of first 3
        // alpha = 0.5: 0.5*8 + 0.5*4 = 6
        assert!(approx_eq(out[3], 6.0, EPSILON));
    }

    #[test]
    fn ema_constant_input_is_constant() {
        let data = vec![7.0_f64; 20];
        let out = ema(&data, 5).unwrap();
        for &v in &out[4..] {
            assert!(approx_eq(v, 7.0, EPSILON));
        }
    }

    #[test]
    fn wilder_alpha_differs_from_ema() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 10.0];
        let e = ema(&data, 4).unwrap();
        let w = ema_wilder(&data, 4).unwrap();
        // Same seed, Wilder reacts more slowly to the spike.
        assert!(approx_eq(e[3], w[3], EPSILON));
        assert!(w[4] < e[4]);
    }

    #[test]
    fn dispatch_preserves_nan_prefix() {
        let data = vec![f64::NAN, f64::NAN, f64::NAN, 2.0, 4.0, 6.0, 8.0];
        let out = ma(MaMode::Sma, &data, 2).unwrap();
        assert_eq!(out.len(), data.len());
        assert_eq!(count_nan_prefix(&out), 4);
        assert!(approx_eq(out[4], 3.0, EPSILON));
        assert!(approx_eq(out[6], 7.0, EPSILON));
    }

    #[test]
    fn dispatch_degenerates_to_all_nan() {
        let data = vec![f64::NAN, f64::NAN, 1.0, 2.0];
        let out = ma(MaMode::Ema, &data, 3).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn into_variant_matches_allocating_dispatch() {
        let data = vec![f64::NAN, f64::NAN, 2.0, 4.0, 6.0, 8.0];
        for mode in [MaMode::Sma, MaMode::Ema, MaMode::Rma] {
            let expected = ma(mode, &data, 2).unwrap();
            let mut buf = vec![0.0_f64; data.len()];
            ma_into(mode, &data, 2, &mut buf).unwrap();
            for (a, b) in buf.iter().zip(expected.iter()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }

        let mut small = vec![0.0_f64; 2];
        assert!(matches!(
            ma_into(MaMode::Ema, &data, 2, &mut small),
            Err(Error::BufferTooSmall { indicator: "ma", .. })
        ));
    }

    #[test]
    fn dispatch_rejects_structural_faults() {
        let empty: Vec<f64> = vec![];
        assert!(ma(MaMode::Ema, &empty, 3).is_err());
        assert!(ma(MaMode::Ema, &[1.0_f64], 0).is_err());
    }
}
