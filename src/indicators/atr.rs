//! Average True Range (ATR).
//!
//! Volatility collaborator for the band-building indicators. Computed with
//! Wilder's smoothing in O(n):
//!
//! ```text
//! TR[i]  = max(high[i] - low[i], |high[i] - close[i-1]|, |low[i] - close[i-1]|)
//! ATR[p] = SMA(TR[1..=p])
//! ATR[i] = (ATR[i-1]·(p-1) + TR[i]) / p        for i > p
//! ```
//!
//! True Range needs the previous close, so index 0 is undefined and the ATR
//! warm-up is `period` bars of `NaN`.

use crate::error::{Error, Result};
use crate::traits::{validate_aligned_inputs, validate_period, SeriesElement};

/// Returns the number of leading `NaN`s in the ATR output.
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one ATR value.
#[inline]
#[must_use]
pub const fn atr_min_len(period: usize) -> usize {
    period + 1
}

#[inline]
fn single_true_range<T: SeriesElement>(high: T, low: T, prev_close: T) -> T {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Computes the True Range series.
///
/// Index 0 is `NaN` (no previous close).
///
/// # Errors
///
/// Returns an error if any input is empty or the series lengths differ.
///
/// # Example
///
/// ```
/// use flux_ta::indicators::atr::true_range;
///
/// let high = vec![10.0_f64, 11.0, 12.0];
/// let low = vec![9.0_f64, 10.0, 11.0];
/// let close = vec![9.5_f64, 10.5, 11.5];
/// let tr = true_range(&high, &low, &close).unwrap();
/// assert!(tr[0].is_nan());
/// assert!((tr[1] - 1.5).abs() < 1e-10);
/// ```
pub fn true_range<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    validate_aligned_inputs(&[("high", high), ("low", low), ("close", close)])?;

    let n = high.len();
    let mut tr = vec![T::nan(); n];
    for i in 1..n {
        tr[i] = single_true_range(high[i], low[i], close[i - 1]);
    }
    Ok(tr)
}

/// Computes the Average True Range using Wilder's smoothing.
///
/// The first `period` outputs are `NaN`.
///
/// # Errors
///
/// Returns an error if any input is empty, the series lengths differ, the
/// period is zero, or the input is shorter than `period + 1`.
///
/// # Example
///
/// ```
/// use flux_ta::indicators::atr::atr;
///
/// let high = vec![48.70_f64, 48.72, 48.90, 48.87, 48.82, 49.05, 49.20];
/// let low = vec![47.79_f64, 48.14, 48.39, 48.37, 48.24, 48.64, 48.94];
/// let close = vec![48.16_f64, 48.61, 48.75, 48.63, 48.74, 49.03, 49.07];
/// let out = atr(&high, &low, &close, 5).unwrap();
/// assert!(out[4].is_nan());
/// assert!(out[5] > 0.0);
/// ```
pub fn atr<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); high.len()];
    atr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes the Average True Range into a pre-allocated output buffer.
///
/// # Errors
///
/// As [`atr`], plus `Error::BufferTooSmall` if `output` is shorter than the
/// input.
pub fn atr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_aligned_inputs(&[("high", high), ("low", low), ("close", close)])?;
    validate_period(period)?;

    let n = high.len();
    let min_len = atr_min_len(period);
    if n < min_len {
        return Err(Error::InsufficientData {
            indicator: "atr",
            required: min_len,
            actual: n,
        });
    }
    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "atr",
            required: n,
            actual: output.len(),
        });
    }

    for slot in output.iter_mut().take(period) {
        *slot = T::nan();
    }

    let period_t = T::from_usize(period)?;
    let period_minus_one_t = T::from_usize(period - 1)?;

    // Seed: SMA of the first `period` True Range values (TR starts at 1).
    let mut sum_tr = T::zero();
    for i in 1..=period {
        sum_tr = sum_tr + single_true_range(high[i], low[i], close[i - 1]);
    }
    let mut prev = sum_tr / period_t;
    output[period] = prev;

    for i in (period + 1)..n {
        let tr = single_true_range(high[i], low[i], close[i - 1]);
        prev = (prev * period_minus_one_t + tr) / period_t;
        output[i] = prev;
    }

    Ok(())
}
