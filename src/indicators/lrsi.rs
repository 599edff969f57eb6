//! Laguerre RSI (LRSI).
//!
//! An RSI variant built on a four-stage cascaded Laguerre low-pass filter,
//! which trades the usual averaging window for a recursive filter with very
//! little lag. The oscillator is formed from the pairwise differences of the
//! filter stages.
//!
//! # Algorithm
//!
//! All four stages seed at `close[0]`. For each subsequent bar, with
//! smoothing coefficient γ:
//!
//! ```text
//! L0[i] = (1-γ)·close[i] + γ·L0[i-1]
//! L1[i] = -γ·L0[i] + L0[i-1] + γ·L1[i-1]
//! L2[i] = -γ·L1[i] + L1[i-1] + γ·L2[i-1]
//! L3[i] = -γ·L2[i] + L2[i-1] + γ·L3[i-1]
//! ```
//!
//! Each adjacent stage pair `(L0,L1)`, `(L1,L2)`, `(L2,L3)` contributes its
//! non-negative difference to `CU` when the earlier stage is above the later
//! one, otherwise the absolute difference to `CD`:
//!
//! ```text
//! LRSI = 100 · CU / (CU + CD)
//! ```
//!
//! Where `CU + CD == 0` (all stages equal, e.g. flat price) the output is
//! `NaN` — undefined, not an error.
//!
//! # Parameters
//!
//! `length` (default 14) only gates the minimum input length; the recurrence
//! itself is governed entirely by `gamma` (default 0.5). Out-of-range values
//! clamp to the defaults.

use crate::error::{Error, Result};
use crate::finish::{apply, Category, IndicatorSeries, OutputConfig};
use crate::traits::{SeriesElement, ValidatedInput};

/// Parameters for [`lrsi`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LrsiParams<T> {
    /// Minimum-length gate. Default 14.
    pub length: usize,
    /// Laguerre filter coefficient, in the open interval (0, 1). Default 0.5.
    pub gamma: T,
}

impl<T: SeriesElement> Default for LrsiParams<T> {
    fn default() -> Self {
        Self {
            length: 14,
            gamma: T::from(0.5).unwrap_or_else(T::zero),
        }
    }
}

impl<T: SeriesElement> LrsiParams<T> {
    /// Returns a copy with out-of-range values clamped to the defaults.
    ///
    /// `length == 0` becomes 14; `gamma` outside `(0, 1)` (or `NaN`) becomes
    /// 0.5. Deliberately permissive: a bad tuning parameter degrades to the
    /// documented default instead of aborting a batch run.
    #[must_use]
    pub fn normalized(self) -> Self {
        let default = Self::default();
        let length = if self.length == 0 {
            default.length
        } else {
            self.length
        };
        let gamma_ok = self.gamma > T::zero() && self.gamma < T::one();
        let gamma = if gamma_ok { self.gamma } else { default.gamma };
        Self { length, gamma }
    }
}

/// Returns the number of guaranteed leading `NaN`s in the LRSI output.
///
/// The oscillator is defined from index 0 whenever the filter stages
/// diverge; flat stretches yield `NaN` anywhere in the series.
#[inline]
#[must_use]
pub const fn lrsi_lookback() -> usize {
    0
}

/// Returns the minimum input length for the given (normalized) length gate.
#[inline]
#[must_use]
pub const fn lrsi_min_len(length: usize) -> usize {
    length
}

/// Computes the Laguerre RSI over a close series.
///
/// Output is in `[0, 100]` wherever defined; positions where the cumulative
/// up and down measures are both zero are `NaN`.
///
/// # Errors
///
/// Returns `Error::EmptyInput` for an empty series, or
/// `Error::InsufficientData` when the series is shorter than the normalized
/// `length` — the caller's signal that this series produces no result.
///
/// # Example
///
/// ```
/// use flux_ta::indicators::lrsi::{lrsi, LrsiParams};
///
/// let close: Vec<f64> = (1..=20).map(f64::from).collect();
/// let params = LrsiParams { length: 5, ..Default::default() };
/// let out = lrsi(&close, &params).unwrap();
/// assert_eq!(out.len(), 20);
/// // Rising price keeps the oscillator pinned at 100 once stages diverge.
/// assert!((out[10] - 100.0).abs() < 1e-10);
/// ```
pub fn lrsi<T: SeriesElement>(close: &[T], params: &LrsiParams<T>) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); close.len()];
    lrsi_into(close, params, &mut output)?;
    Ok(output)
}

/// Computes the Laguerre RSI into a pre-allocated output buffer.
///
/// Only `output[..close.len()]` is written.
///
/// # Errors
///
/// As [`lrsi`], plus `Error::BufferTooSmall` if `output` is shorter than
/// the input.
pub fn lrsi_into<T: SeriesElement>(
    close: &[T],
    params: &LrsiParams<T>,
    output: &mut [T],
) -> Result<()> {
    let params = params.normalized();
    close.validate_not_empty()?;
    close.validate_min_length(lrsi_min_len(params.length), "lrsi")?;

    let n = close.len();
    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "lrsi",
            required: n,
            actual: output.len(),
        });
    }
    for slot in output.iter_mut().take(n) {
        *slot = T::nan();
    }

    let gamma = params.gamma;

    // Forward scan keeping only the previous bar's stage values.
    let mut l0_prev = close[0];
    let mut l1_prev = close[0];
    let mut l2_prev = close[0];
    let mut l3_prev = close[0];

    for i in 0..n {
        let (l0, l1, l2, l3) = if i == 0 {
            (l0_prev, l1_prev, l2_prev, l3_prev)
        } else {
            // Stage order matters: each stage uses the just-updated earlier
            // stage at i and every stage's value at i-1.
            let l0 = (T::one() - gamma) * close[i] + gamma * l0_prev;
            let l1 = -gamma * l0 + l0_prev + gamma * l1_prev;
            let l2 = -gamma * l1 + l1_prev + gamma * l2_prev;
            let l3 = -gamma * l2 + l2_prev + gamma * l3_prev;
            (l0, l1, l2, l3)
        };

        let mut cu = T::zero();
        let mut cd = T::zero();
        for &(a, b) in &[(l0, l1), (l1, l2), (l2, l3)] {
            if a >= b {
                cu = cu + (a - b);
            } else {
                cd = cd + (b - a);
            }
        }

        let denom = cu + cd;
        // Zero denominator stays NaN: all stages coincide at this bar.
        if denom > T::zero() {
            output[i] = T::hundred() * cu / denom;
        }

        l0_prev = l0;
        l1_prev = l1;
        l2_prev = l2;
        l3_prev = l3;
    }

    Ok(())
}

/// Computes the Laguerre RSI and finishes it into a tagged series.
///
/// Applies the offset/fill pipeline from `config` and names the result
/// `LRSI_{length}` under [`Category::Momentum`].
///
/// # Errors
///
/// As [`lrsi`].
pub fn lrsi_series<T: SeriesElement>(
    close: &[T],
    params: &LrsiParams<T>,
    config: &OutputConfig<T>,
) -> Result<IndicatorSeries<T>> {
    let params = params.normalized();
    let mut values = lrsi(close, &params)?;
    apply(&mut values, config);
    Ok(IndicatorSeries {
        name: format!("LRSI_{}", params.length),
        category: Category::Momentum,
        values,
    })
}
