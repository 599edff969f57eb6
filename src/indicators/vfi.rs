//! Volume Flow Indicator (VFI).
//!
//! A volume-weighted money-flow oscillator. Extreme volume spikes are capped
//! against a lagged rolling volume average before they can dominate the
//! accumulation:
//!
//! ```text
//! vave[i] = mean(volume[i-length..i-1])        (lagged one bar)
//! vc[i]   = min(volume[i], vave[i]·vcoef)      (no cap while vave is NaN)
//! mf[i]   = close[i] - close[i-1]
//! raw[i]  = sum(vc·mf, length) / mean(vave, length)
//! VFI     = MA(mamode, raw, 3)
//! ```
//!
//! The lag on `vave` keeps the current bar out of its own volume baseline
//! (no look-ahead); the final smoothing is always 3 bars regardless of
//! `length`. The chained rolling windows give a long warm-up: the raw ratio
//! is undefined until `2·length - 1` and the smoothing adds two more bars.
//!
//! `coef` is accepted and defaulted for interface compatibility but does not
//! participate in the formula — a documented quirk of the reference
//! definition, preserved rather than repaired.

use crate::error::{Error, Result};
use crate::finish::{apply, Category, IndicatorSeries, OutputConfig};
use crate::kernels::{diff, rolling_mean, rolling_sum};
use crate::ma::{ma_into, MaMode};
use crate::traits::{validate_aligned_inputs, SeriesElement, ValidatedInput};

/// Parameters for [`vfi`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VfiParams<T> {
    /// Accumulation window. Default 130.
    pub length: usize,
    /// Accepted but inert; kept for interface compatibility. Default 0.2.
    pub coef: T,
    /// Volume cutoff multiplier. Default 2.5.
    pub vcoef: T,
    /// Smoothing family for the final 3-bar pass. Default [`MaMode::Ema`].
    pub mamode: MaMode,
}

impl<T: SeriesElement> Default for VfiParams<T> {
    fn default() -> Self {
        Self {
            length: 130,
            coef: T::from(0.2).unwrap_or_else(T::zero),
            vcoef: T::from(2.5).unwrap_or_else(T::zero),
            mamode: MaMode::Ema,
        }
    }
}

impl<T: SeriesElement> VfiParams<T> {
    /// Returns a copy with out-of-range values clamped to the defaults:
    /// `length == 0` becomes 130, non-positive (or `NaN`) coefficients
    /// become 0.2 / 2.5.
    #[must_use]
    pub fn normalized(self) -> Self {
        let default = Self::default();
        Self {
            length: if self.length == 0 {
                default.length
            } else {
                self.length
            },
            coef: if self.coef > T::zero() {
                self.coef
            } else {
                default.coef
            },
            vcoef: if self.vcoef > T::zero() {
                self.vcoef
            } else {
                default.vcoef
            },
            mamode: self.mamode,
        }
    }
}

/// Returns the number of leading `NaN`s in the VFI output.
///
/// The raw ratio needs `2·length - 1` bars (lagged volume average feeding a
/// second rolling window) and the fixed 3-bar smoothing adds two more.
#[inline]
#[must_use]
pub const fn vfi_lookback(length: usize) -> usize {
    2 * length + 1
}

/// Returns the minimum input length that produces at least one defined value.
#[inline]
#[must_use]
pub const fn vfi_min_len(length: usize) -> usize {
    vfi_lookback(length) + 1
}

/// The clipped volume series: `min(volume, vave·vcoef)`, uncapped while the
/// lagged volume average is still undefined.
///
/// Exposed for testing the cutoff property; `vave` must be the lagged
/// rolling mean used by [`vfi`].
fn clip_volume<T: SeriesElement>(volume: &[T], vave: &[T], vcoef: T) -> Vec<T> {
    volume
        .iter()
        .zip(vave.iter())
        .map(|(&v, &avg)| {
            let vmax = avg * vcoef;
            // An undefined bound does not clip.
            if vmax.is_nan() || v <= vmax {
                v
            } else {
                vmax
            }
        })
        .collect()
}

/// Lagged rolling mean of volume: the baseline excludes the current bar.
fn lagged_volume_average<T: SeriesElement>(volume: &[T], length: usize) -> Result<Vec<T>> {
    let mean = rolling_mean(volume, length)?;
    let mut vave = vec![T::nan(); volume.len()];
    vave[1..].copy_from_slice(&mean[..volume.len() - 1]);
    Ok(vave)
}

/// Computes the Volume Flow Indicator.
///
/// # Errors
///
/// Returns an error if the inputs are empty or misaligned, or the series is
/// shorter than the normalized `length` — the "no result" signal.
///
/// # Example
///
/// ```
/// use flux_ta::indicators::vfi::{vfi, VfiParams};
///
/// let n = 30;
/// let close: Vec<f64> = (0..n).map(|i| 100.0 + f64::from(i)).collect();
/// let volume = vec![1000.0_f64; n as usize];
/// let params = VfiParams { length: 5, ..Default::default() };
/// let out = vfi(&close, &volume, &params).unwrap();
/// assert_eq!(out.len(), 30);
/// assert!(out[10].is_nan()); // chained warm-up
/// assert!(!out[11].is_nan());
/// ```
pub fn vfi<T: SeriesElement>(close: &[T], volume: &[T], params: &VfiParams<T>) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); close.len()];
    vfi_into(close, volume, params, &mut output)?;
    Ok(output)
}

/// Computes the Volume Flow Indicator into a pre-allocated output buffer.
///
/// Only `output[..close.len()]` is written.
///
/// # Errors
///
/// As [`vfi`], plus `Error::BufferTooSmall` if `output` is shorter than the
/// input.
pub fn vfi_into<T: SeriesElement>(
    close: &[T],
    volume: &[T],
    params: &VfiParams<T>,
    output: &mut [T],
) -> Result<()> {
    let params = params.normalized();
    validate_aligned_inputs(&[("close", close), ("volume", volume)])?;
    close.validate_min_length(params.length, "vfi")?;

    let n = close.len();
    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "vfi",
            required: n,
            actual: output.len(),
        });
    }

    let vave = lagged_volume_average(volume, params.length)?;
    let vc = clip_volume(volume, &vave, params.vcoef);
    let mf = diff(close)?;

    // Signed, cutoff-weighted money flow per bar.
    let mut vcp = vec![T::nan(); n];
    for i in 0..n {
        vcp[i] = vc[i] * mf[i];
    }

    let numerator = rolling_sum(&vcp, params.length)?;
    let denominator = rolling_mean(&vave, params.length)?;

    let mut raw = vec![T::nan(); n];
    for i in 0..n {
        raw[i] = numerator[i] / denominator[i];
    }

    // Final smoothing is a fixed 3 bars regardless of the primary length.
    ma_into(params.mamode, &raw, 3, &mut output[..n])
}

/// Computes VFI and finishes it into a tagged series.
///
/// Named `VFI_{length}` under [`Category::Volume`].
///
/// # Errors
///
/// As [`vfi`].
pub fn vfi_series<T: SeriesElement>(
    close: &[T],
    volume: &[T],
    params: &VfiParams<T>,
    config: &OutputConfig<T>,
) -> Result<IndicatorSeries<T>> {
    let params = params.normalized();
    let mut values = vfi(close, volume, &params)?;
    apply(&mut values, config);
    Ok(IndicatorSeries {
        name: format!("VFI_{}", params.length),
        category: Category::Volume,
        values,
    })
}
