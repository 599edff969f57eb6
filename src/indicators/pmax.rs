//! PMAX (Price Max).
//!
//! A trend-following overlay that combines a moving average with ATR to
//! build adaptive support/resistance bands, then lets a two-state trend
//! machine pick which band to emit:
//!
//! ```text
//! up[i]   = MA[i] - multiplier·ATR[i]
//! down[i] = MA[i] + multiplier·ATR[i]
//! ```
//!
//! While the prior close confirms an uptrend (`close[i-1] > up[i-1]`) the
//! upper band may only rise; symmetrically the lower band may only fall.
//! The trend flips on the *previous* bar's bands — `close[i] > down[i-1]`
//! turns up, `close[i] < up[i-1]` turns down, anything else holds the prior
//! state. Both the ratchet and the transition deliberately reference lagged
//! bands: that lag is the indicator's hysteresis, and moving either
//! comparison to the current bar changes signal timing.
//!
//! During the MA/ATR warm-up the bands are `NaN`; `NaN` comparisons are
//! false, so nothing ratchets, the trend holds its initial `+1`, and the
//! emitted level is `NaN`. Bar 0 emits 0 by convention.

use crate::error::{Error, Result};
use crate::finish::{apply, Category, IndicatorSeries, OutputConfig};
use crate::indicators::atr::{atr, atr_min_len};
use crate::ma::{ma, MaMode};
use crate::traits::{validate_aligned_inputs, SeriesElement, ValidatedInput};

/// Parameters for [`pmax`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmaxParams<T> {
    /// Shared MA and ATR period. Default 10.
    pub length: usize,
    /// ATR band multiplier. Default 3.0.
    pub multiplier: T,
    /// Moving-average family for the center line. Default [`MaMode::Ema`].
    pub mamode: MaMode,
}

impl<T: SeriesElement> Default for PmaxParams<T> {
    fn default() -> Self {
        Self {
            length: 10,
            multiplier: T::from(3.0).unwrap_or_else(T::zero),
            mamode: MaMode::Ema,
        }
    }
}

impl<T: SeriesElement> PmaxParams<T> {
    /// Returns a copy with out-of-range values clamped to the defaults:
    /// `length == 0` becomes 10, non-positive (or `NaN`) multipliers become
    /// 3.0.
    #[must_use]
    pub fn normalized(self) -> Self {
        let default = Self::default();
        let length = if self.length == 0 {
            default.length
        } else {
            self.length
        };
        let multiplier = if self.multiplier > T::zero() {
            self.multiplier
        } else {
            default.multiplier
        };
        Self {
            length,
            multiplier,
            mamode: self.mamode,
        }
    }
}

/// Both output channels of the PMAX computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PmaxOutput<T> {
    /// The emitted band level; `NaN` through the MA/ATR warm-up, 0 at bar 0.
    pub pmax: Vec<T>,
    /// Trend state per bar: `+1` up, `-1` down. `trend[0] = +1`.
    pub trend: Vec<i8>,
}

/// Returns the number of leading undefined bars in the PMAX level.
///
/// Bar 0 emits the 0 placeholder; bars 1 through `period` are `NaN` while
/// ATR warms up.
#[inline]
#[must_use]
pub const fn pmax_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one defined band.
#[inline]
#[must_use]
pub const fn pmax_min_len(period: usize) -> usize {
    period + 1
}

/// Band construction and trend scan, writing the emitted level into
/// `level[..n]` and returning the trend sequence. Inputs are validated and
/// `params` normalized by the callers.
fn pmax_core<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    params: &PmaxParams<T>,
    level: &mut [T],
) -> Result<Vec<i8>> {
    let n = close.len();

    // With exactly `length` bars ATR has no defined value yet; the bands
    // stay NaN for the whole series and only the bar-0 placeholder is
    // emitted.
    let atr_value = if n < atr_min_len(params.length) {
        vec![T::nan(); n]
    } else {
        atr(high, low, close, params.length)?
    };
    let ma_value = ma(params.mamode, close, params.length)?;

    let mut up = vec![T::nan(); n];
    let mut down = vec![T::nan(); n];
    for i in 0..n {
        let spread = params.multiplier * atr_value[i];
        up[i] = ma_value[i] - spread;
        down[i] = ma_value[i] + spread;
    }

    let mut trend = vec![1_i8; n];
    level[0] = T::zero();

    for i in 1..n {
        // Ratchet against the previous bar's (already ratcheted) bands.
        // NaN guards fail during warm-up, leaving the raw bands in place.
        if close[i - 1] > up[i - 1] && up[i - 1] > up[i] {
            up[i] = up[i - 1];
        }
        if close[i - 1] < down[i - 1] && down[i - 1] < down[i] {
            down[i] = down[i - 1];
        }

        // Trend transition also reads the lagged bands, not the ones just
        // ratcheted above.
        trend[i] = if close[i] > down[i - 1] {
            1
        } else if close[i] < up[i - 1] {
            -1
        } else {
            trend[i - 1]
        };

        level[i] = if trend[i] == 1 { up[i] } else { down[i] };
    }

    Ok(trend)
}

/// Computes PMAX, returning both the level and the trend side-channel.
///
/// The validation gate is `length` bars; with exactly `length` bars the ATR
/// collaborator has no defined value yet, so the result is the bar-0
/// placeholder followed by `NaN` with the trend held at `+1`.
///
/// # Errors
///
/// Returns an error if the inputs are empty or misaligned, or the series is
/// shorter than the normalized `length`.
pub fn pmax_with_trend<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    params: &PmaxParams<T>,
) -> Result<PmaxOutput<T>> {
    let params = params.normalized();
    validate_aligned_inputs(&[("high", high), ("low", low), ("close", close)])?;
    close.validate_min_length(params.length, "pmax")?;

    let mut level = vec![T::nan(); close.len()];
    let trend = pmax_core(high, low, close, &params, &mut level)?;
    Ok(PmaxOutput { pmax: level, trend })
}

/// Computes the PMAX level into a pre-allocated output buffer.
///
/// Only `output[..close.len()]` is written.
///
/// # Errors
///
/// As [`pmax_with_trend`], plus `Error::BufferTooSmall` if `output` is
/// shorter than the input.
pub fn pmax_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    params: &PmaxParams<T>,
    output: &mut [T],
) -> Result<()> {
    let params = params.normalized();
    validate_aligned_inputs(&[("high", high), ("low", low), ("close", close)])?;
    close.validate_min_length(params.length, "pmax")?;

    let n = close.len();
    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "pmax",
            required: n,
            actual: output.len(),
        });
    }
    pmax_core(high, low, close, &params, &mut output[..n])?;
    Ok(())
}

/// Computes the PMAX level series.
///
/// # Errors
///
/// As [`pmax_with_trend`].
///
/// # Example
///
/// ```
/// use flux_ta::indicators::pmax::{pmax, PmaxParams};
///
/// let close: Vec<f64> = (1..=30).map(f64::from).collect();
/// let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
/// let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
/// let params = PmaxParams { length: 5, ..Default::default() };
/// let out = pmax(&high, &low, &close, &params).unwrap();
/// assert_eq!(out.len(), 30);
/// assert_eq!(out[0], 0.0);
/// assert!(out[3].is_nan()); // ATR warm-up
/// ```
pub fn pmax<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    params: &PmaxParams<T>,
) -> Result<Vec<T>> {
    Ok(pmax_with_trend(high, low, close, params)?.pmax)
}

/// Computes PMAX and finishes it into a tagged series.
///
/// Named `PMAX_{mode initial}_{length}_{multiplier}` (e.g. `PMAX_E_10_3.0`)
/// under [`Category::Trend`].
///
/// # Errors
///
/// As [`pmax_with_trend`].
pub fn pmax_series<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    params: &PmaxParams<T>,
    config: &OutputConfig<T>,
) -> Result<IndicatorSeries<T>> {
    let params = params.normalized();
    let mut values = pmax(high, low, close, &params)?;
    apply(&mut values, config);
    Ok(IndicatorSeries {
        name: format!(
            "PMAX_{}_{}_{:?}",
            params.mamode.initial(),
            params.length,
            params.multiplier
        ),
        category: Category::Trend,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::approx_eq;

    fn rising() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (1..=40).map(f64::from).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        (high, low, close)
    }

    fn falling() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (1..=40).rev().map(f64::from).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        (high, low, close)
    }

    fn params(length: usize) -> PmaxParams<f64> {
        PmaxParams {
            length,
            ..Default::default()
        }
    }

    #[test]
    fn normalization_clamps_to_defaults() {
        let p = PmaxParams {
            length: 0,
            multiplier: -1.0,
            mamode: MaMode::Sma,
        }
        .normalized();
        assert_eq!(p.length, 10);
        assert!(approx_eq(p.multiplier, 3.0, crate::utils::EPSILON));
        assert_eq!(p.mamode, MaMode::Sma);

        let p = PmaxParams {
            length: 7,
            multiplier: f64::NAN,
            mamode: MaMode::Ema,
        }
        .normalized();
        assert!(approx_eq(p.multiplier, 3.0, crate::utils::EPSILON));
    }

    #[test]
    fn bar_zero_is_placeholder_and_warmup_is_nan() {
        let (high, low, close) = rising();
        let out = pmax(&high, &low, &close, &params(10)).unwrap();
        assert_eq!(out[0], 0.0);
        for &v in &out[1..10] {
            assert!(v.is_nan());
        }
        assert!(!out[10].is_nan());
    }

    #[test]
    fn rising_close_holds_uptrend() {
        let (high, low, close) = rising();
        let out = pmax_with_trend(&high, &low, &close, &params(10)).unwrap();
        assert!(out.trend.iter().all(|&t| t == 1));
    }

    #[test]
    fn falling_close_flips_to_downtrend_and_stays() {
        let (high, low, close) = falling();
        let out = pmax_with_trend(&high, &low, &close, &params(10)).unwrap();
        // Once the bands are defined the falling close sits below the upper
        // band and the trend flips down for good.
        let first_down = out.trend.iter().position(|&t| t == -1).unwrap();
        assert!(out.trend[first_down..].iter().all(|&t| t == -1));
    }

    #[test]
    fn emitted_level_matches_selected_band() {
        let (high, low, close) = rising();
        let p = params(10).normalized();
        let out = pmax_with_trend(&high, &low, &close, &p).unwrap();

        // Recompute unratcheted bands; wherever the level is defined it must
        // be >= the raw band in an uptrend (ratchet only tightens upward).
        let atr_value = atr(&high, &low, &close, p.length).unwrap();
        let ma_value = ma(p.mamode, &close, p.length).unwrap();
        for i in 11..close.len() {
            if out.trend[i] == 1 && !out.pmax[i].is_nan() {
                let raw_up = ma_value[i] - p.multiplier * atr_value[i];
                assert!(out.pmax[i] >= raw_up - 1e-9);
            }
        }
    }

    #[test]
    fn upper_band_ratchets_monotonically_in_uptrend() {
        let (high, low, close) = rising();
        let out = pmax_with_trend(&high, &low, &close, &params(5)).unwrap();
        // After warm-up the rising close keeps confirming the uptrend, so
        // the emitted upper band never falls.
        let start = 7;
        for i in start + 1..close.len() {
            assert!(out.pmax[i] >= out.pmax[i - 1] - 1e-9);
        }
    }

    #[test]
    fn trend_decision_uses_previous_bands() {
        // A flat stretch inside the band keeps the previous trend even
        // though neither transition guard fires.
        let close = vec![
            10.0_f64, 10.2, 10.1, 10.3, 10.2, 10.4, 10.3, 10.2, 10.3, 10.2, 10.3, 10.25, 10.28,
            10.26, 10.27, 10.25,
        ];
        let high: Vec<f64> = close.iter().map(|c| c + 0.3).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.3).collect();
        let out = pmax_with_trend(&high, &low, &close, &params(5)).unwrap();
        // Close never escapes the wide bands, so the initial uptrend holds.
        assert!(out.trend.iter().all(|&t| t == 1));
    }

    #[test]
    fn too_short_input_yields_no_result() {
        let (high, low, close) = rising();
        let short = 5;
        let err = pmax(
            &high[..short],
            &low[..short],
            &close[..short],
            &params(10),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
    }

    #[test]
    fn exactly_length_bars_emits_placeholder_and_nan_bands() {
        // The gate is `length` bars; at that exact count ATR is still
        // undefined, so the series is bar-0 placeholder plus NaN with the
        // trend held up, not an error.
        let (high, low, close) = rising();
        let out = pmax_with_trend(&high[..10], &low[..10], &close[..10], &params(10)).unwrap();
        assert_eq!(out.pmax.len(), 10);
        assert_eq!(out.pmax[0], 0.0);
        assert!(out.pmax[1..].iter().all(|v| v.is_nan()));
        assert!(out.trend.iter().all(|&t| t == 1));
    }

    #[test]
    fn into_variant_matches_allocating_call() {
        let (high, low, close) = rising();
        let expected = pmax(&high, &low, &close, &params(10)).unwrap();
        let mut buf = vec![0.0_f64; close.len()];
        pmax_into(&high, &low, &close, &params(10), &mut buf).unwrap();
        for (a, b) in buf.iter().zip(expected.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }

        let mut small = vec![0.0_f64; 3];
        assert!(matches!(
            pmax_into(&high, &low, &close, &params(10), &mut small),
            Err(Error::BufferTooSmall { indicator: "pmax", .. })
        ));
    }

    #[test]
    fn series_name_encodes_parameters() {
        let (high, low, close) = rising();
        let series = pmax_series(
            &high,
            &low,
            &close,
            &params(10),
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(series.name, "PMAX_E_10_3.0");
        assert_eq!(series.category, Category::Trend);

        let series = pmax_series(
            &high,
            &low,
            &close,
            &PmaxParams {
                length: 7,
                multiplier: 2.5,
                mamode: MaMode::Sma,
            },
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(series.name, "PMAX_S_7_2.5");
    }
}
