//! Core traits for flux-ta numeric operations.
//!
//! The primary trait is [`SeriesElement`], a blanket trait over
//! `num_traits::Float` that lets every indicator work with both `f32` and
//! `f64` slices. The module also carries the input-validation boundary used
//! by all indicators: a series either passes validation unchanged or the
//! call returns a typed error before any computation starts.
//!
//! # Example
//!
//! ```
//! use flux_ta::traits::{SeriesElement, validate_indicator_input};
//!
//! fn mean<T: SeriesElement>(data: &[T], period: usize) -> flux_ta::Result<T> {
//!     validate_indicator_input(data, period, "mean")?;
//!     let period_t = T::from_usize(period)?;
//!     let sum = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / period_t)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! assert!((mean(&data, 3).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// Extends `num_traits::Float` with conversions used throughout the crate.
/// Implemented for `f32` and `f64` via a blanket impl.
pub trait SeriesElement:
    Float + NumCast + Copy + Default + std::fmt::Debug + Send + Sync + 'static
{
    /// Creates a series element from a `usize` value.
    ///
    /// Commonly used to convert period parameters to the element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 100 as this type.
    ///
    /// Used for the oscillator scaling in LRSI.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // Safe unwrap: 100 is always representable in Float types
        <Self as NumCast>::from(100).unwrap()
    }
}

impl<T: Float + NumCast + Copy + Default + std::fmt::Debug + Send + Sync + 'static> SeriesElement
    for T
{
}

/// Trait for validating input data before indicator computation.
pub trait ValidatedInput<T: SeriesElement> {
    /// Validates that the input holds at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` tagged with `indicator` otherwise.
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()>;

    /// Validates that the input is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` for an empty slice.
    fn validate_not_empty(&self) -> Result<()>;
}

impl<T: SeriesElement> ValidatedInput<T> for [T] {
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()> {
        if self.len() < min_length {
            return Err(Error::InsufficientData {
                indicator,
                required: min_length,
                actual: self.len(),
            });
        }
        Ok(())
    }

    fn validate_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(())
    }
}

/// Validates a period parameter.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(Error::InvalidPeriod {
            period: 0,
            reason: "period must be at least 1",
        });
    }
    Ok(())
}

/// Validates a single input series against a period requirement.
///
/// Checks, in order: the period is nonzero, the series is not empty, and the
/// series holds at least `period` elements.
///
/// # Errors
///
/// Returns the first failing check's error.
pub fn validate_indicator_input<T: SeriesElement>(
    data: &[T],
    period: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period(period)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, indicator)?;
    Ok(())
}

/// Validates that a set of aligned input series all share one length.
///
/// `series` pairs a label with each slice; the first slice is the reference.
///
/// # Errors
///
/// Returns `Error::EmptyInput` if the reference is empty, or
/// `Error::LengthMismatch` naming the first series that disagrees.
pub fn validate_aligned_inputs<T: SeriesElement>(series: &[(&'static str, &[T])]) -> Result<()> {
    let Some(&(first_label, first)) = series.first() else {
        return Err(Error::EmptyInput);
    };
    first.validate_not_empty()?;

    let n = first.len();
    for &(label, data) in &series[1..] {
        if data.len() != n {
            return Err(Error::LengthMismatch {
                description: format!(
                    "{first_label} has {n} elements, {label} has {}",
                    data.len()
                ),
            });
        }
    }
    Ok(())
}
