//! Error types for flux-ta.
//!
//! Structural problems with the input (empty series, mismatched lengths,
//! not enough history) surface as typed errors; numeric degeneracy inside a
//! computation (zero denominators, unfilled rolling windows) never does — it
//! is reported in-band as `NaN` in the output series.

use thiserror::Error;

/// The main error type for flux-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is empty.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The input data series is too short for the requested operation.
    ///
    /// Returned when the input has fewer elements than the indicator's
    /// minimum length. Callers treat this as "no result for this series"
    /// rather than a fatal condition.
    #[error("insufficient data for {indicator}: required {required} elements, got {actual}")]
    InsufficientData {
        /// Name of the indicator that rejected the input.
        indicator: &'static str,
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
    },

    /// Two or more input series that must be aligned have different lengths.
    #[error("length mismatch: {description}")]
    LengthMismatch {
        /// Description of which series disagree.
        description: String,
    },

    /// The period parameter is invalid.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A caller-provided output buffer is shorter than the input series.
    #[error("output buffer too small for {indicator}: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// Name of the indicator that rejected the buffer.
        indicator: &'static str,
        /// The number of elements required.
        required: usize,
        /// The number of elements provided.
        actual: usize,
    },

    /// Failed to convert a numeric value to the target element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the flux-ta [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
