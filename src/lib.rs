//! flux-ta: batch technical-analysis indicators over numeric slices.
//!
//! This crate implements three indicators sharing one computational shape —
//! a stateful recurrence scanned forward over a bar sequence, producing a
//! derived series aligned to the input index:
//!
//! - **Laguerre RSI** ([`indicators::lrsi`]): a four-stage cascaded Laguerre
//!   low-pass filter over close prices, with an oscillator formed from the
//!   pairwise stage differences.
//! - **PMAX** ([`indicators::pmax`]): moving-average ± ATR bands with a
//!   ratchet rule and a two-state trend machine selecting the emitted band.
//! - **Volume Flow Indicator** ([`indicators::vfi`]): volume-cutoff-clipped,
//!   signed money-flow accumulation over a rolling window, normalized and
//!   smoothed.
//!
//! Every output series has the same length as its input, with `NaN` marking
//! positions where the value is undefined (warm-up, zero denominator). A
//! shared finishing pipeline ([`finish`]) optionally shifts the series along
//! the index, fills missing values, and tags the result with a name and
//! category for downstream feature assembly.
//!
//! # Quick start
//!
//! ```
//! use flux_ta::prelude::*;
//!
//! let close = vec![
//!     44.34_f64, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84,
//!     46.08, 45.89, 46.03, 45.61, 46.28, 46.28, 46.00,
//! ];
//!
//! let series = lrsi_series(&close, &LrsiParams::default(), &OutputConfig::default()).unwrap();
//! assert_eq!(series.name, "LRSI_14");
//! assert_eq!(series.category, Category::Momentum);
//! assert_eq!(series.values.len(), close.len());
//! ```
//!
//! # Error handling
//!
//! Structural faults (empty input, mismatched lengths, too little history)
//! return [`Error`]; an `Err` is the "no result for this series" signal and
//! is meant to be checked, not propagated as a panic. Out-of-range tuning
//! parameters never error — they clamp to documented defaults. Numeric
//! degeneracy inside a computation is reported in-band as `NaN`.
//!
//! # Generics
//!
//! All functions are generic over [`SeriesElement`], implemented for `f32`
//! and `f64`.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod finish;
pub mod indicators;
pub mod kernels;
pub mod ma;
pub mod prelude;
pub mod traits;
pub mod utils;

pub use error::{Error, Result};
pub use finish::{Category, FillMethod, IndicatorSeries, OutputConfig};
pub use traits::{SeriesElement, ValidatedInput};
