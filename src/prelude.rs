//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use flux_ta::prelude::*;
//!
//! let close: Vec<f64> = (1..=20).map(f64::from).collect();
//! let params = LrsiParams { length: 5, ..Default::default() };
//! let out = lrsi(&close, &params).unwrap();
//! assert_eq!(out.len(), close.len());
//! ```

pub use crate::error::{Error, Result};
pub use crate::traits::{SeriesElement, ValidatedInput};

pub use crate::finish::{Category, FillMethod, IndicatorSeries, OutputConfig};
pub use crate::ma::{ma, ma_into, MaMode};

pub use crate::indicators::{
    atr, atr_into, atr_lookback, atr_min_len, lrsi, lrsi_into, lrsi_lookback, lrsi_min_len,
    lrsi_series, pmax, pmax_into, pmax_lookback, pmax_min_len, pmax_series, pmax_with_trend,
    true_range, vfi, vfi_into, vfi_lookback, vfi_min_len, vfi_series, LrsiParams, PmaxOutput,
    PmaxParams, VfiParams,
};

pub use crate::batch::BatchProcessor;
pub use crate::utils::{approx_eq, count_nan_prefix, count_nans, EPSILON, LOOSE_EPSILON};
