//! Technical-analysis indicator engines.
//!
//! Three independent batch engines, each a pure function from input slices
//! to an output series of the same length:
//!
//! - [`lrsi`] — Laguerre RSI, a four-stage recursive-filter oscillator
//!   (momentum)
//! - [`pmax`] — adaptive ATR bands with a ratchet and a two-state trend
//!   machine (trend)
//! - [`vfi`] — cutoff-clipped, volume-weighted money-flow accumulation
//!   (volume)
//!
//! plus the [`atr`] volatility collaborator they build on. All engines share
//! the conventions of the crate: `NaN` marks undefined positions, parameters
//! clamp permissively to their defaults, and structurally unusable input
//! yields a typed error rather than a partial result.

pub mod atr;
pub mod lrsi;
pub mod pmax;
pub mod vfi;

pub use atr::{atr, atr_into, atr_lookback, atr_min_len, true_range};
pub use lrsi::{lrsi, lrsi_into, lrsi_lookback, lrsi_min_len, lrsi_series, LrsiParams};
pub use pmax::{
    pmax, pmax_into, pmax_lookback, pmax_min_len, pmax_series, pmax_with_trend, PmaxOutput,
    PmaxParams,
};
pub use vfi::{vfi, vfi_into, vfi_lookback, vfi_min_len, vfi_series, VfiParams};
