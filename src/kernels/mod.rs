//! Low-level computational kernels shared by the indicators.

pub mod rolling;

pub use rolling::{diff, rolling_mean, rolling_sum, rolling_sum_into};
