//! Batch processing across independent series.
//!
//! Each indicator call is a pure function over its own inputs, so a batch of
//! assets parallelizes trivially across series (never along the time axis —
//! the per-series recurrences are strictly sequential). With the `parallel`
//! feature enabled the work is spread over Rayon's thread pool; without it
//! the same API runs sequentially.
//!
//! # Example
//!
//! ```
//! use flux_ta::batch::BatchProcessor;
//! use flux_ta::indicators::lrsi::{lrsi, LrsiParams};
//!
//! let series = vec![
//!     (1..=20).map(f64::from).collect::<Vec<_>>(),
//!     (1..=20).rev().map(f64::from).collect::<Vec<_>>(),
//! ];
//! let params = LrsiParams { length: 5, ..Default::default() };
//!
//! let results = BatchProcessor::new()
//!     .process(&series, |s| lrsi(s, &params))
//!     .unwrap();
//! assert_eq!(results.len(), 2);
//! ```

use crate::error::Result;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies one indicator function to many independent series.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProcessor {
    /// Minimum number of series before parallel dispatch pays for itself.
    min_parallel_series: usize,
}

impl BatchProcessor {
    /// Creates a batch processor with the default parallel threshold.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_series: 8,
        }
    }

    /// Sets the minimum number of series required before using the thread
    /// pool; smaller batches run sequentially to avoid dispatch overhead.
    #[must_use]
    pub const fn min_parallel_series(mut self, threshold: usize) -> Self {
        self.min_parallel_series = threshold;
        self
    }

    /// Applies `indicator_fn` to every series, in parallel when the
    /// `parallel` feature is enabled and the batch is large enough.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any series.
    #[cfg(feature = "parallel")]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        if series.len() < self.min_parallel_series {
            series.iter().map(|s| indicator_fn(s)).collect()
        } else {
            series.par_iter().map(|s| indicator_fn(s)).collect()
        }
    }

    /// Applies `indicator_fn` to every series sequentially.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any series.
    #[cfg(not(feature = "parallel"))]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        series.iter().map(|s| indicator_fn(s)).collect()
    }
}
