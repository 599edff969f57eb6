//! Shared output finishing pipeline.
//!
//! Every indicator's raw series passes through the same three steps before
//! it is handed back as an [`IndicatorSeries`]:
//!
//! 1. **Offset** — shift the series along the index. A positive offset
//!    delays the series (values move toward higher indices, `NaN` fills the
//!    head); a negative offset advances it (`NaN` fills the tail).
//! 2. **Fill** — an optional constant replaces every `NaN`; independently,
//!    an optional [`FillMethod`] propagates neighboring valid values into
//!    the gaps. When both are given the constant is applied first.
//! 3. **Tagging** — a deterministic name (indicator code plus key
//!    parameters) and a [`Category`] label, metadata for downstream feature
//!    assembly; the numeric contract is untouched.
//!
//! The configuration is a closed struct: exactly these options exist, and
//! [`OutputConfig::default()`] is a no-op pipeline.

use crate::traits::SeriesElement;

/// Missing-value propagation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Propagate the last valid value forward into subsequent `NaN`s.
    Forward,
    /// Propagate the next valid value backward into preceding `NaN`s.
    Backward,
}

/// Grouping label attached to every finished series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Oscillators derived from price velocity (LRSI).
    Momentum,
    /// Direction-following overlays (PMAX).
    Trend,
    /// Volume-weighted flow measures (VFI).
    Volume,
}

impl Category {
    /// Canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Momentum => "momentum",
            Self::Trend => "trend",
            Self::Volume => "volume",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-processing options applied to a raw indicator series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputConfig<T> {
    /// Index shift; positive delays, negative advances. Default 0.
    pub offset: isize,
    /// Constant substituted for every `NaN`, applied before `fill_method`.
    pub fill_value: Option<T>,
    /// Propagation fill applied after the constant fill.
    pub fill_method: Option<FillMethod>,
}

impl<T> Default for OutputConfig<T> {
    fn default() -> Self {
        Self {
            offset: 0,
            fill_value: None,
            fill_method: None,
        }
    }
}

/// A finished, tagged indicator output.
///
/// `values` has the same length as the indicator's input; `NaN` marks
/// positions where the indicator is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries<T> {
    /// Deterministic name encoding the indicator and its key parameters.
    pub name: String,
    /// Grouping label.
    pub category: Category,
    /// The output values, aligned to the input index.
    pub values: Vec<T>,
}

/// Shifts `values` in place by `offset` positions along the index.
///
/// Vacated positions become `NaN`. An `|offset| >= len` blanks the whole
/// series.
pub fn shift<T: SeriesElement>(values: &mut [T], offset: isize) {
    if offset == 0 || values.is_empty() {
        return;
    }
    let n = values.len();
    let magnitude = offset.unsigned_abs().min(n);

    if offset > 0 {
        // Delay: values move toward higher indices.
        for i in (magnitude..n).rev() {
            values[i] = values[i - magnitude];
        }
        for slot in &mut values[..magnitude] {
            *slot = T::nan();
        }
    } else {
        // Advance: values move toward lower indices.
        for i in 0..(n - magnitude) {
            values[i] = values[i + magnitude];
        }
        for slot in &mut values[n - magnitude..] {
            *slot = T::nan();
        }
    }
}

/// Replaces every `NaN` in `values` with `fill`.
pub fn fill_constant<T: SeriesElement>(values: &mut [T], fill: T) {
    for value in values.iter_mut() {
        if value.is_nan() {
            *value = fill;
        }
    }
}

/// Applies a propagation fill in place.
///
/// `Forward` carries the last valid value into later `NaN`s; `Backward`
/// carries the next valid value into earlier `NaN`s. Gaps with no valid
/// neighbor in the propagation direction stay `NaN`. Both directions are
/// idempotent.
pub fn fill_method<T: SeriesElement>(values: &mut [T], method: FillMethod) {
    match method {
        FillMethod::Forward => {
            let mut last_valid = T::nan();
            for value in values.iter_mut() {
                if value.is_nan() {
                    *value = last_valid;
                } else {
                    last_valid = *value;
                }
            }
        }
        FillMethod::Backward => {
            let mut next_valid = T::nan();
            for value in values.iter_mut().rev() {
                if value.is_nan() {
                    *value = next_valid;
                } else {
                    next_valid = *value;
                }
            }
        }
    }
}

/// Runs the full finishing pipeline over a raw series.
///
/// Order: offset shift, then constant fill, then propagation fill.
pub fn apply<T: SeriesElement>(values: &mut [T], config: &OutputConfig<T>) {
    shift(values, config.offset);
    if let Some(fill) = config.fill_value {
        fill_constant(values, fill);
    }
    if let Some(method) = config.fill_method {
        fill_method(values, method);
    }
}
