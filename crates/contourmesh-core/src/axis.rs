//! Axis bindings that translate model coordinates into plot coordinates.

use serde::{Deserialize, Serialize};

/// A linear (or logarithmic) axis spanning `len` plot units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Lower bound in model units.
    pub min: f64,
    /// Upper bound in model units.
    pub max: f64,
    /// Extent of the axis in plot units.
    pub len: f64,
    /// Whether the axis runs from `len` down to 0 (screen-space y).
    #[serde(default)]
    pub reversed: bool,
    /// Whether values are mapped through log10 first.
    #[serde(default)]
    pub logarithmic: bool,
}

impl Axis {
    /// Creates a horizontal axis.
    pub fn new(min: f64, max: f64, len: f64) -> Self {
        Self {
            min,
            max,
            len,
            reversed: false,
            logarithmic: false,
        }
    }

    /// Creates a vertical axis; plot y grows downward so the axis is reversed.
    pub fn vertical(min: f64, max: f64, len: f64) -> Self {
        Self {
            reversed: true,
            ..Self::new(min, max, len)
        }
    }

    /// Creates an axis covering the extent of `values`.
    ///
    /// Returns a unit axis at the origin if there are no values.
    pub fn fit(values: impl IntoIterator<Item = f64>, len: f64) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::new(0.0, 1.0, len)
        } else {
            Self::new(min, max, len)
        }
    }

    /// Sets whether the axis is reversed.
    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Sets whether the axis is logarithmic.
    #[must_use]
    pub fn with_logarithmic(mut self, logarithmic: bool) -> Self {
        self.logarithmic = logarithmic;
        self
    }

    /// Maps a model value into linear axis space.
    pub fn to_linear(&self, value: f64) -> f64 {
        if self.logarithmic {
            value.log10()
        } else {
            value
        }
    }

    /// Translates a model value into plot units.
    pub fn to_pixels(&self, value: f64) -> f64 {
        let lo = self.to_linear(self.min);
        let hi = self.to_linear(self.max);
        let span = hi - lo;
        let span = if span == 0.0 { 1.0 } else { span };
        let t = (self.to_linear(value) - lo) / span;
        if self.reversed {
            (1.0 - t) * self.len
        } else {
            t * self.len
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}
