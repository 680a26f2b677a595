//! Generative sample grids.
//!
//! A [`SampleGrid`] evaluates a field function over a regular parameter grid and
//! lays the samples out row-major, one row per y step, so that the result can be
//! meshed with the grid strategy.

use contourmesh_core::{ContourError, ContourOptions, Result, Sample};

use crate::series::ContourSeries;

/// A regular grid over an x range and a y range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_steps: usize,
    y_steps: usize,
}

impl SampleGrid {
    /// Creates a grid with `x_steps` intervals along x and `y_steps` along y.
    ///
    /// Both ranges must be finite and non-empty, and both step counts non-zero.
    pub fn new(
        x_range: (f64, f64),
        y_range: (f64, f64),
        x_steps: usize,
        y_steps: usize,
    ) -> Result<Self> {
        for (name, (lo, hi)) in [("x", x_range), ("y", y_range)] {
            if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                return Err(ContourError::InvalidGrid(format!(
                    "{name} range [{lo}, {hi}] is empty"
                )));
            }
        }
        if x_steps == 0 || y_steps == 0 {
            return Err(ContourError::InvalidGrid(format!(
                "step counts must be positive, got {x_steps}x{y_steps}"
            )));
        }
        Ok(Self {
            x_range,
            y_range,
            x_steps,
            y_steps,
        })
    }

    /// Returns the number of samples per row.
    pub fn width(&self) -> usize {
        self.x_steps + 1
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.y_steps + 1
    }

    /// Returns the total number of samples.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// A grid always holds at least four samples.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn coordinate((lo, hi): (f64, f64), steps: usize, i: usize) -> f64 {
        if i == steps {
            hi
        } else {
            lo + (hi - lo) * i as f64 / steps as f64
        }
    }

    /// Evaluates `field` at every grid point.
    pub fn sample(&self, field: impl Fn(f64, f64) -> f64) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(self.len());
        for row in 0..self.height() {
            let y = Self::coordinate(self.y_range, self.y_steps, row);
            for col in 0..self.width() {
                let x = Self::coordinate(self.x_range, self.x_steps, col);
                samples.push(Sample::new(x, y, field(x, y)));
            }
        }
        samples
    }

    /// Builds a series from `field`, configured for the grid strategy.
    pub fn to_series(
        &self,
        name: impl Into<String>,
        field: impl Fn(f64, f64) -> f64,
        options: ContourOptions,
    ) -> ContourSeries {
        ContourSeries::new(name, self.sample(field), options.with_grid_width(self.width()))
    }
}
