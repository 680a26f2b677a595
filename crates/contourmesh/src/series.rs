//! The stock contour series.

use contourmesh_core::{Axis, ContourOptions, Sample, SeriesSource};

/// Default plot width used when axes are fitted to the data.
pub const DEFAULT_PLOT_WIDTH: f64 = 800.0;
/// Default plot height used when axes are fitted to the data.
pub const DEFAULT_PLOT_HEIGHT: f64 = 600.0;

/// A named set of samples with its axis bindings and configuration.
#[derive(Debug, Clone)]
pub struct ContourSeries {
    name: String,
    samples: Vec<Sample>,
    options: ContourOptions,
    x_axis: Axis,
    y_axis: Axis,
    plot_size: (f64, f64),
}

impl ContourSeries {
    /// Creates a series whose axes span the sample extent on a default plot.
    pub fn new(name: impl Into<String>, samples: Vec<Sample>, options: ContourOptions) -> Self {
        let mut series = Self {
            name: name.into(),
            samples,
            options,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            plot_size: (DEFAULT_PLOT_WIDTH, DEFAULT_PLOT_HEIGHT),
        };
        series.fit_axes();
        series
    }

    /// Refits both axes to the plot size and current samples.
    #[must_use]
    pub fn with_plot_size(mut self, width: f64, height: f64) -> Self {
        self.plot_size = (width, height);
        self.fit_axes();
        self
    }

    /// Replaces the fitted axes with explicit bindings.
    #[must_use]
    pub fn with_axes(mut self, x_axis: Axis, y_axis: Axis) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    /// Replaces the samples and refits the axes.
    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
        self.fit_axes();
    }

    /// Returns mutable access to the samples. Axes are not refitted.
    pub fn samples_mut(&mut self) -> &mut Vec<Sample> {
        &mut self.samples
    }

    /// Returns mutable access to the configuration.
    pub fn options_mut(&mut self) -> &mut ContourOptions {
        &mut self.options
    }

    /// Fits the horizontal axis to x and the vertical axis to y.
    ///
    /// The vertical axis is reversed so that larger y values are drawn higher.
    pub fn fit_axes(&mut self) {
        let (width, height) = self.plot_size;
        self.x_axis = Axis::fit(self.samples.iter().filter_map(|s| s.x), width);
        self.y_axis = Axis::fit(self.samples.iter().filter_map(|s| s.y), height).with_reversed(true);
    }
}

impl SeriesSource for ContourSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn options(&self) -> &ContourOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_fit_samples() {
        let samples = vec![Sample::new(-1.0, 2.0, 0.0), Sample::new(3.0, 6.0, 0.0)];
        let series = ContourSeries::new("fit", samples, ContourOptions::new());

        assert_eq!(series.x_axis().to_pixels(-1.0), 0.0);
        assert_eq!(series.x_axis().to_pixels(3.0), DEFAULT_PLOT_WIDTH);
        // vertical axis grows upwards on screen
        assert_eq!(series.y_axis().to_pixels(2.0), DEFAULT_PLOT_HEIGHT);
        assert_eq!(series.y_axis().to_pixels(6.0), 0.0);
        assert_eq!(series.num_samples(), 2);
    }

    #[test]
    fn test_set_samples_refits() {
        let mut series = ContourSeries::new("refit", vec![], ContourOptions::new())
            .with_plot_size(100.0, 100.0);
        series.set_samples(vec![Sample::new(0.0, 0.0, 1.0), Sample::new(10.0, 5.0, 1.0)]);
        assert_eq!(series.x_axis().to_pixels(5.0), 50.0);
        assert_eq!(series.name(), "refit");
    }
}
