//! The capability set a contour engine needs from its data series.

use crate::axis::Axis;
use crate::options::ContourOptions;
use crate::vertex::Sample;

/// A data series that can be tessellated and shaded.
///
/// The engine only needs three things from a series: how model coordinates map
/// to the plot (axis bindings), the samples themselves, and the configuration.
pub trait SeriesSource {
    /// Returns the series name, used in log messages.
    fn name(&self) -> &str;

    /// Returns the horizontal axis binding.
    fn x_axis(&self) -> &Axis;

    /// Returns the vertical axis binding.
    fn y_axis(&self) -> &Axis;

    /// Returns the samples in index order.
    fn samples(&self) -> &[Sample];

    /// Returns the series configuration.
    fn options(&self) -> &ContourOptions;

    /// Returns the number of samples.
    fn num_samples(&self) -> usize {
        self.samples().len()
    }
}
