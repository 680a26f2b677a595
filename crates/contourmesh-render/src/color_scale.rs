//! Color scales: mapping raw field values to ramp positions and colors.

use contourmesh_core::{ColorAxisOptions, ColorStop};
use glam::Vec4;

use crate::color_maps::ColorMapRegistry;

/// Maps raw values onto a color ramp.
pub trait ColorScale {
    /// Normalizes a raw value into ramp space; 0 and 1 are the axis bounds.
    ///
    /// Values outside the axis range map outside [0, 1].
    fn to_relative(&self, value: f64) -> f64;

    /// Returns the color of a raw value.
    fn to_color(&self, value: f64) -> Vec4;

    /// Returns the ordered ramp stops, used verbatim in gradient fills.
    fn stops(&self) -> &[ColorStop];
}

/// A color axis with a linear or logarithmic range and an ordered stop list.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAxis {
    /// Lower bound in linear (post-log) space.
    min: f64,
    /// Upper bound in linear (post-log) space.
    max: f64,
    logarithmic: bool,
    stops: Vec<ColorStop>,
}

impl ColorAxis {
    /// Creates a linear color axis.
    ///
    /// Stops are sorted by offset.
    pub fn new(min: f64, max: f64, mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self {
            min,
            max,
            logarithmic: false,
            stops,
        }
    }

    /// Creates a logarithmic color axis; bounds are given in raw units.
    pub fn logarithmic(min: f64, max: f64, stops: Vec<ColorStop>) -> Self {
        Self {
            logarithmic: true,
            ..Self::new(min.log10(), max.log10(), stops)
        }
    }

    /// Builds a color axis from configuration and the data extent.
    ///
    /// Explicit bounds override the extent. Explicit stops take precedence over
    /// a named preset, which takes precedence over the min/max colors; an
    /// unknown preset name falls back to the min/max colors.
    pub fn from_options(
        options: &ColorAxisOptions,
        extent: Option<(f64, f64)>,
        color_maps: &ColorMapRegistry,
    ) -> Self {
        let fallback = if options.logarithmic { (1.0, 10.0) } else { (0.0, 1.0) };
        let (data_min, data_max) = extent.unwrap_or(fallback);
        let mut min = options.min.unwrap_or(data_min);
        let mut max = options.max.unwrap_or(data_max);
        if options.logarithmic && (min <= 0.0 || max <= 0.0) {
            log::warn!("non-positive bound on a logarithmic color axis, using the data extent");
            (min, max) = (data_min, data_max);
        }

        let stops = if let Some(stops) = &options.stops {
            stops.clone()
        } else if let Some(name) = &options.colormap {
            match color_maps.get(name) {
                Some(map) => map.to_stops(),
                None => {
                    log::warn!("unknown color map '{name}', using min/max colors");
                    default_stops(options)
                }
            }
        } else {
            default_stops(options)
        };

        if options.logarithmic {
            Self::logarithmic(min, max, stops)
        } else {
            Self::new(min, max, stops)
        }
    }

    /// Returns the axis bounds in linear space.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Returns whether values are log-transformed before normalization.
    pub fn is_logarithmic(&self) -> bool {
        self.logarithmic
    }

    fn color_at(&self, t: f64) -> Vec4 {
        let Some(first) = self.stops.first() else {
            return Vec4::ZERO;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= 0.0 {
                    return hi.color;
                }
                let frac = ((t - lo.offset) / span) as f32;
                return lo.color.lerp(hi.color, frac);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

fn default_stops(options: &ColorAxisOptions) -> Vec<ColorStop> {
    vec![
        ColorStop::new(0.0, options.min_color),
        ColorStop::new(1.0, options.max_color),
    ]
}

impl ColorScale for ColorAxis {
    fn to_relative(&self, value: f64) -> f64 {
        let value = if self.logarithmic { value.log10() } else { value };
        let span = self.max - self.min;
        let span = if span == 0.0 { 1.0 } else { span };
        (value - self.min) / span
    }

    fn to_color(&self, value: f64) -> Vec4 {
        self.color_at(self.to_relative(value).clamp(0.0, 1.0))
    }

    fn stops(&self) -> &[ColorStop] {
        &self.stops
    }
}
