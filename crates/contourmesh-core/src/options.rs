//! Configuration options for a contour series.

use std::path::Path;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::field::ContourSpec;

/// How the series is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Plain 2-D plot; one surface group, no depth sorting.
    #[default]
    Flat,
    /// Projected 3-D box; per-triangle groups sorted by depth.
    Pseudo3d,
}

/// Line end style for stroked polylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke style for edge and contour overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// RGBA color.
    pub color: Vec4,
    /// Line width in plot units.
    pub width: f32,
    /// Line end style.
    pub line_cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            width: 2.0,
            line_cap: LineCap::Round,
        }
    }
}

/// One stop of a color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Relative position in [0, 1].
    pub offset: f64,
    /// RGBA color.
    pub color: Vec4,
}

impl ColorStop {
    pub fn new(offset: f64, color: Vec4) -> Self {
        Self { offset, color }
    }
}

/// Configuration of the color axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAxisOptions {
    /// Lower bound override; the value extent is used when unset.
    pub min: Option<f64>,
    /// Upper bound override; the value extent is used when unset.
    pub max: Option<f64>,
    /// Whether values are mapped through log10 before normalization.
    pub logarithmic: bool,
    /// Name of a preset color map used for the stops.
    pub colormap: Option<String>,
    /// Explicit stops; take precedence over `colormap`.
    pub stops: Option<Vec<ColorStop>>,
    /// Color at relative position 0 when neither stops nor a preset are given.
    pub min_color: Vec4,
    /// Color at relative position 1 when neither stops nor a preset are given.
    pub max_color: Vec4,
}

impl Default for ColorAxisOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            logarithmic: false,
            colormap: None,
            stops: None,
            // #EFEFFF and #003399
            min_color: Vec4::new(0.937, 0.937, 1.0, 1.0),
            max_color: Vec4::new(0.0, 0.2, 0.6, 1.0),
        }
    }
}

/// Explicit triangle indices, either grouped in triples or flat.
///
/// In JSON a list of arrays reads as triples and a list of numbers as a flat
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriangleList {
    Triples(Vec<[u32; 3]>),
    Flat(Vec<u32>),
}

impl TriangleList {
    /// Returns the index triples.
    ///
    /// A trailing partial triple in a flat list is ignored, or rejected with
    /// [`ContourError::SizeMismatch`] when `strict` is set.
    pub fn triples(&self, strict: bool) -> Result<Vec<[u32; 3]>> {
        match self {
            TriangleList::Triples(triples) => Ok(triples.clone()),
            TriangleList::Flat(indices) => {
                let remainder = indices.len() % 3;
                if strict && remainder != 0 {
                    return Err(ContourError::SizeMismatch {
                        expected: indices.len() - remainder + 3,
                        actual: indices.len(),
                    });
                }
                Ok(indices
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect())
            }
        }
    }
}

impl From<Vec<[u32; 3]>> for TriangleList {
    fn from(triples: Vec<[u32; 3]>) -> Self {
        TriangleList::Triples(triples)
    }
}

impl From<Vec<u32>> for TriangleList {
    fn from(indices: Vec<u32>) -> Self {
        TriangleList::Flat(indices)
    }
}

/// Configuration options for a contour series.
///
/// The mesh strategy is chosen by which inputs are present: explicit
/// `triangles` first, then `grid_width`, then delegated triangulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    /// Row length of a regular grid of samples.
    pub grid_width: Option<usize>,

    /// Explicit triangle indices.
    pub triangles: Option<TriangleList>,

    /// Whether a flat triangle list with a trailing partial triple is an error.
    pub strict_triangles: bool,

    /// Whether the series is laid out in pseudo-3D.
    pub is_3d: bool,

    /// Depth of the 3-D chart box in plot units; z is scaled into it.
    pub depth: f64,

    /// Whether boundary edges are drawn as a wireframe overlay.
    pub show_edges: bool,

    /// Stroke of the boundary overlay.
    pub edge_style: StrokeStyle,

    /// Iso-lines to extract.
    pub contours: Vec<ContourSpec>,

    /// Stroke of the iso-lines.
    pub contour_style: StrokeStyle,

    /// Color axis configuration.
    pub color_axis: ColorAxisOptions,

    /// Whether fills are requested with crisp (non-antialiased) edges.
    pub crisp_edges: bool,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            grid_width: None,
            triangles: None,
            strict_triangles: false,
            is_3d: false,
            depth: 100.0,
            show_edges: false,
            edge_style: StrokeStyle::default(),
            contours: Vec::new(),
            contour_style: StrokeStyle {
                width: 1.0,
                ..StrokeStyle::default()
            },
            color_axis: ColorAxisOptions::default(),
            crisp_edges: true,
        }
    }
}

impl ContourOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the layout implied by `is_3d`.
    pub fn layout(&self) -> Layout {
        if self.is_3d {
            Layout::Pseudo3d
        } else {
            Layout::Flat
        }
    }

    /// Sets the grid width.
    pub fn with_grid_width(mut self, width: usize) -> Self {
        self.grid_width = Some(width);
        self
    }

    /// Sets explicit triangle triples.
    pub fn with_triangles(mut self, triangles: Vec<[u32; 3]>) -> Self {
        self.triangles = Some(TriangleList::Triples(triangles));
        self
    }

    /// Sets explicit triangles as a flat index list.
    pub fn with_flat_triangles(mut self, indices: Vec<u32>) -> Self {
        self.triangles = Some(TriangleList::Flat(indices));
        self
    }

    /// Sets whether a malformed flat triangle list is rejected.
    pub fn with_strict_triangles(mut self, strict: bool) -> Self {
        self.strict_triangles = strict;
        self
    }

    /// Enables pseudo-3D layout with the given chart depth.
    pub fn with_3d(mut self, depth: f64) -> Self {
        self.is_3d = true;
        self.depth = depth;
        self
    }

    /// Sets whether boundary edges are drawn.
    pub fn with_edges(mut self, show: bool) -> Self {
        self.show_edges = show;
        self
    }

    /// Adds an iso-line request.
    pub fn with_contour(mut self, spec: ContourSpec) -> Self {
        self.contours.push(spec);
        self
    }

    /// Sets the color map preset.
    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.color_axis.colormap = Some(name.into());
        self
    }

    /// Sets the color axis range.
    pub fn with_color_range(mut self, min: f64, max: f64) -> Self {
        self.color_axis.min = Some(min);
        self.color_axis.max = Some(max);
        self
    }
}
