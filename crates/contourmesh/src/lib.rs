//! contourmesh: a contour-surface tessellation and shading engine.
//!
//! Given scattered or gridded samples of a scalar field, contourmesh builds a
//! triangle mesh, gives every triangle a fill that linearly interpolates the
//! field's color across it, extracts iso-line segments at requested levels, and
//! keeps enough state between redraws for a renderer to animate the result.
//!
//! # Quick Start
//!
//! ```no_run
//! use contourmesh::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let grid = SampleGrid::new((-2.0, 2.0), (-2.0, 2.0), 20, 20)?;
//!     let options = ContourOptions::new()
//!         .with_edges(true)
//!         .with_contour(ContourSpec::new(FieldAxis::Value));
//!     let series = grid.to_series("ripple", |x, y| (x * x + y * y).sqrt().sin(), options);
//!
//!     let mut engine = Engine::new().with_ticks(IntervalTicks::new(0.25));
//!     let frame = engine.render(&series);
//!     println!("{}", frame_to_json(&frame)?);
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! Each [`Engine::render`] call (or [`Engine::try_render`], which also
//! reports configuration errors) validates the samples, maps them to plot space
//! (through a [`Projector`] in pseudo-3D layouts), builds and orients the mesh,
//! shades each triangle, collects boundary and contour segments, groups
//! triangles into depth layers, and returns a [`Frame`] of [`DrawCommand`]s in
//! back-to-front order.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]

mod engine;
mod sampling;
mod series;

pub use engine::Engine;
pub use sampling::SampleGrid;
pub use series::{ContourSeries, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};

// Re-export core types
pub use contourmesh_core::{
    AnimatedSegment, Axis, ColorAxisOptions, ColorStop, ContourError, ContourOptions,
    ContourSpec, DepthGroup, FieldAxis, GroupKey, HandleId, Layout, LineCap, RejectReason,
    Result, Sample, Segment, SeriesSource, StrokeStyle, TriangleList, ValidationReport, DVec2,
    DVec3, Vec4,
};

// Re-export mesh types
pub use contourmesh_mesh::{
    ContourMesh, EdgeAccountant, FixedTicks, IntervalTicks, MeshStrategy, MeshTriangle,
    TickSource, Triangulator,
};

// Re-export render types
pub use contourmesh_render::{
    CameraProjector, ColorAxis, ColorMap, ColorMapRegistry, ColorScale, DrawCommand, Fill, Frame,
    GradientId, IdentityProjector, LinearGradient, ProjectionMode, Projector, TrianglePath,
};

/// Initializes logging from the `RUST_LOG` environment variable.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Serializes a frame to pretty-printed JSON.
pub fn frame_to_json(frame: &Frame) -> Result<String> {
    Ok(serde_json::to_string_pretty(frame)?)
}

/// Parses a frame from JSON.
pub fn frame_from_json(json: &str) -> Result<Frame> {
    Ok(serde_json::from_str(json)?)
}
