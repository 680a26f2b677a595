//! Mesh construction and per-triangle geometry for contourmesh.
//!
//! - [`MeshStrategy`] and the [`Triangulator`] seam build raw triangles
//! - [`winding`] orients them for the layout
//! - [`EdgeAccountant`] finds the boundary for the wireframe overlay
//! - [`gradient`] derives each triangle's fill
//! - [`contour`] extracts iso-line segments at [`TickSource`] levels

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)]

pub mod builder;
pub mod contour;
pub mod edges;
pub mod gradient;
pub mod mesh;
pub mod winding;

pub use builder::{build_triangles, grid_triangles, triples_from_flat, MeshStrategy, Triangulator};
pub use contour::{
    crossing, triangle_segment, triangle_segments, FixedTicks, IntervalTicks, TickSource,
    MAX_INTERVAL_TICKS,
};
pub use edges::EdgeAccountant;
pub use gradient::{solve_plane, triangle_fill, FLAT_EPSILON};
pub use mesh::{ContourMesh, MeshTriangle};
pub use winding::signed_area;
