//! Core abstractions for contourmesh.
//!
//! This crate provides the fundamental types used throughout contourmesh:
//! - [`Sample`] input records, their validation into [`Vertex`] records, and the
//!   double-buffered [`PositionBuffers`] used for animation
//! - [`Axis`] bindings from model to plot coordinates
//! - [`ContourOptions`] configuration
//! - [`DepthGroup`]s and the persistent [`GroupRegistry`]
//! - The [`SeriesSource`] capability trait

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
// Depth means divide by member counts
#![allow(clippy::cast_precision_loss)]

pub mod axis;
pub mod error;
pub mod field;
pub mod geometry;
pub mod group;
pub mod handle;
pub mod options;
pub mod registry;
pub mod series;
pub mod vertex;

pub use axis::Axis;
pub use error::{ContourError, Result};
pub use field::{ContourSpec, FieldAxis};
pub use geometry::{AnimatedSegment, Segment};
pub use group::{DepthGroup, GroupKey};
pub use handle::{HandleAllocator, HandleId};
pub use options::{
    ColorAxisOptions, ColorStop, ContourOptions, Layout, LineCap, StrokeStyle, TriangleList,
};
pub use registry::GroupRegistry;
pub use series::SeriesSource;
pub use vertex::{
    validate, PositionBuffers, RejectReason, Sample, ValidationReport, Vertex, VertexSet,
};

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3, Vec4};
