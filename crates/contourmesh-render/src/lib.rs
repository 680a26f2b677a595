//! Shading backend for contourmesh.
//!
//! This crate owns everything between the mesh and an external renderer:
//! - [`ColorScale`] and its [`ColorAxis`] implementation, with named presets
//! - [`Projector`]s for pseudo-3D layouts
//! - [`DrawCommand`]s and [`Frame`]s handed to the renderer

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod color_maps;
pub mod color_scale;
pub mod draw;
pub mod projector;

pub use color_maps::{ColorMap, ColorMapRegistry};
pub use color_scale::{ColorAxis, ColorScale};
pub use draw::{
    DrawCommand, Fill, Frame, GradientId, GradientIdAllocator, GradientUnits, LinearGradient,
    SpreadMethod, TrianglePath,
};
pub use projector::{CameraProjector, IdentityProjector, ProjectionMode, Projector};
