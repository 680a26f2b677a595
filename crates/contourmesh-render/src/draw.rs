//! Draw commands emitted for the external renderer.

use std::fmt;

use contourmesh_core::{AnimatedSegment, ColorStop, HandleId, StrokeStyle};
use glam::{DVec2, Vec4};
use serde::{Deserialize, Serialize};

/// Identifier of a per-triangle gradient definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradientId(pub u64);

impl fmt::Display for GradientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contour-gradient-id-{}", self.0)
    }
}

/// Monotonic allocator for [`GradientId`]s, owned by one engine.
#[derive(Debug, Clone, Default)]
pub struct GradientIdAllocator {
    next: u64,
}

impl GradientIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> GradientId {
        let id = GradientId(self.next);
        self.next += 1;
        id
    }
}

/// How a gradient continues past its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpreadMethod {
    /// The end colors extend indefinitely.
    #[default]
    Pad,
}

/// Coordinate system of gradient endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientUnits {
    /// Endpoints are in plot coordinates.
    #[default]
    UserSpaceOnUse,
}

/// A linear gradient whose iso-lines are perpendicular to `end - start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Definition id the renderer can reuse between frames.
    pub id: Option<GradientId>,
    /// Point at ramp position 0.
    pub start: DVec2,
    /// Point at ramp position 1.
    pub end: DVec2,
    /// Ramp stops, copied from the color scale.
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMethod,
    pub units: GradientUnits,
}

impl LinearGradient {
    /// Creates a padded user-space gradient.
    pub fn new(start: DVec2, end: DVec2, stops: Vec<ColorStop>) -> Self {
        Self {
            id: None,
            start,
            end,
            stops,
            spread: SpreadMethod::Pad,
            units: GradientUnits::UserSpaceOnUse,
        }
    }
}

/// Fill of a triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// A single color.
    Solid(Vec4),
    /// An affine color ramp.
    LinearGradient(LinearGradient),
}

impl Fill {
    /// Returns true for the solid branch.
    pub fn is_solid(&self) -> bool {
        matches!(self, Fill::Solid(_))
    }

    /// Returns the gradient, if any.
    pub fn gradient(&self) -> Option<&LinearGradient> {
        match self {
            Fill::LinearGradient(gradient) => Some(gradient),
            Fill::Solid(_) => None,
        }
    }
}

/// A closed triangle path at its previous-frame and current-frame positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrianglePath {
    pub previous: [DVec2; 3],
    pub current: [DVec2; 3],
}

/// A single instruction for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled triangle.
    Triangle {
        /// Node of the triangle shape.
        handle: HandleId,
        /// Node of the enclosing group.
        group: HandleId,
        z_index: f64,
        path: TrianglePath,
        fill: Fill,
        crisp_edges: bool,
    },
    /// Boundary wireframe segments of one group.
    Edges {
        group: HandleId,
        z_index: f64,
        segments: Vec<AnimatedSegment>,
        stroke: StrokeStyle,
    },
    /// Iso-line segments of one group.
    Contours {
        group: HandleId,
        z_index: f64,
        segments: Vec<AnimatedSegment>,
        stroke: StrokeStyle,
    },
}

impl DrawCommand {
    /// Returns the display order of this command.
    pub fn z_index(&self) -> f64 {
        match self {
            DrawCommand::Triangle { z_index, .. }
            | DrawCommand::Edges { z_index, .. }
            | DrawCommand::Contours { z_index, .. } => *z_index,
        }
    }

    /// Returns the group node this command belongs to.
    pub fn group(&self) -> HandleId {
        match self {
            DrawCommand::Triangle { group, .. }
            | DrawCommand::Edges { group, .. }
            | DrawCommand::Contours { group, .. } => *group,
        }
    }
}

/// Everything emitted by one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Commands in draw order (back to front).
    pub commands: Vec<DrawCommand>,
    /// Handles the renderer must create nodes for.
    pub created: Vec<HandleId>,
    /// Handles whose nodes the renderer must destroy.
    pub released: Vec<HandleId>,
    /// Gradient definitions no longer referenced.
    pub released_gradients: Vec<GradientId>,
}

impl Frame {
    /// Iterates over triangle commands.
    pub fn triangles(&self) -> impl Iterator<Item = (&TrianglePath, &Fill)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Triangle { path, fill, .. } => Some((path, fill)),
            _ => None,
        })
    }

    /// Iterates over all boundary segments.
    pub fn edge_segments(&self) -> impl Iterator<Item = &AnimatedSegment> {
        self.commands.iter().flat_map(|c| match c {
            DrawCommand::Edges { segments, .. } => segments.as_slice(),
            _ => &[][..],
        })
    }

    /// Iterates over all contour segments.
    pub fn contour_segments(&self) -> impl Iterator<Item = &AnimatedSegment> {
        self.commands.iter().flat_map(|c| match c {
            DrawCommand::Contours { segments, .. } => segments.as_slice(),
            _ => &[][..],
        })
    }

    /// Returns true if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
