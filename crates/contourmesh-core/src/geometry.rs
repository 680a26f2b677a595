//! Screen-space line segments with animation history.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A straight line segment in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Returns the segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// A segment drawn at its previous-frame and current-frame positions.
///
/// The renderer tweens from `previous` to `current`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedSegment {
    pub previous: Segment,
    pub current: Segment,
}

impl AnimatedSegment {
    pub fn new(previous: Segment, current: Segment) -> Self {
        Self { previous, current }
    }

    /// Creates a segment that does not move between frames.
    pub fn still(segment: Segment) -> Self {
        Self {
            previous: segment,
            current: segment,
        }
    }
}
