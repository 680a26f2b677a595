//! Depth groups for painter's-algorithm layering.
//!
//! A group collects the triangles drawn at one depth layer. In flat mode the
//! whole surface is a single group; in pseudo-3D mode every triangle is its own
//! group so that groups can be ordered back to front by mean depth.

use serde::{Deserialize, Serialize};

use crate::geometry::AnimatedSegment;
use crate::handle::HandleId;

/// Stable identity of a group across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupKey {
    /// The single group used in flat mode.
    Surface,
    /// A one-triangle group keyed by its sorted vertex indices.
    Triangle([u32; 3]),
}

impl GroupKey {
    /// Builds the key of a triangle group, independent of vertex order.
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        let mut key = [a, b, c];
        key.sort_unstable();
        GroupKey::Triangle(key)
    }
}

/// A rendering group with running depth statistics and this frame's overlays.
#[derive(Debug, Clone)]
pub struct DepthGroup {
    /// The stable key of this group.
    key: GroupKey,
    /// Renderer node that owns this group's draw commands.
    handle: HandleId,
    /// Indices of member triangles in the current mesh.
    members: Vec<usize>,
    /// Sum of member depths.
    depth_sum: f64,
    /// Position of the group in this frame's build order.
    frame_order: usize,
    /// Boundary segments emitted this frame.
    edges: Vec<AnimatedSegment>,
    /// Contour segments emitted this frame.
    contours: Vec<AnimatedSegment>,
}

impl DepthGroup {
    /// Creates an empty group.
    pub fn new(key: GroupKey, handle: HandleId) -> Self {
        Self {
            key,
            handle,
            members: Vec::new(),
            depth_sum: 0.0,
            frame_order: 0,
            edges: Vec::new(),
            contours: Vec::new(),
        }
    }

    /// Returns the key of this group.
    #[must_use]
    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// Returns the renderer handle of this group.
    #[must_use]
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Adds a triangle at the given depth.
    pub fn add_member(&mut self, triangle: usize, depth: f64) {
        self.members.push(triangle);
        self.depth_sum += depth;
    }

    /// Returns the member triangle indices.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns the number of member triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no members this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the mean member depth, or 0 for an empty group.
    #[must_use]
    pub fn mean_depth(&self) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            self.depth_sum / self.members.len() as f64
        }
    }

    /// Returns the display order: farther groups get lower values.
    #[must_use]
    pub fn z_index(&self) -> f64 {
        -self.mean_depth()
    }

    /// Returns the position in this frame's build order.
    #[must_use]
    pub fn frame_order(&self) -> usize {
        self.frame_order
    }

    pub(crate) fn set_frame_order(&mut self, order: usize) {
        self.frame_order = order;
    }

    /// Appends boundary segments for this frame.
    pub fn push_edges(&mut self, segments: impl IntoIterator<Item = AnimatedSegment>) {
        self.edges.extend(segments);
    }

    /// Appends contour segments for this frame.
    pub fn push_contours(&mut self, segments: impl IntoIterator<Item = AnimatedSegment>) {
        self.contours.extend(segments);
    }

    /// Returns this frame's boundary segments.
    pub fn edges(&self) -> &[AnimatedSegment] {
        &self.edges
    }

    /// Returns this frame's contour segments.
    pub fn contours(&self) -> &[AnimatedSegment] {
        &self.contours
    }

    /// Clears overlays, membership and depth statistics for the next frame.
    ///
    /// Segments carry their own previous positions, so nothing from the old
    /// frame is kept.
    pub(crate) fn rotate(&mut self) {
        self.edges.clear();
        self.contours.clear();
        self.members.clear();
        self.depth_sum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use glam::DVec2;

    #[test]
    fn test_group_creation() {
        let group = DepthGroup::new(GroupKey::Surface, HandleId(3));
        assert_eq!(group.key(), GroupKey::Surface);
        assert_eq!(group.handle(), HandleId(3));
        assert!(group.is_empty());
        assert_eq!(group.mean_depth(), 0.0);
    }

    #[test]
    fn test_triangle_key_is_order_independent() {
        assert_eq!(GroupKey::triangle(4, 1, 9), GroupKey::triangle(9, 4, 1));
        assert_eq!(GroupKey::triangle(4, 1, 9), GroupKey::Triangle([1, 4, 9]));
    }

    #[test]
    fn test_mean_depth_and_z_index() {
        let mut group = DepthGroup::new(GroupKey::Surface, HandleId(0));
        group.add_member(0, 10.0);
        group.add_member(1, 20.0);
        assert_eq!(group.len(), 2);
        assert_eq!(group.mean_depth(), 15.0);
        assert_eq!(group.z_index(), -15.0);
    }

    #[test]
    fn test_rotate_resets_frame_state() {
        let mut group = DepthGroup::new(GroupKey::Surface, HandleId(0));
        let seg = AnimatedSegment::still(Segment::new(DVec2::ZERO, DVec2::X));
        group.add_member(0, 1.0);
        group.push_edges([seg]);
        group.push_contours([seg, seg]);

        group.rotate();

        assert!(group.is_empty());
        assert!(group.edges().is_empty());
        assert!(group.contours().is_empty());
        assert_eq!(group.mean_depth(), 0.0);
        assert_eq!(group.handle(), HandleId(0));
    }
}
