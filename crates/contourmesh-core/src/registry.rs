//! Group registry that carries draw-handle continuity across frames.

use std::collections::{HashMap, HashSet};

use crate::group::{DepthGroup, GroupKey};
use crate::handle::{HandleAllocator, HandleId};

/// Registry of the depth groups alive in the last frame.
///
/// Each frame is bracketed by [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame). Groups touched in between keep their handle;
/// new keys get a fresh one; groups not touched are destroyed at end of frame.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<GroupKey, DepthGroup>,
    seen: HashSet<GroupKey>,
    created: Vec<HandleId>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame: every group is reset and marked unseen.
    pub fn begin_frame(&mut self) {
        self.seen.clear();
        self.created.clear();
        for group in self.groups.values_mut() {
            group.rotate();
        }
    }

    /// Returns the group for `key`, creating it if it did not exist last frame.
    pub fn touch(&mut self, key: GroupKey, handles: &mut HandleAllocator) -> &mut DepthGroup {
        let order = self.seen.len();
        let newly_seen = self.seen.insert(key);
        let created = &mut self.created;
        let group = self.groups.entry(key).or_insert_with(|| {
            let handle = handles.allocate();
            created.push(handle);
            DepthGroup::new(key, handle)
        });
        if newly_seen {
            group.set_frame_order(order);
        }
        group
    }

    /// Destroys groups that were not touched this frame.
    ///
    /// Returns the handles of destroyed groups.
    pub fn end_frame(&mut self) -> Vec<HandleId> {
        let seen = &self.seen;
        let mut released: Vec<HandleId> = self
            .groups
            .values()
            .filter(|g| !seen.contains(&g.key()))
            .map(DepthGroup::handle)
            .collect();
        self.groups.retain(|key, _| seen.contains(key));
        released.sort_unstable();

        if !released.is_empty() {
            log::debug!("released {} depth groups", released.len());
        }
        released
    }

    /// Returns the handles created since the frame began.
    pub fn created(&self) -> &[HandleId] {
        &self.created
    }

    /// Gets a group by key.
    pub fn get(&self, key: &GroupKey) -> Option<&DepthGroup> {
        self.groups.get(key)
    }

    /// Returns the live groups in draw order.
    ///
    /// With `depth_sorted`, groups are ordered by ascending z-index (back to
    /// front); ties and flat mode keep build order.
    pub fn ordered(&self, depth_sorted: bool) -> Vec<&DepthGroup> {
        let mut groups: Vec<&DepthGroup> = self
            .groups
            .values()
            .filter(|g| self.seen.contains(&g.key()))
            .collect();
        groups.sort_by_key(|g| g.frame_order());
        if depth_sorted {
            groups.sort_by(|a, b| a.z_index().total_cmp(&b.z_index()));
        }
        groups
    }

    /// Returns the number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Destroys every group, returning their handles.
    pub fn clear(&mut self) -> Vec<HandleId> {
        let mut released: Vec<HandleId> = self.groups.values().map(DepthGroup::handle).collect();
        released.sort_unstable();
        self.groups.clear();
        self.seen.clear();
        self.created.clear();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_survive_frames() {
        let mut handles = HandleAllocator::new();
        let mut registry = GroupRegistry::new();

        registry.begin_frame();
        let a = registry.touch(GroupKey::triangle(0, 1, 2), &mut handles).handle();
        let b = registry.touch(GroupKey::triangle(1, 2, 3), &mut handles).handle();
        assert_eq!(registry.created().len(), 2);
        assert!(registry.end_frame().is_empty());

        registry.begin_frame();
        let a2 = registry.touch(GroupKey::triangle(2, 1, 0), &mut handles).handle();
        let c = registry.touch(GroupKey::triangle(2, 3, 4), &mut handles).handle();
        assert_eq!(registry.created(), &[c]);
        let released = registry.end_frame();

        assert_eq!(a, a2);
        assert_eq!(released, vec![b]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_depth_order() {
        let mut handles = HandleAllocator::new();
        let mut registry = GroupRegistry::new();
        registry.begin_frame();
        registry
            .touch(GroupKey::triangle(0, 1, 2), &mut handles)
            .add_member(0, 1.0);
        registry
            .touch(GroupKey::triangle(1, 2, 3), &mut handles)
            .add_member(1, 5.0);
        registry
            .touch(GroupKey::triangle(2, 3, 4), &mut handles)
            .add_member(2, 3.0);
        registry.end_frame();

        let flat: Vec<usize> = registry
            .ordered(false)
            .iter()
            .map(|g| g.members()[0])
            .collect();
        assert_eq!(flat, vec![0, 1, 2]);

        let sorted: Vec<usize> = registry
            .ordered(true)
            .iter()
            .map(|g| g.members()[0])
            .collect();
        // deepest first
        assert_eq!(sorted, vec![1, 2, 0]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut handles = HandleAllocator::new();
        let mut registry = GroupRegistry::new();
        registry.begin_frame();
        registry.touch(GroupKey::Surface, &mut handles);
        registry.end_frame();
        assert_eq!(registry.clear(), vec![HandleId(0)]);
        assert!(registry.is_empty());
    }
}
