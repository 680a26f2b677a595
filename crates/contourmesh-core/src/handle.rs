//! Draw handles shared with the external renderer.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a renderer node that persists across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u64);

/// Monotonic allocator for [`HandleId`]s.
///
/// Ids are never reused, so a renderer can release a node by id without racing
/// a new node that took its place.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh handle.
    pub fn allocate(&mut self) -> HandleId {
        let id = HandleId(self.next);
        self.next += 1;
        id
    }

    /// Returns how many handles were handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_ne!(a, b);
        assert_eq!(alloc.allocated(), 2);
    }
}
