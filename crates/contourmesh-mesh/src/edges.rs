//! Directed edge bookkeeping for the boundary overlay.

use std::collections::HashMap;

/// Counts directed triangle edges across a mesh.
///
/// Triangles are added in winding order, so an edge shared by two consistently
/// oriented triangles appears once in each direction. An edge whose reverse
/// never appears lies on the mesh boundary.
#[derive(Debug, Clone, Default)]
pub struct EdgeAccountant {
    counts: HashMap<(u32, u32), u32>,
}

impl EdgeAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an accountant over all `triangles`.
    pub fn from_triangles<'a>(triangles: impl IntoIterator<Item = &'a [u32; 3]>) -> Self {
        let mut accountant = Self::new();
        for triangle in triangles {
            accountant.add_triangle(*triangle);
        }
        accountant
    }

    /// Records the three directed edges of a triangle.
    pub fn add_triangle(&mut self, [a, b, c]: [u32; 3]) {
        for key in [(a, b), (b, c), (c, a)] {
            *self.counts.entry(key).or_insert(0) += 1;
        }
    }

    /// Returns the remaining count of a directed edge.
    pub fn count(&self, a: u32, b: u32) -> u32 {
        self.counts.get(&(a, b)).copied().unwrap_or(0)
    }

    /// Returns the number of occurrences of an edge in either direction.
    pub fn undirected_count(&self, a: u32, b: u32) -> u32 {
        if a == b {
            self.count(a, b)
        } else {
            self.count(a, b) + self.count(b, a)
        }
    }

    /// Returns true if `(a, b)` occurs and its reverse does not.
    pub fn is_boundary(&self, a: u32, b: u32) -> bool {
        self.count(a, b) > 0 && self.count(b, a) == 0
    }

    /// Consumes one occurrence of a boundary edge.
    ///
    /// Returns true only on the last occurrence, so a boundary edge listed by
    /// several triangles is drawn exactly once. Interior edges are left alone
    /// and always return false.
    pub fn take_boundary(&mut self, a: u32, b: u32) -> bool {
        if self.count(b, a) != 0 {
            return false;
        }
        match self.counts.get_mut(&(a, b)) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *count == 0
            }
            _ => false,
        }
    }

    /// Consumes the edges of one triangle and returns the boundary edges to draw.
    pub fn take_triangle(&mut self, [a, b, c]: [u32; 3]) -> Vec<(u32, u32)> {
        [(a, b), (b, c), (c, a)]
            .into_iter()
            .filter(|&(from, to)| self.take_boundary(from, to))
            .collect()
    }

    /// Lists every boundary edge, sorted, without consuming counts.
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .counts
            .iter()
            .filter(|&(&(a, b), &count)| count > 0 && self.count(b, a) == 0)
            .map(|(&key, _)| key)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Returns the number of distinct directed edges recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shared_edge_counts() {
        // two triangles sharing the diagonal 1-2
        let triangles = [[0, 2, 1], [1, 2, 3]];
        let edges = EdgeAccountant::from_triangles(&triangles);

        assert_eq!(edges.undirected_count(1, 2), 2);
        assert!(!edges.is_boundary(1, 2));
        assert!(!edges.is_boundary(2, 1));
        for (a, b) in [(0, 2), (1, 0), (2, 3), (3, 1)] {
            assert_eq!(edges.undirected_count(a, b), 1);
            assert!(edges.is_boundary(a, b));
        }
        assert_eq!(edges.boundary_edges(), vec![(0, 2), (1, 0), (2, 3), (3, 1)]);
    }

    #[test]
    fn test_take_draws_each_boundary_once() {
        let triangles = [[0, 2, 1], [1, 2, 3]];
        let mut edges = EdgeAccountant::from_triangles(&triangles);

        let drawn: Vec<_> = triangles
            .iter()
            .flat_map(|&t| edges.take_triangle(t))
            .collect();
        assert_eq!(drawn, vec![(0, 2), (1, 0), (2, 3), (3, 1)]);
    }

    #[test]
    fn test_duplicate_triangle_drawn_on_last_occurrence() {
        let mut edges = EdgeAccountant::new();
        edges.add_triangle([0, 1, 2]);
        edges.add_triangle([0, 1, 2]);

        assert!(edges.take_triangle([0, 1, 2]).is_empty());
        assert_eq!(edges.take_triangle([0, 1, 2]).len(), 3);
        assert!(edges.take_triangle([0, 1, 2]).is_empty());
    }

    fn grid_mesh(width: u32, height: u32) -> Vec<[u32; 3]> {
        let mut triangles = Vec::new();
        for r in 0..height - 1 {
            for c in 0..width - 1 {
                let i00 = r * width + c;
                let i01 = i00 + 1;
                let i10 = i00 + width;
                let i11 = i10 + 1;
                triangles.push([i00, i10, i01]);
                triangles.push([i01, i10, i11]);
            }
        }
        triangles
    }

    proptest! {
        #[test]
        fn prop_grid_boundary_is_perimeter(width in 2u32..8, height in 2u32..8) {
            let triangles = grid_mesh(width, height);
            let mut edges = EdgeAccountant::from_triangles(&triangles);
            let drawn: Vec<_> = triangles
                .iter()
                .flat_map(|&t| edges.take_triangle(t))
                .collect();

            prop_assert_eq!(drawn.len() as u32, 2 * (width - 1) + 2 * (height - 1));
            let mut unique = drawn.clone();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), drawn.len());
        }
    }
}
