//! The oriented triangle mesh of one rebuild.

use contourmesh_core::{Layout, PositionBuffers, VertexSet};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::builder::{build_triangles, MeshStrategy, Triangulator};
use crate::edges::EdgeAccountant;
use crate::winding;

/// A triangle in winding-corrected order with its mean screen depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshTriangle {
    pub vertices: [u32; 3],
    pub depth: f64,
}

impl MeshTriangle {
    /// Reads a field of all three vertices.
    pub fn field(&self, vertices: &VertexSet, attribute: &str) -> Option<[f64; 3]> {
        let [a, b, c] = self.vertices;
        Some([
            vertices.get(a as usize)?.field(attribute)?,
            vertices.get(b as usize)?.field(attribute)?,
            vertices.get(c as usize)?.field(attribute)?,
        ])
    }

    /// Returns the current screen positions of the vertices.
    pub fn current(&self, positions: &PositionBuffers) -> Option<[DVec2; 3]> {
        let [a, b, c] = self.vertices;
        Some([
            positions.current(a as usize)?.truncate(),
            positions.current(b as usize)?.truncate(),
            positions.current(c as usize)?.truncate(),
        ])
    }

    /// Returns the previous-frame screen positions of the vertices.
    pub fn previous(&self, positions: &PositionBuffers) -> Option<[DVec2; 3]> {
        let [a, b, c] = self.vertices;
        Some([
            positions.previous(a as usize)?.truncate(),
            positions.previous(b as usize)?.truncate(),
            positions.previous(c as usize)?.truncate(),
        ])
    }
}

/// Triangles built from a vertex set, oriented for a layout.
#[derive(Debug, Clone, Default)]
pub struct ContourMesh {
    triangles: Vec<MeshTriangle>,
}

impl ContourMesh {
    /// Builds and orients the mesh.
    ///
    /// Every vertex referenced by a triangle must have a current position;
    /// triangles that do not are dropped.
    pub fn build(
        strategy: &MeshStrategy,
        vertices: &VertexSet,
        positions: &PositionBuffers,
        layout: Layout,
        triangulator: Option<&dyn Triangulator>,
    ) -> Self {
        let triangles = build_triangles(strategy, vertices, positions, layout, triangulator)
            .into_iter()
            .filter_map(|triangle| {
                let [a, b, c] = triangle;
                let screen = [
                    positions.current(a as usize)?,
                    positions.current(b as usize)?,
                    positions.current(c as usize)?,
                ];
                let (vertices, _) =
                    winding::normalize(triangle, screen.map(|p| p.truncate()), layout);
                let depth = (screen[0].z + screen[1].z + screen[2].z) / 3.0;
                Some(MeshTriangle { vertices, depth })
            })
            .collect();

        Self { triangles }
    }

    /// Creates a mesh from already oriented triangles.
    pub fn from_triangles(triangles: Vec<MeshTriangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Counts the directed edges of every triangle.
    pub fn edge_accountant(&self) -> EdgeAccountant {
        let mut accountant = EdgeAccountant::new();
        for triangle in &self.triangles {
            accountant.add_triangle(triangle.vertices);
        }
        accountant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contourmesh_core::Sample;
    use glam::DVec3;

    fn flat_setup(values: &[f64], width: usize) -> (VertexSet, PositionBuffers) {
        let samples: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new((i % width) as f64, (i / width) as f64, v))
            .collect();
        let vertices = VertexSet::from_samples(&samples, false);
        let mut positions = PositionBuffers::new();
        positions.begin_frame(vertices.len());
        for (i, v) in vertices.iter_valid() {
            // screen y grows downwards
            let p = DVec3::new(v.x * 10.0, 100.0 - v.y * 10.0, 0.0);
            positions.set(i, p, p);
        }
        (vertices, positions)
    }

    #[test]
    fn test_grid_scenario() {
        let (vertices, positions) = flat_setup(&[0.0, 0.0, 0.0, 1.0], 2);
        let mesh = ContourMesh::build(
            &MeshStrategy::Grid { width: 2 },
            &vertices,
            &positions,
            Layout::Flat,
            None,
        );
        let triples: Vec<_> = mesh.triangles().iter().map(|t| t.vertices).collect();
        assert_eq!(triples, vec![[0, 1, 2], [1, 3, 2]]);
        for triangle in mesh.triangles() {
            let points = triangle.current(&positions).unwrap();
            assert!(winding::signed_area(points) <= 0.0);
            assert_eq!(triangle.depth, 0.0);
        }
    }

    #[test]
    fn test_orientation_is_corrected() {
        let (vertices, positions) = flat_setup(&[0.0, 0.0, 0.0, 1.0], 2);
        let mesh = ContourMesh::build(
            &MeshStrategy::Explicit(vec![[0, 2, 1]]),
            &vertices,
            &positions,
            Layout::Flat,
            None,
        );
        assert_eq!(mesh.triangles()[0].vertices, [0, 1, 2]);
    }

    #[test]
    fn test_shared_edge_accounting() {
        let (vertices, positions) = flat_setup(&[0.0, 0.0, 0.0, 1.0], 2);
        let mesh = ContourMesh::build(
            &MeshStrategy::Grid { width: 2 },
            &vertices,
            &positions,
            Layout::Flat,
            None,
        );
        let edges = mesh.edge_accountant();
        assert_eq!(edges.undirected_count(1, 2), 2);
        assert_eq!(edges.boundary_edges().len(), 4);
    }

    #[test]
    fn test_field_values() {
        let (vertices, _) = flat_setup(&[0.0, 1.0, 2.0, 3.0], 2);
        let triangle = MeshTriangle {
            vertices: [3, 1, 0],
            depth: 0.0,
        };
        assert_eq!(triangle.field(&vertices, "value"), Some([3.0, 1.0, 0.0]));
        assert_eq!(triangle.field(&vertices, "x"), Some([1.0, 1.0, 0.0]));
        assert_eq!(triangle.field(&vertices, "unknown"), None);
    }

    #[test]
    fn test_mean_depth() {
        let samples: Vec<Sample> = (0..3)
            .map(|i| Sample::new_3d(f64::from(i), 0.0, f64::from(i), 1.0))
            .collect();
        let vertices = VertexSet::from_samples(&samples, true);
        let mut positions = PositionBuffers::new();
        positions.begin_frame(3);
        positions.set(0, DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0));
        positions.set(1, DVec3::ZERO, DVec3::new(1.0, 0.0, 6.0));
        positions.set(2, DVec3::ZERO, DVec3::new(0.0, 1.0, 9.0));
        let mesh = ContourMesh::build(
            &MeshStrategy::Explicit(vec![[0, 1, 2]]),
            &vertices,
            &positions,
            Layout::Pseudo3d,
            None,
        );
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles()[0].depth, 6.0);
    }
}
