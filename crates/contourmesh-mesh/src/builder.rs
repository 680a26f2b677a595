//! Mesh construction strategies.
//!
//! A mesh is built from one of three mutually exclusive sources:
//! - an explicit list of index triples
//! - a regular grid of samples, split per cell along the smoother diagonal
//! - an injected triangulator run over the projected points

use contourmesh_core::{ContourOptions, Layout, PositionBuffers, Result, VertexSet};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Triangulates a set of 2-D points.
///
/// Returns a flat list of index triples into `points`.
pub trait Triangulator {
    fn triangulate(&self, points: &[DVec2]) -> Vec<u32>;
}

impl<F> Triangulator for F
where
    F: Fn(&[DVec2]) -> Vec<u32>,
{
    fn triangulate(&self, points: &[DVec2]) -> Vec<u32> {
        self(points)
    }
}

/// The strategy used to build a mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshStrategy {
    /// Caller-supplied index triples.
    Explicit(Vec<[u32; 3]>),
    /// Samples laid out row-major with the given row length.
    Grid { width: usize },
    /// Delegated triangulation of the projected points.
    Unstructured,
}

impl MeshStrategy {
    /// Resolves the strategy from configuration.
    ///
    /// Explicit triangles win over a grid width, which wins over triangulation.
    /// A flat triangle list with a partial trailing triple is an error only when
    /// `strict_triangles` is set.
    pub fn from_options(options: &ContourOptions) -> Result<Self> {
        Ok(if let Some(triangles) = &options.triangles {
            MeshStrategy::Explicit(triangles.triples(options.strict_triangles)?)
        } else if let Some(width) = options.grid_width {
            MeshStrategy::Grid { width }
        } else {
            MeshStrategy::Unstructured
        })
    }

    /// Returns a short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            MeshStrategy::Explicit(_) => "explicit",
            MeshStrategy::Grid { .. } => "grid",
            MeshStrategy::Unstructured => "unstructured",
        }
    }
}

/// Groups a flat index list into triples, ignoring a trailing partial triple.
pub fn triples_from_flat(indices: &[u32]) -> Vec<[u32; 3]> {
    indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

/// Splits every 2×2 cell of a row-major grid into two triangles.
///
/// For corners `i00 i01 / i10 i11` the diagonal joining the two corners whose
/// values differ least is kept. A cell with an invalid corner always takes the
/// second split; triangles touching the invalid corner are dropped later.
/// A trailing partial row is ignored.
pub fn grid_triangles(vertices: &VertexSet, width: usize) -> Vec<[u32; 3]> {
    let n = vertices.len();
    if width < 2 {
        return Vec::new();
    }
    let rows = n / width;
    if n % width != 0 {
        log::warn!(
            "grid width {width} does not divide {n} samples; ignoring the last {} samples",
            n % width
        );
    }
    if rows < 2 {
        return Vec::new();
    }

    let value = |i: usize| vertices.get(i).map_or(f64::NAN, |v| v.value);
    let mut triangles = Vec::with_capacity((rows - 1) * (width - 1) * 2);

    for r in 0..rows - 1 {
        for c in 0..width - 1 {
            let i00 = r * width + c;
            let i01 = i00 + 1;
            let i10 = i00 + width;
            let i11 = i10 + 1;

            let main = (value(i00) - value(i11)).abs();
            let anti = (value(i01) - value(i10)).abs();

            let [i00, i01, i10, i11] = [i00, i01, i10, i11].map(|i| i as u32);
            if main < anti {
                triangles.push([i00, i01, i11]);
                triangles.push([i00, i11, i10]);
            } else {
                triangles.push([i00, i01, i10]);
                triangles.push([i01, i11, i10]);
            }
        }
    }

    triangles
}

/// Runs the triangulator over the valid vertices' 2-D positions.
///
/// Flat layouts triangulate the screen (x, y); pseudo-3D layouts triangulate the
/// unprojected (x, z) floor plan. Returned indices refer to vertex indices.
pub fn unstructured_triangles(
    vertices: &VertexSet,
    positions: &PositionBuffers,
    layout: Layout,
    triangulator: &dyn Triangulator,
) -> Vec<[u32; 3]> {
    let mut index_map = Vec::with_capacity(vertices.num_valid());
    let mut points = Vec::with_capacity(vertices.num_valid());

    for (i, _) in vertices.iter_valid() {
        let point = match layout {
            Layout::Flat => positions.current(i).map(|p| p.truncate()),
            Layout::Pseudo3d => positions.flat(i).map(|p| DVec2::new(p.x, p.z)),
        };
        if let Some(point) = point {
            index_map.push(i as u32);
            points.push(point);
        }
    }

    if points.len() < 3 {
        return Vec::new();
    }

    triples_from_flat(&triangulator.triangulate(&points))
        .into_iter()
        .filter_map(|t| {
            let a = *index_map.get(t[0] as usize)?;
            let b = *index_map.get(t[1] as usize)?;
            let c = *index_map.get(t[2] as usize)?;
            Some([a, b, c])
        })
        .collect()
}

/// Builds raw (unoriented) triangles with the given strategy.
///
/// Triples referencing invalid or out-of-range vertices are dropped.
pub fn build_triangles(
    strategy: &MeshStrategy,
    vertices: &VertexSet,
    positions: &PositionBuffers,
    layout: Layout,
    triangulator: Option<&dyn Triangulator>,
) -> Vec<[u32; 3]> {
    let raw = match strategy {
        MeshStrategy::Explicit(triangles) => triangles.clone(),
        MeshStrategy::Grid { width } => grid_triangles(vertices, *width),
        MeshStrategy::Unstructured => match triangulator {
            Some(triangulator) => unstructured_triangles(vertices, positions, layout, triangulator),
            None => {
                log::warn!("no triangles, grid width, or triangulator available; mesh is empty");
                Vec::new()
            }
        },
    };

    let total = raw.len();
    let kept: Vec<[u32; 3]> = raw
        .into_iter()
        .filter(|t| t.iter().all(|&i| vertices.is_valid(i as usize)))
        .collect();

    log::debug!(
        "{} strategy built {} triangles ({} dropped)",
        strategy.name(),
        kept.len(),
        total - kept.len()
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use contourmesh_core::{ContourError, Sample};
    use glam::DVec3;

    fn grid(values: &[f64], width: usize) -> VertexSet {
        let samples: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new((i % width) as f64, (i / width) as f64, v))
            .collect();
        VertexSet::from_samples(&samples, false)
    }

    #[test]
    fn test_strategy_precedence() {
        let options = ContourOptions::new()
            .with_grid_width(3)
            .with_triangles(vec![[0, 1, 2]]);
        assert_eq!(
            MeshStrategy::from_options(&options).unwrap(),
            MeshStrategy::Explicit(vec![[0, 1, 2]])
        );
        let options = ContourOptions::new().with_grid_width(3);
        assert_eq!(
            MeshStrategy::from_options(&options).unwrap(),
            MeshStrategy::Grid { width: 3 }
        );
        assert_eq!(
            MeshStrategy::from_options(&ContourOptions::new()).unwrap(),
            MeshStrategy::Unstructured
        );
    }

    #[test]
    fn test_flat_explicit_triangles() {
        let options = ContourOptions::new().with_flat_triangles(vec![0, 1, 2, 2, 1, 3, 9]);
        assert_eq!(
            MeshStrategy::from_options(&options).unwrap(),
            MeshStrategy::Explicit(vec![[0, 1, 2], [2, 1, 3]])
        );

        let strict = options.with_strict_triangles(true);
        assert!(matches!(
            MeshStrategy::from_options(&strict),
            Err(ContourError::SizeMismatch {
                expected: 9,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_flat_triples() {
        assert_eq!(triples_from_flat(&[0, 1, 2, 2, 1, 3, 9]), vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn test_grid_picks_similar_diagonal() {
        // |v00 - v11| = 1 > |v01 - v10| = 0
        let vertices = grid(&[0.0, 0.0, 0.0, 1.0], 2);
        assert_eq!(grid_triangles(&vertices, 2), vec![[0, 1, 2], [1, 3, 2]]);

        // |v00 - v11| = 0 < |v01 - v10| = 1
        let vertices = grid(&[0.0, 1.0, 0.0, 0.0], 2);
        assert_eq!(grid_triangles(&vertices, 2), vec![[0, 1, 3], [0, 3, 2]]);
    }

    #[test]
    fn test_grid_cell_count() {
        let vertices = grid(&[0.0; 12], 4);
        assert_eq!(grid_triangles(&vertices, 4).len(), 2 * 3 * 2);
    }

    #[test]
    fn test_grid_truncates_partial_row() {
        let vertices = grid(&[0.0; 7], 3);
        // two full rows, the seventh sample is ignored
        assert_eq!(grid_triangles(&vertices, 3).len(), 4);
    }

    #[test]
    fn test_grid_degenerate() {
        assert!(grid_triangles(&grid(&[0.0; 3], 3), 3).is_empty());
        assert!(grid_triangles(&grid(&[0.0; 4], 1), 1).is_empty());
        assert!(grid_triangles(&grid(&[0.0; 4], 0), 0).is_empty());
    }

    #[test]
    fn test_build_drops_invalid_references() {
        let mut samples: Vec<Sample> = (0..4)
            .map(|i| Sample::new(f64::from(i % 2), f64::from(i / 2), 0.0))
            .collect();
        samples[3].value = None;
        let vertices = VertexSet::from_samples(&samples, false);
        let strategy = MeshStrategy::Explicit(vec![[0, 1, 2], [1, 3, 2], [0, 1, 7]]);
        let built = build_triangles(
            &strategy,
            &vertices,
            &PositionBuffers::new(),
            Layout::Flat,
            None,
        );
        assert_eq!(built, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_unstructured_maps_back_to_vertex_indices() {
        let mut samples = vec![
            Sample::new(0.0, 0.0, 1.0),
            Sample::new(5.0, 5.0, 1.0),
            Sample::new(1.0, 0.0, 1.0),
            Sample::new(0.0, 1.0, 1.0),
        ];
        samples[1].x = None;
        let vertices = VertexSet::from_samples(&samples, false);
        let mut positions = PositionBuffers::new();
        positions.begin_frame(4);
        for (i, v) in vertices.iter_valid() {
            let p = DVec3::new(v.x, v.y, 0.0);
            positions.set(i, p, p);
        }

        let triangulator = |points: &[DVec2]| {
            assert_eq!(points.len(), 3);
            vec![0, 1, 2, 0, 1, 9]
        };
        let built = build_triangles(
            &MeshStrategy::Unstructured,
            &vertices,
            &positions,
            Layout::Flat,
            Some(&triangulator),
        );
        assert_eq!(built, vec![[0, 2, 3]]);
    }

    #[test]
    fn test_unstructured_pseudo_3d_uses_floor_plan() {
        let samples = vec![
            Sample::new_3d(0.0, 5.0, 0.0, 1.0),
            // no z: rejected in pseudo-3D
            Sample::new(9.0, 9.0, 1.0),
            Sample::new_3d(1.0, 6.0, 0.0, 1.0),
            Sample::new_3d(0.0, 7.0, 1.0, 1.0),
        ];
        let vertices = VertexSet::from_samples(&samples, true);
        assert!(!vertices.is_valid(1));

        let mut positions = PositionBuffers::new();
        positions.begin_frame(4);
        for (i, v) in vertices.iter_valid() {
            let flat = DVec3::new(v.x * 10.0, v.y * 10.0, v.z.unwrap_or_default() * 20.0);
            // every vertex projects onto the same screen point
            positions.set(i, flat, DVec3::new(-1.0, -1.0, 0.0));
        }

        let triangulator = |points: &[DVec2]| {
            assert_eq!(
                points,
                &[
                    DVec2::new(0.0, 0.0),
                    DVec2::new(10.0, 0.0),
                    DVec2::new(0.0, 20.0)
                ]
            );
            vec![0, 1, 2]
        };
        let built = build_triangles(
            &MeshStrategy::Unstructured,
            &vertices,
            &positions,
            Layout::Pseudo3d,
            Some(&triangulator),
        );
        assert_eq!(built, vec![[0, 2, 3]]);
    }

    #[test]
    fn test_unstructured_without_triangulator_is_empty() {
        let vertices = grid(&[0.0; 4], 2);
        let built = build_triangles(
            &MeshStrategy::Unstructured,
            &vertices,
            &PositionBuffers::new(),
            Layout::Flat,
            None,
        );
        assert!(built.is_empty());
    }
}
