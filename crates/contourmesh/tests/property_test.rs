//! Property tests over randomly generated grids.

use contourmesh::*;
use proptest::prelude::*;

fn grid_series(width: usize, values: &[f64], show_edges: bool) -> ContourSeries {
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::new((i % width) as f64, (i / width) as f64, v))
        .collect();
    ContourSeries::new(
        "grid",
        samples,
        ContourOptions::new()
            .with_grid_width(width)
            .with_edges(show_edges)
            .with_contour(ContourSpec::new(FieldAxis::Value)),
    )
}

fn grid_strategy() -> impl Strategy<Value = (usize, Vec<f64>)> {
    (2usize..7, 2usize..7).prop_flat_map(|(width, height)| {
        (
            Just(width),
            proptest::collection::vec(-10.0..10.0f64, width * height),
        )
    })
}

proptest! {
    #[test]
    fn prop_flat_triangles_face_one_way((width, values) in grid_strategy()) {
        let frame = Engine::new().render(&grid_series(width, &values, false));
        let height = values.len() / width;
        prop_assert_eq!(frame.triangles().count(), 2 * (width - 1) * (height - 1));
        for (path, _) in frame.triangles() {
            let [a, b, c] = path.current;
            prop_assert!((b - a).perp_dot(c - a) <= 0.0);
        }
    }

    #[test]
    fn prop_boundary_drawn_once((width, values) in grid_strategy()) {
        let frame = Engine::new().render(&grid_series(width, &values, true));
        let height = values.len() / width;
        let edges: Vec<&AnimatedSegment> = frame.edge_segments().collect();
        prop_assert_eq!(edges.len(), 2 * (width - 1) + 2 * (height - 1));
    }

    #[test]
    fn prop_render_is_idempotent(
        (width, values) in grid_strategy(),
        interval in 0.5..5.0f64,
    ) {
        let series = grid_series(width, &values, true);
        let mut engine = Engine::new().with_ticks(IntervalTicks::new(interval));
        let first = engine.render(&series);
        let second = engine.render(&series);
        prop_assert_eq!(&first.commands, &second.commands);
        prop_assert!(second.created.is_empty());
        prop_assert!(second.released.is_empty());
    }

    #[test]
    fn prop_handles_released_once(
        (width, values) in grid_strategy(),
        keep in 0usize..4,
    ) {
        let mut series = grid_series(width, &values, false);
        let mut engine = Engine::new();
        let first = engine.render(&series);

        // shrink to an explicit subset of the same triangles
        let triangles: Vec<[u32; 3]> = vec![[0, 1, width as u32]; keep];
        series.options_mut().triangles = Some(TriangleList::Triples(triangles));
        let second = engine.render(&series);
        let third = engine.render(&series);

        let mut released = second.released.clone();
        released.extend(third.released.iter().copied());
        let mut unique = released.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), released.len());
        prop_assert!(released.iter().all(|h| first.created.contains(h)));
    }
}
