#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
//! Flat contour plot demonstration.
//!
//! This demo shows:
//! - Generating gridded samples from a field function
//! - Gradient fills, the boundary overlay, and iso-lines at fixed intervals
//! - Delegated triangulation of scattered samples
//! - Animating between two data updates
//!
//! Run with: cargo run --example `contour_demo` [output.json]

use contourmesh::*;
use std::f64::consts::PI;

fn ripple(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt().sin()
}

/// Fan triangulation around the first point; valid for star-shaped point sets.
fn fan_triangulate(points: &[DVec2]) -> Vec<u32> {
    let Some((center, ring)) = points.split_first() else {
        return Vec::new();
    };
    let mut order: Vec<u32> = (1..=ring.len() as u32).collect();
    order.sort_by(|&a, &b| {
        let angle = |i: u32| {
            let d = points[i as usize] - *center;
            d.y.atan2(d.x)
        };
        angle(a).total_cmp(&angle(b))
    });

    let mut indices = Vec::with_capacity(order.len() * 3);
    for (k, &i) in order.iter().enumerate() {
        let j = order[(k + 1) % order.len()];
        indices.extend([0, i, j]);
    }
    indices
}

fn summarize(label: &str, frame: &Frame) {
    let gradients = frame
        .triangles()
        .filter(|(_, fill)| !fill.is_solid())
        .count();
    println!(
        "{label}: {} triangles ({gradients} gradient fills), {} boundary segments, {} contour segments, {} created, {} released",
        frame.triangles().count(),
        frame.edge_segments().count(),
        frame.contour_segments().count(),
        frame.created.len(),
        frame.released.len(),
    );
}

fn main() -> Result<()> {
    init_logging();

    let grid = SampleGrid::new((-2.0 * PI, 2.0 * PI), (-2.0 * PI, 2.0 * PI), 40, 40)?;
    let options = ContourOptions::new()
        .with_edges(true)
        .with_colormap("viridis")
        .with_contour(ContourSpec::new(FieldAxis::Value));
    let mut series = grid.to_series("ripple", ripple, options);

    let mut engine = Engine::new().with_ticks(IntervalTicks::new(0.25));
    let frame = engine.render(&series);
    summarize("ripple", &frame);

    // shift the field; previous positions let a renderer tween the update
    series.set_samples(grid.sample(|x, y| ripple(x - 1.0, y)));
    let frame = engine.render(&series);
    summarize("shifted ripple", &frame);

    if let Some(path) = std::env::args().nth(1) {
        std::fs::write(&path, frame_to_json(&frame)?)?;
        println!("wrote {path}");
    }

    // scattered samples on rings around the origin
    let mut samples = vec![Sample::new(0.0, 0.0, 1.0)];
    for k in 0..24 {
        let angle = 2.0 * PI * f64::from(k) / 24.0;
        let radius = if k % 2 == 0 { 1.0 } else { 0.6 };
        samples.push(Sample::new(
            radius * angle.cos(),
            radius * angle.sin(),
            1.0 - radius,
        ));
    }
    let scattered = ContourSeries::new(
        "scattered",
        samples,
        ContourOptions::new()
            .with_edges(true)
            .with_contour(ContourSpec::new(FieldAxis::Value)),
    );
    let mut engine = Engine::new()
        .with_triangulator(fan_triangulate)
        .with_ticks(FixedTicks::new().with_levels(FieldAxis::Value, vec![0.2, 0.3]));
    summarize("scattered", &engine.render(&scattered));

    Ok(())
}
