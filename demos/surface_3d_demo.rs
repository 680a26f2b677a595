#![allow(clippy::cast_precision_loss)]
//! Pseudo-3D surface demonstration.
//!
//! This demo shows:
//! - A height field laid out in a projected 3-D box
//! - Per-triangle depth groups drawn back to front
//! - Group handles surviving a camera orbit
//!
//! Run with: cargo run --example `surface_3d_demo`

use contourmesh::*;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const DEPTH: f64 = 400.0;

fn height_field(x: f64, z: f64) -> f64 {
    (-(x * x + z * z) / 4.0).exp() * 3.0
}

fn build_series(steps: usize) -> ContourSeries {
    let mut samples = Vec::with_capacity((steps + 1) * (steps + 1));
    for row in 0..=steps {
        let z = -3.0 + 6.0 * row as f64 / steps as f64;
        for col in 0..=steps {
            let x = -3.0 + 6.0 * col as f64 / steps as f64;
            let y = height_field(x, z);
            samples.push(Sample::new_3d(x, y, z, y));
        }
    }

    let options = ContourOptions::new()
        .with_grid_width(steps + 1)
        .with_3d(DEPTH)
        .with_colormap("coolwarm")
        .with_contour(ContourSpec::new(FieldAxis::Value));

    ContourSeries::new("hill", samples, options).with_plot_size(WIDTH, HEIGHT)
}

fn main() {
    init_logging();

    let series = build_series(16);
    let mut camera = CameraProjector::framing(WIDTH, HEIGHT, DEPTH);
    camera.orbit(0.4, -0.3);

    let mut engine = Engine::new()
        .with_projector(camera.clone())
        .with_ticks(IntervalTicks::new(0.5));
    let frame = engine.render(&series);

    let z: Vec<f64> = frame.commands.iter().map(DrawCommand::z_index).collect();
    println!(
        "{} commands, depth range {:.1} .. {:.1}, {} groups",
        frame.commands.len(),
        z.first().copied().unwrap_or_default(),
        z.last().copied().unwrap_or_default(),
        engine.num_groups(),
    );

    // orbit and redraw; groups keep their handles, only the order changes
    camera.orbit(0.8, 0.0);
    engine.set_projector(camera);
    let frame = engine.render(&series);
    println!(
        "after orbit: {} commands, {} created, {} released",
        frame.commands.len(),
        frame.created.len(),
        frame.released.len(),
    );
}
