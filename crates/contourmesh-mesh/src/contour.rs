//! Iso-line extraction over triangles.
//!
//! A tick level `t` crosses a triangle edge `(v1, v2)` when `v1 != v2` and `t`
//! lies in the half-open range `[min(v1, v2), max(v1, v2))`. The half-open range
//! keeps a level that touches a vertex from being counted on both edges that
//! meet there. A triangle yields a segment only when exactly two of its edges
//! are crossed.

use std::collections::BTreeMap;

use contourmesh_core::{AnimatedSegment, FieldAxis, Segment};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Supplies the ordered tick levels of an axis.
pub trait TickSource {
    /// Returns the levels of `axis` for a field spanning `extent`.
    fn ticks(&self, axis: FieldAxis, extent: (f64, f64)) -> Vec<f64>;
}

impl<F> TickSource for F
where
    F: Fn(FieldAxis, (f64, f64)) -> Vec<f64>,
{
    fn ticks(&self, axis: FieldAxis, extent: (f64, f64)) -> Vec<f64> {
        self(axis, extent)
    }
}

/// Fixed tick lists per axis. Axes without a list have no ticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedTicks {
    levels: BTreeMap<FieldAxis, Vec<f64>>,
}

impl FixedTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the levels of one axis; they are sorted and deduplicated.
    #[must_use]
    pub fn with_levels(mut self, axis: FieldAxis, mut levels: Vec<f64>) -> Self {
        levels.retain(|t| t.is_finite());
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        self.levels.insert(axis, levels);
        self
    }
}

impl TickSource for FixedTicks {
    fn ticks(&self, axis: FieldAxis, _extent: (f64, f64)) -> Vec<f64> {
        self.levels.get(&axis).cloned().unwrap_or_default()
    }
}

/// Upper bound on the number of levels an [`IntervalTicks`] produces.
pub const MAX_INTERVAL_TICKS: usize = 10_000;

/// Levels at every multiple of `interval` inside the field extent.
///
/// An extent holding more than [`MAX_INTERVAL_TICKS`] levels yields none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalTicks {
    pub interval: f64,
}

impl IntervalTicks {
    pub fn new(interval: f64) -> Self {
        Self { interval }
    }
}

impl TickSource for IntervalTicks {
    fn ticks(&self, _axis: FieldAxis, (min, max): (f64, f64)) -> Vec<f64> {
        if self.interval.is_nan()
            || self.interval <= 0.0
            || !min.is_finite()
            || !max.is_finite()
            || max < min
        {
            return Vec::new();
        }
        let first = (min / self.interval).ceil();
        let last = (max / self.interval).floor();
        if !first.is_finite() || !last.is_finite() || last < first {
            return Vec::new();
        }
        let span = last - first;
        if span >= MAX_INTERVAL_TICKS as f64 {
            log::warn!(
                "interval {} over [{min}, {max}] exceeds {MAX_INTERVAL_TICKS} levels; no ticks",
                self.interval
            );
            return Vec::new();
        }
        #[allow(clippy::cast_sign_loss)]
        let count = span as usize + 1;
        (0..count)
            .map(|i| (first + i as f64) * self.interval)
            .collect()
    }
}

/// Returns the interpolation parameter where `t` crosses `v1 → v2`, if it does.
pub fn crossing(v1: f64, v2: f64, t: f64) -> Option<f64> {
    if v1 == v2 {
        return None;
    }
    let (lo, hi) = if v1 < v2 { (v1, v2) } else { (v2, v1) };
    (lo <= t && t < hi).then(|| (t - v1) / (v2 - v1))
}

/// Extracts the iso-line segment of one tick level through a triangle.
///
/// Crossings interpolate both the current and the previous screen positions so
/// the segment can be animated.
pub fn triangle_segment(
    values: [f64; 3],
    current: [DVec2; 3],
    previous: [DVec2; 3],
    tick: f64,
) -> Option<AnimatedSegment> {
    let mut now = Vec::with_capacity(3);
    let mut before = Vec::with_capacity(3);

    for i in 0..3 {
        let j = (i + 1) % 3;
        if let Some(q) = crossing(values[i], values[j], tick) {
            now.push(current[i].lerp(current[j], q));
            before.push(previous[i].lerp(previous[j], q));
        }
    }

    match (now.as_slice(), before.as_slice()) {
        ([a, b], [pa, pb]) => Some(AnimatedSegment::new(
            Segment::new(*pa, *pb),
            Segment::new(*a, *b),
        )),
        _ => None,
    }
}

/// Extracts the iso-line segments of every tick level through a triangle.
pub fn triangle_segments(
    values: [f64; 3],
    current: [DVec2; 3],
    previous: [DVec2; 3],
    ticks: &[f64],
) -> Vec<AnimatedSegment> {
    ticks
        .iter()
        .filter_map(|&t| triangle_segment(values, current, previous, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const POINTS: [DVec2; 3] = [DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)];

    #[test]
    fn test_half_open_crossing() {
        assert_eq!(crossing(0.0, 1.0, 0.5), Some(0.5));
        assert_eq!(crossing(1.0, 0.0, 0.25), Some(0.75));
        assert_eq!(crossing(0.0, 1.0, 0.0), Some(0.0));
        assert_eq!(crossing(0.0, 1.0, 1.0), None);
        assert_eq!(crossing(1.0, 1.0, 1.0), None);
    }

    #[test]
    fn test_single_segment_through_midpoints() {
        let segment = triangle_segment([0.0, 0.0, 1.0], POINTS, POINTS, 0.5).unwrap();
        // crossings on edges 1-2 and 2-0, both at q = 0.5
        assert_eq!(segment.current.start, DVec2::new(1.0, 1.0));
        assert_eq!(segment.current.end, DVec2::new(0.0, 1.0));
        assert_eq!(segment.previous, segment.current);
    }

    #[test]
    fn test_level_at_vertex_max_is_not_crossed() {
        assert!(triangle_segment([0.0, 1.0, 1.0], POINTS, POINTS, 1.0).is_none());
    }

    #[test]
    fn test_previous_positions_interpolated() {
        let previous = POINTS.map(|p| p + DVec2::new(10.0, 0.0));
        let segment = triangle_segment([0.0, 0.0, 1.0], POINTS, previous, 0.5).unwrap();
        assert_eq!(segment.previous.start, DVec2::new(11.0, 1.0));
        assert_eq!(segment.previous.end, DVec2::new(10.0, 1.0));
    }

    #[test]
    fn test_segments_per_tick() {
        let segments = triangle_segments([0.0, 1.0, 2.0], POINTS, POINTS, &[0.5, 1.5, 5.0]);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_fixed_ticks() {
        let ticks = FixedTicks::new().with_levels(FieldAxis::Value, vec![2.0, 1.0, 2.0, f64::NAN]);
        assert_eq!(ticks.ticks(FieldAxis::Value, (0.0, 1.0)), vec![1.0, 2.0]);
        assert!(ticks.ticks(FieldAxis::X, (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_interval_ticks() {
        let ticks = IntervalTicks::new(0.5);
        assert_eq!(ticks.ticks(FieldAxis::Value, (0.2, 1.6)), vec![0.5, 1.0, 1.5]);
        assert_eq!(ticks.ticks(FieldAxis::Value, (-1.0, 0.0)), vec![-1.0, -0.5, 0.0]);
        assert!(ticks.ticks(FieldAxis::Value, (0.1, 0.2)).is_empty());
        assert!(IntervalTicks::new(0.0).ticks(FieldAxis::Value, (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_interval_ticks_huge_extent() {
        let ticks = IntervalTicks::new(1.0);
        assert!(ticks.ticks(FieldAxis::Value, (0.0, 1e20)).is_empty());
        assert!(IntervalTicks::new(0.5)
            .ticks(FieldAxis::Value, (0.0, 1e12))
            .is_empty());
        assert!(IntervalTicks::new(1e-300)
            .ticks(FieldAxis::Value, (0.0, 1e300))
            .is_empty());

        let at_limit = ticks.ticks(FieldAxis::Value, (0.0, (MAX_INTERVAL_TICKS - 1) as f64));
        assert_eq!(at_limit.len(), MAX_INTERVAL_TICKS);
    }

    #[test]
    fn test_closure_ticks() {
        let ticks = |_axis: FieldAxis, (lo, hi): (f64, f64)| vec![(lo + hi) / 2.0];
        assert_eq!(ticks.ticks(FieldAxis::Y, (0.0, 4.0)), vec![2.0]);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_segment_per_level(
            values in proptest::array::uniform3(-10.0..10.0f64),
            tick in -10.0..10.0f64,
        ) {
            let mut crossings = 0;
            for i in 0..3 {
                if crossing(values[i], values[(i + 1) % 3], tick).is_some() {
                    crossings += 1;
                }
            }
            // a plane meets a triangle boundary an even number of times
            prop_assert!(crossings == 0 || crossings == 2);
            prop_assert_eq!(
                triangle_segment(values, POINTS, POINTS, tick).is_some(),
                crossings == 2
            );
        }
    }
}
