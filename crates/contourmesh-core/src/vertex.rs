//! Samples, vertex validation, and per-vertex position buffers.
//!
//! A [`Sample`] is raw caller input where every field may be missing. Samples are
//! validated into [`Vertex`] records; rejected samples keep their slot in the
//! [`VertexSet`] so that indices stay stable for triangle references.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::field::FieldAxis;

/// A raw input sample carrying a scalar field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    pub value: Option<f64>,
    /// Extra named fields that can be contoured.
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl Sample {
    /// Creates a 2-D sample.
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
            value: Some(value),
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a 3-D sample.
    pub fn new_3d(x: f64, y: f64, z: f64, value: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::new(x, y, value)
        }
    }

    /// Attaches an extra named field.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

/// Why a sample was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A required field is absent.
    Missing(FieldAxis),
    /// A required field is NaN or infinite.
    NonFinite(FieldAxis),
    /// A field on a logarithmic axis is zero or negative.
    NonPositive(FieldAxis),
}

/// A sample that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub value: f64,
    pub attributes: BTreeMap<String, f64>,
}

impl Vertex {
    /// Reads a field by attribute name.
    ///
    /// The built-in names `x`, `y`, `z` and `value` take precedence over extra
    /// attributes of the same name.
    pub fn field(&self, attribute: &str) -> Option<f64> {
        match attribute {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "z" => self.z,
            "value" => Some(self.value),
            other => self.attributes.get(other).copied(),
        }
    }
}

fn require(field: Option<f64>, axis: FieldAxis) -> Result<f64, RejectReason> {
    match field {
        None => Err(RejectReason::Missing(axis)),
        Some(v) if !v.is_finite() => Err(RejectReason::NonFinite(axis)),
        Some(v) => Ok(v),
    }
}

/// Validates a single sample.
///
/// `x`, `y` and `value` must be present and finite; `z` is only required when
/// the mesh is built in pseudo-3D mode.
pub fn validate(sample: &Sample, is_3d: bool) -> Result<Vertex, RejectReason> {
    let x = require(sample.x, FieldAxis::X)?;
    let y = require(sample.y, FieldAxis::Y)?;
    let z = if is_3d {
        Some(require(sample.z, FieldAxis::Z)?)
    } else {
        sample.z.filter(|z| z.is_finite())
    };
    let value = require(sample.value, FieldAxis::Value)?;

    Ok(Vertex {
        x,
        y,
        z,
        value,
        attributes: sample.attributes.clone(),
    })
}

/// Samples rejected during validation, by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub rejected: Vec<(usize, RejectReason)>,
}

impl ValidationReport {
    /// Returns the number of rejected samples.
    pub fn len(&self) -> usize {
        self.rejected.len()
    }

    /// Returns true if every sample passed.
    pub fn is_empty(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// The validated vertex set of one rebuild.
#[derive(Debug, Clone, Default)]
pub struct VertexSet {
    vertices: Vec<Option<Vertex>>,
    report: ValidationReport,
}

impl VertexSet {
    /// Validates every sample, keeping rejected ones as empty slots.
    pub fn from_samples(samples: &[Sample], is_3d: bool) -> Self {
        let mut report = ValidationReport::default();
        let vertices = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| match validate(sample, is_3d) {
                Ok(vertex) => Some(vertex),
                Err(reason) => {
                    report.rejected.push((i, reason));
                    None
                }
            })
            .collect();

        if !report.is_empty() {
            log::debug!(
                "dropped {} of {} samples during validation",
                report.len(),
                samples.len()
            );
        }

        Self { vertices, report }
    }

    /// Returns the number of slots (valid or not).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of valid vertices.
    pub fn num_valid(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_some()).count()
    }

    /// Returns the vertex at `index` if it exists and is valid.
    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index).and_then(Option::as_ref)
    }

    /// Returns true if `index` refers to a valid vertex.
    pub fn is_valid(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Iterates over valid vertices with their indices.
    pub fn iter_valid(&self) -> impl Iterator<Item = (usize, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i, v)))
    }

    /// Rejects vertices whose `axis` field is zero or negative.
    ///
    /// Used when the field is mapped through a logarithmic axis. Rejected
    /// vertices are added to the report.
    pub fn reject_non_positive(&mut self, axis: FieldAxis) {
        let mut dropped = 0;
        for (i, slot) in self.vertices.iter_mut().enumerate() {
            let non_positive = slot
                .as_ref()
                .and_then(|v| v.field(axis.name()))
                .is_some_and(|v| v <= 0.0);
            if non_positive {
                *slot = None;
                self.report.rejected.push((i, RejectReason::NonPositive(axis)));
                dropped += 1;
            }
        }
        if dropped > 0 {
            self.report.rejected.sort_by_key(|(i, _)| *i);
            log::debug!("dropped {dropped} samples with non-positive {axis} on a log axis");
        }
    }

    /// Returns the validation report.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Returns the extent of a field over valid vertices.
    pub fn extremes(&self, attribute: &str) -> Option<(f64, f64)> {
        self.iter_valid()
            .filter_map(|(_, v)| v.field(attribute))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Double-buffered projected positions, one slot per vertex index.
///
/// The current buffer is written by the translator every frame. At end of frame
/// the buffers are swapped so the positions just drawn become the previous
/// positions the renderer tweens from on the next frame.
#[derive(Debug, Clone, Default)]
pub struct PositionBuffers {
    current: Vec<Option<DVec3>>,
    previous: Vec<Option<DVec3>>,
    flat: Vec<Option<DVec3>>,
}

impl PositionBuffers {
    /// Creates empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the current buffer and sizes it for `len` vertices.
    pub fn begin_frame(&mut self, len: usize) {
        self.current.clear();
        self.current.resize(len, None);
        self.flat.clear();
        self.flat.resize(len, None);
    }

    /// Stores a vertex's pre-projection plot position and its screen position.
    pub fn set(&mut self, index: usize, flat: DVec3, screen: DVec3) {
        if index >= self.current.len() {
            self.current.resize(index + 1, None);
            self.flat.resize(index + 1, None);
        }
        self.current[index] = Some(screen);
        self.flat[index] = Some(flat);
    }

    /// Returns the current screen position.
    pub fn current(&self, index: usize) -> Option<DVec3> {
        self.current.get(index).copied().flatten()
    }

    /// Returns the previous screen position, falling back to the current one
    /// for vertices that had none.
    pub fn previous(&self, index: usize) -> Option<DVec3> {
        self.previous
            .get(index)
            .copied()
            .flatten()
            .or_else(|| self.current(index))
    }

    /// Returns the pre-projection plot position.
    pub fn flat(&self, index: usize) -> Option<DVec3> {
        self.flat.get(index).copied().flatten()
    }

    /// Returns the number of current slots.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true if no slots are allocated.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Promotes the current positions to previous.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }
}
