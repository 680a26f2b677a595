//! Field axes and contour specifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContourError;

/// The axis a scalar field is read along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldAxis {
    /// Horizontal model coordinate.
    X,
    /// Vertical model coordinate.
    Y,
    /// Depth model coordinate (pseudo-3D only).
    Z,
    /// The colored scalar value.
    Value,
}

impl FieldAxis {
    /// Returns the attribute name this axis is read from by default.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldAxis::X => "x",
            FieldAxis::Y => "y",
            FieldAxis::Z => "z",
            FieldAxis::Value => "value",
        }
    }
}

impl fmt::Display for FieldAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldAxis {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(FieldAxis::X),
            "y" => Ok(FieldAxis::Y),
            "z" => Ok(FieldAxis::Z),
            "value" => Ok(FieldAxis::Value),
            other => Err(ContourError::UnknownAttribute(other.to_string())),
        }
    }
}

/// A request for iso-lines along one field.
///
/// The axis decides which tick positions are used as contour levels; the
/// attribute names the vertex field those levels are compared against. For the
/// built-in axes the attribute is normally the axis name, but any extra sample
/// attribute can be contoured against an axis' ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourSpec {
    /// Axis providing the tick levels.
    pub axis: FieldAxis,
    /// Vertex attribute the levels are compared against.
    pub attribute: String,
}

impl ContourSpec {
    /// Creates a spec reading the axis' own attribute.
    pub fn new(axis: FieldAxis) -> Self {
        Self {
            axis,
            attribute: axis.name().to_string(),
        }
    }

    /// Creates a spec reading a named attribute against the axis' ticks.
    pub fn with_attribute(axis: FieldAxis, attribute: impl Into<String>) -> Self {
        Self {
            axis,
            attribute: attribute.into(),
        }
    }
}
