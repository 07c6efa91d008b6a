//! Point types and line segments

use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A unit-length 3D direction
pub type UnitVector3f = Unit<Vector3<f32>>;

/// Lengths at or below this are treated as zero when normalizing.
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Normalize `v`, returning `None` when it is too short to carry a direction.
pub fn try_normalize(v: &Vector3f) -> Option<UnitVector3f> {
    Unit::try_new(*v, GEOMETRY_EPSILON)
}

/// A straight segment between two points, the display primitive for axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point3f,
    pub end: Point3f,
}

impl LineSegment {
    pub fn new(start: Point3f, end: Point3f) -> Self {
        Self { start, end }
    }

    /// Segment starting at `origin` running `length` along `direction`
    pub fn from_direction(origin: Point3f, direction: &UnitVector3f, length: f32) -> Self {
        Self {
            start: origin,
            end: origin + direction.into_inner() * length,
        }
    }

    pub fn vector(&self) -> Vector3f {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.vector().norm()
    }

    /// Unit direction from start to end, `None` for a collapsed segment
    pub fn direction(&self) -> Option<UnitVector3f> {
        try_normalize(&self.vector())
    }
}
