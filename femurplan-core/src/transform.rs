//! Rigid transformation utilities

use crate::point::{Point3f, UnitVector3f, Vector3f};
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A rigid placement (rotation followed by translation) of a frame in space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub isometry: Isometry3<f32>,
}

impl Pose {
    /// Create an identity pose
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    /// Create a pose located at `position` with no rotation
    pub fn at(position: Point3f) -> Self {
        Self::from_translation_rotation(position.coords, UnitQuaternion::identity())
    }

    /// Create a pose from a translation and a rotation
    pub fn from_translation_rotation(
        translation: Vector3f,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(translation), rotation),
        }
    }

    pub fn position(&self) -> Point3f {
        Point3f::from(self.isometry.translation.vector)
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.isometry.rotation
    }

    /// Rotate the frame about one of its own axes, keeping its position.
    ///
    /// `local_axis` is expressed in this pose's frame, so successive calls
    /// accumulate as `rotation * delta`.
    pub fn rotate_local(&mut self, local_axis: &UnitVector3f, angle_rad: f32) {
        let delta = UnitQuaternion::from_axis_angle(local_axis, angle_rad);
        self.isometry.rotation *= delta;
    }

    /// Direction of `local_axis` in the parent frame
    pub fn axis_in_parent(&self, local_axis: &UnitVector3f) -> UnitVector3f {
        self.isometry.rotation * *local_axis
    }

    /// Apply the pose to a point
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        self.isometry.transform_point(point)
    }

    /// Apply the pose's rotation to a vector
    pub fn transform_vector(&self, vector: &Vector3f) -> Vector3f {
        self.isometry.transform_vector(vector)
    }

    /// Compose this pose with a child pose expressed in this frame
    pub fn compose(self, child: Self) -> Self {
        Self {
            isometry: self.isometry * child.isometry,
        }
    }

    pub fn inverse(self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    /// Express `world` relative to this frame, so that `self * result == world`
    pub fn relative(&self, world: &Self) -> Self {
        self.inverse().compose(*world)
    }

    /// Check if this is approximately the identity pose
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.isometry.translation.vector.norm() < epsilon
            && self.isometry.rotation.angle() < epsilon
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Pose {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}
