//! Mechanical-axis reference frame and the planes built on it

use femurplan_core::{
    try_normalize, Error, LineSegment, Point3f, Pose, Result, UnitVector3f, Vector3f,
};
use nalgebra::UnitQuaternion;
use serde::Serialize;
use std::f32::consts::PI;

/// Local normal of an unrotated plane patch
pub fn canonical_normal() -> UnitVector3f {
    Vector3f::z_axis()
}

/// Unit direction from femur center to hip center
pub fn mechanical_axis(femur_center: &Point3f, hip_center: &Point3f) -> Result<UnitVector3f> {
    try_normalize(&(hip_center - femur_center)).ok_or_else(|| {
        Error::DegenerateGeometry(
            "femur center and hip center coincide, mechanical axis is undefined".to_string(),
        )
    })
}

/// Shortest-arc rotation taking `from` onto `to`.
///
/// Opposite directions have no unique shortest arc; a half turn about world Y
/// is used then.
pub fn rotation_between(from: &UnitVector3f, to: &UnitVector3f) -> UnitQuaternion<f32> {
    UnitQuaternion::rotation_between_axis(from, to)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), PI))
}

/// Orientation whose local Z is the mechanical axis. Roll about the axis is
/// whatever the shortest-arc construction yields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceFrame {
    pub origin: Point3f,
    pub axis: UnitVector3f,
    pub orientation: UnitQuaternion<f32>,
}

impl ReferenceFrame {
    pub fn derive(femur_center: Point3f, hip_center: Point3f) -> Result<Self> {
        let axis = mechanical_axis(&femur_center, &hip_center)?;
        let orientation = rotation_between(&canonical_normal(), &axis);
        log::debug!("Mechanical Axis: {:?}", axis.into_inner());

        Ok(Self {
            origin: femur_center,
            axis,
            orientation,
        })
    }

    /// Plane normal in world space, i.e. the frame's local Z
    pub fn normal(&self) -> UnitVector3f {
        self.orientation * canonical_normal()
    }
}

/// Which reference plane a [`Plane`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaneKind {
    /// Perpendicular to the mechanical axis, never rotated
    MechanicalAxis,
    VarusValgus,
    FlexionExtension,
}

impl PlaneKind {
    pub fn color(self) -> u32 {
        match self {
            PlaneKind::MechanicalAxis => 0xffff00,
            PlaneKind::VarusValgus => 0xff0000,
            PlaneKind::FlexionExtension => 0x00ff00,
        }
    }
}

/// A square display patch. Projection math treats it as infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    pub kind: PlaneKind,
    pub anchor: Point3f,
    pub orientation: UnitQuaternion<f32>,
    pub size: f32,
}

impl Plane {
    pub fn new(kind: PlaneKind, frame: &ReferenceFrame, size: f32) -> Self {
        Self {
            kind,
            anchor: frame.origin,
            orientation: frame.orientation,
            size,
        }
    }

    pub fn from_pose(kind: PlaneKind, pose: &Pose, size: f32) -> Self {
        Self {
            kind,
            anchor: pose.position(),
            orientation: pose.orientation(),
            size,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::from_translation_rotation(self.anchor.coords, self.orientation)
    }

    pub fn normal(&self) -> UnitVector3f {
        self.orientation * canonical_normal()
    }

    /// Corners of the patch in world space, counter-clockwise
    pub fn corners(&self) -> [Point3f; 4] {
        let h = self.size / 2.0;
        let pose = self.pose();
        [(-h, -h), (h, -h), (h, h), (-h, h)]
            .map(|(x, y)| pose.transform_point(&Point3f::new(x, y, 0.0)))
    }
}

/// The three planes derived from the reference frame, all coincident at first
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePlanes {
    pub mechanical_axis: Plane,
    pub varus_valgus: Plane,
    pub flexion_extension: Plane,
}

impl ReferencePlanes {
    pub fn build(frame: &ReferenceFrame, size: f32) -> Self {
        Self {
            mechanical_axis: Plane::new(PlaneKind::MechanicalAxis, frame, size),
            varus_valgus: Plane::new(PlaneKind::VarusValgus, frame, size),
            flexion_extension: Plane::new(PlaneKind::FlexionExtension, frame, size),
        }
    }
}

/// World-aligned short lines from femur center along +X and +Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLines {
    pub x: LineSegment,
    pub z: LineSegment,
}

impl ReferenceLines {
    pub const X_NAME: &'static str = "X-axis 10mm Line";
    pub const Z_NAME: &'static str = "Z-axis 10mm Line";

    pub fn build(femur_center: Point3f, length: f32) -> Self {
        Self {
            x: LineSegment::from_direction(femur_center, &Vector3f::x_axis(), length),
            z: LineSegment::from_direction(femur_center, &Vector3f::z_axis(), length),
        }
    }
}
