//! Coupled varus/valgus and flexion/extension rotation controls
//!
//! Each correction plane hangs off its own pivot frame. The varus/valgus
//! pivot sits above the femur center along world Z and turns about its local
//! Z; the flexion/extension pivot sits beside it along world X and turns about
//! its local X. A request on either axis steps both pivots in the same
//! direction, and is rejected as a whole if either would leave the clamp.

use crate::config::PlanningConfig;
use crate::frame::{Plane, PlaneKind};
use femurplan_core::{
    Direction, Error, Point3f, Pose, Result, RotationAxis, UnitVector3f, Vector3f,
};
use serde::Serialize;

/// A frame a correction plane is attached to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationPivot {
    pub axis: RotationAxis,
    pub pose: Pose,
    pub angle_deg: i32,
    /// Plane pose relative to the pivot
    pub plane_offset: Pose,
    pub plane_size: f32,
}

impl RotationPivot {
    /// Attach `plane` to a new pivot at `position`, preserving the plane's world pose
    pub fn attach(axis: RotationAxis, position: Point3f, plane: &Plane) -> Self {
        let pose = Pose::at(position);
        Self {
            axis,
            pose,
            angle_deg: 0,
            plane_offset: pose.relative(&plane.pose()),
            plane_size: plane.size,
        }
    }

    /// Rotation axis in world space
    pub fn world_axis(&self) -> UnitVector3f {
        self.pose.axis_in_parent(&self.axis.local_axis())
    }

    /// World pose of the attached plane
    pub fn plane_pose(&self) -> Pose {
        self.pose * self.plane_offset
    }

    pub fn plane(&self) -> Plane {
        let kind = match self.axis {
            RotationAxis::VarusValgus => PlaneKind::VarusValgus,
            RotationAxis::FlexionExtension => PlaneKind::FlexionExtension,
        };
        Plane::from_pose(kind, &self.plane_pose(), self.plane_size)
    }

    fn turn(&mut self, step_deg: i32) {
        self.pose
            .rotate_local(&self.axis.local_axis(), (step_deg as f32).to_radians());
        self.angle_deg += step_deg;
    }
}

/// Current displayed angles, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RotationAngles {
    pub varus_valgus: i32,
    pub flexion_extension: i32,
}

impl RotationAngles {
    pub fn get(&self, axis: RotationAxis) -> i32 {
        match axis {
            RotationAxis::VarusValgus => self.varus_valgus,
            RotationAxis::FlexionExtension => self.flexion_extension,
        }
    }
}

/// Two pivots driven in lock-step under a shared clamp
#[derive(Debug, Clone, PartialEq)]
pub struct RotationEngine {
    varus_valgus: RotationPivot,
    flexion_extension: RotationPivot,
    min_deg: i32,
    max_deg: i32,
    step_deg: i32,
}

impl RotationEngine {
    /// Attach both correction planes to pivots offset from `femur_center`
    pub fn setup(
        femur_center: Point3f,
        varus_valgus_plane: &Plane,
        flexion_extension_plane: &Plane,
        config: &PlanningConfig,
    ) -> Self {
        let offset = config.pivot_offset;
        let varus_valgus = RotationPivot::attach(
            RotationAxis::VarusValgus,
            femur_center + Vector3f::z() * offset,
            varus_valgus_plane,
        );
        let flexion_extension = RotationPivot::attach(
            RotationAxis::FlexionExtension,
            femur_center + Vector3f::x() * offset,
            flexion_extension_plane,
        );
        log::info!("Rotation controls set up for both Varus/Valgus and Flexion/Extension planes.");

        Self {
            varus_valgus,
            flexion_extension,
            min_deg: config.min_rotation_deg,
            max_deg: config.max_rotation_deg,
            step_deg: config.rotation_step_deg,
        }
    }

    pub fn pivot(&self, axis: RotationAxis) -> &RotationPivot {
        match axis {
            RotationAxis::VarusValgus => &self.varus_valgus,
            RotationAxis::FlexionExtension => &self.flexion_extension,
        }
    }

    fn pivot_mut(&mut self, axis: RotationAxis) -> &mut RotationPivot {
        match axis {
            RotationAxis::VarusValgus => &mut self.varus_valgus,
            RotationAxis::FlexionExtension => &mut self.flexion_extension,
        }
    }

    pub fn angle(&self, axis: RotationAxis) -> i32 {
        self.pivot(axis).angle_deg
    }

    pub fn angles(&self) -> RotationAngles {
        RotationAngles {
            varus_valgus: self.varus_valgus.angle_deg,
            flexion_extension: self.flexion_extension.angle_deg,
        }
    }

    pub fn plane(&self, axis: RotationAxis) -> Plane {
        self.pivot(axis).plane()
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min_deg, self.max_deg)
    }

    /// Step `which` by one increment in `direction`, mirroring the step onto
    /// the coupled axis.
    ///
    /// Both clamps are checked before either pivot moves; on rejection no
    /// state changes.
    pub fn rotate(&mut self, which: RotationAxis, direction: Direction) -> Result<RotationAngles> {
        let step = direction.sign() * self.step_deg;

        for axis in [which, which.coupled()] {
            let current = self.angle(axis);
            let in_range = current
                .checked_add(step)
                .is_some_and(|attempted| (self.min_deg..=self.max_deg).contains(&attempted));
            if !in_range {
                return Err(Error::RotationClamped {
                    axis,
                    attempted: current.saturating_add(step),
                    min: self.min_deg,
                    max: self.max_deg,
                });
            }
        }

        for axis in [which, which.coupled()] {
            self.pivot_mut(axis).turn(step);
            log::debug!("{} rotated to {}°", axis, self.angle(axis));
        }

        Ok(self.angles())
    }
}
