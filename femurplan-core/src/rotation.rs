//! The two coupled rotational degrees of freedom

use crate::point::{UnitVector3f, Vector3f};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which correction a rotation request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationAxis {
    /// Coronal-plane correction, about the pivot's local Z ("roll")
    VarusValgus,
    /// Sagittal-plane correction, about the pivot's local X ("pitch")
    FlexionExtension,
}

impl RotationAxis {
    pub const BOTH: [RotationAxis; 2] = [RotationAxis::VarusValgus, RotationAxis::FlexionExtension];

    /// The axis driven in lock-step with this one
    pub fn coupled(self) -> Self {
        match self {
            RotationAxis::VarusValgus => RotationAxis::FlexionExtension,
            RotationAxis::FlexionExtension => RotationAxis::VarusValgus,
        }
    }

    /// Axis of rotation in the pivot's own frame
    pub fn local_axis(self) -> UnitVector3f {
        match self {
            RotationAxis::VarusValgus => Vector3f::z_axis(),
            RotationAxis::FlexionExtension => Vector3f::x_axis(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RotationAxis::VarusValgus => "Varus/Valgus",
            RotationAxis::FlexionExtension => "Flexion/Extension",
        }
    }
}

impl fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sense of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}
