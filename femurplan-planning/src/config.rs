//! Tunable constants for a planning session

use femurplan_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a [`PlanningSession`](crate::PlanningSession)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Lower bound of the shared rotation budget, in degrees
    pub min_rotation_deg: i32,
    /// Upper bound of the shared rotation budget, in degrees
    pub max_rotation_deg: i32,
    /// Angle applied by one rotation request, in degrees
    pub rotation_step_deg: i32,
    /// Length of the world-aligned reference lines (0.1 scene units = 10 mm)
    pub reference_line_length: f32,
    /// Length of the projected TEA display line
    pub tea_display_length: f32,
    /// Edge length of the square plane patches
    pub plane_size: f32,
    /// Distance from femur center to each rotation pivot
    pub pivot_offset: f32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            min_rotation_deg: -10,
            max_rotation_deg: 10,
            rotation_step_deg: 1,
            reference_line_length: 0.1,
            tea_display_length: 1.0,
            plane_size: 2.0,
            pivot_offset: 0.1,
        }
    }
}

impl PlanningConfig {
    /// Check that the clamp range contains zero, one step fits inside it and
    /// every length is positive
    pub fn validate(&self) -> Result<()> {
        if self.min_rotation_deg > 0 || self.max_rotation_deg < 0 {
            return Err(Error::InvalidConfig(format!(
                "rotation range {}..={} must contain 0",
                self.min_rotation_deg, self.max_rotation_deg
            )));
        }
        if self.rotation_step_deg <= 0 {
            return Err(Error::InvalidConfig(
                "rotation step must be positive".to_string(),
            ));
        }
        let width = i64::from(self.max_rotation_deg) - i64::from(self.min_rotation_deg);
        if i64::from(self.rotation_step_deg) > width {
            return Err(Error::InvalidConfig(format!(
                "rotation step {} exceeds the range {}..={}",
                self.rotation_step_deg, self.min_rotation_deg, self.max_rotation_deg
            )));
        }

        let lengths = [
            ("reference_line_length", self.reference_line_length),
            ("tea_display_length", self.tea_display_length),
            ("plane_size", self.plane_size),
            ("pivot_offset", self.pivot_offset),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive length, got {value}"
                )));
            }
        }

        Ok(())
    }
}
