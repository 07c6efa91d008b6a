//! Core data structures for femurplan
//!
//! This crate provides the fundamental types shared by the planning engine:
//! point and vector aliases, line segments, rigid poses, the fixed set of
//! anatomical landmark identifiers, the two rotation axes and the common
//! error type.

pub mod point;
pub mod transform;
pub mod landmark;
pub mod rotation;
pub mod error;

pub use point::*;
pub use transform::*;
pub use landmark::*;
pub use rotation::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Unit, UnitQuaternion, Isometry3};
