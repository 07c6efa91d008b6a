//! # femurplan planning
//!
//! The geometry derivation and rotation-synchronization engine.
//!
//! Landmarks picked on a femur model are turned into display axes, a
//! mechanical-axis reference frame, a projected transepicondylar line and two
//! reference planes whose varus/valgus and flexion/extension corrections are
//! driven together under a shared clamp. [`PlanningSession`] owns all of that
//! state and exposes it as event handlers plus plain-data observers.

pub mod config;
pub mod landmarks;
pub mod placement;
pub mod axes;
pub mod frame;
pub mod tea;
pub mod rotation;
pub mod session;

// Re-export commonly used items
pub use config::*;
pub use landmarks::*;
pub use placement::*;
pub use axes::*;
pub use frame::*;
pub use tea::*;
pub use rotation::*;
pub use session::*;
