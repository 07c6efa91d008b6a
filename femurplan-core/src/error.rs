//! Error types for femurplan

use crate::landmark::LandmarkId;
use crate::rotation::RotationAxis;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for femurplan operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(
        "Please place all landmarks before processing ({} missing: {})",
        missing.len(),
        join_labels(missing)
    )]
    IncompleteLandmarks { missing: Vec<LandmarkId> },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("{axis} rotation limited to {min}..={max} degrees (requested {attempted})")]
    RotationClamped {
        axis: RotationAxis,
        attempted: i32,
        min: i32,
        max: i32,
    },

    #[error("Process has already been completed")]
    AlreadyProcessed,

    #[error("Segment \"{name}\" already exists")]
    DuplicateSegment { name: String },

    #[error("Landmark not placed: {0}")]
    LandmarkNotFound(LandmarkId),

    #[error("Landmark already placed: {0}")]
    LandmarkAlreadyPlaced(LandmarkId),

    #[error("Placement is not active for {0}")]
    PlacementInactive(LandmarkId),

    #[error("Rotation controls are not enabled until processing completes")]
    RotationUnavailable,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Machine-distinguishable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    IncompleteLandmarks,
    DegenerateGeometry,
    RotationClamped,
    AlreadyProcessed,
    DuplicateSegment,
    LandmarkNotFound,
    LandmarkAlreadyPlaced,
    PlacementInactive,
    RotationUnavailable,
    InvalidConfig,
}

/// How an error should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Logged only
    Silent,
    /// Recoverable, request ignored
    Warning,
    /// The current attempt was aborted
    Failure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IncompleteLandmarks { .. } => ErrorKind::IncompleteLandmarks,
            Error::DegenerateGeometry(_) => ErrorKind::DegenerateGeometry,
            Error::RotationClamped { .. } => ErrorKind::RotationClamped,
            Error::AlreadyProcessed => ErrorKind::AlreadyProcessed,
            Error::DuplicateSegment { .. } => ErrorKind::DuplicateSegment,
            Error::LandmarkNotFound(_) => ErrorKind::LandmarkNotFound,
            Error::LandmarkAlreadyPlaced(_) => ErrorKind::LandmarkAlreadyPlaced,
            Error::PlacementInactive(_) => ErrorKind::PlacementInactive,
            Error::RotationUnavailable => ErrorKind::RotationUnavailable,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind() {
            ErrorKind::DuplicateSegment
            | ErrorKind::PlacementInactive
            | ErrorKind::RotationUnavailable => Severity::Silent,
            ErrorKind::DegenerateGeometry | ErrorKind::InvalidConfig => Severity::Failure,
            _ => Severity::Warning,
        }
    }
}

fn join_labels(ids: &[LandmarkId]) -> String {
    ids.iter().map(|id| id.label()).collect::<Vec<_>>().join(", ")
}

/// Result type alias for femurplan operations
pub type Result<T> = std::result::Result<T, Error>;
