//! Anatomical landmark identifiers and their groups

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten anatomical landmarks a user places on the femur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkId {
    FemurCenter,
    HipCenter,
    FemurProximalCanal,
    FemurDistalCanal,
    MedialEpicondyle,
    LateralEpicondyle,
    DistalMedialPt,
    DistalLateralPt,
    PosteriorMedialPt,
    PosteriorLateralPt,
}

impl LandmarkId {
    /// Every landmark, in placement order
    pub const ALL: [LandmarkId; 10] = [
        LandmarkId::FemurCenter,
        LandmarkId::HipCenter,
        LandmarkId::FemurProximalCanal,
        LandmarkId::FemurDistalCanal,
        LandmarkId::MedialEpicondyle,
        LandmarkId::LateralEpicondyle,
        LandmarkId::DistalMedialPt,
        LandmarkId::DistalLateralPt,
        LandmarkId::PosteriorMedialPt,
        LandmarkId::PosteriorLateralPt,
    ];

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            LandmarkId::FemurCenter => "Femur Center",
            LandmarkId::HipCenter => "Hip Center",
            LandmarkId::FemurProximalCanal => "Femur Proximal Canal",
            LandmarkId::FemurDistalCanal => "Femur Distal Canal",
            LandmarkId::MedialEpicondyle => "Medial Epicondyle",
            LandmarkId::LateralEpicondyle => "Lateral Epicondyle",
            LandmarkId::DistalMedialPt => "Distal Medial Pt",
            LandmarkId::DistalLateralPt => "Distal Lateral Pt",
            LandmarkId::PosteriorMedialPt => "Posterior Medial Pt",
            LandmarkId::PosteriorLateralPt => "Posterior Lateral Pt",
        }
    }

    pub fn group(self) -> Group {
        match self {
            LandmarkId::FemurCenter | LandmarkId::HipCenter => Group::MechanicalAxis,
            LandmarkId::FemurProximalCanal | LandmarkId::FemurDistalCanal => Group::AnatomicalAxis,
            LandmarkId::MedialEpicondyle | LandmarkId::LateralEpicondyle => Group::Transepicondylar,
            LandmarkId::DistalMedialPt | LandmarkId::DistalLateralPt => Group::Distal,
            LandmarkId::PosteriorMedialPt | LandmarkId::PosteriorLateralPt => Group::Posterior,
        }
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Anatomically paired landmark roles, numbered 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    MechanicalAxis,
    AnatomicalAxis,
    Transepicondylar,
    Distal,
    Posterior,
}

impl Group {
    /// Group number as shown to the user (1..=5)
    pub fn number(self) -> u8 {
        match self {
            Group::MechanicalAxis => 1,
            Group::AnatomicalAxis => 2,
            Group::Transepicondylar => 3,
            Group::Distal => 4,
            Group::Posterior => 5,
        }
    }

    /// Display color as 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            Group::MechanicalAxis => 0x0000ff,
            Group::AnatomicalAxis => 0x00ff00,
            Group::Transepicondylar => 0xffff00,
            Group::Distal => 0xffa500,
            Group::Posterior => 0x800080,
        }
    }
}
