//! Named axis segments between paired landmarks

use crate::landmarks::LandmarkStore;
use femurplan_core::{Error, Group, LandmarkId, LineSegment};
use serde::Serialize;

/// A landmark pair that is drawn as a named axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDefinition {
    pub start: LandmarkId,
    pub end: LandmarkId,
    pub name: &'static str,
    pub group: Group,
}

/// The wired landmark pairs. The distal pair is deliberately not connected.
pub const AXIS_DEFINITIONS: [AxisDefinition; 4] = [
    AxisDefinition {
        start: LandmarkId::FemurCenter,
        end: LandmarkId::HipCenter,
        name: "Mechanical Axis",
        group: Group::MechanicalAxis,
    },
    AxisDefinition {
        start: LandmarkId::FemurProximalCanal,
        end: LandmarkId::FemurDistalCanal,
        name: "Anatomical Axis",
        group: Group::AnatomicalAxis,
    },
    AxisDefinition {
        start: LandmarkId::MedialEpicondyle,
        end: LandmarkId::LateralEpicondyle,
        name: "TEA",
        group: Group::Transepicondylar,
    },
    AxisDefinition {
        start: LandmarkId::PosteriorMedialPt,
        end: LandmarkId::PosteriorLateralPt,
        name: "PCA",
        group: Group::Posterior,
    },
];

/// A drawn axis, frozen at the landmark positions it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSegment {
    pub start_id: LandmarkId,
    pub end_id: LandmarkId,
    pub name: String,
    pub group: Group,
    pub geometry: LineSegment,
}

impl AxisSegment {
    /// Whether this segment joins `a` and `b`, in either order
    pub fn connects(&self, a: LandmarkId, b: LandmarkId) -> bool {
        (self.start_id == a && self.end_id == b) || (self.start_id == b && self.end_id == a)
    }

    pub fn color(&self) -> u32 {
        self.group.color()
    }
}

/// What a single build pass did with each definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub created: Vec<&'static str>,
    pub duplicates: Vec<&'static str>,
    pub missing_endpoints: Vec<&'static str>,
}

/// The set of axis segments built so far
#[derive(Debug, Clone, Default)]
pub struct AxisSet {
    segments: Vec<AxisSegment>,
}

impl AxisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every definition whose endpoints exist and which is not yet drawn
    pub fn build(&mut self, store: &LandmarkStore) -> BuildReport {
        self.build_from(&AXIS_DEFINITIONS, store)
    }

    /// Build segments for an explicit list of definitions
    pub fn build_from(&mut self, definitions: &[AxisDefinition], store: &LandmarkStore) -> BuildReport {
        let mut report = BuildReport::default();

        for def in definitions {
            let (Some(start), Some(end)) = (store.get(def.start), store.get(def.end)) else {
                report.missing_endpoints.push(def.name);
                continue;
            };

            if self.find(def.start, def.end).is_some() {
                let err = Error::DuplicateSegment { name: def.name.to_string() };
                log::debug!("{} between {} and {}", err, def.start, def.end);
                report.duplicates.push(def.name);
                continue;
            }

            self.segments.push(AxisSegment {
                start_id: def.start,
                end_id: def.end,
                name: def.name.to_string(),
                group: def.group,
                geometry: LineSegment::new(start.position, end.position),
            });
            log::info!("Line \"{}\" drawn between {} and {}.", def.name, def.start, def.end);
            report.created.push(def.name);
        }

        report
    }

    /// The segment joining `a` and `b` in either order
    pub fn find(&self, a: LandmarkId, b: LandmarkId) -> Option<&AxisSegment> {
        self.segments.iter().find(|segment| segment.connects(a, b))
    }

    pub fn segments(&self) -> &[AxisSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
