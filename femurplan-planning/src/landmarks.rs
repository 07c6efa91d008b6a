//! Storage for placed landmarks

use femurplan_core::{Error, LandmarkId, Point3f, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A placed anatomical landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: LandmarkId,
    pub position: Point3f,
}

/// Owns every landmark of a session. Landmarks are created once and never removed.
#[derive(Debug, Clone, Default)]
pub struct LandmarkStore {
    landmarks: BTreeMap<LandmarkId, Landmark>,
}

impl LandmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the landmark for `id`.
    ///
    /// Callers only place ids that have no landmark yet; if one already
    /// exists it is kept unchanged.
    pub fn place(&mut self, id: LandmarkId, position: Point3f) -> &Landmark {
        if self.landmarks.contains_key(&id) {
            log::warn!("Landmark \"{}\" already placed, keeping existing position", id);
        } else {
            log::info!("Landmark \"{}\" placed at: {:?}", id, position);
        }
        self.landmarks
            .entry(id)
            .or_insert(Landmark { id, position })
    }

    /// Move an existing landmark
    pub fn reposition(&mut self, id: LandmarkId, position: Point3f) -> Result<()> {
        let landmark = self
            .landmarks
            .get_mut(&id)
            .ok_or(Error::LandmarkNotFound(id))?;
        landmark.position = position;
        log::debug!("Landmark \"{}\" moved to: {:?}", id, position);
        Ok(())
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    /// Position of a landmark that must exist
    pub fn position(&self, id: LandmarkId) -> Result<Point3f> {
        self.get(id)
            .map(|landmark| landmark.position)
            .ok_or(Error::LandmarkNotFound(id))
    }

    pub fn contains(&self, id: LandmarkId) -> bool {
        self.landmarks.contains_key(&id)
    }

    pub fn all_placed(&self) -> bool {
        LandmarkId::ALL.iter().all(|id| self.contains(*id))
    }

    /// Ids still waiting to be placed, in placement order
    pub fn missing(&self) -> Vec<LandmarkId> {
        LandmarkId::ALL
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }
}
