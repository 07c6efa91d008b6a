//! One-landmark-at-a-time placement workflow

use crate::landmarks::LandmarkStore;
use femurplan_core::{Error, LandmarkId, Point3f, Result};
use serde::Serialize;

/// Where the placement workflow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlacementState {
    /// Nothing selected; every landmark control is available
    Idle,
    /// Waiting for a surface pick that creates this landmark
    Picking(LandmarkId),
    /// This existing landmark is attached to the drag gizmo
    Editing(LandmarkId),
}

/// Tracks which landmark is active and gates picks accordingly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementController {
    state: PlacementState,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementController {
    pub fn new() -> Self {
        Self {
            state: PlacementState::Idle,
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn active(&self) -> Option<LandmarkId> {
        match self.state {
            PlacementState::Idle => None,
            PlacementState::Picking(id) | PlacementState::Editing(id) => Some(id),
        }
    }

    /// Toggle selection of `id`. Selecting the active landmark again deselects it.
    pub fn select(&mut self, id: LandmarkId, store: &LandmarkStore) -> PlacementState {
        self.state = if self.active() == Some(id) {
            PlacementState::Idle
        } else if store.contains(id) {
            log::debug!("attached to existing landmark: {}", id);
            PlacementState::Editing(id)
        } else {
            PlacementState::Picking(id)
        };
        self.state
    }

    /// Leave the current selection
    pub fn back(&mut self) {
        self.state = PlacementState::Idle;
    }

    /// Whether a surface pick would currently be accepted
    pub fn picking_enabled(&self) -> bool {
        matches!(self.state, PlacementState::Picking(_))
    }

    /// Whether the control for `id` is available. Only the active landmark is
    /// while a selection is held.
    pub fn is_enabled(&self, id: LandmarkId) -> bool {
        self.active().map_or(true, |active| active == id)
    }

    /// Create a landmark from a resolved surface pick
    pub fn pick(&mut self, id: LandmarkId, point: Point3f, store: &mut LandmarkStore) -> Result<()> {
        if self.state != PlacementState::Picking(id) {
            return Err(Error::PlacementInactive(id));
        }
        if store.contains(id) {
            return Err(Error::LandmarkAlreadyPlaced(id));
        }

        store.place(id, point);
        self.state = PlacementState::Editing(id);
        Ok(())
    }

    /// Reposition an existing landmark from the drag gizmo
    pub fn drag(&self, id: LandmarkId, point: Point3f, store: &mut LandmarkStore) -> Result<()> {
        store.reposition(id, point)
    }
}
