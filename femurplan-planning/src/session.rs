//! The planning session: event handlers and the one-shot processing pipeline

use crate::axes::{AxisSegment, AxisSet, BuildReport};
use crate::config::PlanningConfig;
use crate::frame::{Plane, ReferenceFrame, ReferenceLines, ReferencePlanes};
use crate::landmarks::{Landmark, LandmarkStore};
use crate::placement::{PlacementController, PlacementState};
use crate::rotation::{RotationAngles, RotationEngine};
use crate::tea::TeaProjector;
use femurplan_core::{
    Direction, Error, ErrorKind, LandmarkId, LineSegment, Point3f, Result, RotationAxis, Severity,
};
use serde::Serialize;

/// Lifecycle of the processing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    /// Some landmarks are still missing
    NotReady,
    /// Every landmark is placed and processing may run
    Ready,
    /// Processing has run; terminal
    Processed,
}

/// A user-facing report of a rejected or failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for Notification {
    fn from(err: &Error) -> Self {
        Self {
            severity: err.severity(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Everything the pipeline derives, created together or not at all
#[derive(Debug, Clone)]
pub struct ProcessedGeometry {
    pub frame: ReferenceFrame,
    pub tea_line: LineSegment,
    pub reference_lines: ReferenceLines,
    pub mechanical_plane: Plane,
    pub rotation: RotationEngine,
}

/// One annotation session over a single femur model
#[derive(Debug, Clone)]
pub struct PlanningSession {
    config: PlanningConfig,
    store: LandmarkStore,
    placement: PlacementController,
    axes: AxisSet,
    tea: TeaProjector,
    processed: Option<ProcessedGeometry>,
    notifications: Vec<Notification>,
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self {
            config: PlanningConfig::default(),
            store: LandmarkStore::new(),
            placement: PlacementController::new(),
            axes: AxisSet::new(),
            tea: TeaProjector::new(),
            processed: None,
            notifications: Vec::new(),
        }
    }
}

impl PlanningSession {
    /// Create a session with a validated configuration
    pub fn new(config: PlanningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        if self.processed.is_some() {
            PipelineState::Processed
        } else if self.store.all_placed() {
            PipelineState::Ready
        } else {
            PipelineState::NotReady
        }
    }

    /// Toggle the active landmark control
    pub fn select_landmark(&mut self, id: LandmarkId) -> PlacementState {
        self.placement.select(id, &self.store)
    }

    /// Leave the current landmark selection
    pub fn back(&mut self) {
        self.placement.back();
    }

    /// A surface pick resolved for `id`
    pub fn on_landmark_pick(&mut self, id: LandmarkId, point: Point3f) -> Result<()> {
        let result = self.placement.pick(id, point, &mut self.store);
        if result.is_ok() && self.store.all_placed() {
            log::info!("All landmarks placed. Processing is available.");
        }
        self.report(result)
    }

    /// The drag gizmo moved an existing landmark
    pub fn on_landmark_drag(&mut self, id: LandmarkId, point: Point3f) -> Result<()> {
        let result = self.placement.drag(id, point, &mut self.store);
        self.report(result)
    }

    /// Draw any axis segment whose endpoints exist and which is not yet drawn
    pub fn build_axes(&mut self) -> BuildReport {
        self.axes.build(&self.store)
    }

    /// Run the one-shot processing pipeline
    pub fn trigger_processing(&mut self) -> Result<()> {
        let result = self.process();
        self.report(result)
    }

    fn process(&mut self) -> Result<()> {
        if self.processed.is_some() {
            return Err(Error::AlreadyProcessed);
        }
        let missing = self.store.missing();
        if !missing.is_empty() {
            return Err(Error::IncompleteLandmarks { missing });
        }

        let femur_center = self.store.position(LandmarkId::FemurCenter)?;
        let hip_center = self.store.position(LandmarkId::HipCenter)?;

        let frame = ReferenceFrame::derive(femur_center, hip_center)?;
        log::info!("Perpendicular plane oriented to the mechanical axis.");

        // Project on a copy so a failed attempt leaves the TEA unfrozen
        let mut tea = self.tea.clone();
        let tea_line = tea.project(&self.store, &frame.normal(), self.config.tea_display_length)?;
        log::info!("TEA line projected on perpendicular plane.");

        let reference_lines = ReferenceLines::build(femur_center, self.config.reference_line_length);
        log::debug!("{} and {} created.", ReferenceLines::X_NAME, ReferenceLines::Z_NAME);
        let planes = ReferencePlanes::build(&frame, self.config.plane_size);
        let rotation = RotationEngine::setup(
            femur_center,
            &planes.varus_valgus,
            &planes.flexion_extension,
            &self.config,
        );

        self.tea = tea;
        self.processed = Some(ProcessedGeometry {
            frame,
            tea_line,
            reference_lines,
            mechanical_plane: planes.mechanical_axis,
            rotation,
        });
        log::info!("Processing completed successfully.");
        Ok(())
    }

    /// Step a correction axis; the coupled axis follows
    pub fn rotate(&mut self, which: RotationAxis, direction: Direction) -> Result<RotationAngles> {
        let result = match self.processed.as_mut() {
            Some(processed) => processed.rotation.rotate(which, direction),
            None => Err(Error::RotationUnavailable),
        };
        self.report(result)
    }

    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            match err.severity() {
                Severity::Silent => log::debug!("{}", err),
                Severity::Warning => {
                    log::warn!("{}", err);
                    self.notifications.push(Notification::from(err));
                }
                Severity::Failure => {
                    log::error!("Error during processing: {}", err);
                    self.notifications.push(Notification::from(err));
                }
            }
        }
        result
    }

    /// Take the notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn landmark(&self, id: LandmarkId) -> Option<&Landmark> {
        self.store.get(id)
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.store.iter()
    }

    pub fn segments(&self) -> &[AxisSegment] {
        self.axes.segments()
    }

    pub fn processed(&self) -> Option<&ProcessedGeometry> {
        self.processed.as_ref()
    }

    pub fn frame(&self) -> Option<&ReferenceFrame> {
        self.processed.as_ref().map(|p| &p.frame)
    }

    /// Planes in world space, reflecting any applied rotation. Empty until processed.
    pub fn planes(&self) -> Vec<Plane> {
        match &self.processed {
            Some(p) => vec![
                p.mechanical_plane,
                p.rotation.plane(RotationAxis::VarusValgus),
                p.rotation.plane(RotationAxis::FlexionExtension),
            ],
            None => Vec::new(),
        }
    }

    pub fn tea_line(&self) -> Option<LineSegment> {
        self.processed.as_ref().map(|p| p.tea_line)
    }

    pub fn reference_lines(&self) -> Option<ReferenceLines> {
        self.processed.as_ref().map(|p| p.reference_lines)
    }

    /// Whether the rotation controls accept requests
    pub fn rotation_enabled(&self) -> bool {
        self.processed.is_some()
    }

    pub fn rotation_angles(&self) -> RotationAngles {
        self.processed
            .as_ref()
            .map(|p| p.rotation.angles())
            .unwrap_or_default()
    }
}
