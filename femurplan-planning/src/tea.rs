//! Transepicondylar axis projection onto the mechanical-axis plane

use crate::landmarks::LandmarkStore;
use femurplan_core::{try_normalize, Error, LandmarkId, LineSegment, Result, UnitVector3f};
use nalgebra::Unit;

/// Residual length below which the TEA counts as parallel to the plane normal.
/// Looser than the general epsilon to absorb quaternion round-off in the normal.
pub const PARALLEL_TOLERANCE: f32 = 1e-5;

/// Projects the transepicondylar axis (TEA) onto the plane normal to the
/// mechanical axis.
///
/// The TEA direction is captured on the first successful projection and
/// reused from then on, even if the epicondyle landmarks move afterwards.
#[derive(Debug, Clone, Default)]
pub struct TeaProjector {
    original: Option<UnitVector3f>,
}

impl TeaProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frozen TEA direction, once a projection has succeeded
    pub fn original(&self) -> Option<UnitVector3f> {
        self.original
    }

    /// Project the TEA onto the plane with the given `normal` and return a
    /// display line of `length` starting at the femur center.
    pub fn project(
        &mut self,
        store: &LandmarkStore,
        normal: &UnitVector3f,
        length: f32,
    ) -> Result<LineSegment> {
        let femur_center = store.position(LandmarkId::FemurCenter)?;
        let tea = match self.original {
            Some(tea) => tea,
            None => Self::measure(store)?,
        };

        let projected = project_onto_plane(&tea, normal)?;
        if self.original.is_none() {
            log::debug!("Original TEA Vector: {:?}", tea.into_inner());
            self.original = Some(tea);
        }
        log::debug!("TEA Projected on Perpendicular Plane: {:?}", projected.into_inner());

        Ok(LineSegment::from_direction(femur_center, &projected, length))
    }

    fn measure(store: &LandmarkStore) -> Result<UnitVector3f> {
        let medial = store.position(LandmarkId::MedialEpicondyle)?;
        let lateral = store.position(LandmarkId::LateralEpicondyle)?;
        try_normalize(&(lateral - medial)).ok_or_else(|| {
            Error::DegenerateGeometry("medial and lateral epicondyles coincide".to_string())
        })
    }
}

/// Remove the component of `v` along `normal` and renormalize.
pub fn project_onto_plane(v: &UnitVector3f, normal: &UnitVector3f) -> Result<UnitVector3f> {
    let (v, normal) = (v.into_inner(), normal.into_inner());
    let residual = v - normal * v.dot(&normal);
    Unit::try_new(residual, PARALLEL_TOLERANCE).ok_or_else(|| {
        Error::DegenerateGeometry(
            "TEA is parallel to the mechanical axis, projection collapses to a point".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use femurplan_core::{ErrorKind, Point3f, Vector3f};

    fn store_with(medial: Point3f, lateral: Point3f) -> LandmarkStore {
        let mut store = LandmarkStore::new();
        store.place(LandmarkId::FemurCenter, Point3f::new(0.0, 0.0, 0.0));
        store.place(LandmarkId::MedialEpicondyle, medial);
        store.place(LandmarkId::LateralEpicondyle, lateral);
        store
    }

    #[test]
    fn test_projection_removes_normal_component() {
        let store = store_with(Point3f::new(-1.0, 0.0, -0.5), Point3f::new(1.0, 0.0, 0.5));
        let mut projector = TeaProjector::new();
        let normal = Vector3f::z_axis();

        let line = projector.project(&store, &normal, 1.0).unwrap();
        let dir = line.direction().unwrap();

        assert_relative_eq!(dir.dot(&normal.into_inner()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(dir.into_inner(), Vector3f::x(), epsilon = 1e-6);
        assert_relative_eq!(line.length(), 1.0, epsilon = 1e-6);
        assert_eq!(line.start, Point3f::origin());
    }

    #[test]
    fn test_original_tea_is_frozen() {
        let mut store = store_with(Point3f::new(-1.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0));
        let mut projector = TeaProjector::new();
        let normal = Vector3f::z_axis();

        let first = projector.project(&store, &normal, 1.0).unwrap();
        store
            .reposition(LandmarkId::LateralEpicondyle, Point3f::new(-1.0, 3.0, 0.0))
            .unwrap();
        let second = projector.project(&store, &normal, 1.0).unwrap();

        assert_eq!(first, second);
        assert_relative_eq!(
            projector.original().unwrap().into_inner(),
            Vector3f::x(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_parallel_tea_is_degenerate_and_not_frozen() {
        let store = store_with(Point3f::new(0.0, 0.0, -1.0), Point3f::new(0.0, 0.0, 1.0));
        let mut projector = TeaProjector::new();

        let err = projector.project(&store, &Vector3f::z_axis(), 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
        assert!(projector.original().is_none());
    }

    #[test]
    fn test_coincident_epicondyles_are_degenerate() {
        let p = Point3f::new(0.5, 0.5, 0.5);
        let store = store_with(p, p);
        let err = TeaProjector::new()
            .project(&store, &Vector3f::z_axis(), 1.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
    }

    #[test]
    fn test_missing_landmark_is_reported() {
        let mut store = LandmarkStore::new();
        store.place(LandmarkId::FemurCenter, Point3f::origin());
        let err = TeaProjector::new()
            .project(&store, &Vector3f::z_axis(), 1.0)
            .unwrap_err();
        assert_eq!(err, Error::LandmarkNotFound(LandmarkId::MedialEpicondyle));
    }
}
