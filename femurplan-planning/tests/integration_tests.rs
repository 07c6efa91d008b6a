//! Integration tests for femurplan-planning
//!
//! These tests drive a full planning session through its public event
//! handlers, from landmark placement through processing and rotation.

use approx::assert_relative_eq;
use femurplan_core::{Direction, ErrorKind, LandmarkId, Point3f, RotationAxis, Severity, Vector3f};
use femurplan_planning::*;

/// Landmark positions roughly matching a right femur in scene units
fn femur_landmarks() -> Vec<(LandmarkId, Point3f)> {
    vec![
        (LandmarkId::FemurCenter, Point3f::new(1.0, -9.0, -1.0)),
        (LandmarkId::HipCenter, Point3f::new(1.3, -4.5, -1.2)),
        (LandmarkId::FemurProximalCanal, Point3f::new(1.1, -5.5, -1.0)),
        (LandmarkId::FemurDistalCanal, Point3f::new(1.0, -8.5, -0.9)),
        (LandmarkId::MedialEpicondyle, Point3f::new(0.6, -9.0, -1.0)),
        (LandmarkId::LateralEpicondyle, Point3f::new(1.4, -9.05, -0.95)),
        (LandmarkId::DistalMedialPt, Point3f::new(0.8, -9.4, -1.0)),
        (LandmarkId::DistalLateralPt, Point3f::new(1.2, -9.4, -1.0)),
        (LandmarkId::PosteriorMedialPt, Point3f::new(0.8, -9.2, -1.3)),
        (LandmarkId::PosteriorLateralPt, Point3f::new(1.2, -9.2, -1.3)),
    ]
}

fn place(session: &mut PlanningSession, landmarks: &[(LandmarkId, Point3f)]) {
    for (id, point) in landmarks {
        assert_eq!(session.select_landmark(*id), PlacementState::Picking(*id));
        session.on_landmark_pick(*id, *point).unwrap();
        session.back();
    }
}

fn processed_session() -> PlanningSession {
    let mut session = PlanningSession::default();
    place(&mut session, &femur_landmarks());
    session.trigger_processing().unwrap();
    session
}

#[test]
fn test_full_workflow() {
    let mut session = PlanningSession::default();
    place(&mut session, &femur_landmarks());

    let report = session.build_axes();
    assert_eq!(report.created.len(), 4);
    assert_eq!(session.segments().len(), 4);
    assert_eq!(session.landmarks().count(), 10);

    session.trigger_processing().unwrap();
    assert!(session.rotation_enabled());

    let frame = session.frame().unwrap();
    let expected = (Point3f::new(1.3, -4.5, -1.2) - Point3f::new(1.0, -9.0, -1.0)).normalize();
    assert_relative_eq!(frame.axis.into_inner(), expected, epsilon = 1e-5);
    assert_relative_eq!(
        (frame.orientation * Vector3f::z_axis()).into_inner(),
        expected,
        epsilon = 1e-5
    );

    let tea = session.tea_line().unwrap();
    assert_relative_eq!(tea.length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(tea.vector().dot(&expected), 0.0, epsilon = 1e-5);
    assert_eq!(tea.start, Point3f::new(1.0, -9.0, -1.0));

    let lines = session.reference_lines().unwrap();
    assert_relative_eq!(lines.x.length(), 0.1, epsilon = 1e-6);
    assert_relative_eq!(lines.z.vector().normalize(), Vector3f::z(), epsilon = 1e-6);

    session
        .rotate(RotationAxis::VarusValgus, Direction::Positive)
        .unwrap();
    assert_eq!(
        session.rotation_angles(),
        RotationAngles { varus_valgus: 1, flexion_extension: 1 }
    );
    assert!(session.drain_notifications().is_empty());
}

#[test]
fn test_processing_before_all_landmarks_is_recoverable() {
    let mut session = PlanningSession::default();
    let landmarks = femur_landmarks();
    place(&mut session, &landmarks[..9]);

    let err = session.trigger_processing().unwrap_err();
    assert_eq!(err, femurplan_core::Error::IncompleteLandmarks {
        missing: vec![LandmarkId::PosteriorLateralPt],
    });
    assert_eq!(session.state(), PipelineState::NotReady);

    place(&mut session, &landmarks[9..]);
    session.trigger_processing().unwrap();
    assert_eq!(session.state(), PipelineState::Processed);
}

#[test]
fn test_second_trigger_reports_already_processed() {
    let mut session = processed_session();
    let planes_before = session.planes();

    let err = session.trigger_processing().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyProcessed);
    assert_eq!(session.planes(), planes_before);
    assert_eq!(session.planes().len(), 3);

    let notes = session.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, ErrorKind::AlreadyProcessed);
    assert_eq!(notes[0].severity, Severity::Warning);
}

#[test]
fn test_coincident_centers_abort_without_planes() {
    let mut landmarks = femur_landmarks();
    landmarks[1].1 = landmarks[0].1;

    let mut session = PlanningSession::default();
    place(&mut session, &landmarks);

    let err = session.trigger_processing().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
    assert!(session.planes().is_empty());
    assert!(session.processed().is_none());
    assert_eq!(session.state(), PipelineState::Ready);

    let notes = session.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Failure);

    // Dragging the hip center away lets processing succeed
    session
        .on_landmark_drag(LandmarkId::HipCenter, Point3f::new(1.3, -4.5, -1.2))
        .unwrap();
    session.trigger_processing().unwrap();
    assert_eq!(session.planes().len(), 3);
}

#[test]
fn test_tea_parallel_to_mechanical_axis_is_degenerate() {
    let mut landmarks = femur_landmarks();
    landmarks[4].1 = Point3f::new(1.0, -10.0, -1.0);
    landmarks[5].1 = Point3f::new(1.3, -5.5, -1.2);

    let mut session = PlanningSession::default();
    place(&mut session, &landmarks);

    let err = session.trigger_processing().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
    assert!(session.planes().is_empty());
    assert!(session.tea_line().is_none());
}

#[test]
fn test_rotation_clamp_and_coupling() {
    let mut session = processed_session();

    for expected in 1..=10 {
        let angles = session
            .rotate(RotationAxis::VarusValgus, Direction::Positive)
            .unwrap();
        assert_eq!(angles.varus_valgus, expected);
        assert_eq!(angles.flexion_extension, expected);
    }

    let err = session
        .rotate(RotationAxis::VarusValgus, Direction::Positive)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RotationClamped);
    assert_eq!(session.rotation_angles().varus_valgus, 10);
    assert_eq!(session.rotation_angles().flexion_extension, 10);

    // The coupled axis is equally saturated
    let err = session
        .rotate(RotationAxis::FlexionExtension, Direction::Positive)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RotationClamped);
    assert_eq!(session.drain_notifications().len(), 2);

    session
        .rotate(RotationAxis::FlexionExtension, Direction::Negative)
        .unwrap();
    assert_eq!(
        session.rotation_angles(),
        RotationAngles { varus_valgus: 9, flexion_extension: 9 }
    );
}

#[test]
fn test_rotation_moves_only_correction_planes() {
    let mut session = processed_session();
    let before = session.planes();

    session
        .rotate(RotationAxis::FlexionExtension, Direction::Negative)
        .unwrap();
    let after = session.planes();

    assert_eq!(after[0], before[0]);
    assert_ne!(after[1].orientation, before[1].orientation);
    assert_ne!(after[2].orientation, before[2].orientation);

    let tilt = after[1].normal().angle(&before[1].normal().into_inner());
    assert!(tilt <= 1.0_f32.to_radians() + 1e-5);
}

#[test]
fn test_landmark_moves_after_processing_do_not_touch_derived_geometry() {
    let mut session = processed_session();
    session.build_axes();
    let tea_before = session.tea_line().unwrap();
    let segments_before = session.segments().to_vec();

    session.select_landmark(LandmarkId::LateralEpicondyle);
    assert_eq!(
        session.placement().state(),
        PlacementState::Editing(LandmarkId::LateralEpicondyle)
    );
    session
        .on_landmark_drag(LandmarkId::LateralEpicondyle, Point3f::new(2.0, -8.0, 0.0))
        .unwrap();
    session.build_axes();

    assert_eq!(session.tea_line().unwrap(), tea_before);
    assert_eq!(session.segments(), segments_before.as_slice());
    assert_eq!(
        session.landmark(LandmarkId::LateralEpicondyle).unwrap().position,
        Point3f::new(2.0, -8.0, 0.0)
    );
}

#[test]
fn test_pick_for_placed_landmark_is_rejected() {
    let mut session = processed_session();
    session.select_landmark(LandmarkId::HipCenter);

    let err = session
        .on_landmark_pick(LandmarkId::HipCenter, Point3f::origin())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PlacementInactive);
    assert_eq!(
        session.landmark(LandmarkId::HipCenter).unwrap().position,
        Point3f::new(1.3, -4.5, -1.2)
    );
}

#[test]
fn test_custom_clamp_range() {
    let config = PlanningConfig {
        min_rotation_deg: -2,
        max_rotation_deg: 2,
        ..Default::default()
    };
    let mut session = PlanningSession::new(config).unwrap();
    place(&mut session, &femur_landmarks());
    session.trigger_processing().unwrap();

    for _ in 0..2 {
        session
            .rotate(RotationAxis::FlexionExtension, Direction::Negative)
            .unwrap();
    }
    let err = session
        .rotate(RotationAxis::FlexionExtension, Direction::Negative)
        .unwrap_err();
    assert_eq!(
        err,
        femurplan_core::Error::RotationClamped {
            axis: RotationAxis::FlexionExtension,
            attempted: -3,
            min: -2,
            max: 2,
        }
    );
}

#[test]
fn test_oversized_step_at_integer_limit_is_clamped() {
    let config = PlanningConfig {
        min_rotation_deg: -10,
        max_rotation_deg: i32::MAX,
        rotation_step_deg: i32::MAX,
        ..Default::default()
    };
    let mut session = PlanningSession::new(config).unwrap();
    place(&mut session, &femur_landmarks());
    session.trigger_processing().unwrap();

    session
        .rotate(RotationAxis::VarusValgus, Direction::Positive)
        .unwrap();
    let planes_before = session.planes();

    let err = session
        .rotate(RotationAxis::VarusValgus, Direction::Positive)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RotationClamped);
    assert_eq!(
        session.rotation_angles(),
        RotationAngles { varus_valgus: i32::MAX, flexion_extension: i32::MAX }
    );
    assert_eq!(session.planes(), planes_before);
}

#[test]
fn test_step_wider_than_clamp_range_is_invalid() {
    let config = PlanningConfig {
        min_rotation_deg: -1,
        max_rotation_deg: 1,
        rotation_step_deg: 3,
        ..Default::default()
    };
    let err = PlanningSession::new(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn test_outputs_serialize_to_json() {
    let mut session = processed_session();
    session.build_axes();

    let planes = serde_json::to_value(session.planes()).unwrap();
    assert_eq!(planes.as_array().unwrap().len(), 3);

    let angles = serde_json::to_value(session.rotation_angles()).unwrap();
    assert_eq!(angles["varus_valgus"], 0);

    let segments = serde_json::to_value(session.segments()).unwrap();
    assert_eq!(segments[0]["start_id"], "femurCenter");
}
