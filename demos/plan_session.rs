//! Planning session driver
//!
//! Feeds a landmark file through a planning session the way an interactive
//! front end would (select, pick, back for each landmark), builds the axes,
//! runs processing, applies the requested rotations and prints the derived
//! geometry as JSON.
//!
//! ```text
//! cargo run --bin plan_session -- demos/data/right_femur_landmarks.json -r vv+ -r vv+ -r fe-
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use femurplan_core::{Direction, LandmarkId, LineSegment, Point3f, RotationAxis};
use femurplan_planning::{
    AxisSegment, Landmark, Notification, PipelineState, Plane, PlaneKind, PlanningConfig,
    PlanningSession, ReferenceLines, RotationAngles,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Derive femur reference geometry from a landmark file")]
struct Args {
    /// JSON object mapping landmark ids (camelCase) to [x, y, z]
    landmarks: PathBuf,

    /// Optional JSON planning configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rotation requests applied in order: vv+, vv-, fe+ or fe-
    #[arg(short, long = "rotate", value_parser = parse_rotation)]
    rotations: Vec<(RotationAxis, Direction)>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    state: PipelineState,
    landmarks: Vec<&'a Landmark>,
    segments: &'a [AxisSegment],
    planes: Vec<PlaneOutline>,
    tea_line: Option<LineSegment>,
    reference_lines: Option<ReferenceLines>,
    rotation: RotationAngles,
    notifications: Vec<Notification>,
}

/// A plane patch as a renderer draws it
#[derive(Serialize)]
struct PlaneOutline {
    kind: PlaneKind,
    color: u32,
    corners: [Point3f; 4],
}

impl From<Plane> for PlaneOutline {
    fn from(plane: Plane) -> Self {
        Self {
            kind: plane.kind,
            color: plane.kind.color(),
            corners: plane.corners(),
        }
    }
}

fn parse_rotation(s: &str) -> std::result::Result<(RotationAxis, Direction), String> {
    let (axis, direction) = if let Some(axis) = s.strip_suffix('+') {
        (axis, Direction::Positive)
    } else if let Some(axis) = s.strip_suffix('-') {
        (axis, Direction::Negative)
    } else {
        return Err(format!("'{s}' must end with + or -"));
    };
    let axis = match axis.to_ascii_lowercase().as_str() {
        "vv" => RotationAxis::VarusValgus,
        "fe" => RotationAxis::FlexionExtension,
        other => return Err(format!("unknown rotation axis '{other}', expected vv or fe")),
    };
    Ok((axis, direction))
}

fn load_config(path: Option<&Path>) -> Result<PlanningConfig> {
    let Some(path) = path else {
        return Ok(PlanningConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_landmarks(path: &Path) -> Result<BTreeMap<LandmarkId, Point3f>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading landmarks {}", path.display()))?;
    let raw: BTreeMap<LandmarkId, [f32; 3]> = serde_json::from_str(&text)
        .with_context(|| format!("parsing landmarks {}", path.display()))?;
    Ok(raw
        .into_iter()
        .map(|(id, [x, y, z])| (id, Point3f::new(x, y, z)))
        .collect())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let mut session = PlanningSession::new(config)?;

    for (id, point) in load_landmarks(&args.landmarks)? {
        session.select_landmark(id);
        session.on_landmark_pick(id, point)?;
        session.back();
    }

    let report = session.build_axes();
    log::info!("Axes drawn: {:?}", report.created);

    session
        .trigger_processing()
        .context("processing the landmark set")?;

    // Clamp rejections are reported in the output rather than aborting
    for (axis, direction) in args.rotations {
        let _ = session.rotate(axis, direction);
    }

    let notifications = session.drain_notifications();
    let summary = Summary {
        state: session.state(),
        landmarks: session.landmarks().collect(),
        segments: session.segments(),
        planes: session.planes().into_iter().map(PlaneOutline::from).collect(),
        tea_line: session.tea_line(),
        reference_lines: session.reference_lines(),
        rotation: session.rotation_angles(),
        notifications,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}
