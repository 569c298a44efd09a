//! QGroundControl `.plan` mission document writer.
//!
//! Emits the JSON mission schema QGC expects: a takeoff item first, then one
//! NAV_WAYPOINT item per supplied point, with the planned home position
//! alongside. The caller supplies the ordered GeoPoint sequence and the home
//! point; everything schema-specific lives here.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use cpagen_core::types::GeoPoint;

use crate::error::WriteError;

/// MAV_CMD_NAV_TAKEOFF.
const CMD_TAKEOFF: u32 = 22;
/// MAV_CMD_NAV_WAYPOINT.
const CMD_WAYPOINT: u32 = 16;
/// MAV_FRAME_GLOBAL (used for the takeoff item).
const FRAME_GLOBAL: u32 = 0;
/// MAV_FRAME_GLOBAL_RELATIVE_ALT (used for waypoints).
const FRAME_RELATIVE_ALT: u32 = 3;

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(rename = "fileType")]
    pub file_type: String,
    #[serde(rename = "geoFence")]
    pub geo_fence: GeoFence,
    #[serde(rename = "groundStation")]
    pub ground_station: String,
    pub mission: Mission,
    #[serde(rename = "rallyPoints")]
    pub rally_points: RallyPoints,
    pub version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeoFence {
    pub circles: Vec<serde_json::Value>,
    pub polygons: Vec<serde_json::Value>,
    pub version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RallyPoints {
    pub points: Vec<serde_json::Value>,
    pub version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Mission {
    #[serde(rename = "cruiseSpeed")]
    pub cruise_speed: f64,
    #[serde(rename = "firmwareType")]
    pub firmware_type: u32,
    #[serde(rename = "hoverSpeed")]
    pub hover_speed: f64,
    pub items: Vec<MissionItem>,
    #[serde(rename = "plannedHomePosition")]
    pub planned_home_position: [f64; 3],
    #[serde(rename = "vehicleType")]
    pub vehicle_type: u32,
    pub version: u32,
}

/// A single SimpleItem in the mission item list.
#[derive(Debug, Serialize, Deserialize)]
pub struct MissionItem {
    #[serde(rename = "AMSLAltAboveTerrain")]
    pub amsl_alt_above_terrain: f64,
    #[serde(rename = "Altitude")]
    pub altitude: f64,
    #[serde(rename = "AltitudeMode")]
    pub altitude_mode: u32,
    #[serde(rename = "autoContinue")]
    pub auto_continue: bool,
    pub command: u32,
    #[serde(rename = "doJumpId")]
    pub do_jump_id: u32,
    pub frame: u32,
    /// param1..4, then lat, lon, alt. Never null.
    pub params: [f64; 7],
    #[serde(rename = "type")]
    pub item_type: String,
}

impl MissionItem {
    fn takeoff(alt_m: f64, idx: u32) -> Self {
        Self {
            amsl_alt_above_terrain: 0.0,
            altitude: alt_m,
            altitude_mode: 1,
            auto_continue: true,
            command: CMD_TAKEOFF,
            do_jump_id: idx,
            frame: FRAME_GLOBAL,
            params: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, alt_m],
            item_type: "SimpleItem".to_string(),
        }
    }

    fn waypoint(point: &GeoPoint, idx: u32) -> Self {
        Self {
            amsl_alt_above_terrain: 0.0,
            altitude: point.alt_m,
            altitude_mode: 1,
            auto_continue: true,
            command: CMD_WAYPOINT,
            do_jump_id: idx,
            frame: FRAME_RELATIVE_ALT,
            params: [
                0.0,
                0.0,
                0.0,
                0.0,
                point.lat_deg,
                point.lon_deg,
                point.alt_m,
            ],
            item_type: "SimpleItem".to_string(),
        }
    }
}

/// Build the mission document for an ordered waypoint sequence.
///
/// The first item is a takeoff to the first waypoint's altitude; waypoints
/// follow in order. Requires at least one waypoint.
pub fn build_plan(waypoints: &[GeoPoint], home: &GeoPoint) -> Result<PlanFile, WriteError> {
    if waypoints.is_empty() {
        return Err(WriteError::TooFewWaypoints {
            expected: 1,
            actual: 0,
        });
    }

    let mut items = Vec::with_capacity(waypoints.len() + 1);
    items.push(MissionItem::takeoff(waypoints[0].alt_m, 0));
    for (i, point) in waypoints.iter().enumerate() {
        items.push(MissionItem::waypoint(point, (i + 1) as u32));
    }

    Ok(PlanFile {
        file_type: "Plan".to_string(),
        geo_fence: GeoFence {
            circles: vec![],
            polygons: vec![],
            version: 2,
        },
        ground_station: "QGroundControl".to_string(),
        mission: Mission {
            cruise_speed: 15.0,
            firmware_type: 12,
            hover_speed: 5.0,
            items,
            planned_home_position: [home.lat_deg, home.lon_deg, home.alt_m],
            vehicle_type: 2,
            version: 2,
        },
        rally_points: RallyPoints {
            points: vec![],
            version: 2,
        },
        version: 1,
    })
}

/// Write a `.plan` mission file for the given waypoint sequence.
pub fn write_plan_file(
    path: &Path,
    waypoints: &[GeoPoint],
    home: &GeoPoint,
) -> Result<(), WriteError> {
    let plan = build_plan(waypoints, home)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &plan)?;
    debug!(
        "wrote plan file {} ({} mission items)",
        path.display(),
        plan.mission.items.len()
    );
    Ok(())
}
