//! Vehicle initialization YAML writer for a multi-SITL runner.
//!
//! This boundary speaks aviation units: the caller converts the solved
//! metric state (via `cpagen_core::units`) before building a
//! [`VehicleInit`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::WriteError;

/// Initial conditions for one simulated vehicle, aviation units.
#[derive(Debug, Clone)]
pub struct VehicleInit {
    pub callsign: String,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_ft: f64,
    pub course_deg: f64,
    pub ground_speed_kt: f64,
    pub vertical_speed_fpm: f64,
    /// Waypoints file the runner should load for this vehicle.
    pub waypoints_file: String,
}

/// Write a vehicle initialization file.
pub fn write_yaml_file(path: &Path, init: &VehicleInit) -> Result<(), WriteError> {
    let content = format!(
        r#"# Vehicle initialization file for multi-SITL runner
# Units:
#   - heading/course: degrees true (0-360)
#   - ground_speed: knots
#   - vertical_speed: feet per minute (positive = climb)

version: 1

vehicle:
  callsign: "{callsign}"

sitl:
  home:
    lat_deg: {lat_deg}
    lon_deg: {lon_deg}
    alt_ft: {alt_ft}

initial_conditions:
  course_heading_deg: {course_deg}
  ground_speed_kt: {ground_speed_kt}
  vertical_speed_fpm: {vertical_speed_fpm}
  start_mode: midflight

mission:
  waypoints_file: "{waypoints_file}"
  starting_waypoint_index: 0
  auto_set_mode: "AUTO"
  start_automatically: true
"#,
        callsign = init.callsign,
        lat_deg = init.lat_deg,
        lon_deg = init.lon_deg,
        alt_ft = init.alt_ft,
        course_deg = init.course_deg,
        ground_speed_kt = init.ground_speed_kt,
        vertical_speed_fpm = init.vertical_speed_fpm,
        waypoints_file = init.waypoints_file,
    );

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(content.as_bytes())?;
    out.flush()?;
    debug!("wrote vehicle init {} for {}", path.display(), init.callsign);
    Ok(())
}
