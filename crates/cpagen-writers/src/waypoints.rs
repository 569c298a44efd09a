//! ArduPilot `.waypoints` text writer (QGC WPL 110 protocol).
//!
//! One tab-separated line per waypoint: index, current, frame, command,
//! four params, lat, lon, alt, autocontinue. Line 0 is a takeoff command;
//! the first real waypoint is marked current.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use cpagen_core::types::GeoPoint;

use crate::error::WriteError;

const HEADER: &str = "QGC WPL 110";
const CMD_TAKEOFF: u32 = 22;
const CMD_WAYPOINT: u32 = 16;

/// Write a `.waypoints` file for an ordered GeoPoint sequence.
pub fn write_waypoints_file(path: &Path, waypoints: &[GeoPoint]) -> Result<(), WriteError> {
    if waypoints.is_empty() {
        return Err(WriteError::TooFewWaypoints {
            expected: 1,
            actual: 0,
        });
    }

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{HEADER}")?;

    // Index 0: takeoff to the first waypoint's altitude.
    writeln!(
        out,
        "0\t1\t0\t{CMD_TAKEOFF}\t0\t0\t0\t0\t0\t0\t{:.2}\t1",
        waypoints[0].alt_m
    )?;

    for (i, point) in waypoints.iter().enumerate() {
        let index = i + 1;
        let current = if index == 1 { 1 } else { 0 };
        writeln!(
            out,
            "{index}\t{current}\t0\t{CMD_WAYPOINT}\t0\t0\t0\t0\t{:.8}\t{:.8}\t{:.2}\t1",
            point.lat_deg, point.lon_deg, point.alt_m
        )?;
    }

    out.flush()?;
    debug!(
        "wrote waypoints file {} ({} points)",
        path.display(),
        waypoints.len()
    );
    Ok(())
}
