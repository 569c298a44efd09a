//! KML track writer for visualizing an encounter in Google Earth.
//!
//! Emits one Placemark with an absolute-altitude LineString per call,
//! named by the vehicle callsign. Coordinates follow the KML order:
//! lon,lat,alt.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use cpagen_core::types::GeoPoint;

use crate::error::WriteError;

/// Write a KML file containing a single vehicle track.
pub fn write_kml_file(path: &Path, callsign: &str, points: &[GeoPoint]) -> Result<(), WriteError> {
    if points.is_empty() {
        return Err(WriteError::TooFewWaypoints {
            expected: 1,
            actual: 0,
        });
    }

    let mut coords = String::new();
    for p in points {
        coords.push_str(&format!(
            "          {:.8},{:.8},{:.2}\n",
            p.lon_deg, p.lat_deg, p.alt_m
        ));
    }

    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{callsign}</name>
    <Placemark>
      <name>{callsign} track</name>
      <LineString>
        <extrude>0</extrude>
        <tessellate>0</tessellate>
        <altitudeMode>absolute</altitudeMode>
        <coordinates>
{coords}        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>
"#
    );

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(content.as_bytes())?;
    out.flush()?;
    debug!(
        "wrote KML track {} for {callsign} ({} points)",
        path.display(),
        points.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kml_contains_track() {
        let pts = vec![
            GeoPoint::new(37.618805, -122.375416, 50.0),
            GeoPoint::new(37.618805, -122.361800, 158.0),
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ownship.kml");
        write_kml_file(&path, "OWNSHIP1", &pts).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<name>OWNSHIP1</name>"));
        assert!(text.contains("<altitudeMode>absolute</altitudeMode>"));
        // KML coordinate order is lon,lat,alt.
        assert!(text.contains("-122.37541600,37.61880500,50.00"));
        assert!(text.contains("-122.36180000,37.61880500,158.00"));
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.kml");
        assert!(matches!(
            write_kml_file(&path, "X", &[]),
            Err(WriteError::TooFewWaypoints { .. })
        ));
    }
}
