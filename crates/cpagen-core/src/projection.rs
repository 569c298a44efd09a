//! Local tangent-plane projection between meter offsets and lat/lon.
//!
//! Uses a spherical-Earth equirectangular approximation: the plane is flat,
//! one meter of `dy` is a fixed latitude increment, and one meter of `dx`
//! scales with cos(latitude). Valid for offsets small relative to the Earth
//! radius (well under ~50 km); error grows with offset size and toward the
//! poles, where the cos term collapses. This is a deliberate simplification
//! for short-range encounter geometry, not a general geodesy library.

use log::warn;

use crate::constants::{EARTH_RADIUS_M, PROJECTION_WARN_LAT_DEG};

/// Offset a reference lat/lon (degrees) by a local tangent-plane
/// displacement in meters, returning the new (lat, lon) in degrees.
///
/// `dx_m` is the cosine-axis offset and maps to longitude; `dy_m` is the
/// sine-axis offset and maps to latitude. This pairing is the single
/// canonical convention shared with the solver's velocity construction.
pub fn project(lat0_deg: f64, lon0_deg: f64, dx_m: f64, dy_m: f64) -> (f64, f64) {
    warn_near_pole(lat0_deg);

    let lat0_rad = lat0_deg.to_radians();

    let dlat = dy_m / EARTH_RADIUS_M;
    let dlon = dx_m / (EARTH_RADIUS_M * lat0_rad.cos());

    let lat = lat0_deg + dlat.to_degrees();
    let lon = lon0_deg + dlon.to_degrees();
    (lat, lon)
}

/// Inverse of [`project`]: the local (dx, dy) in meters that carries the
/// reference point to the given lat/lon.
pub fn unproject(lat0_deg: f64, lon0_deg: f64, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
    warn_near_pole(lat0_deg);

    let lat0_rad = lat0_deg.to_radians();

    let dy_m = (lat_deg - lat0_deg).to_radians() * EARTH_RADIUS_M;
    let dx_m = (lon_deg - lon0_deg).to_radians() * EARTH_RADIUS_M * lat0_rad.cos();
    (dx_m, dy_m)
}

/// Flag reference latitudes where the flat-plane approximation degrades.
fn warn_near_pole(lat0_deg: f64) {
    if lat0_deg.abs() > PROJECTION_WARN_LAT_DEG {
        warn!(
            "projection reference latitude {lat0_deg:.3}° is within {:.0}° of a pole; \
             equirectangular accuracy degrades here",
            90.0 - PROJECTION_WARN_LAT_DEG
        );
    }
}
