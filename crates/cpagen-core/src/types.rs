//! Fundamental geometric types for encounter geometry.

use serde::{Deserialize, Serialize};

/// Absolute geographic position.
///
/// Altitude is height above a fixed local datum in meters — the crate does
/// not distinguish MSL from AGL; callers interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

/// Displacement in a local tangent-plane frame anchored at a reference
/// [`GeoPoint`].
///
/// Canonical axis convention, shared with the projection and the solver's
/// velocity construction: `dx` is the cosine axis of a course angle and maps
/// to longitude, `dy` is the sine axis and maps to latitude, `dz` is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalVector {
    pub dx_m: f64,
    pub dy_m: f64,
    pub dz_m: f64,
}

/// Encounter request — all fields metric at this boundary.
///
/// Aviation-unit input (feet, knots, ft/min) is converted by the front end
/// via [`crate::units`] before a scenario is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictScenario {
    /// Time to closest point of approach, seconds. Must be positive.
    pub tcpa_sec: f64,
    /// Requested horizontal separation at CPA, meters.
    pub cpa_horiz_m: f64,
    /// Ownship initial position.
    pub os_start: GeoPoint,
    /// Ownship course in degrees, resolved to [0, 360).
    pub os_course_deg: f64,
    /// Ownship ground speed, m/s.
    pub os_speed_mps: f64,
    /// Ownship vertical speed, m/s (positive = climb).
    pub os_vspeed_mps: f64,
    /// Target ground speed, m/s.
    pub rel_speed_mps: f64,
    /// Requested vertical separation at CPA, meters.
    /// Positive places the target above the ownship.
    pub conflict_dh_m: f64,
    /// Additional target start-altitude bias, meters, layered on top of the
    /// geometrically required vertical offset.
    pub target_alt_offset_m: f64,
    /// Target course relative to ownship, degrees: 0 = head-on, 90 =
    /// crossing from the right, 180 = overtaking, 270 = crossing from the
    /// left.
    pub relative_heading_deg: f64,
}

/// Solved encounter geometry.
///
/// The three separation metrics are recomputed independently from the solved
/// start points and velocities so callers can self-verify the solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictSolution {
    pub os_start: GeoPoint,
    pub os_cpa: GeoPoint,
    pub tgt_start: GeoPoint,
    pub tgt_cpa: GeoPoint,
    /// Target absolute course in degrees [0, 360).
    pub tgt_course_deg: f64,
    /// Horizontal separation at CPA recomputed from the solved geometry, meters.
    pub cpa_sep_horiz_m: f64,
    /// Vertical separation at CPA (absolute value), meters.
    pub cpa_sep_vert_m: f64,
    /// 3-D separation at CPA, meters.
    pub cpa_sep_3d_m: f64,
    /// True when relative horizontal motion was below the degeneracy
    /// threshold and the fallback perpendicular axis was used.
    pub degenerate: bool,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            alt_m,
        }
    }
}

impl LocalVector {
    pub fn new(dx_m: f64, dy_m: f64, dz_m: f64) -> Self {
        Self { dx_m, dy_m, dz_m }
    }

    /// Horizontal magnitude (ignoring the vertical component), meters.
    pub fn horizontal_mag(&self) -> f64 {
        self.dx_m.hypot(self.dy_m)
    }

    /// Full 3-D magnitude, meters.
    pub fn mag(&self) -> f64 {
        (self.dx_m * self.dx_m + self.dy_m * self.dy_m + self.dz_m * self.dz_m).sqrt()
    }
}
