//! Physical constants and solver tuning parameters.

/// Spherical Earth radius used by the local tangent-plane projection (meters).
///
/// WGS-84 equatorial radius; the projection treats the Earth as a sphere of
/// this radius, which is adequate for the short-range offsets this crate
/// deals in.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Feet per meter conversion factor (exact international foot).
pub const FT_TO_M: f64 = 0.3048;

/// Knots to meters-per-second conversion factor.
pub const KT_TO_MPS: f64 = 0.514444;

/// Relative horizontal speed below which CPA geometry is degenerate (m/s).
///
/// When the target and ownship share a horizontal velocity, the relative
/// motion defines no perpendicular direction; the solver falls back to the
/// local +Y axis instead of dividing by zero.
pub const DEGENERATE_VREL_EPS: f64 = 1e-6;

/// Absolute latitude beyond which projection accuracy is flagged (degrees).
///
/// The equirectangular cos(lat) term approaches zero toward the poles, so
/// longitude offsets blow up. Not fatal, but worth a warning.
pub const PROJECTION_WARN_LAT_DEG: f64 = 85.0;
