//! Aviation unit conversions.
//!
//! Pure scalar conversions between the aviation units used at the front-end
//! boundary (feet, knots, feet per minute) and the solver's internal metric
//! units (meters, m/s). NaN and infinity propagate; rejection of non-finite
//! values happens at the scenario boundary, not here.

use crate::constants::{FT_TO_M, KT_TO_MPS};

/// Feet to meters.
pub fn ft_to_m(ft: f64) -> f64 {
    ft * FT_TO_M
}

/// Meters to feet.
pub fn m_to_ft(m: f64) -> f64 {
    m / FT_TO_M
}

/// Knots to meters per second.
pub fn kt_to_mps(kt: f64) -> f64 {
    kt * KT_TO_MPS
}

/// Meters per second to knots.
pub fn mps_to_kt(mps: f64) -> f64 {
    mps / KT_TO_MPS
}

/// Feet per minute to meters per second.
pub fn fpm_to_mps(fpm: f64) -> f64 {
    ft_to_m(fpm) / 60.0
}

/// Meters per second to feet per minute.
pub fn mps_to_fpm(mps: f64) -> f64 {
    m_to_ft(mps) * 60.0
}
