//! Validation log writer.
//!
//! Persists a timestamped, aviation-friendly record of a solved encounter:
//! the raw aviation-unit inputs as supplied by the caller, the solver's
//! self-verification metrics converted to feet, and the computed initial
//! states for both aircraft in feet/knots/ft-per-minute.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use cpagen_core::types::ConflictSolution;
use cpagen_core::units::{m_to_ft, mps_to_kt};

use crate::error::WriteError;

/// The raw caller inputs, in aviation units, echoed verbatim into the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AviationInputs {
    pub tcpa_sec: f64,
    pub cpa_horiz_ft: f64,
    pub os_lat_deg: f64,
    pub os_lon_deg: f64,
    pub os_alt_ft: f64,
    pub os_course_deg: f64,
    pub os_speed_kt: f64,
    pub os_vspeed_fpm: f64,
    pub rel_speed_kt: f64,
    pub conflict_dh_ft: f64,
    pub target_alt_offset_ft: f64,
    pub relative_heading_deg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationLog {
    pub metadata: LogMetadata,
    pub inputs: AviationInputs,
    pub cpa_metrics: CpaMetrics,
    pub computed_initial_state: InitialStates,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogMetadata {
    pub scenario_id: String,
    pub generated_utc: String,
    pub predicted_cpa_utc: String,
    pub tcpa_mmss: String,
}

/// CPA separation metrics in feet, rounded for readability.
#[derive(Debug, Serialize, Deserialize)]
pub struct CpaMetrics {
    pub horizontal_sep_ft: f64,
    pub vertical_sep_ft: f64,
    #[serde(rename = "3d_sep_ft")]
    pub sep_3d_ft: f64,
    /// True when the degenerate fallback axis was used; the horizontal
    /// placement is then not constrained by relative motion.
    pub degenerate_geometry: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitialStates {
    pub ownship: AircraftState,
    pub target: AircraftState,
}

/// One aircraft's computed initial state, aviation units.
#[derive(Debug, Serialize, Deserialize)]
pub struct AircraftState {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_ft: f64,
    pub course_deg: f64,
    pub speed_kt: f64,
    pub vertical_speed_fpm: f64,
}

/// Format whole seconds as mm:ss.
fn sec_to_mmss(seconds: f64) -> String {
    let total = seconds as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Build the log record at an explicit generation time.
///
/// Separated from [`save_validation_log`] so tests can pin the clock.
pub fn build_validation_log(
    inputs: &AviationInputs,
    solution: &ConflictSolution,
    solution_speeds_mps: (f64, f64),
    generated: DateTime<Utc>,
) -> ValidationLog {
    let (os_speed_mps, tgt_speed_mps) = solution_speeds_mps;
    // A tcpa too large for the calendar arithmetic leaves the predicted CPA
    // at the generation time rather than a silently truncated offset.
    let predicted_cpa = Duration::try_milliseconds((inputs.tcpa_sec * 1000.0).round() as i64)
        .and_then(|offset| generated.checked_add_signed(offset))
        .unwrap_or(generated);

    ValidationLog {
        metadata: LogMetadata {
            scenario_id: generated.format("%Y%m%dT%H%M%S%3fZ").to_string(),
            generated_utc: generated.to_rfc3339_opts(SecondsFormat::Millis, true),
            predicted_cpa_utc: predicted_cpa.to_rfc3339_opts(SecondsFormat::Millis, true),
            tcpa_mmss: sec_to_mmss(inputs.tcpa_sec),
        },
        inputs: inputs.clone(),
        cpa_metrics: CpaMetrics {
            horizontal_sep_ft: round2(m_to_ft(solution.cpa_sep_horiz_m)),
            vertical_sep_ft: round2(m_to_ft(solution.cpa_sep_vert_m)),
            sep_3d_ft: round2(m_to_ft(solution.cpa_sep_3d_m)),
            degenerate_geometry: solution.degenerate,
        },
        computed_initial_state: InitialStates {
            ownship: AircraftState {
                lat_deg: solution.os_start.lat_deg,
                lon_deg: solution.os_start.lon_deg,
                alt_ft: round2(m_to_ft(solution.os_start.alt_m)),
                course_deg: inputs.os_course_deg,
                speed_kt: round2(mps_to_kt(os_speed_mps)),
                vertical_speed_fpm: inputs.os_vspeed_fpm,
            },
            target: AircraftState {
                lat_deg: solution.tgt_start.lat_deg,
                lon_deg: solution.tgt_start.lon_deg,
                alt_ft: round2(m_to_ft(solution.tgt_start.alt_m)),
                course_deg: solution.tgt_course_deg,
                speed_kt: round2(mps_to_kt(tgt_speed_mps)),
                // Target vertical motion is not modeled by the solver.
                vertical_speed_fpm: 0.0,
            },
        },
    }
}

/// Timestamp and persist a validation record for a solved encounter.
///
/// `solution_speeds_mps` carries the (ownship, target) ground speeds in
/// metric, as handed to the solver.
pub fn save_validation_log(
    path: &Path,
    inputs: &AviationInputs,
    solution: &ConflictSolution,
    solution_speeds_mps: (f64, f64),
) -> Result<(), WriteError> {
    let log = build_validation_log(inputs, solution, solution_speeds_mps, Utc::now());
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &log)?;
    debug!(
        "wrote validation log {} (scenario {})",
        path.display(),
        log.metadata.scenario_id
    );
    Ok(())
}
