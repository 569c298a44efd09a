//! Command-line front end for the CPA encounter generator.
//!
//! Collects the scenario in aviation units (feet, knots, ft/min), converts
//! to metric, solves the encounter geometry, and writes mission files for
//! both vehicles plus a validation log into the output directory.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

use cpagen_core::solver::solve;
use cpagen_core::types::{ConflictScenario, GeoPoint};
use cpagen_core::units::{fpm_to_mps, ft_to_m, kt_to_mps, m_to_ft, mps_to_fpm, mps_to_kt};
use cpagen_writers::kml::write_kml_file;
use cpagen_writers::plan::write_plan_file;
use cpagen_writers::validation::{save_validation_log, AviationInputs};
use cpagen_writers::waypoints::write_waypoints_file;
use cpagen_writers::yaml::{write_yaml_file, VehicleInit};

/// Generate a two-aircraft CPA encounter for flight-simulation testing.
#[derive(Parser, Debug)]
#[command(name = "cpagen", version, about)]
struct Cli {
    /// Increase log verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Time to closest point of approach, seconds
    #[arg(long)]
    tcpa: f64,

    /// Horizontal separation at CPA, feet
    #[arg(long)]
    cpa_ft: f64,

    /// Ownship start latitude, degrees
    #[arg(long, allow_negative_numbers = true)]
    os_lat: f64,

    /// Ownship start longitude, degrees
    #[arg(long, allow_negative_numbers = true)]
    os_lon: f64,

    /// Ownship start altitude, feet
    #[arg(long, allow_negative_numbers = true)]
    os_alt_ft: f64,

    /// Ownship course, degrees [0, 360)
    #[arg(long, allow_negative_numbers = true)]
    os_course: f64,

    /// Ownship ground speed, knots
    #[arg(long)]
    os_speed_kt: f64,

    /// Ownship vertical speed, feet per minute (positive = climb)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    os_vspeed_fpm: f64,

    /// Target ground speed, knots
    #[arg(long)]
    rel_speed_kt: f64,

    /// Vertical separation at CPA, feet (positive = target above)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    conflict_dh_ft: f64,

    /// Extra target start-altitude bias, feet
    #[arg(long, default_value_t = 164.0, allow_negative_numbers = true)]
    tgt_alt_offset_ft: f64,

    /// Target heading relative to ownship, degrees:
    /// 0 = head-on, 90 = crossing from the right, 180 = overtaking,
    /// 270 = crossing from the left
    #[arg(long, allow_negative_numbers = true)]
    relative_heading: f64,

    /// Ownship callsign
    #[arg(long, default_value = "OWNSHIP1")]
    os_callsign: String,

    /// Target callsign
    #[arg(long, default_value = "TARGET1")]
    tgt_callsign: String,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let inputs = AviationInputs {
        tcpa_sec: cli.tcpa,
        cpa_horiz_ft: cli.cpa_ft,
        os_lat_deg: cli.os_lat,
        os_lon_deg: cli.os_lon,
        os_alt_ft: cli.os_alt_ft,
        os_course_deg: cli.os_course,
        os_speed_kt: cli.os_speed_kt,
        os_vspeed_fpm: cli.os_vspeed_fpm,
        rel_speed_kt: cli.rel_speed_kt,
        conflict_dh_ft: cli.conflict_dh_ft,
        target_alt_offset_ft: cli.tgt_alt_offset_ft,
        relative_heading_deg: cli.relative_heading,
    };

    let scenario = scenario_from_inputs(&inputs);
    let solution = solve(&scenario).context("scenario rejected by solver")?;

    info!(
        "solved encounter: target course {:.1}°, CPA separation {:.1} m horizontal / {:.1} m vertical / {:.1} m 3-D{}",
        solution.tgt_course_deg,
        solution.cpa_sep_horiz_m,
        solution.cpa_sep_vert_m,
        solution.cpa_sep_3d_m,
        if solution.degenerate {
            " (degenerate geometry, fallback axis)"
        } else {
            ""
        }
    );

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;

    let os_track = [solution.os_start, solution.os_cpa];
    let tgt_track = [solution.tgt_start, solution.tgt_cpa];
    let home = solution.os_start;

    write_plan_file(&cli.out_dir.join("ownship.plan"), &os_track, &home)?;
    write_plan_file(&cli.out_dir.join("target.plan"), &tgt_track, &home)?;
    write_waypoints_file(&cli.out_dir.join("ownship.waypoints"), &os_track)?;
    write_waypoints_file(&cli.out_dir.join("target.waypoints"), &tgt_track)?;
    write_kml_file(&cli.out_dir.join("ownship.kml"), &cli.os_callsign, &os_track)?;
    write_kml_file(&cli.out_dir.join("target.kml"), &cli.tgt_callsign, &tgt_track)?;

    write_yaml_file(
        &cli.out_dir.join("ownship.yaml"),
        &VehicleInit {
            callsign: cli.os_callsign.clone(),
            lat_deg: solution.os_start.lat_deg,
            lon_deg: solution.os_start.lon_deg,
            alt_ft: m_to_ft(solution.os_start.alt_m),
            course_deg: scenario.os_course_deg.rem_euclid(360.0),
            ground_speed_kt: mps_to_kt(scenario.os_speed_mps),
            vertical_speed_fpm: mps_to_fpm(scenario.os_vspeed_mps),
            waypoints_file: "ownship.waypoints".to_string(),
        },
    )?;
    write_yaml_file(
        &cli.out_dir.join("target.yaml"),
        &VehicleInit {
            callsign: cli.tgt_callsign.clone(),
            lat_deg: solution.tgt_start.lat_deg,
            lon_deg: solution.tgt_start.lon_deg,
            alt_ft: m_to_ft(solution.tgt_start.alt_m),
            course_deg: solution.tgt_course_deg,
            ground_speed_kt: mps_to_kt(scenario.rel_speed_mps),
            vertical_speed_fpm: 0.0,
            waypoints_file: "target.waypoints".to_string(),
        },
    )?;

    save_validation_log(
        &cli.out_dir.join("validation_log.json"),
        &inputs,
        &solution,
        (scenario.os_speed_mps, scenario.rel_speed_mps),
    )?;

    println!(
        "Generated encounter in {}:\n  ownship start ({:.6}, {:.6}) at {:.1} ft\n  target  start ({:.6}, {:.6}) at {:.1} ft, course {:.1}°",
        cli.out_dir.display(),
        solution.os_start.lat_deg,
        solution.os_start.lon_deg,
        m_to_ft(solution.os_start.alt_m),
        solution.tgt_start.lat_deg,
        solution.tgt_start.lon_deg,
        m_to_ft(solution.tgt_start.alt_m),
        solution.tgt_course_deg,
    );

    Ok(())
}

/// Convert aviation-unit inputs to the solver's metric scenario.
fn scenario_from_inputs(inputs: &AviationInputs) -> ConflictScenario {
    ConflictScenario {
        tcpa_sec: inputs.tcpa_sec,
        cpa_horiz_m: ft_to_m(inputs.cpa_horiz_ft),
        os_start: GeoPoint::new(
            inputs.os_lat_deg,
            inputs.os_lon_deg,
            ft_to_m(inputs.os_alt_ft),
        ),
        os_course_deg: inputs.os_course_deg,
        os_speed_mps: kt_to_mps(inputs.os_speed_kt),
        os_vspeed_mps: fpm_to_mps(inputs.os_vspeed_fpm),
        rel_speed_mps: kt_to_mps(inputs.rel_speed_kt),
        conflict_dh_m: ft_to_m(inputs.conflict_dh_ft),
        target_alt_offset_m: ft_to_m(inputs.target_alt_offset_ft),
        relative_heading_deg: inputs.relative_heading_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_full_invocation() {
        let cli = Cli::parse_from([
            "cpagen",
            "--tcpa",
            "60",
            "--cpa-ft",
            "656",
            "--os-lat",
            "37.618805",
            "--os-lon",
            "-122.375416",
            "--os-alt-ft",
            "164",
            "--os-course",
            "90",
            "--os-speed-kt",
            "40",
            "--rel-speed-kt",
            "20",
            "--relative-heading",
            "95",
            "--out-dir",
            "/tmp/encounter",
        ]);
        assert_eq!(cli.tcpa, 60.0);
        assert_eq!(cli.os_course, 90.0);
        assert_eq!(cli.os_vspeed_fpm, 0.0);
        assert_eq!(cli.os_callsign, "OWNSHIP1");
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/encounter"));
    }

    #[test]
    fn test_cli_accepts_space_separated_negative_values() {
        // Western longitudes, descents, and below-ownship separations are
        // all legitimate inputs and arrive as `--flag -value`.
        let cli = Cli::parse_from([
            "cpagen",
            "--tcpa",
            "60",
            "--cpa-ft",
            "656",
            "--os-lat",
            "-37.618805",
            "--os-lon",
            "-122.375416",
            "--os-alt-ft",
            "-50",
            "--os-course",
            "90",
            "--os-speed-kt",
            "40",
            "--os-vspeed-fpm",
            "-600",
            "--rel-speed-kt",
            "20",
            "--conflict-dh-ft",
            "-100",
            "--tgt-alt-offset-ft",
            "-164",
            "--relative-heading",
            "-90",
        ]);
        assert_eq!(cli.os_lat, -37.618805);
        assert_eq!(cli.os_lon, -122.375416);
        assert_eq!(cli.os_alt_ft, -50.0);
        assert_eq!(cli.os_vspeed_fpm, -600.0);
        assert_eq!(cli.conflict_dh_ft, -100.0);
        assert_eq!(cli.tgt_alt_offset_ft, -164.0);
        assert_eq!(cli.relative_heading, -90.0);
    }

    #[test]
    fn test_scenario_conversion_is_metric() {
        let inputs = AviationInputs {
            tcpa_sec: 60.0,
            cpa_horiz_ft: 1000.0,
            os_lat_deg: 37.0,
            os_lon_deg: -122.0,
            os_alt_ft: 164.0,
            os_course_deg: 90.0,
            os_speed_kt: 40.0,
            os_vspeed_fpm: 600.0,
            rel_speed_kt: 20.0,
            conflict_dh_ft: 100.0,
            target_alt_offset_ft: 164.0,
            relative_heading_deg: 0.0,
        };
        let scenario = scenario_from_inputs(&inputs);
        assert!((scenario.cpa_horiz_m - 304.8).abs() < 1e-9);
        assert!((scenario.os_speed_mps - 20.57776).abs() < 1e-9);
        assert!((scenario.os_vspeed_mps - 3.048).abs() < 1e-9);
        assert!((scenario.os_start.alt_m - 49.9872).abs() < 1e-9);
    }
}
