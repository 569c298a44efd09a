//! Core geometry for two-aircraft CPA encounter generation.
//!
//! This crate defines the vocabulary shared across all other crates —
//! geographic points, local tangent-plane vectors, the conflict scenario
//! input and solution output — plus the three pure components: unit
//! conversions, the local equirectangular projection, and the CPA solver.
//! It performs no I/O and has no dependency on any runtime framework.

pub mod constants;
pub mod error;
pub mod projection;
pub mod solver;
pub mod types;
pub mod units;
