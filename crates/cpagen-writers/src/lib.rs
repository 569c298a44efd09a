//! File-format writers consuming solved encounter geometry.
//!
//! Each writer takes a caller-supplied path and explicit values — there is
//! no shared configuration and no fixed relative filename. The core solver
//! stays oblivious to every format here.

pub mod error;
pub mod kml;
pub mod plan;
pub mod validation;
pub mod waypoints;
pub mod yaml;
