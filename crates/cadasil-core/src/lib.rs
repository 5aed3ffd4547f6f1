//! CADASIL prognosis core library.
//!
//! - Survival projection model (baseline hazard, simulator, markers, horizons)
//! - Narrative collaborator interface with fixed fallbacks
//! - Parameter loading, logging, output rendering and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod model;
pub mod narrative;
pub mod output;

pub use model::{simulate, simulate_with, ModelResult};
