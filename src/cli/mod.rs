//! Command Line Interface (CLI) layer for sat-unregister.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`): login, per-system deletion,
//! reporting and logout. It wires user-provided options to the library
//! functionality exposed via `sat_unregister::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
