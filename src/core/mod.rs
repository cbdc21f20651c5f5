//! Run parameters shared by the CLI and library callers.
pub mod params;
