//! sat-unregister CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, run the unregistration and
//! exit non-zero only when the run could not get past login.
//! For programmatic use, prefer the library API (`sat_unregister::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
