use std::io::{self, Write};

use tracing::{debug, info, warn};

use sat_unregister::{
    BatchReport, DeletionOutcome, RunConfig, SatelliteApi, SatelliteClient, connect,
    delete_all_with,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Log in, delete every requested system, report, log out.
///
/// Success lines go to `out`, failures and status messages to `err`. Returns `Err` only when
/// the run never got past login; per-system failures are part of the returned report.
fn unregister<A: SatelliteApi + ?Sized>(
    api: &A,
    config: &RunConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<BatchReport, AppError> {
    writeln!(out, "Attempting to connect to {}", api.endpoint())?;

    let session = connect(api, &config.credentials).map_err(AppError::from_login)?;

    // from here on the session is held, so output errors are deferred until after logout
    let mut write_error = writeln!(err, "Login succeeded").err();
    let report = delete_all_with(api, &session, &config.ids, |result| {
        let written = match result.outcome {
            DeletionOutcome::Deleted => writeln!(out, "{result}"),
            DeletionOutcome::Failed { .. } => writeln!(err, "{result}"),
        };
        if let Err(e) = written {
            write_error.get_or_insert(e);
        }
    });

    if let Err(e) = api.logout(session) {
        warn!("logout failed: {e}");
        if let Err(e) = writeln!(err, "WARNING: logout failed: {e}") {
            write_error.get_or_insert(e);
        }
    } else {
        debug!("logged out");
    }

    if let Some(e) = write_error {
        return Err(e.into());
    }
    writeln!(out, "{report}")?;
    Ok(report)
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    let config = args.into_config().map_err(AppError::Config)?;
    debug!("Run configuration: {:?}", config);

    let client = SatelliteClient::new(&config.url).map_err(AppError::from_login)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let report = unregister(&client, &config, &mut stdout.lock(), &mut stderr.lock())?;

    // partial failure is reported, not fatal
    if !report.all_deleted() {
        info!("{} system(s) could not be unregistered", report.failed().count());
    }
    Ok(())
}
