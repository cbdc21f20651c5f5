use clap::Parser;

use sat_unregister::{DEFAULT_SATELLITE_URL, RunConfig, SystemId};

#[derive(Parser)]
#[command(
    name = "sat-unregister",
    version,
    about = "Unregister systems from a Red Hat Satellite 5.x server"
)]
pub struct CliArgs {
    /// Satellite user
    #[arg(short, long)]
    pub user: String,

    /// Satellite password
    #[arg(short, long)]
    pub password: String,

    /// System id(s) to unregister, processed in the given order
    #[arg(short, long, required = true, num_args = 1..)]
    pub ids: Vec<SystemId>,

    /// XML-RPC endpoint of the Satellite server
    #[arg(long, default_value = DEFAULT_SATELLITE_URL)]
    pub url: String,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    pub fn into_config(self) -> sat_unregister::Result<RunConfig> {
        RunConfig::new(self.url, self.user, self.password, self.ids)
    }
}
