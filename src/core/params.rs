use crate::error::{Error, Result};
use crate::types::SystemId;

/// Endpoint used when no `--url` is given.
pub const DEFAULT_SATELLITE_URL: &str = "https://xmlrpc.elupdate.euro-linux.com/rpc/api";

/// Login credentials. `Debug` never shows the password.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything one unregistration run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub credentials: Credentials,
    /// Systems to delete, processed in this order
    pub ids: Vec<SystemId>,
}

impl RunConfig {
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        ids: Vec<SystemId>,
    ) -> Result<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::InvalidArgument { arg: "url", value: url });
        }
        if ids.is_empty() {
            return Err(Error::MissingArgument {
                arg: "--ids".to_string(),
            });
        }
        Ok(Self {
            url,
            credentials: Credentials {
                user: user.into(),
                password: password.into(),
            },
            ids,
        })
    }
}
