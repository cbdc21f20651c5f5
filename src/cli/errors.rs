use thiserror::Error;

use sat_unregister::{Error, RpcError};

/// Application-specific errors for the CLI. Any of these ends the run with a non-zero status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed login. ERROR code: {code}\tMessage: {message}")]
    LoginFault { code: i64, message: String },

    #[error("Failed login. ERROR code: {kind}\tString: {description}")]
    LoginTransport { kind: String, description: String },

    #[error("Failed login: {0}")]
    Login(Error),

    #[error("Invalid arguments: {0}")]
    Config(Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Classify an error raised by `connect`.
    pub fn from_login(err: Error) -> Self {
        match err {
            Error::Rpc(RpcError::Fault { code, message }) => AppError::LoginFault { code, message },
            Error::Rpc(rpc) => AppError::LoginTransport {
                kind: rpc.kind(),
                description: rpc.describe(),
            },
            other => AppError::Login(other),
        }
    }
}
