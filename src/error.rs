//! Crate-level error type and `Result` alias.
//! Wraps XML-RPC failures and adds semantic variants for argument validation.
use thiserror::Error;

use crate::rpc::RpcError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("XML-RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Unexpected response to {method}: {detail}")]
    UnexpectedResponse { method: &'static str, detail: String },
}
