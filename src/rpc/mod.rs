//! XML-RPC plumbing: the value model, `quick-xml` based request/response codec,
//! an HTTP transport seam and a small client that ties them together.
pub mod client;
pub mod codec;
pub mod transport;
pub mod value;

pub use client::XmlRpcClient;
pub use transport::{HttpTransport, Transport};
pub use value::Value;

use thiserror::Error;

/// Errors raised while invoking a remote method
#[derive(Debug, Error)]
pub enum RpcError {
    /// Remote-reported failure carried in a `<fault>` response.
    #[error("Fault {code}: {message}")]
    Fault { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: server answered with status {status}")]
    Http { status: u16 },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML-RPC response: {0}")]
    Malformed(String),
}

impl RpcError {
    /// Display text followed by any underlying causes not already part of it.
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !text.contains(&cause_text) {
                text.push_str(": ");
                text.push_str(&cause_text);
            }
            source = cause.source();
        }
        text
    }

    /// Short classification of a failure, printed next to its description.
    ///
    /// Transport failures report the OS error code when one sits in the cause chain.
    pub fn kind(&self) -> String {
        match self {
            RpcError::Fault { code, .. } => code.to_string(),
            RpcError::Transport(e) => match os_error_code(e) {
                Some(code) => code.to_string(),
                None if e.is_timeout() => "timeout".to_string(),
                None if e.is_connect() => "connect".to_string(),
                None if e.is_builder() => "builder".to_string(),
                None => "request".to_string(),
            },
            RpcError::Http { status } => status.to_string(),
            RpcError::Xml(_) => "xml".to_string(),
            RpcError::Malformed(_) => "protocol".to_string(),
        }
    }
}

/// First raw OS error code found walking `err` and its sources.
pub fn os_error_code(err: &(dyn std::error::Error + 'static)) -> Option<i32> {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(code) = cause
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::raw_os_error)
        {
            return Some(code);
        }
        current = cause.source();
    }
    None
}
