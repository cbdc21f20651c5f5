use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::RpcError;

pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Moves an encoded request to the server and returns the raw response body.
pub trait Transport {
    fn send(&self, body: Vec<u8>) -> Result<String, RpcError>;

    /// Endpoint the transport talks to, for diagnostics.
    fn endpoint(&self) -> &str;
}

/// Blocking HTTP(S) POST transport.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, body: Vec<u8>) -> Result<String, RpcError> {
        debug!("POST {} ({} bytes)", self.url, body.len());
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
