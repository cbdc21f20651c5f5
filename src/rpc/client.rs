use tracing::debug;

use super::RpcError;
use super::codec::{decode_response, encode_call};
use super::transport::Transport;
use super::value::Value;

/// Invokes named remote methods over a [`Transport`].
pub struct XmlRpcClient<T> {
    transport: T,
}

impl<T: Transport> XmlRpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Call `method` with positional `params`, returning the decoded result or the remote fault.
    pub fn call(&self, method: &str, params: &[Value]) -> Result<Value, RpcError> {
        let body = encode_call(method, params)?;
        debug!("calling {method} with {} param(s)", params.len());
        let response = self.transport.send(body)?;
        let result = decode_response(&response);
        if let Err(e) = &result {
            debug!("{method} failed: {e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Canned {
        reply: String,
        sent: RefCell<Vec<String>>,
    }

    impl Transport for Canned {
        fn send(&self, body: Vec<u8>) -> Result<String, RpcError> {
            self.sent
                .borrow_mut()
                .push(String::from_utf8(body).unwrap());
            Ok(self.reply.clone())
        }

        fn endpoint(&self) -> &str {
            "mem://canned"
        }
    }

    #[test]
    fn call_round_trips_through_transport() {
        let client = XmlRpcClient::new(Canned {
            reply: "<methodResponse><params><param><value><int>1</int></value></param></params></methodResponse>".to_string(),
            sent: RefCell::new(Vec::new()),
        });

        let status = client
            .call("system.deleteSystem", &[Value::from("key"), Value::from(42)])
            .unwrap();
        assert_eq!(status, Value::Int(1));

        let sent = client.transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("<methodName>system.deleteSystem</methodName>"));
        assert!(sent[0].contains("<int>42</int>"));
        assert_eq!(client.endpoint(), "mem://canned");
    }

    #[test]
    fn transport_errors_propagate() {
        struct Down;
        impl Transport for Down {
            fn send(&self, _body: Vec<u8>) -> Result<String, RpcError> {
                Err(RpcError::Http { status: 503 })
            }
            fn endpoint(&self) -> &str {
                "mem://down"
            }
        }

        let err = XmlRpcClient::new(Down).call("auth.logout", &[]).unwrap_err();
        assert!(matches!(err, RpcError::Http { status: 503 }));
        assert_eq!(err.kind(), "503");
    }
}
