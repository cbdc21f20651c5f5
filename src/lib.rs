#![doc = r#"
sat-unregister — remove systems from a Red Hat Satellite 5.x server.

This crate drives the Satellite XML-RPC API (`auth.login`, `system.deleteSystem`,
`auth.logout`) with a small, typed surface. It powers the `sat-unregister` CLI and can be
embedded in your own Rust tooling.

Quick start: delete a batch of systems
--------------------------------------
```rust,no_run
use sat_unregister::{connect, delete_all, Credentials, SatelliteApi, SatelliteClient};

fn main() -> sat_unregister::Result<()> {
    let client = SatelliteClient::new("https://satellite.example.com/rpc/api")?;
    let credentials = Credentials {
        user: "admin".to_string(),
        password: "secret".to_string(),
    };

    let session = connect(&client, &credentials)?;
    let report = delete_all(&client, &session, &[1000010001, 1000010002]);
    for result in &report.results {
        println!("{result}");
    }
    client.logout(session)?;

    println!("{report}");
    Ok(())
}
```

Per-system failures never abort a batch: a remote fault, a transport error and a status other
than `1` all become `DeletionOutcome::Failed` carrying a readable reason.

Error handling
--------------
Fallible functions return `sat_unregister::Result<T>`; a remote `<fault>` surfaces as
`Error::Rpc(RpcError::Fault { code, message })`.

```rust,no_run
use sat_unregister::{connect, Credentials, Error, RpcError, SatelliteClient};

fn main() {
    let client = SatelliteClient::new("https://satellite.example.com/rpc/api").unwrap();
    let credentials = Credentials { user: "admin".into(), password: "wrong".into() };

    match connect(&client, &credentials) {
        Ok(_session) => {}
        Err(Error::Rpc(RpcError::Fault { code, message })) => eprintln!("fault {code}: {message}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — `SatelliteApi`, `SatelliteClient`, `Session` and the connect/delete helpers.
- [`rpc`] — XML-RPC value model, codec, transport and client.
- [`types`] — `SystemId`, `DeletionOutcome`, `DeletionResult`, `BatchReport`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod rpc;
pub mod types;

// Curated public API surface
pub use crate::core::params::{Credentials, DEFAULT_SATELLITE_URL, RunConfig};
pub use error::{Error, Result};
pub use types::{BatchReport, DeletionOutcome, DeletionResult, SystemId};

pub use api::{
    SatelliteApi, SatelliteClient, Session, connect, delete_all, delete_all_with, delete_system,
};
pub use rpc::{HttpTransport, RpcError, Transport, Value, XmlRpcClient};
