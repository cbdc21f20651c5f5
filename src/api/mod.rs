//! High-level library API over the Satellite XML-RPC endpoint: log in, delete
//! systems one by one with every failure folded into a per-ID result, log out.
//! Prefer these entrypoints over the raw `rpc` client when integrating.
use tracing::{debug, info, warn};

use crate::core::params::Credentials;
use crate::error::{Error, Result};
use crate::rpc::{HttpTransport, Transport, Value, XmlRpcClient};
use crate::types::{BatchReport, DELETE_OK_STATUS, DeletionOutcome, DeletionResult, SystemId};

/// Authenticated session token returned by `auth.login`.
///
/// Not `Clone`: [`SatelliteApi::logout`] consumes it, so a session is released at most once.
pub struct Session {
    key: String,
}

impl Session {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}

/// The subset of the Satellite 5.x API this crate drives.
pub trait SatelliteApi {
    /// `auth.login(username, password) -> session_key`
    fn login(&self, user: &str, password: &str) -> Result<Session>;

    /// `system.deleteSystem(session_key, server_id) -> status`, status returned raw.
    fn delete_system(&self, session: &Session, id: SystemId) -> Result<Value>;

    /// `auth.logout(session_key)`
    fn logout(&self, session: Session) -> Result<()>;

    fn endpoint(&self) -> &str;
}

/// [`SatelliteApi`] backed by the XML-RPC client.
pub struct SatelliteClient<T = HttpTransport> {
    rpc: XmlRpcClient<T>,
}

impl SatelliteClient<HttpTransport> {
    /// Client for the endpoint at `url` (e.g. `https://satellite.example.com/rpc/api`).
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(url)?))
    }
}

impl<T: Transport> SatelliteClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            rpc: XmlRpcClient::new(transport),
        }
    }
}

impl<T: Transport> SatelliteApi for SatelliteClient<T> {
    fn login(&self, user: &str, password: &str) -> Result<Session> {
        let value = self
            .rpc
            .call("auth.login", &[Value::from(user), Value::from(password)])?;
        match value {
            Value::String(key) if !key.is_empty() => Ok(Session::new(key)),
            other => Err(Error::UnexpectedResponse {
                method: "auth.login",
                detail: format!("expected a session key, got {}", other.type_name()),
            }),
        }
    }

    fn delete_system(&self, session: &Session, id: SystemId) -> Result<Value> {
        Ok(self
            .rpc
            .call("system.deleteSystem", &[Value::from(session.key()), Value::from(id)])?)
    }

    fn logout(&self, session: Session) -> Result<()> {
        self.rpc.call("auth.logout", &[Value::from(session.key)])?;
        Ok(())
    }

    fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }
}

/// Authenticate and return the session that every later call is made with.
pub fn connect<A: SatelliteApi + ?Sized>(api: &A, credentials: &Credentials) -> Result<Session> {
    debug!("logging in to {} as {}", api.endpoint(), credentials.user);
    let session = api.login(&credentials.user, &credentials.password)?;
    info!("login succeeded for {}", credentials.user);
    Ok(session)
}

/// Delete one system, folding remote faults, transport errors and non-success
/// statuses into a [`DeletionOutcome`].
pub fn delete_system<A: SatelliteApi + ?Sized>(
    api: &A,
    session: &Session,
    id: SystemId,
) -> DeletionResult {
    let outcome = match i32::try_from(id) {
        Err(_) => DeletionOutcome::Failed {
            reason: format!("id {id} exceeds the XML-RPC int range"),
        },
        Ok(_) => call_delete(api, session, id),
    };

    match &outcome {
        DeletionOutcome::Deleted => debug!("system {id} deleted"),
        DeletionOutcome::Failed { reason } => warn!("system {id} not deleted: {reason}"),
    }
    DeletionResult { id, outcome }
}

fn call_delete<A: SatelliteApi + ?Sized>(
    api: &A,
    session: &Session,
    id: SystemId,
) -> DeletionOutcome {
    match api.delete_system(session, id) {
        Ok(status) if status.as_i64() == Some(DELETE_OK_STATUS) => DeletionOutcome::Deleted,
        Ok(status) => DeletionOutcome::Failed {
            reason: format!("unexpected status {status}"),
        },
        Err(e) => DeletionOutcome::Failed {
            reason: match e {
                // no crate prefix, remote text as sent
                Error::Rpc(rpc) => rpc.describe(),
                other => other.to_string(),
            },
        },
    }
}

/// Delete `ids` in order, never stopping on a failed ID.
pub fn delete_all<A: SatelliteApi + ?Sized>(
    api: &A,
    session: &Session,
    ids: &[SystemId],
) -> BatchReport {
    delete_all_with(api, session, ids, |_| {})
}

/// Like [`delete_all`], calling `on_result` as soon as each ID is processed.
pub fn delete_all_with<A, F>(
    api: &A,
    session: &Session,
    ids: &[SystemId],
    mut on_result: F,
) -> BatchReport
where
    A: SatelliteApi + ?Sized,
    F: FnMut(&DeletionResult),
{
    let mut report = BatchReport::default();
    for &id in ids {
        let result = delete_system(api, session, id);
        on_result(&result);
        report.push(result);
    }
    info!("batch complete: {report}");
    report
}
