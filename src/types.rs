//! Shared types used across the crate.
//! Includes `SystemId`, the per-system `DeletionOutcome`/`DeletionResult`
//! and the aggregated `BatchReport`.

/// Satellite system identifier. Accepted as any 64-bit integer; only values in the
/// XML-RPC `int` range can be sent.
pub type SystemId = i64;

/// Status value `system.deleteSystem` returns on success.
pub const DELETE_OK_STATUS: i64 = 1;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DeletionOutcome {
    Deleted,
    /// Remote fault, transport error or unexpected status, described for the user.
    Failed { reason: String },
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DeletionResult {
    pub id: SystemId,
    pub outcome: DeletionOutcome,
}

impl std::fmt::Display for DeletionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            DeletionOutcome::Deleted => {
                write!(f, "System with id {} unregistered successfully", self.id)
            }
            DeletionOutcome::Failed { reason } => {
                write!(f, "There was an ERROR with id {}: {}", self.id, reason)
            }
        }
    }
}

/// Outcome of a whole run, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub results: Vec<DeletionResult>,
}

impl BatchReport {
    pub fn push(&mut self, result: DeletionResult) {
        self.results.push(result);
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DeletionResult> {
        self.results.iter().filter(|r| r.outcome.is_deleted())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DeletionResult> {
        self.results.iter().filter(|r| !r.outcome.is_deleted())
    }

    pub fn all_deleted(&self) -> bool {
        self.failed().next().is_none()
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} deleted, {} failed",
            self.succeeded().count(),
            self.failed().count()
        )
    }
}
