use crate::types::Batch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecoverable faults talking to the ledger
///
/// These are the only errors a `LedgerClient` may surface as `Err`; a
/// ledger-level transaction rejection is data, not an error, and comes
/// back as `SubmitOutcome::Rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {0} not found on the ledger")]
    AccountNotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outcome of submitting one batch transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// The ledger accepted the transaction; `reference` identifies it
    Accepted { reference: String },
    /// The ledger rejected the transaction (bad sequence, underfunded
    /// account, invalid operation, ...); `detail` carries its reason
    Rejected { detail: String },
}

/// Contract for the external ledger collaborator
///
/// Implementations own key derivation, transaction construction, signing,
/// wire submission, and per-request timeout policy. The orchestrator only
/// distinguishes "accepted" from "everything else": a transport `Err` and
/// a `Rejected` outcome are handled identically (batch marked failed,
/// sequence not advanced).
pub trait LedgerClient {
    /// Load the signing account's current sequence number
    ///
    /// Called exactly once per run, before any submission. The account
    /// identity is derived from the credential by the client.
    fn load_sequence(
        &self,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send;

    /// Build, sign, and submit one transaction carrying the batch's
    /// payments at the given sequence value
    fn submit(
        &self,
        batch: &Batch,
        sequence: i64,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<SubmitOutcome, LedgerError>> + Send;
}
