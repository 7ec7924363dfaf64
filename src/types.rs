use crate::validation::is_valid_account_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Literal asset string denoting the ledger's built-in currency
pub const NATIVE_ASSET: &str = "native";

/// Maximum length of an issued asset code
pub const MAX_ASSET_CODE_LEN: usize = 12;

/// Target ledger network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Test,
    Main,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Test => write!(f, "test"),
            Network::Main => write!(f, "main"),
        }
    }
}

/// A currency on the ledger
///
/// Either the ledger's native unit, or an issued asset identified by a
/// short code plus the account that issues it. Native assets never carry
/// an issuer; issued assets always do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    Native,
    Issued { code: String, issuer: String },
}

impl Asset {
    /// Parse an asset from its literal string form
    ///
    /// Accepted forms:
    /// - `"native"` for the ledger's built-in currency
    /// - `"CODE:ISSUER"` for an issued asset, where CODE is 1-12 ASCII
    ///   alphanumerics and ISSUER is a valid account id
    pub fn parse(text: &str) -> Result<Asset, InstructionError> {
        if text == NATIVE_ASSET {
            return Ok(Asset::Native);
        }

        // Issued assets look like "USD:GA7Q..."
        let Some((code, issuer)) = text.split_once(':') else {
            return Err(InstructionError::MalformedAsset(text.to_string()));
        };

        let code_ok = !code.is_empty()
            && code.len() <= MAX_ASSET_CODE_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        if !code_ok || !is_valid_account_id(issuer) {
            return Err(InstructionError::MalformedAsset(text.to_string()));
        }

        Ok(Asset::Issued {
            code: code.to_string(),
            issuer: issuer.to_string(),
        })
    }
}

/// A single intended payment, as produced by the ingestion layer
///
/// The amount is kept as exact decimal text throughout the pipeline; it is
/// only parsed to a fixed-point integer for summary arithmetic, never for
/// transaction construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub recipient: String,
    pub amount: String,
    pub asset: String,
}

/// One ledger transaction's worth of payments
///
/// Batches are produced once per run, in input order, and never mutated.
/// Indices are contiguous starting at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub index: usize,
    pub payments: Vec<PaymentInstruction>,
}

/// Outcome status for a single recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// Per-recipient outcome in the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub recipient: String,
    pub amount: String,
    pub asset: String,
    pub status: PaymentStatus,
    /// Transaction reference on the ledger, present on success
    pub transaction_ref: Option<String>,
    /// Captured failure detail, present on failure
    pub error_detail: Option<String>,
}

/// Success/failure tally over a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub success_count: usize,
    pub fail_count: usize,
}

/// Final report for one batch payment run
///
/// Accounts for every input instruction exactly once, in input order,
/// tagged success or failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRunResult {
    pub total_recipients: usize,
    /// Exact decimal total across all instructions
    pub total_amount: String,
    pub total_batches: usize,
    pub network: Network,
    pub started_at: DateTime<Utc>,
    pub results: Vec<PaymentResult>,
    pub summary: RunSummary,
}

/// Aggregate view of an instruction list before submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub recipient_count: usize,
    pub total_amount: String,
    /// Instruction counts keyed by the literal asset string; two issued
    /// assets sharing a code but differing issuer are distinct keys
    pub asset_breakdown: BTreeMap<String, usize>,
}

/// Reasons a single payment instruction can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum InstructionError {
    #[error("recipient {0:?} is not a valid account id")]
    InvalidRecipient(String),
    #[error("amount {amount:?} is not a valid decimal: {reason}")]
    InvalidAmount { amount: String, reason: String },
    #[error("amount {0:?} must be strictly positive")]
    NonPositiveAmount(String),
    #[error("asset {0:?} is neither \"native\" nor a valid code:issuer pair")]
    MalformedAsset(String),
}

/// Fatal configuration problems, surfaced before any run begins
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("signing key is not a valid secret key")]
    InvalidSigningKey,
    #[error("max_ops_per_batch must be in 1..={max}, got {got}")]
    BatchSizeOutOfRange { got: usize, max: usize },
}
