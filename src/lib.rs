//! This crate implements the batch orchestration pipeline for a ledger payout system.
//! It turns a list of intended payments into sequentially-ordered, ledger-legal
//! transaction batches and drives their submission through an external ledger client,
//! producing a per-recipient outcome report even when some batches fail.

pub mod types; // Defines common data structures and types used throughout the pipeline.
pub mod amount; // Exact fixed-point decimal parsing and formatting for payment amounts.
pub mod validation; // Contains logic for validating instructions and submission configuration.
pub mod batch; // Handles batch partitioning and orchestrated submission.
pub mod ledger; // Defines the external ledger client contract.
pub mod config; // Defines and loads system configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use batch::{PaymentOrchestrator, RunError, create_batches, summarize};
pub use config::{BatchConfig, Config, MAX_OPERATIONS_PER_TRANSACTION};
pub use ledger::{LedgerClient, LedgerError, SubmitOutcome};
