//! Batch Pipeline Module
//!
//! This module carries the batching half of the pipeline:
//! - Batcher: pure partitioning of an instruction list into ledger-legal
//!   batches, plus aggregate summaries
//! - PaymentOrchestrator: sequential, fail-forward submission of those
//!   batches with sequence-number bookkeeping

mod batcher;
pub mod orchestrator;

#[cfg(test)]
mod tests;

pub use batcher::{create_batches, summarize};
pub use orchestrator::{PaymentOrchestrator, RunError};
