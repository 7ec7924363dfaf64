//! Payment Orchestrator Module
//!
//! This module implements the submission state machine that connects the
//! validator, the batcher, and the ledger client. One call to [`run`]
//! drives a whole payment run:
//!
//! # Run Protocol
//! 1. Validate every instruction (any failure blocks the run entirely)
//! 2. Load the signing account's sequence number, once
//! 3. Partition the instructions into batches
//! 4. Submit each batch strictly in index order, advancing the sequence
//!    counter only on success
//! 5. Assemble the per-recipient result report
//!
//! A failed batch never halts the run: its payments are marked failed and
//! processing continues with the next batch (fail-forward). Retries are
//! deliberately left to a surrounding policy layer.
//!
//! [`run`]: PaymentOrchestrator::run

use crate::{
    amount::AmountError,
    batch::{create_batches, summarize},
    config::BatchConfig,
    ledger::{LedgerClient, LedgerError, SubmitOutcome},
    types::{BatchRunResult, ConfigError, PaymentInstruction, PaymentResult, PaymentStatus, RunSummary},
    validation::{ValidationReport, validate_config, validate_instruction_list},
};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons a run refuses to start
///
/// Submission failures are NOT errors: they are captured per payment in
/// the [`BatchRunResult`]. Only problems that stop the run before any
/// ledger interaction (or during the single account load) surface here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{} instruction(s) failed validation", .0.errors.len())]
    InvalidInstructions(ValidationReport),
    #[error("failed to load account sequence: {0}")]
    AccountLoad(#[source] LedgerError),
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Payment orchestrator
///
/// Owns one run at a time: validates input, partitions it into batches,
/// and drives sequential submission through the ledger client while
/// keeping the account sequence bookkeeping straight. Generic over the
/// client so runs are testable without a live ledger.
pub struct PaymentOrchestrator<C> {
    /// External ledger collaborator (account load + transaction submit)
    client: C,
    /// Validated submission configuration
    config: BatchConfig,
}

impl<C: LedgerClient> PaymentOrchestrator<C> {
    /// Creates a new orchestrator with a validated configuration
    ///
    /// Configuration problems are a fatal precondition failure: the
    /// orchestrator is never constructed, so a run can never start with a
    /// bad signing key or an illegal batch size.
    pub fn new(client: C, config: BatchConfig) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        Ok(Self { client, config })
    }

    /// Execute one payment run over the given instruction list
    ///
    /// Batches are submitted one at a time, in index order; the next
    /// batch's transaction is not built until the previous outcome is
    /// known, because the sequence counter admits no concurrent updates.
    /// The counter lives on this call's stack: each run owns its own,
    /// created from the account's state at run start and discarded at
    /// run end.
    ///
    /// # Returns
    /// * `Ok(BatchRunResult)` accounting for every instruction exactly
    ///   once, in input order, even under mixed outcomes
    /// * `Err(RunError)` if the input list is invalid or the initial
    ///   account load fails — in both cases nothing was submitted
    pub async fn run(
        &self,
        instructions: &[PaymentInstruction],
    ) -> Result<BatchRunResult, RunError> {
        // Step 1: validate everything up front. Invalid input blocks the
        // run before any ledger interaction; partial submission of an
        // already-invalid list is considered unsafe.
        let report = validate_instruction_list(instructions);
        if !report.is_valid() {
            warn!(
                "Refusing to start run: {} invalid instruction(s)",
                report.errors.len()
            );
            return Err(RunError::InvalidInstructions(report));
        }

        let summary = summarize(instructions)?;
        let started_at = Utc::now();
        info!(
            "Starting payment run: {} recipient(s), total {} across {} asset(s), network {}",
            summary.recipient_count,
            summary.total_amount,
            summary.asset_breakdown.len(),
            self.config.network
        );

        // Step 2: load the account sequence once. This value is the run's
        // exclusively-owned counter from here on.
        let mut sequence = self
            .client
            .load_sequence(&self.config.signing_key)
            .await
            .map_err(RunError::AccountLoad)?;
        debug!("Loaded account sequence {}", sequence);

        // Step 3: partition into ledger-legal batches
        let batches = create_batches(instructions, self.config.max_ops_per_batch);
        info!(
            "Partitioned {} instruction(s) into {} batch(es) of up to {}",
            instructions.len(),
            batches.len(),
            self.config.max_ops_per_batch
        );

        // Step 4: sequential submission, strictly in index order
        let mut results = Vec::with_capacity(instructions.len());
        for batch in &batches {
            let outcome = self
                .client
                .submit(batch, sequence, &self.config.signing_key)
                .await;

            match outcome {
                Ok(SubmitOutcome::Accepted { reference }) => {
                    info!(
                        "Batch #{} accepted at sequence {} ({} payment(s), tx {})",
                        batch.index,
                        sequence,
                        batch.payments.len(),
                        reference
                    );
                    for payment in &batch.payments {
                        results.push(success_result(payment, &reference));
                    }
                    // An accepted transaction consumes exactly one
                    // sequence slot
                    sequence += 1;
                }
                // A ledger rejection and a transport fault are handled
                // identically: the batch failed, the sequence slot is
                // still unconsumed, and the run moves on.
                Ok(SubmitOutcome::Rejected { detail }) => {
                    warn!("Batch #{} rejected by the ledger: {}", batch.index, detail);
                    for payment in &batch.payments {
                        results.push(failed_result(payment, &detail));
                    }
                }
                Err(e) => {
                    let detail = e.to_string();
                    warn!("Batch #{} failed in transport: {}", batch.index, detail);
                    for payment in &batch.payments {
                        results.push(failed_result(payment, &detail));
                    }
                }
            }
        }

        // Step 5: tally outcomes for the report
        let success_count = results
            .iter()
            .filter(|r| r.status == PaymentStatus::Success)
            .count();
        let fail_count = results.len() - success_count;
        info!(
            "Run complete: {} succeeded, {} failed across {} batch(es)",
            success_count,
            fail_count,
            batches.len()
        );

        Ok(BatchRunResult {
            total_recipients: instructions.len(),
            total_amount: summary.total_amount,
            total_batches: batches.len(),
            network: self.config.network,
            started_at,
            results,
            summary: RunSummary {
                success_count,
                fail_count,
            },
        })
    }
}

fn success_result(payment: &PaymentInstruction, reference: &str) -> PaymentResult {
    PaymentResult {
        recipient: payment.recipient.clone(),
        amount: payment.amount.clone(),
        asset: payment.asset.clone(),
        status: PaymentStatus::Success,
        transaction_ref: Some(reference.to_string()),
        error_detail: None,
    }
}

fn failed_result(payment: &PaymentInstruction, detail: &str) -> PaymentResult {
    PaymentResult {
        recipient: payment.recipient.clone(),
        amount: payment.amount.clone(),
        asset: payment.asset.clone(),
        status: PaymentStatus::Failed,
        transaction_ref: None,
        error_detail: Some(detail.to_string()),
    }
}
