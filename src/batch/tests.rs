//! Orchestrator scenario tests
//!
//! End-to-end runs against a scripted mock ledger client, covering the
//! sequencing, fail-forward, and reporting behavior of the pipeline.

use crate::{
    batch::{PaymentOrchestrator, RunError},
    config::BatchConfig,
    ledger::{LedgerClient, LedgerError, SubmitOutcome},
    types::{Batch, Network, PaymentInstruction, PaymentStatus},
};
use std::collections::VecDeque;
use std::sync::Mutex;

const RECIPIENT: &str = "GDQNY3PBOJOKYZSRMK2S7LHHGWZIUISD4QORETLMXEWXBI7KFZZMKTL3";
const SECRET: &str = "SBGWSG6BTNCKCOB3DIFBGCVMUPQFYPA2G4O34RMTB343OYPXU5DJDVMN";
const START_SEQUENCE: i64 = 4_000;

/// Scripted stand-in for the external ledger collaborator
///
/// Plays back one pre-programmed outcome per submission, records the
/// sequence value each submission carried, and counts account loads.
struct MockLedger {
    sequence: Result<i64, LedgerError>,
    script: Mutex<VecDeque<Result<SubmitOutcome, LedgerError>>>,
    /// (batch index, sequence used) per submit call, in call order
    submissions: Mutex<Vec<(usize, i64)>>,
    loads: Mutex<usize>,
}

impl MockLedger {
    fn scripted(outcomes: Vec<Result<SubmitOutcome, LedgerError>>) -> Self {
        Self {
            sequence: Ok(START_SEQUENCE),
            script: Mutex::new(outcomes.into()),
            submissions: Mutex::new(Vec::new()),
            loads: Mutex::new(0),
        }
    }

    fn all_accepting() -> Self {
        // An empty script falls through to generated acceptances
        Self::scripted(Vec::new())
    }

    fn load_failing(error: LedgerError) -> Self {
        Self {
            sequence: Err(error),
            ..Self::all_accepting()
        }
    }

    fn sequences_used(&self) -> Vec<i64> {
        self.submissions.lock().unwrap().iter().map(|(_, s)| *s).collect()
    }

    fn submit_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    fn load_count(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

impl LedgerClient for &MockLedger {
    async fn load_sequence(&self, _credential: &str) -> Result<i64, LedgerError> {
        *self.loads.lock().unwrap() += 1;
        self.sequence.clone()
    }

    async fn submit(
        &self,
        batch: &Batch,
        sequence: i64,
        _credential: &str,
    ) -> Result<SubmitOutcome, LedgerError> {
        self.submissions.lock().unwrap().push((batch.index, sequence));
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(SubmitOutcome::Accepted {
                reference: format!("tx-{}", batch.index),
            })
        })
    }
}

fn payment(recipient: &str, amount: &str) -> PaymentInstruction {
    PaymentInstruction {
        recipient: recipient.to_string(),
        amount: amount.to_string(),
        asset: "native".to_string(),
    }
}

fn config(max_ops: usize) -> BatchConfig {
    BatchConfig {
        signing_key: SECRET.to_string(),
        network: Network::Test,
        max_ops_per_batch: max_ops,
    }
}

fn accepted(reference: &str) -> Result<SubmitOutcome, LedgerError> {
    Ok(SubmitOutcome::Accepted {
        reference: reference.to_string(),
    })
}

fn rejected(detail: &str) -> Result<SubmitOutcome, LedgerError> {
    Ok(SubmitOutcome::Rejected {
        detail: detail.to_string(),
    })
}

#[test]
fn construction_fails_on_bad_config() {
    let ledger = MockLedger::all_accepting();

    let mut bad_key = config(10);
    bad_key.signing_key = "not-a-secret".to_string();
    assert!(PaymentOrchestrator::new(&ledger, bad_key).is_err());

    assert!(PaymentOrchestrator::new(&ledger, config(0)).is_err());
    assert!(PaymentOrchestrator::new(&ledger, config(101)).is_err());
    assert!(PaymentOrchestrator::new(&ledger, config(100)).is_ok());
}

#[tokio::test]
async fn three_instructions_at_max_two_make_two_batches() {
    let ledger = MockLedger::all_accepting();
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let instructions = vec![
        payment(RECIPIENT, "10.5"),
        payment(RECIPIENT, "20.25"),
        payment(RECIPIENT, "1"),
    ];
    let result = orchestrator.run(&instructions).await.unwrap();

    // 2 submissions, sequence advancing by 1 per accepted batch
    assert_eq!(ledger.load_count(), 1);
    assert_eq!(ledger.sequences_used(), vec![START_SEQUENCE, START_SEQUENCE + 1]);

    assert_eq!(result.total_recipients, 3);
    assert_eq!(result.total_batches, 2);
    assert_eq!(result.total_amount, "31.75");
    assert_eq!(result.summary.success_count, 3);
    assert_eq!(result.summary.fail_count, 0);

    // Results in original order, each carrying its batch's reference
    assert_eq!(result.results.len(), 3);
    let amounts: Vec<&str> = result.results.iter().map(|r| r.amount.as_str()).collect();
    assert_eq!(amounts, vec!["10.5", "20.25", "1"]);
    assert_eq!(result.results[0].transaction_ref.as_deref(), Some("tx-0"));
    assert_eq!(result.results[1].transaction_ref.as_deref(), Some("tx-0"));
    assert_eq!(result.results[2].transaction_ref.as_deref(), Some("tx-1"));
}

#[tokio::test]
async fn failed_batch_does_not_consume_a_sequence_slot() {
    // Batch 0 rejected, batch 1 accepted
    let ledger = MockLedger::scripted(vec![rejected("tx_bad_seq"), accepted("tx-ok")]);
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let instructions = vec![
        payment(RECIPIENT, "1"),
        payment(RECIPIENT, "2"),
        payment(RECIPIENT, "3"),
    ];
    let result = orchestrator.run(&instructions).await.unwrap();

    // Both submissions carried the same sequence: the rejection left the
    // slot unconsumed, so the run advanced by exactly 1 overall
    assert_eq!(ledger.sequences_used(), vec![START_SEQUENCE, START_SEQUENCE]);

    // Batch 0's payments failed with the captured detail, batch 1 succeeded
    assert_eq!(result.summary.success_count, 1);
    assert_eq!(result.summary.fail_count, 2);
    assert_eq!(result.results[0].status, PaymentStatus::Failed);
    assert_eq!(result.results[0].error_detail.as_deref(), Some("tx_bad_seq"));
    assert_eq!(result.results[0].transaction_ref, None);
    assert_eq!(result.results[1].status, PaymentStatus::Failed);
    assert_eq!(result.results[2].status, PaymentStatus::Success);
    assert_eq!(result.results[2].transaction_ref.as_deref(), Some("tx-ok"));
}

#[tokio::test]
async fn transport_fault_is_treated_like_a_rejection() {
    let ledger = MockLedger::scripted(vec![
        Err(LedgerError::Transport("connection reset".to_string())),
        accepted("tx-after"),
    ]);
    let orchestrator = PaymentOrchestrator::new(&ledger, config(1)).unwrap();

    let instructions = vec![payment(RECIPIENT, "5"), payment(RECIPIENT, "6")];
    let result = orchestrator.run(&instructions).await.unwrap();

    // The fault is captured inline, never returned as a run error, and the
    // sequence slot is not consumed
    assert_eq!(ledger.sequences_used(), vec![START_SEQUENCE, START_SEQUENCE]);
    assert_eq!(result.results[0].status, PaymentStatus::Failed);
    assert!(
        result.results[0]
            .error_detail
            .as_deref()
            .unwrap()
            .contains("connection reset")
    );
    assert_eq!(result.results[1].status, PaymentStatus::Success);
}

#[tokio::test]
async fn sequence_advances_once_per_success_regardless_of_position() {
    let ledger = MockLedger::scripted(vec![
        accepted("tx-a"),
        rejected("insufficient fee"),
        accepted("tx-b"),
        accepted("tx-c"),
    ]);
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let instructions: Vec<_> = (0..8).map(|_| payment(RECIPIENT, "1")).collect();
    let result = orchestrator.run(&instructions).await.unwrap();

    assert_eq!(
        ledger.sequences_used(),
        vec![
            START_SEQUENCE,
            START_SEQUENCE + 1, // rejected, slot kept
            START_SEQUENCE + 1,
            START_SEQUENCE + 2,
        ]
    );
    assert_eq!(result.summary.success_count, 6);
    assert_eq!(result.summary.fail_count, 2);
}

#[tokio::test]
async fn invalid_instructions_block_the_run_entirely() {
    let ledger = MockLedger::all_accepting();
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let instructions = vec![
        payment(RECIPIENT, "1"),
        payment(RECIPIENT, "-2"), // invalid: negative amount
        payment("nobody", "3"),   // invalid: bad recipient
    ];
    let err = orchestrator.run(&instructions).await.unwrap_err();

    let RunError::InvalidInstructions(report) = err else {
        panic!("expected InvalidInstructions, got {err:?}");
    };
    assert_eq!(report.errors.keys().copied().collect::<Vec<_>>(), vec![1, 2]);

    // Nothing touched the ledger: no account load, no submission
    assert_eq!(ledger.load_count(), 0);
    assert_eq!(ledger.submit_count(), 0);
}

#[tokio::test]
async fn account_load_failure_aborts_before_any_submission() {
    let ledger = MockLedger::load_failing(LedgerError::AccountNotFound("GABC".to_string()));
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let err = orchestrator.run(&[payment(RECIPIENT, "1")]).await.unwrap_err();
    assert!(matches!(err, RunError::AccountLoad(_)));
    assert_eq!(ledger.submit_count(), 0);
}

#[tokio::test]
async fn empty_instruction_list_is_a_valid_empty_run() {
    let ledger = MockLedger::all_accepting();
    let orchestrator = PaymentOrchestrator::new(&ledger, config(2)).unwrap();

    let result = orchestrator.run(&[]).await.unwrap();

    assert_eq!(result.total_recipients, 0);
    assert_eq!(result.total_batches, 0);
    assert_eq!(result.total_amount, "0");
    assert!(result.results.is_empty());
    assert_eq!(ledger.submit_count(), 0);
}

#[tokio::test]
async fn batches_are_submitted_strictly_in_index_order() {
    let ledger = MockLedger::all_accepting();
    let orchestrator = PaymentOrchestrator::new(&ledger, config(3)).unwrap();

    let instructions: Vec<_> = (0..10).map(|_| payment(RECIPIENT, "0.1")).collect();
    let result = orchestrator.run(&instructions).await.unwrap();

    let indices: Vec<usize> = ledger.submissions.lock().unwrap().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    // Exact decimal total: ten times 0.1 is exactly 1
    assert_eq!(result.total_amount, "1");
}
