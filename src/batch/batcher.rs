//! Batcher Module
//!
//! Deterministic, side-effect-free partitioning of a validated instruction
//! list into ledger-legal batches, plus aggregate summaries. Nothing here
//! touches the network; the orchestrator drives submission.

use crate::amount::{AmountError, format_units, parse_amount};
use crate::types::{Batch, PaymentInstruction, PaymentSummary};
use std::collections::BTreeMap;

/// Partition an instruction list into ordered batches
///
/// Walks the list in order, cutting a batch every `max_ops` instructions
/// and flushing any non-empty remainder as the final batch. Batch indices
/// are contiguous starting at 0, and concatenating all batches in index
/// order reproduces the input exactly.
///
/// Total for every bound: empty input yields zero batches, a bound larger
/// than the list yields one batch, and a bound of 1 yields one batch per
/// instruction. A bound of 0 could never make progress and is clamped to 1
/// (the validator rejects 0 in any real configuration).
pub fn create_batches(instructions: &[PaymentInstruction], max_ops: usize) -> Vec<Batch> {
    let max_ops = max_ops.max(1);

    instructions
        .chunks(max_ops)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            payments: chunk.to_vec(),
        })
        .collect()
}

/// Compute aggregate totals over an instruction list
///
/// Sums amounts as exact fixed-point integers (never binary floating
/// point, so totals over many small payments carry no rounding error) and
/// counts instructions per literal asset string. Native and issued assets
/// are distinct keys, as are two issued assets sharing a code but
/// differing in issuer.
pub fn summarize(instructions: &[PaymentInstruction]) -> Result<PaymentSummary, AmountError> {
    let mut total: i128 = 0;
    let mut asset_breakdown: BTreeMap<String, usize> = BTreeMap::new();

    for instruction in instructions {
        // i128 accumulation cannot overflow: each addend fits an i64
        total += i128::from(parse_amount(&instruction.amount)?);
        *asset_breakdown.entry(instruction.asset.clone()).or_insert(0) += 1;
    }

    Ok(PaymentSummary {
        recipient_count: instructions.len(),
        total_amount: format_units(total),
        asset_breakdown,
    })
}
