use anyhow::{Context, bail};
use payout_sequencer::{
    batch::{create_batches, summarize},
    config::Config,
    types::PaymentInstruction,
    validation::{validate_config, validate_instruction_list},
};
use std::fs;
use tracing::{error, info};

/// The main entry point for the payout planning binary.
///
/// Reads a normalized instruction list (JSON), validates it together with
/// the submission configuration, logs the aggregate summary, and prints the
/// batch plan as pretty JSON. Actual submission goes through a concrete
/// `LedgerClient`, which lives outside this crate.
fn main() -> anyhow::Result<()> {
    // Initialize logging using tracing_subscriber.
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let instructions_path = args
        .next()
        .context("usage: payout-sequencer <instructions.json> [config.toml]")?;
    let config_path = args
        .next()
        .unwrap_or_else(|| "config/default.toml".to_string());

    // Load and validate the submission configuration. A bad configuration
    // is fatal before anything else happens.
    let config = Config::load(&config_path)?;
    validate_config(&config.batch)?;
    info!(
        "Loaded config: network={}, max_ops_per_batch={}",
        config.batch.network, config.batch.max_ops_per_batch
    );

    // Read the normalized instruction list produced by the ingestion layer.
    let raw = fs::read_to_string(&instructions_path)
        .with_context(|| format!("reading {instructions_path}"))?;
    let instructions: Vec<PaymentInstruction> =
        serde_json::from_str(&raw).context("instruction list is not valid JSON")?;

    // Validate every instruction and report all problems in one pass.
    let report = validate_instruction_list(&instructions);
    if !report.is_valid() {
        for (index, reason) in &report.errors {
            error!("Instruction {}: {}", index, reason);
        }
        bail!("{} instruction(s) failed validation", report.errors.len());
    }

    let summary = summarize(&instructions)?;
    info!(
        "{} recipient(s), total {} across {} asset(s)",
        summary.recipient_count,
        summary.total_amount,
        summary.asset_breakdown.len()
    );

    // Print the batch plan for inspection.
    let batches = create_batches(&instructions, config.batch.max_ops_per_batch);
    info!("Plan: {} batch(es)", batches.len());
    println!("{}", serde_json::to_string_pretty(&batches)?);

    Ok(())
}
