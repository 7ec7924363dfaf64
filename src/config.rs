//! Configuration Module
//!
//! This module defines the configuration surface for the payout pipeline.
//! Configuration is loaded from TOML files and parsed using serde.
//!
//! # Example TOML
//! ```toml
//! [batch]
//! signing_key = "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBX7MMEBGC2AAAAA"
//! network = "test"
//! max_ops_per_batch = 50
//! ```

use crate::types::Network;
use serde::Deserialize;
use std::fs;

/// Hard per-transaction operation ceiling imposed by the ledger
pub const MAX_OPERATIONS_PER_TRANSACTION: usize = 100;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub batch: BatchConfig,
}

/// Submission configuration for one payment run
///
/// # Fields
/// - `signing_key`: secret key of the account funding the payments
/// - `network`: which ledger network to submit to ("test" or "main")
/// - `max_ops_per_batch`: payment operations per transaction, capped by
///   the ledger's hard limit of 100
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub signing_key: String,
    pub network: Network,
    pub max_ops_per_batch: usize,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
