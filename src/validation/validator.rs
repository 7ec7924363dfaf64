use crate::amount::parse_amount;
use crate::config::{BatchConfig, MAX_OPERATIONS_PER_TRANSACTION};
use crate::types::{Asset, ConfigError, InstructionError, PaymentInstruction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of an encoded account id or secret key
const STRKEY_LEN: usize = 56;

fn is_base32(c: char) -> bool {
    matches!(c, 'A'..='Z' | '2'..='7')
}

/// Syntactic check for an account id (public key)
///
/// Account ids are 56-character strings over the RFC 4648 base32 alphabet,
/// starting with `G`.
pub fn is_valid_account_id(id: &str) -> bool {
    id.len() == STRKEY_LEN && id.starts_with('G') && id.chars().all(is_base32)
}

/// Syntactic check for a signing secret key
///
/// Secret keys share the account id encoding but start with `S`.
pub fn is_valid_secret_key(key: &str) -> bool {
    key.len() == STRKEY_LEN && key.starts_with('S') && key.chars().all(is_base32)
}

/// Validate a single payment instruction
///
/// Checks, in order: recipient is a syntactically valid account id, amount
/// parses as a strictly positive decimal (zero and negative rejected), and
/// the asset string is either `"native"` or a well-formed code:issuer pair.
///
/// Returns `Ok(())` if valid, `Err(InstructionError)` naming the first
/// failing check otherwise.
pub fn validate_instruction(instruction: &PaymentInstruction) -> Result<(), InstructionError> {
    if !is_valid_account_id(&instruction.recipient) {
        return Err(InstructionError::InvalidRecipient(
            instruction.recipient.clone(),
        ));
    }

    let units = parse_amount(&instruction.amount).map_err(|e| InstructionError::InvalidAmount {
        amount: instruction.amount.clone(),
        reason: e.to_string(),
    })?;
    if units <= 0 {
        return Err(InstructionError::NonPositiveAmount(
            instruction.amount.clone(),
        ));
    }

    Asset::parse(&instruction.asset)?;
    Ok(())
}

/// Validate a submission configuration
///
/// Checks the signing key syntax and that `max_ops_per_batch` lies within
/// `(0, 100]`. The network field needs no check here: `Network` is a closed
/// enum, so an unknown value already fails at config decode time.
pub fn validate_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if !is_valid_secret_key(&config.signing_key) {
        return Err(ConfigError::InvalidSigningKey);
    }
    if config.max_ops_per_batch == 0 || config.max_ops_per_batch > MAX_OPERATIONS_PER_TRANSACTION {
        return Err(ConfigError::BatchSizeOutOfRange {
            got: config.max_ops_per_batch,
            max: MAX_OPERATIONS_PER_TRANSACTION,
        });
    }
    Ok(())
}

/// Aggregated validation outcome for a whole instruction list
///
/// Maps each failing instruction's list index to its rejection reason. An
/// empty map means the list is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<usize, InstructionError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate every instruction in a list independently
///
/// Never short-circuits: every failing index is collected so the caller can
/// report all problems in one pass. An empty list is valid (batching it
/// later simply yields zero batches).
pub fn validate_instruction_list(instructions: &[PaymentInstruction]) -> ValidationReport {
    let mut errors = BTreeMap::new();
    for (index, instruction) in instructions.iter().enumerate() {
        if let Err(e) = validate_instruction(instruction) {
            errors.insert(index, e);
        }
    }
    ValidationReport { errors }
}
