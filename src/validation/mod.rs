//! Instruction Validation Module
//!
//! This module validates payment instructions and submission configuration
//! before any network interaction. Checks recipient address format, amount
//! positivity, asset syntax, and batch configuration bounds.

mod validator;
pub use validator::{
    ValidationReport, is_valid_account_id, is_valid_secret_key, validate_config,
    validate_instruction, validate_instruction_list,
};
