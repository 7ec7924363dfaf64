//! Exact Decimal Amount Module
//!
//! Payment amounts travel through the pipeline as decimal text. This module
//! parses that text into fixed-point integer units for summary arithmetic,
//! so totals over many small payments never pick up binary floating-point
//! rounding error. The ledger carries 7 fractional digits per amount, and a
//! single amount must fit an i64 in those units.

use thiserror::Error;

/// Fractional digits the ledger supports per amount
pub const AMOUNT_DECIMALS: u32 = 7;

/// Scale factor between whole units and fixed-point units (10^7)
const UNIT_SCALE: i128 = 10_000_000;

/// Problems parsing a decimal amount string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount {0:?} is not a decimal number")]
    Malformed(String),
    #[error("amount {0:?} has more than {AMOUNT_DECIMALS} decimal places")]
    TooPrecise(String),
    #[error("amount {0:?} is out of range")]
    OutOfRange(String),
}

/// Parse a decimal amount string into fixed-point units
///
/// Accepts an optional leading `-`, integer digits, and up to 7 fractional
/// digits after a single `.`. Both `".5"` and `"5."` are accepted as long
/// as at least one digit is present.
///
/// # Returns
/// The amount in units of 10^-7, range-checked into an `i64`. The sign is
/// preserved; rejecting non-positive amounts is the validator's job.
pub fn parse_amount(text: &str) -> Result<i64, AmountError> {
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };

    // At least one digit somewhere, and nothing but digits anywhere
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Malformed(text.to_string()));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AmountError::Malformed(text.to_string()));
    }
    if frac_part.len() as u32 > AMOUNT_DECIMALS {
        return Err(AmountError::TooPrecise(text.to_string()));
    }

    let int_units: i128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| AmountError::OutOfRange(text.to_string()))?
    };

    // Right-pad the fractional digits to the full 7 places
    let mut frac_units: i128 = if frac_part.is_empty() {
        0
    } else {
        frac_part
            .parse()
            .map_err(|_| AmountError::Malformed(text.to_string()))?
    };
    frac_units *= 10_i128.pow(AMOUNT_DECIMALS - frac_part.len() as u32);

    let units = int_units
        .checked_mul(UNIT_SCALE)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(|| AmountError::OutOfRange(text.to_string()))?;
    let units = if negative { -units } else { units };

    i64::try_from(units).map_err(|_| AmountError::OutOfRange(text.to_string()))
}

/// Format fixed-point units back into canonical decimal text
///
/// Trailing fractional zeros are trimmed; whole amounts render with no
/// decimal point. Takes `i128` so callers can format totals summed over
/// many instructions without overflow.
pub fn format_units(units: i128) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    let whole = abs / UNIT_SCALE as u128;
    let frac = abs % UNIT_SCALE as u128;

    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let digits = format!("{frac:07}");
        format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}
