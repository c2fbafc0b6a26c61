//! Numeric input validation for command-line values

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input: {0:?} is not a valid number")]
    NotANumber(String),
    #[error("Input {value} out of valid range {min}..={max}")]
    OutOfRange {
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Parse a signed decimal integer and check it lies in `min..=max`
pub fn parse_bounded(text: &str, min: i64, max: i64) -> Result<i64, InputError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber(text.to_string()));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))?;
    if value < min || value > max {
        return Err(InputError::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Generation selection code (2..=7)
pub fn generation_code(text: &str) -> Result<u8, InputError> {
    parse_bounded(text, 2, 7).map(|v| v as u8)
}

/// User id as shown in listings (1-based)
pub fn user_id(text: &str) -> Result<u32, InputError> {
    parse_bounded(text, 1, i64::from(u32::MAX)).map(|v| v as u32)
}

/// Ledger message budget (positive)
pub fn ledger_capacity(text: &str) -> Result<i64, InputError> {
    parse_bounded(text, 1, i64::MAX)
}

/// Frequency in MHz
pub fn frequency_mhz(text: &str) -> Result<u32, InputError> {
    parse_bounded(text, 1, 100_000).map(|v| v as u32)
}
