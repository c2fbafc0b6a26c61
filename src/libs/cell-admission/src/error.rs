//! Error types
//!
//! Admission rejections are not errors here; they are reported through
//! [`crate::allocator::AddOutcome`]. The types below cover lookups of
//! unknown codes and malformed record lines. Configuration failures use
//! [`crate::config::ConfigError`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CellError>;

/// Errors raised by the admission engine
#[derive(Error, Debug)]
pub enum CellError {
    #[error("unknown generation code {0} (expected 2..=7)")]
    UnknownGeneration(u8),
    #[error("unknown service type {0} (expected 1..=4)")]
    UnknownServiceType(u8),
}

/// Field of a canonical record line that failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Frequency,
    MessageCost,
    ServiceType,
}

/// Malformed canonical record line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("missing field {0:?}")]
    MissingField(RecordField),
    #[error("invalid value {value:?} for field {field:?}")]
    InvalidField {
        field: RecordField,
        value: String,
    },
    #[error("unexpected trailing data {0:?}")]
    TrailingData(String),
}
