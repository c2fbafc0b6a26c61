//! User Records
//!
//! One connected device. Records are created by a successful admission and
//! identified by their 1-based position in the allocator's record list.
//!
//! Canonical line format: `U<id>,<frequency>,<message cost>,<service type>\n`

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{RecordField, RecordParseError};
use crate::profile::ServiceType;

/// Prefix of the textual user id
pub const USER_ID_PREFIX: char = 'U';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    id: u32,
    frequency_mhz: u32,
    message_cost: u32,
    service_type: ServiceType,
}

impl UserRecord {
    pub fn new(id: u32, frequency_mhz: u32, message_cost: u32, service_type: ServiceType) -> Self {
        Self {
            id,
            frequency_mhz,
            message_cost,
            service_type,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Textual id, e.g. `U3`
    pub fn label(&self) -> String {
        format!("{USER_ID_PREFIX}{}", self.id)
    }

    pub fn frequency_mhz(&self) -> u32 {
        self.frequency_mhz
    }

    pub fn message_cost(&self) -> u32 {
        self.message_cost
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Canonical line, newline terminated
    pub fn serialize(&self) -> String {
        format!(
            "{},{},{},{}\n",
            self.label(),
            self.frequency_mhz,
            self.message_cost,
            self.service_type.code()
        )
    }

    /// Overwrite `self` from a canonical line. On failure `self` is untouched.
    pub fn deserialize(&mut self, line: &str) -> bool {
        match line.parse::<UserRecord>() {
            Ok(record) => {
                *self = record;
                true
            }
            Err(e) => {
                log::debug!("Discarding user record {line:?}: {e}");
                false
            }
        }
    }
}

impl FromStr for UserRecord {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let body = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        let mut fields = body.split(',');
        let id_text = next_field(&mut fields, RecordField::Id)?;
        let digits = id_text.strip_prefix(USER_ID_PREFIX).unwrap_or(id_text);
        let id = parse_number(digits, RecordField::Id)?;
        let frequency_text = next_field(&mut fields, RecordField::Frequency)?;
        let frequency_mhz = parse_number(frequency_text, RecordField::Frequency)?;
        let cost_text = next_field(&mut fields, RecordField::MessageCost)?;
        let message_cost = parse_number(cost_text, RecordField::MessageCost)?;

        let service_text = next_field(&mut fields, RecordField::ServiceType)?;
        let service_type = u8::try_from(parse_number(service_text, RecordField::ServiceType)?)
            .ok()
            .and_then(|code| ServiceType::from_code(code).ok())
            .ok_or_else(|| RecordParseError::InvalidField {
                field: RecordField::ServiceType,
                value: service_text.to_string(),
            })?;

        let rest: Vec<&str> = fields.collect();
        if !rest.is_empty() {
            return Err(RecordParseError::TrailingData(rest.join(",")));
        }

        Ok(Self::new(id, frequency_mhz, message_cost, service_type))
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} MHz | {} msgs | {}",
            self.label(),
            self.frequency_mhz,
            self.message_cost,
            self.service_type
        )
    }
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: RecordField,
) -> Result<&'a str, RecordParseError> {
    fields.next().ok_or(RecordParseError::MissingField(field))
}

/// Unsigned decimal, digits only
fn parse_number(text: &str, field: RecordField) -> Result<u32, RecordParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordParseError::InvalidField {
            field,
            value: text.to_string(),
        });
    }
    text.parse().map_err(|_| RecordParseError::InvalidField {
        field,
        value: text.to_string(),
    })
}
