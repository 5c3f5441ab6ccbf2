//! Invoice number value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invoice number error
#[derive(Debug, Error)]
pub enum InvoiceNumberError {
    #[error("invoice number has an invalid format: {0}")]
    InvalidFormat(String),
}

/// Invoice number in the form `RE-<year>-<sequence>`.
///
/// The sequence is zero-padded to four digits and comes from a single
/// counter over all invoices, not a per-year one. The format therefore
/// stays monotonic within a year but restarts nowhere; see the invoice
/// handler for the counter semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Format a number from its parts, e.g. `RE-2026-0001`.
    pub fn new(year: i32, sequence: u32) -> Self {
        Self(format!("RE-{}-{:04}", year, sequence))
    }

    /// Parse and validate a stored invoice number.
    pub fn parse(value: &str) -> Result<Self, InvoiceNumberError> {
        let invalid = || InvoiceNumberError::InvalidFormat(value.to_string());

        let rest = value.strip_prefix("RE-").ok_or_else(invalid)?;
        let (year, sequence) = rest.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || year.parse::<i32>().is_err() {
            return Err(invalid());
        }
        if sequence.len() < 4 || sequence.parse::<u32>().is_err() {
            return Err(invalid());
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for InvoiceNumber {
    type Error = InvoiceNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for InvoiceNumber {
    type Error = InvoiceNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
