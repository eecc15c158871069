//! Core data types for the ledger.
//!
//! # Type Aliases
//!
//! - [`Amount`]: Type alias for monetary amounts (Decimal)
//!
//! # Core Types
//!
//! - [`Record`]: a single dated transaction with a description and a signed amount
//!
//! # Serialization
//!
//! [`Record`] implements [`Serialize`] and [`Deserialize`] for the headerless CSV
//! store. Fields are written in declaration order: `date`, `description`, `amount`.
//! The amount is written as plain numeric text and read back leniently, so rows
//! holding float-style text such as `45.0` or `1e3` still decode.
//!
//! # Examples
//!
//! ```
//! use pocket_ledger::types::Record;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let record = Record::new("18/05/2024", "Cena al ristorante", Decimal::from_str("45").unwrap());
//! assert_eq!(record.month_key().unwrap(), "2024-05");
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

pub type Amount = Decimal;

/// Textual layout of a record date, day first with a four digit year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Represents a single ledger transaction.
///
/// # Fields
///
/// - `date`: the date exactly as it was entered, `DD/MM/YYYY`
/// - `description`: free text, may contain spaces and commas
/// - `amount`: signed amount, negative for expenses
///
/// Records are immutable once written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Amount,
}

impl Record {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: Amount) -> Self {
        Record {
            date: date.into(),
            description: description.into(),
            amount,
        }
    }

    /// Parses the stored date string into a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate, LedgerError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| LedgerError::Format(format!("date '{}' is not DD/MM/YYYY: {e}", self.date)))
    }

    /// The `YYYY-MM` bucket used by the monthly report.
    pub fn month_key(&self) -> Result<String, LedgerError> {
        Ok(self.parsed_date()?.format("%Y-%m").to_string())
    }
}

/// Parses an amount token.
///
/// Accepts plain decimals (`45`, `-3.50`) and scientific notation (`1e3`).
/// Values a [`Decimal`] cannot hold, beyond roughly ±7.9e28 or with more than
/// 28 decimal places, are rejected like any other non-number.
pub fn parse_amount(token: &str) -> Result<Amount, LedgerError> {
    let trimmed = token.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))
}

/// Custom deserializer for stored amounts.
///
/// Goes through [`parse_amount`] for text so float-style values written by
/// older tools decode to the same amount.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a decimal number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_amount(value).map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_str(AmountVisitor)
}
