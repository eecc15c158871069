//! Domain errors raised while validating and reading ledger records.

use std::fmt;

/// A recoverable failure in the ledger domain.
///
/// `Format`, `Range`, `FutureDate` and `InvalidAmount` are raised while a new
/// transaction is being entered and are reported back to the user. `CorruptRecord`
/// is raised by the store when a persisted row cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The input does not have the expected structure.
    Format(String),
    /// A date component is outside its valid range.
    Range(String),
    /// The date lies after the current moment.
    FutureDate,
    /// The amount token is not a number.
    InvalidAmount(String),
    /// A stored row could not be decoded.
    CorruptRecord { line: u64, reason: String },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(msg) => write!(f, "invalid format: {msg}"),
            Self::Range(msg) => write!(f, "out of range: {msg}"),
            Self::FutureDate => write!(
                f,
                "the date is in the future, enter a date that is not after today"
            ),
            Self::InvalidAmount(token) => {
                write!(
                    f,
                    "invalid amount '{token}', enter a number within the supported range \
                     (up to about 7.9e28, at most 28 decimal places)"
                )
            }
            Self::CorruptRecord { line, reason } => {
                write!(f, "corrupt record at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for LedgerError {}
