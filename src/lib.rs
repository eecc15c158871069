//! A personal finance ledger.
//!
//! Transactions (date, description, amount) are appended to a flat CSV file
//! and read back for two reports: per-month totals and the largest amounts.
//!
//! - [`date`]: validation of `DD/MM/YYYY` dates
//! - [`entry`]: parsing and the interactive entry loop
//! - [`store`]: the append-only CSV store
//! - [`report`]: monthly and top-N reports
//! - [`menu`]: the interactive main menu

pub mod cli;
pub mod date;
pub mod entry;
pub mod error;
pub mod menu;
pub mod report;
pub mod store;
pub mod types;

pub use error::LedgerError;
pub use store::TransactionStore;
pub use types::Record;
