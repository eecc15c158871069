//! Command line options.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::DEFAULT_TOP_LIMIT;

/// A personal finance ledger kept in a CSV file
#[derive(Debug, Parser)]
#[command(version)]
pub struct Opts {
    /// Path to the ledger file
    #[arg(long, short, global = true, env = "LEDGER_FILE", default_value = "transactions.csv")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive menu (default)
    Menu,
    /// Add transactions, interactively or from the given fields
    Add {
        /// Date as DD/MM/YYYY
        #[arg(long, requires_all = ["description", "amount"])]
        date: Option<String>,
        /// Free text description
        #[arg(long, requires_all = ["date", "amount"])]
        description: Option<String>,
        /// Signed amount, negative for expenses
        #[arg(long, allow_hyphen_values = true, requires_all = ["date", "description"])]
        amount: Option<String>,
    },
    /// Print the sum of amounts for each month
    Monthly,
    /// Print the transactions with the largest amounts
    Top {
        /// How many transactions to show
        #[arg(long, short = 'n', default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },
}
