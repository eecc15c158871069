//! Transaction entry: line parsing, validation and the interactive entry loop.
//!
//! The legacy single line format is `<date> <description> <amount>`, for
//! example `18/05/2024 Cena al ristorante 45`. The amount is the text after
//! the last space and the date is the text before the first space of what
//! remains, so descriptions may contain spaces.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::io::{BufRead, Write};

use crate::date::{local_now, validate_date};
use crate::error::LedgerError;
use crate::store::TransactionStore;
use crate::types::{Record, parse_amount};

/// Keyword that leaves the entry loop, matched case-insensitively.
pub const EXIT_KEYWORD: &str = "quit";

const LINE_PROMPT: &str = "Enter the transaction date, description and amount \
(e.g. 18/05/2024 Cena al ristorante 45) or type 'quit' to go back to the main menu: ";
const CONTINUE_PROMPT: &str =
    "Add another transaction? (1: Yes ; 4: No, back to the main menu): ";
const FORMAT_HINT: &str = "enter date, description and amount separated by spaces \
(e.g. 18/05/2024 Cena al ristorante 45)";

/// The three raw tokens of an entry line.
#[derive(Debug, PartialEq, Eq)]
pub struct EntryLine<'a> {
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
}

/// Splits an entry line into its date, description and amount tokens.
///
/// # Errors
///
/// [`LedgerError::Format`] when the line has no space, when the part before
/// the amount has no space, or when the description is empty.
pub fn split_line(line: &str) -> Result<EntryLine<'_>, LedgerError> {
    let (head, amount) = line
        .rsplit_once(' ')
        .ok_or_else(|| LedgerError::Format(FORMAT_HINT.into()))?;
    let (date, description) = head
        .trim()
        .split_once(' ')
        .ok_or_else(|| LedgerError::Format(FORMAT_HINT.into()))?;

    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::Format("the description must not be empty".into()));
    }

    Ok(EntryLine {
        date: date.trim(),
        description,
        amount: amount.trim(),
    })
}

/// Validates separate fields and builds a record.
///
/// The date is checked before the amount.
pub fn build_record(
    date: &str,
    description: &str,
    amount: &str,
    now: NaiveDateTime,
) -> Result<Record, LedgerError> {
    let date = date.trim();
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::Format("the description must not be empty".into()));
    }
    validate_date(date, now)?;
    let amount = parse_amount(amount)?;
    Ok(Record::new(date, description, amount))
}

/// Parses and validates one legacy entry line.
pub fn parse_entry(line: &str, now: NaiveDateTime) -> Result<Record, LedgerError> {
    let tokens = split_line(line)?;
    build_record(tokens.date, tokens.description, tokens.amount, now)
}

/// How an entry session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowExit {
    /// The exit keyword was typed instead of a transaction.
    Quit,
    /// The user declined to add another transaction.
    Finished,
    /// The continue prompt got an answer it did not recognize.
    Unrecognized,
    /// Input ran out.
    EndOfInput,
}

enum ContinueAnswer {
    Yes,
    No,
    Unrecognized,
}

fn parse_continue_answer(answer: &str) -> ContinueAnswer {
    match answer.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" => ContinueAnswer::Yes,
        "4" | "n" | "no" => ContinueAnswer::No,
        _ => ContinueAnswer::Unrecognized,
    }
}

/// Writes `prompt` and reads one line. `None` means end of input.
pub(crate) fn prompt_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// The interactive loop that validates and commits new records.
pub struct EntryWorkflow<'a> {
    store: &'a TransactionStore,
    now: fn() -> NaiveDateTime,
}

impl<'a> EntryWorkflow<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        Self::with_clock(store, local_now)
    }

    /// Uses `now` instead of the local clock for future date checks.
    pub fn with_clock(store: &'a TransactionStore, now: fn() -> NaiveDateTime) -> Self {
        EntryWorkflow { store, now }
    }

    /// Prompts for transactions until the user leaves.
    ///
    /// Invalid lines are reported on `output` and discarded, then the loop
    /// prompts again. Only I/O failures end the loop with an error.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<WorkflowExit>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            let Some(line) = prompt_line(input, output, LINE_PROMPT)? else {
                return Ok(WorkflowExit::EndOfInput);
            };
            if line.trim().eq_ignore_ascii_case(EXIT_KEYWORD) {
                return Ok(WorkflowExit::Quit);
            }

            let record = match parse_entry(&line, (self.now)()) {
                Ok(record) => record,
                Err(e) => {
                    debug!("Discarded entry line '{}': {}", line, e);
                    writeln!(output, "Error: {e}").context("Failed to write error")?;
                    continue;
                }
            };

            self.store.append(&record)?;
            writeln!(output, "Transaction added successfully!")
                .context("Failed to write confirmation")?;

            let Some(answer) = prompt_line(input, output, CONTINUE_PROMPT)? else {
                return Ok(WorkflowExit::EndOfInput);
            };
            match parse_continue_answer(&answer) {
                ContinueAnswer::Yes => continue,
                ContinueAnswer::No => return Ok(WorkflowExit::Finished),
                ContinueAnswer::Unrecognized => {
                    warn!("Unrecognized continue answer '{}'", answer);
                    writeln!(output, "Invalid option.").context("Failed to write notice")?;
                    return Ok(WorkflowExit::Unrecognized);
                }
            }
        }
    }
}
