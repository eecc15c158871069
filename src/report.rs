//! Read-side reports over the full record set.
//!
//! Both reports take records in store order and never modify them.

use anyhow::{Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::LedgerError;
use crate::types::{Amount, Record};

/// Number of records shown by the top report unless configured otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 10;

pub const NO_TRANSACTIONS: &str = "No transactions recorded.";

/// Formats an amount with exactly two decimals, rounding half away from zero.
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Sums of amounts keyed by `YYYY-MM`, ordered by key.
pub fn monthly_totals(records: &[Record]) -> Result<BTreeMap<String, Amount>, LedgerError> {
    let mut totals: BTreeMap<String, Amount> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.month_key()?).or_insert(Decimal::ZERO);
        *total = total.checked_add(record.amount).ok_or_else(|| {
            LedgerError::Range(format!("monthly total overflows at {}", record.date))
        })?;
    }
    Ok(totals)
}

/// Report lines, `"<YYYY-MM> <sum>"`, in ascending month order.
pub fn monthly_lines(records: &[Record]) -> Result<Vec<String>, LedgerError> {
    Ok(monthly_totals(records)?
        .into_iter()
        .map(|(month, total)| format!("{} {}", month, format_amount(total)))
        .collect())
}

/// The `limit` largest records by amount, largest first.
///
/// The sort is stable so equal amounts keep store order.
pub fn top_records(records: &[Record], limit: usize) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(limit);
    sorted
}

/// Report lines, `"<date> <description> <amount>"`.
pub fn top_lines(records: &[Record], limit: usize) -> Vec<String> {
    top_records(records, limit)
        .into_iter()
        .map(|r| format!("{} {} {}", r.date, r.description, format_amount(r.amount)))
        .collect()
}

/// Writes the monthly report, or the empty notice when there are no records.
pub fn write_monthly_report<W: Write>(output: &mut W, records: &[Record]) -> Result<()> {
    let lines = monthly_lines(records)?;
    for line in &lines {
        writeln!(output, "{line}").context("Failed to write monthly report")?;
    }
    if lines.is_empty() {
        writeln!(output, "{NO_TRANSACTIONS}").context("Failed to write monthly report")?;
    }
    Ok(())
}

/// Writes the top report.
///
/// The empty notice is decided after the lines are written and looks at the
/// whole record set, not the truncated slice.
pub fn write_top_report<W: Write>(output: &mut W, records: &[Record], limit: usize) -> Result<()> {
    for line in top_lines(records, limit) {
        writeln!(output, "{line}").context("Failed to write top report")?;
    }
    if records.is_empty() {
        writeln!(output, "{NO_TRANSACTIONS}").context("Failed to write top report")?;
    }
    Ok(())
}
