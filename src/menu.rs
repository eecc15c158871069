//! Interactive main menu.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Timelike};
use log::{debug, warn};
use std::io::{BufRead, Write};

use crate::date::local_now;
use crate::entry::{EntryWorkflow, prompt_line};
use crate::report::{DEFAULT_TOP_LIMIT, write_monthly_report, write_top_report};
use crate::store::TransactionStore;

const MENU: &str = "\nOperations menu:\n\
[1] Add a transaction\n\
[2] Show the monthly report\n\
[3] Show the top 10 transactions by amount\n\
Type 'quit' to leave the program\n";

/// Farewell message for the hour of `now`.
pub fn greeting(now: NaiveDateTime) -> &'static str {
    match now.hour() {
        0..=11 => "Have a good day!",
        12..=14 => "Enjoy the rest of your day!",
        _ => "Have a good evening!",
    }
}

/// Reports a failed menu command and lets the menu carry on.
fn report_failure<W: Write>(output: &mut W, err: &anyhow::Error) -> Result<()> {
    warn!("Menu command failed: {:#}", err);
    writeln!(output, "Error: {:#}", err).context("Failed to write error")
}

/// Runs the menu until `quit` or end of input.
pub fn run_menu<R, W>(
    store: &TransactionStore,
    clock: fn() -> NaiveDateTime,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let workflow = EntryWorkflow::with_clock(store, clock);
    loop {
        write!(output, "{MENU}").context("Failed to write menu")?;
        let Some(choice) = prompt_line(input, output, "Select an option: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let exit = workflow.run(input, output)?;
                debug!("Entry session ended: {:?}", exit);
            }
            "2" => match store.read_all() {
                Ok(records) => write_monthly_report(output, &records)?,
                Err(e) => report_failure(output, &e)?,
            },
            "3" => match store.read_all() {
                Ok(records) => write_top_report(output, &records, DEFAULT_TOP_LIMIT)?,
                Err(e) => report_failure(output, &e)?,
            },
            "quit" => {
                writeln!(output, "{}", greeting(clock())).context("Failed to write greeting")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option. Select 1, 2, 3 or quit")
                .context("Failed to write notice")?,
        }
    }
}

/// Runs the menu on stdin and stdout with the local clock.
pub fn run_interactive(store: &TransactionStore) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_menu(store, local_now, &mut input, &mut output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NO_TRANSACTIONS;
    use crate::store::test_support::TempStorePath;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn afternoon() -> NaiveDateTime {
        at(13)
    }

    #[test]
    fn greeting_follows_the_hour() {
        assert_eq!(greeting(at(0)), "Have a good day!");
        assert_eq!(greeting(at(11)), "Have a good day!");
        assert_eq!(greeting(at(12)), "Enjoy the rest of your day!");
        assert_eq!(greeting(at(14)), "Enjoy the rest of your day!");
        assert_eq!(greeting(at(15)), "Have a good evening!");
        assert_eq!(greeting(at(23)), "Have a good evening!");
    }

    #[test]
    fn menu_routes_to_entry_and_reports() {
        let path = TempStorePath::new();
        let store = TransactionStore::new(&path.0);
        let script = "3\n1\n18/05/2024 Cena al ristorante 45\n4\n2\n3\nfoo\nquit\n";
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();

        run_menu(&store, afternoon, &mut input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(NO_TRANSACTIONS));
        assert!(output.contains("Transaction added successfully!"));
        assert!(output.contains("2024-05 45.00"));
        assert!(output.contains("18/05/2024 Cena al ristorante 45.00"));
        assert!(output.contains("Invalid option. Select 1, 2, 3 or quit"));
        assert!(output.ends_with("Enjoy the rest of your day!\n"));
    }

    #[test]
    fn corrupt_store_fails_the_report_but_not_the_menu() {
        let path = TempStorePath::new();
        std::fs::write(&path.0, "01/01/2024,A,10\n01/01/2024,B\n").unwrap();
        let store = TransactionStore::new(&path.0);
        let mut input = Cursor::new(b"2\n3\nquit\n".to_vec());
        let mut output = Vec::new();

        run_menu(&store, afternoon, &mut input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("corrupt record at line 2").count(), 2);
        assert!(output.ends_with("Enjoy the rest of your day!\n"));
    }

    #[test]
    fn menu_stops_at_end_of_input() {
        let path = TempStorePath::new();
        let store = TransactionStore::new(&path.0);
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();

        run_menu(&store, afternoon, &mut input, &mut output).unwrap();

        assert!(String::from_utf8(output).unwrap().contains("Operations menu:"));
    }
}
