//! Personal finance ledger.
//!
//! Records dated transactions in a CSV file and prints monthly totals and the
//! largest transactions.
//!
//! # Usage
//!
//! ```bash
//! # interactive menu
//! cargo run
//!
//! # add transactions line by line: 18/05/2024 Cena al ristorante 45
//! cargo run -- add
//!
//! # add one transaction from fields
//! cargo run -- add --date 18/05/2024 --description "Cena al ristorante" --amount 45
//!
//! # reports
//! cargo run -- monthly
//! cargo run -- top --limit 10
//! ```
//!
//! The ledger file defaults to `transactions.csv` and can be set with
//! `--file` or the `LEDGER_FILE` environment variable. Set `RUST_LOG=debug`
//! for diagnostics on stderr.
use anyhow::Result;
use clap::Parser;
use log::info;
use std::io;

use pocket_ledger::cli::{Command, Opts};
use pocket_ledger::date::local_now;
use pocket_ledger::entry::{EntryWorkflow, build_record};
use pocket_ledger::menu::run_interactive;
use pocket_ledger::report::{write_monthly_report, write_top_report};
use pocket_ledger::store::TransactionStore;

fn main() -> Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let store = TransactionStore::new(opts.file);
    info!("Using ledger file {}", store.path().display());

    match opts.cmd.unwrap_or(Command::Menu) {
        Command::Menu => run_interactive(&store)?,
        Command::Add {
            date: Some(date),
            description: Some(description),
            amount: Some(amount),
        } => {
            let record = build_record(&date, &description, &amount, local_now())?;
            store.append(&record)?;
            println!("Transaction added successfully!");
        }
        Command::Add { .. } => {
            let stdin = io::stdin();
            let exit = EntryWorkflow::new(&store).run(&mut stdin.lock(), &mut io::stdout())?;
            info!("Entry session ended: {:?}", exit);
        }
        Command::Monthly => write_monthly_report(&mut io::stdout(), &store.read_all()?)?,
        Command::Top { limit } => write_top_report(&mut io::stdout(), &store.read_all()?, limit)?,
    }

    Ok(())
}
