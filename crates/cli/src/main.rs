//! # staybook-cli
//!
//! Command-line interface for the staybook reservation dashboard: list
//! the three tables, print the weekly and balance summaries, and write
//! the CSV report exports without going through the HTTP server.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use staybook_reports::{
    balance_summary, owner_report_csv, partner_report_csv, weekly_report_csv, weekly_totals,
};
use staybook_store::{Store, StorePaths};
use staybook_table::Table;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// staybook - reservation management from the terminal
#[derive(Parser)]
#[command(name = "staybook")]
#[command(author, version, about = "Reservation management dashboard", long_about = None)]
struct Cli {
    /// Directory holding bookings.xlsx, partners.xlsx and owners.xlsx
    /// (falls back to STAYBOOK_DATA_DIR, then "data")
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one of the data tables
    Show {
        #[arg(value_enum)]
        table: TableName,
    },
    /// Print the weekly and balance summaries
    Summary,
    /// Write a report as CSV
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TableName {
    Bookings,
    Partners,
    Owners,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Weekly,
    Partners,
    Owners,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var("STAYBOOK_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));
    let store = Store::open(StorePaths::from_dir(&data_dir));

    match cli.command {
        Command::Show { table } => {
            let table = match table {
                TableName::Bookings => store.bookings(),
                TableName::Partners => store.partners(),
                TableName::Owners => store.owners(),
            };
            print_table(table);
        }
        Command::Summary => print_summary(&store),
        Command::Report { kind, out } => {
            let csv = match kind {
                ReportKind::Weekly => weekly_report_csv(&store, today()),
                ReportKind::Partners => partner_report_csv(&store),
                ReportKind::Owners => owner_report_csv(&store),
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .with_context(|| format!("Failed to write report: {}", path.display()))?;
                    println!("{} {}", "Wrote".green().bold(), path.display());
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Print a table with a highlighted header row
fn print_table(table: &Table) {
    if table.is_empty() {
        println!("{}", "(no rows)".yellow());
        return;
    }

    println!("{}", table.headers().join(" | ").cyan().bold());
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(|c| c.display()).collect();
        println!("{}", cells.join(" | "));
    }
    println!("{} rows", table.row_count());
}

fn print_summary(store: &Store) {
    let totals = weekly_totals(store, today());

    println!("{}", "Weekly summary".cyan().bold());
    println!(
        "  Window: {} to {}",
        totals.window_start, totals.window_end
    );
    println!("  Lodging total:       {:.2}", totals.lodging_total);
    println!("  Payable total:       {:.2}", totals.payable_total);
    println!("  Receivable total:    {:.2}", totals.receivable_total);
    println!("  Occupied apartments: {}", totals.occupied_apartments);
    println!("  Bookings in window:  {}", totals.bookings.row_count());

    match balance_summary(store) {
        Some(balance) => {
            println!("{}", "Balance".cyan().bold());
            println!("  Revenue total:            {:.2}", balance.revenue_total);
            println!(
                "  Partner receivable total: {:.2}",
                balance.partner_receivable_total
            );
            println!(
                "  Partner payable total:    {:.2}",
                balance.partner_payable_total
            );
        }
        None => println!(
            "{}",
            "Balance unavailable: required columns are missing".yellow()
        ),
    }
}
