// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::aggregate::DateOrder;
use crate::query::HistoryFilter;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        long,
        global = true,
        help = "Directory holding the scan history (defaults to the local data dir)"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        long = "history-file",
        global = true,
        help = "Explicit path of the history CSV file"
    )]
    pub history_file: Option<PathBuf>,

    #[arg(
        short = 'c',
        long = "catalog",
        global = true,
        help = "Reference catalog CSV file [default: catalog.csv]"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(
        long = "id-column",
        global = true,
        help = "Catalog column holding the barcode [default: Barcode]"
    )]
    pub id_column: Option<String>,

    #[arg(
        long = "images-dir",
        global = true,
        help = "Directory with <barcode>.<ext> images [default: images]"
    )]
    pub images_dir: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Reduce output verbosity",
        global = true
    )]
    pub quiet: bool,

    #[arg(long = "no-color", help = "Disable colored output", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record scanned barcodes (reads stdin when no code is given)
    Scan(ScanArgs),
    /// Show the catalog entry for a barcode without recording a scan
    Lookup(LookupArgs),
    /// Show the scan history
    History(HistoryArgs),
    /// Write the (filtered) scan history to a file
    Export(ExportArgs),
    /// Scans per day
    Stats(StatsArgs),
    /// Delete the whole scan history
    Reset(ResetArgs),
}

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    #[arg(help = "Barcodes to record")]
    pub codes: Vec<String>,

    #[arg(long = "json", help = "Print one JSON result per scan")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[arg(help = "Barcode to look up")]
    pub code: String,

    #[arg(long = "format", default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[arg(long = "code", help = "Only this barcode ('all' for every code)")]
    pub code: Option<String>,

    #[arg(long = "date", help = "Only this day, DD/MM/YYYY ('all' for every day)")]
    pub date: Option<String>,

    #[arg(long = "format", default_value = "table")]
    pub format: String,

    #[arg(short = 'l', long = "limit", help = "Show only the N most recent scans")]
    pub limit: Option<usize>,

    #[arg(
        long = "list-filters",
        help = "List the codes and dates available for filtering"
    )]
    pub list_filters: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short = 'f', long = "format", default_value = "csv")]
    pub format: String,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[arg(long = "code", help = "Only this barcode ('all' for every code)")]
    pub code: Option<String>,

    #[arg(long = "date", help = "Only this day, DD/MM/YYYY ('all' for every day)")]
    pub date: Option<String>,

    #[arg(long = "lines-per-page", help = "Records per page of the text document")]
    pub lines_per_page: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long = "format", default_value = "table")]
    pub format: String,

    #[arg(long = "code", help = "Only count this barcode")]
    pub code: Option<String>,

    #[arg(
        long = "chronological",
        help = "Order days by calendar date instead of as DD/MM/YYYY text"
    )]
    pub chronological: bool,

    #[arg(long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    #[arg(long = "confirm", help = "Reset without interactive prompt")]
    pub confirm: bool,
}

impl HistoryArgs {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter::new(self.code.as_deref(), self.date.as_deref())
    }
}

impl ExportArgs {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter::new(self.code.as_deref(), self.date.as_deref())
    }
}

impl StatsArgs {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter::new(self.code.as_deref(), None)
    }

    pub fn date_order(&self) -> DateOrder {
        if self.chronological {
            DateOrder::Chronological
        } else {
            DateOrder::Lexicographic
        }
    }
}

pub fn parse_log_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    }
}

/// Running without a subcommand drops straight into interactive scanning.
pub fn is_interactive_default(cli: &Cli) -> bool {
    cli.command.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), log::LevelFilter::Debug);
        assert_eq!(parse_log_level("off"), log::LevelFilter::Off);
        assert_eq!(parse_log_level("bogus"), log::LevelFilter::Warn);
    }

    #[test]
    fn test_scan_subcommand() {
        let cli = Cli::parse_from(["modtrack", "scan", "m001", "A1"]);
        match cli.command {
            Some(Commands::Scan(args)) => assert_eq!(args.codes, vec!["m001", "A1"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::parse_from(["modtrack", "--catalog", "data.csv"]);
        assert!(is_interactive_default(&cli));
        assert_eq!(cli.catalog, Some(PathBuf::from("data.csv")));
    }

    #[test]
    fn test_history_filter_from_args() {
        let cli = Cli::parse_from(["modtrack", "history", "--code", "a1", "--date", "all"]);
        let Some(Commands::History(args)) = cli.command else {
            panic!("expected history command");
        };
        let filter = args.filter();
        assert_eq!(filter.code.as_deref(), Some("A1"));
        assert!(filter.date.is_none());
    }

    #[test]
    fn test_stats_date_order() {
        let cli = Cli::parse_from(["modtrack", "stats", "--chronological"]);
        let Some(Commands::Stats(args)) = cli.command else {
            panic!("expected stats command");
        };
        assert_eq!(args.date_order(), DateOrder::Chronological);
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["modtrack", "reset", "--confirm", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::Reset(ResetArgs { confirm: true }))));
    }
}
