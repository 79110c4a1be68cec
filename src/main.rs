// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::Parser;
use simple_logger::SimpleLogger;

use modtrack::cli::{self, Cli, Commands, ScanArgs};
use modtrack::commands;
use modtrack::config::ConfigParameter;
use modtrack::tracker::Tracker;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        commands::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        cli::parse_log_level(&cli.log_level)
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialise logger")?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = ConfigParameter::from_cli(cli);
    log::debug!("Using configuration: {:?}", config);

    let mut tracker = Tracker::new(config);

    if cli::is_interactive_default(cli) {
        return commands::handle_scan_command(&ScanArgs::default(), &mut tracker);
    }

    match cli.command {
        Some(Commands::Scan(ref args)) => commands::handle_scan_command(args, &mut tracker),
        Some(Commands::Lookup(ref args)) => commands::handle_lookup_command(args, &tracker),
        Some(Commands::History(ref args)) => commands::handle_history_command(args, &tracker),
        Some(Commands::Export(ref args)) => commands::handle_export_command(args, &tracker),
        Some(Commands::Stats(ref args)) => commands::handle_stats_command(args, &tracker),
        Some(Commands::Reset(ref args)) => commands::handle_reset_command(args, &mut tracker),
        None => Ok(()),
    }
}
