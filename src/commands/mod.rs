// File: mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use colored::*;

use crate::catalog::CatalogEntry;
use crate::cli::{ExportArgs, HistoryArgs, LookupArgs, ResetArgs, ScanArgs, StatsArgs};
use crate::tracker::Tracker;

pub mod export;
pub mod history;
pub mod lookup;
pub mod reset;
pub mod scan;
pub mod stats;

pub fn handle_scan_command(args: &ScanArgs, tracker: &mut Tracker) -> Result<()> {
    scan::execute(args, tracker)
}

pub fn handle_lookup_command(args: &LookupArgs, tracker: &Tracker) -> Result<()> {
    lookup::execute(args, tracker)
}

pub fn handle_history_command(args: &HistoryArgs, tracker: &Tracker) -> Result<()> {
    history::execute(args, tracker)
}

pub fn handle_export_command(args: &ExportArgs, tracker: &Tracker) -> Result<()> {
    export::execute(args, tracker)
}

pub fn handle_stats_command(args: &StatsArgs, tracker: &Tracker) -> Result<()> {
    stats::execute(args, tracker)
}

pub fn handle_reset_command(args: &ResetArgs, tracker: &mut Tracker) -> Result<()> {
    reset::execute(args, tracker)
}

fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

fn print_entry(entry: &CatalogEntry) {
    let width = entry.fields().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    println!("{}", "─".repeat(60).bright_black());
    for (key, value) in entry.fields() {
        let value = if value.is_empty() {
            "-".dimmed()
        } else {
            value.normal()
        };
        println!("  {:<width$}  {}", key.bold(), value, width = width);
    }
    println!("{}", "─".repeat(60).bright_black());
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
