// File: history.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;
use std::collections::HashMap;

use super::{plural, print_error, print_info, print_success, print_warning};
use crate::cli::HistoryArgs;
use crate::storage::ScanEvent;
use crate::tracker::Tracker;

pub fn execute(args: &HistoryArgs, tracker: &Tracker) -> Result<()> {
    if args.list_filters {
        return list_filters(tracker);
    }

    let filter = args.filter();
    let mut scans = tracker
        .filtered(&filter)
        .context("Failed to read scan history")?;

    if scans.is_empty() {
        print_warning("No scan history found matching the criteria");
        return Ok(());
    }

    if let Some(limit) = args.limit {
        let skip = scans.len().saturating_sub(limit);
        scans.drain(..skip);
    }

    print_success(&format!("Found {}", plural(scans.len(), "scan record")));

    match args.format.to_lowercase().as_str() {
        "table" => display_history_table(&scans, tracker),
        "json" => display_history_json(&scans)?,
        "timeline" => display_history_timeline(&scans),
        _ => print_error(&format!("Unsupported format: {}", args.format)),
    }

    Ok(())
}

fn list_filters(tracker: &Tracker) -> Result<()> {
    let history = tracker.history().context("Failed to read scan history")?;
    if history.is_empty() {
        print_warning("History is empty");
        return Ok(());
    }

    print_info(&format!("Codes ({}):", history.codes().len()));
    for code in history.codes() {
        println!("  {}", code);
    }

    print_info(&format!("Dates ({}):", history.dates().len()));
    for date in history.dates() {
        println!("  {}", date);
    }

    Ok(())
}

fn display_history_table(scans: &[ScanEvent], tracker: &Tracker) {
    // The catalog is optional here; history stays readable without it.
    let catalog = tracker.catalog().ok();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    println!();
    println!("{}", "═".repeat(72).bright_black());
    println!("{:^72}", "SCAN HISTORY".bold().bright_white());
    println!("{}", "═".repeat(72).bright_black());

    println!(
        "{:<6} {:<24} {:<26} {}",
        "#".bold(),
        "Code".bold(),
        "Date/Time".bold(),
        "Notes".bold()
    );
    println!("{}", "─".repeat(72).bright_black());

    for (index, scan) in scans.iter().enumerate() {
        let count = seen.entry(scan.code.as_str()).or_insert(0);
        *count += 1;

        let mut notes = Vec::new();
        if *count > 1 {
            notes.push(format!("repeat #{}", count).yellow().to_string());
        }
        if let Some(catalog) = catalog {
            if catalog.get(&scan.code).is_none() {
                notes.push("unknown".red().to_string());
            }
        }

        let notes_display = if notes.is_empty() {
            "-".dimmed().to_string()
        } else {
            notes.join(", ")
        };

        println!(
            "{:<6} {:<24} {:<26} {}",
            index + 1,
            scan.code,
            scan.datetime,
            notes_display
        );
    }

    println!("{}", "═".repeat(72).bright_black());
}

fn display_history_json(scans: &[ScanEvent]) -> Result<()> {
    let json = serde_json::to_string_pretty(scans)?;
    println!("{}", json);
    Ok(())
}

fn display_history_timeline(scans: &[ScanEvent]) {
    println!();
    println!("{}", "SCAN TIMELINE".bold().bright_white());
    println!("{}", "─".repeat(60).bright_black());

    // Days in first-seen order, scans in recorded order.
    let mut days: Vec<&str> = Vec::new();
    let mut grouped_by_day: HashMap<&str, Vec<&ScanEvent>> = HashMap::new();
    for scan in scans {
        let day = scan.date();
        if !grouped_by_day.contains_key(day) {
            days.push(day);
        }
        grouped_by_day.entry(day).or_default().push(scan);
    }

    for day in days {
        let day_scans = &grouped_by_day[day];
        println!(
            "\n{} ({})",
            day.bold().cyan(),
            plural(day_scans.len(), "scan")
        );

        for scan in day_scans {
            let time = scan
                .datetime
                .rsplit(' ')
                .next()
                .unwrap_or(scan.datetime.as_str());
            println!("  {} {}", time.dimmed(), scan.code);
        }
    }
}
