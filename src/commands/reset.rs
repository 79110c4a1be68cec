// File: reset.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};

use super::{plural, print_info, print_success, print_warning};
use crate::cli::ResetArgs;
use crate::error::TrackerError;
use crate::tracker::Tracker;

pub fn execute(args: &ResetArgs, tracker: &mut Tracker) -> Result<()> {
    // None marks a record that exists but cannot be parsed.
    let count = match tracker.history() {
        Ok(history) => Some(history.len()),
        Err(e @ TrackerError::HistoryParse { .. }) => {
            print_warning(&format!("{}", e));
            None
        }
        Err(e) => return Err(e).context("Failed to read scan history"),
    };

    match count {
        Some(0) => print_info("History is already empty"),
        _ if args.confirm => {}
        _ => {
            let path = tracker.config().history_path().display().to_string();
            let what = match count {
                Some(count) => format!("{} in {}", plural(count, "scan"), path),
                None => format!("The unreadable history file {}", path),
            };
            if !confirm_reset(&what)? {
                print_warning("Operation cancelled by user");
                return Ok(());
            }
        }
    }

    let removed = tracker.reset().context("Failed to reset history")?;
    match count {
        None => print_success("Unreadable history discarded"),
        Some(_) if removed > 0 => {
            print_success(&format!("History cleared, {} removed", plural(removed, "scan")))
        }
        Some(_) => {}
    }

    Ok(())
}

fn confirm_reset(what: &str) -> Result<bool> {
    println!();
    print_warning("This operation will permanently delete the scan history!");
    println!("{} will be removed", what.red());
    println!();

    loop {
        print!("Are you sure you want to continue? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => {
                println!("Please enter 'y' for yes or 'n' for no");
                continue;
            }
        }
    }
}
