// File: scan.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, IsTerminal, Write};

use super::{plural, print_entry, print_error, print_info, print_success, print_warning};
use crate::cli::ScanArgs;
use crate::ingest::IngestResult;
use crate::tracker::Tracker;

const EXIT_WORDS: &[&str] = &["quit", "exit"];

pub fn execute(args: &ScanArgs, tracker: &mut Tracker) -> Result<()> {
    // Nothing may be recorded when the catalog cannot be read.
    let catalog = tracker.catalog().context("Cannot start scanning")?;
    if !args.json {
        print_info(&format!(
            "Catalog {} loaded ({})",
            catalog.source().display(),
            plural(catalog.len(), "module")
        ));
    }
    tracker
        .history()
        .context("Failed to read scan history, run `modtrack reset` to start over")?;

    if !args.codes.is_empty() {
        for code in &args.codes {
            scan_one(code, args.json, tracker)?;
        }
        return Ok(());
    }

    scan_interactive(args.json, tracker)
}

fn scan_interactive(json: bool, tracker: &mut Tracker) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut recorded = 0usize;

    if interactive {
        print_info("Scan a barcode (type 'quit' or press Ctrl-D to stop)");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", "scan>".bold().cyan());
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read barcode from stdin")?;

        if EXIT_WORDS.contains(&line.trim().to_lowercase().as_str()) {
            break;
        }

        if scan_one(&line, json, tracker)? {
            recorded += 1;
        }
    }

    if interactive {
        println!();
    }
    if !json {
        print_info(&format!("{} recorded this session", plural(recorded, "scan")));
    }

    Ok(())
}

/// Returns whether a scan was recorded.
fn scan_one(code: &str, json: bool, tracker: &mut Tracker) -> Result<bool> {
    let Some(result) = tracker
        .ingest_now(code)
        .with_context(|| format!("Failed to record scan of {}", code.trim()))?
    else {
        return Ok(false);
    };

    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        report(&result, tracker);
    }

    Ok(true)
}

fn report(result: &IngestResult, tracker: &Tracker) {
    let code = &result.event.code;
    println!();

    if let Some(ref previous) = result.previous_timestamp {
        print_warning(&format!(
            "Module {} was already scanned on {}",
            code.bold(),
            previous
        ));
    }

    match result.matched {
        Some(ref entry) => {
            print_success(&format!("Module {} detected", code.bold()));
            match tracker.image_for(code) {
                Some(path) => print_info(&format!("Image: {}", path.display())),
                None => print_warning("Image not found"),
            }
            print_entry(entry);
        }
        None => print_error(&format!("No module found for {}", code.bold())),
    }
}
