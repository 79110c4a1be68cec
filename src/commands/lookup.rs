// File: lookup.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;

use super::{print_entry, print_error, print_info, print_success, print_warning};
use crate::cli::LookupArgs;
use crate::ingest::normalize_code;
use crate::query::HistoryFilter;
use crate::tracker::Tracker;

pub fn execute(args: &LookupArgs, tracker: &Tracker) -> Result<()> {
    let code = normalize_code(&args.code);
    let entry = tracker.lookup(&code).context("Failed to load catalog")?;
    let scans = match tracker.filtered(&HistoryFilter::new(Some(&code), None)) {
        Ok(scans) => scans,
        Err(e) => {
            print_warning(&format!("Scan history unavailable: {}", e));
            Vec::new()
        }
    };

    match args.format.to_lowercase().as_str() {
        "json" => {
            let value = serde_json::json!({
                "code": code,
                "matched": entry,
                "image": tracker.image_for(&code),
                "scan_count": scans.len(),
                "last_scan": scans.last().map(|s| s.datetime.as_str()),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        "table" => {
            match entry {
                Some(entry) => {
                    print_success(&format!("Module {} found in catalog", code.bold()));
                    match tracker.image_for(&code) {
                        Some(path) => print_info(&format!("Image: {}", path.display())),
                        None => print_warning("Image not found"),
                    }
                    print_entry(entry);
                }
                None => print_error(&format!("No module found for {}", code.bold())),
            }

            match scans.last() {
                Some(last) => print_info(&format!(
                    "Scanned {} time(s), last on {}",
                    scans.len(),
                    last.datetime
                )),
                None => print_info("Never scanned"),
            }
        }
        _ => print_error(&format!("Unsupported format: {}", args.format)),
    }

    Ok(())
}
