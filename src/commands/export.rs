// File: export.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{plural, print_info, print_success, print_warning};
use crate::cli::ExportArgs;
use crate::reports::{ReportConfig, ReportEngine};
use crate::tracker::Tracker;

pub fn execute(args: &ExportArgs, tracker: &Tracker) -> Result<()> {
    let engine = ReportEngine::new();
    let extension = engine.file_extension(&args.format)?;

    let filter = args.filter();
    let scans = tracker
        .filtered(&filter)
        .context("Failed to read scan history")?;

    if scans.is_empty() {
        print_warning("No scan data found matching the specified criteria, exporting an empty file");
    } else {
        print_info(&format!("Exporting {}", plural(scans.len(), "scan record")));
    }

    let report_data = engine.create_report_data(scans, &filter);
    let config = ReportConfig {
        lines_per_page: args
            .lines_per_page
            .unwrap_or_else(|| tracker.config().lines_per_page())
            .max(1),
    };

    let output_path = determine_output_path(args, extension);
    let content = engine.generate_report(&args.format, &report_data, &config, Some(&output_path))?;

    print_success(&format!(
        "Export written: {} ({} bytes)",
        output_path.display(),
        content.len()
    ));

    Ok(())
}

fn determine_output_path(args: &ExportArgs, extension: &str) -> PathBuf {
    if let Some(ref path) = args.output {
        return path.clone();
    }

    PathBuf::from(format!("scan_history.{}", extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: &str, output: Option<&str>) -> ExportArgs {
        ExportArgs {
            format: format.to_string(),
            output: output.map(PathBuf::from),
            code: None,
            date: None,
            lines_per_page: None,
        }
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            determine_output_path(&args("csv", None), "csv"),
            PathBuf::from("scan_history.csv")
        );
        assert_eq!(
            determine_output_path(&args("text", Some("/tmp/out.txt")), "txt"),
            PathBuf::from("/tmp/out.txt")
        );
    }
}
