// File: stats.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::Path;

use super::{plural, print_error, print_info, print_success, print_warning};
use crate::aggregate::{busiest_day, DateOrder};
use crate::cli::StatsArgs;
use crate::tracker::Tracker;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize)]
struct ScanStats {
    total_scans: usize,
    unique_codes: usize,
    days: Vec<DayCount>,
    average_per_day: f64,
}

#[derive(Debug, Clone, Serialize)]
struct DayCount {
    date: String,
    count: usize,
}

pub fn execute(args: &StatsArgs, tracker: &Tracker) -> Result<()> {
    let filter = args.filter();
    let scans = tracker
        .filtered(&filter)
        .context("Failed to read scan history")?;

    if scans.is_empty() {
        print_warning("No scans to chart");
        return Ok(());
    }

    let order = args.date_order();
    let counts = tracker.daily_counts(&filter, order)?;
    let stats = ScanStats {
        total_scans: scans.len(),
        unique_codes: scans
            .iter()
            .map(|s| s.code.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len(),
        average_per_day: scans.len() as f64 / counts.len() as f64,
        days: counts
            .into_iter()
            .map(|(date, count)| DayCount { date, count })
            .collect(),
    };

    let rendered = match args.format.to_lowercase().as_str() {
        "table" => {
            display_stats_table(&stats, order);
            None
        }
        "json" => Some(serde_json::to_string_pretty(&stats)?),
        "csv" => Some(stats_csv(&stats)?),
        _ => {
            print_error(&format!("Unsupported format: {}", args.format));
            return Ok(());
        }
    };

    if let Some(ref content) = rendered {
        match args.output {
            Some(ref path) => save_stats_output(content, path)?,
            None => println!("{}", content),
        }
    } else if args.output.is_some() {
        print_warning("--output is only used with json or csv format");
    }

    Ok(())
}

fn display_stats_table(stats: &ScanStats, order: DateOrder) {
    println!();
    println!("{}", "═".repeat(72).bright_black());
    println!("{:^72}", "SCANS PER DAY".bold().bright_white());
    println!("{}", "═".repeat(72).bright_black());

    println!(
        "Total Scans:       {}",
        stats.total_scans.to_string().bold().green()
    );
    println!(
        "Distinct Codes:    {}",
        stats.unique_codes.to_string().bold()
    );
    println!(
        "Days:              {} (avg {:.1}/day)",
        stats.days.len().to_string().bold(),
        stats.average_per_day
    );

    let pairs: Vec<(String, usize)> = stats
        .days
        .iter()
        .map(|d| (d.date.clone(), d.count))
        .collect();
    if let Some((day, count)) = busiest_day(&pairs) {
        println!(
            "Busiest Day:       {} ({})",
            day.bold().cyan(),
            plural(count, "scan")
        );
    }

    println!("\n{}", "DAILY DISTRIBUTION".bold().cyan());
    println!("{}", "─".repeat(72).bright_black());

    let max = stats.days.iter().map(|d| d.count).max().unwrap_or(1).max(1);
    for day in &stats.days {
        let len = (day.count * BAR_WIDTH).div_ceil(max);
        println!(
            "{:<12} {} {}",
            day.date,
            "█".repeat(len).blue(),
            day.count
        );
    }
    println!("{}", "═".repeat(72).bright_black());

    if order == DateOrder::Lexicographic {
        print_info("Days are ordered as DD/MM/YYYY text; use --chronological for calendar order");
    }
}

fn stats_csv(stats: &ScanStats) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["date", "count"])?;
    for day in &stats.days {
        writer.serialize(day)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush statistics CSV: {}", e.error()))?;
    String::from_utf8(buffer).context("Statistics CSV is not valid UTF-8")
}

fn save_stats_output(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write statistics to {}", path.display()))?;
    print_success(&format!("Statistics saved to: {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_csv() {
        let stats = ScanStats {
            total_scans: 3,
            unique_codes: 2,
            average_per_day: 1.5,
            days: vec![
                DayCount {
                    date: "01/01/2025".to_string(),
                    count: 2,
                },
                DayCount {
                    date: "02/01/2025".to_string(),
                    count: 1,
                },
            ],
        };

        assert_eq!(
            stats_csv(&stats).unwrap(),
            "date,count\n01/01/2025,2\n02/01/2025,1\n"
        );
    }

    #[test]
    fn test_stats_csv_quotes_hand_edited_dates() {
        let stats = ScanStats {
            total_scans: 1,
            unique_codes: 1,
            average_per_day: 1.0,
            days: vec![DayCount {
                date: "01,01".to_string(),
                count: 1,
            }],
        };

        assert_eq!(stats_csv(&stats).unwrap(), "date,count\n\"01,01\",1\n");
    }
}
