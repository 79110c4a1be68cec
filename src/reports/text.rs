// File: text.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;

use super::{ReportConfig, ReportData, ReportGenerator};

const RULE: &str =
    "===============================================================================";
const PAGE_BREAK: char = '\x0c';

/// Printable document listing `datetime - code` per record, split into
/// pages separated by form feeds.
pub struct TextGenerator;

impl TextGenerator {
    pub fn new() -> Self {
        Self
    }

    fn header(&self, data: &ReportData) -> String {
        let mut output = String::new();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!("{:^79}\n", data.title.to_uppercase()));
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "Generated: {}\n",
            data.generated_at.format("%d/%m/%Y %H:%M:%S")
        ));
        if let Some(ref description) = data.description {
            output.push_str(&format!("Filter:    {}\n", description));
        }
        output.push_str(&format!(
            "Records:   {} ({} distinct codes)\n",
            data.total_scans, data.unique_codes
        ));
        output.push_str(RULE);
        output.push_str("\n\n");
        output
    }
}

impl ReportGenerator for TextGenerator {
    fn generate(&self, data: &ReportData, config: &ReportConfig) -> Result<String> {
        let lines: Vec<String> = data
            .scans
            .iter()
            .map(|scan| format!("{} - {}", scan.datetime, scan.code))
            .collect();

        let per_page = config.lines_per_page.max(1);
        let pages: Vec<&[String]> = if lines.is_empty() {
            vec![&lines[..]]
        } else {
            lines.chunks(per_page).collect()
        };
        let total_pages = pages.len();

        let mut output = self.header(data);

        for (index, page) in pages.iter().enumerate() {
            if index > 0 {
                output.push(PAGE_BREAK);
                output.push('\n');
            }

            if page.is_empty() {
                output.push_str("No scans recorded.\n");
            }
            for line in page.iter() {
                output.push_str(line);
                output.push('\n');
            }

            output.push_str(&format!(
                "\n{:>79}\n",
                format!("Page {}/{}", index + 1, total_pages)
            ));
        }

        Ok(output)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
