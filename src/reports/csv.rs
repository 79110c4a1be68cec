// File: csv.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};

use super::{ReportConfig, ReportData, ReportGenerator};
use crate::storage::write_events;

/// Same `code,datetime` layout as the history record, so an export can be
/// used as a history file.
pub struct CsvGenerator;

impl CsvGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for CsvGenerator {
    fn generate(&self, data: &ReportData, _config: &ReportConfig) -> Result<String> {
        let mut buffer = Vec::new();
        write_events(&data.scans, &mut buffer).context("Failed to write CSV export")?;
        String::from_utf8(buffer).context("CSV export is not valid UTF-8")
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}
