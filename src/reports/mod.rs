// File: mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

use crate::query::HistoryFilter;
use crate::storage::ScanEvent;

pub mod csv;
pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub generated_at: DateTime<Local>,
    pub title: String,
    pub description: Option<String>,
    pub total_scans: usize,
    pub unique_codes: usize,
    pub scans: Vec<ScanEvent>,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub lines_per_page: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { lines_per_page: 25 }
    }
}

pub trait ReportGenerator {
    fn generate(&self, data: &ReportData, config: &ReportConfig) -> Result<String>;
    fn file_extension(&self) -> &'static str;
}

pub struct ReportEngine;

impl ReportEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_report<P: AsRef<Path>>(
        &self,
        format: &str,
        data: &ReportData,
        config: &ReportConfig,
        output_path: Option<P>,
    ) -> Result<String> {
        let generator = self.get_generator(format)?;
        let content = generator.generate(data, config)?;

        if let Some(path) = output_path {
            std::fs::write(path, &content)?;
        }

        Ok(content)
    }

    pub fn create_report_data(&self, scans: Vec<ScanEvent>, filter: &HistoryFilter) -> ReportData {
        let unique_codes = scans
            .iter()
            .map(|s| s.code.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();

        ReportData {
            generated_at: Local::now(),
            title: "Scanned modules history".to_string(),
            description: describe_filter(filter),
            total_scans: scans.len(),
            unique_codes,
            scans,
        }
    }

    pub fn file_extension(&self, format: &str) -> Result<&'static str> {
        Ok(self.get_generator(format)?.file_extension())
    }

    fn get_generator(&self, format: &str) -> Result<Box<dyn ReportGenerator>> {
        match format.to_lowercase().as_str() {
            "csv" => Ok(Box::new(csv::CsvGenerator::new())),
            "text" | "txt" => Ok(Box::new(text::TextGenerator::new())),
            "json" => Ok(Box::new(json::JsonGenerator::new())),
            _ => Err(anyhow::anyhow!("Unsupported report format: {}", format)),
        }
    }
}

fn describe_filter(filter: &HistoryFilter) -> Option<String> {
    match (&filter.code, &filter.date) {
        (None, None) => None,
        (Some(code), None) => Some(format!("Code {}", code)),
        (None, Some(date)) => Some(format!("Date {}", date)),
        (Some(code), Some(date)) => Some(format!("Code {} on {}", code, date)),
    }
}
