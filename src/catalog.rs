// File: catalog.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};

pub const DEFAULT_ID_COLUMN: &str = "Barcode";

/// One row of the reference dataset. Attributes other than the identifier
/// are opaque and kept in source column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub identifier: String,
    fields: Vec<(String, String)>,
}

impl CatalogEntry {
    pub fn new(identifier: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            identifier: identifier.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    id_column: String,
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn load(path: &Path, id_column: &str) -> TrackerResult<Self> {
        if !path.is_file() {
            return Err(TrackerError::CatalogNotFound(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file, id_column, path)?;
        debug!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R, id_column: &str, source: &Path) -> TrackerResult<Self> {
        let parse_error = |source_err: csv::Error| TrackerError::CatalogParse {
            path: source.to_path_buf(),
            source: source_err,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let id_position = headers
            .iter()
            .position(|h| h == id_column)
            .ok_or_else(|| TrackerError::MissingColumn {
                path: source.to_path_buf(),
                column: id_column.to_string(),
            })?;

        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut index = HashMap::new();

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(parse_error)?;
            let identifier = record.get(id_position).unwrap_or_default().to_string();

            if identifier.is_empty() {
                warn!("Skipping catalog row {} without identifier", row + 2);
                continue;
            }

            if index.contains_key(&identifier) {
                warn!(
                    "Duplicate catalog identifier {} on row {}, keeping the first row",
                    identifier,
                    row + 2
                );
                continue;
            }

            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect();

            index.insert(identifier.clone(), entries.len());
            entries.push(CatalogEntry::new(identifier, fields));
        }

        Ok(Self {
            source: source.to_path_buf(),
            id_column: id_column.to_string(),
            entries,
            index,
        })
    }

    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.index.get(identifier).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }
}
