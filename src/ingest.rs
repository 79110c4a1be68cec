// File: ingest.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Serialize;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::TrackerResult;
use crate::storage::{HistoryStore, ScanEvent};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y à %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestResult {
    pub event: ScanEvent,
    pub matched: Option<CatalogEntry>,
    pub is_repeat: bool,
    pub previous_timestamp: Option<String>,
}

pub fn normalize_code(raw_code: &str) -> String {
    raw_code.trim().to_uppercase()
}

pub fn format_timestamp(now: &NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Records a scan and reports what is known about the code.
///
/// Returns `Ok(None)` for blank input without touching the history. The
/// event stays recorded even when the catalog has no matching entry.
pub fn ingest(
    store: &mut HistoryStore,
    catalog: &Catalog,
    raw_code: &str,
    now: NaiveDateTime,
) -> TrackerResult<Option<IngestResult>> {
    let code = normalize_code(raw_code);
    if code.is_empty() {
        debug!("Ignoring blank scan input");
        return Ok(None);
    }

    let event = ScanEvent::new(code, format_timestamp(&now));
    store.append(event.clone())?;

    let occurrences: Vec<&ScanEvent> = store
        .all()
        .iter()
        .filter(|e| e.code == event.code)
        .collect();

    let previous_timestamp = match occurrences.len() {
        0 | 1 => None,
        n => Some(occurrences[n - 2].datetime.clone()),
    };

    let matched = catalog.get(&event.code).cloned();
    info!(
        "Recorded scan {} at {} (known: {}, seen before: {})",
        event.code,
        event.datetime,
        matched.is_some(),
        previous_timestamp.is_some()
    );

    Ok(Some(IngestResult {
        event,
        matched,
        is_repeat: previous_timestamp.is_some(),
        previous_timestamp,
    }))
}
