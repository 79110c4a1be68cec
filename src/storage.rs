// File: storage.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{TrackerError, TrackerResult};
use crate::query::date_of;

/// A single accepted scan. `datetime` keeps the display format it was
/// recorded with so date-prefix filtering works on the stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub code: String,
    pub datetime: String,
}

impl ScanEvent {
    pub fn new(code: impl Into<String>, datetime: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            datetime: datetime.into(),
        }
    }

    pub fn date(&self) -> &str {
        date_of(&self.datetime)
    }
}

/// Ordered scan log mirrored to a CSV file. Every append rewrites the whole
/// file, which is fine for the history sizes this tool sees.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    events: Vec<ScanEvent>,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let events = if path.is_file() {
            read_events(&path)?
        } else {
            Vec::new()
        };

        debug!(
            "Opened history {} with {} events",
            path.display(),
            events.len()
        );

        Ok(Self { path, events })
    }

    pub fn append(&mut self, event: ScanEvent) -> TrackerResult<()> {
        self.events.push(event);

        if let Err(e) = self.persist() {
            self.events.pop();
            return Err(e);
        }

        Ok(())
    }

    /// Deletes the record first; memory is only cleared once the file is gone.
    pub fn reset(&mut self) -> TrackerResult<()> {
        Self::discard(&self.path)?;
        self.events.clear();
        Ok(())
    }

    /// Removes a history record without reading it, so an unreadable file
    /// can still be cleared. A missing file is not an error.
    pub fn discard(path: &Path) -> TrackerResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!("Removed history file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn reload(&mut self) -> TrackerResult<()> {
        self.events = if self.path.is_file() {
            read_events(&self.path)?
        } else {
            Vec::new()
        };
        Ok(())
    }

    pub fn all(&self) -> &[ScanEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distinct codes in the order they were first scanned.
    pub fn codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .map(|e| e.code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }

    /// Distinct date prefixes, sorted as text.
    pub fn dates(&self) -> Vec<&str> {
        let mut dates: Vec<&str> = self.events.iter().map(|e| e.date()).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    fn persist(&self) -> TrackerResult<()> {
        let persist_error = |message: String| TrackerError::HistoryPersist {
            path: self.path.clone(),
            message,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| persist_error(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| persist_error(e.to_string()))?;
        write_events(&self.events, tmp.as_file_mut())?;
        tmp.as_file_mut()
            .sync_all()
            .map_err(|e| persist_error(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| persist_error(e.error.to_string()))?;

        Ok(())
    }
}

/// Serializes events as `code,datetime` CSV with a header row.
pub fn write_events<W: Write>(events: &[ScanEvent], writer: W) -> TrackerResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written explicitly so an empty history still carries the header.
    csv_writer.write_record(["code", "datetime"])?;
    for event in events {
        csv_writer.serialize(event)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn read_events(path: &Path) -> TrackerResult<Vec<ScanEvent>> {
    let parse_error = |source: csv::Error| TrackerError::HistoryParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(parse_error)?;

    reader
        .deserialize::<ScanEvent>()
        .map(|record| record.map_err(parse_error))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (HistoryStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = HistoryStore::open(temp_dir.path().join("history.csv")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_writes_through() {
        let (mut store, _temp_dir) = create_test_store();

        store
            .append(ScanEvent::new("A1", "01/02/2025 à 10:00:00"))
            .unwrap();
        store
            .append(ScanEvent::new("B2", "01/02/2025 à 10:05:00"))
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "code,datetime\nA1,01/02/2025 à 10:00:00\nB2,01/02/2025 à 10:05:00\n"
        );
    }

    #[test]
    fn test_reopen_round_trip() {
        let (mut store, temp_dir) = create_test_store();
        store
            .append(ScanEvent::new("A1", "01/02/2025 à 10:00:00"))
            .unwrap();
        store
            .append(ScanEvent::new("A1", "02/02/2025 à 11:00:00"))
            .unwrap();

        let reopened = HistoryStore::open(temp_dir.path().join("history.csv")).unwrap();
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut store, _temp_dir) = create_test_store();
        store
            .append(ScanEvent::new("A1", "01/02/2025 à 10:00:00"))
            .unwrap();

        store.reset().unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());

        store.reset().unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_failed_persist_keeps_memory_in_sync() {
        let temp_dir = TempDir::new().unwrap();
        // A directory at the record path makes the final rename fail.
        let path = temp_dir.path().join("history.csv");
        std::fs::create_dir_all(path.join("blocker")).unwrap();

        let mut store = HistoryStore {
            path,
            events: Vec::new(),
        };
        let result = store.append(ScanEvent::new("A1", "01/02/2025 à 10:00:00"));

        assert!(matches!(result, Err(TrackerError::HistoryPersist { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_reset_keeps_memory_in_sync() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory at the record path cannot be removed as a file.
        let path = temp_dir.path().join("history.csv");
        std::fs::create_dir_all(path.join("blocker")).unwrap();

        let mut store = HistoryStore {
            path: path.clone(),
            events: vec![ScanEvent::new("A1", "01/02/2025 à 10:00:00")],
        };
        let result = store.reset();

        assert!(matches!(result, Err(TrackerError::Io(_))));
        assert_eq!(store.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_discard_removes_unreadable_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.csv");
        std::fs::write(&path, "code,datetime\nA1,01/02/2025 à 10:00:00\nB2\n").unwrap();
        assert!(HistoryStore::open(&path).is_err());

        HistoryStore::discard(&path).unwrap();
        assert!(!path.exists());
        HistoryStore::discard(&path).unwrap();

        assert!(HistoryStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_history_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.csv");
        std::fs::write(&path, "code,datetime\nA1\n").unwrap();

        let err = HistoryStore::open(&path).unwrap_err();
        assert!(matches!(err, TrackerError::HistoryParse { .. }));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let (mut store, _temp_dir) = create_test_store();
        std::fs::write(store.path(), "code,datetime\nZ9,03/03/2025 à 09:00:00\n").unwrap();

        store.reload().unwrap();
        assert_eq!(store.all(), &[ScanEvent::new("Z9", "03/03/2025 à 09:00:00")]);
    }

    #[test]
    fn test_distinct_codes_and_dates() {
        let (mut store, _temp_dir) = create_test_store();
        for (code, datetime) in [
            ("B2", "02/02/2025 à 10:00:00"),
            ("A1", "01/02/2025 à 10:00:00"),
            ("B2", "01/02/2025 à 12:00:00"),
        ] {
            store.append(ScanEvent::new(code, datetime)).unwrap();
        }

        assert_eq!(store.codes(), vec!["B2", "A1"]);
        assert_eq!(store.dates(), vec!["01/02/2025", "02/02/2025"]);
    }

    #[test]
    fn test_write_events_empty_has_header() {
        let mut buffer = Vec::new();
        write_events(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "code,datetime\n");
    }
}
