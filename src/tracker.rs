// File: tracker.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use once_cell::unsync::OnceCell;
use std::path::PathBuf;

use crate::aggregate::{self, DateOrder};
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::ConfigParameter;
use crate::error::{TrackerError, TrackerResult};
use crate::images;
use crate::ingest::{self, normalize_code, IngestResult};
use crate::query::{self, HistoryFilter};
use crate::storage::{HistoryStore, ScanEvent};

/// Application state shared by every command: configuration, the catalog
/// and the scan history. Both files are read on first use and then kept in
/// memory, so a command only fails on the data it actually touches.
pub struct Tracker {
    config: ConfigParameter,
    catalog: OnceCell<Catalog>,
    history: OnceCell<HistoryStore>,
}

impl Tracker {
    pub fn new(config: ConfigParameter) -> Self {
        Self {
            config,
            catalog: OnceCell::new(),
            history: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ConfigParameter {
        &self.config
    }

    pub fn catalog(&self) -> TrackerResult<&Catalog> {
        load_catalog(&self.catalog, &self.config)
    }

    pub fn history(&self) -> TrackerResult<&HistoryStore> {
        self.history
            .get_or_try_init(|| HistoryStore::open(self.config.history_path()))
    }

    pub fn ingest(
        &mut self,
        raw_code: &str,
        now: NaiveDateTime,
    ) -> TrackerResult<Option<IngestResult>> {
        let catalog = load_catalog(&self.catalog, &self.config)?;
        let mut history = match self.history.take() {
            Some(history) => history,
            None => HistoryStore::open(self.config.history_path())?,
        };

        let result = ingest::ingest(&mut history, catalog, raw_code, now);
        self.history = OnceCell::with_value(history);
        result
    }

    pub fn ingest_now(&mut self, raw_code: &str) -> TrackerResult<Option<IngestResult>> {
        self.ingest(raw_code, Local::now().naive_local())
    }

    pub fn lookup(&self, raw_code: &str) -> TrackerResult<Option<&CatalogEntry>> {
        Ok(self.catalog()?.get(&normalize_code(raw_code)))
    }

    pub fn filtered(&self, filter: &HistoryFilter) -> TrackerResult<Vec<ScanEvent>> {
        Ok(query::filter(self.history()?.all(), filter))
    }

    pub fn daily_counts(
        &self,
        filter: &HistoryFilter,
        order: DateOrder,
    ) -> TrackerResult<Vec<(String, usize)>> {
        Ok(aggregate::daily_counts(&self.filtered(filter)?, order))
    }

    /// Clears the history and returns how many events were removed. A record
    /// that cannot be parsed is deleted unread and counts as zero.
    pub fn reset(&mut self) -> TrackerResult<usize> {
        let mut history = match self.history.take() {
            Some(history) => history,
            None => match HistoryStore::open(self.config.history_path()) {
                Ok(history) => history,
                Err(TrackerError::HistoryParse { path, source }) => {
                    warn!("Discarding unreadable history {}: {}", path.display(), source);
                    HistoryStore::discard(&path)?;
                    return Ok(0);
                }
                Err(e) => return Err(e),
            },
        };

        let removed = history.len();
        let result = history.reset();
        self.history = OnceCell::with_value(history);
        result?;

        info!("History reset, {} events removed", removed);
        Ok(removed)
    }

    pub fn image_for(&self, code: &str) -> Option<PathBuf> {
        images::find_image(
            self.config.images_dir(),
            code,
            self.config.image_extensions(),
        )
    }
}

fn load_catalog<'a>(
    cell: &'a OnceCell<Catalog>,
    config: &ConfigParameter,
) -> TrackerResult<&'a Catalog> {
    cell.get_or_try_init(|| Catalog::load(config.catalog_path(), config.id_column()))
}
