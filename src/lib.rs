// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::new_without_default)]

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod images;
pub mod ingest;
pub mod query;
pub mod reports;
pub mod storage;
pub mod tracker;


pub use catalog::{Catalog, CatalogEntry};
pub use error::{TrackerError, TrackerResult};
pub use ingest::IngestResult;
pub use query::HistoryFilter;
pub use storage::{HistoryStore, ScanEvent};
pub use tracker::Tracker;
