// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),

    #[error("Failed to parse catalog {}: {source}", .path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to read history {}: {source}", .path.display())]
    HistoryParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to persist history to {}: {message}", .path.display())]
    HistoryPersist { path: PathBuf, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TrackerError::CatalogNotFound(PathBuf::from("catalog.csv"));
        assert_eq!(err.to_string(), "Catalog file not found: catalog.csv");

        let err = TrackerError::MissingColumn {
            path: PathBuf::from("catalog.csv"),
            column: "Barcode".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column 'Barcode' not found in catalog.csv"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TrackerError = io.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
