// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use dirs::data_local_dir;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_ID_COLUMN;
use crate::cli::Cli;
use crate::images::DEFAULT_IMAGE_EXTENSIONS;

pub const HISTORY_FILE_NAME: &str = "history.csv";

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    catalog_path: PathBuf,
    id_column: String,
    history_path: PathBuf,
    images_dir: PathBuf,
    image_extensions: Vec<String>,
    lines_per_page: usize,
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.csv"),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            history_path: default_data_dir().join(HISTORY_FILE_NAME),
            images_dir: PathBuf::from("images"),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            lines_per_page: 25,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new();

        if let Some(ref dir) = cli.data_dir {
            config.set_history_path(dir.join(HISTORY_FILE_NAME));
        }
        if let Some(ref file) = cli.history_file {
            config.set_history_path(file.clone());
        }
        if let Some(ref catalog) = cli.catalog {
            config.set_catalog_path(catalog.clone());
        }
        if let Some(ref column) = cli.id_column {
            config.set_id_column(column.clone());
        }
        if let Some(ref images) = cli.images_dir {
            config.set_images_dir(images.clone());
        }

        config
    }

    pub fn set_catalog_path(&mut self, catalog_path: PathBuf) {
        self.catalog_path = catalog_path;
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn set_id_column(&mut self, id_column: String) {
        self.id_column = id_column;
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn set_history_path(&mut self, history_path: PathBuf) {
        self.history_path = history_path;
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn set_images_dir(&mut self, images_dir: PathBuf) {
        self.images_dir = images_dir;
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn set_image_extensions(&mut self, image_extensions: Vec<String>) {
        self.image_extensions = image_extensions;
    }

    pub fn image_extensions(&self) -> &[String] {
        &self.image_extensions
    }

    pub fn set_lines_per_page(&mut self, lines_per_page: usize) {
        self.lines_per_page = lines_per_page.max(1);
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }
}

fn default_data_dir() -> PathBuf {
    data_local_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")))
        .unwrap_or_else(|| PathBuf::from("."))
}
