// File: images.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::debug;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "bmp", "webp"];

/// Finds `<dir>/<identifier>.<ext>` for the first extension that exists.
pub fn find_image(dir: &Path, identifier: &str, extensions: &[String]) -> Option<PathBuf> {
    if identifier.is_empty() || identifier.contains(['/', '\\']) || identifier.contains("..") {
        debug!("Refusing image lookup for identifier {:?}", identifier);
        return None;
    }

    extensions
        .iter()
        .map(|ext| dir.join(format!("{}.{}", identifier, ext.trim_start_matches('.'))))
        .find(|candidate| candidate.is_file())
}
