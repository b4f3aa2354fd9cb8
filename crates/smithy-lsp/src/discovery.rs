// Dweve Smithy Tools - Smithy IDL language support
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Workspace file discovery.

use crate::error::{LspError, LspResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Collects every file under `root` with the given extension, in a stable
/// order. Symbolic links are not followed. Unreadable entries are skipped.
pub fn discover_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable workspace entry: {}", err);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == extension)
        })
        .map(|entry| entry.into_path())
        .collect();

    debug!("Discovered {} files under {}", files.len(), root.display());
    files
}

/// Reads a file, refusing files larger than `max_size` bytes.
pub fn read_document(path: &Path, max_size: usize) -> LspResult<String> {
    let io_error = |source| LspError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_error)?.len() as usize;
    if size > max_size {
        return Err(LspError::DocumentTooLarge {
            size,
            max: max_size,
        });
    }
    std::fs::read_to_string(path).map_err(io_error)
}
