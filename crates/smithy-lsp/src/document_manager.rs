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

//! Document storage and cross-file analysis state.
//!
//! The [`DocumentManager`] wraps the core [`Model`] together with the text
//! of every tracked document and the set of documents currently open in
//! the editor. Every mutation goes through a single lock, so analysis runs
//! one document at a time in arrival order.
//!
//! Documents are keyed by their normalized `file:` URI. The URI the client
//! used to open a document is remembered and used for everything sent back
//! about it.

use crate::diagnostics::{core_range, to_lsp_diagnostics};
use crate::discovery::{discover_files, read_document};
use crate::error::{LspError, LspResult};
use crate::uri::{normalize_uri, path_to_uri, uri_to_path};
use parking_lot::{Mutex, RwLock};
use ropey::Rope;
use smithy_core::Model;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tower_lsp::lsp_types::{Diagnostic, Location, Position, Url};
use tracing::{debug, info, warn};

pub use crate::constants::DEFAULT_MAX_DOCUMENT_SIZE;

/// Diagnostics to send to the client for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default)]
struct WorkspaceState {
    model: Model,
    texts: HashMap<String, Rope>,
    /// Normalized key -> URI as sent by the client.
    open: HashMap<String, Url>,
}

impl WorkspaceState {
    fn client_uri(&self, key: &str) -> Option<Url> {
        self.open
            .get(key)
            .cloned()
            .or_else(|| Url::parse(key).ok())
    }

    fn publication(&self, key: &str) -> Option<Publication> {
        let uri = self.client_uri(key)?;
        let diagnostics = match (self.model.get(key), self.texts.get(key)) {
            (Some(document), Some(rope)) => to_lsp_diagnostics(document, rope),
            _ => Vec::new(),
        };
        Some(Publication { uri, diagnostics })
    }

    fn store(&mut self, key: &str, text: &str) {
        self.texts.insert(key.to_string(), Rope::from_str(text));
        self.model.update(key, text);
    }

    fn forget(&mut self, key: &str) {
        self.texts.remove(key);
        self.model.remove(key);
    }

    /// Publications for `first`, followed by every other document whose
    /// diagnostics changed after revalidating the whole model.
    fn revalidate(&mut self, first: Option<&str>) -> Vec<Publication> {
        let changed = self.model.revalidate_all();
        let mut keys: Vec<&str> = first.into_iter().collect();
        for key in &changed {
            if Some(key.as_str()) != first {
                keys.push(key);
            }
        }
        keys.into_iter()
            .filter_map(|key| self.publication(key))
            .collect()
    }
}

/// Tracks every document the server knows about.
pub struct DocumentManager {
    state: Mutex<WorkspaceState>,
    max_document_size: RwLock<usize>,
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_SIZE)
    }
}

impl DocumentManager {
    pub fn new(max_document_size: usize) -> Self {
        Self {
            state: Mutex::new(WorkspaceState::default()),
            max_document_size: RwLock::new(max_document_size),
        }
    }

    pub fn set_max_document_size(&self, new_max: usize) {
        *self.max_document_size.write() = new_max;
        debug!("Max document size updated to: {} bytes", new_max);
    }

    pub fn max_document_size(&self) -> usize {
        *self.max_document_size.read()
    }

    fn check_size(&self, uri: &Url, size: usize) -> LspResult<()> {
        let max = self.max_document_size();
        if size > max {
            warn!(
                "Document size limit exceeded for {}: {} bytes > {} bytes maximum (rejected)",
                uri, size, max
            );
            return Err(LspError::DocumentTooLarge { size, max });
        }
        Ok(())
    }

    fn key(uri: &Url) -> String {
        normalize_uri(uri).to_string()
    }

    /// A document was opened in the editor. Its text now takes precedence
    /// over the file on disk until it is closed.
    pub fn open(&self, uri: &Url, text: &str) -> LspResult<Vec<Publication>> {
        self.check_size(uri, text.len())?;
        let key = Self::key(uri);
        let mut state = self.state.lock();
        state.open.insert(key.clone(), uri.clone());
        state.store(&key, text);
        debug!("Opened {} ({} bytes)", uri, text.len());
        Ok(state.revalidate(Some(&key)))
    }

    /// The full new text of an open document.
    pub fn change(&self, uri: &Url, text: &str) -> LspResult<Vec<Publication>> {
        self.check_size(uri, text.len())?;
        let key = Self::key(uri);
        let mut state = self.state.lock();
        if !state.open.contains_key(&key) {
            state.open.insert(key.clone(), uri.clone());
        }
        state.store(&key, text);
        Ok(state.revalidate(Some(&key)))
    }

    /// The editor closed a document. It is reloaded from disk when the file
    /// still exists and forgotten otherwise. Its diagnostics are cleared.
    pub fn close(&self, uri: &Url) -> Vec<Publication> {
        let key = Self::key(uri);
        let on_disk = uri_to_path(uri)
            .ok()
            .filter(|path| path.is_file())
            .and_then(|path| match read_document(&path, self.max_document_size()) {
                Ok(text) => Some(text),
                Err(err) => {
                    warn!("Could not reload {} after close: {}", uri, err);
                    None
                }
            });

        let mut state = self.state.lock();
        state.open.remove(&key);
        match on_disk {
            Some(text) => state.store(&key, &text),
            None => state.forget(&key),
        }
        debug!("Closed {}", uri);

        let mut publications = vec![Publication {
            uri: uri.clone(),
            diagnostics: Vec::new(),
        }];
        publications.extend(
            state
                .revalidate(None)
                .into_iter()
                .filter(|publication| Self::key(&publication.uri) != key),
        );
        publications
    }

    /// A watched file was created or changed on disk. Open documents keep
    /// their editor text. Reads the file, so call it off the async runtime.
    pub fn load_from_disk(&self, uri: &Url) -> LspResult<Vec<Publication>> {
        if self.is_open(uri) {
            debug!("Ignoring disk change for open document {}", uri);
            return Ok(Vec::new());
        }
        let path = uri_to_path(uri)?;
        let text = read_document(&path, self.max_document_size())?;
        Ok(self.store_disk_text(uri, &text))
    }

    /// Stores text read from disk unless the document was opened in the
    /// meantime.
    pub fn store_disk_text(&self, uri: &Url, text: &str) -> Vec<Publication> {
        let key = Self::key(uri);
        let mut state = self.state.lock();
        if state.open.contains_key(&key) {
            debug!("Document {} was opened while reading it from disk", uri);
            return Vec::new();
        }
        state.store(&key, text);
        state.revalidate(Some(&key))
    }

    /// A watched file was deleted. Nothing is published for the deleted
    /// document itself.
    pub fn delete(&self, uri: &Url) -> Vec<Publication> {
        let key = Self::key(uri);
        let mut state = self.state.lock();
        if state.open.contains_key(&key) {
            debug!("Ignoring deletion of open document {}", uri);
            return Vec::new();
        }
        state.forget(&key);
        debug!("Deleted {}", uri);
        state.revalidate(None)
    }

    /// Reads every matching file under `roots`, revalidates the whole model
    /// and returns diagnostics for every tracked document.
    pub fn scan(&self, roots: &[PathBuf], extension: &str) -> Vec<Publication> {
        let max = self.max_document_size();
        let files: Vec<(String, String)> = roots
            .iter()
            .flat_map(|root| discover_files(root, extension))
            .filter_map(|path| Self::read_for_scan(&path, max))
            .collect();

        let mut state = self.state.lock();
        let mut loaded = 0;
        for (key, text) in files {
            if state.open.contains_key(&key) {
                continue;
            }
            state.store(&key, &text);
            loaded += 1;
        }
        state.model.revalidate_all();
        info!(
            "Workspace scan loaded {} files, {} documents tracked",
            loaded,
            state.model.len()
        );

        let keys: Vec<String> = state.model.uris().map(str::to_string).collect();
        keys.iter()
            .filter_map(|key| state.publication(key))
            .collect()
    }

    fn read_for_scan(path: &Path, max: usize) -> Option<(String, String)> {
        let uri = match path_to_uri(path) {
            Ok(uri) => uri,
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                return None;
            }
        };
        match read_document(path, max) {
            Ok(text) => Some((uri.to_string(), text)),
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Where the shape under the cursor is defined.
    pub fn definition(&self, uri: &Url, position: Position) -> Option<Location> {
        let key = Self::key(uri);
        let state = self.state.lock();
        let found = state.model.definition(
            &key,
            position.line as usize,
            position.character as usize,
        )?;
        let target = state.client_uri(&found.uri)?;
        Some(Location::new(target, core_range(&found.range)))
    }

    /// Diagnostics of a document as they are now, or an empty list once it
    /// is no longer tracked.
    pub fn publication(&self, uri: &Url) -> Option<Publication> {
        let key = Self::key(uri);
        self.state.lock().publication(&key)
    }

    /// Current diagnostics of a tracked document.
    pub fn diagnostics(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
        let key = Self::key(uri);
        let state = self.state.lock();
        let document = state.model.get(&key)?;
        let rope = state.texts.get(&key)?;
        Some(to_lsp_diagnostics(document, rope))
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.state.lock().open.contains_key(&Self::key(uri))
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.state.lock().model.contains(&Self::key(uri))
    }

    /// Number of tracked documents, open or not.
    pub fn len(&self) -> usize {
        self.state.lock().model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(text: &str) -> Url {
        Url::parse(text).unwrap()
    }

    #[test]
    fn test_open_publishes_own_diagnostics_first() {
        let manager = DocumentManager::default();
        let uri = url("file:///ws/a.smithy");
        let publications = manager
            .open(&uri, "namespace a\nstructure A { b: B }\n")
            .unwrap();
        assert_eq!(publications[0].uri, uri);
        assert_eq!(publications[0].diagnostics.len(), 1);
        assert_eq!(publications[0].diagnostics[0].message, "Unknown shape: B");
    }

    #[test]
    fn test_sibling_diagnostics_are_republished() {
        let manager = DocumentManager::default();
        let a = url("file:///ws/a.smithy");
        let b = url("file:///ws/b.smithy");
        manager
            .open(&a, "namespace a\nstructure A { b: B }\n")
            .unwrap();
        let publications = manager.open(&b, "namespace a\nstring B\n").unwrap();

        assert_eq!(publications.len(), 2);
        assert_eq!(publications[0].uri, b);
        assert_eq!(publications[1].uri, a);
        assert!(publications[1].diagnostics.is_empty());
        assert_eq!(manager.diagnostics(&a), Some(Vec::new()));
    }

    #[test]
    fn test_oversized_document_is_rejected() {
        let manager = DocumentManager::new(8);
        let uri = url("file:///ws/a.smithy");
        let result = manager.open(&uri, "namespace a\n");
        assert!(matches!(
            result,
            Err(LspError::DocumentTooLarge { size: 12, max: 8 })
        ));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_close_without_file_forgets_document() {
        let manager = DocumentManager::default();
        let uri = url("file:///does/not/exist/a.smithy");
        manager.open(&uri, "namespace a\nstring A\n").unwrap();
        assert!(manager.is_open(&uri));

        let publications = manager.close(&uri);
        assert_eq!(publications[0].uri, uri);
        assert!(publications[0].diagnostics.is_empty());
        assert!(!manager.is_open(&uri));
        assert!(!manager.contains(&uri));
    }

    #[test]
    fn test_delete_skips_open_documents() {
        let manager = DocumentManager::default();
        let uri = url("file:///ws/a.smithy");
        manager.open(&uri, "namespace a\n").unwrap();
        assert!(manager.delete(&uri).is_empty());
        assert!(manager.contains(&uri));
    }

    #[test]
    fn test_definition_uses_client_uri() {
        let manager = DocumentManager::default();
        let a = url("file:///ws/a.smithy");
        let b = url("file:///ws/b.smithy");
        manager
            .open(&a, "namespace a\nstructure A { b: B }\n")
            .unwrap();
        manager.open(&b, "namespace a\nstring B\n").unwrap();

        let location = manager.definition(&a, Position::new(1, 17)).unwrap();
        assert_eq!(location.uri, b);
        assert_eq!(location.range.start, Position::new(1, 7));
        assert_eq!(location.range.end, Position::new(1, 8));
        assert!(manager.definition(&a, Position::new(0, 0)).is_none());
    }

    #[test]
    fn test_disk_text_does_not_replace_document_opened_meanwhile() {
        let manager = DocumentManager::default();
        let uri = url("file:///ws/a.smithy");
        let disk_text = "namespace a\nstructure A { b: Missing }\n";

        manager.open(&uri, "namespace a\nstring A\n").unwrap();
        assert!(manager.store_disk_text(&uri, disk_text).is_empty());
        assert_eq!(manager.diagnostics(&uri), Some(Vec::new()));

        manager.close(&uri);
        let publications = manager.store_disk_text(&uri, disk_text);
        assert_eq!(publications[0].uri, uri);
        assert_eq!(publications[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_publication_reflects_current_state() {
        let manager = DocumentManager::default();
        let uri = url("file:///ws/a.smithy");
        manager
            .open(&uri, "namespace a\nstructure A { b: B }\n")
            .unwrap();
        let stale = manager.publication(&uri).unwrap();
        assert_eq!(stale.diagnostics.len(), 1);

        manager
            .change(&uri, "namespace a\nstructure A { b: String }\n")
            .unwrap();
        assert!(manager.publication(&uri).unwrap().diagnostics.is_empty());
    }

    #[test]
    fn test_max_document_size_setter() {
        let manager = DocumentManager::default();
        assert_eq!(manager.max_document_size(), DEFAULT_MAX_DOCUMENT_SIZE);
        manager.set_max_document_size(10);
        assert_eq!(manager.max_document_size(), 10);
    }
}
