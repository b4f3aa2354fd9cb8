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

//! The set of known documents.

use crate::document::ParsedDocument;
use crate::parser::parse;
use crate::position::Range;
use std::collections::BTreeMap;
use tracing::debug;

/// Where a shape is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

/// Owns every [`ParsedDocument`], keyed by URI.
///
/// The model is a single-writer store. Callers that share it between tasks
/// must serialize access to it.
#[derive(Debug, Default)]
pub struct Model {
    documents: BTreeMap<String, ParsedDocument>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` as the new contents of `uri` and validates it against
    /// every other document. Other documents are not revalidated.
    pub fn update(&mut self, uri: &str, text: &str) -> &ParsedDocument {
        self.documents.remove(uri);
        let mut document = parse(uri, text);
        let others: Vec<&ParsedDocument> = self.documents.values().collect();
        document.validate(&others);
        debug!(
            uri,
            messages = document.messages.len(),
            documents = self.documents.len() + 1,
            "updated document"
        );
        self.documents.entry(uri.to_string()).or_insert(document)
    }

    pub fn remove(&mut self, uri: &str) -> Option<ParsedDocument> {
        let removed = self.documents.remove(uri);
        if removed.is_some() {
            debug!(uri, "removed document");
        }
        removed
    }

    /// Validates every document against all the others and returns the URIs
    /// whose diagnostics changed.
    pub fn revalidate_all(&mut self) -> Vec<String> {
        let uris: Vec<String> = self.documents.keys().cloned().collect();
        let mut changed = Vec::new();
        for uri in uris {
            let Some(mut document) = self.documents.remove(&uri) else {
                continue;
            };
            let before = document.validation_messages().to_vec();
            let others: Vec<&ParsedDocument> = self.documents.values().collect();
            document.validate(&others);
            if document.validation_messages() != before.as_slice() {
                changed.push(uri.clone());
            }
            self.documents.insert(uri, document);
        }
        debug!(
            documents = self.documents.len(),
            changed = changed.len(),
            "revalidated model"
        );
        changed
    }

    /// Finds the definition of the symbol under a cursor.
    ///
    /// Definitions are preferred over `use` imports of the same shape; an
    /// import is returned only when no document defines the shape.
    pub fn definition(&self, uri: &str, line: usize, column: usize) -> Option<Location> {
        let document = self.documents.get(uri)?;
        let reference = document.find_symbol(line, column)?;
        let canonical = document.resolve_id(&reference.identifier);

        let mut import = None;
        for (candidate_uri, candidate) in &self.documents {
            let Some(tokens) = candidate.shapes.get(&canonical) else {
                continue;
            };
            for token in tokens {
                let location = Location {
                    uri: candidate_uri.clone(),
                    range: token.range,
                };
                if !candidate.is_import_token(token) {
                    debug!(%canonical, uri = %location.uri, "found definition");
                    return Some(location);
                }
                import.get_or_insert(location);
            }
        }
        debug!(%canonical, found = import.is_some(), "no definition outside imports");
        import
    }

    pub fn get(&self, uri: &str) -> Option<&ParsedDocument> {
        self.documents.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &ParsedDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
