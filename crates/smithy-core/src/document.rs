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

//! Per-file analysis state.
//!
//! A [`ParsedDocument`] is filled in by the parser and then checked against
//! its sibling documents with [`ParsedDocument::validate`]. Diagnostics
//! produced while parsing are kept across validation runs. Diagnostics from
//! validation are replaced on every run.

use crate::error::{Message, MessageKind, Severity};
use crate::identifier::Identifier;
use crate::node::Node;
use crate::prelude::{is_prelude_id, PRELUDE_NAMESPACE};
use crate::token::Token;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Top-level sections, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Control,
    Metadata,
    Shape,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control => write!(f, "control"),
            Self::Metadata => write!(f, "metadata"),
            Self::Shape => write!(f, "shape"),
        }
    }
}

/// What an identifier occurrence means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A definition site.
    Shape,
    /// A `use` import.
    Use,
    /// The target of an `apply` statement.
    Apply,
    /// A trait application.
    Trait,
    /// A shape id used as a value.
    Member,
}

/// One identifier occurrence in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub token: Token,
    pub identifier: Identifier,
    pub kind: ReferenceKind,
}

impl Reference {
    /// Definition sites are never reported as unknown.
    #[inline]
    pub fn is_definition(&self) -> bool {
        matches!(self.kind, ReferenceKind::Shape | ReferenceKind::Use)
    }
}

/// The analysed contents of one file.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub uri: String,
    /// Sections in the order they were first entered.
    pub sections: Vec<Section>,
    pub metadata: BTreeMap<String, Node>,
    pub namespace: Option<String>,
    pub controls: BTreeMap<String, Node>,
    /// Relative id to the canonical ids registered under it.
    pub relative_shapes: BTreeMap<String, Vec<String>>,
    /// Canonical id to every definition token, in source order.
    pub shapes: BTreeMap<String, Vec<Token>>,
    /// Sorted by start position once parsing finishes.
    pub references: Vec<Reference>,
    pub messages: Vec<Message>,
    /// Number of leading `messages` produced while parsing.
    pub parsed_message_count: usize,
}

impl ParsedDocument {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// The namespace that relative ids resolve against.
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(PRELUDE_NAMESPACE)
    }

    /// Canonical id for an identifier as seen from this document.
    ///
    /// A relative id that was already registered here resolves to that
    /// registration. Anything else is qualified with its own namespace, the
    /// document namespace, or the prelude namespace, in that order.
    pub fn resolve_id(&self, identifier: &Identifier) -> String {
        if identifier.is_relative() {
            if let Some(canonical) = self
                .relative_shapes
                .get(&identifier.to_relative())
                .and_then(|ids| ids.first())
            {
                return canonical.clone();
            }
        }
        identifier.to_absolute(self.effective_namespace())
    }

    /// Registers a definition. A second definition of the same relative id
    /// is reported but still recorded.
    pub fn add_shape(&mut self, identifier: &Identifier, token: &Token) {
        let canonical = self.resolve_id(identifier);
        let relative = identifier.to_relative();
        let ids = self.relative_shapes.entry(relative).or_default();
        if !ids.is_empty() {
            self.messages.push(Message::at(
                Severity::Error,
                MessageKind::Semantic,
                token,
                format!("Shape {} is already defined", identifier.to_relative()),
            ));
        }
        ids.push(canonical.clone());
        self.shapes.entry(canonical).or_default().push(token.clone());
    }

    pub fn add_reference(&mut self, identifier: Identifier, token: &Token, kind: ReferenceKind) {
        self.references.push(Reference {
            token: token.clone(),
            identifier,
            kind,
        });
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Marks the end of parsing.
    pub fn finish_parsing(&mut self) {
        self.parsed_message_count = self.messages.len();
        self.sort_references();
    }

    fn sort_references(&mut self) {
        self.references
            .sort_by_key(|r| (r.token.range.start.line, r.token.range.start.column));
    }

    /// Diagnostics produced while parsing.
    pub fn parse_messages(&self) -> &[Message] {
        &self.messages[..self.parsed_message_count.min(self.messages.len())]
    }

    /// Diagnostics produced by the last [`validate`](Self::validate) run.
    pub fn validation_messages(&self) -> &[Message] {
        &self.messages[self.parsed_message_count.min(self.messages.len())..]
    }

    /// True when this document defines the id itself rather than importing
    /// it with `use`.
    fn defines(&self, canonical: &str) -> bool {
        self.shapes
            .get(canonical)
            .is_some_and(|tokens| tokens.iter().any(|token| !self.is_import_token(token)))
    }

    /// True when the id is registered here, imports included, or defined by
    /// one of `others` declaring the id's namespace.
    fn is_known(&self, canonical: &str, others: &[&ParsedDocument]) -> bool {
        if self.shapes.contains_key(canonical) {
            return true;
        }
        let namespace = canonical.split('#').next().unwrap_or_default();
        others
            .iter()
            .any(|other| other.effective_namespace() == namespace && other.defines(canonical))
    }

    /// Replaces the validation diagnostics by checking every reference
    /// against this document, the prelude and `others`.
    pub fn validate(&mut self, others: &[&ParsedDocument]) {
        self.messages.truncate(self.parsed_message_count);
        self.sort_references();

        let mut found = Vec::new();

        if self.namespace.is_none() {
            if let Some(first) = self
                .references
                .iter()
                .find(|r| r.kind == ReferenceKind::Shape)
            {
                found.push(Message::at(
                    Severity::Warning,
                    MessageKind::Semantic,
                    &first.token,
                    format!(
                        "Missing namespace declaration, shapes are defined in {}",
                        PRELUDE_NAMESPACE
                    ),
                ));
            }
        }

        for reference in &self.references {
            if reference.is_definition() || is_prelude_id(&reference.identifier) {
                continue;
            }
            let canonical = self.resolve_id(&reference.identifier);
            if !self.is_known(&canonical, others) {
                found.push(Message::at(
                    Severity::Error,
                    MessageKind::Semantic,
                    &reference.token,
                    format!("Unknown shape: {}", reference.identifier),
                ));
            }
        }

        debug!(
            uri = %self.uri,
            references = self.references.len(),
            problems = found.len(),
            "validated document"
        );
        self.messages.extend(found);
    }

    /// The reference under a cursor, if any.
    pub fn find_symbol(&self, line: usize, column: usize) -> Option<&Reference> {
        self.references
            .binary_search_by(|r| r.token.range.cmp_cursor(line, column))
            .ok()
            .map(|i| &self.references[i])
    }

    /// Tokens of `use` statements, which register a shape without defining it.
    pub fn is_import_token(&self, token: &Token) -> bool {
        self.references
            .iter()
            .any(|r| r.kind == ReferenceKind::Use && r.token.range == token.range)
    }
}
