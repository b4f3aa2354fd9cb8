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

//! Recursive-descent parser.
//!
//! The parser reads tokens with a single token of look-ahead and records
//! its findings directly in a [`ParsedDocument`]: shape definitions,
//! identifier references, metadata and control values, and diagnostics.
//! Values are kept as [`Node`]s only long enough to check them against
//! their schema.
//!
//! Every statement consumes at least one token, so malformed input always
//! terminates with diagnostics instead of stalling.
//!
//! # Examples
//!
//! ```
//! use smithy_core::parse;
//!
//! let doc = parse(
//!     "file:///model.smithy",
//!     "namespace com.example\nstructure Foo {\n  bar: String\n}\n",
//! );
//! assert!(doc.messages.is_empty());
//! assert!(doc.shapes.contains_key("com.example#Foo$bar"));
//! ```

use crate::document::{ParsedDocument, ReferenceKind, Section};
use crate::error::{Message, MessageKind, Severity};
use crate::identifier::Identifier;
use crate::lexer::Lexer;
use crate::node::{Entry, Key, Node};
use crate::position::{Position, Range};
use crate::prelude::is_prelude_id;
use crate::schema::{trait_definition, Schema, ShapeKind};
use crate::token::{Token, TokenKind};
use tracing::debug;

/// Deepest nesting of objects, arrays and trait arguments that is parsed.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parses one file into a fresh document.
///
/// Cross-file checks are not run; call [`ParsedDocument::validate`] with the
/// sibling documents afterwards.
pub fn parse(uri: impl Into<String>, text: &str) -> ParsedDocument {
    let mut parser = Parser::new(uri.into(), text);
    parser.parse_statements();
    let mut document = parser.document;
    document.finish_parsing();
    debug!(
        uri = %document.uri,
        shapes = document.shapes.len(),
        references = document.references.len(),
        messages = document.messages.len(),
        "parsed document"
    );
    document
}

/// How a key-value pair is written.
#[derive(Debug, Clone, Copy)]
struct PairSyntax {
    delimiters: &'static [&'static str],
    /// Accept a bare value in place of the pair.
    optional_key: bool,
}

const MEMBER_PAIR: PairSyntax = PairSyntax {
    delimiters: &[":"],
    optional_key: false,
};

const METADATA_PAIR: PairSyntax = PairSyntax {
    delimiters: &["="],
    optional_key: false,
};

const CONTROL_PAIR: PairSyntax = PairSyntax {
    delimiters: &[":", "="],
    optional_key: false,
};

const TRAIT_ARGUMENT: PairSyntax = PairSyntax {
    delimiters: &[":"],
    optional_key: true,
};

impl PairSyntax {
    fn accepts(&self, token: &Token) -> bool {
        self.delimiters.iter().any(|d| token.is_delimiter(d))
    }

    fn describe(&self) -> String {
        self.delimiters
            .iter()
            .map(|d| format!("'{}'", d))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// Result of parsing a key-value pair. Either half may be missing.
#[derive(Debug, Default)]
struct Pair {
    key: Option<Key>,
    value: Option<Node>,
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Look-ahead token.
    current: Token,
    /// Most recently consumed token.
    last: Token,
    section: Option<Section>,
    /// Objects, arrays and trait argument lists currently open.
    depth: usize,
    document: ParsedDocument,
}

impl<'a> Parser<'a> {
    fn new(uri: String, text: &'a str) -> Self {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            last: Token::new(TokenKind::End, Range::point(Position::start()), ""),
            section: None,
            depth: 0,
            document: ParsedDocument::new(uri),
        }
    }

    /// Consumes the look-ahead token and returns it.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.last = consumed.clone();
        consumed
    }

    fn report(&mut self, severity: Severity, kind: MessageKind, token: &Token, text: String) {
        self.document
            .add_message(Message::at(severity, kind, token, text));
    }

    /// Syntax error covering the look-ahead token.
    fn error_at_current(&mut self, text: String) {
        let message = Message::at(Severity::Error, MessageKind::Syntax, &self.current, text);
        self.document.add_message(message);
    }

    /// Syntax error just past the last consumed token.
    fn error_after_last(&mut self, text: String) {
        let message = Message::after(Severity::Error, MessageKind::Syntax, &self.last, text);
        self.document.add_message(message);
    }

    fn enter_section(&mut self, section: Section, token: &Token) {
        if !self.document.sections.contains(&section) {
            self.document.sections.push(section);
        }
        match self.section {
            Some(current) if section < current => self.report(
                Severity::Error,
                MessageKind::Syntax,
                token,
                format!(
                    "{} statements must appear before {} statements",
                    section, current
                ),
            ),
            _ => self.section = Some(section),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statements(&mut self) {
        while !self.current.is_end() {
            if self.current.kind != TokenKind::Identifier {
                let token = self.advance();
                self.report(
                    Severity::Error,
                    MessageKind::Syntax,
                    &token,
                    format!("Unexpected token {}", token),
                );
                continue;
            }

            let text = self.current.text.clone();
            match text.as_str() {
                "metadata" => self.parse_metadata(),
                "namespace" => self.parse_namespace(),
                "use" => self.parse_use(),
                "apply" => self.parse_apply(),
                t if t.starts_with('@') => {
                    let token = self.current.clone();
                    self.enter_section(Section::Shape, &token);
                    self.parse_trait();
                }
                t if t.starts_with('$') => self.parse_control(),
                keyword => match ShapeKind::from_keyword(keyword) {
                    Some(kind) => self.parse_shape(kind),
                    None => {
                        let token = self.advance();
                        self.report(
                            Severity::Error,
                            MessageKind::Syntax,
                            &token,
                            format!("Unexpected identifier {}", token.text),
                        );
                    }
                },
            }
        }
    }

    fn parse_metadata(&mut self) {
        let keyword = self.advance();
        self.enter_section(Section::Metadata, &keyword);

        let pair = self.parse_pair(METADATA_PAIR);
        let (Some(key), Some(value)) = (pair.key, pair.value) else {
            return;
        };
        if self.document.metadata.contains_key(&key.value) {
            self.report(
                Severity::Warning,
                MessageKind::Semantic,
                &key.token,
                format!("Duplicate metadata key {}", key.value),
            );
        }
        self.document.metadata.insert(key.value, value);
    }

    fn parse_control(&mut self) {
        let token = self.current.clone();
        self.enter_section(Section::Control, &token);

        let pair = self.parse_pair(CONTROL_PAIR);
        let (Some(key), Some(value)) = (pair.key, pair.value) else {
            return;
        };
        let name = key.value.trim_start_matches('$').to_string();

        match name.as_str() {
            "version" => {
                let valid = value.as_literal().is_some_and(is_version);
                if !valid {
                    self.report(
                        Severity::Error,
                        MessageKind::Semantic,
                        &value.token,
                        format!(
                            "Invalid version {}, expected major or major.minor",
                            value.token.text
                        ),
                    );
                }
            }
            _ => self.report(
                Severity::Warning,
                MessageKind::Semantic,
                &key.token,
                format!("Unknown control statement {}", key.value),
            ),
        }

        if self.document.controls.contains_key(&name) {
            self.report(
                Severity::Warning,
                MessageKind::Semantic,
                &key.token,
                format!("Duplicate control statement {}", key.value),
            );
        }
        self.document.controls.insert(name, value);
    }

    fn parse_namespace(&mut self) {
        let keyword = self.advance();
        self.enter_section(Section::Shape, &keyword);

        if self.document.namespace.is_some() {
            self.report(
                Severity::Error,
                MessageKind::Semantic,
                &keyword,
                "Namespace is already declared".to_string(),
            );
            if self.current.kind == TokenKind::Identifier {
                self.advance();
            }
            return;
        }

        if self.current.kind == TokenKind::Identifier {
            let token = self.advance();
            self.document.namespace = Some(token.value);
        } else {
            self.error_after_last("Expected namespace".to_string());
        }
    }

    fn parse_use(&mut self) {
        let keyword = self.advance();
        self.enter_section(Section::Shape, &keyword);

        if self.current.kind != TokenKind::Identifier {
            self.error_after_last("Expected absolute shape id".to_string());
            return;
        }
        let token = self.advance();
        match Identifier::parse_absolute_shape(&token.value) {
            Ok(id) => {
                self.document.add_shape(&id, &token);
                self.document.add_reference(id, &token, ReferenceKind::Use);
            }
            Err(err) => self.report(
                Severity::Error,
                MessageKind::Syntax,
                &token,
                err.to_string(),
            ),
        }
    }

    fn parse_apply(&mut self) {
        let keyword = self.advance();
        self.enter_section(Section::Shape, &keyword);

        if self.current.kind == TokenKind::Identifier && !self.current.is_sigil('@') {
            let token = self.advance();
            let id = Identifier::parse(&token.value);
            self.document.add_reference(id, &token, ReferenceKind::Apply);
        } else {
            self.error_after_last("Expected shape id".to_string());
        }

        if self.current.is_sigil('@') {
            self.parse_trait();
        } else {
            self.error_after_last("Expected trait".to_string());
        }
    }

    fn parse_shape(&mut self, kind: ShapeKind) {
        let keyword = self.advance();
        self.enter_section(Section::Shape, &keyword);

        if self.current.kind != TokenKind::Identifier
            || self.current.is_sigil('@')
            || self.current.is_sigil('$')
        {
            self.error_after_last(format!("Expected {} name", kind));
            return;
        }
        let name = self.advance();
        let id = Identifier::parse(&name.value);
        if !id.is_relative() || id.member.is_some() {
            self.report(
                Severity::Error,
                MessageKind::Syntax,
                &name,
                format!("Invalid shape name {}", name.text),
            );
            return;
        }
        self.document.add_shape(&id, &name);
        self.document
            .add_reference(id.clone(), &name, ReferenceKind::Shape);

        if !kind.has_body() {
            return;
        }
        if !self.current.is_delimiter("{") {
            self.error_after_last("Expected '{'".to_string());
            return;
        }

        self.depth += 1;
        let body = self.parse_object();
        self.depth -= 1;
        if let Some(schema) = kind.schema() {
            self.validate_node(&body, schema);
        }
        for entry in body.as_object().unwrap_or_default() {
            if !entry.is_original() {
                continue;
            }
            let member = id.for_member(entry.key.value.as_str());
            self.document.add_shape(&member, &entry.key.token);
            self.document
                .add_reference(member, &entry.key.token, ReferenceKind::Shape);
        }
    }

    /// Parses `@name` with optional `( ... )` arguments and checks the value
    /// against the trait's schema.
    fn parse_trait(&mut self) {
        let token = self.advance();
        let name = token.text.trim_start_matches('@');
        if name.is_empty() {
            self.report(
                Severity::Error,
                MessageKind::Syntax,
                &token,
                "Expected trait name".to_string(),
            );
            return;
        }
        let id = Identifier::parse(name);
        self.document
            .add_reference(id.clone(), &token, ReferenceKind::Trait);

        let value = if self.current.is_delimiter("(") && self.enter_nested() {
            let value = self.parse_trait_arguments();
            self.depth -= 1;
            value
        } else {
            None
        };

        let schema = is_prelude_id(&id)
            .then(|| trait_definition(&id.name))
            .flatten()
            .and_then(|definition| definition.schema.as_ref());
        if let (Some(schema), Some(value)) = (schema, value) {
            self.validate_node(&value, schema);
        }
    }

    /// Parses `( ... )`. A single bare value is returned as is; keyed
    /// arguments become an object node.
    fn parse_trait_arguments(&mut self) -> Option<Node> {
        let open = self.advance();
        let mut entries = Vec::new();
        let mut single = None;

        loop {
            if self.current.is_delimiter(")") {
                self.advance();
                break;
            }
            if self.current.is_end() {
                self.error_after_last("Expected ')'".to_string());
                break;
            }

            match self.parse_pair(TRAIT_ARGUMENT) {
                Pair {
                    key: Some(key),
                    value,
                } => self.insert_entry(&mut entries, key, value),
                Pair {
                    key: None,
                    value: Some(value),
                } => {
                    if single.is_some() || !entries.is_empty() {
                        self.report(
                            Severity::Error,
                            MessageKind::Syntax,
                            &value.token,
                            "Unexpected trait value".to_string(),
                        );
                    } else {
                        single = Some(value);
                    }
                }
                Pair {
                    key: None,
                    value: None,
                } => break,
            }

            if self.current.is_delimiter(",") {
                self.advance();
            } else if self.current.is_delimiter(")") {
                self.advance();
                break;
            } else {
                self.error_after_last("Expected ')'".to_string());
                break;
            }
        }

        match single {
            Some(value) if entries.is_empty() => Some(value),
            _ if !entries.is_empty() => Some(Node::object(open, entries)),
            _ => None,
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Parses leading traits, a key, a delimiter and a value.
    fn parse_pair(&mut self, syntax: PairSyntax) -> Pair {
        while self.current.is_sigil('@') {
            self.parse_trait();
        }

        if syntax.optional_key && !self.current.is_literal() {
            return Pair {
                key: None,
                value: self.parse_value(),
            };
        }
        if !self.current.is_literal() {
            self.error_at_current(format!("Expected key but found {}", self.current));
            return Pair::default();
        }

        let first = self.advance();
        if !syntax.accepts(&self.current) {
            if syntax.optional_key {
                return Pair {
                    key: None,
                    value: Some(Node::literal(first)),
                };
            }
            self.error_after_last(format!("Expected {}", syntax.describe()));
            return Pair {
                key: Some(Key::from_token(first)),
                value: None,
            };
        }
        self.advance();

        Pair {
            key: Some(Key::from_token(first)),
            value: self.parse_value(),
        }
    }

    fn parse_value(&mut self) -> Option<Node> {
        if self.current.is_literal() {
            return Some(Node::literal(self.advance()));
        }
        let is_object = self.current.is_delimiter("{");
        if !is_object && !self.current.is_delimiter("[") {
            self.error_after_last("Expected value".to_string());
            return None;
        }

        let open = self.current.clone();
        if !self.enter_nested() {
            // The skipped value still counts as present.
            return Some(if is_object {
                Node::object(open, Vec::new())
            } else {
                Node::array(open, Vec::new())
            });
        }
        let node = if is_object {
            self.parse_object()
        } else {
            self.parse_array()
        };
        self.depth -= 1;
        Some(node)
    }

    /// Opens a nested object, array or argument list at the look-ahead
    /// token. Past [`MAX_NESTING_DEPTH`] the whole construct is skipped and
    /// `false` is returned.
    fn enter_nested(&mut self) -> bool {
        if self.depth < MAX_NESTING_DEPTH {
            self.depth += 1;
            return true;
        }
        self.error_at_current(format!(
            "Values nested deeper than {} levels are not supported",
            MAX_NESTING_DEPTH
        ));
        self.skip_nested();
        false
    }

    /// Consumes the look-ahead opener and everything up to its matching
    /// closer, without building nodes.
    fn skip_nested(&mut self) {
        let mut open = 0usize;
        loop {
            let token = self.advance();
            if token.is_end() {
                break;
            }
            if ["{", "[", "("].iter().any(|d| token.is_delimiter(d)) {
                open += 1;
            } else if ["}", "]", ")"].iter().any(|d| token.is_delimiter(d)) {
                open = open.saturating_sub(1);
            }
            if open == 0 {
                break;
            }
        }
    }

    fn parse_object(&mut self) -> Node {
        let open = self.advance();
        let mut entries = Vec::new();

        loop {
            if self.current.is_delimiter("}") {
                self.advance();
                break;
            }
            if !self.current.is_literal() {
                self.error_after_last("Expected '}'".to_string());
                break;
            }

            let pair = self.parse_pair(MEMBER_PAIR);
            if let Some(key) = pair.key {
                self.insert_entry(&mut entries, key, pair.value);
            }

            if self.current.is_delimiter(",") {
                self.advance();
            } else if self.current.is_delimiter("}") {
                self.advance();
                break;
            } else {
                self.error_after_last("Expected '}'".to_string());
                break;
            }
        }

        Node::object(open, entries)
    }

    fn parse_array(&mut self) -> Node {
        let open = self.advance();
        let mut items = Vec::new();

        loop {
            if self.current.is_delimiter("]") {
                self.advance();
                break;
            }
            if self.current.is_end() {
                self.error_after_last("Expected ']'".to_string());
                break;
            }

            match self.parse_value() {
                Some(item) => items.push(item),
                None => break,
            }

            if self.current.is_delimiter(",") {
                self.advance();
            } else if self.current.is_delimiter("]") {
                self.advance();
                break;
            } else {
                self.error_after_last("Expected ']'".to_string());
                break;
            }
        }

        Node::array(open, items)
    }

    /// Adds an entry, storing a duplicate key under a generated name.
    fn insert_entry(&mut self, entries: &mut Vec<Entry>, key: Key, value: Option<Node>) {
        let mut name = key.value.clone();
        if entries.iter().any(|entry| entry.name == name) {
            self.report(
                Severity::Error,
                MessageKind::Semantic,
                &key.token,
                format!("Duplicate key {}", key.value),
            );
            let mut n = 1;
            while entries.iter().any(|entry| entry.name == name) {
                name = format!("{}#{}", key.value, n);
                n += 1;
            }
        }
        entries.push(Entry { name, key, value });
    }

    // ========================================================================
    // Schema validation
    // ========================================================================

    fn validate_node(&mut self, node: &Node, schema: &Schema) {
        match schema {
            Schema::Identifier => {
                self.expect_literal(node, TokenKind::Identifier, schema);
            }
            Schema::Member => {
                if self.expect_literal(node, TokenKind::Identifier, schema) {
                    let id = Identifier::parse(&node.token.value);
                    self.document
                        .add_reference(id, &node.token, ReferenceKind::Member);
                }
            }
            Schema::String => {
                self.expect_literal(node, TokenKind::String, schema);
            }
            Schema::Number => {
                self.expect_literal(node, TokenKind::Number, schema);
            }
            Schema::Boolean | Schema::Document => self.report(
                Severity::Warning,
                MessageKind::Internal,
                &node.token,
                format!("Validation of {} values is not implemented", schema),
            ),
            Schema::Structure(structure) => {
                let Some(entries) = node.as_object() else {
                    self.expected(node, schema);
                    return;
                };
                for field in structure.fields.iter().filter(|f| f.required) {
                    if node.get(field.name).is_none() {
                        self.report(
                            Severity::Error,
                            MessageKind::Semantic,
                            &node.token,
                            format!("Missing required member {}", field.name),
                        );
                    }
                }
                for entry in entries {
                    let field_schema = match structure.field(&entry.key.value) {
                        Some(field) => &field.schema,
                        None => match structure.any_member {
                            Some(any) => any,
                            None => {
                                self.report(
                                    Severity::Error,
                                    MessageKind::Semantic,
                                    &entry.key.token,
                                    format!("Unexpected member {}", entry.key.value),
                                );
                                continue;
                            }
                        },
                    };
                    if let Some(value) = &entry.value {
                        self.validate_node(value, field_schema);
                    }
                }
            }
            Schema::List(item) => {
                let Some(items) = node.as_array() else {
                    self.expected(node, schema);
                    return;
                };
                for element in items {
                    self.validate_node(element, item);
                }
            }
            Schema::Map(key_schema, value_schema) => {
                let Some(entries) = node.as_object() else {
                    self.expected(node, schema);
                    return;
                };
                for entry in entries {
                    let key = Node::literal(entry.key.token.clone());
                    self.validate_node(&key, key_schema);
                    if let Some(value) = &entry.value {
                        self.validate_node(value, value_schema);
                    }
                }
            }
        }
    }

    fn expect_literal(&mut self, node: &Node, kind: TokenKind, schema: &Schema) -> bool {
        let matches = node.is_literal_of(kind);
        if !matches {
            self.expected(node, schema);
        }
        matches
    }

    fn expected(&mut self, node: &Node, schema: &Schema) {
        self.report(
            Severity::Error,
            MessageKind::Semantic,
            &node.token,
            format!("Expected {} but found {}", schema, node.token),
        );
    }
}

/// `major` or `major.minor`, digits only.
fn is_version(text: &str) -> bool {
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match text.split_once('.') {
        Some((major, minor)) => digits(major) && digits(minor),
        None => digits(text),
    }
}
