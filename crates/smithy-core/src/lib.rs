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

//! Analysis core for the Smithy interface definition language.
//!
//! This crate turns Smithy IDL source text into per-file semantic state and
//! answers questions about it across a set of files:
//!
//! - [`Lexer`] produces tokens with exact UTF-16 source ranges
//! - [`parse`] builds a [`ParsedDocument`] of shapes, references, values and
//!   diagnostics, checking shape bodies and trait values against the
//!   declarative [`schema`] tables
//! - [`ParsedDocument::validate`] resolves references against sibling
//!   documents and the [`prelude`]
//! - [`Model`] owns every document and answers go-to-definition queries
//!
//! Malformed input never fails: every problem becomes a [`Message`].
//!
//! # Example
//!
//! ```
//! use smithy_core::Model;
//!
//! let mut model = Model::new();
//! model.update("file:///shapes.smithy", "namespace com.example\nstring Name\n");
//! model.update(
//!     "file:///service.smithy",
//!     "namespace com.example\nstructure Person {\n  name: Name\n}\n",
//! );
//! model.revalidate_all();
//!
//! let service = model.get("file:///service.smithy").unwrap();
//! assert!(service.messages.is_empty());
//!
//! let location = model.definition("file:///service.smithy", 2, 9).unwrap();
//! assert_eq!(location.uri, "file:///shapes.smithy");
//! ```

mod document;
mod error;
mod identifier;
mod lexer;
mod model;
mod node;
mod parser;
mod position;
pub mod prelude;
pub mod schema;
mod token;

pub use document::{ParsedDocument, Reference, ReferenceKind, Section};
pub use error::{IdentifierError, IdentifierResult, Message, MessageKind, Severity};
pub use identifier::Identifier;
pub use lexer::Lexer;
pub use model::{Location, Model};
pub use node::{Entry, Key, Node, NodeValue};
pub use parser::{parse, MAX_NESTING_DEPTH};
pub use position::{Position, Range};
pub use token::{Token, TokenKind};
