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

//! Parsed values.
//!
//! The parser keeps no syntax tree for statements, but values (metadata,
//! control values, shape bodies and trait arguments) are kept as [`Node`]s so
//! they can be checked against a schema after parsing.

use crate::token::{Token, TokenKind};

/// A parsed value and the token it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The literal token, or the opening `{` / `[` of a composite value.
    pub token: Token,
    pub value: NodeValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// A string, number or identifier. The decoded value is `token.value`.
    Literal,
    /// Entries in source order.
    Object(Vec<Entry>),
    Array(Vec<Node>),
}

/// An object key with the token it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub value: String,
    pub token: Token,
}

impl Key {
    pub fn from_token(token: Token) -> Self {
        Self {
            value: token.value.clone(),
            token,
        }
    }
}

/// One object entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Lookup name. Differs from `key.value` only for duplicate keys, which
    /// are stored under a generated name.
    pub name: String,
    pub key: Key,
    /// `None` when the value was missing or malformed.
    pub value: Option<Node>,
}

impl Entry {
    /// False for entries stored under a generated name.
    #[inline]
    pub fn is_original(&self) -> bool {
        self.name == self.key.value
    }
}

impl Node {
    pub fn literal(token: Token) -> Self {
        Self {
            token,
            value: NodeValue::Literal,
        }
    }

    pub fn object(token: Token, entries: Vec<Entry>) -> Self {
        Self {
            token,
            value: NodeValue::Object(entries),
        }
    }

    pub fn array(token: Token, items: Vec<Node>) -> Self {
        Self {
            token,
            value: NodeValue::Array(items),
        }
    }

    /// The decoded literal text, or `None` for composites.
    pub fn as_literal(&self) -> Option<&str> {
        match self.value {
            NodeValue::Literal => Some(&self.token.value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Entry]> {
        match &self.value {
            NodeValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up an object entry by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.as_object()?.iter().find(|entry| entry.name == name)
    }

    /// True for a literal of the given token kind.
    pub fn is_literal_of(&self, kind: TokenKind) -> bool {
        matches!(self.value, NodeValue::Literal) && self.token.kind == kind
    }
}
