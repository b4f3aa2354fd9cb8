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

//! Lexical tokens.

use crate::position::Range;
use std::fmt;

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Names, shape ids, trait names (`@x`) and control keys (`$x`).
    Identifier,
    /// A double-quoted string literal.
    String,
    /// A numeric literal.
    Number,
    /// One of `(){}[],:=`.
    Delimiter,
    /// A `//` comment. Never yielded by the lexer.
    Comment,
    /// A `///` documentation comment. Never yielded by the lexer.
    DocumentationComment,
    /// A character that starts no other token.
    Error,
    /// End of input.
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::Number => "number",
            Self::Delimiter => "delimiter",
            Self::Comment => "comment",
            Self::DocumentationComment => "documentation comment",
            Self::Error => "invalid character",
            Self::End => "end of file",
        };
        f.write_str(name)
    }
}

/// A lexical unit with its exact source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Exact source range.
    pub range: Range,
    /// Verbatim source slice.
    pub text: String,
    /// Decoded payload: the unescaped string, the numeral text, the
    /// delimiter character or the raw identifier text.
    pub value: String,
}

impl Token {
    /// Creates a token whose value equals its source text.
    pub fn new(kind: TokenKind, range: Range, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind,
            range,
            value: text.clone(),
            text,
        }
    }

    /// Creates a token with a decoded value that differs from its text.
    pub fn with_value(
        kind: TokenKind,
        range: Range,
        text: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            range,
            text: text.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Checks for a specific delimiter character.
    #[inline]
    pub fn is_delimiter(&self, delimiter: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.value == delimiter
    }

    /// Checks for an identifier with the given leading sigil (`@` or `$`).
    #[inline]
    pub fn is_sigil(&self, sigil: char) -> bool {
        self.kind == TokenKind::Identifier && self.text.starts_with(sigil)
    }

    /// String, number and identifier tokens can all stand as literal values
    /// or keys.
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::String | TokenKind::Number
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "{}", self.kind),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}
