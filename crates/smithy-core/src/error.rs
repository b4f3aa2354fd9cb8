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

//! Diagnostics and error types.
//!
//! Analysis never fails as a whole. Problems in the source are collected as
//! [`Message`]s attached to the affected document; only the few operations
//! that callers may want to branch on return a `Result`.

use crate::token::Token;
use std::fmt;
use thiserror::Error;

/// Severity of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Information => write!(f, "information"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// Which phase produced a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Malformed token, missing delimiter or missing value.
    Syntax,
    /// Schema mismatch, unknown member, unresolved shape, duplicate
    /// definition or missing namespace.
    Semantic,
    /// A schema kind the validator has no rule for yet.
    Internal,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Semantic => write!(f, "SemanticError"),
            Self::Internal => write!(f, "InternalError"),
        }
    }
}

/// A diagnostic attached to an absolute UTF-16 index range of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub kind: MessageKind,
    /// Start offset (inclusive).
    pub start_index: usize,
    /// End offset (exclusive).
    pub end_index: usize,
    pub text: String,
}

impl Message {
    /// A message covering the whole token.
    pub fn at(
        severity: Severity,
        kind: MessageKind,
        token: &Token,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            start_index: token.range.start.index,
            end_index: token.range.end.index,
            text: text.into(),
        }
    }

    /// A zero-width message just past the token, for things missing after it.
    pub fn after(
        severity: Severity,
        kind: MessageKind,
        token: &Token,
        text: impl Into<String>,
    ) -> Self {
        let end = token.range.end.index;
        Self {
            severity,
            kind,
            start_index: end,
            end_index: end,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}..{}: {}",
            self.kind, self.severity, self.start_index, self.end_index, self.text
        )
    }
}

/// Reasons a shape id is not a valid absolute id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("shape id '{0}' has no namespace")]
    MissingNamespace(String),

    #[error("shape id '{0}' has an empty namespace")]
    EmptyNamespace(String),

    #[error("shape id '{0}' has an empty name")]
    EmptyName(String),

    #[error("shape id '{0}' must not reference a member")]
    MemberNotAllowed(String),
}

/// Result type for identifier validation.
pub type IdentifierResult<T> = Result<T, IdentifierError>;
