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

//! Shape ids: `namespace#name$member`.
//!
//! ```
//! use smithy_core::Identifier;
//!
//! let id = Identifier::parse("com.example#Widget$field");
//! assert_eq!(id.namespace.as_deref(), Some("com.example"));
//! assert_eq!(id.name, "Widget");
//! assert_eq!(id.member.as_deref(), Some("field"));
//!
//! // No `#` means a relative id, which is not the same as an empty namespace.
//! assert_eq!(Identifier::parse("Widget").namespace, None);
//! assert_eq!(Identifier::parse("#Widget").namespace.as_deref(), Some(""));
//! ```

use crate::error::{IdentifierError, IdentifierResult};
use std::fmt;

/// A parsed shape id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// `None` for relative ids.
    pub namespace: Option<String>,
    pub name: String,
    pub member: Option<String>,
}

impl Identifier {
    /// Splits at the first `#`, then at the first `$` after it.
    pub fn parse(text: &str) -> Self {
        let (namespace, rest) = match text.find('#') {
            Some(hash) => (Some(text[..hash].to_string()), &text[hash + 1..]),
            None => (None, text),
        };
        let (name, member) = match rest.find('$') {
            Some(dollar) => (&rest[..dollar], Some(rest[dollar + 1..].to_string())),
            None => (rest, None),
        };
        Self {
            namespace,
            name: name.to_string(),
            member,
        }
    }

    /// Parses an id that must be absolute and must not name a member, as
    /// required by `use` statements.
    pub fn parse_absolute_shape(text: &str) -> IdentifierResult<Self> {
        let id = Self::parse(text);
        match id.namespace.as_deref() {
            None => return Err(IdentifierError::MissingNamespace(text.to_string())),
            Some("") => return Err(IdentifierError::EmptyNamespace(text.to_string())),
            Some(_) => {}
        }
        if id.name.is_empty() {
            return Err(IdentifierError::EmptyName(text.to_string()));
        }
        if id.member.is_some() {
            return Err(IdentifierError::MemberNotAllowed(text.to_string()));
        }
        Ok(id)
    }

    /// A member of the same shape.
    pub fn for_member(&self, member: impl Into<String>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            member: Some(member.into()),
        }
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.namespace.is_none()
    }

    /// The id without its namespace: `name` or `name$member`.
    pub fn to_relative(&self) -> String {
        match &self.member {
            Some(member) => format!("{}${}", self.name, member),
            None => self.name.clone(),
        }
    }

    /// The absolute form of this id, with `namespace` filling in a missing
    /// namespace.
    pub fn to_absolute(&self, namespace: &str) -> String {
        format!(
            "{}#{}",
            self.namespace.as_deref().unwrap_or(namespace),
            self.to_relative()
        )
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}#", namespace)?;
        }
        f.write_str(&self.to_relative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_id() {
        let id = Identifier::parse("com.example#Widget$field");
        assert_eq!(id.namespace.as_deref(), Some("com.example"));
        assert_eq!(id.name, "Widget");
        assert_eq!(id.member.as_deref(), Some("field"));
    }

    #[test]
    fn test_parse_relative_id() {
        let id = Identifier::parse("Widget");
        assert!(id.is_relative());
        assert_eq!(id.name, "Widget");
        assert_eq!(id.member, None);
    }

    #[test]
    fn test_parse_relative_member() {
        let id = Identifier::parse("Widget$field");
        assert!(id.is_relative());
        assert_eq!(id.member.as_deref(), Some("field"));
    }

    #[test]
    fn test_dollar_before_hash_belongs_to_namespace() {
        let id = Identifier::parse("a$b#C");
        assert_eq!(id.namespace.as_deref(), Some("a$b"));
        assert_eq!(id.name, "C");
        assert_eq!(id.member, None);
    }

    #[test]
    fn test_only_first_separators_split() {
        let id = Identifier::parse("a#B$c$d");
        assert_eq!(id.name, "B");
        assert_eq!(id.member.as_deref(), Some("c$d"));
    }

    #[test]
    fn test_empty_namespace_is_not_relative() {
        let id = Identifier::parse("#Widget");
        assert_eq!(id.namespace.as_deref(), Some(""));
        assert!(!id.is_relative());
    }

    #[test]
    fn test_for_member() {
        let id = Identifier::parse("com.example#Widget").for_member("size");
        assert_eq!(id.to_string(), "com.example#Widget$size");
    }

    #[test]
    fn test_to_absolute_keeps_explicit_namespace() {
        let id = Identifier::parse("a.b#Foo");
        assert_eq!(id.to_absolute("c.d"), "a.b#Foo");
        assert_eq!(Identifier::parse("Foo$x").to_absolute("c.d"), "c.d#Foo$x");
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["Foo", "Foo$bar", "a.b#Foo", "a.b#Foo$bar"] {
            assert_eq!(Identifier::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_parse_absolute_shape() {
        assert!(Identifier::parse_absolute_shape("a.b#Foo").is_ok());
        assert_eq!(
            Identifier::parse_absolute_shape("Foo"),
            Err(IdentifierError::MissingNamespace("Foo".to_string()))
        );
        assert_eq!(
            Identifier::parse_absolute_shape("#Foo"),
            Err(IdentifierError::EmptyNamespace("#Foo".to_string()))
        );
        assert_eq!(
            Identifier::parse_absolute_shape("a.b#"),
            Err(IdentifierError::EmptyName("a.b#".to_string()))
        );
        assert_eq!(
            Identifier::parse_absolute_shape("a.b#Foo$bar"),
            Err(IdentifierError::MemberNotAllowed("a.b#Foo$bar".to_string()))
        );
    }
}
