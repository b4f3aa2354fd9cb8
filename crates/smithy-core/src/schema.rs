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

//! Declarative schemas for shape bodies and trait values.
//!
//! Every table in this module is `static` data. The parser looks schemas up
//! by shape keyword or trait name and walks them while validating parsed
//! values.
//!
//! Only a representative subset of the IDL is covered. Traits without a
//! schema are accepted with any value.

use std::fmt;

/// The accepted shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// A bare identifier, not resolved.
    Identifier,
    /// A shape id that must resolve to a shape.
    Member,
    String,
    Number,
    Boolean,
    /// An arbitrary document value.
    Document,
    Structure(StructureSchema),
    List(&'static Schema),
    /// Key and value schemas.
    Map(&'static Schema, &'static Schema),
}

impl Schema {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Member => "member",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Document => "document",
            Self::Structure(_) => "structure",
            Self::List(_) => "list",
            Self::Map(_, _) => "map",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An object with named fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureSchema {
    pub fields: &'static [Field],
    /// Schema for keys not listed in `fields`. Without it such keys are
    /// rejected.
    pub any_member: Option<&'static Schema>,
}

impl StructureSchema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A named field of a [`StructureSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub schema: Schema,
}

impl Field {
    const fn required(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            required: true,
            schema,
        }
    }

    const fn optional(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            required: false,
            schema,
        }
    }
}

const fn structure(fields: &'static [Field]) -> Schema {
    Schema::Structure(StructureSchema {
        fields,
        any_member: None,
    })
}

const MEMBER_LIST: Schema = Schema::List(&Schema::Member);

// ============================================================================
// Shape kinds
// ============================================================================

/// Shape statement keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    // Aggregate and service shapes, which carry a `{ ... }` body.
    List,
    Set,
    Map,
    Structure,
    Union,
    Service,
    Operation,
    Resource,
    // Simple shapes.
    String,
    Blob,
    Boolean,
    Document,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Timestamp,
}

impl ShapeKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "list" => Self::List,
            "set" => Self::Set,
            "map" => Self::Map,
            "structure" => Self::Structure,
            "union" => Self::Union,
            "service" => Self::Service,
            "operation" => Self::Operation,
            "resource" => Self::Resource,
            "string" => Self::String,
            "blob" => Self::Blob,
            "boolean" => Self::Boolean,
            "document" => Self::Document,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "bigInteger" => Self::BigInteger,
            "bigDecimal" => Self::BigDecimal,
            "timestamp" => Self::Timestamp,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Structure => "structure",
            Self::Union => "union",
            Self::Service => "service",
            Self::Operation => "operation",
            Self::Resource => "resource",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Document => "document",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInteger => "bigInteger",
            Self::BigDecimal => "bigDecimal",
            Self::Timestamp => "timestamp",
        }
    }

    /// Aggregate and service shapes have a body; simple shapes do not.
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            Self::List
                | Self::Set
                | Self::Map
                | Self::Structure
                | Self::Union
                | Self::Service
                | Self::Operation
                | Self::Resource
        )
    }

    /// The schema a shape body is validated against.
    pub fn schema(&self) -> Option<&'static Schema> {
        match self {
            Self::List | Self::Set => Some(&LIST_BODY),
            Self::Map => Some(&MAP_BODY),
            Self::Structure | Self::Union => Some(&STRUCTURE_BODY),
            Self::Service => Some(&SERVICE_BODY),
            Self::Operation => Some(&OPERATION_BODY),
            Self::Resource => Some(&RESOURCE_BODY),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

static STRUCTURE_BODY: Schema = Schema::Structure(StructureSchema {
    fields: &[],
    any_member: Some(&Schema::Member),
});

static LIST_BODY: Schema = structure(&[Field::required("member", Schema::Member)]);

static MAP_BODY: Schema = structure(&[
    Field::required("key", Schema::Member),
    Field::required("value", Schema::Member),
]);

static SERVICE_BODY: Schema = structure(&[
    Field::required("version", Schema::String),
    Field::optional("operations", MEMBER_LIST),
    Field::optional("resources", MEMBER_LIST),
    Field::optional("errors", MEMBER_LIST),
]);

static OPERATION_BODY: Schema = structure(&[
    Field::optional("input", Schema::Member),
    Field::optional("output", Schema::Member),
    Field::optional("errors", MEMBER_LIST),
]);

static RESOURCE_BODY: Schema = structure(&[
    Field::optional(
        "identifiers",
        Schema::Map(&Schema::Identifier, &Schema::Member),
    ),
    Field::optional("create", Schema::Member),
    Field::optional("put", Schema::Member),
    Field::optional("read", Schema::Member),
    Field::optional("update", Schema::Member),
    Field::optional("delete", Schema::Member),
    Field::optional("list", Schema::Member),
    Field::optional("operations", MEMBER_LIST),
    Field::optional("collectionOperations", MEMBER_LIST),
    Field::optional("resources", MEMBER_LIST),
]);

// ============================================================================
// Traits
// ============================================================================

/// A prelude trait and the schema its value is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitDefinition {
    pub name: &'static str,
    /// `None` accepts any value, or none.
    pub schema: Option<Schema>,
}

const fn marker(name: &'static str) -> TraitDefinition {
    TraitDefinition { name, schema: None }
}

const fn valued(name: &'static str, schema: Schema) -> TraitDefinition {
    TraitDefinition {
        name,
        schema: Some(schema),
    }
}

const MIN_MAX: Schema = structure(&[
    Field::optional("min", Schema::Number),
    Field::optional("max", Schema::Number),
]);

/// Traits defined in the `smithy.api` prelude.
pub static TRAITS: &[TraitDefinition] = &[
    marker("box"),
    marker("required"),
    marker("sensitive"),
    marker("readonly"),
    marker("idempotent"),
    marker("idempotencyToken"),
    marker("streaming"),
    marker("private"),
    marker("unstable"),
    marker("internal"),
    marker("uniqueItems"),
    marker("sparse"),
    marker("requiresLength"),
    marker("noReplace"),
    marker("input"),
    marker("output"),
    marker("httpLabel"),
    marker("httpPayload"),
    marker("httpResponseCode"),
    marker("hostLabel"),
    marker("eventPayload"),
    marker("eventHeader"),
    marker("examples"),
    marker("references"),
    valued("documentation", Schema::String),
    valued("error", Schema::String),
    valued("pattern", Schema::String),
    valued("title", Schema::String),
    valued("jsonName", Schema::String),
    valued("xmlName", Schema::String),
    valued("mediaType", Schema::String),
    valued("timestampFormat", Schema::String),
    valued("httpHeader", Schema::String),
    valued("httpQuery", Schema::String),
    valued("httpPrefixHeaders", Schema::String),
    valued("httpError", Schema::Number),
    valued("length", MIN_MAX),
    valued("range", MIN_MAX),
    valued("tags", Schema::List(&Schema::String)),
    valued("suppress", Schema::List(&Schema::String)),
    valued(
        "externalDocumentation",
        Schema::Map(&Schema::String, &Schema::String),
    ),
    valued(
        "enum",
        Schema::List(&structure(&[
            Field::required("value", Schema::String),
            Field::optional("name", Schema::String),
            Field::optional("documentation", Schema::String),
            Field::optional("tags", Schema::List(&Schema::String)),
            Field::optional("deprecated", Schema::Boolean),
        ])),
    ),
    valued(
        "http",
        structure(&[
            Field::required("method", Schema::String),
            Field::required("uri", Schema::String),
            Field::optional("code", Schema::Number),
        ]),
    ),
    valued(
        "deprecated",
        structure(&[
            Field::optional("message", Schema::String),
            Field::optional("since", Schema::String),
        ]),
    ),
    valued(
        "paginated",
        structure(&[
            Field::optional("inputToken", Schema::String),
            Field::optional("outputToken", Schema::String),
            Field::optional("items", Schema::String),
            Field::optional("pageSize", Schema::String),
        ]),
    ),
    valued(
        "retryable",
        structure(&[Field::optional("throttling", Schema::Boolean)]),
    ),
    valued(
        "trait",
        structure(&[
            Field::optional("selector", Schema::String),
            Field::optional("conflicts", MEMBER_LIST),
            Field::optional("structurallyExclusive", Schema::String),
        ]),
    ),
];

/// Looks up a prelude trait by its bare name.
pub fn trait_definition(name: &str) -> Option<&'static TraitDefinition> {
    TRAITS.iter().find(|definition| definition.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in [
            "list", "set", "map", "structure", "union", "service", "operation", "resource",
            "string", "blob", "boolean", "document", "byte", "short", "integer", "long", "float",
            "double", "bigInteger", "bigDecimal", "timestamp",
        ] {
            let kind = ShapeKind::from_keyword(keyword).unwrap();
            assert_eq!(kind.keyword(), keyword);
        }
        assert_eq!(ShapeKind::from_keyword("Structure"), None);
        assert_eq!(ShapeKind::from_keyword("namespace"), None);
    }

    #[test]
    fn test_only_aggregates_have_bodies_and_schemas() {
        assert!(ShapeKind::Structure.has_body());
        assert!(ShapeKind::Structure.schema().is_some());
        assert!(!ShapeKind::Integer.has_body());
        assert!(ShapeKind::Integer.schema().is_none());
    }

    #[test]
    fn test_structure_body_accepts_any_member() {
        let Some(Schema::Structure(body)) = ShapeKind::Union.schema() else {
            panic!("union body should be a structure schema");
        };
        assert!(body.fields.is_empty());
        assert_eq!(body.any_member, Some(&Schema::Member));
    }

    #[test]
    fn test_map_body_requires_key_and_value() {
        let Some(Schema::Structure(body)) = ShapeKind::Map.schema() else {
            panic!("map body should be a structure schema");
        };
        assert!(body.field("key").unwrap().required);
        assert!(body.field("value").unwrap().required);
        assert!(body.field("member").is_none());
    }

    #[test]
    fn test_service_version_is_required_string() {
        let Some(Schema::Structure(body)) = ShapeKind::Service.schema() else {
            panic!("service body should be a structure schema");
        };
        let version = body.field("version").unwrap();
        assert!(version.required);
        assert_eq!(version.schema, Schema::String);
    }

    #[test]
    fn test_trait_lookup() {
        assert_eq!(trait_definition("required").unwrap().schema, None);
        assert_eq!(
            trait_definition("documentation").unwrap().schema,
            Some(Schema::String)
        );
        assert!(trait_definition("notATrait").is_none());
    }

    #[test]
    fn test_trait_names_are_unique() {
        let mut names: Vec<&str> = TRAITS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_schema_display() {
        assert_eq!(Schema::Member.to_string(), "member");
        assert_eq!(MEMBER_LIST.to_string(), "list");
    }
}
