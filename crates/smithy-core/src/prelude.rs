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

//! The built-in `smithy.api` namespace.

use crate::identifier::Identifier;
use crate::schema::trait_definition;

/// Namespace of the prelude, and the fallback for ids that cannot be
/// resolved against a document namespace.
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

/// Simple shapes defined by the prelude.
pub static PRELUDE_SHAPES: &[&str] = &[
    "String",
    "Blob",
    "Boolean",
    "Document",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "BigInteger",
    "BigDecimal",
    "Timestamp",
    "PrimitiveBoolean",
    "PrimitiveByte",
    "PrimitiveShort",
    "PrimitiveInteger",
    "PrimitiveLong",
    "PrimitiveFloat",
    "PrimitiveDouble",
    "Unit",
];

/// True for a prelude shape or trait name.
pub fn is_prelude_name(name: &str) -> bool {
    PRELUDE_SHAPES.contains(&name) || trait_definition(name).is_some()
}

/// True when `id` names a prelude shape or trait, either relatively or
/// through an explicit `smithy.api` namespace. Members never match.
pub fn is_prelude_id(id: &Identifier) -> bool {
    if id.member.is_some() {
        return false;
    }
    match id.namespace.as_deref() {
        None | Some(PRELUDE_NAMESPACE) => is_prelude_name(&id.name),
        Some(_) => false,
    }
}
