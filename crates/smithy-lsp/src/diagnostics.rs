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

//! Conversion of analysis results to LSP types.
//!
//! Messages carry absolute UTF-16 offsets. They are mapped to line and
//! character positions through the document's [`Rope`], which also clamps
//! offsets that run past the end of the text.
//!
//! `ropey` is built without its `unicode_lines` and `cr_lines` features, so
//! only `\n` ends a line. That is the lexer's line model too, which keeps
//! diagnostic ranges in line with definition ranges.

use crate::constants::DIAGNOSTIC_SOURCE;
use ropey::Rope;
use smithy_core::{Message, ParsedDocument, Severity};
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

/// Maps a UTF-16 offset to an LSP position.
pub fn index_to_position(rope: &Rope, index: usize) -> Position {
    let index = index.min(rope.len_utf16_cu());
    let char_idx = rope.utf16_cu_to_char(index);
    let line = rope.char_to_line(char_idx);
    let line_start = rope.line_to_char(line);
    let character = rope.char_to_utf16_cu(char_idx) - rope.char_to_utf16_cu(line_start);
    Position::new(line as u32, character as u32)
}

/// Maps a UTF-16 offset range to an LSP range.
pub fn index_range(rope: &Rope, start: usize, end: usize) -> Range {
    Range::new(index_to_position(rope, start), index_to_position(rope, end))
}

/// An LSP range straight from a core range, for documents without text.
pub fn core_range(range: &smithy_core::Range) -> Range {
    Range::new(
        Position::new(range.start.line as u32, range.start.column as u32),
        Position::new(range.end.line as u32, range.end.column as u32),
    )
}

fn severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

pub fn to_lsp_diagnostic(message: &Message, rope: &Rope) -> Diagnostic {
    Diagnostic {
        range: index_range(rope, message.start_index, message.end_index),
        severity: Some(severity(message.severity)),
        code: Some(NumberOrString::String(message.kind.to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: message.text.clone(),
        ..Default::default()
    }
}

/// Every parse and validation message of a document.
pub fn to_lsp_diagnostics(document: &ParsedDocument, rope: &Rope) -> Vec<Diagnostic> {
    document
        .messages
        .iter()
        .map(|message| to_lsp_diagnostic(message, rope))
        .collect()
}
