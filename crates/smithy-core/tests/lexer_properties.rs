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

//! Property tests for the lexer.
//!
//! 1. **Termination**: every input ends in exactly one end token
//! 2. **Monotonic ranges**: tokens are non-empty and never overlap
//! 3. **Exact text**: every token's text is the source slice at its range
//! 4. **Line tracking**: line and column agree with the absolute index

use proptest::prelude::*;
use smithy_core::{Lexer, Position, Token, TokenKind};

/// Source-like text: mostly IDL characters with some noise mixed in.
fn idl_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => "[a-zA-Z_.$#@]{1,8}",
            2 => "[ \t]{1,3}",
            2 => Just("\n".to_string()),
            1 => Just("\r\n".to_string()),
            1 => Just("\r".to_string()),
            2 => "[(){}\\[\\],:=]",
            1 => "\"[a-z \\\\\"]{0,6}\"?",
            1 => "-?[0-9]{1,4}(\\.[0-9]{0,2})?([eE][+-]?[0-9]{0,2})?",
            1 => "//[^\n]{0,10}",
            1 => "[^\n]",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// The position of a UTF-16 index, counting only `\n` as a line break.
fn position_of(units: &[u16], index: usize) -> Position {
    let before = &units[..index];
    let line = before.iter().filter(|&&u| u == u16::from(b'\n')).count();
    let line_start = before
        .iter()
        .rposition(|&u| u == u16::from(b'\n'))
        .map_or(0, |i| i + 1);
    Position::new(index, line, index - line_start)
}

fn check_tokens(source: &str) -> Result<(), TestCaseError> {
    let tokens = lex(source);
    let units: Vec<u16> = source.encode_utf16().collect();

    prop_assert!(!tokens.is_empty());
    let end = &tokens[tokens.len() - 1];
    prop_assert_eq!(end.kind, TokenKind::End);
    prop_assert_eq!(end.range.start.index, units.len());
    prop_assert!(tokens[..tokens.len() - 1].iter().all(|t| !t.is_end()));

    let mut previous_end = 0;
    for token in &tokens[..tokens.len() - 1] {
        let range = token.range;
        prop_assert!(range.end.index > range.start.index, "empty token {:?}", token);
        prop_assert!(range.start.index >= previous_end);
        previous_end = range.end.index;

        let slice = String::from_utf16_lossy(&units[range.start.index..range.end.index]);
        prop_assert_eq!(&slice, &token.text);
        prop_assert_eq!(range.start, position_of(&units, range.start.index));
        prop_assert_eq!(range.end, position_of(&units, range.end.index));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_lexer_invariants_on_idl_text(source in idl_text()) {
        check_tokens(&source)?;
    }

    #[test]
    fn prop_lexer_invariants_on_any_text(source in ".*") {
        check_tokens(&source)?;
    }

    #[test]
    fn prop_end_token_is_idempotent(source in idl_text()) {
        let mut lexer = Lexer::new(&source);
        let mut end = lexer.next_token();
        while !end.is_end() {
            end = lexer.next_token();
        }
        prop_assert_eq!(lexer.next_token(), end.clone());
        prop_assert_eq!(lexer.next_token(), end);
    }
}

#[test]
fn test_skipped_spans_are_whitespace_comments_or_open_strings() {
    let source = "a // note\r\n  \"open\n\tb";
    let tokens = lex(source);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", ""]);
    assert_eq!(tokens[1].range.start, Position::new(20, 2, 1));
}
