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

//! Properties of the offset to line/character mapping.

use proptest::prelude::*;
use ropey::Rope;
use smithy_core::Lexer;
use smithy_lsp::diagnostics::index_to_position;

proptest! {
    #[test]
    fn prop_positions_are_monotonic(text in "[a-z\\n\\r é😀]{0,64}") {
        let rope = Rope::from_str(&text);
        let total = rope.len_utf16_cu();
        let mut previous = index_to_position(&rope, 0);
        for index in 1..=total + 2 {
            let position = index_to_position(&rope, index);
            prop_assert!(
                (previous.line, previous.character) <= (position.line, position.character)
            );
            previous = position;
        }
    }

    #[test]
    fn prop_line_starts_map_to_column_zero(lines in prop::collection::vec("[a-z😀]{0,8}", 1..6)) {
        let text = lines.join("\n");
        let rope = Rope::from_str(&text);
        let mut index = 0;
        for (line, content) in lines.iter().enumerate() {
            let position = index_to_position(&rope, index);
            prop_assert_eq!(position.line as usize, line);
            prop_assert_eq!(position.character, 0);
            index += content.encode_utf16().count() + 1;
        }
    }

    #[test]
    fn prop_positions_agree_with_lexer(
        text in "[a-z\"/ \n\r\u{2028}\u{85}\u{2029}😀]{0,64}"
    ) {
        let rope = Rope::from_str(&text);
        for token in Lexer::new(&text) {
            let start = token.range.start;
            let position = index_to_position(&rope, start.index);
            prop_assert_eq!(
                (position.line as usize, position.character as usize),
                (start.line, start.column)
            );
        }
    }
}
