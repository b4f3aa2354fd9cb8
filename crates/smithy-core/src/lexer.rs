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

//! Pull-based lexer for Smithy IDL source text.
//!
//! The lexer hands out one [`Token`] per request. Spaces, tabs, line breaks
//! and comments are consumed silently, so the concatenation of every token's
//! `text` with the skipped spans reproduces the input exactly.
//!
//! Scanning rules, in priority order at each position:
//!
//! 1. `//` or `///` starts a comment running to the end of the line.
//! 2. `\n` or `\r\n` is a line break.
//! 3. `(){}[],:=` is a one-character [`TokenKind::Delimiter`].
//! 4. `"` starts a [`TokenKind::String`].
//! 5. A digit, or `-` followed by a digit, starts a [`TokenKind::Number`].
//! 6. `[A-Za-z_.$#@]` starts a [`TokenKind::Identifier`].
//! 7. Anything else is a one-character [`TokenKind::Error`].
//!
//! # Examples
//!
//! ```
//! use smithy_core::{Lexer, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Lexer::new("string Name // a comment\n")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::End]
//! );
//! ```
//!
//! # Unterminated strings
//!
//! A string literal that reaches a line break or the end of input before its
//! closing quote yields no token at all; its text is skipped like a comment.

use crate::position::{Position, Range};
use crate::token::{Token, TokenKind};

/// Lexer over a borrowed source string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character.
    offset: usize,
    position: Position,
    /// Set once the iterator has yielded the end token.
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::start(),
            finished: false,
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the next token.
    ///
    /// Once the input is exhausted this keeps returning the same
    /// [`TokenKind::End`] token.
    pub fn next_token(&mut self) -> Token {
        loop {
            let start = self.position;
            let start_offset = self.offset;
            let Some(ch) = self.peek() else {
                return Token::new(TokenKind::End, Range::point(start), "");
            };

            match ch {
                '/' if self.peek_nth(1) == Some('/') => self.skip_comment(),
                '\n' => self.bump_line_break(1),
                '\r' if self.peek_nth(1) == Some('\n') => self.bump_line_break(2),
                ' ' | '\t' => {
                    self.bump();
                }
                '(' | ')' | '{' | '}' | '[' | ']' | ',' | ':' | '=' => {
                    self.bump();
                    return self.token(TokenKind::Delimiter, start, start_offset);
                }
                '"' => {
                    if let Some(token) = self.lex_string(start, start_offset) {
                        return token;
                    }
                }
                '-' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                    return self.lex_number(start, start_offset);
                }
                c if c.is_ascii_digit() => return self.lex_number(start, start_offset),
                c if is_identifier_start(c) => {
                    self.bump_while(is_identifier_part);
                    return self.token(TokenKind::Identifier, start, start_offset);
                }
                _ => {
                    self.bump();
                    return self.token(TokenKind::Error, start, start_offset);
                }
            }
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        self.position.advance(ch);
        Some(ch)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    /// `\n` and `\r\n` are ASCII, so byte and UTF-16 widths agree.
    fn bump_line_break(&mut self, width: usize) {
        self.offset += width;
        self.position.next_line(width);
    }

    fn at_line_break(&self) -> bool {
        match self.peek() {
            Some('\n') => true,
            Some('\r') => self.peek_nth(1) == Some('\n'),
            _ => false,
        }
    }

    fn token(&self, kind: TokenKind, start: Position, start_offset: usize) -> Token {
        Token::new(
            kind,
            Range::new(start, self.position),
            &self.source[start_offset..self.offset],
        )
    }

    fn skip_comment(&mut self) {
        while self.peek().is_some() && !self.at_line_break() {
            self.bump();
        }
    }

    fn lex_string(&mut self, start: Position, start_offset: usize) -> Option<Token> {
        self.bump();
        let mut value = String::new();

        loop {
            if self.at_line_break() {
                return None;
            }
            match self.bump()? {
                '"' => break,
                '\\' => {
                    if self.at_line_break() {
                        return None;
                    }
                    match self.bump()? {
                        'b' => value.push('\u{0008}'),
                        'f' => value.push('\u{000C}'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'u' => value.push(self.lex_unicode_escape()),
                        other => value.push(other),
                    }
                }
                other => value.push(other),
            }
        }

        Some(Token::with_value(
            TokenKind::String,
            Range::new(start, self.position),
            &self.source[start_offset..self.offset],
            value,
        ))
    }

    /// Reads up to four hex digits. A short sequence stops early and decodes
    /// whatever was read so far.
    fn lex_unicode_escape(&mut self) -> char {
        let mut code = 0u32;
        for _ in 0..4 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    code = code * 16 + digit;
                    self.bump();
                }
                None => break,
            }
        }
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn lex_number(&mut self, start: Position, start_offset: usize) -> Token {
        if self.peek() == Some('-') {
            self.bump();
        }
        self.bump_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_digits = match self.peek_nth(1) {
                Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exponent_digits {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.bump_while(|c| c.is_ascii_digit());
            }
        }

        self.token(TokenKind::Number, start, start_offset)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the end token.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_end() {
            self.finished = true;
        }
        Some(token)
    }
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$' | '#' | '@')
}

#[inline]
fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '#' | '@')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn kinds_and_values(source: &str) -> Vec<(TokenKind, String)> {
        lex(source)
            .into_iter()
            .map(|token| (token.kind, token.value))
            .collect()
    }

    #[test]
    fn test_empty_source_yields_end() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_end());
        assert_eq!(tokens[0].range, Range::point(Position::start()));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().value, "a");
        let first_end = lexer.next_token();
        let second_end = lexer.next_token();
        assert!(first_end.is_end());
        assert_eq!(first_end, second_end);
        assert_eq!(first_end.range.start.index, 1);
    }

    #[test]
    fn test_delimiters() {
        let tokens = lex("(){}[],:=");
        assert_eq!(tokens.len(), 10);
        for (token, expected) in tokens.iter().zip("(){}[],:=".chars()) {
            assert_eq!(token.kind, TokenKind::Delimiter);
            assert_eq!(token.value, expected.to_string());
            assert_eq!(token.range.len(), 1);
        }
    }

    #[test]
    fn test_identifier_forms() {
        let values: Vec<String> = lex("Foo com.example#Foo$bar @required $version _x")
            .into_iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.value)
            .collect();
        assert_eq!(
            values,
            vec!["Foo", "com.example#Foo$bar", "@required", "$version", "_x"]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds_and_values("1 -2 3.25 4e10 5.5E-3 6."),
            vec![
                (TokenKind::Number, "1".to_string()),
                (TokenKind::Number, "-2".to_string()),
                (TokenKind::Number, "3.25".to_string()),
                (TokenKind::Number, "4e10".to_string()),
                (TokenKind::Number, "5.5E-3".to_string()),
                (TokenKind::Number, "6".to_string()),
                (TokenKind::Identifier, ".".to_string()),
                (TokenKind::End, String::new()),
            ]
        );
    }

    #[test]
    fn test_lone_minus_is_error() {
        let tokens = lex("- x");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].text, "-");
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\"b\\c\n\tA\q""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, "a\"b\\c\n\tAq");
        assert_eq!(tokens[0].text, r#""a\"b\\c\n\tA\q""#);
    }

    #[test]
    fn test_partial_unicode_escape_stops_early() {
        let tokens = lex(r#""\u41z""#);
        assert_eq!(tokens[0].value, "Az");
    }

    #[test]
    fn test_unterminated_string_yields_no_token() {
        let tokens = lex("\"abc\nfoo");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "foo");
        assert_eq!(tokens[0].range.start.line, 1);

        let tokens = lex("\"abc");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_end());
        assert_eq!(tokens[0].range.start.index, 4);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = lex("// comment\n/// docs\nfoo // trailing");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, "foo");
        assert_eq!(tokens[0].range.start, Position::new(20, 2, 0));
    }

    #[test]
    fn test_crlf_line_breaks() {
        let tokens = lex("a\r\nb");
        assert_eq!(tokens[1].range.start, Position::new(3, 1, 0));
    }

    #[test]
    fn test_lone_carriage_return_is_error() {
        let tokens = lex("a\rb");
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].text, "\r");
    }

    #[test]
    fn test_error_token_for_unknown_character() {
        let tokens = lex("a % b");
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].text, "%");
        assert_eq!(tokens[1].range.len(), 1);
    }

    #[test]
    fn test_utf16_positions() {
        let tokens = lex("\"😀\" x");
        assert_eq!(tokens[0].range.len(), 4);
        assert_eq!(tokens[1].range.start, Position::new(5, 0, 5));
    }

    #[test]
    fn test_ranges_are_exact() {
        let tokens = lex("structure Foo {\n  bar: String\n}\n");
        let bar = tokens.iter().find(|t| t.value == "bar").unwrap();
        assert_eq!(bar.range.start, Position::new(18, 1, 2));
        assert_eq!(bar.range.end, Position::new(21, 1, 5));
    }
}
