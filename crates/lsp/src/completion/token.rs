// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Fragment tokenizer
//!
//! Turns a line fragment into the flat token sequence consumed by the chain
//! resolver. Only the tokens that matter for member chains are distinguished;
//! everything else (numbers, operators, punctuation) is [`TokenKind::Other`].
//! Reserved words are reported as identifiers so that a prefix such as `in`
//! still completes to `int` and `inout`.
//!
//! The sequence is produced lazily and always ends with exactly one
//! [`TokenKind::End`] token.

use std::iter::Peekable;
use std::str::CharIndices;

use shader_lsp_types::SourceLoc;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Dot,
    LeftBracket,
    RightBracket,
    Other,
    /// Sentinel terminating every sequence
    End,
}

/// A lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub loc: SourceLoc,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, loc: SourceLoc) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            loc,
        }
    }

    /// Identifier token that did not come from the source text
    ///
    /// Anonymous block names such as `anon@0` are not lexable, so the driver
    /// builds their tokens directly.
    pub fn synthetic_identifier(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, name, SourceLoc::default())
    }

    /// Dot token that did not come from the source text
    pub fn synthetic_dot() -> Self {
        Self::new(TokenKind::Dot, ".", SourceLoc::default())
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Lazy tokenizer over one fragment
pub struct Tokenizer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: u32,
    column: u32,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `text`, stamping every token with `line`
    pub fn new(text: &'a str, line: u32) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            line,
            column: 0,
            finished: false,
        }
    }

    /// Builder method: the fragment starts at `column` of its line
    pub fn starting_at(mut self, column: u32) -> Self {
        self.column = column;
        self
    }

    fn loc(&self, offset: usize) -> SourceLoc {
        SourceLoc::new(self.line, self.column + offset as u32)
    }

    /// Consume characters while `pred` holds and return the end offset
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            self.chars.next();
        }
        self.offset()
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);

            let offset = self.offset();
            let rest = &self.text[offset..];
            if rest.starts_with("//") {
                self.eat_while(|c| c != '\n');
            } else if rest.starts_with("/*") {
                self.chars.next();
                self.chars.next();
                let mut prev = '\0';
                for (_, c) in self.chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            } else {
                return;
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        self.skip_trivia();

        let Some((start, c)) = self.chars.next() else {
            self.finished = true;
            let end = self.text.len();
            return Some(Token::new(TokenKind::End, "", self.loc(end)));
        };

        let kind = match c {
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                TokenKind::Identifier
            }
            '.' if self.chars.peek().is_some_and(|&(_, n)| n.is_ascii_digit()) => {
                self.eat_while(is_number_char);
                TokenKind::Other
            }
            c if c.is_ascii_digit() => {
                self.eat_while(is_number_char);
                TokenKind::Other
            }
            '.' => TokenKind::Dot,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            _ => TokenKind::Other,
        };

        let end = self.offset();
        Some(Token::new(kind, &self.text[start..end], self.loc(start)))
    }
}

/// Number literals such as `1.5e3f`, `0x1Fu` or `2.0lf`
fn is_number_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
