//! SQL Lexer/Tokenizer
//!
//! Turns SQL text into the flat token stream the grammar consumes. Every token
//! carries the byte span it was read from, and the stream always ends with an
//! `Eof` token.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenizes `input` into a vector of tokens terminated by `Eof`.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
