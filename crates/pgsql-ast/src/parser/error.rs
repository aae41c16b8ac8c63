//! Parser error types.

use thiserror::Error;

use crate::lexer::{Span, Token, TokenKind};

/// What went wrong, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The input does not match the grammar.
    Syntax,
    /// The input is plausible SQL, but the construct is not modelled.
    Unsupported,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {span}")]
pub struct ParseError {
    /// Whether the input is malformed or merely unsupported.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an error for a construct the parser does not model.
    #[must_use]
    pub fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Unsupported,
            ..Self::new(message, span)
        }
    }

    /// Creates an "unexpected token" error for `found`.
    ///
    /// Lexer error tokens keep the lexer's message, and end of input gets its
    /// own wording.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected: String = expected.into();
        let message = match &found.kind {
            TokenKind::Error(message) => message.clone(),
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            other => format!(
                "Unexpected token: expected {expected}, found {}",
                other.describe()
            ),
        };
        Self {
            kind: ParseErrorKind::Syntax,
            message,
            span: found.span,
            expected: Some(expected),
            found: Some(found.kind.clone()),
        }
    }

    /// Returns true for malformed input.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax)
    }

    /// Returns true for well-formed but unmodelled input.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Unsupported)
    }
}
