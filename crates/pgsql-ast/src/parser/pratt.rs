//! Pratt expression parser for operator precedence.
//!
//! Binding powers follow the Postgres operator precedence table, from loosest
//! to tightest: `OR`, `AND`, `NOT`, `IS`, comparisons, `BETWEEN`/`IN`/`LIKE`,
//! other operators (`||`), `+ -`, `* / %`, `^`, unary sign, `::`.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the `[NOT] BETWEEN / IN / LIKE / ILIKE` family.
pub const PATTERN_BP: (u8, u8) = (11, 12);

/// Returns the prefix operator and binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<(UnaryOp, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Not) => Some((UnaryOp::Not, 5)),
        TokenKind::Minus => Some((UnaryOp::Neg, 21)),
        TokenKind::Plus => Some((UnaryOp::Plus, 21)),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// `NOT` is not listed: `NOT BETWEEN` and friends need a token of lookahead,
/// which the parser handles itself with [`PATTERN_BP`].
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparison operators
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((9, 10)),

        // BETWEEN, IN, LIKE, ILIKE
        TokenKind::Keyword(Keyword::Between | Keyword::In | Keyword::Like | Keyword::Ilike) => {
            Some(PATTERN_BP)
        }

        // Any other operator
        TokenKind::Concat => Some((13, 14)),

        // Additive
        TokenKind::Plus | TokenKind::Minus => Some((15, 16)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((17, 18)),

        // Exponentiation
        TokenKind::Caret => Some((19, 20)),

        _ => None,
    }
}

/// Returns the postfix binding power for a token.
///
/// Returns `None` if the token is not a postfix operator.
#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // IS [NOT] NULL / TRUE / FALSE
        TokenKind::Keyword(Keyword::Is) => Some(7),
        // expr::type
        TokenKind::DoubleColon => Some(23),
        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Caret => Some(BinaryOp::Pow),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        TokenKind::Keyword(Keyword::Ilike) => Some(BinaryOp::ILike),
        _ => None,
    }
}
