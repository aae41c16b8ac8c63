//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//!
//! ```
//! use pgsql_ast::ast::{Cycle, Statement};
//! use pgsql_ast::parser::parse_statement;
//!
//! let stmt = parse_statement("CREATE SEQUENCE s NO CYCLE").unwrap();
//! let Statement::CreateSequence(seq) = stmt else { unreachable!() };
//! assert_eq!(seq.options.cycle, Cycle::NoCycle);
//! ```

mod clauses;
mod dml;
mod error;
mod expr;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod sequence;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{Parser, MAX_NESTING_DEPTH};

use crate::ast::{Expr, Statement};

/// Parses every `;`-separated statement in `sql`.
///
/// # Errors
///
/// Returns the first `ParseError` encountered.
pub fn parse(sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(sql).parse_statements()
}

/// Parses exactly one statement, optionally followed by `;`.
///
/// # Errors
///
/// Returns a `ParseError` if the statement is invalid or more input follows.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    let mut parser = Parser::new(sql);
    let statement = parser.parse_statement()?;
    parser.finish()?;
    Ok(statement)
}

/// Parses exactly one expression.
///
/// # Errors
///
/// Returns a `ParseError` if the expression is invalid or more input follows.
pub fn parse_expression(sql: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(sql);
    let expr = parser.parse_expression()?;
    parser.finish()?;
    Ok(expr)
}
