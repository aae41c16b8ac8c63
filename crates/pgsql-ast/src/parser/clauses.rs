//! The optional-clause loop.
//!
//! Statements such as CREATE SEQUENCE end with a bag of named clauses that may
//! appear in any order. Each statement supplies a callback that recognises
//! and parses one clause; the loop drives it to the end of the statement and
//! enforces that no clause appears twice.

use super::error::ParseError;
use super::parser::Parser;

impl Parser {
    /// Offers the cursor to `clause` until the statement ends.
    ///
    /// `clause` returns the name of the clause it parsed, or `None` when the
    /// current token does not start any clause it knows, which is an error:
    /// trailing tokens are never ignored. Clauses that share a name (such as
    /// `CYCLE` and `NO CYCLE`) count as the same clause.
    ///
    /// Returns the number of clauses parsed.
    pub(crate) fn parse_clauses<F>(&mut self, expected: &str, mut clause: F) -> Result<usize, ParseError>
    where
        F: FnMut(&mut Self) -> Result<Option<&'static str>, ParseError>,
    {
        let mut seen: Vec<&'static str> = vec![];

        while !self.current().is_terminator() {
            let start = self.current().clone();
            let Some(name) = clause(self)? else {
                return Err(ParseError::unexpected(
                    format!("{expected} or end of statement"),
                    &start,
                ));
            };

            if seen.contains(&name) {
                return Err(ParseError::new(
                    format!("Duplicate {name} clause"),
                    start.span.merge(self.previous_span()),
                ));
            }
            seen.push(name);
        }

        Ok(seen.len())
    }
}
