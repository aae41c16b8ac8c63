//! Expression grammar.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, postfix_binding_power, prefix_binding_power, token_to_binary_op,
    PATTERN_BP,
};
use crate::ast::{
    BinaryOp, CallExpr, CaseExpr, CastExpr, DataType, Expr, ExprRef, InListExpr, Parameter, QName,
    TernaryExpr, TernaryOp, UnaryOp, WhenClause,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser {
    /// Parses a single expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no complete expression starts at the cursor.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Parses an expression using Pratt parsing.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        self.nested(|parser| parser.parse_operators(min_bp))
    }

    fn parse_operators(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            if let Some(l_bp) = postfix_binding_power(&self.current().kind) {
                if l_bp < min_bp {
                    break;
                }
                lhs = self.parse_postfix(lhs)?;
                continue;
            }

            let Some((l_bp, r_bp)) = self.infix_binding_power() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            lhs = self.parse_infix(lhs, r_bp)?;
        }

        Ok(lhs)
    }

    /// Infix binding power at the cursor, looking through `NOT` for the
    /// negated `BETWEEN / IN / LIKE / ILIKE` forms.
    fn infix_binding_power(&self) -> Option<(u8, u8)> {
        match &self.current().kind {
            TokenKind::Keyword(Keyword::Not) => matches!(
                self.peek(1).as_keyword(),
                Some(Keyword::Between | Keyword::In | Keyword::Like | Keyword::Ilike)
            )
            .then_some(PATTERN_BP),
            kind => infix_binding_power(kind),
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if let Some((op, bp)) = prefix_binding_power(&self.current().kind) {
            self.advance();
            let operand = self.parse_expr_bp(bp)?;
            return Ok(Expr::unary(op, operand));
        }

        self.parse_primary()
    }

    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        let mut token = self.advance();
        let negated = token.as_keyword() == Some(Keyword::Not);
        if negated {
            token = self.advance();
        }

        match token.kind {
            TokenKind::Keyword(Keyword::Between) => {
                let lo = self.parse_expr_bp(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let hi = self.parse_expr_bp(r_bp)?;
                Ok(Expr::Ternary(TernaryExpr {
                    op: if negated {
                        TernaryOp::NotBetween
                    } else {
                        TernaryOp::Between
                    },
                    value: Box::new(lhs),
                    lo: Box::new(lo),
                    hi: Box::new(hi),
                }))
            }
            TokenKind::Keyword(Keyword::In) => {
                self.expect(&TokenKind::LeftParen)?;
                let list = if self.check_keyword(Keyword::Select) {
                    vec![Expr::Select(Box::new(self.parse_select_statement()?))]
                } else {
                    self.parse_expression_list()?
                };
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::InList(InListExpr {
                    operand: Box::new(lhs),
                    list,
                    negated,
                }))
            }
            TokenKind::Keyword(Keyword::Like) => {
                let op = if negated { BinaryOp::NotLike } else { BinaryOp::Like };
                Ok(lhs.binary(op, self.parse_expr_bp(r_bp)?))
            }
            TokenKind::Keyword(Keyword::Ilike) => {
                let op = if negated {
                    BinaryOp::NotILike
                } else {
                    BinaryOp::ILike
                };
                Ok(lhs.binary(op, self.parse_expr_bp(r_bp)?))
            }
            ref kind => match token_to_binary_op(kind) {
                Some(op) => Ok(lhs.binary(op, self.parse_expr_bp(r_bp)?)),
                None => Err(ParseError::unexpected("operator", &token)),
            },
        }
    }

    fn parse_postfix(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Keyword(Keyword::Is) => {
                let negated = self.eat_keyword(Keyword::Not);
                let op = match (self.current().as_keyword(), negated) {
                    (Some(Keyword::Null), false) => UnaryOp::IsNull,
                    (Some(Keyword::Null), true) => UnaryOp::IsNotNull,
                    (Some(Keyword::True), false) => UnaryOp::IsTrue,
                    (Some(Keyword::True), true) => UnaryOp::IsNotTrue,
                    (Some(Keyword::False), false) => UnaryOp::IsFalse,
                    (Some(Keyword::False), true) => UnaryOp::IsNotFalse,
                    _ => {
                        return Err(ParseError::unexpected(
                            "NULL, TRUE or FALSE",
                            self.current(),
                        ))
                    }
                };
                self.advance();
                Ok(Expr::unary(op, lhs))
            }
            TokenKind::DoubleColon => {
                let to = self.parse_data_type()?;
                Ok(Expr::Cast(CastExpr {
                    operand: Box::new(lhs),
                    to,
                }))
            }
            _ => Err(ParseError::unexpected("operator", &token)),
        }
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();

        match &token.kind {
            // Literals
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::integer(*n))
            }
            TokenKind::Numeric(f) => {
                self.advance();
                Ok(Expr::numeric(*f))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::string(s.clone()))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::boolean(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::null())
            }

            TokenKind::Parameter(n) => {
                self.advance();
                Ok(Expr::Parameter(Parameter {
                    name: format!("${n}"),
                }))
            }

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::reference("*"))
            }

            // Parenthesized expression or subquery
            TokenKind::LeftParen => {
                self.advance();
                let expr = if self.check_keyword(Keyword::Select) {
                    Expr::Select(Box::new(self.parse_select_statement()?))
                } else {
                    self.parse_expr_bp(0)?
                };
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),

            // EXISTS (SELECT ...); a bare `exists` is an ordinary name.
            TokenKind::Keyword(Keyword::Exists) if self.peek(1).kind == TokenKind::LeftParen => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Call(CallExpr {
                    function: QName::new("exists"),
                    args: vec![Expr::Select(Box::new(query))],
                    distinct: false,
                }))
            }

            TokenKind::Identifier(_) => self.parse_name_expression(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => self.parse_name_expression(),

            _ => Err(ParseError::unexpected("expression", &token)),
        }
    }

    /// Parses a column reference (`col`, `tbl.col`, `schema.tbl.col`,
    /// `tbl.*`) or a function call (`f(..)`, `schema.f(..)`).
    fn parse_name_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span;
        let mut parts = vec![self.expect_identifier()?];

        while self.eat(&TokenKind::Dot) {
            if self.eat(&TokenKind::Star) {
                let span = start.merge(self.previous_span());
                return Ok(Expr::Ref(ExprRef {
                    table: Some(qname_from_parts(parts, span)?),
                    name: String::from("*"),
                }));
            }
            parts.push(self.expect_identifier()?);
        }

        let span = start.merge(self.previous_span());
        if self.check(&TokenKind::LeftParen) {
            let function = qname_from_parts(parts, span)?;
            return self.parse_function_call(function);
        }

        let name = parts.pop().unwrap_or_default();
        let table = if parts.is_empty() {
            None
        } else {
            Some(qname_from_parts(parts, span)?)
        };
        Ok(Expr::Ref(ExprRef { table, name }))
    }

    /// Parses a function call.
    fn parse_function_call(&mut self, function: QName) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let distinct = self.eat_keyword(Keyword::Distinct);

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else if !distinct && self.check(&TokenKind::Star) {
            self.advance();
            vec![Expr::reference("*")]
        } else {
            self.parse_expression_list()?
        };

        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Call(CallExpr {
            function,
            args,
            distinct,
        }))
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let operand = self.parse_expr_bp(0)?;
        self.expect_keyword(Keyword::As)?;
        let to = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast(CastExpr {
            operand: Box::new(operand),
            to,
        }))
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE (CASE expr WHEN ...)
        let value = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr_bp(0)?))
        };

        let mut whens = vec![];
        while self.eat_keyword(Keyword::When) {
            let when = self.parse_expr_bp(0)?;
            self.expect_keyword(Keyword::Then)?;
            let value = self.parse_expr_bp(0)?;
            whens.push(WhenClause { when, value });
        }
        if whens.is_empty() {
            return Err(ParseError::unexpected("WHEN", self.current()));
        }

        let else_value = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr_bp(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case(CaseExpr {
            value,
            whens,
            else_value,
        }))
    }

    /// Parses a data type: a name, optional modifiers and optional `[]`.
    ///
    /// Multi-word spellings are normalised (`double precision`,
    /// `character varying`, `timestamp with time zone`).
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let mut name = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => kw.as_str().to_ascii_lowercase(),
            _ => return Err(ParseError::unexpected("data type", self.current())),
        };
        self.advance();

        match name.as_str() {
            "double" if self.eat_word("precision") => name.push_str(" precision"),
            "character" | "char" if self.eat_word("varying") => {
                name = String::from("character varying");
            }
            _ => {}
        }

        let mut config = vec![];
        if self.eat(&TokenKind::LeftParen) {
            loop {
                match &self.current().kind {
                    TokenKind::Integer(n) => {
                        let n = *n;
                        self.advance();
                        config.push(n);
                    }
                    _ => return Err(ParseError::unexpected("integer", self.current())),
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        if matches!(name.as_str(), "time" | "timestamp") {
            if self.check_keyword(Keyword::With) && self.at_time_zone(1) {
                self.advance();
                self.advance();
                self.advance();
                name.push_str(" with time zone");
            } else if self.at_time_zone(0) && self.eat_word("without") {
                self.advance();
                self.advance();
                name.push_str(" without time zone");
            }
        }

        while self.check(&TokenKind::LeftBracket) && self.peek(1).kind == TokenKind::RightBracket {
            self.advance();
            self.advance();
            name.push_str("[]");
        }

        Ok(DataType { name, config })
    }

    /// `[WITH | WITHOUT] TIME ZONE`, with the `TIME` at `n` positions ahead.
    fn at_time_zone(&self, n: usize) -> bool {
        let word = |k: usize, w: &str| matches!(&self.peek(k).kind, TokenKind::Identifier(name) if name == w);
        if n == 0 {
            word(0, "without") && word(1, "time") && word(2, "zone")
        } else {
            word(n, "time") && word(n + 1, "zone")
        }
    }

    /// Parses a comma-separated list of expressions.
    pub(crate) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expr_bp(0)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs)
    }
}

/// Builds a one- or two-part name; anything longer is rejected.
fn qname_from_parts(mut parts: Vec<String>, span: Span) -> Result<QName, ParseError> {
    match parts.len() {
        1 => Ok(QName::new(parts.remove(0))),
        2 => {
            let name = parts.remove(1);
            Ok(QName::qualified(parts.remove(0), name))
        }
        _ => Err(ParseError::new(
            "Improper qualified name (too many dotted names)",
            span,
        )),
    }
}
