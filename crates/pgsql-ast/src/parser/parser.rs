//! SQL Parser implementation: the token cursor and statement dispatch.
//!
//! Grammar rules live in the sibling modules as further `impl Parser` blocks;
//! this file owns the cursor and the helpers they share.

use tracing::debug;

use super::error::ParseError;
use crate::ast::{QName, Statement};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// How deep expressions, subqueries and parenthesized FROM items may nest.
pub const MAX_NESTING_DEPTH: usize = 128;

/// SQL Parser.
///
/// A cursor over the token stream of one input. The stream always ends with
/// an `Eof` token and the cursor never moves past it.
#[derive(Debug, Clone)]
pub struct Parser {
    source: String,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut parser = Self::from_tokens(Lexer::new(input).tokenize());
        parser.source = input.to_string();
        parser
    }

    /// Creates a parser over an already tokenized input.
    ///
    /// An `Eof` token is appended if the stream does not end with one.
    /// Without the source text, integer literals are limited to the range
    /// the lexer could represent.
    #[must_use]
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Self {
            source: String::new(),
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses every statement in the input.
    ///
    /// Statements are separated by `;`; empty statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered. No statement is returned
    /// when any of them fails.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        loop {
            self.skip_semicolons();
            if self.current().is_eof() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Parses a single SQL statement, including its `;` terminator if any.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement, or if
    /// tokens are left over before the end of the statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.skip_semicolons();
        let start = self.current().span;

        let statement = match self.parse_statement_body() {
            Ok(statement) => statement,
            Err(err) => {
                debug!(error = %err, "statement rejected");
                return Err(err);
            }
        };

        debug!(
            kind = statement.kind(),
            span = %start.merge(self.previous_span()),
            "parsed statement"
        );
        self.eat(&TokenKind::Semicolon);
        Ok(statement)
    }

    /// Requires that only `;` tokens remain.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` pointing at the first leftover token.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_semicolons();
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(ParseError::unexpected("end of input", self.current()))
        }
    }

    fn parse_statement_body(&mut self) -> Result<Statement, ParseError> {
        let token = self.current().clone();
        let statement = match &token.kind {
            TokenKind::Keyword(Keyword::Select) => {
                Statement::Select(self.parse_select_statement()?)
            }
            TokenKind::Keyword(Keyword::Insert) => {
                Statement::Insert(self.parse_insert_statement()?)
            }
            TokenKind::Keyword(Keyword::Update) => {
                Statement::Update(self.parse_update_statement()?)
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Statement::Delete(self.parse_delete_statement()?)
            }
            TokenKind::Keyword(Keyword::Create) if self.at_create_sequence() => {
                Statement::CreateSequence(self.parse_create_sequence()?)
            }
            TokenKind::Keyword(Keyword::Alter) if self.peek_keyword(1, Keyword::Sequence) => {
                Statement::AlterSequence(self.parse_alter_sequence()?)
            }
            TokenKind::Keyword(Keyword::Drop) if self.peek_keyword(1, Keyword::Sequence) => {
                Statement::DropSequence(self.parse_drop_sequence()?)
            }
            TokenKind::Keyword(
                Keyword::Create | Keyword::Alter | Keyword::Drop | Keyword::Truncate | Keyword::With,
            ) => return Err(self.unsupported_statement()),
            _ => return Err(ParseError::unexpected("statement", &token)),
        };
        self.expect_statement_end()?;
        Ok(statement)
    }

    /// `CREATE [TEMP | TEMPORARY | UNLOGGED] SEQUENCE`
    fn at_create_sequence(&self) -> bool {
        match self.peek(1).as_keyword() {
            Some(Keyword::Sequence) => true,
            Some(Keyword::Temp | Keyword::Temporary | Keyword::Unlogged) => {
                self.peek_keyword(2, Keyword::Sequence)
            }
            _ => false,
        }
    }

    /// Builds an `Unsupported` error naming the statement by its leading words,
    /// e.g. `CREATE TEMP TABLE`.
    fn unsupported_statement(&self) -> ParseError {
        let verb = self.current();
        let takes_object = matches!(
            verb.as_keyword(),
            Some(Keyword::Create | Keyword::Alter | Keyword::Drop)
        );
        let mut words = vec![token_word(verb)];
        let mut span = verb.span;

        if takes_object {
            for n in 1..=2 {
                let token = self.peek(n);
                if !matches!(token.kind, TokenKind::Keyword(_) | TokenKind::Identifier(_)) {
                    break;
                }
                words.push(token_word(token));
                span = span.merge(token.span);
                if !matches!(
                    token.as_keyword(),
                    Some(Keyword::Temp | Keyword::Temporary | Keyword::Unlogged)
                ) {
                    break;
                }
            }
        }

        ParseError::unsupported(
            format!("{} statements are not supported", words.join(" ")),
            span,
        )
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails instead of recursing past `MAX_NESTING_DEPTH`.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                "Expression nested too deeply",
                self.current().span,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Source text of the current token, when the parser was built from source.
    pub(crate) fn current_text(&self) -> Option<&str> {
        let span = self.current().span;
        self.source.get(span.start..span.end)
    }

    // --- Cursor ---

    /// Returns the current token.
    pub(crate) fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the token `n` positions ahead, or `Eof` past the end.
    pub(crate) fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Advances to the next token, returning the one consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Returns the span of the last consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => Span::point(self.current().span.start),
        }
    }

    fn skip_semicolons(&mut self) {
        while self.eat(&TokenKind::Semicolon) {}
    }

    // --- Helper methods ---

    /// Checks if the current token matches the given kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek_keyword(0, keyword)
    }

    /// Checks if the token `n` positions ahead is the given keyword.
    pub(crate) fn peek_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek(n).as_keyword() == Some(keyword)
    }

    /// Consumes the current token if it matches the given kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the unquoted identifier `word`.
    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if matches!(&self.current().kind, TokenKind::Identifier(name) if name == word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ParseError::unexpected(kind.describe(), self.current()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), self.current()))
        }
    }

    /// Expects and returns an identifier.
    ///
    /// Non-reserved keywords are accepted as names.
    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => {
                let name = kw.as_str().to_ascii_lowercase();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::unexpected("identifier", self.current())),
        }
    }

    /// Parses a possibly schema-qualified name.
    pub(crate) fn parse_qname(&mut self) -> Result<QName, ParseError> {
        let first = self.expect_identifier()?;
        if self.eat(&TokenKind::Dot) {
            let name = self.expect_identifier()?;
            Ok(QName::qualified(first, name))
        } else {
            Ok(QName::new(first))
        }
    }

    /// Parses a comma-separated list of identifiers.
    pub(crate) fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut idents = vec![];
        loop {
            idents.push(self.expect_identifier()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(idents)
    }

    /// Parses `IF EXISTS`, if present.
    pub(crate) fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::If) && self.peek_keyword(1, Keyword::Exists) {
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses `IF NOT EXISTS`, if present.
    pub(crate) fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::If) && self.peek_keyword(1, Keyword::Not) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Requires the statement to end here.
    pub(crate) fn expect_statement_end(&self) -> Result<(), ParseError> {
        if self.current().is_terminator() {
            Ok(())
        } else {
            Err(ParseError::unexpected("end of statement", self.current()))
        }
    }
}

fn token_word(token: &Token) -> String {
    match &token.kind {
        TokenKind::Keyword(kw) => String::from(kw.as_str()),
        TokenKind::Identifier(name) => name.to_uppercase(),
        other => other.describe(),
    }
}
