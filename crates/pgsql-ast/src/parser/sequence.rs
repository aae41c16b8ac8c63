//! CREATE / ALTER / DROP SEQUENCE.

use tracing::trace;

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AlterSequenceChange, AlterSequenceOptions, AlterSequenceStatement, CreateSequenceStatement,
    Cycle, DropBehavior, DropSequenceStatement, MaxValue, MinValue, OwnedBy, OwnerColumn, Restart,
    SequenceOptions,
};
use crate::lexer::{Keyword, TokenKind};

const I64_MIN_MAGNITUDE: &str = "9223372036854775808";

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

impl Parser {
    /// `CREATE [TEMP | TEMPORARY | UNLOGGED] SEQUENCE [IF NOT EXISTS] name [option ...]`
    pub(crate) fn parse_create_sequence(&mut self) -> Result<CreateSequenceStatement, ParseError> {
        trace!("parsing CREATE SEQUENCE");
        self.expect_keyword(Keyword::Create)?;

        let mut temp = false;
        let mut unlogged = false;
        match self.current().as_keyword() {
            Some(Keyword::Temp | Keyword::Temporary) => {
                self.advance();
                temp = true;
            }
            Some(Keyword::Unlogged) => {
                self.advance();
                unlogged = true;
            }
            _ => {}
        }

        self.expect_keyword(Keyword::Sequence)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qname()?;

        let mut options = SequenceOptions::default();
        self.parse_clauses("sequence option", |p| {
            p.parse_sequence_option(&mut options)
        })?;

        Ok(CreateSequenceStatement {
            name: name.name,
            schema: name.schema,
            temp,
            unlogged,
            if_not_exists,
            options,
        })
    }

    /// `ALTER SEQUENCE [IF EXISTS] name change`
    pub(crate) fn parse_alter_sequence(&mut self) -> Result<AlterSequenceStatement, ParseError> {
        trace!("parsing ALTER SEQUENCE");
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Sequence)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qname()?;

        let change = match self.current().as_keyword() {
            Some(Keyword::Rename) => {
                self.advance();
                self.expect_keyword(Keyword::To)?;
                AlterSequenceChange::Rename {
                    new_name: self.expect_identifier()?,
                }
            }
            Some(Keyword::Owner) => {
                self.advance();
                self.expect_keyword(Keyword::To)?;
                AlterSequenceChange::OwnerTo {
                    owner: self.expect_identifier()?,
                }
            }
            Some(Keyword::Set) if self.peek_keyword(1, Keyword::Schema) => {
                self.advance();
                self.advance();
                AlterSequenceChange::SetSchema {
                    new_schema: self.expect_identifier()?,
                }
            }
            Some(Keyword::Set) => {
                let span = self.current().span.merge(self.peek(1).span);
                return Err(ParseError::unsupported(
                    "ALTER SEQUENCE SET only supports SET SCHEMA",
                    span,
                ));
            }
            _ => {
                if self.current().is_terminator() {
                    return Err(ParseError::unexpected("sequence option", self.current()));
                }
                let mut change = AlterSequenceOptions::default();
                self.parse_clauses("sequence option", |p| {
                    p.parse_alter_sequence_option(&mut change)
                })?;
                AlterSequenceChange::SetOptions(change)
            }
        };

        Ok(AlterSequenceStatement {
            name: name.name,
            schema: name.schema,
            if_exists,
            change,
        })
    }

    /// `DROP SEQUENCE [IF EXISTS] name [, ...] [CASCADE | RESTRICT]`
    pub(crate) fn parse_drop_sequence(&mut self) -> Result<DropSequenceStatement, ParseError> {
        trace!("parsing DROP SEQUENCE");
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Sequence)?;
        let if_exists = self.parse_if_exists()?;

        let mut names = vec![];
        loop {
            names.push(self.parse_qname()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let cascade = if self.eat_keyword(Keyword::Cascade) {
            Some(DropBehavior::Cascade)
        } else if self.eat_keyword(Keyword::Restrict) {
            Some(DropBehavior::Restrict)
        } else {
            None
        };

        Ok(DropSequenceStatement {
            names,
            if_exists,
            cascade,
        })
    }

    /// ALTER SEQUENCE accepts every CREATE SEQUENCE option plus `RESTART`.
    fn parse_alter_sequence_option(
        &mut self,
        change: &mut AlterSequenceOptions,
    ) -> Result<Option<&'static str>, ParseError> {
        if !self.eat_keyword(Keyword::Restart) {
            return self.parse_sequence_option(&mut change.options);
        }

        change.restart = if self.eat_keyword(Keyword::With) {
            Restart::With(self.parse_signed_integer()?)
        } else if matches!(
            self.current().kind,
            TokenKind::Integer(_) | TokenKind::Numeric(_) | TokenKind::Minus | TokenKind::Plus
        ) {
            Restart::With(self.parse_signed_integer()?)
        } else {
            Restart::Start
        };
        Ok(Some("RESTART"))
    }

    /// Parses one sequence option into `options`, returning its clause name.
    fn parse_sequence_option(
        &mut self,
        options: &mut SequenceOptions,
    ) -> Result<Option<&'static str>, ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            return Ok(None);
        };

        let clause = match keyword {
            Keyword::As => {
                self.advance();
                options.as_type = Some(self.parse_data_type()?);
                "AS"
            }
            Keyword::Start => {
                self.advance();
                self.eat_keyword(Keyword::With);
                options.start_with = Some(self.parse_signed_integer()?);
                "START"
            }
            Keyword::Increment => {
                self.advance();
                self.eat_keyword(Keyword::By);
                options.increment_by = Some(self.parse_signed_integer()?);
                "INCREMENT"
            }
            Keyword::Minvalue => {
                self.advance();
                options.min_value = MinValue::Value(self.parse_signed_integer()?);
                "MINVALUE"
            }
            Keyword::Maxvalue => {
                self.advance();
                options.max_value = MaxValue::Value(self.parse_signed_integer()?);
                "MAXVALUE"
            }
            Keyword::Cache => {
                self.advance();
                options.cache = Some(self.parse_signed_integer()?);
                "CACHE"
            }
            Keyword::Cycle => {
                self.advance();
                options.cycle = Cycle::Cycle;
                "CYCLE"
            }
            Keyword::No => {
                self.advance();
                let clause = match self.current().as_keyword() {
                    Some(Keyword::Minvalue) => {
                        options.min_value = MinValue::NoMinValue;
                        "MINVALUE"
                    }
                    Some(Keyword::Maxvalue) => {
                        options.max_value = MaxValue::NoMaxValue;
                        "MAXVALUE"
                    }
                    Some(Keyword::Cycle) => {
                        options.cycle = Cycle::NoCycle;
                        "CYCLE"
                    }
                    _ => {
                        return Err(ParseError::unexpected(
                            "MINVALUE, MAXVALUE or CYCLE",
                            self.current(),
                        ))
                    }
                };
                self.advance();
                clause
            }
            Keyword::Owned => {
                self.advance();
                self.expect_keyword(Keyword::By)?;
                options.owned_by = self.parse_owned_by()?;
                "OWNED BY"
            }
            _ => return Ok(None),
        };

        Ok(Some(clause))
    }

    /// `NONE` or `[schema.]table.column`
    fn parse_owned_by(&mut self) -> Result<OwnedBy, ParseError> {
        if self.check_keyword(Keyword::None) && self.peek(1).kind != TokenKind::Dot {
            self.advance();
            return Ok(OwnedBy::None);
        }

        let start = self.current().span;
        let mut parts = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.expect_identifier()?);
        }

        match parts.as_slice() {
            [table, column] => Ok(OwnedBy::Column(OwnerColumn {
                schema: None,
                table: table.clone(),
                column: column.clone(),
            })),
            [schema, table, column] => Ok(OwnedBy::Column(OwnerColumn {
                schema: Some(schema.clone()),
                table: table.clone(),
                column: column.clone(),
            })),
            _ => Err(ParseError::new(
                "OWNED BY expects NONE or a table.column reference",
                start.merge(self.previous_span()),
            )),
        }
    }

    /// Parses an optionally signed integer literal.
    fn parse_signed_integer(&mut self) -> Result<i64, ParseError> {
        let negative = if self.eat(&TokenKind::Minus) {
            true
        } else {
            self.eat(&TokenKind::Plus);
            false
        };

        match &self.current().kind {
            TokenKind::Integer(n) => {
                let n = *n;
                self.advance();
                Ok(if negative { -n } else { n })
            }
            // The lexer only sees magnitudes, and |i64::MIN| is one past i64::MAX.
            TokenKind::Numeric(_)
                if negative && self.current_text() == Some(I64_MIN_MAGNITUDE) =>
            {
                self.advance();
                Ok(i64::MIN)
            }
            TokenKind::Numeric(_) if self.current_text().is_some_and(is_digits) => Err(
                ParseError::new("Integer out of range for bigint", self.current().span),
            ),
            _ => Err(ParseError::unexpected("integer", self.current())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataType, QName, Statement};
    use crate::lexer::Span;

    fn create(sql: &str) -> CreateSequenceStatement {
        match Parser::new(sql).parse_statement().unwrap() {
            Statement::CreateSequence(stmt) => stmt,
            other => panic!("expected create sequence, got {other:?}"),
        }
    }

    fn alter(sql: &str) -> AlterSequenceStatement {
        match Parser::new(sql).parse_statement().unwrap() {
            Statement::AlterSequence(stmt) => stmt,
            other => panic!("expected alter sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_create() {
        assert_eq!(create("CREATE SEQUENCE s"), CreateSequenceStatement::new("s"));
    }

    #[test]
    fn test_prefix_modifiers() {
        let stmt = create("CREATE UNLOGGED SEQUENCE IF NOT EXISTS app.s");
        assert!(stmt.unlogged && !stmt.temp && stmt.if_not_exists);
        assert_eq!(stmt.qname(), QName::qualified("app", "s"));
        assert!(create("create temporary sequence s").temp);
    }

    #[test]
    fn test_signed_values() {
        let stmt = create("CREATE SEQUENCE s INCREMENT -1 MINVALUE -100 MAXVALUE +5 START 0");
        assert_eq!(stmt.options.increment_by, Some(-1));
        assert_eq!(stmt.options.min_value, MinValue::Value(-100));
        assert_eq!(stmt.options.max_value, MaxValue::Value(5));
        assert_eq!(stmt.options.start_with, Some(0));
    }

    #[test]
    fn test_bigint_bounds() {
        let stmt = create(
            "CREATE SEQUENCE s AS bigint MINVALUE -9223372036854775808 \
             MAXVALUE 9223372036854775807 START -9223372036854775808",
        );
        assert_eq!(stmt.options.min_value, MinValue::Value(i64::MIN));
        assert_eq!(stmt.options.max_value, MaxValue::Value(i64::MAX));
        assert_eq!(stmt.options.start_with, Some(i64::MIN));

        let stmt = create("CREATE SEQUENCE s INCREMENT BY -9223372036854775808");
        assert_eq!(stmt.options.increment_by, Some(i64::MIN));
    }

    #[test]
    fn test_bigint_overflow_rejected() {
        for sql in [
            "CREATE SEQUENCE s MAXVALUE 9223372036854775808",
            "CREATE SEQUENCE s MINVALUE -9223372036854775809",
        ] {
            let err = Parser::new(sql).parse_statement().unwrap_err();
            assert_eq!(err.message, "Integer out of range for bigint", "{sql}");
            assert_eq!(err.span.end, sql.len(), "{sql}");
        }
    }

    #[test]
    fn test_as_type() {
        let stmt = create("CREATE SEQUENCE s AS integer");
        assert_eq!(stmt.options.as_type, Some(DataType::new("integer")));
    }

    #[test]
    fn test_owned_by_schema_qualified() {
        let stmt = create("CREATE SEQUENCE s OWNED BY public.tbl.col");
        assert_eq!(
            stmt.options.owned_by,
            OwnedBy::Column(OwnerColumn {
                schema: Some(String::from("public")),
                table: String::from("tbl"),
                column: String::from("col"),
            })
        );
    }

    #[test]
    fn test_owned_by_single_name_rejected() {
        let err = Parser::new("CREATE SEQUENCE s OWNED BY tbl")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.span, Span::new(27, 30));
    }

    #[test]
    fn test_no_requires_known_clause() {
        let err = Parser::new("CREATE SEQUENCE s NO CACHE")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("MINVALUE, MAXVALUE or CYCLE"));
    }

    #[test]
    fn test_minvalue_and_no_minvalue_conflict() {
        let err = Parser::new("CREATE SEQUENCE s MINVALUE 1 NO MINVALUE")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.message, "Duplicate MINVALUE clause");
    }

    #[test]
    fn test_alter_restart_forms() {
        let AlterSequenceChange::SetOptions(change) = alter("ALTER SEQUENCE s RESTART").change
        else {
            panic!("expected options");
        };
        assert_eq!(change.restart, Restart::Start);

        let AlterSequenceChange::SetOptions(change) =
            alter("ALTER SEQUENCE s INCREMENT BY 2 RESTART WITH 10").change
        else {
            panic!("expected options");
        };
        assert_eq!(change.restart, Restart::With(10));
        assert_eq!(change.options.increment_by, Some(2));

        let AlterSequenceChange::SetOptions(change) = alter("ALTER SEQUENCE s RESTART 3").change
        else {
            panic!("expected options");
        };
        assert_eq!(change.restart, Restart::With(3));
    }

    #[test]
    fn test_alter_other_changes() {
        let stmt = alter("ALTER SEQUENCE IF EXISTS s RENAME TO t");
        assert!(stmt.if_exists);
        assert_eq!(
            stmt.change,
            AlterSequenceChange::Rename {
                new_name: String::from("t")
            }
        );
        assert_eq!(
            alter("ALTER SEQUENCE s OWNER TO admin").change,
            AlterSequenceChange::OwnerTo {
                owner: String::from("admin")
            }
        );
        assert_eq!(
            alter("ALTER SEQUENCE s SET SCHEMA archive").change,
            AlterSequenceChange::SetSchema {
                new_schema: String::from("archive")
            }
        );
    }

    #[test]
    fn test_alter_requires_change() {
        assert!(Parser::new("ALTER SEQUENCE s").parse_statement().is_err());
        let err = Parser::new("ALTER SEQUENCE s SET LOGGED")
            .parse_statement()
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_drop() {
        let Statement::DropSequence(stmt) = Parser::new("DROP SEQUENCE IF EXISTS a, s.b CASCADE")
            .parse_statement()
            .unwrap()
        else {
            panic!("expected drop sequence");
        };
        assert!(stmt.if_exists);
        assert_eq!(stmt.names, vec![QName::new("a"), QName::qualified("s", "b")]);
        assert_eq!(stmt.cascade, Some(DropBehavior::Cascade));
    }
}
