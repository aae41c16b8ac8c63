//! SELECT, INSERT, UPDATE and DELETE.

use tracing::trace;

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Assignment, DeleteStatement, Expr, InsertSource, InsertStatement, JoinClause, JoinType,
    NullOrdering, OrderBy, OrderDirection, SelectColumn, SelectStatement, TableRef,
    UpdateStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a SELECT statement.
    pub(crate) fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.nested(Self::parse_select_body)
    }

    fn parse_select_body(&mut self) -> Result<SelectStatement, ParseError> {
        trace!("parsing SELECT");
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };

        let columns = self.parse_select_columns()?;

        // FROM clause (optional for expressions like SELECT 1+1)
        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_from_list()?)
        } else {
            None
        };

        let where_clause = self.parse_optional_where()?;

        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };

        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };

        let offset = if self.eat_keyword(Keyword::Offset) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };

        if matches!(
            self.current().as_keyword(),
            Some(Keyword::Union | Keyword::Intersect | Keyword::Except)
        ) {
            return Err(ParseError::unsupported(
                format!(
                    "{} queries are not supported",
                    self.current().kind.describe().trim_start_matches("keyword ")
                ),
                self.current().span,
            ));
        }

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            offset,
        })
    }

    /// Parses a SELECT list or RETURNING list.
    fn parse_select_columns(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        let mut columns = vec![];

        loop {
            let expr = self.parse_expr_bp(0)?;

            // AS name, or a bare identifier
            let alias = if self.eat_keyword(Keyword::As) {
                Some(self.expect_identifier()?)
            } else if matches!(&self.current().kind, TokenKind::Identifier(_)) {
                Some(self.expect_identifier()?)
            } else {
                None
            };

            columns.push(SelectColumn { expr, alias });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(columns)
    }

    /// Parses a FROM list. `FROM a, b` is a cross join.
    fn parse_from_list(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = self.parse_table_ref()?;
        while self.eat(&TokenKind::Comma) {
            let table = self.parse_table_ref()?;
            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type: JoinType::Cross,
                    table,
                    on: None,
                    using: vec![],
                }),
            };
        }
        Ok(table_ref)
    }

    /// Parses a table reference followed by any number of joins.
    pub(crate) fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = self.parse_table_factor()?;

        while self.is_join_keyword() {
            let join_type = self.parse_join_type()?;
            let table = self.parse_table_factor()?;

            let (on, using) = if join_type == JoinType::Cross {
                (None, vec![])
            } else if self.eat_keyword(Keyword::On) {
                (Some(self.parse_expr_bp(0)?), vec![])
            } else if self.eat_keyword(Keyword::Using) {
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                (None, cols)
            } else {
                return Err(ParseError::unexpected("ON or USING", self.current()));
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table,
                    on,
                    using,
                }),
            };
        }

        Ok(table_ref)
    }

    /// Parses a table name, a parenthesized table reference, or a subquery.
    fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            let table = self.parse_qname()?;
            let alias = self.parse_optional_alias()?;
            return Ok(TableRef::Table { table, alias });
        }

        if !self.check_keyword(Keyword::Select) {
            let inner = self.nested(Self::parse_table_ref)?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        let query = self.parse_select_statement()?;
        self.expect(&TokenKind::RightParen)?;
        match self.parse_optional_alias()? {
            Some(alias) => Ok(TableRef::Subquery {
                query: Box::new(query),
                alias,
            }),
            None => Err(ParseError::new(
                "Subquery in FROM must have an alias",
                self.current().span,
            )),
        }
    }

    /// Checks if current token starts a join.
    fn is_join_keyword(&self) -> bool {
        matches!(
            self.current().as_keyword(),
            Some(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses a join type.
    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        let token = self.advance();
        let join_type = match token.as_keyword() {
            Some(Keyword::Join) => return Ok(JoinType::Inner),
            Some(Keyword::Inner) => JoinType::Inner,
            Some(Keyword::Left) => JoinType::Left,
            Some(Keyword::Right) => JoinType::Right,
            Some(Keyword::Full) => JoinType::Full,
            Some(Keyword::Cross) => JoinType::Cross,
            _ => return Err(ParseError::unexpected("JOIN", &token)),
        };
        if matches!(join_type, JoinType::Left | JoinType::Right | JoinType::Full) {
            self.eat_keyword(Keyword::Outer);
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(join_type)
    }

    /// Parses an optional alias: `AS name`, or a bare identifier.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            Ok(Some(self.expect_identifier()?))
        } else if matches!(&self.current().kind, TokenKind::Identifier(_)) {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_optional_where(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.eat_keyword(Keyword::Where) {
            Ok(Some(self.parse_expr_bp(0)?))
        } else {
            Ok(None)
        }
    }

    fn parse_optional_returning(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        if self.eat_keyword(Keyword::Returning) {
            self.parse_select_columns()
        } else {
            Ok(vec![])
        }
    }

    /// Parses an ORDER BY list.
    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];
        loop {
            let by = self.parse_expr_bp(0)?;
            let order = if self.eat_keyword(Keyword::Desc) {
                OrderDirection::Desc
            } else {
                self.eat_keyword(Keyword::Asc);
                OrderDirection::Asc
            };

            let nulls = if self.eat_keyword(Keyword::Nulls) {
                if self.eat_keyword(Keyword::First) {
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };

            items.push(OrderBy { by, order, nulls });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses an INSERT statement.
    pub(crate) fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        trace!("parsing INSERT");
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let into = self.parse_qname()?;

        // Column list (optional)
        let columns = if self.eat(&TokenKind::LeftParen) {
            let cols = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen)?;
            cols
        } else {
            vec![]
        };

        // VALUES, SELECT, or DEFAULT VALUES
        let values = if self.eat_keyword(Keyword::Values) {
            let mut rows = vec![];
            loop {
                self.expect(&TokenKind::LeftParen)?;
                rows.push(self.parse_expression_list()?);
                self.expect(&TokenKind::RightParen)?;
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) {
            InsertSource::Query(Box::new(self.parse_select_statement()?))
        } else if self.eat_keyword(Keyword::Default) {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else {
            return Err(ParseError::unexpected(
                "VALUES, SELECT, or DEFAULT VALUES",
                self.current(),
            ));
        };

        let returning = self.parse_optional_returning()?;

        Ok(InsertStatement {
            into,
            columns,
            values,
            returning,
        })
    }

    /// Parses an UPDATE statement.
    pub(crate) fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        trace!("parsing UPDATE");
        self.expect_keyword(Keyword::Update)?;

        let table = self.parse_qname()?;
        let alias = self.parse_optional_alias()?;

        self.expect_keyword(Keyword::Set)?;

        let mut sets = vec![];
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr_bp(0)?;
            sets.push(Assignment { column, value });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        // FROM clause (optional, for joins)
        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_from_list()?)
        } else {
            None
        };

        let where_clause = self.parse_optional_where()?;
        let returning = self.parse_optional_returning()?;

        Ok(UpdateStatement {
            table,
            alias,
            sets,
            from,
            where_clause,
            returning,
        })
    }

    /// Parses a DELETE statement.
    pub(crate) fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        trace!("parsing DELETE");
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let from = self.parse_qname()?;
        let alias = self.parse_optional_alias()?;
        let where_clause = self.parse_optional_where()?;
        let returning = self.parse_optional_returning()?;

        Ok(DeleteStatement {
            from,
            alias,
            where_clause,
            returning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, QName, Statement};
    use crate::parser::ParseErrorKind;

    fn parse(sql: &str) -> Statement {
        Parser::new(sql).parse_statement().unwrap()
    }

    #[test]
    fn test_simple_select() {
        let Statement::Select(select) = parse("SELECT id, name AS n FROM users") else {
            panic!("expected select");
        };
        assert_eq!(select.columns.len(), 2);
        assert_eq!(select.columns[1].alias.as_deref(), Some("n"));
        assert_eq!(select.from, Some(TableRef::table("users")));
    }

    #[test]
    fn test_select_with_where() {
        let Statement::Select(select) = parse("SELECT * FROM users WHERE id = 1") else {
            panic!("expected select");
        };
        assert_eq!(select.columns[0].expr, Expr::reference("*"));
        assert_eq!(
            select.where_clause,
            Some(Expr::reference("id").eq(Expr::integer(1)))
        );
    }

    #[test]
    fn test_select_with_join() {
        let Statement::Select(select) =
            parse("SELECT u.id FROM public.users u LEFT OUTER JOIN orders o ON u.id = o.user_id")
        else {
            panic!("expected select");
        };
        let Some(TableRef::Join { left, join }) = select.from else {
            panic!("expected join");
        };
        assert_eq!(
            *left,
            TableRef::Table {
                table: QName::qualified("public", "users"),
                alias: Some(String::from("u")),
            }
        );
        assert_eq!(join.join_type, JoinType::Left);
        assert!(join.on.is_some());
    }

    #[test]
    fn test_comma_join_and_using() {
        let Statement::Select(select) = parse("SELECT 1 FROM a, b JOIN c USING (id)") else {
            panic!("expected select");
        };
        let Some(TableRef::Join { left, join }) = select.from else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, JoinType::Cross);
        assert!(matches!(join.table, TableRef::Join { .. }));
        assert_eq!(*left, TableRef::table("a"));
    }

    #[test]
    fn test_subquery_requires_alias() {
        assert!(matches!(
            parse("SELECT x FROM (SELECT 1 AS x) sub"),
            Statement::Select(SelectStatement {
                from: Some(TableRef::Subquery { .. }),
                ..
            })
        ));
        assert!(Parser::new("SELECT x FROM (SELECT 1 AS x)")
            .parse_statement()
            .is_err());
    }

    #[test]
    fn test_select_clauses() {
        let Statement::Select(select) = parse(
            "SELECT DISTINCT dept, count(*) FROM emp GROUP BY dept HAVING count(*) > 1 \
             ORDER BY dept DESC NULLS LAST LIMIT 10 OFFSET 5",
        ) else {
            panic!("expected select");
        };
        assert!(select.distinct);
        assert_eq!(select.group_by, vec![Expr::reference("dept")]);
        assert!(select.having.is_some());
        assert_eq!(select.order_by[0].order, OrderDirection::Desc);
        assert_eq!(select.order_by[0].nulls, Some(NullOrdering::Last));
        assert_eq!(select.limit, Some(Expr::integer(10)));
        assert_eq!(select.offset, Some(Expr::integer(5)));
    }

    #[test]
    fn test_set_operations_unsupported() {
        let err = Parser::new("SELECT 1 UNION SELECT 2")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unsupported);
        assert_eq!(err.message, "UNION queries are not supported");
    }

    #[test]
    fn test_insert_values() {
        let Statement::Insert(insert) =
            parse("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b') RETURNING id")
        else {
            panic!("expected insert");
        };
        assert_eq!(insert.into, QName::new("users"));
        assert_eq!(insert.columns, vec!["id", "name"]);
        assert!(matches!(&insert.values, InsertSource::Values(rows) if rows.len() == 2));
        assert_eq!(insert.returning.len(), 1);
    }

    #[test]
    fn test_insert_select_and_default_values() {
        assert!(matches!(
            parse("INSERT INTO t SELECT * FROM s"),
            Statement::Insert(InsertStatement {
                values: InsertSource::Query(_),
                ..
            })
        ));
        assert!(matches!(
            parse("INSERT INTO t DEFAULT VALUES"),
            Statement::Insert(InsertStatement {
                values: InsertSource::DefaultValues,
                ..
            })
        ));
    }

    #[test]
    fn test_update() {
        let Statement::Update(update) =
            parse("UPDATE users u SET name = 'x', age = age + 1 WHERE id = $1")
        else {
            panic!("expected update");
        };
        assert_eq!(update.alias.as_deref(), Some("u"));
        assert_eq!(update.sets.len(), 2);
        assert!(matches!(
            &update.sets[1].value,
            Expr::Binary(b) if b.op == BinaryOp::Add
        ));
        assert!(update.where_clause.is_some());
    }

    #[test]
    fn test_delete() {
        let Statement::Delete(delete) = parse("DELETE FROM users WHERE id = 1 RETURNING *") else {
            panic!("expected delete");
        };
        assert_eq!(delete.from, QName::new("users"));
        assert!(delete.where_clause.is_some());
        assert_eq!(delete.returning[0].expr, Expr::reference("*"));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let err = Parser::new("DELETE FROM users WHERE id = 1 2")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("end of statement"));
    }
}
