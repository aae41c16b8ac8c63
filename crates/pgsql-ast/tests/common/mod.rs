#![allow(dead_code)]

use pgsql_ast::ast::{
    AlterSequenceStatement, CreateSequenceStatement, DeleteStatement, DropSequenceStatement, Expr,
    InsertStatement, SelectStatement, Statement, UpdateStatement,
};
use pgsql_ast::{ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    pgsql_ast::parse_statement(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    pgsql_ast::parse_statement(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_all(sql: &str) -> Vec<Statement> {
    Parser::new(sql)
        .parse_statements()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_expr(sql: &str) -> Expr {
    pgsql_ast::parse_expression(sql)
        .unwrap_or_else(|e| panic!("Failed to parse expression: {sql}\nError: {e:?}"))
}

pub fn parse_expr_err(sql: &str) -> ParseError {
    pgsql_ast::parse_expression(sql)
        .expect_err(&format!("Expected expression error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn parse_create_sequence(sql: &str) -> CreateSequenceStatement {
    match parse(sql) {
        Statement::CreateSequence(s) => s,
        other => panic!("Expected CREATE SEQUENCE, got {other:?}"),
    }
}

pub fn parse_alter_sequence(sql: &str) -> AlterSequenceStatement {
    match parse(sql) {
        Statement::AlterSequence(s) => s,
        other => panic!("Expected ALTER SEQUENCE, got {other:?}"),
    }
}

pub fn parse_drop_sequence(sql: &str) -> DropSequenceStatement {
    match parse(sql) {
        Statement::DropSequence(s) => s,
        other => panic!("Expected DROP SEQUENCE, got {other:?}"),
    }
}

/// Parses `sql` and returns the statement's wire representation.
pub fn json(sql: &str) -> serde_json::Value {
    serde_json::to_value(parse(sql)).expect("statement serializes")
}

/// Verifies that the wire representation of `sql` deserializes back into
/// the same statement.
pub fn json_round_trip(sql: &str) {
    let stmt = parse(sql);
    let value = serde_json::to_value(&stmt).expect("statement serializes");
    let back: Statement = serde_json::from_value(value.clone())
        .unwrap_or_else(|e| panic!("Failed to deserialize {value}\nError: {e}"));
    assert_eq!(stmt, back, "JSON round-trip failed for: {sql}");
}
