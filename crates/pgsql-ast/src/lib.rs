//! # pgsql-ast
//!
//! A Postgres-flavoured SQL parser producing a typed AST, plus a visitor
//! framework for analysing and rewriting that AST.
//!
//! This crate provides:
//! - A hand-written lexer that turns SQL text into a span-carrying token stream
//! - A recursive descent statement parser with Pratt expression parsing
//! - An AST whose serde representation is a stable, tagged JSON shape
//! - Read-only and mutable visitors with default structural recursion
//!
//! ## Parsing
//!
//! Optional clauses can appear in any order, and clauses with a negated form
//! keep all three states apart:
//!
//! ```rust
//! use pgsql_ast::ast::{Cycle, MinValue, Statement};
//! use pgsql_ast::parse_statement;
//!
//! let stmt = parse_statement("CREATE SEQUENCE s NO MINVALUE CYCLE CACHE 5").unwrap();
//! let Statement::CreateSequence(seq) = stmt else { unreachable!() };
//! assert_eq!(seq.options.min_value, MinValue::NoMinValue);
//! assert_eq!(seq.options.cycle, Cycle::Cycle);
//! assert_eq!(seq.options.cache, Some(5));
//! ```
//!
//! ## Errors
//!
//! Malformed input is a syntax error. Input that is valid SQL but outside the
//! modelled dialect is reported separately:
//!
//! ```rust
//! use pgsql_ast::{parse_statement, ParseErrorKind};
//!
//! let err = parse_statement("CREATE SEQUENCE s CACHE 1 bogus").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::Syntax);
//!
//! let err = parse_statement("CREATE TABLE t (id int)").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::Unsupported);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod visitor;

pub use ast::{Expr, Statement};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{parse, parse_expression, parse_statement, ParseError, ParseErrorKind, Parser};
pub use visitor::{Visit, VisitMut, Visitor, VisitorMut};
