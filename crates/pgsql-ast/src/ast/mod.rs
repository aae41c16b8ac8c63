//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node serializes to the JSON shape consumers of the parser rely on:
//! a `type` discriminant, camelCase field names, and absent optional fields
//! omitted rather than written as `null`.

mod expression;
mod sequence;
mod statement;
mod types;

pub use expression::{
    BinaryExpr, BinaryOp, CallExpr, CaseExpr, CastExpr, Expr, ExprRef, InListExpr, Literal,
    LiteralValue, Parameter, TernaryExpr, TernaryOp, UnaryExpr, UnaryOp, WhenClause,
};
pub use sequence::{
    AlterSequenceChange, AlterSequenceOptions, AlterSequenceStatement, CreateSequenceStatement,
    Cycle, DropBehavior, DropSequenceStatement, MaxValue, MinValue, OwnedBy, OwnerColumn, Restart,
    SequenceOptions,
};
pub use statement::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, JoinClause, JoinType,
    NullOrdering, OrderBy, OrderDirection, SelectColumn, SelectStatement, Statement, TableRef,
    UpdateStatement,
};
pub use types::{DataType, QName};
