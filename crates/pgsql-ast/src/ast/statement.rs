//! SQL statement AST types.

use serde::{Deserialize, Serialize};

use super::expression::Expr;
use super::sequence::{AlterSequenceStatement, CreateSequenceStatement, DropSequenceStatement};
use super::QName;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order.
    #[serde(rename = "DESC")]
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullOrdering {
    /// NULLs come first.
    #[serde(rename = "NULLS FIRST")]
    First,
    /// NULLs come last.
    #[serde(rename = "NULLS LAST")]
    Last,
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The expression to order by.
    pub by: Expr,
    /// The direction (ASC or DESC).
    #[serde(default)]
    pub order: OrderDirection,
    /// Null ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nulls: Option<NullOrdering>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    #[serde(rename = "INNER JOIN")]
    Inner,
    #[serde(rename = "LEFT JOIN")]
    Left,
    #[serde(rename = "RIGHT JOIN")]
    Right,
    #[serde(rename = "FULL JOIN")]
    Full,
    #[serde(rename = "CROSS JOIN")]
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableRef,
    /// The join condition (for non-CROSS joins).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<Expr>,
    /// USING columns (alternative to ON).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub using: Vec<String>,
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TableRef {
    /// A named table.
    Table {
        /// Table name.
        table: QName,
        /// Alias.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// A subquery in FROM (alias required).
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: String,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            table: QName::new(name),
            alias: None,
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub distinct: bool,
    /// The selected columns.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TableRef>,
    /// The WHERE clause.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Expr>,
    /// OFFSET clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Expr>,
}

/// A column in a SELECT list or RETURNING clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    /// Target table.
    pub into: QName,
    /// Column names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Values to insert.
    pub values: InsertSource,
    /// RETURNING clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returning: Vec<SelectColumn>,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    /// Target table.
    pub table: QName,
    /// Alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// SET assignments.
    pub sets: Vec<Assignment>,
    /// FROM clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TableRef>,
    /// WHERE clause.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expr>,
    /// RETURNING clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returning: Vec<SelectColumn>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    /// Target table.
    pub from: QName,
    /// Alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// WHERE clause.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expr>,
    /// RETURNING clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returning: Vec<SelectColumn>,
}

/// A SQL statement.
///
/// Like [`Expr`], the variant set is closed and every traversal in
/// [`crate::visitor`] matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// SELECT statement.
    #[serde(rename = "select")]
    Select(SelectStatement),
    /// INSERT statement.
    #[serde(rename = "insert")]
    Insert(InsertStatement),
    /// UPDATE statement.
    #[serde(rename = "update")]
    Update(UpdateStatement),
    /// DELETE statement.
    #[serde(rename = "delete")]
    Delete(DeleteStatement),
    /// CREATE SEQUENCE statement.
    #[serde(rename = "create sequence")]
    CreateSequence(CreateSequenceStatement),
    /// ALTER SEQUENCE statement.
    #[serde(rename = "alter sequence")]
    AlterSequence(AlterSequenceStatement),
    /// DROP SEQUENCE statement.
    #[serde(rename = "drop sequence")]
    DropSequence(DropSequenceStatement),
}

impl Statement {
    /// Returns the statement kind, as written in the `type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::CreateSequence(_) => "create sequence",
            Self::AlterSequence(_) => "alter sequence",
            Self::DropSequence(_) => "drop sequence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::default(), OrderDirection::Asc);
        assert_eq!(OrderDirection::Desc.as_str(), "DESC");
    }

    #[test]
    fn test_join_type() {
        assert_eq!(JoinType::Inner.as_str(), "INNER JOIN");
        assert_eq!(JoinType::Cross.as_str(), "CROSS JOIN");
    }

    #[test]
    fn test_select_serializes_sparse() {
        let select = SelectStatement {
            columns: vec![SelectColumn {
                expr: Expr::reference("id"),
                alias: None,
            }],
            from: Some(TableRef::table("users")),
            ..SelectStatement::default()
        };
        let json = serde_json::to_value(Statement::Select(select)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "select",
                "columns": [{ "expr": { "type": "ref", "name": "id" } }],
                "from": { "type": "table", "table": { "name": "users" } }
            })
        );
    }
}
