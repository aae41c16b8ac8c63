//! Expression AST types.

use serde::{Deserialize, Serialize};

use super::{DataType, QName, SelectStatement};

/// A constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// Integer literal.
    Integer(i64),
    /// Numeric literal.
    Numeric(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

/// A typed constant (`literal` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// The constant.
    pub value: LiteralValue,
}

/// A column reference (`ref` node), optionally qualified.
///
/// `name` is `*` for `tbl.*` and bare `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprRef {
    /// Table (and schema) qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<QName>,
    /// Column name.
    pub name: String,
}

/// A positional parameter (`$1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter text, including the `$`.
    pub name: String,
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical NOT
    #[serde(rename = "NOT")]
    Not,
    /// Negation (-)
    #[serde(rename = "-")]
    Neg,
    /// Identity (+)
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
    #[serde(rename = "IS TRUE")]
    IsTrue,
    #[serde(rename = "IS NOT TRUE")]
    IsNotTrue,
    #[serde(rename = "IS FALSE")]
    IsFalse,
    #[serde(rename = "IS NOT FALSE")]
    IsNotFalse,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::IsTrue => "IS TRUE",
            Self::IsNotTrue => "IS NOT TRUE",
            Self::IsFalse => "IS FALSE",
            Self::IsNotFalse => "IS NOT FALSE",
        }
    }

    /// Returns true for operators written after their operand (`x IS NULL`).
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        !matches!(self, Self::Not | Self::Neg | Self::Plus)
    }
}

/// A unary expression (`unary` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    /// Operator.
    pub op: UnaryOp,
    /// Operand.
    pub operand: Box<Expr>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "^")]
    Pow,

    // Comparison
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,

    // Logical
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,

    // String
    #[serde(rename = "||")]
    Concat,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "ILIKE")]
    ILike,
    #[serde(rename = "NOT ILIKE")]
    NotILike,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
        }
    }
}

/// A binary expression (`binary` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    /// Left operand.
    pub left: Box<Expr>,
    /// Operator.
    pub op: BinaryOp,
    /// Right operand.
    pub right: Box<Expr>,
}

/// Three-operand operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TernaryOp {
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "NOT BETWEEN")]
    NotBetween,
}

/// `value [NOT] BETWEEN lo AND hi` (`ternary` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryExpr {
    /// Operator.
    pub op: TernaryOp,
    /// The tested value.
    pub value: Box<Expr>,
    /// Lower bound.
    pub lo: Box<Expr>,
    /// Upper bound.
    pub hi: Box<Expr>,
}

/// `operand [NOT] IN (a, b, ...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InListExpr {
    pub operand: Box<Expr>,
    pub list: Vec<Expr>,
    #[serde(default)]
    pub negated: bool,
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    /// The function name.
    pub function: QName,
    /// The arguments. `count(*)` carries a single `*` reference.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub distinct: bool,
}

/// `CAST(operand AS to)` or `operand::to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub operand: Box<Expr>,
    pub to: DataType,
}

/// One `WHEN .. THEN ..` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    pub when: Expr,
    pub value: Expr,
}

/// `CASE [value] WHEN .. THEN .. [ELSE ..] END`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    /// Operand of a simple CASE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<Expr>>,
    /// WHEN/THEN arms, in source order.
    pub whens: Vec<WhenClause>,
    /// ELSE arm.
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_value: Option<Box<Expr>>,
}

/// An SQL expression.
///
/// The variant set is closed: adding a kind here breaks every exhaustive
/// `match` in [`crate::visitor`] until the new kind is traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// A column reference.
    #[serde(rename = "ref")]
    Ref(ExprRef),
    /// A constant.
    #[serde(rename = "literal")]
    Literal(Literal),
    /// A positional parameter.
    #[serde(rename = "parameter")]
    Parameter(Parameter),
    /// A unary expression.
    #[serde(rename = "unary")]
    Unary(UnaryExpr),
    /// A binary expression.
    #[serde(rename = "binary")]
    Binary(BinaryExpr),
    /// BETWEEN expression.
    #[serde(rename = "ternary")]
    Ternary(TernaryExpr),
    /// IN list expression.
    #[serde(rename = "in list")]
    InList(InListExpr),
    /// A function call.
    #[serde(rename = "call")]
    Call(CallExpr),
    /// A type cast.
    #[serde(rename = "cast")]
    Cast(CastExpr),
    /// CASE expression.
    #[serde(rename = "case")]
    Case(CaseExpr),
    /// A scalar subquery.
    #[serde(rename = "select")]
    Select(Box<SelectStatement>),
}

impl Expr {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(ExprRef {
            table: None,
            name: name.into(),
        })
    }

    /// Creates a table-qualified column reference.
    #[must_use]
    pub fn qualified_reference(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Ref(ExprRef {
            table: Some(QName::new(table)),
            name: name.into(),
        })
    }

    /// Creates a literal expression.
    #[must_use]
    pub const fn literal(value: LiteralValue) -> Self {
        Self::Literal(Literal { value })
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::literal(LiteralValue::Integer(value))
    }

    /// Creates a numeric literal.
    #[must_use]
    pub const fn numeric(value: f64) -> Self {
        Self::literal(LiteralValue::Numeric(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(LiteralValue::String(value.into()))
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::literal(LiteralValue::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::literal(LiteralValue::Null)
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
        })
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary(BinaryExpr {
            left: Box::new(self),
            op,
            right: Box::new(right),
        })
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Wraps the expression in `NOT`.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// Returns the node kind, as written in the `type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ref(_) => "ref",
            Self::Literal(_) => "literal",
            Self::Parameter(_) => "parameter",
            Self::Unary(_) => "unary",
            Self::Binary(_) => "binary",
            Self::Ternary(_) => "ternary",
            Self::InList(_) => "in list",
            Self::Call(_) => "call",
            Self::Cast(_) => "cast",
            Self::Case(_) => "case",
            Self::Select(_) => "select",
        }
    }
}
