//! Token types for the SQL lexer.

use super::Span;

/// SQL keywords understood by the grammar.
///
/// Keywords are split into reserved words, which can never stand in for an
/// identifier, and non-reserved words, which the grammar recognises in
/// specific positions but which remain valid column, table or type names
/// everywhere else (Postgres treats `start`, `cycle` or `owned` this way).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Order,
    By,
    Group,
    Having,
    Limit,
    Offset,
    Distinct,
    All,
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,
    Using,

    // Set operations
    Union,
    Intersect,
    Except,

    // Data manipulation
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Default,
    Returning,

    // Expressions
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Ilike,
    Is,
    Null,
    True,
    False,
    Exists,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    As,

    // Data definition
    Create,
    Alter,
    Drop,
    Truncate,
    Table,
    Index,
    View,
    Schema,
    Sequence,
    Temp,
    Temporary,
    Unlogged,
    If,
    With,
    To,
    Rename,
    Owner,
    Cascade,
    Restrict,

    // Sequence options
    Start,
    Increment,
    Minvalue,
    Maxvalue,
    No,
    Cache,
    Cycle,
    Owned,
    None,
    Restart,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let keyword = match s.to_ascii_uppercase().as_str() {
            "SELECT" => Self::Select,
            "FROM" => Self::From,
            "WHERE" => Self::Where,
            "ORDER" => Self::Order,
            "BY" => Self::By,
            "GROUP" => Self::Group,
            "HAVING" => Self::Having,
            "LIMIT" => Self::Limit,
            "OFFSET" => Self::Offset,
            "DISTINCT" => Self::Distinct,
            "ALL" => Self::All,
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            "NULLS" => Self::Nulls,
            "FIRST" => Self::First,
            "LAST" => Self::Last,
            "JOIN" => Self::Join,
            "INNER" => Self::Inner,
            "LEFT" => Self::Left,
            "RIGHT" => Self::Right,
            "FULL" => Self::Full,
            "OUTER" => Self::Outer,
            "CROSS" => Self::Cross,
            "ON" => Self::On,
            "USING" => Self::Using,
            "UNION" => Self::Union,
            "INTERSECT" => Self::Intersect,
            "EXCEPT" => Self::Except,
            "INSERT" => Self::Insert,
            "INTO" => Self::Into,
            "VALUES" => Self::Values,
            "UPDATE" => Self::Update,
            "SET" => Self::Set,
            "DELETE" => Self::Delete,
            "DEFAULT" => Self::Default,
            "RETURNING" => Self::Returning,
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::Not,
            "IN" => Self::In,
            "BETWEEN" => Self::Between,
            "LIKE" => Self::Like,
            "ILIKE" => Self::Ilike,
            "IS" => Self::Is,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "EXISTS" => Self::Exists,
            "CASE" => Self::Case,
            "WHEN" => Self::When,
            "THEN" => Self::Then,
            "ELSE" => Self::Else,
            "END" => Self::End,
            "CAST" => Self::Cast,
            "AS" => Self::As,
            "CREATE" => Self::Create,
            "ALTER" => Self::Alter,
            "DROP" => Self::Drop,
            "TRUNCATE" => Self::Truncate,
            "TABLE" => Self::Table,
            "INDEX" => Self::Index,
            "VIEW" => Self::View,
            "SCHEMA" => Self::Schema,
            "SEQUENCE" => Self::Sequence,
            "TEMP" => Self::Temp,
            "TEMPORARY" => Self::Temporary,
            "UNLOGGED" => Self::Unlogged,
            "IF" => Self::If,
            "WITH" => Self::With,
            "TO" => Self::To,
            "RENAME" => Self::Rename,
            "OWNER" => Self::Owner,
            "CASCADE" => Self::Cascade,
            "RESTRICT" => Self::Restrict,
            "START" => Self::Start,
            "INCREMENT" => Self::Increment,
            "MINVALUE" => Self::Minvalue,
            "MAXVALUE" => Self::Maxvalue,
            "NO" => Self::No,
            "CACHE" => Self::Cache,
            "CYCLE" => Self::Cycle,
            "OWNED" => Self::Owned,
            "NONE" => Self::None,
            "RESTART" => Self::Restart,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Group => "GROUP",
            Self::Having => "HAVING",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Default => "DEFAULT",
            Self::Returning => "RETURNING",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Exists => "EXISTS",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::As => "AS",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Truncate => "TRUNCATE",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Schema => "SCHEMA",
            Self::Sequence => "SEQUENCE",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::Unlogged => "UNLOGGED",
            Self::If => "IF",
            Self::With => "WITH",
            Self::To => "TO",
            Self::Rename => "RENAME",
            Self::Owner => "OWNER",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Start => "START",
            Self::Increment => "INCREMENT",
            Self::Minvalue => "MINVALUE",
            Self::Maxvalue => "MAXVALUE",
            Self::No => "NO",
            Self::Cache => "CACHE",
            Self::Cycle => "CYCLE",
            Self::Owned => "OWNED",
            Self::None => "NONE",
            Self::Restart => "RESTART",
        }
    }

    /// Returns true if the keyword can never be used as a bare identifier.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Order
                | Self::Group
                | Self::Having
                | Self::Limit
                | Self::Offset
                | Self::Distinct
                | Self::All
                | Self::Asc
                | Self::Desc
                | Self::Join
                | Self::Inner
                | Self::Left
                | Self::Right
                | Self::Full
                | Self::Outer
                | Self::Cross
                | Self::On
                | Self::Using
                | Self::Union
                | Self::Intersect
                | Self::Except
                | Self::Into
                | Self::Default
                | Self::Returning
                | Self::And
                | Self::Or
                | Self::Not
                | Self::In
                | Self::Between
                | Self::Like
                | Self::Ilike
                | Self::Is
                | Self::Null
                | Self::True
                | Self::False
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::Cast
                | Self::As
                | Self::Create
                | Self::Table
                | Self::With
                | Self::To
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Numeric literal with a fraction or exponent (e.g., 3.14)
    Numeric(f64),
    /// String literal (e.g., 'hello')
    String(String),
    /// Positional parameter (e.g., $1)
    Parameter(u32),

    // Identifiers and keywords
    /// Identifier, already case-folded unless it was quoted
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ::
    DoubleColon,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Returns a short human-readable description, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(n) => format!("integer {n}"),
            Self::Numeric(n) => format!("number {n}"),
            Self::String(s) => format!("string '{s}'"),
            Self::Parameter(n) => format!("parameter ${n}"),
            Self::Identifier(name) => format!("identifier \"{name}\""),
            Self::Keyword(kw) => format!("keyword {}", kw.as_str()),
            Self::Eof => String::from("end of input"),
            Self::Error(message) => message.clone(),
            other => format!("'{}'", other.symbol()),
        }
    }

    /// Returns the source text of an operator or delimiter token.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::DoubleColon => "::",
            _ => "",
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token ends a statement (`;` or end of input).
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Semicolon)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
