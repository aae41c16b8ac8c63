//! Sequence DDL statements.
//!
//! Clauses with a negated form are tri-state. "Not written", "written in its
//! negative form" and "written with a value" are three distinct variants, and
//! the unspecified variant is left out of the serialized node entirely.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{DataType, QName};

/// `MINVALUE n` / `NO MINVALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MinValue {
    /// Clause absent.
    #[default]
    #[serde(skip)]
    Unspecified,
    /// `NO MINVALUE`.
    #[serde(rename = "no minvalue")]
    NoMinValue,
    /// `MINVALUE n`.
    #[serde(untagged)]
    Value(i64),
}

impl MinValue {
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// `MAXVALUE n` / `NO MAXVALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaxValue {
    /// Clause absent.
    #[default]
    #[serde(skip)]
    Unspecified,
    /// `NO MAXVALUE`.
    #[serde(rename = "no maxvalue")]
    NoMaxValue,
    /// `MAXVALUE n`.
    #[serde(untagged)]
    Value(i64),
}

impl MaxValue {
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// `CYCLE` / `NO CYCLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cycle {
    /// Clause absent.
    #[default]
    #[serde(skip)]
    Unspecified,
    #[serde(rename = "cycle")]
    Cycle,
    #[serde(rename = "no cycle")]
    NoCycle,
}

impl Cycle {
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// The column a sequence is attached to by `OWNED BY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerColumn {
    /// Schema of the owning table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Owning table.
    pub table: String,
    /// Owning column.
    pub column: String,
}

/// `OWNED BY table.column` / `OWNED BY NONE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OwnedBy {
    /// Clause absent.
    #[default]
    #[serde(skip)]
    Unspecified,
    /// `OWNED BY NONE`: explicitly detached from any column.
    #[serde(rename = "none")]
    None,
    /// `OWNED BY [schema.]table.column`.
    #[serde(untagged)]
    Column(OwnerColumn),
}

impl OwnedBy {
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// `RESTART` / `RESTART [WITH] n`, only valid in ALTER SEQUENCE.
///
/// Serialized as `true` for a bare `RESTART` and as the number otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Restart {
    /// Clause absent.
    #[default]
    Unspecified,
    /// Bare `RESTART`: back to the start value.
    Start,
    /// `RESTART WITH n`.
    With(i64),
}

impl Restart {
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl Serialize for Restart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unspecified => serializer.serialize_none(),
            Self::Start => serializer.serialize_bool(true),
            Self::With(n) => serializer.serialize_i64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Restart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Value(i64),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Self::Unspecified),
            Some(Repr::Flag(true)) => Ok(Self::Start),
            Some(Repr::Flag(false)) => Err(D::Error::custom(
                "restart must be true or an integer, omit it when unspecified",
            )),
            Some(Repr::Value(n)) => Ok(Self::With(n)),
        }
    }
}

/// The unordered option bag shared by CREATE SEQUENCE and ALTER SEQUENCE.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceOptions {
    /// `AS type`.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_type: Option<DataType>,
    /// `START [WITH] n`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<i64>,
    /// `INCREMENT [BY] n`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_by: Option<i64>,
    #[serde(default, skip_serializing_if = "MinValue::is_unspecified")]
    pub min_value: MinValue,
    #[serde(default, skip_serializing_if = "MaxValue::is_unspecified")]
    pub max_value: MaxValue,
    /// `CACHE n`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<i64>,
    #[serde(default, skip_serializing_if = "Cycle::is_unspecified")]
    pub cycle: Cycle,
    #[serde(default, skip_serializing_if = "OwnedBy::is_unspecified")]
    pub owned_by: OwnedBy,
}

/// `CREATE [TEMP|UNLOGGED] SEQUENCE [IF NOT EXISTS] [schema.]name [options]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSequenceStatement {
    /// Sequence name.
    pub name: String,
    /// Schema qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// `TEMP` / `TEMPORARY`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub temp: bool,
    /// `UNLOGGED`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unlogged: bool,
    /// `IF NOT EXISTS`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub if_not_exists: bool,
    /// Optional clauses, in no particular order in the source.
    #[serde(flatten)]
    pub options: SequenceOptions,
}

impl CreateSequenceStatement {
    /// Creates a bare `CREATE SEQUENCE name` statement.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            temp: false,
            unlogged: false,
            if_not_exists: false,
            options: SequenceOptions::default(),
        }
    }

    /// Returns the (possibly qualified) sequence name.
    #[must_use]
    pub fn qname(&self) -> QName {
        QName {
            name: self.name.clone(),
            schema: self.schema.clone(),
        }
    }
}

/// The option bag of `ALTER SEQUENCE`, which additionally accepts `RESTART`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlterSequenceOptions {
    #[serde(flatten)]
    pub options: SequenceOptions,
    /// `RESTART [WITH n]`.
    #[serde(default, skip_serializing_if = "Restart::is_unspecified")]
    pub restart: Restart,
}

/// What an ALTER SEQUENCE statement changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AlterSequenceChange {
    /// Any combination of sequence options.
    #[serde(rename = "set options")]
    SetOptions(AlterSequenceOptions),
    /// `RENAME TO new_name`.
    #[serde(rename = "rename", rename_all = "camelCase")]
    Rename { new_name: String },
    /// `OWNER TO role`.
    #[serde(rename = "owner to")]
    OwnerTo { owner: String },
    /// `SET SCHEMA new_schema`.
    #[serde(rename = "set schema", rename_all = "camelCase")]
    SetSchema { new_schema: String },
}

/// `ALTER SEQUENCE [IF EXISTS] [schema.]name change`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterSequenceStatement {
    /// Sequence name.
    pub name: String,
    /// Schema qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// `IF EXISTS`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub if_exists: bool,
    /// The change applied.
    pub change: AlterSequenceChange,
}

/// `CASCADE` / `RESTRICT` on DROP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

/// `DROP SEQUENCE [IF EXISTS] name [, ...] [CASCADE | RESTRICT]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropSequenceStatement {
    /// Dropped sequences, in source order.
    pub names: Vec<QName>,
    /// `IF EXISTS`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub if_exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<DropBehavior>,
}
