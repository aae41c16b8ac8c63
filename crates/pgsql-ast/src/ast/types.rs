//! Names and data types shared by expressions and statements.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A possibly schema-qualified name (`public.users`, `lower`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    /// The unqualified name.
    pub name: String,
    /// Schema qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl QName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema.into()),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A data type reference such as `bigint`, `varchar(20)` or `numeric(10, 2)`.
///
/// Postgres types are an open set (extensions and user-defined types), so the
/// type is kept by name. Multi-word spellings are normalised to their
/// canonical lower-case form (`double precision`, `character varying`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// Lower-case type name.
    #[serde(rename = "type")]
    pub name: String,
    /// Type modifiers (length, precision and scale).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<i64>,
}

impl DataType {
    /// Creates a data type without modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Vec::new(),
        }
    }

    /// Creates a data type with modifiers.
    #[must_use]
    pub fn with_config(name: impl Into<String>, config: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        if self.config.is_empty() {
            return self.name.clone();
        }
        let config: Vec<String> = self.config.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, config.join(", "))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
