//! Column descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::error::{ColumnError, ColumnResult};
use super::kind::ColumnKind;
use super::options::ColumnOptions;

/// An immutable column descriptor: kind, constraints and default policy.
///
/// Descriptors are only built through the factories below, which enforce
/// the nullable/default rule and derive the index flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColumnSpec", into = "ColumnSpec")]
pub struct Column {
    kind: ColumnKind,
    primary_key: bool,
    indexed: bool,
    nullable: bool,
    default_value: Option<Value>,
}

impl Column {
    /// Create a column of any kind.
    ///
    /// Serial columns are always primary keys: see [`Column::serial`].
    pub fn new(kind: ColumnKind, options: ColumnOptions) -> ColumnResult<Self> {
        let options = match kind {
            ColumnKind::Serial => ColumnOptions {
                primary_key: true,
                indexed: true,
                ..options
            },
            _ => options,
        };

        let options = options.normalize().map_err(|e| {
            debug!(kind = %kind, error = %e, "rejected column definition");
            e
        })?;

        debug!(
            kind = %kind,
            primary_key = options.primary_key,
            indexed = options.indexed,
            nullable = options.nullable,
            "defined column"
        );

        Ok(Self {
            kind,
            primary_key: options.primary_key,
            indexed: options.indexed,
            nullable: options.nullable,
            default_value: options.default_value,
        })
    }

    /// Create a VARCHAR column. `max_length` is not enforced when casting.
    pub fn varchar(max_length: u32, options: ColumnOptions) -> ColumnResult<Self> {
        Self::new(ColumnKind::Varchar { max_length }, options)
    }

    /// Create an INTEGER column.
    pub fn integer(options: ColumnOptions) -> ColumnResult<Self> {
        Self::new(ColumnKind::Integer, options)
    }

    /// Create a BOOLEAN column.
    pub fn boolean(options: ColumnOptions) -> ColumnResult<Self> {
        Self::new(ColumnKind::Boolean, options)
    }

    /// Create a SERIAL column.
    ///
    /// `primary_key` and `indexed` in `options` are ignored: a serial column
    /// is always an indexed primary key.
    pub fn serial(options: ColumnOptions) -> ColumnResult<Self> {
        Self::new(ColumnKind::Serial, options)
    }

    /// Get the column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Check if this column is the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Check if this column has an index.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Check if this column is nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Get the default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Get the SQL type keyword for CREATE TABLE.
    pub fn sql_type(&self) -> &'static str {
        self.kind.sql_type()
    }

    /// Try to cast an inbound value to this column's type.
    pub fn cast_host_value(&self, value: &Value) -> ColumnResult<Value> {
        self.kind.cast_host_value(value).map_err(|e| {
            trace!(kind = %self.kind, error = %e, "cast rejected");
            e
        })
    }

    /// Prepare a host value for the storage backend.
    pub fn to_db_representation(&self, value: &Value) -> Value {
        self.kind.to_db_representation(value)
    }

    /// Convert a stored value back into the host domain.
    pub fn from_db_representation(&self, value: &Value) -> ColumnResult<Value> {
        self.kind.from_db_representation(value)
    }

    /// Resolve the value to store for this column.
    ///
    /// Missing or null input falls back to the default, then to null for
    /// nullable and serial columns. Anything else is cast.
    pub fn resolve(&self, value: Option<&Value>) -> ColumnResult<Value> {
        match value {
            Some(v) if !v.is_null() => self.cast_host_value(v),
            _ => {
                if let Some(default) = &self.default_value {
                    return self.cast_host_value(default);
                }
                if self.nullable || self.kind == ColumnKind::Serial {
                    return Ok(Value::Null);
                }
                Err(ColumnError::data_type(&Value::Null, |v| {
                    format!("Value {v} given for non-nullable {} column", self.kind)
                }))
            }
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Name of a column kind in the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindName {
    Varchar,
    Integer,
    Boolean,
    Serial,
}

/// Flat serialized form of a [`Column`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    #[serde(rename = "type")]
    kind: KindName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
    #[serde(default)]
    primary_key: bool,
    #[serde(default)]
    indexed: bool,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnSpec {
    /// Rebuild the kind, checking that only varchar carries a length.
    fn column_kind(&self) -> ColumnResult<ColumnKind> {
        match (self.kind, self.max_length) {
            (KindName::Varchar, Some(max_length)) => Ok(ColumnKind::Varchar { max_length }),
            (KindName::Varchar, None) => Err(ColumnError::Configuration(
                "varchar column requires max_length".into(),
            )),
            (_, Some(_)) => Err(ColumnError::Configuration(format!(
                "max_length is only valid for varchar columns (got {:?})",
                self.kind
            ))),
            (KindName::Integer, None) => Ok(ColumnKind::Integer),
            (KindName::Boolean, None) => Ok(ColumnKind::Boolean),
            (KindName::Serial, None) => Ok(ColumnKind::Serial),
        }
    }
}

impl TryFrom<ColumnSpec> for Column {
    type Error = ColumnError;

    fn try_from(spec: ColumnSpec) -> ColumnResult<Self> {
        let kind = spec.column_kind()?;
        let options = ColumnOptions {
            primary_key: spec.primary_key,
            indexed: spec.indexed,
            nullable: spec.nullable,
            default_value: spec.default,
        };
        Column::new(kind, options)
    }
}

impl From<Column> for ColumnSpec {
    fn from(column: Column) -> Self {
        let kind = match column.kind {
            ColumnKind::Varchar { .. } => KindName::Varchar,
            ColumnKind::Integer => KindName::Integer,
            ColumnKind::Boolean => KindName::Boolean,
            ColumnKind::Serial => KindName::Serial,
        };
        Self {
            kind,
            max_length: column.kind.max_length(),
            primary_key: column.primary_key,
            indexed: column.indexed,
            nullable: column.nullable,
            default: column.default_value,
        }
    }
}
