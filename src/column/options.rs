//! Construction options shared by every column kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ColumnError, ColumnResult};

/// The four options a column is declared with.
///
/// Defaults match a plain nullable column: not a primary key, not indexed,
/// nullable, no default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnOptions {
    /// Column participates in the table's primary key.
    pub primary_key: bool,
    /// Column has a database index. Forced on for primary keys.
    pub indexed: bool,
    /// Column may hold null.
    pub nullable: bool,
    /// Value substituted when none is supplied.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            primary_key: false,
            indexed: false,
            nullable: true,
            default_value: None,
        }
    }
}

impl ColumnOptions {
    /// Options for a plain nullable column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the column as (part of) the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Request a database index.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Set nullability.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Shorthand for `nullable(false)`.
    pub fn not_null(self) -> Self {
        self.nullable(false)
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Check the nullable/default rule and derive the final flags.
    ///
    /// A nullable column must not carry a default. A null default counts as
    /// no default. Primary keys are always indexed.
    pub(crate) fn normalize(mut self) -> ColumnResult<Self> {
        if matches!(self.default_value, Some(Value::Null)) {
            self.default_value = None;
        }

        if self.nullable {
            if let Some(default) = &self.default_value {
                return Err(ColumnError::Configuration(format!(
                    "nullable column cannot declare a default value (got {})",
                    default
                )));
            }
        }

        if self.primary_key {
            self.indexed = true;
        }

        Ok(self)
    }
}
