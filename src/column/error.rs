//! Column error types.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for column operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Errors raised while building column descriptors or casting values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnError {
    /// the column options are inconsistent (schema definition mistake)
    #[error("invalid column configuration: {0}")]
    Configuration(String),

    /// a value could not be coerced into the column's domain
    #[error("{message}")]
    DataType { value: Value, message: String },
}

impl ColumnError {
    /// Build a data type error for `value`.
    ///
    /// `describe` receives the raw rendering of the value so every message
    /// names the offending input.
    pub(crate) fn data_type(value: &Value, describe: impl FnOnce(&str) -> String) -> Self {
        ColumnError::DataType {
            value: value.clone(),
            message: describe(&raw(value)),
        }
    }

    /// check if this error comes from column construction
    pub fn is_configuration(&self) -> bool {
        matches!(self, ColumnError::Configuration(_))
    }

    /// check if this error comes from casting a value
    pub fn is_data_type(&self) -> bool {
        matches!(self, ColumnError::DataType { .. })
    }

    /// check if the caller can recover by supplying a different value
    pub fn is_recoverable(&self) -> bool {
        self.is_data_type()
    }

    /// the value that failed to cast, if any
    pub fn offending_value(&self) -> Option<&Value> {
        match self {
            ColumnError::DataType { value, .. } => Some(value),
            ColumnError::Configuration(_) => None,
        }
    }
}

/// Render a value the way a user typed it: strings without JSON quotes.
pub(crate) fn raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_classification() {
        let config = ColumnError::Configuration("nullable column with default".into());
        assert!(config.is_configuration());
        assert!(!config.is_recoverable());
        assert_eq!(config.offending_value(), None);

        let cast = ColumnError::data_type(&json!("abc"), |v| format!("Value {v} is not integer"));
        assert!(cast.is_data_type());
        assert!(cast.is_recoverable());
        assert_eq!(cast.offending_value(), Some(&json!("abc")));
    }

    #[test]
    fn test_message_uses_raw_value() {
        let err = ColumnError::data_type(&json!("abc"), |v| format!("Value {v} is not integer"));
        assert_eq!(err.to_string(), "Value abc is not integer");

        let err = ColumnError::data_type(&json!([1, 2]), |v| format!("bad {v}"));
        assert_eq!(err.to_string(), "bad [1,2]");
    }
}
