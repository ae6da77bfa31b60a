//! Column kinds and their casting rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::error::{raw, ColumnError, ColumnResult};

/// Logical column types supported by anorm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnKind {
    /// Variable length text. `max_length` is metadata only.
    Varchar { max_length: u32 },
    /// Signed integer.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Auto-incrementing integer key.
    Serial,
}

impl ColumnKind {
    /// Get the SQL type keyword for CREATE TABLE.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Varchar { .. } => "VARCHAR",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Boolean => "BOOLEAN",
            ColumnKind::Serial => "SERIAL",
        }
    }

    /// Coerce an inbound value into this kind's host domain.
    ///
    /// Varchar never fails: strings are kept verbatim and any other value
    /// becomes its JSON text, so `true` gives `"true"` and null gives `"null"`.
    pub fn cast_host_value(&self, value: &Value) -> ColumnResult<Value> {
        match self {
            ColumnKind::Varchar { .. } => Ok(Value::String(raw(value))),
            ColumnKind::Integer => cast_integer(value).map(Value::from),
            ColumnKind::Boolean => cast_boolean(value).map(Value::Bool),
            ColumnKind::Serial => cast_serial(value),
        }
    }

    /// Prepare a host value for the storage backend.
    pub fn to_db_representation(&self, value: &Value) -> Value {
        value.clone()
    }

    /// Convert a stored value back into the host domain.
    ///
    /// SQL NULL stays null for every kind.
    pub fn from_db_representation(&self, value: &Value) -> ColumnResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match self {
            ColumnKind::Varchar { .. } => Ok(Value::String(raw(value))),
            ColumnKind::Integer | ColumnKind::Serial => cast_integer(value).map(Value::from),
            ColumnKind::Boolean => stored_boolean(value).map(Value::Bool),
        }
    }

    /// The declared maximum length, for Varchar columns.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            ColumnKind::Varchar { max_length } => Some(*max_length),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_type())
    }
}

fn not_integer(value: &Value) -> ColumnError {
    ColumnError::data_type(value, |v| format!("Value {v} is not integer"))
}

fn cast_integer(value: &Value) -> ColumnResult<i64> {
    match value {
        Value::Number(n) => number_to_i64(n).ok_or_else(|| not_integer(value)),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| not_integer(value)),
        _ => Err(not_integer(value)),
    }
}

/// Integral numbers as-is, finite floats truncated toward zero.
fn number_to_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn cast_boolean(value: &Value) -> ColumnResult<bool> {
    match value {
        Value::Bool(b) => return Ok(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i != 0);
            }
            if n.is_u64() {
                return Ok(true);
            }
        }
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" => return Ok(true),
            "false" => return Ok(false),
            _ => {}
        },
        _ => {}
    }
    Err(ColumnError::data_type(value, |v| {
        format!("Value {v} cannot be presented like boolean")
    }))
}

/// Booleans as the backend returns them, including Postgres' `t`/`f` text.
fn stored_boolean(value: &Value) -> ColumnResult<bool> {
    match value {
        Value::Bool(b) => return Ok(*b),
        Value::Number(n) => return Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "t" | "1" => return Ok(true),
            "false" | "f" | "0" => return Ok(false),
            _ => {}
        },
        _ => {}
    }
    Err(ColumnError::data_type(value, |v| {
        format!("Stored value {v} is not a boolean")
    }))
}

fn cast_serial(value: &Value) -> ColumnResult<Value> {
    let parsed = match value {
        Value::Null => return Ok(Value::Null),
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<i64>().ok()
        }
        _ => None,
    };
    parsed.map(Value::from).ok_or_else(|| {
        ColumnError::data_type(value, |v| {
            format!("Only integer value can be used as serial ({v} is not integer)")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VARCHAR: ColumnKind = ColumnKind::Varchar { max_length: 64 };

    #[test]
    fn test_sql_type() {
        assert_eq!(VARCHAR.sql_type(), "VARCHAR");
        assert_eq!(ColumnKind::Integer.sql_type(), "INTEGER");
        assert_eq!(ColumnKind::Boolean.sql_type(), "BOOLEAN");
        assert_eq!(ColumnKind::Serial.sql_type(), "SERIAL");

        for kind in [VARCHAR, ColumnKind::Integer, ColumnKind::Boolean, ColumnKind::Serial] {
            assert_eq!(kind.sql_type(), kind.sql_type());
            assert_eq!(kind.to_string(), kind.sql_type());
        }
    }

    #[test]
    fn test_varchar_cast() {
        assert_eq!(VARCHAR.cast_host_value(&json!(123)).unwrap(), json!("123"));
        assert_eq!(VARCHAR.cast_host_value(&json!("hello")).unwrap(), json!("hello"));
        assert_eq!(VARCHAR.cast_host_value(&json!(true)).unwrap(), json!("true"));
        assert_eq!(VARCHAR.cast_host_value(&json!(null)).unwrap(), json!("null"));

        // no length enforcement
        let tiny = ColumnKind::Varchar { max_length: 2 };
        assert_eq!(tiny.cast_host_value(&json!("toolong")).unwrap(), json!("toolong"));
        assert_eq!(tiny.max_length(), Some(2));
    }

    #[test]
    fn test_integer_cast() {
        let int = ColumnKind::Integer;
        assert_eq!(int.cast_host_value(&json!("42")).unwrap(), json!(42));
        assert_eq!(int.cast_host_value(&json!(" -17 ")).unwrap(), json!(-17));
        assert_eq!(int.cast_host_value(&json!(42)).unwrap(), json!(42));
        assert_eq!(int.cast_host_value(&json!(3.9)).unwrap(), json!(3));
        assert_eq!(int.cast_host_value(&json!(true)).unwrap(), json!(1));

        let err = int.cast_host_value(&json!("abc")).unwrap_err();
        assert!(err.is_data_type());
        assert!(err.to_string().contains("abc"));

        assert!(int.cast_host_value(&json!(null)).is_err());
        assert!(int.cast_host_value(&json!("4.2")).is_err());
        assert!(int.cast_host_value(&json!([1])).is_err());
        assert!(int.cast_host_value(&json!(u64::MAX)).is_err());
        assert!(int.cast_host_value(&json!(1e300)).is_err());
    }

    #[test]
    fn test_boolean_cast() {
        let b = ColumnKind::Boolean;
        assert_eq!(b.cast_host_value(&json!("TRUE")).unwrap(), json!(true));
        assert_eq!(b.cast_host_value(&json!("False")).unwrap(), json!(false));
        assert_eq!(b.cast_host_value(&json!(false)).unwrap(), json!(false));
        assert_eq!(b.cast_host_value(&json!(0)).unwrap(), json!(false));
        assert_eq!(b.cast_host_value(&json!(5)).unwrap(), json!(true));
        assert_eq!(b.cast_host_value(&json!(-1)).unwrap(), json!(true));

        let err = b.cast_host_value(&json!("no")).unwrap_err();
        assert!(matches!(err, ColumnError::DataType { .. }));
        assert!(err.to_string().contains("no"));

        assert!(b.cast_host_value(&json!(null)).is_err());
        assert!(b.cast_host_value(&json!(1.0)).is_err());
        assert!(b.cast_host_value(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_serial_cast() {
        let s = ColumnKind::Serial;
        assert_eq!(s.cast_host_value(&json!(null)).unwrap(), Value::Null);
        assert_eq!(s.cast_host_value(&json!("007")).unwrap(), json!(7));
        assert_eq!(s.cast_host_value(&json!(12)).unwrap(), json!(12));

        let err = s.cast_host_value(&json!("7a")).unwrap_err();
        assert!(err.to_string().contains("7a"));

        assert!(s.cast_host_value(&json!("")).is_err());
        assert!(s.cast_host_value(&json!("-7")).is_err());
        assert!(s.cast_host_value(&json!(7.5)).is_err());
        assert!(s.cast_host_value(&json!(true)).is_err());
        assert!(s.cast_host_value(&json!("99999999999999999999")).is_err());
    }

    #[test]
    fn test_db_representation() {
        let value = json!("as-is");
        assert_eq!(ColumnKind::Integer.to_db_representation(&value), value);

        assert_eq!(ColumnKind::Integer.from_db_representation(&json!("42")).unwrap(), json!(42));
        assert_eq!(ColumnKind::Serial.from_db_representation(&json!(3)).unwrap(), json!(3));
        assert_eq!(VARCHAR.from_db_representation(&json!(9)).unwrap(), json!("9"));
        assert_eq!(ColumnKind::Boolean.from_db_representation(&json!("t")).unwrap(), json!(true));
        assert_eq!(ColumnKind::Boolean.from_db_representation(&json!(0.0)).unwrap(), json!(false));
        assert!(ColumnKind::Boolean.from_db_representation(&json!("maybe")).is_err());

        for kind in [VARCHAR, ColumnKind::Integer, ColumnKind::Boolean, ColumnKind::Serial] {
            assert_eq!(kind.from_db_representation(&Value::Null).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_value(VARCHAR).unwrap(),
            json!({"type": "varchar", "max_length": 64})
        );
        let kind: ColumnKind = serde_json::from_value(json!({"type": "serial"})).unwrap();
        assert_eq!(kind, ColumnKind::Serial);
    }
}
