//! anorm - typed column descriptors for a relational schema layer
//!
//! Each column declares its SQL type, nullability, indexing and default
//! value, and knows how to cast application values into its domain.
//!
//! # Example
//!
//! ```
//! use anorm::column::{Column, ColumnOptions};
//! use serde_json::json;
//!
//! let id = Column::serial(ColumnOptions::new()).unwrap();
//! let age = Column::integer(ColumnOptions::new().not_null().with_default(0)).unwrap();
//!
//! assert_eq!(id.sql_type(), "SERIAL");
//! assert!(id.is_primary_key());
//! assert_eq!(age.cast_host_value(&json!("42")).unwrap(), json!(42));
//! assert!(age.cast_host_value(&json!("abc")).is_err());
//! ```

pub mod column;
