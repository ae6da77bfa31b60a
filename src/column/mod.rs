//! Column descriptors for table schemas.
//!
//! A [`Column`] declares a logical SQL type together with its constraints and
//! converts values between the application and the database.

mod descriptor;
mod error;
mod kind;
mod options;

pub use descriptor::Column;
pub use error::{ColumnError, ColumnResult};
pub use kind::ColumnKind;
pub use options::ColumnOptions;
