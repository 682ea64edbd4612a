//! Value layer consumed by the predicate engine.
//!
//! - **Value**: Type-safe representation of column values
//! - **DataType**: Supported data types and their comparison order
//! - **ComparePolicy**: Equality and ordering rules of a database

pub mod compare;
pub mod value;

pub use compare::{ComparePolicy, DatabaseCompareMode};
pub use value::{DataType, Value};
