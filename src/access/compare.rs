//! Equality and ordering policy for values.
//!
//! Comparisons never decide on their own how two values relate. They ask a
//! [`ComparePolicy`], which the session hands in, so collation rules can be
//! swapped without touching the predicate code.

use std::cmp::Ordering;

use crate::access::Value;
use crate::expression::{ExpressionError, ExpressionResult};

/// Equality and ordering rules used when comparing values.
///
/// Both values are already converted to a common type when these methods
/// are called.
pub trait ComparePolicy: Send + Sync {
    /// Check equality. Two NULLs are equal; NULL never equals a non-NULL.
    fn are_equal(&self, left: &Value, right: &Value) -> ExpressionResult<bool>;

    /// Three-way ordering of two non-NULL values.
    fn compare(&self, left: &Value, right: &Value) -> ExpressionResult<Ordering>;
}

/// Default compare policy of a database.
///
/// Doubles are ordered totally with [`f64::total_cmp`]: `-0.0` sorts before
/// `0.0` and is not equal to it, and NaN equals itself and sorts after
/// every other value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseCompareMode {
    /// Compare strings ignoring ASCII case
    pub ignore_case: bool,
}

impl DatabaseCompareMode {
    pub fn new(ignore_case: bool) -> Self {
        Self { ignore_case }
    }

    fn compare_strings(&self, left: &str, right: &str) -> Ordering {
        if self.ignore_case {
            let l = left.chars().map(|c| c.to_ascii_lowercase());
            let r = right.chars().map(|c| c.to_ascii_lowercase());
            l.cmp(r)
        } else {
            left.cmp(right)
        }
    }
}

impl ComparePolicy for DatabaseCompareMode {
    fn are_equal(&self, left: &Value, right: &Value) -> ExpressionResult<bool> {
        match (left, right) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, _) | (_, Value::Null) => Ok(false),
            _ => Ok(self.compare(left, right)? == Ordering::Equal),
        }
    }

    fn compare(&self, left: &Value, right: &Value) -> ExpressionResult<Ordering> {
        match (left, right) {
            (Value::Boolean(l), Value::Boolean(r)) => Ok(l.cmp(r)),
            (Value::Int32(l), Value::Int32(r)) => Ok(l.cmp(r)),
            (Value::Int64(l), Value::Int64(r)) => Ok(l.cmp(r)),
            (Value::Double(l), Value::Double(r)) => Ok(l.total_cmp(r)),
            (Value::String(l), Value::String(r)) => Ok(self.compare_strings(l, r)),
            _ => Err(ExpressionError::Incomparable {
                left: left.to_sql(),
                right: right.to_sql(),
            }),
        }
    }
}
