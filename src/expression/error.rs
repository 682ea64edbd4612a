//! Error types for predicate optimization and evaluation.

use thiserror::Error;

use crate::access::DataType;

/// Errors that can occur while building, optimizing or evaluating predicates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Broken construction invariant (wrong arity, unary operator reversed)
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Value could not be converted to the comparison type
    #[error("Cannot convert {value} to {target}")]
    DataConversion { value: String, target: DataType },

    /// Compare policy received values of different types
    #[error("Cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    /// Table filter has no column with this name
    #[error("Column {column} not found")]
    ColumnNotFound { column: String },

    /// Row binding has no row for the column's table filter
    #[error("Column {column} is not bound to a row")]
    ColumnNotBound { column: String },

    /// Column index out of bounds
    #[error("Column index {index} out of bounds for tuple with {tuple_size} columns")]
    ColumnIndexOutOfBounds { index: usize, tuple_size: usize },

    /// Statement parameter used before a value was set
    #[error("Parameter ?{index} is not set")]
    ParameterNotSet { index: usize },
}

impl ExpressionError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        ExpressionError::Internal {
            message: message.into(),
        }
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
