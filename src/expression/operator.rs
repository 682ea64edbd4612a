//! Comparison operators and their reversal/negation tables.

use serde::{Deserialize, Serialize};

use crate::expression::{ExpressionError, ExpressionResult};

/// Comparison operators supported in predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareType {
    Equal,
    /// `a IS b`: NULL equals NULL
    EqualNullSafe,
    NotEqual,
    /// `a IS NOT b`
    NotEqualNullSafe,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    IsNull,
    IsNotNull,
}

impl CompareType {
    pub const ALL: [CompareType; 10] = [
        CompareType::Equal,
        CompareType::EqualNullSafe,
        CompareType::NotEqual,
        CompareType::NotEqualNullSafe,
        CompareType::Greater,
        CompareType::GreaterOrEqual,
        CompareType::Less,
        CompareType::LessOrEqual,
        CompareType::IsNull,
        CompareType::IsNotNull,
    ];

    /// NULL is an ordinary value for this operator instead of unknown
    pub fn is_null_safe(self) -> bool {
        matches!(
            self,
            CompareType::EqualNullSafe | CompareType::NotEqualNullSafe
        )
    }

    /// `IS NULL` and `IS NOT NULL` take a single operand
    pub fn is_unary(self) -> bool {
        matches!(self, CompareType::IsNull | CompareType::IsNotNull)
    }

    /// Operator to use after swapping the two operands.
    pub fn reverse(self) -> ExpressionResult<CompareType> {
        match self {
            CompareType::Equal
            | CompareType::EqualNullSafe
            | CompareType::NotEqual
            | CompareType::NotEqualNullSafe => Ok(self),
            CompareType::Greater => Ok(CompareType::Less),
            CompareType::GreaterOrEqual => Ok(CompareType::LessOrEqual),
            CompareType::Less => Ok(CompareType::Greater),
            CompareType::LessOrEqual => Ok(CompareType::GreaterOrEqual),
            CompareType::IsNull | CompareType::IsNotNull => Err(ExpressionError::internal(
                format!("compareType={} can not be reversed", self.as_str()),
            )),
        }
    }

    /// Operator equivalent to `NOT (a op b)` under three-valued logic.
    pub fn negate(self) -> CompareType {
        match self {
            CompareType::Equal => CompareType::NotEqual,
            CompareType::NotEqual => CompareType::Equal,
            CompareType::EqualNullSafe => CompareType::NotEqualNullSafe,
            CompareType::NotEqualNullSafe => CompareType::EqualNullSafe,
            CompareType::Greater => CompareType::LessOrEqual,
            CompareType::LessOrEqual => CompareType::Greater,
            CompareType::GreaterOrEqual => CompareType::Less,
            CompareType::Less => CompareType::GreaterOrEqual,
            CompareType::IsNull => CompareType::IsNotNull,
            CompareType::IsNotNull => CompareType::IsNull,
        }
    }

    /// Get the SQL text for this operator
    pub fn as_str(self) -> &'static str {
        match self {
            CompareType::Equal => "=",
            CompareType::EqualNullSafe => "IS",
            CompareType::NotEqual => "<>",
            CompareType::NotEqualNullSafe => "IS NOT",
            CompareType::GreaterOrEqual => ">=",
            CompareType::Greater => ">",
            CompareType::LessOrEqual => "<=",
            CompareType::Less => "<",
            CompareType::IsNull => "IS NULL",
            CompareType::IsNotNull => "IS NOT NULL",
        }
    }
}
