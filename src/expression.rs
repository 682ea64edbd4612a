//! Predicate expressions and their algebra.
//!
//! This module provides:
//! - The expression tree (constants, columns, parameters, conditions)
//! - Comparison predicates with three-valued evaluation
//! - Optimization: constant folding, operand normalization, NOT push-down,
//!   derivation of conditions from sibling comparisons
//! - Extraction of index conditions for a table filter

pub mod column;
pub mod comparison;
pub mod condition;
pub mod condition_in;
pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;
pub mod parameter;
pub mod visitor;

pub(crate) use comparison::compare_not_null;
pub(crate) use expr::Usage;

pub use column::ColumnRef;
pub use comparison::Comparison;
pub use condition::{AndOr, ConditionAndOr, ConditionNot};
pub use condition_in::ConditionIn;
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{
    evaluate_expression, evaluate_predicate, ColumnResolver, ExpressionEvaluator, NoRow,
    RowBinding,
};
pub use expr::Expression;
pub use operator::CompareType;
pub use parameter::Parameter;
pub use visitor::ExpressionVisitor;
