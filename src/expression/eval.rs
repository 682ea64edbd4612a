//! Expression evaluation against bound rows.

use std::collections::HashMap;

use crate::access::Value;
use crate::expression::{ColumnRef, Expression, ExpressionError, ExpressionResult};
use crate::planner::FilterId;
use crate::session::Session;

/// Source of column values for the row being evaluated
pub trait ColumnResolver {
    fn column_value(&self, column: &ColumnRef) -> ExpressionResult<Value>;
}

/// Resolver without any row, used to evaluate constant expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRow;

impl ColumnResolver for NoRow {
    fn column_value(&self, column: &ColumnRef) -> ExpressionResult<Value> {
        Err(ExpressionError::ColumnNotBound {
            column: column.sql(),
        })
    }
}

/// Current row of each table filter
#[derive(Debug, Clone, Default)]
pub struct RowBinding {
    rows: HashMap<FilterId, Vec<Value>>,
}

impl RowBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `values` as the current row of `filter`
    pub fn bind(mut self, filter: FilterId, values: Vec<Value>) -> Self {
        self.set(filter, values);
        self
    }

    pub fn set(&mut self, filter: FilterId, values: Vec<Value>) {
        self.rows.insert(filter, values);
    }
}

impl ColumnResolver for RowBinding {
    fn column_value(&self, column: &ColumnRef) -> ExpressionResult<Value> {
        let values = self
            .rows
            .get(&column.filter)
            .ok_or_else(|| ExpressionError::ColumnNotBound {
                column: column.sql(),
            })?;
        values
            .get(column.index)
            .cloned()
            .ok_or(ExpressionError::ColumnIndexOutOfBounds {
                index: column.index,
                tuple_size: values.len(),
            })
    }
}

/// Evaluator for expressions
pub struct ExpressionEvaluator<'a> {
    /// Session supplying the compare policy
    session: &'a Session,
    /// The row values to evaluate against
    row: &'a dyn ColumnResolver,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn new(session: &'a Session, row: &'a dyn ColumnResolver) -> Self {
        Self { session, row }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expression) -> ExpressionResult<Value> {
        match expr {
            Expression::Constant(value) => Ok(value.clone()),
            Expression::Column(column) => self.row.column_value(column),
            Expression::Parameter(parameter) => parameter.value(),
            Expression::Comparison(comparison) => comparison.value(self),
            Expression::AndOr(condition) => condition.value(self),
            Expression::Not(condition) => condition.value(self),
            Expression::In(condition) => condition.value(self),
        }
    }
}

/// Helper function to evaluate an expression against a row
pub fn evaluate_expression(
    expr: &Expression,
    session: &Session,
    row: &dyn ColumnResolver,
) -> ExpressionResult<Value> {
    ExpressionEvaluator::new(session, row).evaluate(expr)
}

/// Evaluate a filter condition; unknown counts as false, as in `WHERE`.
pub fn evaluate_predicate(
    expr: &Expression,
    session: &Session,
    row: &dyn ColumnResolver,
) -> ExpressionResult<bool> {
    Ok(evaluate_expression(expr, session, row)?
        .as_bool()?
        .unwrap_or(false))
}
