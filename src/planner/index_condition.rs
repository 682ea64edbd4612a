use crate::access::Value;
use crate::expression::{
    ColumnRef, ColumnResolver, CompareType, Expression, ExpressionEvaluator, ExpressionResult,
};
use crate::session::Session;

/// A condition usable for an index lookup: `column <op> expression`.
///
/// The expression never references the filter owning `column`, so it can
/// be evaluated before the filter's rows are read.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCondition {
    compare_type: CompareType,
    column: ColumnRef,
    expression: Expression,
}

impl IndexCondition {
    pub fn new(compare_type: CompareType, column: ColumnRef, expression: Expression) -> Self {
        Self {
            compare_type,
            column,
            expression,
        }
    }

    pub fn compare_type(&self) -> CompareType {
        self.compare_type
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn sql(&self) -> String {
        format!(
            "{} {} {}",
            self.column.sql(),
            self.compare_type.as_str(),
            self.expression.sql()
        )
    }

    /// Whether this condition pins the column to a single value
    pub fn is_equality(&self) -> bool {
        matches!(
            self.compare_type,
            CompareType::Equal | CompareType::EqualNullSafe
        )
    }

    /// Whether this condition bounds the start of an index range
    pub fn is_start(&self) -> bool {
        self.is_equality()
            || matches!(
                self.compare_type,
                CompareType::Greater | CompareType::GreaterOrEqual
            )
    }

    /// Whether this condition bounds the end of an index range
    pub fn is_end(&self) -> bool {
        self.is_equality()
            || matches!(
                self.compare_type,
                CompareType::Less | CompareType::LessOrEqual
            )
    }

    /// Evaluate the lookup value against the rows bound so far.
    pub fn current_value(
        &self,
        session: &Session,
        row: &dyn ColumnResolver,
    ) -> ExpressionResult<Value> {
        ExpressionEvaluator::new(session, row).evaluate(&self.expression)
    }
}
