//! Expression tree definitions.

use std::fmt;

use log::debug;

use crate::access::{DataType, Value};
use crate::expression::{
    AndOr, ColumnRef, CompareType, Comparison, ConditionAndOr, ConditionIn, ConditionNot,
    ExpressionEvaluator, ExpressionResult, ExpressionVisitor, NoRow, Parameter,
};
use crate::planner::{FilterId, TableFilter};
use crate::session::Session;

/// How the result of an expression being optimized is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Usage {
    /// Only whether it is TRUE matters: a filter condition, or an operand of
    /// `AND` / `OR` inside one
    Condition,
    /// The exact three-valued result is observed (operand of `NOT`, of a
    /// comparison, of `IN`)
    Value,
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant value; `Constant(Value::Null)` is the canonical "always NULL"
    Constant(Value),

    /// Column of a table filter
    Column(ColumnRef),

    /// Statement parameter (`?1`, `?2`, ...)
    Parameter(Parameter),

    /// Comparison predicate (`a = b`, `a IS NULL`, ...)
    Comparison(Comparison),

    /// `a AND b`, `a OR b`
    AndOr(ConditionAndOr),

    /// `NOT a`
    Not(ConditionNot),

    /// `a IN(b, c, ...)`
    In(ConditionIn),
}

impl Expression {
    /// Create a constant expression
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    /// The constant NULL
    pub fn null() -> Self {
        Expression::Constant(Value::Null)
    }

    /// Create a column reference expression
    pub fn column(column: ColumnRef) -> Self {
        Expression::Column(column)
    }

    /// Create a binary comparison. Fails for `IS NULL` / `IS NOT NULL`.
    pub fn compare(
        compare_type: CompareType,
        left: Expression,
        right: Expression,
    ) -> ExpressionResult<Self> {
        Comparison::new(compare_type, left, Some(right)).map(Expression::Comparison)
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::Equal, left, right))
    }

    /// `left IS right`
    pub fn eq_null_safe(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::EqualNullSafe, left, right))
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::NotEqual, left, right))
    }

    /// `left IS NOT right`
    pub fn ne_null_safe(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(
            CompareType::NotEqualNullSafe,
            left,
            right,
        ))
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::Greater, left, right))
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::GreaterOrEqual, left, right))
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::Less, left, right))
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Expression::Comparison(Comparison::binary(CompareType::LessOrEqual, left, right))
    }

    pub fn is_null(operand: Expression) -> Self {
        Expression::Comparison(Comparison::unary(CompareType::IsNull, operand))
    }

    pub fn is_not_null(operand: Expression) -> Self {
        Expression::Comparison(Comparison::unary(CompareType::IsNotNull, operand))
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::AndOr(ConditionAndOr::new(AndOr::And, left, right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::AndOr(ConditionAndOr::new(AndOr::Or, left, right))
    }

    pub fn and_or(and_or: AndOr, left: Expression, right: Expression) -> Self {
        Expression::AndOr(ConditionAndOr::new(and_or, left, right))
    }

    pub fn not_expr(operand: Expression) -> Self {
        Expression::Not(ConditionNot::new(operand))
    }

    pub fn in_list(left: Expression, values: Vec<Expression>) -> Self {
        Expression::In(ConditionIn::new(left, values))
    }

    /// Only constant leaves count; composite nodes fold to a constant during
    /// `optimize` when they can.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Constant(_))
    }

    pub fn is_null_constant(&self) -> bool {
        matches!(self, Expression::Constant(Value::Null))
    }

    pub fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Expression::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Static type of this expression; `None` for NULL or unknown.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Expression::Constant(value) => value.data_type(),
            Expression::Column(column) => Some(column.data_type),
            Expression::Parameter(parameter) => parameter.data_type(),
            Expression::Comparison(_)
            | Expression::AndOr(_)
            | Expression::Not(_)
            | Expression::In(_) => Some(DataType::Boolean),
        }
    }

    pub fn sql(&self) -> String {
        match self {
            Expression::Constant(value) => value.to_sql(),
            Expression::Column(column) => column.sql(),
            Expression::Parameter(parameter) => parameter.sql(),
            Expression::Comparison(comparison) => comparison.sql(),
            Expression::AndOr(condition) => condition.sql(),
            Expression::Not(condition) => condition.sql(),
            Expression::In(condition) => condition.sql(),
        }
    }

    /// Optimize this filter condition bottom-up, returning the rewritten tree.
    ///
    /// Rewrites keep the rows for which the condition is TRUE. A derived
    /// conjunct may turn an unknown result into FALSE.
    pub fn optimize(self, session: &Session) -> ExpressionResult<Expression> {
        self.optimize_for(session, Usage::Condition)
    }

    pub(crate) fn optimize_for(
        self,
        session: &Session,
        usage: Usage,
    ) -> ExpressionResult<Expression> {
        match self {
            Expression::Constant(_) | Expression::Column(_) | Expression::Parameter(_) => Ok(self),
            Expression::Comparison(comparison) => comparison.optimize(session),
            Expression::AndOr(condition) => condition.optimize_for(session, usage),
            Expression::Not(condition) => condition.optimize_for(session, usage),
            Expression::In(condition) => condition.optimize(session),
        }
    }

    /// Evaluate an expression that references no columns.
    pub(crate) fn constant_value(&self, session: &Session) -> ExpressionResult<Value> {
        ExpressionEvaluator::new(session, &NoRow).evaluate(self)
    }

    /// Fold this expression into a constant by evaluating it now.
    pub(crate) fn fold(self, session: &Session) -> ExpressionResult<Expression> {
        let value = self.constant_value(session)?;
        debug!("folded {} to {}", self.sql(), value.to_sql());
        Ok(Expression::Constant(value))
    }

    /// Build the negation of this condition if it can be expressed without
    /// a `NOT` node.
    pub fn get_not_if_possible(&self) -> Option<Expression> {
        match self {
            Expression::Comparison(comparison) => {
                Some(Expression::Comparison(comparison.get_not_if_possible()))
            }
            Expression::AndOr(condition) => condition.get_not_if_possible(),
            Expression::Not(condition) => Some(condition.operand().clone()),
            _ => None,
        }
    }

    /// Check a property for every node of this tree.
    pub fn is_everything(&self, visitor: &ExpressionVisitor<'_>) -> bool {
        match self {
            Expression::Constant(_) | Expression::Parameter(_) => true,
            Expression::Column(column) => visitor.accepts_column(column),
            Expression::Comparison(comparison) => comparison.is_everything(visitor),
            Expression::AndOr(condition) => condition.is_everything(visitor),
            Expression::Not(condition) => condition.operand().is_everything(visitor),
            Expression::In(condition) => condition.is_everything(visitor),
        }
    }

    /// Estimated evaluation cost
    pub fn cost(&self) -> u32 {
        match self {
            Expression::Constant(_) | Expression::Parameter(_) => 0,
            Expression::Column(_) => 2,
            Expression::Comparison(comparison) => comparison.cost(),
            Expression::AndOr(condition) => condition.cost(),
            Expression::Not(condition) => condition.operand().cost(),
            Expression::In(condition) => condition.cost(),
        }
    }

    /// Harvest index conditions for `filter` from this predicate.
    ///
    /// Only the conjuncts of an `AND` tree are inspected.
    pub fn create_index_conditions(
        &self,
        session: &Session,
        filter: &mut TableFilter,
    ) -> ExpressionResult<()> {
        match self {
            Expression::Comparison(comparison) => {
                if let Some(condition) = comparison.index_condition(session, filter)? {
                    debug!(
                        "index condition {} for {}",
                        condition.sql(),
                        filter.alias()
                    );
                    filter.add_index_condition(condition);
                }
                Ok(())
            }
            Expression::AndOr(condition) if condition.and_or() == AndOr::And => {
                condition.left().create_index_conditions(session, filter)?;
                condition.right().create_index_conditions(session, filter)
            }
            _ => Ok(()),
        }
    }

    /// Push this condition (or the conjuncts of an `AND` tree) into `filter`.
    ///
    /// A condition is pushed only when every column it references belongs to
    /// one of the `evaluatable` filters. Returns whether anything was pushed.
    pub fn add_filter_conditions(
        &self,
        filter: &mut TableFilter,
        outer_join: bool,
        evaluatable: &[FilterId],
    ) -> bool {
        match self {
            Expression::AndOr(condition) if condition.and_or() == AndOr::And => {
                let left = condition
                    .left()
                    .add_filter_conditions(filter, outer_join, evaluatable);
                let right = condition
                    .right()
                    .add_filter_conditions(filter, outer_join, evaluatable);
                left || right
            }
            // select * from a left join b on a.id = b.id where b.id is null
            // must not become ... on a.id = b.id and b.id is null
            Expression::Comparison(comparison)
                if outer_join && comparison.compare_type() == CompareType::IsNull =>
            {
                false
            }
            _ => {
                if outer_join || !self.is_everything(&ExpressionVisitor::Evaluatable(evaluatable))
                {
                    return false;
                }
                debug!("pushed {} into {}", self.sql(), filter.alias());
                filter.add_filter_condition(self.clone(), false);
                true
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Constant(value)
    }
}

impl From<ColumnRef> for Expression {
    fn from(column: ColumnRef) -> Self {
        Expression::Column(column)
    }
}

impl From<Parameter> for Expression {
    fn from(parameter: Parameter) -> Self {
        Expression::Parameter(parameter)
    }
}
