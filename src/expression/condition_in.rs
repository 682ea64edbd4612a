use log::debug;

use crate::access::{DataType, Value};
use crate::expression::{
    compare_not_null, CompareType, Comparison, Expression, ExpressionEvaluator, ExpressionResult,
    ExpressionVisitor, Usage,
};
use crate::session::Session;

/// `left IN(value, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionIn {
    left: Box<Expression>,
    values: Vec<Expression>,
}

impl ConditionIn {
    pub fn new(left: Expression, values: Vec<Expression>) -> Self {
        Self {
            left: Box::new(left),
            values,
        }
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn values(&self) -> &[Expression] {
        &self.values
    }

    pub fn sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(Expression::sql).collect();
        format!("({} IN({}))", self.left.sql(), values.join(", "))
    }

    pub fn optimize(self, session: &Session) -> ExpressionResult<Expression> {
        let left = (*self.left).optimize_for(session, Usage::Value)?;
        if left.is_null_constant() {
            return Ok(Expression::null());
        }
        let values = self
            .values
            .into_iter()
            .map(|value| value.optimize_for(session, Usage::Value))
            .collect::<ExpressionResult<Vec<_>>>()?;
        let all_constant = left.is_constant() && values.iter().all(Expression::is_constant);
        let condition = Expression::in_list(left, values);
        if all_constant {
            return condition.fold(session);
        }
        Ok(condition)
    }

    /// Merge an equality on the same left side: `A IN(1, 2) OR A = 3` gives
    /// `A IN(1, 2, 3)`.
    pub fn get_additional(&self, other: &Comparison) -> Option<Expression> {
        let add = other.get_if_equals(&self.left)?;
        if !add.is_constant() {
            return None;
        }
        let mut values = self.values.clone();
        values.push(add.clone());
        let merged = Expression::in_list((*self.left).clone(), values);
        debug!("derived {} from {} OR {}", merged, self.sql(), other.sql());
        Some(merged)
    }

    /// TRUE on a match; otherwise NULL if the left side or any value is NULL.
    pub fn value(&self, evaluator: &ExpressionEvaluator<'_>) -> ExpressionResult<Value> {
        let l = evaluator.evaluate(&self.left)?;
        if l.is_null() {
            return Ok(Value::Null);
        }
        let policy = evaluator.session().compare_policy();
        let mut has_null = false;
        for expr in &self.values {
            let r = evaluator.evaluate(expr)?;
            if r.is_null() {
                has_null = true;
                continue;
            }
            let data_type = DataType::higher_order(self.left.data_type(), expr.data_type())
                .or_else(|| DataType::higher_order(l.data_type(), r.data_type()));
            let (l, r) = match data_type {
                Some(data_type) => (l.convert_to(data_type)?, r.convert_to(data_type)?),
                None => (l.clone(), r),
            };
            if compare_not_null(policy, &l, &r, CompareType::Equal)? {
                return Ok(Value::Boolean(true));
            }
        }
        Ok(if has_null {
            Value::Null
        } else {
            Value::Boolean(false)
        })
    }

    pub fn is_everything(&self, visitor: &ExpressionVisitor<'_>) -> bool {
        self.left.is_everything(visitor) && self.values.iter().all(|v| v.is_everything(visitor))
    }

    pub fn cost(&self) -> u32 {
        self.left.cost() + self.values.iter().map(Expression::cost).sum::<u32>() + 1
    }
}
