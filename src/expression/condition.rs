//! `AND`, `OR` and `NOT` conditions.

use log::debug;

use crate::access::Value;
use crate::expression::{
    Expression, ExpressionEvaluator, ExpressionResult, ExpressionVisitor, Usage,
};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AndOr {
    And,
    Or,
}

impl AndOr {
    pub fn as_str(self) -> &'static str {
        match self {
            AndOr::And => "AND",
            AndOr::Or => "OR",
        }
    }

    /// Operator on the other side of De Morgan's laws
    pub fn flip(self) -> AndOr {
        match self {
            AndOr::And => AndOr::Or,
            AndOr::Or => AndOr::And,
        }
    }
}

/// `left AND right` or `left OR right`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionAndOr {
    and_or: AndOr,
    left: Box<Expression>,
    right: Box<Expression>,
}

impl ConditionAndOr {
    pub fn new(and_or: AndOr, left: Expression, right: Expression) -> Self {
        Self {
            and_or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and_or(&self) -> AndOr {
        self.and_or
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }

    pub fn sql(&self) -> String {
        format!(
            "({} {} {})",
            self.left.sql(),
            self.and_or.as_str(),
            self.right.sql()
        )
    }

    pub fn optimize(self, session: &Session) -> ExpressionResult<Expression> {
        self.optimize_for(session, Usage::Condition)
    }

    pub(crate) fn optimize_for(
        self,
        session: &Session,
        usage: Usage,
    ) -> ExpressionResult<Expression> {
        let and_or = self.and_or;
        let left = (*self.left).optimize_for(session, usage)?;
        let right = (*self.right).optimize_for(session, usage)?;

        if and_or == AndOr::And {
            if covers(&left, &right) {
                debug!("dropped duplicate conjunct {}", right);
                return Ok(left);
            }
            if covers(&right, &left) {
                debug!("dropped duplicate conjunct {}", left);
                return Ok(right);
            }
        }

        let settings = session.settings();
        let added = match (&left, &right) {
            (Expression::Comparison(l), Expression::Comparison(r)) => match and_or {
                // A=B AND B=1: add A=1, unless NULL and FALSE must stay apart
                AndOr::And if settings.optimize_two_equals && usage == Usage::Condition => {
                    l.get_additional(r, true)
                }
                // A=1 OR A=2: A IN(1, 2)
                AndOr::Or if settings.optimize_or => l.get_additional(r, false),
                _ => None,
            },
            // A IN(1, 2) OR A=3: A IN(1, 2, 3)
            (Expression::In(l), Expression::Comparison(r))
            | (Expression::Comparison(r), Expression::In(l))
                if and_or == AndOr::Or && settings.optimize_or =>
            {
                l.get_additional(r)
            }
            _ => None,
        };
        if let Some(added) = added {
            let added = added.optimize_for(session, usage)?;
            return Ok(match and_or {
                AndOr::And if covers(&left, &added) || covers(&right, &added) => {
                    Expression::and(left, right)
                }
                AndOr::And => Expression::and(Expression::and(left, right), added),
                AndOr::Or => added,
            });
        }

        let left_value = constant_bool(&left, session)?;
        let right_value = constant_bool(&right, session)?;
        if left_value.is_some() && right_value.is_some() {
            return Expression::and_or(and_or, left, right).fold(session);
        }
        // FALSE decides an AND, TRUE decides an OR; the other value is neutral
        let decisive = and_or == AndOr::Or;
        match (left_value, right_value) {
            (Some(Some(b)), None) | (None, Some(Some(b))) if b == decisive => {
                debug!("{} {} ... is always {}", b, and_or.as_str(), b);
                Ok(Expression::constant(b))
            }
            (Some(Some(_)), None) => Ok(right),
            (None, Some(Some(_))) => Ok(left),
            _ => Ok(Expression::and_or(and_or, left, right)),
        }
    }

    pub fn value(&self, evaluator: &ExpressionEvaluator<'_>) -> ExpressionResult<Value> {
        let l = evaluator.evaluate(&self.left)?.as_bool()?;
        let result = match self.and_or {
            AndOr::And => {
                if l == Some(false) {
                    return Ok(Value::Boolean(false));
                }
                match (l, evaluator.evaluate(&self.right)?.as_bool()?) {
                    (_, Some(false)) => Some(false),
                    (Some(true), Some(true)) => Some(true),
                    _ => None,
                }
            }
            AndOr::Or => {
                if l == Some(true) {
                    return Ok(Value::Boolean(true));
                }
                match (l, evaluator.evaluate(&self.right)?.as_bool()?) {
                    (_, Some(true)) => Some(true),
                    (Some(false), Some(false)) => Some(false),
                    _ => None,
                }
            }
        };
        Ok(result.map_or(Value::Null, Value::Boolean))
    }

    /// `NOT (a AND b)` as `(NOT a) OR (NOT b)`, when both sides can be negated.
    pub fn get_not_if_possible(&self) -> Option<Expression> {
        let left = self.left.get_not_if_possible()?;
        let right = self.right.get_not_if_possible()?;
        Some(Expression::and_or(self.and_or.flip(), left, right))
    }

    pub fn is_everything(&self, visitor: &ExpressionVisitor<'_>) -> bool {
        self.left.is_everything(visitor) && self.right.is_everything(visitor)
    }

    pub fn cost(&self) -> u32 {
        self.left.cost() + self.right.cost() + 1
    }
}

/// Operands of a tree of `AND`s
fn conjuncts(expr: &Expression) -> Vec<&Expression> {
    match expr {
        Expression::AndOr(condition) if condition.and_or() == AndOr::And => {
            let mut all = conjuncts(condition.left());
            all.extend(conjuncts(condition.right()));
            all
        }
        _ => vec![expr],
    }
}

/// Whether every conjunct of `part` is already a conjunct of `whole`
fn covers(whole: &Expression, part: &Expression) -> bool {
    let known = conjuncts(whole);
    conjuncts(part).iter().all(|c| known.contains(c))
}

/// `None` if not constant, otherwise the constant's three-valued boolean.
fn constant_bool(expr: &Expression, session: &Session) -> ExpressionResult<Option<Option<bool>>> {
    if !expr.is_constant() {
        return Ok(None);
    }
    Ok(Some(expr.constant_value(session)?.as_bool()?))
}

/// `NOT condition`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNot {
    condition: Box<Expression>,
}

impl ConditionNot {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }

    pub fn operand(&self) -> &Expression {
        &self.condition
    }

    pub fn sql(&self) -> String {
        format!("(NOT {})", self.condition.sql())
    }

    pub fn optimize(self, session: &Session) -> ExpressionResult<Expression> {
        self.optimize_for(session, Usage::Condition)
    }

    /// Push the negation into the condition before optimizing it, so
    /// conditions derived inside an `AND` are never negated. A condition
    /// that can't be negated is optimized for its exact value.
    pub(crate) fn optimize_for(
        self,
        session: &Session,
        usage: Usage,
    ) -> ExpressionResult<Expression> {
        if let Some(negated) = self.condition.get_not_if_possible() {
            debug!("pushed NOT into {}", negated);
            return negated.optimize_for(session, usage);
        }
        let condition = (*self.condition).optimize_for(session, Usage::Value)?;
        let not = Expression::not_expr(condition);
        match &not {
            Expression::Not(inner) if inner.operand().is_constant() => not.fold(session),
            _ => Ok(not),
        }
    }

    pub fn value(&self, evaluator: &ExpressionEvaluator<'_>) -> ExpressionResult<Value> {
        let value = evaluator.evaluate(&self.condition)?.as_bool()?;
        Ok(value.map_or(Value::Null, |b| Value::Boolean(!b)))
    }
}
