//! Comparison predicates.
//!
//! Example comparisons are `ID = 1`, `NAME = NAME`, `NAME IS NULL`.
//!
//! A [`Comparison`] knows how to
//! - fold itself into a constant when its operands allow it,
//! - evaluate itself with SQL three-valued semantics,
//! - hand index conditions to the table filter it constrains,
//! - derive new conditions together with a sibling comparison
//!   (`A=B AND B=C` gives `A=C`, `A=1 OR A=2` gives `A IN(1, 2)`).

use std::cmp::Ordering;

use log::debug;

use crate::access::{ComparePolicy, DataType, Value};
use crate::expression::{
    CompareType, ConditionIn, Expression, ExpressionError, ExpressionEvaluator, ExpressionResult,
    ExpressionVisitor, Usage,
};
use crate::planner::{IndexCondition, TableFilter};
use crate::session::Session;

/// Comparison predicate over one or two operands
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    compare_type: CompareType,
    left: Box<Expression>,
    /// Present iff `compare_type` is binary
    right: Option<Box<Expression>>,
}

impl Comparison {
    /// Create a comparison, checking that the operand count fits the operator.
    pub fn new(
        compare_type: CompareType,
        left: Expression,
        right: Option<Expression>,
    ) -> ExpressionResult<Self> {
        if compare_type.is_unary() != right.is_none() {
            return Err(ExpressionError::internal(format!(
                "compareType={} with {} operand(s)",
                compare_type.as_str(),
                if right.is_some() { 2 } else { 1 }
            )));
        }
        Ok(Self {
            compare_type,
            left: Box::new(left),
            right: right.map(Box::new),
        })
    }

    pub(crate) fn binary(compare_type: CompareType, left: Expression, right: Expression) -> Self {
        debug_assert!(!compare_type.is_unary());
        Self {
            compare_type,
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    pub(crate) fn unary(compare_type: CompareType, left: Expression) -> Self {
        debug_assert!(compare_type.is_unary());
        Self {
            compare_type,
            left: Box::new(left),
            right: None,
        }
    }

    pub fn compare_type(&self) -> CompareType {
        self.compare_type
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> Option<&Expression> {
        self.right.as_deref()
    }

    /// Get the left or the right operand.
    pub fn expression(&self, get_left: bool) -> Option<&Expression> {
        if get_left {
            Some(&self.left)
        } else {
            self.right()
        }
    }

    pub fn sql(&self) -> String {
        match &self.right {
            None => format!("({} {})", self.left.sql(), self.compare_type.as_str()),
            Some(right) => format!(
                "({} {} {})",
                self.left.sql(),
                self.compare_type.as_str(),
                right.sql()
            ),
        }
    }

    pub fn optimize(self, session: &Session) -> ExpressionResult<Expression> {
        let Comparison {
            mut compare_type,
            left,
            right,
        } = self;
        let mut left = (*left).optimize_for(session, Usage::Value)?;
        let mut right = right
            .map(|r| (*r).optimize_for(session, Usage::Value))
            .transpose()?;

        if let Some(r) = right.as_mut() {
            // column on the left: `5 > x` becomes `x < 5`
            if matches!(r, Expression::Column(_))
                && (left.is_constant() || matches!(left, Expression::Parameter(_)))
            {
                std::mem::swap(&mut left, r);
                compare_type = compare_type.reverse()?;
                debug!("swapped operands: {} {} {}", left, compare_type.as_str(), r);
            }
            if let Expression::Column(column) = &left {
                match r {
                    Expression::Constant(Value::Null) if !compare_type.is_null_safe() => {
                        debug!("{} {} NULL is always NULL", column.sql(), compare_type.as_str());
                        return Ok(Expression::null());
                    }
                    Expression::Parameter(parameter) => {
                        parameter.set_column_type(column.data_type);
                    }
                    _ => {}
                }
            }
        }

        let comparison = Comparison {
            compare_type,
            left: Box::new(left),
            right: right.map(Box::new),
        };
        let foldable = match comparison.right.as_deref() {
            None => comparison.left.is_constant(),
            Some(right) => {
                if (comparison.left.is_null_constant() || right.is_null_constant())
                    && !compare_type.is_null_safe()
                {
                    return Ok(Expression::null());
                }
                comparison.left.is_constant() && right.is_constant()
            }
        };
        if foldable {
            return Expression::Comparison(comparison).fold(session);
        }
        Ok(Expression::Comparison(comparison))
    }

    pub fn value(&self, evaluator: &ExpressionEvaluator<'_>) -> ExpressionResult<Value> {
        let l = evaluator.evaluate(&self.left)?;
        let Some(right) = self.right.as_deref() else {
            return match self.compare_type {
                CompareType::IsNull => Ok(Value::Boolean(l.is_null())),
                CompareType::IsNotNull => Ok(Value::Boolean(!l.is_null())),
                other => Err(ExpressionError::internal(format!(
                    "compareType={} without right operand",
                    other.as_str()
                ))),
            };
        };
        let null_safe = self.compare_type.is_null_safe();
        if l.is_null() && !null_safe {
            return Ok(Value::Null);
        }
        let r = evaluator.evaluate(right)?;
        if r.is_null() && !null_safe {
            return Ok(Value::Null);
        }
        let data_type = DataType::higher_order(self.left.data_type(), right.data_type())
            .or_else(|| DataType::higher_order(l.data_type(), r.data_type()));
        let (l, r) = match data_type {
            Some(data_type) => (l.convert_to(data_type)?, r.convert_to(data_type)?),
            None => (l, r),
        };
        let policy = evaluator.session().compare_policy();
        compare_not_null(policy, &l, &r, self.compare_type).map(Value::Boolean)
    }

    /// Negated comparison over the same operands.
    pub fn get_not_if_possible(&self) -> Comparison {
        Comparison {
            compare_type: self.compare_type.negate(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }

    /// Index condition this comparison contributes to `filter`, if any.
    pub fn index_condition(
        &self,
        session: &Session,
        filter: &TableFilter,
    ) -> ExpressionResult<Option<IndexCondition>> {
        let l = self.left.as_column().filter(|c| c.filter == filter.id());
        let Some(right) = self.right.as_deref() else {
            return Ok(match (l, self.compare_type) {
                (Some(l), CompareType::IsNull) if session.settings().optimize_is_null => Some(
                    IndexCondition::new(CompareType::EqualNullSafe, l.clone(), Expression::null()),
                ),
                _ => None,
            });
        };
        let r = right.as_column().filter(|c| c.filter == filter.id());

        // exactly one side must be from the current filter; if both are, the
        // comparison can't be used for an index lookup
        let not_from_filter = ExpressionVisitor::NotFromResolver(filter.id());
        match (l, r) {
            (None, Some(_)) if self.left.is_everything(&not_from_filter) => {}
            (Some(_), None) if right.is_everything(&not_from_filter) => {}
            _ => return Ok(None),
        }

        match self.compare_type {
            CompareType::NotEqual | CompareType::NotEqualNullSafe => return Ok(None),
            CompareType::Equal
            | CompareType::EqualNullSafe
            | CompareType::Greater
            | CompareType::GreaterOrEqual
            | CompareType::Less
            | CompareType::LessOrEqual => {}
            other @ (CompareType::IsNull | CompareType::IsNotNull) => {
                return Err(ExpressionError::internal(format!(
                    "compareType={} with right operand",
                    other.as_str()
                )));
            }
        }

        let condition = match (l, r) {
            (Some(l), _) => IndexCondition::new(self.compare_type, l.clone(), right.clone()),
            (None, Some(r)) => IndexCondition::new(
                self.compare_type.reverse()?,
                r.clone(),
                (*self.left).clone(),
            ),
            (None, None) => return Ok(None),
        };
        Ok(Some(condition))
    }

    pub fn is_everything(&self, visitor: &ExpressionVisitor<'_>) -> bool {
        self.left.is_everything(visitor)
            && self
                .right
                .as_ref()
                .map_or(true, |right| right.is_everything(visitor))
    }

    pub fn cost(&self) -> u32 {
        self.left.cost() + self.right.as_ref().map_or(0, |right| right.cost()) + 1
    }

    /// Get the other operand if this is an equality and one operand matches.
    pub fn get_if_equals(&self, matching: &Expression) -> Option<&Expression> {
        if self.compare_type != CompareType::Equal {
            return None;
        }
        let right = self.right.as_deref()?;
        if *self.left == *matching {
            Some(right)
        } else if right == matching {
            Some(&self.left)
        } else {
            None
        }
    }

    /// Derive a condition from this equality and `other`.
    ///
    /// With `and`, `A=B AND A=C` gives `B=C`. Otherwise `A=1 OR A=2` gives
    /// `A IN(1, 2)`.
    pub fn get_additional(&self, other: &Comparison, and: bool) -> Option<Expression> {
        if self.compare_type != CompareType::Equal || other.compare_type != CompareType::Equal {
            return None;
        }
        let (l, r) = (&*self.left, self.right.as_deref()?);
        let (l2, r2) = (&*other.left, other.right.as_deref()?);
        let (lc, rc) = (l.is_constant(), r.is_constant());
        let (l2c, r2c) = (l2.is_constant(), r2.is_constant());

        let derived = if and {
            // must not compare constants: NOT(B=2 AND B=3) would turn false
            let (a, b) = if !(rc && r2c) && l == l2 {
                (r, r2)
            } else if !(rc && l2c) && l == r2 {
                (r, l2)
            } else if !(lc && r2c) && r == l2 {
                (l, r2)
            } else if !(lc && l2c) && r == r2 {
                (l, l2)
            } else {
                return None;
            };
            Expression::eq(a.clone(), b.clone())
        } else {
            let (subject, a, b) = if rc && r2c && l == l2 {
                (l, r, r2)
            } else if rc && l2c && l == r2 {
                (l, r, l2)
            } else if lc && r2c && r == l2 {
                (r, l, r2)
            } else if lc && l2c && r == r2 {
                (r, l, l2)
            } else {
                return None;
            };
            Expression::In(ConditionIn::new(subject.clone(), vec![a.clone(), b.clone()]))
        };
        debug!(
            "derived {} from {} {} {}",
            derived,
            self.sql(),
            if and { "AND" } else { "OR" },
            other.sql()
        );
        Some(derived)
    }
}

/// Compare two values already converted to a common type.
///
/// NULLs only reach this point for the null-safe operators, where the
/// policy's equality decides.
pub(crate) fn compare_not_null(
    policy: &dyn ComparePolicy,
    l: &Value,
    r: &Value,
    compare_type: CompareType,
) -> ExpressionResult<bool> {
    let result = match compare_type {
        CompareType::Equal | CompareType::EqualNullSafe => policy.are_equal(l, r)?,
        CompareType::NotEqual | CompareType::NotEqualNullSafe => !policy.are_equal(l, r)?,
        CompareType::GreaterOrEqual => policy.compare(l, r)? != Ordering::Less,
        CompareType::Greater => policy.compare(l, r)? == Ordering::Greater,
        CompareType::LessOrEqual => policy.compare(l, r)? != Ordering::Greater,
        CompareType::Less => policy.compare(l, r)? == Ordering::Less,
        CompareType::IsNull | CompareType::IsNotNull => {
            return Err(ExpressionError::internal(format!(
                "type={}",
                compare_type.as_str()
            )));
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::DatabaseCompareMode;
    use crate::expression::{NoRow, Parameter, RowBinding};
    use crate::planner::{ColumnInfo, FilterId};
    use crate::settings::DbSettings;

    fn table(id: u32, alias: &str) -> TableFilter {
        TableFilter::new(
            FilterId(id),
            alias,
            vec![
                ColumnInfo::new("ID", DataType::Int32),
                ColumnInfo::new("NAME", DataType::Varchar),
                ColumnInfo::new("SCORE", DataType::Double),
            ],
        )
    }

    fn col(filter: &TableFilter, name: &str) -> Expression {
        Expression::column(filter.column(name).unwrap())
    }

    fn eval(expr: &Expression, row: &RowBinding) -> ExpressionResult<Value> {
        let session = Session::default();
        ExpressionEvaluator::new(&session, row).evaluate(expr)
    }

    #[test]
    fn test_new_checks_arity() {
        assert!(Comparison::new(CompareType::IsNull, Expression::constant(1), None).is_ok());
        assert!(matches!(
            Comparison::new(
                CompareType::IsNull,
                Expression::constant(1),
                Some(Expression::constant(2))
            ),
            Err(ExpressionError::Internal { .. })
        ));
        assert!(Comparison::new(CompareType::Equal, Expression::constant(1), None).is_err());
    }

    #[test]
    fn test_sql() {
        let t = table(1, "T");
        assert_eq!(
            Expression::eq_null_safe(col(&t, "ID"), Expression::null()).sql(),
            "(T.ID IS NULL)"
        );
        assert_eq!(
            Expression::ne_null_safe(col(&t, "ID"), Expression::constant(3)).sql(),
            "(T.ID IS NOT 3)"
        );
        assert_eq!(
            Expression::ne(col(&t, "NAME"), Expression::constant("x")).sql(),
            "(T.NAME <> 'x')"
        );
        assert_eq!(
            Expression::is_not_null(col(&t, "NAME")).sql(),
            "(T.NAME IS NOT NULL)"
        );
        assert_eq!(
            Expression::le(col(&t, "ID"), Expression::Parameter(Parameter::new(0))).sql(),
            "(T.ID <= ?1)"
        );
    }

    #[test]
    fn test_optimize_folds_constants() -> ExpressionResult<()> {
        let session = Session::default();
        let expr = Expression::gt(Expression::constant(5), Expression::constant(3));
        let once = expr.optimize(&session)?;
        assert_eq!(once, Expression::constant(true));
        assert_eq!(once.clone().optimize(&session)?, once);

        let expr = Expression::eq(Expression::constant("7"), Expression::constant(7));
        assert_eq!(expr.optimize(&session)?, Expression::constant(true));
        Ok(())
    }

    #[test]
    fn test_optimize_null_fold() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");

        let expr = Expression::eq(col(&t, "ID"), Expression::null());
        assert_eq!(expr.optimize(&session)?, Expression::null());

        // the column is swapped to the left first
        let expr = Expression::lt(Expression::null(), col(&t, "ID"));
        assert_eq!(expr.optimize(&session)?, Expression::null());

        let expr = Expression::eq(
            Expression::null(),
            Expression::gt(col(&t, "ID"), Expression::constant(1)),
        );
        assert_eq!(expr.optimize(&session)?, Expression::null());

        // null-safe comparisons keep their meaning
        let expr = Expression::eq_null_safe(col(&t, "ID"), Expression::null());
        assert_eq!(
            expr.optimize(&session)?,
            Expression::eq_null_safe(col(&t, "ID"), Expression::null())
        );
        let expr = Expression::eq_null_safe(Expression::null(), Expression::null());
        assert_eq!(expr.optimize(&session)?, Expression::constant(true));
        Ok(())
    }

    #[test]
    fn test_optimize_unary_fold() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        assert_eq!(
            Expression::is_null(Expression::null()).optimize(&session)?,
            Expression::constant(true)
        );
        assert_eq!(
            Expression::is_not_null(Expression::constant(1)).optimize(&session)?,
            Expression::constant(true)
        );
        assert_eq!(
            Expression::is_null(col(&t, "ID")).optimize(&session)?,
            Expression::is_null(col(&t, "ID"))
        );
        Ok(())
    }

    #[test]
    fn test_optimize_swaps_column_left() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        let expr = Expression::gt(Expression::constant(5), col(&t, "ID"));
        assert_eq!(
            expr.optimize(&session)?,
            Expression::lt(col(&t, "ID"), Expression::constant(5))
        );

        let expr = Expression::ge(Expression::Parameter(Parameter::new(0)), col(&t, "ID"));
        assert_eq!(
            expr.optimize(&session)?.sql(),
            "(T.ID <= ?1)"
        );

        // two columns stay where they are
        let u = table(2, "U");
        let expr = Expression::gt(col(&u, "ID"), col(&t, "ID"));
        assert_eq!(expr.clone().optimize(&session)?, expr);
        Ok(())
    }

    #[test]
    fn test_optimize_binds_parameter_type() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        let parameter = Parameter::new(0);
        let expr = Expression::eq(Expression::Parameter(parameter.clone()), col(&t, "SCORE"));
        let optimized = expr.optimize(&session)?;
        assert_eq!(parameter.column_type(), Some(DataType::Double));

        parameter.set_value(Value::String("2.5".to_string()));
        let row = RowBinding::new().bind(
            FilterId(1),
            vec![Value::Int32(1), Value::Null, Value::Double(2.5)],
        );
        assert_eq!(eval(&optimized, &row), Ok(Value::Boolean(true)));
        Ok(())
    }

    #[test]
    fn test_value_null_handling() {
        let t = table(1, "T");
        let null_row = RowBinding::new().bind(
            FilterId(1),
            vec![Value::Null, Value::Null, Value::Null],
        );

        let expr = Expression::eq(col(&t, "ID"), col(&t, "NAME"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Null));
        let expr = Expression::gt(Expression::constant(1), col(&t, "ID"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Null));

        let expr = Expression::eq_null_safe(col(&t, "ID"), col(&t, "NAME"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Boolean(true)));
        let expr = Expression::ne_null_safe(col(&t, "ID"), col(&t, "NAME"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Boolean(false)));

        let expr = Expression::eq_null_safe(col(&t, "ID"), Expression::constant(1));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Boolean(false)));

        let expr = Expression::is_null(col(&t, "ID"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Boolean(true)));
        let expr = Expression::is_not_null(col(&t, "ID"));
        assert_eq!(eval(&expr, &null_row), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_value_coerces_to_higher_order() {
        let t = table(1, "T");
        let row = RowBinding::new().bind(
            FilterId(1),
            vec![
                Value::Int32(10),
                Value::String("9".to_string()),
                Value::Double(9.5),
            ],
        );
        // compared as integers, not as strings
        let expr = Expression::gt(col(&t, "ID"), col(&t, "NAME"));
        assert_eq!(eval(&expr, &row), Ok(Value::Boolean(true)));

        let expr = Expression::lt(col(&t, "SCORE"), col(&t, "ID"));
        assert_eq!(eval(&expr, &row), Ok(Value::Boolean(true)));

        let expr = Expression::le(col(&t, "ID"), Expression::constant(10_i64));
        assert_eq!(eval(&expr, &row), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_value_conversion_error_passes_through() {
        let t = table(1, "T");
        let row = RowBinding::new().bind(
            FilterId(1),
            vec![Value::Int32(1), Value::String("abc".to_string()), Value::Null],
        );
        let expr = Expression::eq(col(&t, "ID"), col(&t, "NAME"));
        assert!(matches!(
            eval(&expr, &row),
            Err(ExpressionError::DataConversion { .. })
        ));
    }

    #[test]
    fn test_value_uses_session_policy() -> ExpressionResult<()> {
        let expr = Expression::eq(Expression::constant("Bob"), Expression::constant("BOB"));
        let strict = Session::default();
        assert_eq!(expr.constant_value(&strict)?, Value::Boolean(false));

        let relaxed = Session::with_compare_policy(
            DbSettings::default(),
            std::sync::Arc::new(DatabaseCompareMode::new(true)),
        );
        assert_eq!(expr.constant_value(&relaxed)?, Value::Boolean(true));
        Ok(())
    }

    #[test]
    fn test_operators() -> ExpressionResult<()> {
        let session = Session::default();
        let cases = [
            (CompareType::Equal, 1, 1, true),
            (CompareType::NotEqual, 1, 1, false),
            (CompareType::Greater, 2, 1, true),
            (CompareType::Greater, 1, 1, false),
            (CompareType::GreaterOrEqual, 1, 1, true),
            (CompareType::Less, 1, 2, true),
            (CompareType::LessOrEqual, 2, 1, false),
        ];
        for (op, l, r, expected) in cases {
            let expr = Expression::compare(op, Expression::constant(l), Expression::constant(r))?;
            assert_eq!(
                expr.constant_value(&session)?,
                Value::Boolean(expected),
                "{} {} {}",
                l,
                op.as_str(),
                r
            );
        }
        Ok(())
    }

    #[test]
    fn test_negation_is_exact() -> ExpressionResult<()> {
        let session = Session::default();
        let values = [Value::Null, Value::Int32(1), Value::Int32(2)];
        let binary = CompareType::ALL.into_iter().filter(|op| !op.is_unary());
        for op in binary {
            for l in &values {
                for r in &values {
                    let comparison = Comparison::binary(
                        op,
                        Expression::Constant(l.clone()),
                        Expression::Constant(r.clone()),
                    );
                    let evaluator = ExpressionEvaluator::new(&session, &NoRow);
                    let plain = comparison.value(&evaluator)?;
                    let negated = comparison.get_not_if_possible().value(&evaluator)?;
                    let expected = match plain {
                        Value::Boolean(b) => Value::Boolean(!b),
                        other => other,
                    };
                    assert_eq!(negated, expected, "NOT ({} {} {})", l, op.as_str(), r);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_index_condition_column_left() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        let Expression::Comparison(cmp) = Expression::eq(col(&t, "ID"), Expression::constant(7))
        else {
            unreachable!()
        };
        let condition = cmp.index_condition(&session, &t)?.unwrap();
        assert_eq!(condition.compare_type(), CompareType::Equal);
        assert_eq!(condition.column(), &t.column("ID").unwrap());
        assert_eq!(condition.expression(), &Expression::constant(7));
        Ok(())
    }

    #[test]
    fn test_index_condition_column_right_is_reversed() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        let u = table(2, "U");
        let Expression::Comparison(cmp) = Expression::gt(col(&u, "ID"), col(&t, "ID")) else {
            unreachable!()
        };
        let condition = cmp.index_condition(&session, &t)?.unwrap();
        assert_eq!(condition.sql(), "T.ID < U.ID");

        let condition = cmp.index_condition(&session, &u)?.unwrap();
        assert_eq!(condition.sql(), "U.ID > T.ID");
        Ok(())
    }

    #[test]
    fn test_index_condition_rejections() -> ExpressionResult<()> {
        let session = Session::default();
        let t = table(1, "T");
        let u = table(2, "U");
        let rejected = [
            Expression::ne(col(&t, "ID"), Expression::constant(7)),
            Expression::ne_null_safe(col(&t, "ID"), Expression::constant(7)),
            Expression::eq(col(&t, "ID"), col(&t, "NAME")),
            Expression::eq(col(&u, "ID"), Expression::constant(7)),
            Expression::eq(
                col(&t, "ID"),
                Expression::eq(col(&t, "NAME"), Expression::constant("a")),
            ),
            Expression::is_not_null(col(&t, "ID")),
        ];
        for expr in rejected {
            let Expression::Comparison(cmp) = &expr else {
                unreachable!()
            };
            assert_eq!(cmp.index_condition(&session, &t)?, None, "{}", expr);
        }
        Ok(())
    }

    #[test]
    fn test_index_condition_is_null_setting() -> ExpressionResult<()> {
        let t = table(1, "T");
        let Expression::Comparison(cmp) = Expression::is_null(col(&t, "NAME")) else {
            unreachable!()
        };
        let session = Session::default();
        let condition = cmp.index_condition(&session, &t)?.unwrap();
        assert_eq!(condition.compare_type(), CompareType::EqualNullSafe);
        assert_eq!(condition.expression(), &Expression::null());

        let settings = DbSettings {
            optimize_is_null: false,
            ..DbSettings::default()
        };
        let session = Session::new(settings);
        assert_eq!(cmp.index_condition(&session, &t)?, None);
        Ok(())
    }

    #[test]
    fn test_get_if_equals() {
        let t = table(1, "T");
        let Expression::Comparison(cmp) = Expression::eq(col(&t, "ID"), Expression::constant(3))
        else {
            unreachable!()
        };
        assert_eq!(
            cmp.get_if_equals(&col(&t, "ID")),
            Some(&Expression::constant(3))
        );
        assert_eq!(
            cmp.get_if_equals(&Expression::constant(3)),
            Some(&col(&t, "ID"))
        );
        assert_eq!(cmp.get_if_equals(&col(&t, "NAME")), None);

        let Expression::Comparison(cmp) = Expression::ge(col(&t, "ID"), Expression::constant(3))
        else {
            unreachable!()
        };
        assert_eq!(cmp.get_if_equals(&col(&t, "ID")), None);
    }

    fn comparison(expr: Expression) -> Comparison {
        match expr {
            Expression::Comparison(cmp) => cmp,
            other => panic!("not a comparison: {}", other),
        }
    }

    #[test]
    fn test_get_additional_and() {
        let t = table(1, "T");
        let (a, b, c) = (col(&t, "ID"), col(&t, "NAME"), col(&t, "SCORE"));

        let first = comparison(Expression::eq(a.clone(), b.clone()));
        let second = comparison(Expression::eq(a.clone(), c.clone()));
        assert_eq!(
            first.get_additional(&second, true),
            Some(Expression::eq(b.clone(), c.clone()))
        );

        // every pairing of the shared operand is found
        let second = comparison(Expression::eq(c.clone(), a.clone()));
        assert_eq!(
            first.get_additional(&second, true),
            Some(Expression::eq(b.clone(), c.clone()))
        );
        let first = comparison(Expression::eq(b.clone(), a.clone()));
        let second = comparison(Expression::eq(a.clone(), c.clone()));
        assert_eq!(
            first.get_additional(&second, true),
            Some(Expression::eq(b.clone(), c.clone()))
        );
        let second = comparison(Expression::eq(c.clone(), a.clone()));
        assert_eq!(
            first.get_additional(&second, true),
            Some(Expression::eq(b.clone(), c.clone()))
        );

        // a=b AND b=1 gives a=1
        let first = comparison(Expression::eq(a.clone(), b.clone()));
        let second = comparison(Expression::eq(b, Expression::constant(1)));
        assert_eq!(
            first.get_additional(&second, true),
            Some(Expression::eq(a, Expression::constant(1)))
        );
    }

    #[test]
    fn test_get_additional_and_never_compares_constants() {
        let t = table(1, "T");
        let b = col(&t, "ID");
        let first = comparison(Expression::eq(b.clone(), Expression::constant(2)));
        let second = comparison(Expression::eq(b.clone(), Expression::constant(3)));
        assert_eq!(first.get_additional(&second, true), None);

        let second = comparison(Expression::eq(Expression::constant(3), b));
        assert_eq!(first.get_additional(&second, true), None);
    }

    #[test]
    fn test_get_additional_or() {
        let t = table(1, "T");
        let a = col(&t, "ID");
        let first = comparison(Expression::eq(a.clone(), Expression::constant(1)));
        let second = comparison(Expression::eq(a.clone(), Expression::constant(2)));
        let Some(Expression::In(condition)) = first.get_additional(&second, false) else {
            panic!("expected IN");
        };
        assert_eq!(condition.left(), &a);
        assert_eq!(
            condition.values(),
            [Expression::constant(1), Expression::constant(2)]
        );

        let first = comparison(Expression::eq(Expression::constant(1), a.clone()));
        let second = comparison(Expression::eq(Expression::constant(2), a.clone()));
        assert_eq!(
            first
                .get_additional(&second, false)
                .map(|e| e.sql()),
            Some("(T.ID IN(1, 2))".to_string())
        );

        // non-constant candidates are not merged
        let second = comparison(Expression::eq(a.clone(), col(&t, "NAME")));
        assert_eq!(first.get_additional(&second, false), None);

        // different subjects are not merged
        let second = comparison(Expression::eq(col(&t, "NAME"), Expression::constant(2)));
        assert_eq!(first.get_additional(&second, false), None);

        // only equalities
        let second = comparison(Expression::ge(a, Expression::constant(2)));
        assert_eq!(first.get_additional(&second, false), None);
    }

    #[test]
    fn test_expression_accessor() {
        let t = table(1, "T");
        let cmp = comparison(Expression::is_null(col(&t, "ID")));
        assert_eq!(cmp.expression(true), Some(&col(&t, "ID")));
        assert_eq!(cmp.expression(false), None);
    }

    #[test]
    fn test_compare_not_null_rejects_unary() {
        let policy = DatabaseCompareMode::default();
        assert!(compare_not_null(
            &policy,
            &Value::Int32(1),
            &Value::Int32(1),
            CompareType::IsNull
        )
        .is_err());
    }
}
