use std::cmp::Ordering;

use log::debug;

use crate::access::{ComparePolicy, DataType, Value};
use crate::expression::{ColumnRef, ColumnResolver, CompareType, ExpressionResult};
use crate::planner::IndexCondition;
use crate::session::Session;

/// Defines the type of index scan to perform on one column
///
/// Bounds carry the type the predicate compares in: the higher of the
/// column type and the lookup value types. Keys are converted to that type
/// before they are compared with a bound (see [`IndexScanMode::matches`]).
#[derive(Debug, Clone, PartialEq)]
pub enum IndexScanMode {
    /// Exact match on the key
    Exact(Value),
    /// Range scan with optional bounds
    Range {
        start: Option<Value>,
        end: Option<Value>,
        include_start: bool,
        include_end: bool,
    },
    /// No row can match
    Empty,
}

struct Bound {
    value: Value,
    inclusive: bool,
}

impl IndexScanMode {
    /// Fold the index conditions on `column` into scan bounds.
    ///
    /// Returns `None` when no condition applies to the column. Lookup
    /// values are evaluated against `row`.
    pub fn from_conditions<'a>(
        conditions: impl IntoIterator<Item = &'a IndexCondition>,
        column: &ColumnRef,
        session: &Session,
        row: &dyn ColumnResolver,
    ) -> ExpressionResult<Option<IndexScanMode>> {
        let policy = session.compare_policy();
        let mut null_key = false;
        let mut lookups = Vec::new();
        let mut target = column.data_type;

        for condition in conditions.into_iter().filter(|c| c.column() == column) {
            let value = condition.current_value(session, row)?;
            if value.is_null() {
                // only `col IS NULL` may look up the NULL key
                if condition.compare_type() != CompareType::EqualNullSafe {
                    debug!("empty index scan: {}", condition.sql());
                    return Ok(Some(IndexScanMode::Empty));
                }
                null_key = true;
                continue;
            }
            let value_type = condition.expression().data_type().or(value.data_type());
            target = DataType::higher_order(Some(target), value_type).unwrap_or(target);
            lookups.push((condition, value));
        }

        if lookups.is_empty() && !null_key {
            return Ok(None);
        }
        if null_key {
            return Ok(Some(if lookups.is_empty() {
                IndexScanMode::Exact(Value::Null)
            } else {
                IndexScanMode::Empty
            }));
        }

        let mut exact: Option<Value> = None;
        let mut start: Option<Bound> = None;
        let mut end: Option<Bound> = None;
        for (condition, value) in lookups {
            let value = value.convert_to(target)?;
            if condition.is_equality() {
                if let Some(existing) = &exact {
                    if !policy.are_equal(existing, &value)? {
                        return Ok(Some(IndexScanMode::Empty));
                    }
                } else {
                    exact = Some(value);
                }
                continue;
            }
            let inclusive = matches!(
                condition.compare_type(),
                CompareType::GreaterOrEqual | CompareType::LessOrEqual
            );
            let bound = Bound { value, inclusive };
            if condition.is_start() {
                start = Some(tighten(policy, start, bound, Ordering::Greater)?);
            } else if condition.is_end() {
                end = Some(tighten(policy, end, bound, Ordering::Less)?);
            }
        }

        if let Some(value) = exact {
            let after_start = match &start {
                Some(s) => satisfies(policy, &value, &s.value, s.inclusive, Ordering::Greater)?,
                None => true,
            };
            let before_end = match &end {
                Some(e) => satisfies(policy, &value, &e.value, e.inclusive, Ordering::Less)?,
                None => true,
            };
            return Ok(Some(if after_start && before_end {
                IndexScanMode::Exact(value)
            } else {
                IndexScanMode::Empty
            }));
        }
        if let (Some(s), Some(e)) = (&start, &end) {
            match policy.compare(&s.value, &e.value)? {
                Ordering::Greater => return Ok(Some(IndexScanMode::Empty)),
                Ordering::Equal if s.inclusive && e.inclusive => {
                    return Ok(Some(IndexScanMode::Exact(s.value.clone())));
                }
                Ordering::Equal => return Ok(Some(IndexScanMode::Empty)),
                Ordering::Less => {}
            }
        }
        let (start, include_start) = split(start);
        let (end, include_end) = split(end);
        Ok(Some(IndexScanMode::Range {
            start,
            end,
            include_start,
            include_end,
        }))
    }

    /// Whether an index key falls into this scan
    pub fn matches(&self, key: &Value, policy: &dyn ComparePolicy) -> ExpressionResult<bool> {
        match self {
            IndexScanMode::Empty => Ok(false),
            IndexScanMode::Exact(Value::Null) => Ok(key.is_null()),
            IndexScanMode::Exact(value) => {
                if key.is_null() {
                    return Ok(false);
                }
                policy.are_equal(&convert_key(key, value)?, value)
            }
            IndexScanMode::Range {
                start,
                end,
                include_start,
                include_end,
            } => {
                if key.is_null() {
                    return Ok(false);
                }
                let in_start = match start {
                    Some(value) => satisfies(
                        policy,
                        &convert_key(key, value)?,
                        value,
                        *include_start,
                        Ordering::Greater,
                    )?,
                    None => true,
                };
                let in_end = match end {
                    Some(value) => satisfies(
                        policy,
                        &convert_key(key, value)?,
                        value,
                        *include_end,
                        Ordering::Less,
                    )?,
                    None => true,
                };
                Ok(in_start && in_end)
            }
        }
    }
}

/// Convert a key to the type of a non-NULL bound
fn convert_key(key: &Value, bound: &Value) -> ExpressionResult<Value> {
    match bound.data_type() {
        Some(data_type) => key.convert_to(data_type),
        None => Ok(key.clone()),
    }
}

/// Keep the stricter of two bounds. `stricter` is the ordering a value must
/// have against the other to replace it.
fn tighten(
    policy: &dyn ComparePolicy,
    current: Option<Bound>,
    candidate: Bound,
    stricter: Ordering,
) -> ExpressionResult<Bound> {
    let Some(current) = current else {
        return Ok(candidate);
    };
    let ordering = policy.compare(&candidate.value, &current.value)?;
    Ok(if ordering == stricter {
        candidate
    } else if ordering == Ordering::Equal {
        Bound {
            value: current.value,
            inclusive: current.inclusive && candidate.inclusive,
        }
    } else {
        current
    })
}

/// Whether `value` lies on the inner side of `bound`
fn satisfies(
    policy: &dyn ComparePolicy,
    value: &Value,
    bound: &Value,
    inclusive: bool,
    inner: Ordering,
) -> ExpressionResult<bool> {
    let ordering = policy.compare(value, bound)?;
    Ok(ordering == inner || (ordering == Ordering::Equal && inclusive))
}

fn split(bound: Option<Bound>) -> (Option<Value>, bool) {
    match bound {
        Some(bound) => (Some(bound.value), bound.inclusive),
        None => (None, false),
    }
}
