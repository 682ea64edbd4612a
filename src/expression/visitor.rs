use crate::expression::ColumnRef;
use crate::planner::FilterId;

/// Property checked over a whole expression tree by
/// [`Expression::is_everything`](crate::expression::Expression::is_everything).
#[derive(Debug, Clone, Copy)]
pub enum ExpressionVisitor<'a> {
    /// No column is read from the given filter
    NotFromResolver(FilterId),
    /// Every column is read from one of the given filters
    Evaluatable(&'a [FilterId]),
}

impl ExpressionVisitor<'_> {
    pub(crate) fn accepts_column(&self, column: &ColumnRef) -> bool {
        match self {
            ExpressionVisitor::NotFromResolver(filter) => column.filter != *filter,
            ExpressionVisitor::Evaluatable(filters) => filters.contains(&column.filter),
        }
    }
}
