use crate::access::DataType;
use crate::expression::{ColumnRef, Expression, ExpressionError, ExpressionResult};
use crate::planner::IndexCondition;

/// Identifier of a table filter within one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterId(pub u32);

/// Information about a column of a table filter
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A table (or join leg) of a query, collecting what the optimizer pushes
/// down into it.
#[derive(Debug, Clone)]
pub struct TableFilter {
    id: FilterId,
    table_name: String,
    alias: String,
    columns: Vec<ColumnInfo>,
    index_conditions: Vec<IndexCondition>,
    filter_condition: Option<Expression>,
    join_condition: Option<Expression>,
}

impl TableFilter {
    pub fn new(id: FilterId, table_name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        let table_name = table_name.into();
        Self {
            id,
            alias: table_name.clone(),
            table_name,
            columns,
            index_conditions: Vec::new(),
            filter_condition: None,
            join_condition: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn id(&self) -> FilterId {
        self.id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// Resolve a column by name (case-insensitive)
    pub fn column(&self, name: &str) -> Option<ColumnRef> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
            .map(|index| {
                let info = &self.columns[index];
                ColumnRef::new(self.id, &self.alias, &info.name, index, info.data_type)
            })
    }

    pub fn column_expr(&self, name: &str) -> ExpressionResult<Expression> {
        self.column(name)
            .map(Expression::Column)
            .ok_or_else(|| ExpressionError::ColumnNotFound {
                column: format!("{}.{}", self.alias, name),
            })
    }

    pub fn add_index_condition(&mut self, condition: IndexCondition) {
        self.index_conditions.push(condition);
    }

    pub fn index_conditions(&self) -> &[IndexCondition] {
        &self.index_conditions
    }

    /// Index conditions on one column
    pub fn index_conditions_for<'a>(
        &'a self,
        column: &'a ColumnRef,
    ) -> impl Iterator<Item = &'a IndexCondition> + 'a {
        self.index_conditions
            .iter()
            .filter(move |condition| condition.column() == column)
    }

    /// Add a condition checked on every row of this filter, merging with
    /// `AND`. Join conditions are kept apart from plain filter conditions.
    pub fn add_filter_condition(&mut self, condition: Expression, is_join: bool) {
        let slot = if is_join {
            &mut self.join_condition
        } else {
            &mut self.filter_condition
        };
        *slot = Some(match slot.take() {
            Some(existing) => Expression::and(existing, condition),
            None => condition,
        });
    }

    pub fn filter_condition(&self) -> Option<&Expression> {
        self.filter_condition.as_ref()
    }

    pub fn join_condition(&self) -> Option<&Expression> {
        self.join_condition.as_ref()
    }
}
