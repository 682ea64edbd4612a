use crate::access::DataType;
use crate::planner::FilterId;

/// Column of a table filter, as seen by an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table filter the column is read from
    pub filter: FilterId,
    /// Alias of the table filter, used for display
    pub table_alias: String,
    pub name: String,
    /// Column index in the filter's rows (0-based)
    pub index: usize,
    /// Declared type of the column
    pub data_type: DataType,
}

impl ColumnRef {
    pub fn new(
        filter: FilterId,
        table_alias: impl Into<String>,
        name: impl Into<String>,
        index: usize,
        data_type: DataType,
    ) -> Self {
        Self {
            filter,
            table_alias: table_alias.into(),
            name: name.into(),
            index,
            data_type,
        }
    }

    pub fn sql(&self) -> String {
        format!("{}.{}", self.table_alias, self.name)
    }
}
