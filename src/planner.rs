//! Planner-side consumers of predicates.
//!
//! A [`TableFilter`] is one row source of a query plan. The optimizer hands
//! it the index conditions harvested from the `WHERE` clause and the
//! conditions pushed down to it; [`IndexScanMode`] turns the index
//! conditions of a column into the bounds of an index lookup.

pub mod index_condition;
pub mod index_scan;
pub mod table_filter;

pub use index_condition::IndexCondition;
pub use index_scan::IndexScanMode;
pub use table_filter::{ColumnInfo, FilterId, TableFilter};
