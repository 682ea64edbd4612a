//! Statement parameters.
//!
//! A parameter is shared between the statement that owns it and every
//! expression that reads it. Optimization records the type of the column the
//! parameter is compared against; execution sets the value before rows are
//! evaluated.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::access::{DataType, Value};
use crate::expression::{ExpressionError, ExpressionResult};

#[derive(Debug, Default)]
struct ParameterSlot {
    value: RwLock<Option<Value>>,
    column_type: RwLock<Option<DataType>>,
}

/// Statement parameter `?n`
#[derive(Debug, Clone)]
pub struct Parameter {
    /// 0-based position in the statement
    index: usize,
    slot: Arc<ParameterSlot>,
}

impl Parameter {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            slot: Arc::new(ParameterSlot::default()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_value(&self, value: Value) {
        *self.slot.value.write() = Some(value);
    }

    pub fn value(&self) -> ExpressionResult<Value> {
        self.slot
            .value
            .read()
            .clone()
            .ok_or(ExpressionError::ParameterNotSet {
                index: self.index + 1,
            })
    }

    /// Record the type of the column this parameter is compared with.
    pub fn set_column_type(&self, data_type: DataType) {
        *self.slot.column_type.write() = Some(data_type);
    }

    pub fn column_type(&self) -> Option<DataType> {
        *self.slot.column_type.read()
    }

    /// Bound column type, falling back to the type of the current value.
    pub fn data_type(&self) -> Option<DataType> {
        self.column_type()
            .or_else(|| self.slot.value.read().as_ref().and_then(Value::data_type))
    }

    pub fn sql(&self) -> String {
        format!("?{}", self.index + 1)
    }
}

/// Two parameters are the same expression when they stand for the same
/// statement position.
impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_slot_is_shared() {
        let parameter = Parameter::new(0);
        let copy = parameter.clone();
        assert_eq!(
            copy.value(),
            Err(ExpressionError::ParameterNotSet { index: 1 })
        );
        parameter.set_value(Value::Int32(3));
        assert_eq!(copy.value(), Ok(Value::Int32(3)));
    }

    #[test]
    fn test_data_type() {
        let parameter = Parameter::new(1);
        assert_eq!(parameter.data_type(), None);
        parameter.set_value(Value::String("7".to_string()));
        assert_eq!(parameter.data_type(), Some(DataType::Varchar));
        parameter.set_column_type(DataType::Int64);
        assert_eq!(parameter.data_type(), Some(DataType::Int64));
        assert_eq!(parameter.sql(), "?2");
    }
}
