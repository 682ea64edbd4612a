use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expression::{ExpressionError, ExpressionResult};

/// Data types supported by the database
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean = 1,
    Int32 = 2,
    Int64 = 3,
    Varchar = 4,
    Double = 5,
}

impl DataType {
    /// Rank used to pick the common type of two comparison operands.
    ///
    /// Numbers outrank strings, so `'5' = 5` compares as integers.
    fn order(self) -> u32 {
        match self {
            DataType::Varchar => 10,
            DataType::Boolean => 20,
            DataType::Int32 => 23,
            DataType::Int64 => 24,
            DataType::Double => 27,
        }
    }

    /// Get the common type two operands are converted to before comparing.
    ///
    /// `None` stands for the type of a NULL literal (or an unknown type) and
    /// loses against any concrete type.
    pub fn higher_order(left: Option<DataType>, right: Option<DataType>) -> Option<DataType> {
        match (left, right) {
            (Some(l), Some(r)) => Some(if l.order() >= r.order() { l } else { r }),
            (Some(t), None) | (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int32 => "INT",
            DataType::Int64 => "BIGINT",
            DataType::Varchar => "VARCHAR",
            DataType::Double => "DOUBLE",
        };
        f.write_str(name)
    }
}

/// Values that can be stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
}

impl Value {
    /// Get the data type of this value
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int32(_) => Some(DataType::Int32),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Double(_) => Some(DataType::Double),
            Value::String(_) => Some(DataType::Varchar),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Three-valued boolean view: `None` is unknown.
    pub fn as_bool(&self) -> ExpressionResult<Option<bool>> {
        match self.convert_to(DataType::Boolean)? {
            Value::Null => Ok(None),
            Value::Boolean(b) => Ok(Some(b)),
            other => Err(ExpressionError::DataConversion {
                value: other.to_sql(),
                target: DataType::Boolean,
            }),
        }
    }

    /// Convert this value to the given type. NULL stays NULL.
    pub fn convert_to(&self, target: DataType) -> ExpressionResult<Value> {
        if self.data_type() == Some(target) || self.is_null() {
            return Ok(self.clone());
        }
        let converted = match (self, target) {
            (Value::String(s), DataType::Boolean) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" => Some(Value::Boolean(true)),
                "false" | "f" | "no" | "n" | "0" => Some(Value::Boolean(false)),
                _ => None,
            },
            (Value::Int32(i), DataType::Boolean) => Some(Value::Boolean(*i != 0)),
            (Value::Int64(i), DataType::Boolean) => Some(Value::Boolean(*i != 0)),
            (Value::Double(d), DataType::Boolean) => Some(Value::Boolean(*d != 0.0)),

            (Value::Boolean(b), DataType::Int32) => Some(Value::Int32(i32::from(*b))),
            (Value::Int64(i), DataType::Int32) => i32::try_from(*i).ok().map(Value::Int32),
            (Value::Double(d), DataType::Int32) => {
                let rounded = d.round();
                (rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX))
                    .then(|| Value::Int32(rounded as i32))
            }
            (Value::String(s), DataType::Int32) => s.trim().parse().ok().map(Value::Int32),

            (Value::Boolean(b), DataType::Int64) => Some(Value::Int64(i64::from(*b))),
            (Value::Int32(i), DataType::Int64) => Some(Value::Int64(i64::from(*i))),
            (Value::Double(d), DataType::Int64) => {
                let rounded = d.round();
                (rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
                    .then(|| Value::Int64(rounded as i64))
            }
            (Value::String(s), DataType::Int64) => s.trim().parse().ok().map(Value::Int64),

            (Value::Boolean(b), DataType::Double) => Some(Value::Double(if *b { 1.0 } else { 0.0 })),
            (Value::Int32(i), DataType::Double) => Some(Value::Double(f64::from(*i))),
            (Value::Int64(i), DataType::Double) => Some(Value::Double(*i as f64)),
            (Value::String(s), DataType::Double) => s.trim().parse().ok().map(Value::Double),

            (v, DataType::Varchar) => Some(Value::String(v.to_string())),
            _ => None,
        };
        converted.ok_or_else(|| ExpressionError::DataConversion {
            value: self.to_sql(),
            target,
        })
    }

    /// Render this value as a SQL literal.
    pub fn to_sql(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Int32(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Double(d) if d.is_finite() && d.fract() == 0.0 => write!(f, "{:.1}", d),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
