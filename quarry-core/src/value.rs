use crate::{DatabaseError, ErrorKind, Result, truncate_long};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Dynamically typed scalar moved between Rust and the database.
///
/// It is the value carried by statement bindings, the literal written into
/// synthesized SQL and the cell decoded from result rows.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Varchar(String),
    Blob(Box<[u8]>),
}

/// Binding type hint.
///
/// Mirrors the handful of parameter types native drivers distinguish. When a
/// statement carries no hint, [`Value::data_type`] infers one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Null,
    Int,
    Str,
    Lob,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Null => "null",
            DataType::Int => "int",
            DataType::Str => "str",
            DataType::Lob => "lob",
        }
    }
}

impl FromStr for DataType {
    type Err = DatabaseError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => DataType::Bool,
            "null" => DataType::Null,
            "int" | "integer" => DataType::Int,
            "str" | "string" => DataType::Str,
            "lob" | "blob" => DataType::Lob,
            _ => {
                return Err(DatabaseError::new(
                    ErrorKind::Binding,
                    format!("Unknown data type `{}`", truncate_long!(value)),
                ));
            }
        })
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type a native driver would infer for this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Boolean(..) => DataType::Bool,
            Value::Int64(..) | Value::UInt64(..) => DataType::Int,
            Value::Float64(..) | Value::Varchar(..) => DataType::Str,
            Value::Blob(..) => DataType::Lob,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(v) => Some(v),
            _ => None,
        }
    }

    /// Convert the value so that it is sent to the driver as `data_type`.
    ///
    /// `Null` stays `Null` under every hint.
    pub fn coerce(self, data_type: DataType) -> Result<Value> {
        if self.is_null() {
            return Ok(self);
        }
        let error = |value: &Value| {
            let error = DatabaseError::new(
                ErrorKind::Binding,
                format!("Cannot bind {:?} as `{}`", value, data_type),
            );
            log::error!("{}", error);
            error
        };
        Ok(match data_type {
            DataType::Null => Value::Null,
            DataType::Int => match self {
                Value::Boolean(v) => Value::Int64(v as i64),
                Value::Int64(..) | Value::UInt64(..) => self,
                // `i64::MAX as f64` rounds up to 2^63, which is already out of range
                Value::Float64(v) if (i64::MIN as f64..i64::MAX as f64).contains(&v.trunc()) => {
                    Value::Int64(v.trunc() as i64)
                }
                Value::Varchar(ref v) => match v.trim().parse::<i64>() {
                    Ok(v) => Value::Int64(v),
                    Err(..) => return Err(error(&self).into()),
                },
                _ => return Err(error(&self).into()),
            },
            DataType::Str => match self {
                Value::Boolean(v) => Value::Varchar(if v { "1" } else { "0" }.into()),
                Value::Int64(v) => Value::Varchar(v.to_string()),
                Value::UInt64(v) => Value::Varchar(v.to_string()),
                Value::Float64(v) => Value::Varchar(v.to_string()),
                Value::Varchar(..) => self,
                Value::Blob(ref v) => match std::str::from_utf8(v) {
                    Ok(v) => Value::Varchar(v.into()),
                    Err(..) => return Err(error(&self).into()),
                },
                Value::Null => Value::Null,
            },
            DataType::Bool => match self {
                Value::Boolean(..) => self,
                Value::Int64(v) => Value::Boolean(v != 0),
                Value::UInt64(v) => Value::Boolean(v != 0),
                Value::Float64(v) => Value::Boolean(v != 0.0),
                Value::Varchar(v) => Value::Boolean(!(v.is_empty() || v == "0")),
                Value::Blob(v) => Value::Boolean(!(v.is_empty() || v.as_ref() == b"0")),
                Value::Null => Value::Null,
            },
            DataType::Lob => match self {
                Value::Blob(..) => self,
                Value::Varchar(v) => Value::Blob(v.into_bytes().into()),
                Value::Boolean(v) => Value::Blob(Box::new([if v { b'1' } else { b'0' }])),
                Value::Int64(v) => Value::Blob(v.to_string().into_bytes().into()),
                Value::UInt64(v) => Value::Blob(v.to_string().into_bytes().into()),
                Value::Float64(v) => Value::Blob(v.to_string().into_bytes().into()),
                Value::Null => Value::Null,
            },
        })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Varchar(v) => write!(f, "{}", truncate_long!(v)),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}
