use crate::{Error, Result, Value};
use std::any;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// Every type accepted as a binding or as a column value in an insert
/// implements it.
///
/// # Examples
/// ```rust
/// use quarry_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int64(42));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] back into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} into {}",
        value,
        any::type_name::<T>()
    ))
}

impl AsValue for Value {
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! impl_as_value_signed {
    ($($ty:ty),+) => {$(
        impl AsValue for $ty {
            fn as_value(self) -> Value {
                Value::Int64(self as i64)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Int64(v) => <$ty>::try_from(v).map_err(|_| mismatch::<$ty>(&value)),
                    Value::UInt64(v) => <$ty>::try_from(v).map_err(|_| mismatch::<$ty>(&value)),
                    Value::Varchar(ref v) => v.trim().parse::<$ty>().map_err(|_| mismatch::<$ty>(&value)),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )+};
}

macro_rules! impl_as_value_unsigned {
    ($($ty:ty),+) => {$(
        impl AsValue for $ty {
            fn as_value(self) -> Value {
                Value::UInt64(self as u64)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Int64(v) => <$ty>::try_from(v).map_err(|_| mismatch::<$ty>(&value)),
                    Value::UInt64(v) => <$ty>::try_from(v).map_err(|_| mismatch::<$ty>(&value)),
                    Value::Varchar(ref v) => v.trim().parse::<$ty>().map_err(|_| mismatch::<$ty>(&value)),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )+};
}

impl_as_value_signed!(i8, i16, i32, i64);
impl_as_value_unsigned!(u8, u16, u32, u64);

impl AsValue for f64 {
    fn as_value(self) -> Value {
        Value::Float64(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(v) => Ok(v),
            Value::Int64(v) => Ok(v as f64),
            Value::UInt64(v) => Ok(v as f64),
            Value::Varchar(ref v) => v.trim().parse().map_err(|_| mismatch::<f64>(&value)),
            _ => Err(mismatch::<f64>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn as_value(self) -> Value {
        Value::Float64(self as f64)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        f64::try_from_value(value).map(|v| v as f32)
    }
}

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            Value::Int64(v) => Ok(v != 0),
            Value::UInt64(v) => Ok(v != 0),
            _ => Err(mismatch::<bool>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v),
            Value::Blob(v) => String::from_utf8(v.into_vec()).map_err(Error::new),
            Value::Int64(v) => Ok(v.to_string()),
            Value::UInt64(v) => Ok(v.to_string()),
            Value::Float64(v) => Ok(v.to_string()),
            _ => Err(mismatch::<String>(&value)),
        }
    }
}

impl AsValue for &str {
    fn as_value(self) -> Value {
        Value::Varchar(self.into())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(mismatch::<&str>(&value).context("Use String to decode text values"))
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(self.into())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v.into_vec()),
            Value::Varchar(v) => Ok(v.into_bytes()),
            _ => Err(mismatch::<Vec<u8>>(&value)),
        }
    }
}

impl AsValue for &[u8] {
    fn as_value(self) -> Value {
        Value::Blob(self.into())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(mismatch::<&[u8]>(&value).context("Use Vec<u8> to decode blob values"))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
