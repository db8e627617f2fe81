use quarry_core::Value;
use std::fmt::Write;

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<ValueWrap> for Value {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

impl mysql_async::prelude::FromValue for ValueWrap {
    type Intermediate = ValueWrap;
}

fn write_fraction(out: &mut String, micros: u32) {
    if micros != 0 {
        let _ = write!(out, ".{:06}", micros);
    }
}

impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = mysql_async::FromValueError;

    fn try_from(value: mysql_async::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            mysql_async::Value::NULL => Value::Null,
            mysql_async::Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => Value::Varchar(v),
                Err(e) => Value::Blob(e.into_bytes().into()),
            },
            mysql_async::Value::Int(v) => Value::Int64(v),
            mysql_async::Value::UInt(v) => Value::UInt64(v),
            mysql_async::Value::Float(v) => Value::Float64(v.into()),
            mysql_async::Value::Double(v) => Value::Float64(v),
            mysql_async::Value::Date(year, month, day, hour, minute, second, micros) => {
                let mut out = format!("{:04}-{:02}-{:02}", year, month, day);
                if (hour, minute, second, micros) != (0, 0, 0, 0) {
                    let _ = write!(out, " {:02}:{:02}:{:02}", hour, minute, second);
                    write_fraction(&mut out, micros);
                }
                Value::Varchar(out)
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micros) => {
                let mut out = String::new();
                if negative {
                    out.push('-');
                }
                let hours = days as u64 * 24 + hours as u64;
                let _ = write!(out, "{:02}:{:02}:{:02}", hours, minutes, seconds);
                write_fraction(&mut out, micros);
                Value::Varchar(out)
            }
        }
        .into())
    }
}

impl From<ValueWrap> for mysql_async::Value {
    fn from(value: ValueWrap) -> Self {
        match value.0 {
            Value::Null => mysql_async::Value::NULL,
            Value::Boolean(v) => mysql_async::Value::Int(v as i64),
            Value::Int64(v) => mysql_async::Value::Int(v),
            Value::UInt64(v) => mysql_async::Value::UInt(v),
            Value::Float64(v) => mysql_async::Value::Double(v),
            Value::Varchar(v) => mysql_async::Value::Bytes(v.into_bytes()),
            Value::Blob(v) => mysql_async::Value::Bytes(v.into_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValueWrap;
    use quarry_core::Value;

    fn decode(value: mysql_async::Value) -> Value {
        match ValueWrap::try_from(value) {
            Ok(v) => v.0,
            Err(e) => panic!("Could not decode {:?}", e.0),
        }
    }

    #[test]
    fn decode_values() {
        assert_eq!(decode(mysql_async::Value::NULL), Value::Null);
        assert_eq!(
            decode(mysql_async::Value::Bytes(b"Isis".to_vec())),
            Value::Varchar("Isis".into())
        );
        assert_eq!(
            decode(mysql_async::Value::Bytes(vec![0xff, 0x00])),
            Value::Blob(vec![0xff, 0x00].into())
        );
        assert_eq!(decode(mysql_async::Value::Int(-3)), Value::Int64(-3));
        assert_eq!(
            decode(mysql_async::Value::Date(2025, 3, 9, 0, 0, 0, 0)),
            Value::Varchar("2025-03-09".into())
        );
        assert_eq!(
            decode(mysql_async::Value::Date(2025, 3, 9, 14, 5, 1, 250)),
            Value::Varchar("2025-03-09 14:05:01.000250".into())
        );
        assert_eq!(
            decode(mysql_async::Value::Time(true, 1, 2, 3, 4, 0)),
            Value::Varchar("-26:03:04".into())
        );
    }

    #[test]
    fn encode_values() {
        assert_eq!(
            mysql_async::Value::from(ValueWrap(Value::Boolean(true))),
            mysql_async::Value::Int(1)
        );
        assert_eq!(
            mysql_async::Value::from(ValueWrap(Value::Varchar("Isis".into()))),
            mysql_async::Value::Bytes(b"Isis".to_vec())
        );
        assert_eq!(
            mysql_async::Value::from(ValueWrap(Value::Null)),
            mysql_async::Value::NULL
        );
    }
}
