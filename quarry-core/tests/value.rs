#[cfg(test)]
mod tests {
    use quarry_core::{AsValue, DataType, ErrorKind, Value};

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float64(1.0), Value::Null);
        assert!(Value::Null.is_null());
        assert_eq!(Option::<i32>::None.as_value(), Value::Null);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn value_integers() {
        assert_eq!(3008i32.as_value(), Value::Int64(3008));
        assert_eq!((-5i8).as_value(), Value::Int64(-5));
        assert_eq!(7u16.as_value(), Value::UInt64(7));
        assert_eq!(i8::try_from_value(Value::UInt64(99)).unwrap(), 99);
        assert!(i8::try_from_value(Value::Int64(300)).is_err());
        assert!(u32::try_from_value(Value::Int64(-1)).is_err());
        assert_eq!(i64::try_from_value(Value::Varchar(" 42 ".into())).unwrap(), 42);
        assert!(i64::try_from_value(Value::Float64(0.1)).is_err());
    }

    #[test]
    fn value_text_and_blob() {
        assert_eq!("Isis".as_value(), Value::Varchar("Isis".into()));
        assert_eq!(
            String::try_from_value(Value::Blob(b"isis@email.com".as_slice().into())).unwrap(),
            "isis@email.com"
        );
        assert_eq!(vec![1u8, 2, 3].as_value(), Value::Blob(Box::new([1u8, 2, 3])));
        assert!(String::try_from_value(Value::Blob(Box::new([0xffu8, 0xfe]))).is_err());
    }

    #[test]
    fn value_bool() {
        assert_eq!(true.as_value(), Value::Boolean(true));
        assert!(bool::try_from_value(Value::Int64(1)).unwrap());
        assert!(!bool::try_from_value(Value::UInt64(0)).unwrap());
        assert!(bool::try_from_value(Value::Float64(0.5)).is_err());
    }

    #[test]
    fn data_type_parse() {
        assert_eq!("int".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("str".parse::<DataType>().unwrap(), DataType::Str);
        assert_eq!("BOOL".parse::<DataType>().unwrap(), DataType::Bool);
        assert_eq!(" null ".parse::<DataType>().unwrap(), DataType::Null);
        assert_eq!("blob".parse::<DataType>().unwrap(), DataType::Lob);
        let error = "float".parse::<DataType>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Binding);
        assert!(error.message().contains("float"));
    }

    #[test]
    fn data_type_inferred() {
        assert_eq!(Value::Int64(1).data_type(), DataType::Int);
        assert_eq!(Value::UInt64(1).data_type(), DataType::Int);
        assert_eq!(Value::Varchar("Isis".into()).data_type(), DataType::Str);
        assert_eq!(Value::Float64(1.5).data_type(), DataType::Str);
        assert_eq!(Value::Boolean(false).data_type(), DataType::Bool);
        assert_eq!(Value::Null.data_type(), DataType::Null);
        assert_eq!(Value::Blob(Box::new([0u8; 0])).data_type(), DataType::Lob);
    }

    #[test]
    fn coerce_int() {
        assert_eq!(Value::Int64(3008).coerce(DataType::Int).unwrap(), Value::Int64(3008));
        assert_eq!(
            Value::Varchar(" 3008".into()).coerce(DataType::Int).unwrap(),
            Value::Int64(3008)
        );
        assert_eq!(Value::Boolean(true).coerce(DataType::Int).unwrap(), Value::Int64(1));
        assert_eq!(Value::Float64(-2.9).coerce(DataType::Int).unwrap(), Value::Int64(-2));
        assert!(Value::Varchar("Isis".into()).coerce(DataType::Int).is_err());
        assert!(Value::Float64(f64::NAN).coerce(DataType::Int).is_err());
        assert!(Value::Float64(1e30).coerce(DataType::Int).is_err());
        assert!(Value::Float64(-1e30).coerce(DataType::Int).is_err());
        assert!(Value::Float64(9_223_372_036_854_775_808.0).coerce(DataType::Int).is_err());
        assert_eq!(
            Value::Float64(-9_223_372_036_854_775_808.0).coerce(DataType::Int).unwrap(),
            Value::Int64(i64::MIN)
        );
    }

    #[test]
    fn coerce_str() {
        assert_eq!(
            Value::Varchar("Isis".into()).coerce(DataType::Str).unwrap(),
            Value::Varchar("Isis".into())
        );
        assert_eq!(
            Value::Int64(4883).coerce(DataType::Str).unwrap(),
            Value::Varchar("4883".into())
        );
        assert_eq!(
            Value::Boolean(false).coerce(DataType::Str).unwrap(),
            Value::Varchar("0".into())
        );
        assert!(Value::Blob(Box::new([0xffu8])).coerce(DataType::Str).is_err());
    }

    #[test]
    fn coerce_bool_null_lob() {
        assert_eq!(Value::Varchar("0".into()).coerce(DataType::Bool).unwrap(), Value::Boolean(false));
        assert_eq!(Value::Varchar("no".into()).coerce(DataType::Bool).unwrap(), Value::Boolean(true));
        assert_eq!(Value::Int64(0).coerce(DataType::Bool).unwrap(), Value::Boolean(false));
        assert_eq!(Value::Int64(12).coerce(DataType::Null).unwrap(), Value::Null);
        assert_eq!(
            Value::Varchar("ab".into()).coerce(DataType::Lob).unwrap(),
            Value::Blob(b"ab".as_slice().into())
        );
        for data_type in [DataType::Int, DataType::Str, DataType::Bool, DataType::Lob] {
            assert_eq!(Value::Null.coerce(data_type).unwrap(), Value::Null);
        }
    }
}
