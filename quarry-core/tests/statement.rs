#[cfg(test)]
mod tests {
    use quarry_core::{DataType, Marker, Statement, Statements, Value, is_marker};

    #[test]
    fn marker_normalization() {
        assert_eq!(Marker::named(":name"), Marker::Named(":name".into()));
        assert_eq!(Marker::named("name"), Marker::Named(":name".into()));
        assert_eq!(Marker::from(2u64), Marker::Position(2));
        assert_eq!(Marker::named("email").to_string(), ":email");
        assert_eq!(Marker::Position(3).to_string(), "?3");
    }

    #[test]
    fn markers_in_insert_values() {
        assert!(is_marker("?"));
        assert!(is_marker(":name"));
        assert!(is_marker(":_email2"));
        assert!(!is_marker(":"));
        assert!(!is_marker(":2name"));
        assert!(!is_marker("isis@email.com"));
        assert!(!is_marker("??"));
        assert!(!is_marker(":name email"));
    }

    #[test]
    fn statements_from_tuples() {
        let named: Statement = (":name", "Isis").into();
        assert_eq!(named.marker, Marker::Named(":name".into()));
        assert_eq!(named.value, Value::Varchar("Isis".into()));
        assert_eq!(named.data_type, None);

        let typed: Statement = (":id", 3008, DataType::Int).into();
        assert_eq!(typed.data_type, Some(DataType::Int));

        let positional = Statement::position(1, "Isis").with_type(DataType::Str);
        assert_eq!(positional.marker, Marker::Position(1));
        assert_eq!(positional.data_type, Some(DataType::Str));
    }

    #[test]
    fn resolved_value_follows_the_hint() {
        let statement = Statement::named(":id", "3008").with_type(DataType::Int);
        assert_eq!(statement.resolved_value().unwrap(), Value::Int64(3008));
        let statement = Statement::named(":id", 3008);
        assert_eq!(statement.resolved_value().unwrap(), Value::Int64(3008));
        let statement = Statement::named(":id", "x").with_type(DataType::Int);
        assert!(statement.resolved_value().is_err());
    }

    #[test]
    fn statements_collection() {
        let mut statements = Statements::new();
        assert!(statements.is_empty());
        statements
            .push((":name", "Isis"))
            .push((":email", "isis@email.com"));
        assert_eq!(statements.len(), 2);
        let markers: Vec<_> = statements.iter().map(|s| s.marker.to_string()).collect();
        assert_eq!(markers, [":name", ":email"]);

        let from_array: Statements = [
            Statement::position(1, "Isis"),
            Statement::position(2, "isis@email.com"),
        ]
        .into();
        assert_eq!(from_array.len(), 2);
        assert!(Statements::from(()).is_empty());
    }
}
