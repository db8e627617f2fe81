use quarry_core::SqlWriter;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push(if value { '1' } else { '0' });
    }

    fn write_value_float(&self, out: &mut String, value: f64) {
        if value.is_infinite() {
            if value.is_sign_negative() {
                out.push('-');
            }
            out.push_str("1.0e+10000");
        } else if value.is_nan() {
            self.write_value_none(out);
        } else {
            out.push_str(&format!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSqlWriter;
    use quarry_core::{SqlWriter, Value};

    #[test]
    fn sqlite_literals() {
        let writer = SqliteSqlWriter {};
        let mut out = String::new();
        writer.write_insert(
            &mut out,
            "test_table",
            &[
                ("active".into(), Value::Boolean(true)),
                ("score".into(), Value::Float64(f64::NEG_INFINITY)),
                ("name".into(), Value::Varchar(":name".into())),
            ],
        );
        assert_eq!(
            out,
            r#"INSERT INTO "test_table" ("active", "score", "name") VALUES (1, -1.0e+10000, :name)"#
        );
    }
}
