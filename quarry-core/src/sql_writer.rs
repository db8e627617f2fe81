use crate::{Value, is_marker, separated_by};
use std::fmt::Write;

/// Dialect aware SQL rendering.
///
/// Every method has a default producing ANSI-ish SQL, drivers override the
/// pieces their backend spells differently.
pub trait SqlWriter: Send + Sync {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Write `value` replacing every `search` with `replace`.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    /// Render a possibly schema qualified table name, `schema.table`.
    fn write_table_name(&self, out: &mut String, value: &str) {
        separated_by(
            out,
            value.split('.'),
            |out, part| self.write_identifier_quoted(out, part),
            ".",
        );
    }

    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL");
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["FALSE", "TRUE"][value as usize]);
    }

    fn write_value_float(&self, out: &mut String, value: f64) {
        if value.is_finite() {
            let _ = write!(out, "{:?}", value);
        } else {
            log::warn!("Cannot write the non finite float {} as a literal, writing NULL", value);
            self.write_value_none(out);
        }
    }

    /// Single quoted string literal doubling inner quotes.
    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a blob literal using hex escapes.
    fn write_value_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null => self.write_value_none(out),
            Value::Boolean(v) => self.write_value_bool(out, *v),
            Value::Int64(v) => {
                let _ = write!(out, "{}", v);
            }
            Value::UInt64(v) => {
                let _ = write!(out, "{}", v);
            }
            Value::Float64(v) => self.write_value_float(out, *v),
            Value::Varchar(v) => self.write_value_string(out, v),
            Value::Blob(v) => self.write_value_blob(out, v),
        }
    }

    /// Write a value of an insert column: markers (`?`, `:name`) verbatim,
    /// anything else as a literal.
    fn write_insert_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Varchar(v) if is_marker(v) => out.push_str(v),
            _ => self.write_value(out, value),
        }
    }

    /// Emit a single row INSERT statement.
    fn write_insert(&self, out: &mut String, table: &str, columns: &[(String, Value)]) {
        out.reserve(32 + table.len() + columns.len() * 24);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("INSERT INTO ");
        self.write_table_name(out, table);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, (name, _)| self.write_identifier_quoted(out, name),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            columns,
            |out, (_, value)| self.write_insert_value(out, value),
            ", ",
        );
        out.push(')');
    }
}

/// Dialect using only the defaults.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
