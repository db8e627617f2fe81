use crate::{AsValue, DataType, DatabaseError, ErrorKind, Prepared, Result, Value};
use std::{
    fmt::{self, Display},
    slice, vec,
};

/// Placeholder a bound value replaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `:name`, always stored with the leading colon.
    Named(String),
    /// `?`, 1-indexed in order of appearance.
    Position(u64),
}

impl Marker {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.starts_with(':') {
            Marker::Named(name)
        } else {
            Marker::Named(format!(":{}", name))
        }
    }

    pub fn position(position: u64) -> Self {
        Marker::Position(position)
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Named(name) => f.write_str(name),
            Marker::Position(position) => write!(f, "?{}", position),
        }
    }
}

impl From<&str> for Marker {
    fn from(value: &str) -> Self {
        Marker::named(value)
    }
}

impl From<String> for Marker {
    fn from(value: String) -> Self {
        Marker::named(value)
    }
}

impl From<u64> for Marker {
    fn from(value: u64) -> Self {
        Marker::Position(value)
    }
}

/// True when `value` written in an insert is a placeholder rather than data.
pub fn is_marker(value: &str) -> bool {
    if value == "?" {
        return true;
    }
    let Some(name) = value.strip_prefix(':') else {
        return false;
    };
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One binding: the marker, the value and the optional type hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub marker: Marker,
    pub value: Value,
    pub data_type: Option<DataType>,
}

impl Statement {
    pub fn new(marker: impl Into<Marker>, value: impl AsValue) -> Self {
        Self {
            marker: marker.into(),
            value: value.as_value(),
            data_type: None,
        }
    }

    pub fn named(name: impl Into<String>, value: impl AsValue) -> Self {
        Self::new(Marker::named(name), value)
    }

    pub fn position(position: u64, value: impl AsValue) -> Self {
        Self::new(Marker::Position(position), value)
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// The value as it must be sent: coerced to the hint when one is present.
    pub fn resolved_value(&self) -> Result<Value> {
        match self.data_type {
            Some(data_type) => self.value.clone().coerce(data_type),
            None => Ok(self.value.clone()),
        }
    }

    /// Bind this statement to `prepared`.
    pub fn bind_to<P: Prepared>(&self, prepared: &mut P) -> Result<()> {
        let value = self.resolved_value()?;
        match &self.marker {
            Marker::Named(name) => {
                prepared.bind_named(name, value)?;
            }
            Marker::Position(0) => {
                let error = DatabaseError::new(
                    ErrorKind::Binding,
                    "Positional markers are 1-indexed, position 0 cannot be bound",
                );
                log::error!("{}", error);
                return Err(error.into());
            }
            Marker::Position(position) => {
                prepared.bind_index(value, *position)?;
            }
        }
        Ok(())
    }
}

impl<M: Into<Marker>, V: AsValue> From<(M, V)> for Statement {
    fn from((marker, value): (M, V)) -> Self {
        Statement::new(marker, value)
    }
}

impl<M: Into<Marker>, V: AsValue> From<(M, V, DataType)> for Statement {
    fn from((marker, value, data_type): (M, V, DataType)) -> Self {
        Statement::new(marker, value).with_type(data_type)
    }
}

/// Ordered sequence of bindings. Empty means the SQL runs literally.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Statements(Vec<Statement>);

impl Statements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: impl Into<Statement>) -> &mut Self {
        self.0.push(statement.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, Statement> {
        self.0.iter()
    }

    /// Bind every statement, in order, to `prepared`, replacing what was bound
    /// before.
    pub fn bind_to<P: Prepared>(&self, prepared: &mut P) -> Result<()> {
        prepared.clear_bindings()?;
        for statement in &self.0 {
            statement.bind_to(prepared)?;
        }
        Ok(())
    }
}

impl FromIterator<Statement> for Statements {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Statement>> for Statements {
    fn from(value: Vec<Statement>) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[Statement; N]> for Statements {
    fn from(value: [Statement; N]) -> Self {
        Self(value.into())
    }
}

impl From<&[Statement]> for Statements {
    fn from(value: &[Statement]) -> Self {
        Self(value.to_vec())
    }
}

impl From<()> for Statements {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl IntoIterator for Statements {
    type Item = Statement;
    type IntoIter = vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Statements {
    type Item = &'a Statement;
    type IntoIter = slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
