use crate::ValueWrap;
use mysql_async::{Params, Statement};
use quarry_core::{
    AsValue, DatabaseError, Error, ErrorKind, Prepared, Result, Value, truncate_long,
};
use std::{
    collections::HashMap,
    fmt::{self, Display},
    mem,
};

/// Server prepared statement and the values bound so far.
///
/// Positional and named values are kept apart, the server receives one or the
/// other.
#[derive(Debug)]
pub struct MySqlPrepared {
    pub(crate) statement: Statement,
    pub(crate) sql: String,
    pub(crate) params: Vec<Option<Value>>,
    pub(crate) named: HashMap<Vec<u8>, Value>,
    pub(crate) index: u64,
}

fn binding_error(message: String) -> Error {
    let error = Error::new(DatabaseError::new(ErrorKind::Binding, message));
    log::error!("{:#}", error);
    error
}

impl MySqlPrepared {
    pub(crate) fn new(statement: Statement, sql: String) -> Self {
        Self {
            statement,
            sql,
            params: Vec::new(),
            named: HashMap::new(),
            index: 1,
        }
    }

    pub fn parameter_count(&self) -> u64 {
        self.statement.num_params() as u64
    }

    /// Move the bound values out, ready to be sent with the statement.
    pub(crate) fn take_params(&mut self) -> Result<Params> {
        let named = mem::take(&mut self.named);
        let params = mem::take(&mut self.params);
        self.index = 1;
        if !named.is_empty() {
            if params.iter().any(Option::is_some) {
                return Err(binding_error(
                    "Cannot mix named and positional parameters in the same query".into(),
                ));
            }
            return Ok(Params::Named(
                named
                    .into_iter()
                    .map(|(k, v)| (k, ValueWrap(v).into()))
                    .collect(),
            ));
        }
        if params.is_empty() {
            return Ok(Params::Empty);
        }
        let values = params
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                v.map(|v| ValueWrap(v).into())
                    .ok_or_else(|| binding_error(format!("Parameter {} is not bound", i + 1)))
            })
            .collect::<Result<_>>()?;
        Ok(Params::Positional(values))
    }
}

impl Prepared for MySqlPrepared {
    fn clear_bindings(&mut self) -> Result<&mut Self> {
        self.params.clear();
        self.named.clear();
        self.index = 1;
        Ok(self)
    }

    fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        self.bind_index(value, self.index)
    }

    fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self> {
        let len = self.parameter_count();
        if index == 0 || index > len {
            return Err(binding_error(format!(
                "Index {} cannot be bound, the query has {} parameters",
                index, len
            )));
        }
        if self.params.is_empty() {
            self.params.resize_with(len as usize, Default::default);
        }
        self.params[index as usize - 1] = Some(value.as_value());
        self.index = index + 1;
        Ok(self)
    }

    fn bind_named(&mut self, name: &str, value: impl AsValue) -> Result<&mut Self> {
        let key = name.strip_prefix(':').unwrap_or(name);
        if key.is_empty() {
            return Err(binding_error(format!("Invalid parameter name `{}`", name)));
        }
        self.named.insert(key.as_bytes().to_vec(), value.as_value());
        Ok(self)
    }
}

impl Display for MySqlPrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}
