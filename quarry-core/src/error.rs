use std::fmt::{self, Display};

/// Broad cause of a [`DatabaseError`], classified from the driver's own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A primary or unique key already holds the value being inserted.
    DuplicateEntry,
    /// The statement names a table or view that does not exist.
    MissingTable,
    /// The statement names a column that does not exist.
    MissingColumn,
    Syntax,
    /// A value could not be bound to the prepared statement.
    Binding,
    /// The connection could not be established or was lost.
    Connection,
    /// Invalid connection configuration or unknown provider.
    Config,
    Other,
}

/// The single error type returned by the query facade.
///
/// `Display` prints the message exactly as the driver produced it, callers
/// that only care about the text can keep matching substrings of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseError {
    kind: ErrorKind,
    message: String,
    code: Option<String>,
}

impl DatabaseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    /// Attach the driver specific error code.
    pub fn with_code(mut self, code: impl ToString) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// True when the message contains at least one of `patterns`.
    pub fn matches_any(&self, patterns: &[&str]) -> bool {
        patterns.iter().any(|p| self.message.contains(p))
    }
}

impl Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DatabaseError {}

/// Drivers attach a [`DatabaseError`] as the root of the `anyhow` chain and
/// wrap it in context. The conversion recovers it untouched, any other root
/// becomes [`ErrorKind::Other`] carrying the root cause text.
impl From<anyhow::Error> for DatabaseError {
    fn from(error: anyhow::Error) -> Self {
        if let Some(error) = error.downcast_ref::<DatabaseError>() {
            return error.clone();
        }
        DatabaseError::new(ErrorKind::Other, error.root_cause().to_string())
    }
}
