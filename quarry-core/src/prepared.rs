use crate::{AsValue, Result};
use std::fmt::Display;

/// A parameterized, backend-prepared query handle.
///
/// `Prepared` lets drivers parse the SQL once and later bind parameters,
/// either positional (`?`) or named (`:name`). Values are converted via the
/// `AsValue` trait.
///
/// # Binding Semantics
/// * `bind` appends a value after the last bound position.
/// * `bind_index` sets the parameter at `index` (from 1, matching the order of
///   the `?` markers).
/// * `bind_named` sets the parameter of a `:name` marker, the name includes the
///   colon.
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// prepared.bind(42)?.bind("hello")?;
/// ```
pub trait Prepared: Send + Sync + Display {
    /// Remove all the previously bound values.
    fn clear_bindings(&mut self) -> Result<&mut Self>;
    /// Append a parameter value.
    fn bind(&mut self, value: impl AsValue) -> Result<&mut Self>;
    /// Bind a value at a specific position.
    fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self>;
    /// Bind a value to a named marker.
    fn bind_named(&mut self, name: &str, value: impl AsValue) -> Result<&mut Self>;
}
