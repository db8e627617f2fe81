mod as_value;
mod config;
mod connection;
mod database;
mod driver;
mod error;
mod executor;
mod insert;
mod prepared;
mod query;
mod sql_writer;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use config::*;
pub use connection::*;
pub use database::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use insert::*;
pub use prepared::*;
pub use query::*;
pub use sql_writer::*;
pub use statement::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
