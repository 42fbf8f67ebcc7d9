//! Backing store access
//!
//! Connection acquisition and the small query helpers the user store needs.

pub mod connection;
pub mod query;

pub use connection::{ConnectionSource, SqliteConnectionSource};
pub use query::{is_value_existing, string_values, value_as_string};
