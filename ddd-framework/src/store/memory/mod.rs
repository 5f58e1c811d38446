//! In-memory document store emulating an index catalog.
//!
//! Useful for tests and prototyping. All data is lost when the last handle
//! is dropped.

mod collection;
mod connection;
mod database;

pub use collection::*;
pub use connection::*;
pub use database::*;
