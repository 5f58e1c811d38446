//! Store collaborator seams.
//!
//! The framework never talks to a database driver directly. It depends on
//! three provider traits, each wrapped in a cheaply cloneable handle:
//!
//! - [`ConnectionProvider`] / [`Connection`]: resolves the database handle
//!   from configuration.
//! - [`DatabaseProvider`] / [`Database`]: resolves named collections.
//! - [`CollectionProvider`] / [`Collection`]: lists, drops and creates
//!   indexes. These are the only store operations the index reconciler needs.
//!
//! An in-memory implementation lives in [`memory`]; it emulates the index
//! catalog of a document store and is used for tests and prototyping.

mod collection;
mod config;
mod connection;
mod database;
pub mod memory;

pub use collection::*;
pub use config::*;
pub use connection::*;
pub use database::*;
