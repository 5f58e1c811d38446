//! # DDD Framework
//!
//! Building blocks for domain-driven applications persisted in a document
//! store, centered on keeping each collection's secondary indexes in sync
//! with what its repository declares.
//!
//! ## Key Features
//!
//! - **Declarative indexes**: a repository lists the indexes it wants; the
//!   collection is reconciled to exactly that set on first access
//! - **Race tolerant**: indexes added or removed concurrently by other
//!   processes do not fail reconciliation
//! - **Lazy, memoized access**: the collection handle is resolved once per
//!   repository; failures are not cached
//! - **Pluggable store**: the framework only depends on small provider traits;
//!   an in-memory store is included
//! - **Domain types**: identifiers, entities, aggregates, value objects and
//!   events
//!
//! ## Quick Start
//!
//! ```rust
//! use ddd_framework::index::IndexSpec;
//! use ddd_framework::repository::{CollectionAccessor, RepositoryConfig};
//! use ddd_framework::store::memory::InMemoryConnection;
//! use ddd_framework::store::{Connection, ConnectionConfig};
//!
//! # fn main() -> ddd_framework::errors::FrameworkResult<()> {
//! let connection = Connection::new(InMemoryConnection::new(ConnectionConfig::new("memory://local", "shop")));
//! let config = RepositoryConfig::new("orders")
//!     .indexes(vec![IndexSpec::field("status")])
//!     .build()?;
//!
//! let accessor = CollectionAccessor::new(connection, config);
//! let orders = accessor.get_collection()?;
//! assert_eq!(orders.name(), "orders");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Constants and shared utilities
//! - [`domain`] - Identifiers, entities, aggregates, value objects and events
//! - [`errors`] - Error types and result definitions
//! - [`index`] - Index declarations and the index reconciler
//! - [`repository`] - Repository configuration and the collection accessor
//! - [`store`] - Store collaborator traits and the in-memory store

pub mod common;
pub mod domain;
pub mod errors;
pub mod index;
pub mod repository;
pub mod store;
