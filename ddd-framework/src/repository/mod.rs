//! Document store repositories.
//!
//! A repository implementation owns a [`CollectionAccessor`] built from a
//! shared [`Connection`](crate::store::Connection) and an immutable
//! [`RepositoryConfig`]. Implementing [`CollectionRepository`] gives it a
//! lazily resolved collection handle whose indexes are reconciled on first
//! access.
//!
//! ```rust
//! use ddd_framework::errors::FrameworkResult;
//! use ddd_framework::index::IndexSpec;
//! use ddd_framework::repository::{CollectionAccessor, CollectionRepository, RepositoryConfig};
//! use ddd_framework::store::memory::InMemoryConnection;
//! use ddd_framework::store::{Connection, ConnectionConfig};
//!
//! struct UserRepository {
//!     accessor: CollectionAccessor,
//! }
//!
//! impl UserRepository {
//!     fn new(connection: Connection) -> FrameworkResult<Self> {
//!         let config = RepositoryConfig::new("users")
//!             .indexes(vec![IndexSpec::field("email").unique(true)])
//!             .build()?;
//!         Ok(UserRepository { accessor: CollectionAccessor::new(connection, config) })
//!     }
//! }
//!
//! impl CollectionRepository for UserRepository {
//!     fn accessor(&self) -> &CollectionAccessor {
//!         &self.accessor
//!     }
//! }
//!
//! # fn main() -> FrameworkResult<()> {
//! let connection = Connection::new(InMemoryConnection::new(ConnectionConfig::new("memory://local", "app")));
//! let users = UserRepository::new(connection)?;
//! let collection = users.collection()?;
//! assert_eq!(collection.name(), "users");
//! # Ok(())
//! # }
//! ```

mod accessor;
mod config;
mod repository;

pub use accessor::*;
pub use config::*;
pub use repository::*;
