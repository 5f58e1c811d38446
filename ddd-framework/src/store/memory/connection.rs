use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::store::memory::InMemoryDatabase;
use crate::store::{ConnectionConfig, ConnectionProvider, Database};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory connection collaborator.
///
/// Resolves the database named by its [`ConnectionConfig`]. The connection
/// can be taken offline to simulate an unreachable server, in which case
/// resolution fails with `ErrorKind::ConnectivityError`.
///
/// # Usage
/// ```rust
/// use ddd_framework::store::memory::InMemoryConnection;
/// use ddd_framework::store::{ConnectionConfig, ConnectionProvider};
///
/// let connection = InMemoryConnection::new(ConnectionConfig::new("memory://local", "app"));
/// assert!(connection.get_database().is_ok());
///
/// connection.set_online(false);
/// assert!(connection.get_database().is_err());
/// ```
#[derive(Clone)]
pub struct InMemoryConnection {
    inner: Arc<InMemoryConnectionInner>,
}

impl InMemoryConnection {
    pub fn new(config: ConnectionConfig) -> Self {
        InMemoryConnection {
            inner: Arc::new(InMemoryConnectionInner {
                config,
                online: AtomicBool::new(true),
                databases: DashMap::new(),
            }),
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.inner.config
    }

    pub fn set_online(&self, online: bool) {
        self.inner.online.store(online, Ordering::SeqCst);
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Returns the concrete in-memory database, creating it if needed.
    pub fn database(&self, name: &str) -> InMemoryDatabase {
        self.inner
            .databases
            .entry(name.to_string())
            .or_insert_with(|| InMemoryDatabase::new(name))
            .clone()
    }
}

impl ConnectionProvider for InMemoryConnection {
    fn get_database(&self) -> FrameworkResult<Database> {
        if !self.is_online() {
            log::error!("Cannot reach in-memory server at '{}'", self.inner.config.uri());
            return Err(FrameworkError::new(
                &format!("Server at '{}' is unreachable", self.inner.config.uri()),
                ErrorKind::ConnectivityError,
            ));
        }

        self.inner.config.validate()?;
        Ok(Database::new(self.database(self.inner.config.database_name())))
    }
}

struct InMemoryConnectionInner {
    config: ConnectionConfig,
    online: AtomicBool,
    databases: DashMap<String, InMemoryDatabase>,
}
