use crate::errors::FrameworkResult;
use crate::store::Database;
use std::ops::Deref;
use std::sync::Arc;

/// The connection collaborator.
///
/// Resolves a database handle from its configuration, or fails with a
/// connectivity error. Pooling, timeouts and closing of the underlying
/// connection are the provider's responsibility.
pub trait ConnectionProvider: Send + Sync {
    fn get_database(&self) -> FrameworkResult<Database>;
}

/// Shared handle to a connection provider.
///
/// Several repositories usually share one connection; cloning only bumps a
/// reference count.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<dyn ConnectionProvider>,
}

impl Connection {
    pub fn new<T: ConnectionProvider + 'static>(inner: T) -> Self {
        Connection { inner: Arc::new(inner) }
    }
}

impl Deref for Connection {
    type Target = Arc<dyn ConnectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
