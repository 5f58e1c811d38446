use crate::errors::FrameworkResult;
use crate::store::Collection;
use std::ops::Deref;
use std::sync::Arc;

/// A resolved database that hands out collections by name.
pub trait DatabaseProvider: Send + Sync {
    /// Returns the name of the database.
    fn name(&self) -> String;

    /// Resolves the named collection.
    ///
    /// Document stores create collections implicitly, so resolving an
    /// unknown name is expected to succeed.
    fn collection(&self, name: &str) -> FrameworkResult<Collection>;
}

/// Handle to a resolved database.
#[derive(Clone)]
pub struct Database {
    inner: Arc<dyn DatabaseProvider>,
}

impl Database {
    pub fn new<T: DatabaseProvider + 'static>(inner: T) -> Self {
        Database { inner: Arc::new(inner) }
    }
}

impl Deref for Database {
    type Target = Arc<dyn DatabaseProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
