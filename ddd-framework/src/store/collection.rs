use crate::errors::FrameworkResult;
use crate::index::{ExistingIndex, IndexSpec};
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// Index catalog operations of one live collection.
///
/// # Contract
/// - `list_indexes` returns every index of the collection, including the
///   store's primary-key index.
/// - `drop_index` removes one index by its store-assigned name. Dropping an
///   unknown name fails with `ErrorKind::IndexNotFound`.
/// - `create_indexes` creates a batch of indexes and returns their names.
///   Creating an index identical to an existing one is either a no-op or
///   fails with `ErrorKind::IndexAlreadyExists`.
///
/// Implementations must be `Send + Sync`; a collection handle is shared by
/// every caller of a repository.
pub trait CollectionProvider: Send + Sync {
    /// Returns the name of the collection.
    fn name(&self) -> String;

    /// Lists all indexes currently present on the collection.
    fn list_indexes(&self) -> FrameworkResult<Vec<ExistingIndex>>;

    /// Drops the index with the given store-assigned name.
    fn drop_index(&self, name: &str) -> FrameworkResult<()>;

    /// Creates the given indexes in a single call and returns their names.
    fn create_indexes(&self, specs: &[IndexSpec]) -> FrameworkResult<Vec<String>>;
}

/// Handle to a live, addressable collection.
///
/// Cloning is cheap: all clones share the same provider.
#[derive(Clone)]
pub struct Collection {
    inner: Arc<dyn CollectionProvider>,
}

impl Collection {
    pub fn new<T: CollectionProvider + 'static>(inner: T) -> Self {
        Collection { inner: Arc::new(inner) }
    }

    /// Returns `true` if both handles share the same provider instance.
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Deref for Collection {
    type Target = Arc<dyn CollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection").field("name", &self.inner.name()).finish()
    }
}
