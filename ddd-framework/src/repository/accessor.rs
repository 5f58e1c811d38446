use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::index::IndexReconciler;
use crate::repository::RepositoryConfig;
use crate::store::{Collection, Connection, Database};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Resolution state of a [`CollectionAccessor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorState {
    /// No handle cached; the next access resolves from scratch.
    Unresolved,
    /// A caller is resolving the handle and reconciling indexes.
    Resolving,
    /// The handle is cached and returned without touching the store.
    Resolved,
}

/// Lazily resolves and memoizes the collection handle of a repository.
///
/// # Behavior
/// - The first [`get_collection`](Self::get_collection) resolves the database
///   through the connection, resolves the configured collection and, if the
///   configuration declares indexes, reconciles them.
/// - Later calls return the cached handle without any store operation.
/// - Only success is cached. If resolution or reconciliation fails, the
///   error is returned and the next call starts over.
///
/// # Thread Safety
/// Concurrent first callers block while one of them resolves; at most one
/// successful reconciliation runs before the handle is published. Clones of
/// an accessor share the cache; separately constructed accessors do not.
///
/// # Usage
/// ```rust
/// use ddd_framework::index::IndexSpec;
/// use ddd_framework::repository::{AccessorState, CollectionAccessor, RepositoryConfig};
/// use ddd_framework::store::memory::InMemoryConnection;
/// use ddd_framework::store::{Connection, ConnectionConfig};
///
/// # fn main() -> ddd_framework::errors::FrameworkResult<()> {
/// let connection = Connection::new(InMemoryConnection::new(ConnectionConfig::new("memory://local", "app")));
/// let config = RepositoryConfig::new("users")
///     .indexes(vec![IndexSpec::field("email").unique(true)])
///     .build()?;
///
/// let accessor = CollectionAccessor::new(connection, config);
/// assert_eq!(accessor.state(), AccessorState::Unresolved);
///
/// let collection = accessor.get_collection()?;
/// assert_eq!(collection.list_indexes()?.len(), 2);
/// assert_eq!(accessor.state(), AccessorState::Resolved);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CollectionAccessor {
    inner: Arc<CollectionAccessorInner>,
}

impl CollectionAccessor {
    pub fn new(connection: Connection, config: RepositoryConfig) -> Self {
        CollectionAccessor {
            inner: Arc::new(CollectionAccessorInner {
                connection,
                config,
                collection: OnceCell::new(),
                resolving: AtomicUsize::new(0),
            }),
        }
    }

    /// Returns the collection handle, resolving it on first use.
    ///
    /// # Errors
    /// - `ConnectivityError` if the database or collection cannot be resolved
    /// - `IndexListingError` / `IndexMutationError` if reconciliation fails
    /// - `ConfigurationError` if the declared indexes are invalid
    pub fn get_collection(&self) -> FrameworkResult<Collection> {
        self.inner.get_collection()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.inner.config
    }

    pub fn state(&self) -> AccessorState {
        self.inner.state()
    }
}

struct CollectionAccessorInner {
    connection: Connection,
    config: RepositoryConfig,
    collection: OnceCell<Collection>,
    resolving: AtomicUsize,
}

impl CollectionAccessorInner {
    fn get_collection(&self) -> FrameworkResult<Collection> {
        if let Some(collection) = self.collection.get() {
            return Ok(collection.clone());
        }

        self.collection
            .get_or_try_init(|| {
                let _guard = ResolvingGuard::enter(&self.resolving);
                self.resolve()
            })
            .cloned()
    }

    fn state(&self) -> AccessorState {
        if self.collection.get().is_some() {
            AccessorState::Resolved
        } else if self.resolving.load(Ordering::SeqCst) > 0 {
            AccessorState::Resolving
        } else {
            AccessorState::Unresolved
        }
    }

    fn resolve(&self) -> FrameworkResult<Collection> {
        let name = self.config.collection_name();
        log::debug!("Resolving collection '{}'", name);

        let database = self.resolve_database()?;
        let collection = database.collection(name).map_err(|err| {
            log::error!("Failed to resolve collection '{}': {}", name, err);
            FrameworkError::new_with_cause(
                &format!("Failed to resolve collection '{}'", name),
                ErrorKind::ConnectivityError,
                err,
            )
        })?;

        match self.config.indexes() {
            Some(indexes) => {
                IndexReconciler::reconcile(&collection, indexes)?;
            }
            None => log::debug!("Index reconciliation disabled for collection '{}'", name),
        }

        log::debug!("Collection '{}' resolved", name);
        Ok(collection)
    }

    fn resolve_database(&self) -> FrameworkResult<Database> {
        self.connection.get_database().map_err(|err| {
            log::error!(
                "Failed to resolve database for collection '{}': {}",
                self.config.collection_name(),
                err
            );
            FrameworkError::new_with_cause(
                "Failed to resolve database",
                ErrorKind::ConnectivityError,
                err,
            )
        })
    }
}

/// Counts a resolution in progress for as long as it lives, even on panic.
struct ResolvingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> ResolvingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        ResolvingGuard { counter }
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
