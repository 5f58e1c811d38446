use ddd_framework::common::{Atomic, RESERVED_INDEX_NAME};
use ddd_framework::errors::{ErrorKind, FrameworkError, FrameworkResult};
use ddd_framework::index::{ExistingIndex, IndexSpec};
use ddd_framework::repository::{CollectionAccessor, RepositoryConfig};
use ddd_framework::store::memory::{InMemoryCollection, InMemoryConnection};
use ddd_framework::store::{
    Collection, CollectionProvider, Connection, ConnectionConfig, ConnectionProvider, Database,
    DatabaseProvider,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static DATABASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Runs a test against a fresh context and always runs `after`, even when
/// the test body returns an error.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    B: Fn() -> FrameworkResult<TestContext>,
    T: Fn(TestContext) -> FrameworkResult<()>,
    A: Fn(TestContext) -> FrameworkResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(err) => panic!("Before run failed: {:?}", err),
    };

    let test_result = test(ctx.clone());
    let after_result = after(ctx);

    if let Err(err) = test_result {
        panic!("Test failed: {:?}", err);
    }
    if let Err(err) = after_result {
        panic!("After run failed: {:?}", err);
    }
}

/// Creates a context over its own in-memory database.
pub fn create_test_context() -> FrameworkResult<TestContext> {
    let id = DATABASE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let config = ConnectionConfig::new("memory://int-test", &format!("test_db_{}", id));
    config.validate()?;
    Ok(TestContext::new(InMemoryConnection::new(config)))
}

/// Checks that every collection of the test database still carries its
/// primary-key index.
pub fn cleanup(ctx: TestContext) -> FrameworkResult<()> {
    ctx.faults().clear();
    let database = ctx.backend_database_name();
    for name in ctx.backend.database(&database).collection_names() {
        let names = ctx.index_names(&name);
        if !names.iter().any(|index| index == RESERVED_INDEX_NAME) {
            log::error!("Collection '{}' lost its primary-key index: {:?}", name, names);
            return Err(FrameworkError::new(
                &format!("Collection '{}' lost its primary-key index", name),
                ErrorKind::InternalError,
            ));
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct TestContext {
    backend: InMemoryConnection,
    connection: Connection,
    journal: StoreJournal,
    faults: FaultPlan,
}

impl TestContext {
    pub fn new(backend: InMemoryConnection) -> Self {
        let journal = StoreJournal::default();
        let faults = FaultPlan::default();
        let connection = Connection::new(InstrumentedConnection {
            backend: backend.clone(),
            journal: journal.clone(),
            faults: faults.clone(),
        });

        TestContext {
            backend,
            connection,
            journal,
            faults,
        }
    }

    /// The instrumented connection repositories should be built on.
    pub fn connection(&self) -> Connection {
        self.connection.clone()
    }

    pub fn journal(&self) -> &StoreJournal {
        &self.journal
    }

    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    pub fn accessor(&self, config: RepositoryConfig) -> CollectionAccessor {
        CollectionAccessor::new(self.connection(), config)
    }

    /// Instrumented handle to a collection, bypassing any accessor.
    pub fn collection(&self, name: &str) -> FrameworkResult<Collection> {
        self.connection.get_database()?.collection(name)
    }

    /// Uninstrumented view of a collection, for setup and inspection.
    pub fn backend_collection(&self, name: &str) -> InMemoryCollection {
        self.backend
            .database(&self.backend_database_name())
            .in_memory_collection(name)
    }

    /// Creates indexes directly in the store without recording them.
    pub fn seed_indexes(&self, collection: &str, specs: &[IndexSpec]) -> FrameworkResult<()> {
        self.backend_collection(collection).create_indexes(specs)?;
        Ok(())
    }

    pub fn index_names(&self, collection: &str) -> Vec<String> {
        self.backend_collection(collection).index_names()
    }

    /// Shapes of all non-reserved indexes in listing order.
    pub fn index_shapes(&self, collection: &str) -> FrameworkResult<Vec<IndexSpec>> {
        Ok(self
            .backend_collection(collection)
            .list_indexes()?
            .iter()
            .filter(|index| !index.is_reserved())
            .map(|index| index.spec().clone())
            .collect())
    }

    fn backend_database_name(&self) -> String {
        self.backend.config().database_name().to_string()
    }
}

/// One store call seen by the instrumented store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    GetDatabase,
    ResolveCollection(String),
    ListIndexes,
    DropIndex(String),
    CreateIndexes(Vec<String>),
}

impl StoreOp {
    pub fn is_mutation(&self) -> bool {
        matches!(self, StoreOp::DropIndex(_) | StoreOp::CreateIndexes(_))
    }
}

/// Ordered record of the store calls made through a [`TestContext`].
#[derive(Clone, Default)]
pub struct StoreJournal {
    entries: Atomic<Vec<StoreOp>>,
}

impl StoreJournal {
    fn record(&self, op: StoreOp) {
        log::trace!("store call {:?}", op);
        self.entries.write().push(op);
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.entries.read().clone()
    }

    pub fn mutations(&self) -> Vec<StoreOp> {
        self.entries
            .read()
            .iter()
            .filter(|op| op.is_mutation())
            .cloned()
            .collect()
    }

    pub fn count(&self, op: &StoreOp) -> usize {
        self.entries.read().iter().filter(|entry| *entry == op).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Failures and concurrent interference injected into the instrumented store.
#[derive(Clone, Default)]
pub struct FaultPlan {
    inner: Arc<Mutex<Faults>>,
}

#[derive(Default)]
struct Faults {
    unreachable: usize,
    listing_failures: usize,
    creation_failures: usize,
    concurrent_drops: bool,
    concurrent_creates: bool,
}

impl FaultPlan {
    /// Fails the next `times` database resolutions.
    pub fn fail_connections(&self, times: usize) {
        self.inner.lock().unreachable = times;
    }

    /// Fails the next `times` index listings.
    pub fn fail_listings(&self, times: usize) {
        self.inner.lock().listing_failures = times;
    }

    /// Fails the next `times` index creation batches.
    pub fn fail_creations(&self, times: usize) {
        self.inner.lock().creation_failures = times;
    }

    /// Lets another process drop each index just before it is dropped.
    pub fn race_drops(&self, enabled: bool) {
        self.inner.lock().concurrent_drops = enabled;
    }

    /// Lets another process create each batch just before it is created,
    /// so the store reports the indexes as already existing.
    pub fn race_creates(&self, enabled: bool) {
        self.inner.lock().concurrent_creates = enabled;
    }

    pub fn clear(&self) {
        *self.inner.lock() = Faults::default();
    }

    fn take(&self, select: impl FnOnce(&mut Faults) -> &mut usize) -> bool {
        let mut faults = self.inner.lock();
        let remaining = select(&mut *faults);
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }

    fn races_drops(&self) -> bool {
        self.inner.lock().concurrent_drops
    }

    fn races_creates(&self) -> bool {
        self.inner.lock().concurrent_creates
    }
}

struct InstrumentedConnection {
    backend: InMemoryConnection,
    journal: StoreJournal,
    faults: FaultPlan,
}

impl ConnectionProvider for InstrumentedConnection {
    fn get_database(&self) -> FrameworkResult<Database> {
        self.journal.record(StoreOp::GetDatabase);
        if self.faults.take(|faults| &mut faults.unreachable) {
            return Err(FrameworkError::new(
                "Injected failure: server unreachable",
                ErrorKind::ConnectivityError,
            ));
        }

        let backend = self.backend.get_database()?;
        Ok(Database::new(InstrumentedDatabase {
            backend,
            journal: self.journal.clone(),
            faults: self.faults.clone(),
        }))
    }
}

struct InstrumentedDatabase {
    backend: Database,
    journal: StoreJournal,
    faults: FaultPlan,
}

impl DatabaseProvider for InstrumentedDatabase {
    fn name(&self) -> String {
        self.backend.name()
    }

    fn collection(&self, name: &str) -> FrameworkResult<Collection> {
        self.journal.record(StoreOp::ResolveCollection(name.to_string()));
        let backend = self.backend.collection(name)?;
        Ok(Collection::new(InstrumentedCollection {
            backend,
            journal: self.journal.clone(),
            faults: self.faults.clone(),
        }))
    }
}

struct InstrumentedCollection {
    backend: Collection,
    journal: StoreJournal,
    faults: FaultPlan,
}

impl CollectionProvider for InstrumentedCollection {
    fn name(&self) -> String {
        self.backend.name()
    }

    fn list_indexes(&self) -> FrameworkResult<Vec<ExistingIndex>> {
        self.journal.record(StoreOp::ListIndexes);
        if self.faults.take(|faults| &mut faults.listing_failures) {
            return Err(FrameworkError::new(
                "Injected failure: listing timed out",
                ErrorKind::ConnectivityError,
            ));
        }
        self.backend.list_indexes()
    }

    fn drop_index(&self, name: &str) -> FrameworkResult<()> {
        self.journal.record(StoreOp::DropIndex(name.to_string()));
        if self.faults.races_drops() {
            let _ = self.backend.drop_index(name);
        }
        self.backend.drop_index(name)
    }

    fn create_indexes(&self, specs: &[IndexSpec]) -> FrameworkResult<Vec<String>> {
        let names = specs.iter().map(IndexSpec::default_name).collect();
        self.journal.record(StoreOp::CreateIndexes(names));
        if self.faults.take(|faults| &mut faults.creation_failures) {
            return Err(FrameworkError::new(
                "Injected failure: index build aborted",
                ErrorKind::InternalError,
            ));
        }
        if self.faults.races_creates() {
            self.backend.create_indexes(specs)?;
            return Err(FrameworkError::new(
                "Index already exists",
                ErrorKind::IndexAlreadyExists,
            ));
        }
        self.backend.create_indexes(specs)
    }
}
