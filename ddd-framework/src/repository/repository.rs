use crate::errors::FrameworkResult;
use crate::repository::CollectionAccessor;
use crate::store::Collection;

/// A repository persisted in one document store collection.
///
/// Implementors only expose their [`CollectionAccessor`]; the collection
/// handle, index reconciliation and memoization come with the trait.
pub trait CollectionRepository {
    fn accessor(&self) -> &CollectionAccessor;

    /// Returns the backing collection, resolving it on first use.
    fn collection(&self) -> FrameworkResult<Collection> {
        self.accessor().get_collection()
    }

    fn collection_name(&self) -> &str {
        self.accessor().config().collection_name()
    }
}
