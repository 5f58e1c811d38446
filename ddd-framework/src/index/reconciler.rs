use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::index::{validate_indexes, ExistingIndex, IndexSpec};
use crate::store::Collection;
use itertools::Itertools;
use std::collections::BTreeSet;

/// The changes needed to move a collection's indexes to a desired set.
///
/// `to_drop` holds store-assigned names of obsolete indexes; `to_create`
/// holds missing specs in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexPlan {
    to_drop: BTreeSet<String>,
    to_create: Vec<IndexSpec>,
}

impl IndexPlan {
    /// Computes the three-way diff between listed and desired indexes.
    ///
    /// # Behavior
    /// - The reserved primary-key index is excluded from `existing`, and
    ///   desired specs with its shape are ignored, so it never appears in
    ///   the plan.
    /// - Structurally identical desired specs collapse into one; the first
    ///   declaration wins.
    /// - Each existing index is kept if an unmatched desired spec has the same
    ///   shape (keys in order + `unique`). A desired spec satisfies at most
    ///   one existing index.
    /// - Unmatched existing indexes are dropped by name, unmatched desired
    ///   specs are created.
    pub fn compute(existing: &[ExistingIndex], desired: &[IndexSpec]) -> IndexPlan {
        let mut pending: Vec<&IndexSpec> = desired
            .iter()
            .filter(|spec| {
                if spec.is_reserved() {
                    log::warn!("Ignoring declaration of the primary-key index {}", spec);
                    false
                } else {
                    true
                }
            })
            .unique()
            .collect();

        let mut to_drop = BTreeSet::new();
        for index in existing.iter().filter(|index| !index.is_reserved()) {
            match pending.iter().position(|spec| *spec == index.spec()) {
                Some(position) => {
                    log::debug!("Keeping index '{}' {}", index.name(), index.spec());
                    pending.remove(position);
                }
                None => {
                    to_drop.insert(index.name().to_string());
                }
            }
        }

        IndexPlan {
            to_drop,
            to_create: pending.into_iter().cloned().collect(),
        }
    }

    pub fn to_drop(&self) -> &BTreeSet<String> {
        &self.to_drop
    }

    pub fn to_create(&self) -> &[IndexSpec] {
        &self.to_create
    }

    /// Returns `true` if the collection already matches the desired set.
    pub fn is_empty(&self) -> bool {
        self.to_drop.is_empty() && self.to_create.is_empty()
    }
}

/// Reconciles the indexes of a live collection with a declared set.
///
/// Reconciliation is declarative and idempotent: running it twice with an
/// unchanged desired set performs no mutation the second time.
///
/// # Usage
/// ```rust
/// use ddd_framework::index::{IndexReconciler, IndexSpec};
/// use ddd_framework::store::memory::InMemoryCollection;
/// use ddd_framework::store::Collection;
///
/// # fn main() -> ddd_framework::errors::FrameworkResult<()> {
/// let collection = Collection::new(InMemoryCollection::new("users"));
/// let desired = vec![IndexSpec::field("email").unique(true)];
///
/// let plan = IndexReconciler::reconcile(&collection, &desired)?;
/// assert_eq!(plan.to_create().len(), 1);
///
/// let plan = IndexReconciler::reconcile(&collection, &desired)?;
/// assert!(plan.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct IndexReconciler;

impl IndexReconciler {
    /// Validates `desired`, lists the collection's indexes, computes the plan
    /// and applies it: drops first, one call per name, then a single batch
    /// creation if anything is missing.
    ///
    /// # Errors
    /// - `ConfigurationError` if `desired` fails validation
    /// - `IndexListingError` if the listing fails
    /// - `IndexMutationError` if a drop or the creation batch is rejected
    ///
    /// Changes applied before a failure are not rolled back; the next
    /// reconciliation starts from the store's actual state.
    pub fn reconcile(collection: &Collection, desired: &[IndexSpec]) -> FrameworkResult<IndexPlan> {
        validate_indexes(desired)?;

        let existing = Self::list_indexes(collection)?;
        let plan = IndexPlan::compute(&existing, desired);
        if plan.is_empty() {
            log::debug!("Indexes of collection '{}' are up to date", collection.name());
            return Ok(plan);
        }

        log::debug!(
            "Index plan for collection '{}': drop {:?}, create [{}]",
            collection.name(),
            plan.to_drop(),
            plan.to_create().iter().join(", ")
        );

        for name in plan.to_drop() {
            Self::drop_index(collection, name)?;
        }

        if !plan.to_create().is_empty() {
            Self::create_indexes(collection, plan.to_create())?;
        }
        Ok(plan)
    }

    fn list_indexes(collection: &Collection) -> FrameworkResult<Vec<ExistingIndex>> {
        collection.list_indexes().map_err(|err| {
            log::error!("Failed to list indexes of collection '{}': {}", collection.name(), err);
            FrameworkError::new_with_cause(
                &format!("Failed to list indexes of collection '{}'", collection.name()),
                ErrorKind::IndexListingError,
                err,
            )
        })
    }

    fn drop_index(collection: &Collection, name: &str) -> FrameworkResult<()> {
        match collection.drop_index(name) {
            Ok(()) => {
                log::info!("Dropped index '{}' of collection '{}'", name, collection.name());
                Ok(())
            }
            Err(err) if err.kind() == &ErrorKind::IndexNotFound => {
                // dropped concurrently by another caller
                log::warn!("Index '{}' of collection '{}' is already gone", name, collection.name());
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to drop index '{}' of collection '{}': {}", name, collection.name(), err);
                Err(FrameworkError::new_with_cause(
                    &format!("Failed to drop index '{}' of collection '{}'", name, collection.name()),
                    ErrorKind::IndexMutationError,
                    err,
                ))
            }
        }
    }

    fn create_indexes(collection: &Collection, specs: &[IndexSpec]) -> FrameworkResult<()> {
        match collection.create_indexes(specs) {
            Ok(names) => {
                log::info!("Created indexes {:?} on collection '{}'", names, collection.name());
                Ok(())
            }
            Err(err) if err.kind() == &ErrorKind::IndexAlreadyExists => {
                Self::verify_created(collection, specs, err)
            }
            Err(err) => {
                log::error!("Failed to create indexes on collection '{}': {}", collection.name(), err);
                Err(FrameworkError::new_with_cause(
                    &format!("Failed to create indexes on collection '{}'", collection.name()),
                    ErrorKind::IndexMutationError,
                    err,
                ))
            }
        }
    }

    // An identical index created by a concurrent caller counts as success.
    fn verify_created(
        collection: &Collection,
        specs: &[IndexSpec],
        cause: FrameworkError,
    ) -> FrameworkResult<()> {
        let existing = Self::list_indexes(collection)?;
        let missing = specs
            .iter()
            .filter(|spec| !existing.iter().any(|index| index.spec() == *spec))
            .join(", ");

        if missing.is_empty() {
            log::warn!(
                "Indexes on collection '{}' were created concurrently with identical shape",
                collection.name()
            );
            Ok(())
        } else {
            log::error!(
                "Failed to create indexes [{}] on collection '{}': {}",
                missing,
                collection.name(),
                cause
            );
            Err(FrameworkError::new_with_cause(
                &format!(
                    "Failed to create indexes [{}] on collection '{}'",
                    missing,
                    collection.name()
                ),
                ErrorKind::IndexMutationError,
                cause,
            ))
        }
    }
}
