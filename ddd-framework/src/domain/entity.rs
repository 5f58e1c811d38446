use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// A domain object distinguished by its identity rather than its attributes.
///
/// An entity that has not been assigned an identifier yet (`id()` returns
/// `None`) is never identical to any other entity, itself included.
pub trait Entity {
    type Id: Eq + Hash + Clone + Debug;

    fn id(&self) -> Option<&Self::Id>;

    /// Returns `true` if both entities carry the same identifier.
    fn same_identity_as(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Hash of the identifier, or `None` for an unidentified entity.
    fn identity_hash(&self) -> Option<u64> {
        self.id().map(|id| {
            let mut hasher = DefaultHasher::new();
            id.hash(&mut hasher);
            hasher.finish()
        })
    }
}

/// Root entity of a consistency boundary.
pub trait Aggregate: Entity {}

/// Domain-facing repository of an aggregate type.
///
/// Storage-backed repositories additionally implement
/// [`CollectionRepository`](crate::repository::CollectionRepository).
pub trait Repository {
    type Aggregate: Aggregate;

    fn aggregate_name(&self) -> &'static str {
        let name = std::any::type_name::<Self::Aggregate>();
        name.rsplit("::").next().unwrap_or(name)
    }
}
