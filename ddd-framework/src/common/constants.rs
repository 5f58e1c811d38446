/// Name of the primary identifier field of every stored document.
pub const ID_FIELD: &str = "_id";

/// Name the store assigns to its implicit primary-key index.
///
/// This index is outside user management: it is never listed for diffing,
/// never dropped and never created by the index reconciler.
pub const RESERVED_INDEX_NAME: &str = "_id_";

/// Separator between a field and its sort order in store-assigned index names.
pub const INDEX_NAME_SEPARATOR: &str = "_";
