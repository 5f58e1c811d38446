use std::fmt::Debug;

/// A value compared by content rather than identity.
///
/// Value objects are immutable: changing one means building a new value.
pub trait ValueObject: Clone + PartialEq + Debug {}
