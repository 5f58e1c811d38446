use crate::common::{ID_FIELD, INDEX_NAME_SEPARATOR};
use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use std::fmt::{Display, Formatter};

/// Sort direction or special kind of one indexed field.
///
/// Stores describe plain B-tree index keys with `1` (ascending) and `-1`
/// (descending), and special index kinds (`"text"`, `"hashed"`, `"2dsphere"`)
/// with a string. `SortOrder` covers both forms.
///
/// With the `serde` feature enabled a sort order (de)serializes from/to its
/// wire form: `1`, `-1` or the kind string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawSortOrder", into = "RawSortOrder")
)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// A special index kind such as `"text"` or `"hashed"`.
    Named(String),
}

impl SortOrder {
    /// Creates a special index kind (e.g. `"text"`).
    pub fn named(kind: &str) -> SortOrder {
        SortOrder::Named(kind.to_string())
    }
}

impl TryFrom<i64> for SortOrder {
    type Error = FrameworkError;

    fn try_from(value: i64) -> FrameworkResult<Self> {
        match value {
            1 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => {
                log::error!("Invalid sort order {} for index key", other);
                Err(FrameworkError::new(
                    &format!("Invalid sort order {}: expected 1 (ascending) or -1 (descending)", other),
                    ErrorKind::ConfigurationError,
                ))
            }
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "1"),
            SortOrder::Descending => write!(f, "-1"),
            SortOrder::Named(kind) => write!(f, "{}", kind),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawSortOrder {
    Direction(i64),
    Kind(String),
}

#[cfg(feature = "serde")]
impl TryFrom<RawSortOrder> for SortOrder {
    type Error = FrameworkError;

    fn try_from(raw: RawSortOrder) -> FrameworkResult<Self> {
        match raw {
            RawSortOrder::Direction(direction) => SortOrder::try_from(direction),
            RawSortOrder::Kind(kind) => Ok(SortOrder::Named(kind)),
        }
    }
}

#[cfg(feature = "serde")]
impl From<SortOrder> for RawSortOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => RawSortOrder::Direction(1),
            SortOrder::Descending => RawSortOrder::Direction(-1),
            SortOrder::Named(kind) => RawSortOrder::Kind(kind),
        }
    }
}

/// One `(field path, sort order)` element of an index key sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexKey {
    field: String,
    order: SortOrder,
}

impl IndexKey {
    pub fn new(field: &str, order: SortOrder) -> Self {
        IndexKey {
            field: field.to_string(),
            order,
        }
    }

    pub fn ascending(field: &str) -> Self {
        IndexKey::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: &str) -> Self {
        IndexKey::new(field, SortOrder::Descending)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> &SortOrder {
        &self.order
    }
}

impl Display for IndexKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.order)
    }
}

/// Immutable description of one desired index.
///
/// An index spec is its logical shape: an ordered key sequence plus a
/// uniqueness flag. Two specs are equal iff their keys are equal element-wise
/// in the same order and their `unique` flags match. The store-assigned name
/// of an index is never part of its identity.
///
/// A compound index over `(a asc, b desc)` is a different index from
/// `(b desc, a asc)`.
///
/// # Usage
///
/// ```rust
/// use ddd_framework::index::{IndexKey, IndexSpec, SortOrder};
///
/// let by_email = IndexSpec::field("email").unique(true);
/// let recent = IndexSpec::new(vec![IndexKey::descending("createdAt")]);
/// let compound = IndexSpec::new(vec![
///     IndexKey::ascending("status"),
///     IndexKey::new("createdAt", SortOrder::Descending),
/// ]);
///
/// assert!(by_email.is_unique());
/// assert!(!recent.is_unique());
/// assert!(compound.is_compound());
/// ```
///
/// With the `serde` feature the spec deserializes from configuration, where
/// `keys` is either a list of `[field, order]` pairs or a bare field name:
///
/// ```json
/// { "keys": [["email", 1]], "unique": true }
/// { "keys": "email" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawIndexSpec", into = "RawIndexSpec"))]
pub struct IndexSpec {
    keys: Vec<IndexKey>,
    unique: bool,
}

impl IndexSpec {
    /// Creates a non-unique index spec over the given ordered keys.
    pub fn new(keys: Vec<IndexKey>) -> Self {
        IndexSpec { keys, unique: false }
    }

    /// Creates a non-unique ascending index over a single field.
    ///
    /// This is the single-field shorthand. It is normalized to
    /// `[(field, Ascending)]`, which is how a store lists such an index.
    pub fn field(field: &str) -> Self {
        IndexSpec::new(vec![IndexKey::ascending(field)])
    }

    /// Returns this spec with the given uniqueness constraint.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn keys(&self) -> &[IndexKey] {
        &self.keys
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.keys.iter().map(|key| key.field()).collect()
    }

    pub fn is_compound(&self) -> bool {
        self.keys.len() > 1
    }

    /// Returns `true` if this spec has the shape of the store's primary-key index.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self.keys.as_slice(),
            [key] if key.field() == ID_FIELD && key.order() == &SortOrder::Ascending
        )
    }

    /// Derives the name a store assigns to this index when none is given,
    /// e.g. `email_1_createdAt_-1`.
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .flat_map(|key| [key.field().to_string(), key.order().to_string()])
            .collect::<Vec<_>>()
            .join(INDEX_NAME_SEPARATOR)
    }
}

impl Display for IndexSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let keys = self
            .keys
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.unique {
            write!(f, "{{{}}} unique", keys)
        } else {
            write!(f, "{{{}}}", keys)
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawIndexKeys {
    Field(String),
    Pairs(Vec<(String, SortOrder)>),
}

#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct RawIndexSpec {
    keys: RawIndexKeys,
    #[serde(default)]
    unique: bool,
}

#[cfg(feature = "serde")]
impl From<RawIndexSpec> for IndexSpec {
    fn from(raw: RawIndexSpec) -> Self {
        let keys = match raw.keys {
            RawIndexKeys::Field(field) => vec![IndexKey::ascending(&field)],
            RawIndexKeys::Pairs(pairs) => pairs
                .into_iter()
                .map(|(field, order)| IndexKey { field, order })
                .collect(),
        };
        IndexSpec {
            keys,
            unique: raw.unique,
        }
    }
}

#[cfg(feature = "serde")]
impl From<IndexSpec> for RawIndexSpec {
    fn from(spec: IndexSpec) -> Self {
        RawIndexSpec {
            keys: RawIndexKeys::Pairs(
                spec.keys
                    .into_iter()
                    .map(|key| (key.field, key.order))
                    .collect(),
            ),
            unique: spec.unique,
        }
    }
}
