use crate::domain::ValueObject;
use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Raw form of an identifier as stored in a document: a string or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawId::Str(value) => Some(value),
            RawId::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawId::Int(value) => Some(*value),
            RawId::Str(_) => None,
        }
    }
}

impl Display for RawId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Int(value) => write!(f, "{}", value),
            RawId::Str(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        RawId::Int(value)
    }
}

impl From<i32> for RawId {
    fn from(value: i32) -> Self {
        RawId::Int(value as i64)
    }
}

impl From<String> for RawId {
    fn from(value: String) -> Self {
        RawId::Str(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Str(value.to_string())
    }
}

/// Common behavior of identifier types.
pub trait Identifier: Clone + Eq + Hash + Debug {
    fn raw_id(&self) -> &RawId;

    fn from_raw_id(raw_id: RawId) -> Self;
}

/// An identifier value object wrapping a [`RawId`].
///
/// With the `serde` feature an `Id` is structured from either the raw value
/// itself or a mapping holding it, so both `"u-1"` and `{"id": "u-1"}`
/// produce the same identifier. It is written back as the mapping form.
///
/// ```rust
/// use ddd_framework::domain::{Id, RawId};
///
/// let id = Id::from_raw_id(42);
/// assert_eq!(id.raw_id(), &RawId::Int(42));
/// assert_eq!(id, Id::from_raw_id(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "IdRepr"))]
pub struct Id {
    id: RawId,
}

impl Id {
    pub fn from_raw_id<R: Into<RawId>>(raw_id: R) -> Self {
        Id { id: raw_id.into() }
    }

    pub fn raw_id(&self) -> &RawId {
        &self.id
    }

    /// Parses an identifier from its textual form.
    ///
    /// Integers become [`RawId::Int`]; anything else non-empty becomes
    /// [`RawId::Str`].
    pub fn parse(value: &str) -> FrameworkResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            log::error!("Cannot parse an identifier from an empty string");
            return Err(FrameworkError::new(
                "Identifier must not be empty",
                ErrorKind::InvalidId,
            ));
        }
        match value.parse::<i64>() {
            Ok(number) => Ok(Id::from_raw_id(number)),
            Err(_) => Ok(Id::from_raw_id(value)),
        }
    }
}

impl Identifier for Id {
    fn raw_id(&self) -> &RawId {
        &self.id
    }

    fn from_raw_id(raw_id: RawId) -> Self {
        Id { id: raw_id }
    }
}

impl ValueObject for Id {}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Raw(RawId),
    Mapping { id: RawId },
}

#[cfg(feature = "serde")]
impl From<IdRepr> for Id {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Raw(id) | IdRepr::Mapping { id } => Id { id },
        }
    }
}

/// An identifier bound to the type it identifies.
///
/// Distinct marker types give distinct identifier types, so a `UserId`
/// cannot be passed where an `OrderId` is expected:
///
/// ```rust
/// use ddd_framework::domain::{Identifier, TypedId};
///
/// struct User;
/// type UserId = TypedId<User>;
///
/// let id = UserId::new("u-1");
/// assert_eq!(id.to_string(), "u-1");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TypedId<T> {
    id: Id,
    #[cfg_attr(feature = "serde", serde(skip))]
    marker: PhantomData<fn() -> T>,
}

impl<T> TypedId<T> {
    pub fn new<R: Into<RawId>>(raw_id: R) -> Self {
        TypedId {
            id: Id::from_raw_id(raw_id),
            marker: PhantomData,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }
}

impl<T> Identifier for TypedId<T> {
    fn raw_id(&self) -> &RawId {
        self.id.raw_id()
    }

    fn from_raw_id(raw_id: RawId) -> Self {
        TypedId::new(raw_id)
    }
}

impl<T> From<Id> for TypedId<T> {
    fn from(id: Id) -> Self {
        TypedId {
            id,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        TypedId::from(self.id.clone())
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = std::any::type_name::<T>();
        let name = name.rsplit("::").next().unwrap_or(name);
        write!(f, "TypedId<{}>({})", name, self.id)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> ValueObject for TypedId<T> {}
