//! Domain-driven design building blocks.
//!
//! - [`ValueObject`]: immutable values compared by content
//! - [`Id`], [`TypedId`], [`RawId`]: identifiers and their raw forms
//! - [`Entity`], [`Aggregate`]: objects with identity
//! - [`Repository`]: domain interface of an aggregate's repository
//! - [`Event`], [`DomainEvent`]: things that happened in the domain

mod entity;
mod event;
mod identity;
mod value_object;

pub use entity::*;
pub use event::*;
pub use identity::*;
pub use value_object::*;
