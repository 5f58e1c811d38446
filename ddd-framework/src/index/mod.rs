//! Declarative index synchronization.
//!
//! A repository declares the indexes it wants as a list of [`IndexSpec`]s.
//! On first access the [`IndexReconciler`] lists the collection's actual
//! indexes, computes an [`IndexPlan`] and applies it, so afterwards the
//! collection carries exactly the declared indexes besides the store's
//! primary-key index.
//!
//! # Declaring indexes
//!
//! ```rust
//! use ddd_framework::index::{IndexKey, IndexSpec};
//!
//! let indexes = vec![
//!     IndexSpec::field("email").unique(true),
//!     IndexSpec::new(vec![IndexKey::ascending("status"), IndexKey::descending("createdAt")]),
//! ];
//! # assert_eq!(indexes.len(), 2);
//! ```
//!
//! # Identity
//!
//! Indexes are compared purely on logical shape: the ordered key sequence
//! and the uniqueness flag. Store-assigned names are ignored, so an index
//! created by hand under another name is kept when its shape is declared.

mod existing;
mod reconciler;
mod spec;
mod validation;


pub use existing::*;
pub use reconciler::*;
pub use spec::*;
pub use validation::*;
