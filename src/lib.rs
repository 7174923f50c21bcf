//! A persistent ordered collection implemented by a treap.
//!
//! `Treap<T, C>` is an immutable value: `upsert`, `delete`, `split`, and `union` return new
//! treaps and leave every earlier version observably unchanged. Versions share all subtrees that
//! an operation did not touch, so keeping old versions around is cheap and reading them from many
//! threads needs no locking.

extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod compare;
pub mod treap;

pub use crate::compare::{Comparator, OrdComparator};
pub use crate::treap::Treap;
