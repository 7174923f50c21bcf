//! Persistent treap whose versions share structure.
//!
//! Every reshaping operation is derived from three primitives over immutable, reference counted
//! nodes: `union`, `split`, and `join`. Each allocates new nodes only along the path it changes.

mod error;
mod iter;
mod node;
mod persistent;
mod serde_impl;
mod tree;

pub use self::error::{InvariantError, Result};
pub use self::iter::Iter;
pub use self::persistent::Treap;
