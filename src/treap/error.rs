use std::error;
use std::fmt;
use std::result;

/// The first structural invariant found to be violated by `Treap::check_invariants`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// An item is not strictly between the items bounding its subtree.
    Unordered,
    /// A child has a higher priority than its parent.
    HeapViolated { parent: u32, child: u32 },
    /// A node's cached size differs from the number of nodes in its subtree.
    CountMismatch { expected: usize, actual: usize },
}

/// Convenience `Result` type for treap self-checks.
pub type Result<T> = result::Result<T, InvariantError>;

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InvariantError::Unordered => write!(f, "item is out of search tree order"),
            InvariantError::HeapViolated { parent, child } => write!(
                f,
                "child priority {} exceeds parent priority {}",
                child, parent,
            ),
            InvariantError::CountMismatch { expected, actual } => write!(
                f,
                "cached subtree size {} does not match actual size {}",
                actual, expected,
            ),
        }
    }
}

impl error::Error for InvariantError {}
