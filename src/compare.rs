//! Total orders injected into a treap.

use std::cmp::Ordering;

/// A total order over items of type `T`.
///
/// Every version derived from the same treap shares one comparator, so it must order items
/// consistently for the entire lifetime of that lineage. Any `Fn(&T, &T) -> Ordering` is a
/// comparator.
///
/// # Examples
///
/// ```
/// use persistent_treap::compare::{Comparator, OrdComparator};
/// use std::cmp::Ordering;
///
/// let by_len = |a: &Vec<u8>, b: &Vec<u8>| a.len().cmp(&b.len());
/// assert_eq!(by_len.compare(&vec![1, 2], &vec![3]), Ordering::Greater);
/// assert_eq!(OrdComparator.compare(&1, &2), Ordering::Less);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns the ordering of `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// A comparator that orders items by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OrdComparator;

impl<T> Comparator<T> for OrdComparator
where
    T: Ord + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
