use crate::compare::{Comparator, OrdComparator};
use crate::treap::error::Result;
use crate::treap::iter::{Iter, Nodes};
use crate::treap::node::{self, Node, Tree};
use crate::treap::tree;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

/// A persistent ordered collection implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has an item and a priority. The item of any node is greater than all items in its
/// left subtree and less than all items occuring in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. Priorities are supplied by
/// the caller; when they are drawn at random, the expected height of the tree is proportional to
/// the logarithm of the number of items.
///
/// Every operation leaves `self` untouched. Operations that reshape the tree return a new treap
/// that shares all unmodified subtrees with `self`, so retaining old versions is cheap. Versions
/// may be read from any number of threads at once.
///
/// Items are opaque to the treap and ordered only by the comparator given at construction. A
/// key-value pair can be stored as a single item by comparing on the key alone.
///
/// # Examples
///
/// ```
/// use persistent_treap::Treap;
///
/// let t = Treap::new();
/// let t = t.upsert("a", 100).upsert("b", 200).upsert("c", 300);
/// assert_eq!(t.get(&"a"), Some(&"a"));
/// assert_eq!(t.len(), 3);
///
/// let u = t.delete(&"a");
/// assert_eq!(u.get(&"a"), None);
/// assert_eq!(u.len(), 2);
///
/// // the original version is unchanged
/// assert_eq!(t.get(&"a"), Some(&"a"));
/// assert_eq!(t.min(), Some(&"a"));
/// ```
///
/// Storing key-value pairs:
///
/// ```
/// use persistent_treap::Treap;
///
/// let t = Treap::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
/// let t = t.upsert((1, 'a'), 5).upsert((2, 'b'), 9);
/// let t = t.upsert((1, 'z'), 2);
/// assert_eq!(t.get(&(1, ' ')), Some(&(1, 'z')));
/// ```
pub struct Treap<T, C = OrdComparator> {
    compare: Arc<C>,
    root: Tree<T>,
}

impl<T> Treap<T>
where
    T: Ord,
{
    /// Constructs a new, empty `Treap<T>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t: Treap<u32> = Treap::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }
}

impl<T, C> Treap<T, C> {
    /// Constructs a new, empty `Treap<T, C>` ordered by `compare`. Every version derived from the
    /// returned treap shares `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// let t = t.upsert(1, 1).upsert(2, 2);
    /// assert_eq!(t.min(), Some(&2));
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        Treap {
            compare: Arc::new(compare),
            root: None,
        }
    }

    fn with_root(&self, root: Tree<T>) -> Self {
        Treap {
            compare: Arc::clone(&self.compare),
            root,
        }
    }

    /// Returns the number of items in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        node::len(&self.root)
    }

    /// Returns `true` if the treap is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum item of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1).upsert(3, 3);
    /// assert_eq!(t.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum item of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1).upsert(3, 3);
    /// assert_eq!(t.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Returns the item at a 0-based position in sorted order. Returns `None` if the index is out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(10, 1).upsert(20, 2).upsert(30, 3);
    /// assert_eq!(t.select(1), Some(&20));
    /// assert_eq!(t.select(3), None);
    /// ```
    pub fn select(&self, index: usize) -> Option<&T> {
        tree::select(&self.root, index)
    }

    /// Returns an iterator over the treap. The iterator yields items using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(3, 1).upsert(1, 2);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: self.nodes(),
        }
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(&self.root)
    }
}

impl<T, C> Treap<T, C>
where
    C: Comparator<T>,
{
    /// Returns the stored item that compares equal to `target`, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1);
    /// assert_eq!(t.get(&0), None);
    /// assert_eq!(t.get(&1), Some(&1));
    /// ```
    pub fn get(&self, target: &T) -> Option<&T> {
        tree::get(&*self.compare, &self.root, target)
    }

    /// Checks if an item comparing equal to `target` exists in the treap.
    pub fn contains(&self, target: &T) -> bool {
        self.get(target).is_some()
    }

    /// Returns the least item that is greater than or equal to `target`. Returns `None` if such
    /// an item does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1);
    /// assert_eq!(t.ceil(&0), Some(&1));
    /// assert_eq!(t.ceil(&2), None);
    /// ```
    pub fn ceil(&self, target: &T) -> Option<&T> {
        tree::ceil(&*self.compare, &self.root, target)
    }

    /// Returns the greatest item that is less than or equal to `target`. Returns `None` if such
    /// an item does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1);
    /// assert_eq!(t.floor(&0), None);
    /// assert_eq!(t.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, target: &T) -> Option<&T> {
        tree::floor(&*self.compare, &self.root, target)
    }

    /// Returns the number of items strictly less than `target`, which is also the position
    /// `target` has or would have in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(10, 1).upsert(20, 2).upsert(30, 3);
    /// assert_eq!(t.rank(&20), 1);
    /// assert_eq!(t.rank(&25), 2);
    /// ```
    pub fn rank(&self, target: &T) -> usize {
        tree::rank(&*self.compare, &self.root, target)
    }

    /// Visits the items greater than or equal to `pivot` in ascending order, or every item if
    /// `pivot` is `None`. Traversal stops as soon as `visitor` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 4).upsert(2, 2).upsert(3, 9).upsert(4, 1);
    /// let mut visited = Vec::new();
    /// t.visit_ascend(Some(&2), |item| {
    ///     visited.push(*item);
    ///     *item < 3
    /// });
    /// assert_eq!(visited, vec![2, 3]);
    /// ```
    pub fn visit_ascend<F>(&self, pivot: Option<&T>, mut visitor: F)
    where
        F: FnMut(&T) -> bool,
    {
        tree::visit_ascend(&*self.compare, &self.root, pivot, &mut visitor);
    }

    /// Visits the items less than or equal to `pivot` in descending order, or every item if
    /// `pivot` is `None`. Traversal stops as soon as `visitor` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 4).upsert(2, 2).upsert(3, 9).upsert(4, 1);
    /// let mut visited = Vec::new();
    /// t.visit_descend(Some(&3), |item| {
    ///     visited.push(*item);
    ///     true
    /// });
    /// assert_eq!(visited, vec![3, 2, 1]);
    /// ```
    pub fn visit_descend<F>(&self, pivot: Option<&T>, mut visitor: F)
    where
        F: FnMut(&T) -> bool,
    {
        tree::visit_descend(&*self.compare, &self.root, pivot, &mut visitor);
    }

    /// Checks the search tree ordering, heap ordering, and cached sizes of every node, returning
    /// the first violation found.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1).upsert(2, 2);
    /// assert!(t.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<()> {
        tree::check(&*self.compare, &self.root).map(|_| ())
    }
}

impl<T, C> Treap<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    /// Returns a treap that additionally contains `item`. If an equal item already exists, it is
    /// replaced by `item`.
    ///
    /// The replaced item's node keeps its structural position when its priority is strictly
    /// greater than `priority`, so only the item, not the priority, is guaranteed to be taken from
    /// the newest write.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new();
    /// let u = t.upsert(1, 7);
    /// assert_eq!(t.len(), 0);
    /// assert_eq!(u.len(), 1);
    /// ```
    pub fn upsert(&self, item: T, priority: u32) -> Self {
        self.with_root(tree::union(&*self.compare, &self.root, &Node::leaf(item, priority)))
    }

    /// Returns a treap without the item comparing equal to `target`. Deleting an absent item
    /// returns a treap sharing the entire tree with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 1).upsert(2, 2);
    /// let u = t.delete(&1);
    /// assert_eq!(u.get(&1), None);
    /// assert_eq!(u.delete(&1).len(), 1);
    /// ```
    pub fn delete(&self, target: &T) -> Self {
        let (left, middle, right) = tree::split(&*self.compare, &self.root, target);
        if middle.is_none() {
            return self.clone();
        }
        self.with_root(tree::join(&left, &right))
    }

    /// Partitions the treap into the items less than `pivot`, a single-item treap holding the item
    /// equal to `pivot` (or `None` if it is absent), and the items greater than `pivot`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let t = Treap::new().upsert(1, 3).upsert(2, 1).upsert(3, 2);
    /// let (left, middle, right) = t.split(&2);
    /// assert_eq!(left.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// assert_eq!(middle.map(|middle| middle.len()), Some(1));
    /// assert_eq!(right.iter().collect::<Vec<&u32>>(), vec![&3]);
    ///
    /// let (_, middle, _) = t.split(&4);
    /// assert!(middle.is_none());
    /// ```
    pub fn split(&self, pivot: &T) -> (Self, Option<Self>, Self) {
        let (left, middle, right) = tree::split(&*self.compare, &self.root, pivot);
        let middle = middle.map(|middle_node| {
            self.with_root(Node::leaf(middle_node.item.clone(), middle_node.priority))
        });
        (self.with_root(left), middle, self.with_root(right))
    }

    /// Returns the union of two treaps. If an item is found in both `self` and `other`, the union
    /// will contain the item from `other`. The `+` operator is implemented to take the union of
    /// two treaps.
    ///
    /// The result is ordered by the comparator of `self`; `other` must be ordered consistently
    /// with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_treap::Treap;
    ///
    /// let n = Treap::new().upsert(1, 4).upsert(2, 9);
    /// let m = Treap::new().upsert(3, 1).upsert(4, 7);
    ///
    /// let union = n.union(&m);
    /// assert_eq!(
    ///     union.iter().collect::<Vec<&u32>>(),
    ///     vec![&1, &2, &3, &4],
    /// );
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        self.with_root(tree::union(&*self.compare, &self.root, &other.root))
    }
}

impl<T, C> Clone for Treap<T, C> {
    fn clone(&self) -> Self {
        Treap {
            compare: Arc::clone(&self.compare),
            root: self.root.clone(),
        }
    }
}

impl<T, C> Default for Treap<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for Treap<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for Treap<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for Treap<T, C> where T: Eq {}

impl<'a, T, C> IntoIterator for &'a Treap<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T, C> Add<&'b Treap<T, C>> for &'a Treap<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    type Output = Treap<T, C>;

    fn add(self, other: &'b Treap<T, C>) -> Treap<T, C> {
        self.union(other)
    }
}
