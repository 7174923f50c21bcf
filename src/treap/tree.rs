use crate::compare::Comparator;
use crate::treap::error::{InvariantError, Result};
use crate::treap::node::{self, Node, Tree};
use std::cmp::Ordering;

// The side of the result a node on a rebuilt path is attached to.
enum Side {
    Left,
    Right,
}

enum UnionTask<T> {
    Union(Tree<T>, Tree<T>),
    Build(T, u32),
}

/// Merges two trees. On a key collision the item from `that` is kept, even when the node from
/// `this` wins the root position on priority.
///
/// Pending merges are kept on an explicit work list. Each finished subtree is pushed onto
/// `built`, and a `Build` task pops its two children (right first) to create the parent.
pub fn union<T, C>(compare: &C, this: &Tree<T>, that: &Tree<T>) -> Tree<T>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let mut tasks = vec![UnionTask::Union(this.clone(), that.clone())];
    let mut built = Vec::new();
    while let Some(task) = tasks.pop() {
        match task {
            UnionTask::Union(None, that) => built.push(that),
            UnionTask::Union(this, None) => built.push(this),
            UnionTask::Union(Some(this_node), Some(that_node)) => {
                if this_node.priority > that_node.priority {
                    let that = Some(that_node);
                    let (left, middle, right) = split(compare, &that, &this_node.item);
                    let item = match middle {
                        Some(ref middle_node) => middle_node.item.clone(),
                        None => this_node.item.clone(),
                    };
                    tasks.push(UnionTask::Build(item, this_node.priority));
                    tasks.push(UnionTask::Union(this_node.right.clone(), right));
                    tasks.push(UnionTask::Union(this_node.left.clone(), left));
                } else {
                    let this = Some(this_node);
                    let (left, _, right) = split(compare, &this, &that_node.item);
                    tasks.push(UnionTask::Build(that_node.item.clone(), that_node.priority));
                    tasks.push(UnionTask::Union(right, that_node.right.clone()));
                    tasks.push(UnionTask::Union(left, that_node.left.clone()));
                }
            },
            UnionTask::Build(item, priority) => {
                let right = built.pop().unwrap_or(None);
                let left = built.pop().unwrap_or(None);
                built.push(Node::tree(item, priority, left, right));
            },
        }
    }
    built.pop().unwrap_or(None)
}

/// Partitions a tree into the items less than `pivot`, the node equal to `pivot` (if any), and
/// the items greater than `pivot`. The middle node keeps its original children attached.
pub fn split<T, C>(compare: &C, tree: &Tree<T>, pivot: &T) -> (Tree<T>, Tree<T>, Tree<T>)
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let mut path = Vec::new();
    let mut middle = None;
    let mut curr = tree;
    while let Some(node) = curr {
        match compare.compare(pivot, &node.item) {
            Ordering::Less => {
                path.push((node, Side::Right));
                curr = &node.left;
            },
            Ordering::Greater => {
                path.push((node, Side::Left));
                curr = &node.right;
            },
            Ordering::Equal => {
                middle = curr.clone();
                break;
            },
        }
    }

    let (mut left, mut right) = match middle {
        Some(ref middle_node) => (middle_node.left.clone(), middle_node.right.clone()),
        None => (None, None),
    };
    while let Some((node, side)) = path.pop() {
        match side {
            Side::Left => {
                left = Node::tree(node.item.clone(), node.priority, node.left.clone(), left);
            },
            Side::Right => {
                right = Node::tree(node.item.clone(), node.priority, right, node.right.clone());
            },
        }
    }
    (left, middle, right)
}

/// Concatenates two trees where every item of `this` is less than every item of `that`. No
/// items are compared, so violating that ordering silently produces a malformed tree.
pub fn join<T>(this: &Tree<T>, that: &Tree<T>) -> Tree<T>
where
    T: Clone,
{
    let mut path = Vec::new();
    let mut this = this;
    let mut that = that;
    let mut joined = loop {
        match (this, that) {
            (None, _) => break that.clone(),
            (_, None) => break this.clone(),
            (Some(this_node), Some(that_node)) => {
                if this_node.priority > that_node.priority {
                    path.push((this_node, Side::Left));
                    this = &this_node.right;
                } else {
                    path.push((that_node, Side::Right));
                    that = &that_node.left;
                }
            },
        }
    };
    while let Some((node, side)) = path.pop() {
        joined = match side {
            Side::Left => Node::tree(node.item.clone(), node.priority, node.left.clone(), joined),
            Side::Right => Node::tree(node.item.clone(), node.priority, joined, node.right.clone()),
        };
    }
    joined
}

pub fn get<'a, T, C>(compare: &C, tree: &'a Tree<T>, target: &T) -> Option<&'a T>
where
    C: Comparator<T> + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match compare.compare(target, &node.item) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.item),
        }
    }
    None
}

pub fn ceil<'a, T, C>(compare: &C, tree: &'a Tree<T>, target: &T) -> Option<&'a T>
where
    C: Comparator<T> + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(node) = curr {
        match compare.compare(target, &node.item) {
            Ordering::Greater => curr = &node.right,
            Ordering::Less => {
                ret = Some(&node.item);
                curr = &node.left;
            },
            Ordering::Equal => return Some(&node.item),
        }
    }
    ret
}

pub fn floor<'a, T, C>(compare: &C, tree: &'a Tree<T>, target: &T) -> Option<&'a T>
where
    C: Comparator<T> + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(node) = curr {
        match compare.compare(target, &node.item) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                ret = Some(&node.item);
                curr = &node.right;
            },
            Ordering::Equal => return Some(&node.item),
        }
    }
    ret
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.item
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.item
    })
}

/// Returns the number of items strictly less than `target`.
pub fn rank<T, C>(compare: &C, tree: &Tree<T>, target: &T) -> usize
where
    C: Comparator<T> + ?Sized,
{
    let mut curr = tree;
    let mut ret = 0;
    while let Some(node) = curr {
        match compare.compare(target, &node.item) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                ret += node::len(&node.left) + 1;
                curr = &node.right;
            },
            Ordering::Equal => return ret + node::len(&node.left),
        }
    }
    ret
}

/// Returns the item at a 0-based position in sorted order.
pub fn select<T>(tree: &Tree<T>, mut index: usize) -> Option<&T> {
    let mut curr = tree;
    while let Some(node) = curr {
        let left_len = node::len(&node.left);
        match index.cmp(&left_len) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                index -= left_len + 1;
                curr = &node.right;
            },
            Ordering::Equal => return Some(&node.item),
        }
    }
    None
}

/// Visits items greater than or equal to `pivot` in ascending order until `visitor` returns
/// `false`. Returns `false` if the traversal was stopped early.
pub fn visit_ascend<T, C, F>(compare: &C, tree: &Tree<T>, pivot: Option<&T>, visitor: &mut F) -> bool
where
    C: Comparator<T> + ?Sized,
    F: FnMut(&T) -> bool,
{
    let mut stack = Vec::new();
    let mut curr = tree;
    while let Some(node) = curr {
        let in_range = pivot.map_or(true, |pivot| compare.compare(pivot, &node.item) != Ordering::Greater);
        if in_range {
            stack.push(node);
            curr = &node.left;
        } else {
            curr = &node.right;
        }
    }
    while let Some(node) = stack.pop() {
        if !visitor(&node.item) {
            return false;
        }
        // everything to the right is already past the pivot
        let mut curr = &node.right;
        while let Some(node) = curr {
            stack.push(node);
            curr = &node.left;
        }
    }
    true
}

/// Visits items less than or equal to `pivot` in descending order until `visitor` returns
/// `false`. Returns `false` if the traversal was stopped early.
pub fn visit_descend<T, C, F>(compare: &C, tree: &Tree<T>, pivot: Option<&T>, visitor: &mut F) -> bool
where
    C: Comparator<T> + ?Sized,
    F: FnMut(&T) -> bool,
{
    let mut stack = Vec::new();
    let mut curr = tree;
    while let Some(node) = curr {
        let in_range = pivot.map_or(true, |pivot| compare.compare(pivot, &node.item) != Ordering::Less);
        if in_range {
            stack.push(node);
            curr = &node.right;
        } else {
            curr = &node.left;
        }
    }
    while let Some(node) = stack.pop() {
        if !visitor(&node.item) {
            return false;
        }
        let mut curr = &node.left;
        while let Some(node) = curr {
            stack.push(node);
            curr = &node.right;
        }
    }
    true
}

/// Verifies ordering, heap, and size invariants of every node. Returns the size of the tree.
pub fn check<T, C>(compare: &C, tree: &Tree<T>) -> Result<usize>
where
    C: Comparator<T> + ?Sized,
{
    // (node, exclusive lower bound, exclusive upper bound)
    let mut stack = Vec::new();
    if let Some(ref root) = tree {
        stack.push((root, None, None));
    }
    while let Some((node, lower, upper)) = stack.pop() {
        let above_lower = lower.map_or(true, |lower| compare.compare(lower, &node.item) == Ordering::Less);
        let below_upper = upper.map_or(true, |upper| compare.compare(&node.item, upper) == Ordering::Less);
        if !above_lower || !below_upper {
            return Err(InvariantError::Unordered);
        }
        for child in node.left.iter().chain(node.right.iter()) {
            if child.priority > node.priority {
                return Err(InvariantError::HeapViolated {
                    parent: node.priority,
                    child: child.priority,
                });
            }
        }
        let expected = 1 + node::len(&node.left) + node::len(&node.right);
        if node.len != expected {
            return Err(InvariantError::CountMismatch {
                expected,
                actual: node.len,
            });
        }
        if let Some(ref left) = node.left {
            stack.push((left, lower, Some(&node.item)));
        }
        if let Some(ref right) = node.right {
            stack.push((right, Some(&node.item), upper));
        }
    }
    Ok(node::len(tree))
}
