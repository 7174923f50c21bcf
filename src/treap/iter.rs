use crate::treap::node::{self, Node, Tree};
use std::iter::FusedIterator;

/// Borrows the nodes of a tree in-order from both ends.
pub struct Nodes<'a, T> {
    front: Vec<&'a Node<T>>,
    back: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Nodes<'a, T> {
    pub fn new(tree: &'a Tree<T>) -> Self {
        let mut nodes = Nodes {
            front: Vec::new(),
            back: Vec::new(),
            remaining: node::len(tree),
        };
        nodes.push_left_spine(tree);
        nodes.push_right_spine(tree);
        nodes
    }

    fn push_left_spine(&mut self, mut tree: &'a Tree<T>) {
        while let Some(node) = tree {
            self.front.push(node);
            tree = &node.left;
        }
    }

    fn push_right_spine(&mut self, mut tree: &'a Tree<T>) {
        while let Some(node) = tree {
            self.back.push(node);
            tree = &node.right;
        }
    }
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Nodes<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_right_spine(&node.left);
        self.remaining -= 1;
        Some(node)
    }
}

/// An iterator for `Treap<T, C>`.
///
/// This iterator traverses the items of a treap in-order and yields immutable references. It can
/// be consumed from either end; the two ends never yield the same item.
pub struct Iter<'a, T> {
    pub(crate) nodes: Nodes<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| &node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|node| &node.item)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

impl<'a, T> FusedIterator for Iter<'a, T> where T: 'a {}
