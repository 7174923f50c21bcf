use std::sync::Arc;

/// A possibly empty subtree. Subtrees are shared between every version that can reach them.
pub type Tree<T> = Option<Arc<Node<T>>>;

/// A struct representing an immutable internal node of a persistent treap.
///
/// Nodes are never modified once they are reachable from a `Tree<T>`. Reshaping a tree always
/// allocates new nodes along the affected path and reuses every other subtree by reference.
pub struct Node<T> {
    pub item: T,
    pub priority: u32,
    pub len: usize,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    /// Allocates a node over two existing subtrees and recomputes its size.
    pub fn tree(item: T, priority: u32, left: Tree<T>, right: Tree<T>) -> Tree<T> {
        Some(Arc::new(Node {
            item,
            priority,
            len: 1 + len(&left) + len(&right),
            left,
            right,
        }))
    }

    pub fn leaf(item: T, priority: u32) -> Tree<T> {
        Self::tree(item, priority, None, None)
    }
}

// Releasing a degenerate tree recursively would use stack proportional to its height, so
// uniquely owned descendants are unlinked onto a work list instead.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(node) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                stack.extend(node.left.take());
                stack.extend(node.right.take());
            }
        }
    }
}

pub fn len<T>(tree: &Tree<T>) -> usize {
    match tree {
        Some(node) => node.len,
        None => 0,
    }
}
