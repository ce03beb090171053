//! Depth-first traversals over a [`Tree`]. All of them keep an explicit stack
//! instead of recursing, and all of them borrow the tree.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [55, 30, 80, 20, 45, 70, 90] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [20, 30, 45, 55, 70, 80, 90]);
//! assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), [55, 30, 20, 45, 80, 70, 90]);
//! assert_eq!(tree.postorder().copied().collect::<Vec<_>>(), [20, 45, 30, 70, 90, 80, 55]);
//! ```

use std::iter::FusedIterator;

use crate::tree::{Node, Tree};

impl<K> Tree<K> {
    /// Visits the left subtree, then the node, then the right subtree. This yields the keys in
    /// ascending order.
    pub fn inorder(&self) -> InOrder<'_, K> {
        InOrder::new(self.root_node(), self.len())
    }

    /// Visits the node, then the left subtree, then the right subtree.
    pub fn preorder(&self) -> PreOrder<'_, K> {
        PreOrder(Walk::new(self.root_node()))
    }

    /// Visits the left subtree, then the right subtree, then the node.
    pub fn postorder(&self) -> PostOrder<'_, K> {
        PostOrder {
            stack: self.root_node().map(|n| (n, false)).into_iter().collect(),
        }
    }

    /// Lists every `(parent, child)` pair in pre-order, a left child before its right sibling.
    /// These are the edges a diagram of the tree is drawn from.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [2, 1, 4, 3] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.edges().collect::<Vec<_>>(), [(&2, &1), (&2, &4), (&4, &3)]);
    /// ```
    pub fn edges(&self) -> Edges<'_, K> {
        Edges(Walk::new(self.root_node()))
    }
}

/// Iterator returned by [`Tree::inorder`] and [`Tree::iter`].
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> InOrder<'a, K> {
    fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.node();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.node());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for InOrder<'_, K> {}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Pre-order walk over nodes that remembers each node's parent.
struct Walk<'a, K> {
    stack: Vec<(Option<&'a Node<K>>, &'a Node<K>)>,
}

impl<'a, K> Walk<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.map(|n| (None, n)).into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Walk<'a, K> {
    type Item = (Option<&'a Node<K>>, &'a Node<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let (parent, node) = self.stack.pop()?;
        // Right goes on first so the left subtree is visited first.
        if let Some(right) = node.right.node() {
            self.stack.push((Some(node), right));
        }
        if let Some(left) = node.left.node() {
            self.stack.push((Some(node), left));
        }
        Some((parent, node))
    }
}

/// Iterator returned by [`Tree::preorder`].
pub struct PreOrder<'a, K>(Walk<'a, K>);

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, node)| &node.key)
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// Iterator returned by [`Tree::edges`].
pub struct Edges<'a, K>(Walk<'a, K>);

impl<'a, K> Iterator for Edges<'a, K> {
    type Item = (&'a K, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        // Only the root has no parent and it always comes first.
        self.0
            .find_map(|(parent, node)| parent.map(|p| (&p.key, &node.key)))
    }
}

impl<K> FusedIterator for Edges<'_, K> {}

/// Iterator returned by [`Tree::postorder`].
pub struct PostOrder<'a, K> {
    /// Nodes still to visit, flagged once their children have been pushed.
    stack: Vec<(&'a Node<K>, bool)>,
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(&node.key);
            }

            self.stack.push((node, true));
            if let Some(right) = node.right.node() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.node() {
                self.stack.push((left, false));
            }
        }
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}
