//! Text drawing of a [`Tree`]'s shape, for eyeballing rotations.
//!
//! Children are labelled `L` or `R` since a lone child would otherwise be
//! ambiguous.

use std::fmt;

use termtree::Tree as TermTree;

use crate::tree::{Node, Tree};

impl<K> Tree<K>
where
    K: fmt::Display,
{
    /// Builds a [`termtree`] drawing of the tree, one line per node.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let drawing = tree.render().to_string();
    /// let lines: Vec<_> = drawing.lines().collect();
    /// assert_eq!(lines[0], "2");
    /// assert!(lines[1].ends_with("L 1"));
    /// assert!(lines[2].ends_with("R 3"));
    /// ```
    pub fn render(&self) -> TermTree<String> {
        match self.root_node() {
            Some(root) => subtree(root, root.key.to_string()),
            None => TermTree::new("(empty)".to_string()),
        }
    }
}

fn subtree<K>(node: &Node<K>, label: String) -> TermTree<String>
where
    K: fmt::Display,
{
    let leaves = [("L", &node.left), ("R", &node.right)]
        .into_iter()
        .filter_map(|(side, link)| {
            link.node()
                .map(|child| subtree(child, format!("{side} {}", child.key)))
        });
    TermTree::new(label).with_leaves(leaves)
}

impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
