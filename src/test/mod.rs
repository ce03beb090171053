//! Test support that needs to see inside the tree.

use std::fmt;

use crate::tree::{Node, Tree};


/// Walks the whole tree asserting the BST order, the AVL balance bound and the cached heights,
/// and that the tree's `len` matches the number of nodes.
pub(crate) fn assert_avl<K>(tree: &Tree<K>)
where
    K: Ord + fmt::Debug,
{
    let (height, count) = check_subtree(tree.root_node(), None, None);
    assert_eq!(height, tree.height());
    assert_eq!(count, tree.len());
}

/// Returns the height and node count of the subtree, with every key strictly between `lower`
/// and `upper`.
fn check_subtree<'a, K>(
    node: Option<&'a Node<K>>,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
) -> (usize, usize)
where
    K: Ord + fmt::Debug,
{
    let Some(node) = node else {
        return (0, 0);
    };

    if let Some(lower) = lower {
        assert!(lower < &node.key, "{:?} is right of {:?}", node.key, lower);
    }
    if let Some(upper) = upper {
        assert!(&node.key < upper, "{:?} is left of {:?}", node.key, upper);
    }

    let (left_height, left_count) = check_subtree(node.left.node(), lower, Some(&node.key));
    let (right_height, right_count) = check_subtree(node.right.node(), Some(&node.key), upper);

    assert_eq!(
        node.height,
        left_height.max(right_height) + 1,
        "stale height at {:?}",
        node.key
    );
    assert!(
        left_height.abs_diff(right_height) <= 1,
        "{:?} is out of balance ({} vs {})",
        node.key,
        left_height,
        right_height
    );

    (node.height, left_count + right_count + 1)
}
