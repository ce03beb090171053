//! An owned AVL tree. Every node exclusively owns its two children, so there
//! are no parent pointers and no `unsafe`. Mutations recurse down to the
//! affected node and rebalance each ancestor on the way back up, with every
//! level reassigning its own child link to whatever root the rebalanced
//! subtree ends up with.
//!
//! # Examples
//!
//! ```
//! use avl::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.depth_of(&1), None);
//!
//! tree.insert(1).unwrap();
//! tree.insert(2).unwrap();
//! tree.insert(3).unwrap();
//!
//! // Ascending inserts are rotated so 2 ends up on top.
//! assert_eq!(tree.depth_of(&2), Some(0));
//! assert_eq!(tree.depth_of(&3), Some(1));
//!
//! // Keys are unique.
//! assert_eq!(tree.insert(2), Err(TreeError::DuplicateKey(2)));
//!
//! // Deleting a key hands it back, deleting a missing key does nothing.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
//!
//! assert_eq!(tree.range_query(&0, &10), vec![2, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, instrument, trace};

use crate::error::{TreeError, TreeResult};
use crate::traverse::InOrder;

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of unique keys.
#[derive(Clone)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold the same keys, whatever their shape.
impl<K> PartialEq for Tree<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K> Eq for Tree<K> where K: Eq {}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with only a
    /// root has a height of 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Inserts `key` into the tree, rebalancing every ancestor of the new node.
    ///
    /// Inserting a key that is already present fails with [`TreeError::DuplicateKey`], which
    /// carries the rejected key. The tree is not modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.insert(5), Ok(()));
    /// assert_eq!(tree.insert(5), Err(TreeError::DuplicateKey(5)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn insert(&mut self, key: K) -> TreeResult<(), K>
    where
        K: Ord,
    {
        match self.root.insert(key) {
            Ok(_) => {
                self.len += 1;
                Ok(())
            }
            Err(err) => {
                debug!("rejected duplicate key");
                Err(err)
            }
        }
    }

    /// Deletes `key` from the tree and returns it. If the tree does not contain the key, nothing
    /// happens and `None` is returned.
    ///
    /// A node with two children takes over the key of its in-order successor, which is then
    /// deleted from the right subtree instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.delete(&1), Some(1));
    /// assert_eq!(tree.delete(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord + Clone,
    {
        let removed = self.root.delete(key);
        match removed {
            Some(_) => self.len -= 1,
            None => trace!("key not present, nothing deleted"),
        }
        removed
    }

    /// Returns every key `k` with `low <= k <= high` in ascending order.
    ///
    /// Subtrees that lie entirely outside the range are never visited. An inverted range
    /// (`low > high`) is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [9, 5, 10, 0, 6, 11, -1, 1, 2] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.range_query(&1, &9), vec![1, 2, 5, 6, 9]);
    /// assert!(tree.range_query(&9, &1).is_empty());
    /// ```
    pub fn range_query(&self, low: &K, high: &K) -> Vec<K>
    where
        K: Ord + Clone,
    {
        let mut keys = Vec::new();
        if low <= high {
            self.root.collect_range(low, high, &mut keys);
        }
        keys
    }

    /// Returns the level of the node holding `key`, counting the root as level 0. Returns `None`
    /// when the key isn't in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.depth_of(&1), None);
    ///
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.depth_of(&1), Some(0));
    /// assert_eq!(tree.depth_of(&2), Some(1));
    /// ```
    pub fn depth_of(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut current = self.root.node();
        let mut depth = 0;
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.node(),
                Ordering::Equal => return Some(depth),
                Ordering::Greater => node.right.node(),
            };
            depth += 1;
        }
        None
    }

    /// Potentially finds the stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut current = self.root.node();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.node(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => node.right.node(),
            };
        }
        None
    }

    /// Whether `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.get(key).is_some()
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root.min_value_node().map(|n| &n.key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.root.max_value_node().map(|n| &n.key)
    }

    /// Iterates over the keys in ascending order. Same as [`Tree::inorder`].
    pub fn iter(&self) -> InOrder<'_, K> {
        self.inorder()
    }

    pub(crate) fn root_node(&self) -> Option<&Node<K>> {
        self.root.node()
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The direction an insertion took at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The new node was created here.
    Placed,
    Left,
    Right,
}

/// An owned, possibly absent, subtree. An absent subtree has a height of 0.
#[derive(Clone)]
pub(crate) struct Link<K>(Option<Box<Node<K>>>);

impl<K> Link<K> {
    fn leaf(key: K) -> Self {
        Self(Some(Box::new(Node {
            key,
            height: 1,
            left: Link(None),
            right: Link(None),
        })))
    }

    pub(crate) fn node(&self) -> Option<&Node<K>> {
        self.0.as_deref()
    }

    fn node_mut(&mut self) -> Option<&mut Node<K>> {
        self.0.as_deref_mut()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    pub(crate) fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    fn balance_factor(&self) -> isize {
        self.node().map_or(0, Node::balance_factor)
    }

    /// The leftmost node of this subtree.
    fn min_value_node(&self) -> Option<&Node<K>> {
        let mut current = self.node()?;
        while let Some(left) = current.left.node() {
            current = left;
        }
        Some(current)
    }

    /// The rightmost node of this subtree.
    fn max_value_node(&self) -> Option<&Node<K>> {
        let mut current = self.node()?;
        while let Some(right) = current.right.node() {
            current = right;
        }
        Some(current)
    }

    /// Inserts `key` below this link and reports which way the insertion went at the root of this
    /// subtree. Nothing is mutated when the key turns out to be a duplicate.
    fn insert(&mut self, key: K) -> TreeResult<Step, K>
    where
        K: Ord,
    {
        let node = match self.node_mut() {
            Some(node) => node,
            None => {
                *self = Link::leaf(key);
                return Ok(Step::Placed);
            }
        };

        let (step, child_step) = match key.cmp(&node.key) {
            Ordering::Less => (Step::Left, node.left.insert(key)?),
            Ordering::Greater => (Step::Right, node.right.insert(key)?),
            Ordering::Equal => return Err(TreeError::DuplicateKey(key)),
        };

        self.rebalance_after_insert(child_step);
        Ok(step)
    }

    /// Restores the AVL invariant after an insertion into one of this node's subtrees.
    ///
    /// `child_step` is the direction the insertion took at the child we descended into, which is
    /// the same as comparing the inserted key against that child's key. That tells the outer
    /// (left-left, right-right) cases apart from the inner (left-right, right-left) ones.
    fn rebalance_after_insert(&mut self, child_step: Step) {
        let Some(node) = self.node_mut() else {
            return;
        };
        node.fix_height();

        // See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
        match (node.balance_factor(), child_step) {
            (b, Step::Left) if b > 1 => {
                debug!(case = "left-left", "rebalancing after insert");
                self.rotate_right();
            }
            (b, Step::Right) if b < -1 => {
                debug!(case = "right-right", "rebalancing after insert");
                self.rotate_left();
            }
            (b, Step::Right) if b > 1 => {
                debug!(case = "left-right", "rebalancing after insert");
                node.left.rotate_left();
                self.rotate_right();
            }
            (b, Step::Left) if b < -1 => {
                debug!(case = "right-left", "rebalancing after insert");
                node.right.rotate_right();
                self.rotate_left();
            }
            _ => {}
        }

        self.debug_assert_balanced();
    }

    /// Deletes `key` from this subtree and returns it, or returns `None` without touching
    /// anything if it isn't here.
    fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord + Clone,
    {
        let node = self.node_mut()?;
        let removed = match key.cmp(&node.key) {
            Ordering::Less => node.left.delete(key)?,
            Ordering::Greater => node.right.delete(key)?,
            Ordering::Equal if node.left.0.is_none() || node.right.0.is_none() => {
                // The surviving child (if any) is already a valid AVL subtree, our parent takes
                // care of the rest.
                return self.splice_out();
            }
            Ordering::Equal => {
                let successor = node
                    .right
                    .min_value_node()
                    .map(|n| n.key.clone())
                    .expect("Two children => right child");
                let deleted_successor = node.right.delete(&successor);
                debug_assert!(deleted_successor.is_some());
                mem::replace(&mut node.key, successor)
            }
        };

        self.rebalance_after_delete();
        Some(removed)
    }

    /// Replaces this node with its only child, or with nothing when it's a leaf, and returns its
    /// key. Must only be called on nodes with at most one child.
    fn splice_out(&mut self) -> Option<K> {
        let node = self.0.take()?;
        let Node {
            key, left, right, ..
        } = *node;
        debug_assert!(left.0.is_none() || right.0.is_none());
        *self = if left.0.is_some() { left } else { right };
        Some(key)
    }

    /// Restores the AVL invariant after a deletion from one of this node's subtrees.
    ///
    /// Unlike insertion the taller child may itself be perfectly balanced, so the case is picked
    /// from the child's balance factor. A deletion can also shrink the rotated subtree, so every
    /// ancestor up to the root may need its own rotation.
    fn rebalance_after_delete(&mut self) {
        let Some(node) = self.node_mut() else {
            return;
        };
        node.fix_height();

        let balance = node.balance_factor();
        if balance > 1 {
            if node.left.balance_factor() >= 0 {
                debug!(case = "left-left", "rebalancing after delete");
            } else {
                debug!(case = "left-right", "rebalancing after delete");
                node.left.rotate_left();
            }
            self.rotate_right();
        } else if balance < -1 {
            if node.right.balance_factor() <= 0 {
                debug!(case = "right-right", "rebalancing after delete");
            } else {
                debug!(case = "right-left", "rebalancing after delete");
                node.right.rotate_right();
            }
            self.rotate_left();
        }

        self.debug_assert_balanced();
    }

    /// Rotate self to the right. This moves the left child up vertically and self down vertically.
    /// Used to rebalance the tree when the left child is too tall. As such, it must only be called
    /// when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on an empty link or on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       pivot               new_root
    ///       /   \               /     \
    ///  new_root  z   rotate -> x     pivot
    ///    / \                          / \
    ///   x   y                        y   z
    /// ```
    fn rotate_right(&mut self) {
        let mut pivot = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = pivot.left.0.take().expect("Rotate right => left child");

        pivot.left = new_root.right.take();
        // The pivot is now a child of the new root so its height has to be fixed first.
        pivot.fix_height();

        new_root.right = Link(Some(pivot));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// The mirror image of [`Link::rotate_right`]: the right child moves up and self moves down
    /// to the left.
    ///
    /// ## Panics
    ///
    /// When called on an empty link or on a node without a right child.
    fn rotate_left(&mut self) {
        let mut pivot = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = pivot.right.0.take().expect("Rotate left => right child");

        pivot.right = new_root.left.take();
        pivot.fix_height();

        new_root.left = Link(Some(pivot));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// Bounded in-order walk pushing every key of `[low, high]` onto `keys`.
    fn collect_range(&self, low: &K, high: &K, keys: &mut Vec<K>)
    where
        K: Ord + Clone,
    {
        let Some(node) = self.node() else {
            return;
        };

        // Only go left if something there can still be >= low.
        if &node.key > low {
            node.left.collect_range(low, high, keys);
        }
        if low <= &node.key && &node.key <= high {
            keys.push(node.key.clone());
        }
        // Only go right if something there can still be <= high.
        if &node.key < high {
            node.right.collect_range(low, high, keys);
        }
    }

    fn debug_assert_balanced(&self) {
        if cfg!(debug_assertions) {
            let Some(node) = self.node() else {
                return;
            };
            let left_height = node.left.height();
            let right_height = node.right.height();
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. Positive means
    /// left-heavy.
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }
}
