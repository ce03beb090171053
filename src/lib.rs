//! This crate exposes a self-balancing Binary Search Tree (an AVL tree),
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is the number of levels
//! on the longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree, and range queries by skipping subtrees that can't
//! hold anything in the range.
//!
//! ## AVL Tree
//!
//! Inserting keys in sorted order turns a plain BST into a linked list. An AVL
//! tree avoids that by caching the height of every subtree and keeping a third
//! invariant:
//!
//! 3. For every `Node`, the heights of its left and right subtrees differ by at
//!    most one.
//!
//! Whenever an insertion or deletion breaks this, the offending `Node` is rotated
//! with one of its children, which limits the height to `O(lg N)` where `N` is
//! the number of keys.
//!
//! Keys are unique: inserting a key twice is rejected with
//! [`TreeError::DuplicateKey`]. Deleting or looking up a missing key is not an
//! error.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod render;
pub mod traverse;
pub mod tree;

#[cfg(test)]
pub(crate) mod test;

pub use error::{TreeError, TreeResult};
pub use tree::Tree;
