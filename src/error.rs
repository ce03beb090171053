//! Errors returned by [`Tree`][crate::Tree] mutations.
//!
//! Only insertion can fail. Deleting or looking up a key that isn't in the tree
//! is an ordinary outcome (`None`), not an error.

use thiserror::Error;

/// The ways a tree operation can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError<K> {
    /// The key is already stored in the tree. The rejected key is handed back
    /// and the tree is left exactly as it was.
    #[error("key {0:?} is already present in the tree")]
    DuplicateKey(K),
}

impl<K> TreeError<K> {
    /// Gives back the key carried by the error.
    pub fn into_key(self) -> K {
        match self {
            Self::DuplicateKey(key) => key,
        }
    }
}

/// Shorthand for results of fallible tree operations.
pub type TreeResult<T, K> = Result<T, TreeError<K>>;
