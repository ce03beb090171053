use avl::{Tree, TreeError};

use std::collections::{BTreeSet, HashSet};

use crate::common::init_test_logging;
use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>) -> bool
where
    K: Clone + Ord + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                let fresh = set.insert(k.clone());
                match tree.insert(k.clone()) {
                    Ok(()) if fresh => {}
                    Err(TreeError::DuplicateKey(dup)) if !fresh && dup == *k => {}
                    _ => return false,
                }
            }
            Op::Delete(k) => {
                if tree.delete(k) != set.take(k) {
                    return false;
                }
            }
            Op::Iter => {
                if !tree.iter().eq(set.iter()) {
                    return false;
                }
            }
        }
    }

    true
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        init_test_logging();
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && tree.len() == set.len()
            && set.iter().all(|key| tree.depth_of(key).is_some())
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        xs.iter().all(|x| tree.contains(x) && tree.depth_of(x).is_some())
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x) && tree.depth_of(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        for delete in &deletes {
            tree.delete(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have tried to insert the same value multiple times - drop each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| tree.depth_of(x).is_none())
            && still_present.iter().all(|x| tree.depth_of(x).is_some())
    }
}

quickcheck::quickcheck! {
    fn range_query_matches_filter(xs: Vec<i16>, low: i16, high: i16) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        let expected: Vec<i16> = tree
            .iter()
            .copied()
            .filter(|k| low <= *k && *k <= high)
            .collect();
        tree.range_query(&low, &high) == expected
    }
}

quickcheck::quickcheck! {
    fn duplicate_insert_changes_nothing(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let before = tree.preorder().copied().collect::<Vec<_>>();

        let all_rejected = xs
            .iter()
            .all(|x| tree.insert(*x) == Err(TreeError::DuplicateKey(*x)));

        all_rejected && tree.preorder().copied().collect::<Vec<_>>() == before
    }
}

quickcheck::quickcheck! {
    fn missing_delete_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree = Tree::new();
        for x in xs.iter().filter(|x| **x != missing) {
            let _ = tree.insert(*x);
        }
        let before = tree.preorder().copied().collect::<Vec<_>>();
        let height = tree.height();

        tree.delete(&missing).is_none()
            && tree.preorder().copied().collect::<Vec<_>>() == before
            && tree.height() == height
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        // An AVL tree with n nodes is never taller than 1.44 * lg(n + 2).
        let bound = 1.45 * ((tree.len() + 2) as f64).log2();
        (tree.height() as f64) <= bound
    }
}
