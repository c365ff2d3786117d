//! Binary search descents that locate bounds without touching the tree.

use crate::red_black_tree::node::{Link, NodeStore};

/// Returns the first node whose item is not less than the probe, i.e. the first node for which
/// `is_less` returns `false`. `is_less(item)` must report whether `item` orders before the probe.
pub fn lower_bound<T, F>(nodes: &NodeStore<T>, mut is_less: F) -> Link
where
    F: FnMut(&T) -> bool,
{
    let mut curr = nodes.head.root;
    let mut best = None;
    while let Some(id) = curr {
        if is_less(&nodes[id].item) {
            curr = nodes.right(id);
        } else {
            best = Some(id);
            curr = nodes.left(id);
        }
    }
    best
}

/// Returns the first node whose item is greater than the probe. `is_greater(item)` must report
/// whether the probe orders before `item`.
pub fn upper_bound<T, F>(nodes: &NodeStore<T>, mut is_greater: F) -> Link
where
    F: FnMut(&T) -> bool,
{
    let mut curr = nodes.head.root;
    let mut best = None;
    while let Some(id) = curr {
        if is_greater(&nodes[id].item) {
            best = Some(id);
            curr = nodes.left(id);
        } else {
            curr = nodes.right(id);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{lower_bound, upper_bound};
    use crate::red_black_tree::tree::RedBlackTree;

    #[test]
    fn test_bounds_with_duplicates() {
        let mut tree = RedBlackTree::new();
        for key in &[1, 1, 1, 8, 8, 8, 20] {
            tree.insert_multi(*key);
        }
        let nodes = tree.nodes();

        let first_eight = lower_bound(nodes, |item| *item < 8).unwrap();
        assert_eq!(nodes[first_eight].item, 8);
        let before = nodes.predecessor(first_eight).unwrap();
        assert_eq!(nodes[before].item, 1);

        let after = upper_bound(nodes, |item| 8 < *item).unwrap();
        assert_eq!(nodes[after].item, 20);

        assert_eq!(lower_bound(nodes, |item| *item < 21), None);
        assert_eq!(upper_bound(nodes, |item| 20 < *item), None);
        let first = lower_bound(nodes, |item| *item < 0).unwrap();
        assert_eq!(Some(first), nodes.head.leftmost);
    }

    #[test]
    fn test_bounds_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(lower_bound(tree.nodes(), |item| *item < 1), None);
        assert_eq!(upper_bound(tree.nodes(), |item| 1 < *item), None);
    }
}
