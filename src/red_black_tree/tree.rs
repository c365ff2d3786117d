use crate::arena::Handle;
use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::red_black_tree::iter::{Cursor, CursorMut, IntoIter, Iter, IterMut, Position};
use crate::red_black_tree::node::{Color, Link, Node, NodeStore};
use crate::red_black_tree::{bound, rebalance};
use log::{debug, trace};
use std::mem;

/// The number of nodes allocated at a time when a tree runs out of room.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// The red black tree engine shared by `RedBlackSet`, `RedBlackMultiset` and `RedBlackMap`.
///
/// Nodes live in an arena owned by the tree and are linked by handle. Every insertion returns a
/// `Position` naming the node that holds the item. A position stays valid until that node is
/// extracted, including across the rebalancing done by other insertions and removals.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::{Position, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
/// let (pos, inserted) = tree.insert_unique(3);
/// assert!(inserted);
/// assert_eq!(tree.insert_unique(3), (pos, false));
///
/// tree.insert_multi(1);
/// tree.insert_multi(1);
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.first(), Some(&1));
///
/// assert_eq!(tree.extract(pos), Ok(3));
/// assert_eq!(tree.find(&3), Position::End);
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T, C = Natural> {
    nodes: NodeStore<T>,
    len: usize,
    compare: C,
}

impl<T> RedBlackTree<T, Natural> {
    /// Constructs a new, empty `RedBlackTree<T>` ordered by `Ord`.
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Constructs a new, empty tree ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        Self::with_chunk_size(compare, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty tree ordered by `compare` that allocates `chunk_size` nodes at a
    /// time.
    pub fn with_chunk_size(compare: C, chunk_size: usize) -> Self {
        RedBlackTree {
            nodes: NodeStore::new(chunk_size),
            len: 0,
            compare,
        }
    }

    #[cfg(test)]
    pub(crate) fn nodes(&self) -> &NodeStore<T> {
        &self.nodes
    }

    /// Returns the comparator that orders the tree.
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// Returns the number of items in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the theoretical maximum number of items a tree can hold.
    pub fn max_size(&self) -> usize {
        let node_size = mem::size_of::<Node<T>>();
        (usize::max_value() / 2 - mem::size_of::<Self>() - node_size) / node_size
    }

    /// Destroys every item in the tree. Every outstanding position becomes invalid.
    pub fn clear(&mut self) {
        trace!("clearing tree of {} nodes", self.len);
        self.nodes.clear();
        self.len = 0;
    }

    /// Returns the position of the minimum item, or `Position::End` if the tree is empty.
    pub fn begin(&self) -> Position {
        Position::from(self.nodes.head.leftmost)
    }

    /// Returns the past-the-end position.
    pub fn end(&self) -> Position {
        Position::End
    }

    /// Returns the position after `pos` in order. Stepping forward from `Position::End` wraps
    /// around to the minimum item.
    pub fn next(&self, pos: Position) -> Position {
        match pos {
            Position::End => Position::from(self.nodes.head.leftmost),
            Position::Node(id) if self.nodes.contains(id) => {
                Position::from(self.nodes.successor(id))
            },
            Position::Node(_) => Position::End,
        }
    }

    /// Returns the position before `pos` in order. Stepping backward from `Position::End` wraps
    /// around to the maximum item.
    pub fn prev(&self, pos: Position) -> Position {
        match pos {
            Position::End => Position::from(self.nodes.head.rightmost),
            Position::Node(id) if self.nodes.contains(id) => {
                Position::from(self.nodes.predecessor(id))
            },
            Position::Node(_) => Position::End,
        }
    }

    /// Returns the item at `pos`, or `None` if `pos` is the end or no longer refers to a node.
    pub fn get(&self, pos: Position) -> Option<&T> {
        match pos {
            Position::Node(id) => self.nodes.get(id).map(|node| &node.item),
            Position::End => None,
        }
    }

    // Mutating an item must not change where it orders.
    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        match pos {
            Position::Node(id) => self.nodes.get_mut(id).map(|node| &mut node.item),
            Position::End => None,
        }
    }

    /// Returns the minimum item of the tree in constant time.
    pub fn first(&self) -> Option<&T> {
        self.nodes.head.leftmost.map(|id| &self.nodes[id].item)
    }

    /// Returns the maximum item of the tree in constant time.
    pub fn last(&self) -> Option<&T> {
        self.nodes.head.rightmost.map(|id| &self.nodes[id].item)
    }

    /// Returns an iterator over the tree that yields items in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.len)
    }

    /// Returns a read-only cursor starting at `pos`.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, T, C> {
        Cursor::new(self, pos)
    }

    /// Returns a cursor starting at `pos` that can remove items.
    pub fn cursor_mut(&mut self, pos: Position) -> CursorMut<'_, T, C> {
        CursorMut::new(self, pos)
    }

    /// Detaches the node at `pos` from the tree and hands its item back to the caller.
    ///
    /// Positions of every other node remain valid.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `pos` is the end or no longer refers to a node.
    pub fn extract(&mut self, pos: Position) -> Result<T> {
        match pos {
            Position::Node(id) if self.nodes.contains(id) => Ok(self.extract_node(id)),
            _ => Err(Error::InvalidPosition),
        }
    }

    fn extract_node(&mut self, id: Handle) -> T {
        if let (Some(_), Some(right)) = (self.nodes.left(id), self.nodes.right(id)) {
            let successor = self.nodes.subtree_min(right);
            self.nodes.swap_positions(id, successor);
        }

        // `id` has at most one child now. A black node with one child has a red leaf below it.
        if self.nodes.color(id) == Color::Black {
            match self.nodes.left(id).or(self.nodes.right(id)) {
                Some(child) => self.nodes.swap_positions(id, child),
                None => rebalance::before_remove(&mut self.nodes, id),
            }
        }

        if self.nodes.head.leftmost == Some(id) {
            self.nodes.head.leftmost = self.nodes.successor(id);
        }
        if self.nodes.head.rightmost == Some(id) {
            self.nodes.head.rightmost = self.nodes.predecessor(id);
        }
        let parent = self.nodes.parent(id);
        self.nodes.replace_child(parent, id, None);
        if let Some(root) = self.nodes.head.root {
            self.nodes.set_color(root, Color::Black);
        }

        self.len -= 1;
        self.nodes.free(id).item
    }

    /// Returns the position of the first item for which `is_less` is `false`. `is_less(item)`
    /// reports whether `item` orders before the key being searched for.
    pub fn lower_bound_by<F>(&self, is_less: F) -> Position
    where
        F: FnMut(&T) -> bool,
    {
        Position::from(bound::lower_bound(&self.nodes, is_less))
    }

    /// Returns the position of the first item for which `is_greater` is `true`.
    /// `is_greater(item)` reports whether the key being searched for orders before `item`.
    pub fn upper_bound_by<F>(&self, is_greater: F) -> Position
    where
        F: FnMut(&T) -> bool,
    {
        Position::from(bound::upper_bound(&self.nodes, is_greater))
    }

    /// Returns the position of the first item equal to the key described by the two probes, or
    /// `Position::End` if there is none.
    pub fn find_by<F, G>(&self, is_less: F, mut is_greater: G) -> Position
    where
        F: FnMut(&T) -> bool,
        G: FnMut(&T) -> bool,
    {
        match bound::lower_bound(&self.nodes, is_less) {
            Some(id) if !is_greater(&self.nodes[id].item) => Position::Node(id),
            _ => Position::End,
        }
    }

    // Mutating an item must not change where it orders.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.nodes, self.len)
    }

    fn attach(&mut self, item: T, parent: Link, is_left: bool) -> Position {
        let id = self.nodes.allocate(Node::new(item, parent));
        match parent {
            None => {
                self.nodes.head.root = Some(id);
                self.nodes.head.leftmost = Some(id);
                self.nodes.head.rightmost = Some(id);
            },
            Some(parent) => {
                if is_left {
                    self.nodes[parent].left = Some(id);
                    if self.nodes.head.leftmost == Some(parent) {
                        self.nodes.head.leftmost = Some(id);
                    }
                } else {
                    self.nodes[parent].right = Some(id);
                    if self.nodes.head.rightmost == Some(parent) {
                        self.nodes.head.rightmost = Some(id);
                    }
                }
            },
        }
        self.len += 1;
        rebalance::after_insert(&mut self.nodes, id);
        Position::Node(id)
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    fn insert_with(&mut self, item: T, allow_duplicates: bool) -> (Position, bool) {
        let mut parent = None;
        let mut is_left = false;
        let mut curr = self.nodes.head.root;
        while let Some(id) = curr {
            parent = Some(id);
            let node_item = &self.nodes[id].item;
            if self.compare.less(&item, node_item) {
                is_left = true;
                curr = self.nodes.left(id);
            } else if !allow_duplicates && !self.compare.less(node_item, &item) {
                return (Position::Node(id), false);
            } else {
                is_left = false;
                curr = self.nodes.right(id);
            }
        }
        (self.attach(item, parent, is_left), true)
    }

    /// Inserts `item` unless an equal item is already present. Returns the position of the new
    /// item and `true`, or the position of the existing item and `false`. A rejected item is
    /// dropped and the tree is left untouched.
    pub fn insert_unique(&mut self, item: T) -> (Position, bool) {
        self.insert_with(item, false)
    }

    /// Inserts `item` after every item equal to it and returns its position.
    pub fn insert_multi(&mut self, item: T) -> Position {
        self.insert_with(item, true).0
    }

    /// Returns the position of the first item equal to `key`, or `Position::End` if there is
    /// none.
    pub fn find(&self, key: &T) -> Position {
        let compare = &self.compare;
        self.find_by(|item| compare.less(item, key), |item| compare.less(key, item))
    }

    /// Returns `true` if an item equal to `key` exists in the tree.
    pub fn contains(&self, key: &T) -> bool {
        self.find(key) != Position::End
    }

    /// Returns the position of the first item that is not less than `key`.
    pub fn lower_bound(&self, key: &T) -> Position {
        let compare = &self.compare;
        self.lower_bound_by(|item| compare.less(item, key))
    }

    /// Returns the position of the first item that is greater than `key`.
    pub fn upper_bound(&self, key: &T) -> Position {
        let compare = &self.compare;
        self.upper_bound_by(|item| compare.less(key, item))
    }

    /// Moves every node of `other` into this tree, keeping duplicates. `other` ends up empty.
    pub fn merge(&mut self, other: &mut Self) {
        let moved = other.len;
        while let Some(id) = other.nodes.head.leftmost {
            let item = other.extract_node(id);
            self.insert_with(item, true);
        }
        debug!("merged {} nodes", moved);
    }

    /// Moves every node of `other` whose item is not already present in this tree. Items that
    /// collide stay in `other`.
    pub fn merge_unique(&mut self, other: &mut Self) {
        let mut moved = 0;
        let mut curr = other.nodes.head.leftmost;
        while let Some(id) = curr {
            let next = other.nodes.successor(id);
            if !self.contains(&other.nodes[id].item) {
                let item = other.extract_node(id);
                self.insert_with(item, false);
                moved += 1;
            }
            curr = next;
        }
        debug!(
            "merged {} nodes, {} colliding nodes left behind",
            moved, other.len,
        );
    }
}

impl<T> Default for RedBlackTree<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len);
        let mut curr = self.nodes.head.leftmost;
        while let Some(id) = curr {
            order.push(id);
            curr = self.nodes.successor(id);
        }
        let items: Vec<T> = order
            .into_iter()
            .map(|id| self.nodes.free(id).item)
            .collect();
        IntoIter::new(items)
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::RedBlackTree;
    use crate::compare::Compare;
    use crate::error::Error;
    use crate::red_black_tree::iter::Position;
    use crate::red_black_tree::node::{Color, Link, NodeStore};
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeMap;

    fn black_height<T>(nodes: &NodeStore<T>, link: Link) -> usize {
        match link {
            None => 0,
            Some(id) => {
                if nodes.color(id) == Color::Red {
                    assert!(!nodes.is_red(nodes.left(id)), "red node has a red left child");
                    assert!(!nodes.is_red(nodes.right(id)), "red node has a red right child");
                }
                for child in nodes.left(id).iter().chain(nodes.right(id).iter()) {
                    assert_eq!(nodes.parent(*child), Some(id), "child does not point at parent");
                }
                let left = black_height(nodes, nodes.left(id));
                let right = black_height(nodes, nodes.right(id));
                assert_eq!(left, right, "black heights differ");
                match nodes.color(id) {
                    Color::Black => left + 1,
                    Color::Red => left,
                }
            },
        }
    }

    /// Checks the red black invariants, the cached bounds, the order and the length.
    pub(crate) fn assert_valid<T, C>(tree: &RedBlackTree<T, C>)
    where
        C: Compare<T>,
    {
        let nodes = tree.nodes();
        match nodes.head.root {
            None => {
                assert_eq!(nodes.head.leftmost, None);
                assert_eq!(nodes.head.rightmost, None);
                assert_eq!(tree.len(), 0);
            },
            Some(root) => {
                assert_eq!(nodes.color(root), Color::Black, "root is not black");
                assert_eq!(nodes.parent(root), None);
                black_height(nodes, Some(root));
                assert_eq!(nodes.head.leftmost, Some(nodes.subtree_min(root)));
                assert_eq!(nodes.head.rightmost, Some(nodes.subtree_max(root)));
            },
        }

        let items: Vec<&T> = tree.iter().collect();
        assert_eq!(items.len(), tree.len());
        for pair in items.windows(2) {
            assert!(!tree.compare().less(pair[1], pair[0]), "items out of order");
        }
    }

    #[test]
    fn test_insert_unique() {
        let mut tree = RedBlackTree::new();
        let (pos, inserted) = tree.insert_unique(1);
        assert!(inserted);
        assert_eq!(tree.get(pos), Some(&1));
        assert_eq!(tree.insert_unique(1), (pos, false));
        assert_eq!(tree.len(), 1);
        assert_valid(&tree);
    }

    #[test]
    fn test_insert_multi_keeps_insertion_order() {
        let mut tree = RedBlackTree::with_compare(|a: &(u32, u32), b: &(u32, u32)| a.0 < b.0);
        for (index, key) in [5, 1, 5, 3, 5, 1].iter().enumerate() {
            tree.insert_multi((*key, index as u32));
        }
        assert_valid(&tree);
        assert_eq!(
            tree.iter().cloned().collect::<Vec<(u32, u32)>>(),
            vec![(1, 1), (1, 5), (3, 3), (5, 0), (5, 2), (5, 4)],
        );
    }

    #[test]
    fn test_ascending_and_descending_inserts() {
        let mut tree = RedBlackTree::new();
        for key in 0..256 {
            tree.insert_unique(key);
            assert_valid(&tree);
        }
        for key in (256..512).rev() {
            tree.insert_unique(key);
            assert_valid(&tree);
        }
        assert_eq!(tree.first(), Some(&0));
        assert_eq!(tree.last(), Some(&511));
    }

    #[test]
    fn test_extract_end() {
        let mut tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.extract(Position::End), Err(Error::InvalidPosition));
        let pos = tree.insert_multi(1);
        assert_eq!(tree.extract(tree.end()), Err(Error::InvalidPosition));
        assert_eq!(tree.extract(pos), Ok(1));
        assert_eq!(tree.extract(pos), Err(Error::InvalidPosition));
        assert!(tree.is_empty());
        assert_valid(&tree);
    }

    #[test]
    fn test_extract_two_children_keeps_successor_position() {
        let mut tree = RedBlackTree::new();
        let positions: Vec<Position> = (0..15).map(|key| tree.insert_unique(key).0).collect();
        let root = tree.nodes().head.root.unwrap();
        let root_pos = Position::Node(root);
        let successor = tree.next(root_pos);
        let successor_key = *tree.get(successor).unwrap();

        let root_key = tree.extract(root_pos).unwrap();
        assert_eq!(successor_key, root_key + 1);
        assert_eq!(tree.get(successor), Some(&successor_key));
        for (key, pos) in positions.iter().enumerate() {
            if key as u32 != root_key {
                assert_eq!(tree.get(*pos), Some(&(key as u32)));
            }
        }
        assert_valid(&tree);
    }

    #[test]
    fn test_position_wraps_around_end() {
        let mut tree = RedBlackTree::new();
        assert_eq!(tree.next(tree.end()), Position::End);
        assert_eq!(tree.prev(tree.end()), Position::End);

        for key in &[3, 1, 2] {
            tree.insert_unique(*key);
        }
        assert_eq!(tree.get(tree.next(tree.end())), Some(&1));
        assert_eq!(tree.get(tree.prev(tree.end())), Some(&3));
        assert_eq!(tree.prev(tree.begin()), Position::End);
        assert_eq!(tree.next(tree.prev(tree.end())), Position::End);
    }

    #[test]
    fn test_find_and_bounds() {
        let mut tree = RedBlackTree::new();
        for key in &[10, 20, 30] {
            tree.insert_unique(*key);
        }
        assert_eq!(tree.get(tree.find(&20)), Some(&20));
        assert_eq!(tree.find(&25), Position::End);
        assert_eq!(tree.find(&40), Position::End);
        assert_eq!(tree.get(tree.lower_bound(&15)), Some(&20));
        assert_eq!(tree.get(tree.lower_bound(&20)), Some(&20));
        assert_eq!(tree.get(tree.upper_bound(&20)), Some(&30));
        assert_eq!(tree.upper_bound(&30), Position::End);
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let mut tree = RedBlackTree::new();
        let mut other = RedBlackTree::new();
        for key in 0..10 {
            tree.insert_multi(key);
            other.insert_multi(key * 2);
        }
        tree.merge(&mut other);
        assert!(other.is_empty());
        assert_eq!(tree.len(), 20);
        assert_valid(&tree);
        assert_valid(&other);
    }

    #[test]
    fn test_merge_unique_leaves_collisions() {
        let mut tree = RedBlackTree::new();
        let mut other = RedBlackTree::new();
        for key in 0..10 {
            tree.insert_unique(key);
            other.insert_unique(key * 2);
        }
        tree.merge_unique(&mut other);
        assert_eq!(tree.len(), 15);
        assert_eq!(
            other.iter().cloned().collect::<Vec<u32>>(),
            vec![0, 2, 4, 6, 8],
        );
        assert_valid(&tree);
        assert_valid(&other);
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut tree = RedBlackTree::with_chunk_size(crate::compare::Natural, 2);
        for key in 0..5 {
            tree.insert_unique(key);
        }
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        tree.insert_unique(7);
        assert_eq!(tree.first(), Some(&7));
        assert_valid(&tree);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut tree = RedBlackTree::new();
        for key in 0..32 {
            tree.insert_unique(key);
        }
        let copy = tree.clone();
        tree.extract(tree.begin()).unwrap();
        assert_eq!(copy.len(), 32);
        assert_eq!(copy.first(), Some(&0));
        assert_valid(&copy);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = RedBlackTree::new();
        for key in &[4, 2, 5, 1, 3] {
            tree.insert_unique(*key);
        }
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_iter_mut_in_order() {
        let mut tree = RedBlackTree::with_compare(|a: &(u32, u32), b: &(u32, u32)| a.0 < b.0);
        for key in &[4, 2, 5, 1, 3] {
            tree.insert_unique((*key, 0));
        }
        tree.extract(tree.find(&(2, 0))).unwrap();
        for (index, item) in tree.iter_mut().enumerate() {
            item.1 = index as u32;
        }
        assert_eq!(
            tree.iter().cloned().collect::<Vec<(u32, u32)>>(),
            vec![(1, 0), (3, 1), (4, 2), (5, 3)],
        );
    }

    #[test]
    fn test_iter_mut_holds_every_item_at_once() {
        let mut tree = RedBlackTree::with_chunk_size(
            |a: &(u32, u32), b: &(u32, u32)| a.0 < b.0,
            3,
        );
        for key in (0..50).rev() {
            tree.insert_multi((key / 2, 0));
        }
        let mut items = tree.iter_mut().collect::<Vec<&mut (u32, u32)>>();
        assert_eq!(items.len(), 50);
        for (index, item) in items.iter_mut().enumerate() {
            item.1 = index as u32;
        }
        assert!(tree.iter().enumerate().all(|(index, item)| item.1 == index as u32));
        assert_eq!(tree.iter().map(|item| item.0).max(), Some(24));
        assert_valid(&tree);
    }

    #[test]
    fn test_iter_mut_partial() {
        let mut tree = RedBlackTree::new();
        for key in 0..100u32 {
            tree.insert_unique(key);
        }
        let mut iter = tree.iter_mut();
        assert_eq!(iter.size_hint(), (100, Some(100)));
        assert_eq!(iter.next(), Some(&mut 0));
        assert_eq!(iter.next(), Some(&mut 1));
        assert_eq!(iter.len(), 98);
        assert_eq!(tree.iter_mut().last(), Some(&mut 99));
        assert!(RedBlackTree::<u32>::new().iter_mut().next().is_none());
    }

    #[test]
    fn test_max_size() {
        let tree: RedBlackTree<u64> = RedBlackTree::new();
        assert!(tree.max_size() > 0);
        assert!(tree.max_size() < usize::max_value() / 2);
    }

    #[test]
    fn test_random_operations() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RedBlackTree::new();
        let mut expected = BTreeMap::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0, 200);
            if rng.gen_range(0, 3) == 0 {
                let pos = tree.find(&key);
                match expected.remove(&key) {
                    Some(()) => assert_eq!(tree.extract(pos), Ok(key)),
                    None => assert_eq!(pos, Position::End),
                }
            } else {
                let (_, inserted) = tree.insert_unique(key);
                assert_eq!(inserted, expected.insert(key, ()).is_none());
            }
            assert_valid(&tree);
            assert_eq!(
                tree.iter().collect::<Vec<&u32>>(),
                expected.keys().collect::<Vec<&u32>>(),
            );
        }
    }

    #[test]
    fn test_random_operations_with_duplicates() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([2, 3, 5, 7]);
        let mut tree = RedBlackTree::new();
        let mut expected: BTreeMap<u32, usize> = BTreeMap::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0, 50);
            if rng.gen_range(0, 2) == 0 {
                let pos = tree.find(&key);
                let count = expected.entry(key).or_insert(0);
                if *count == 0 {
                    assert_eq!(pos, Position::End);
                } else {
                    *count -= 1;
                    assert_eq!(tree.extract(pos), Ok(key));
                }
            } else {
                tree.insert_multi(key);
                *expected.entry(key).or_insert(0) += 1;
            }
            assert_valid(&tree);
        }

        let mut flattened = Vec::new();
        for (key, count) in &expected {
            for _ in 0..*count {
                flattened.push(*key);
            }
        }
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), flattened);
    }
}
