use crate::arena::Handle;
use crate::entry::Entry;
use crate::red_black_tree::node::{Link, NodeStore};
use crate::red_black_tree::tree::RedBlackTree;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::vec;

/// A handle naming a place in a tree: either a node or the past-the-end position.
///
/// Two positions are equal if and only if they name the same node. A position is a plain value
/// that does not borrow the tree. It stays valid until its node is removed, and insertions or
/// removals of other nodes never move it to a different item.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Position {
    Node(Handle),
    End,
}

impl From<Link> for Position {
    fn from(link: Link) -> Self {
        match link {
            Some(id) => Position::Node(id),
            None => Position::End,
        }
    }
}

/// A read-only cursor over a tree.
///
/// Stepping past either end lands on `Position::End`, and stepping away from `Position::End`
/// wraps around to the opposite end.
pub struct Cursor<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
    position: Position,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(tree: &'a RedBlackTree<T, C>, position: Position) -> Self {
        Cursor { tree, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the item under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        self.tree.get(self.position)
    }

    pub fn move_next(&mut self) {
        self.position = self.tree.next(self.position);
    }

    pub fn move_prev(&mut self) {
        self.position = self.tree.prev(self.position);
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            position: self.position,
        }
    }
}

impl<'a, T, C> PartialEq for Cursor<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.position == other.position
    }
}

impl<'a, T, C> From<CursorMut<'a, T, C>> for Cursor<'a, T, C> {
    fn from(cursor: CursorMut<'a, T, C>) -> Self {
        Cursor::new(cursor.tree, cursor.position)
    }
}

/// A cursor over a tree that can remove the item under it.
pub struct CursorMut<'a, T, C> {
    tree: &'a mut RedBlackTree<T, C>,
    position: Position,
}

impl<'a, T, C> CursorMut<'a, T, C> {
    pub(crate) fn new(tree: &'a mut RedBlackTree<T, C>, position: Position) -> Self {
        CursorMut { tree, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn get(&self) -> Option<&T> {
        self.tree.get(self.position)
    }

    pub fn move_next(&mut self) {
        self.position = self.tree.next(self.position);
    }

    pub fn move_prev(&mut self) {
        self.position = self.tree.prev(self.position);
    }

    /// Removes the item under the cursor and moves the cursor to the following item. Returns
    /// `None` and does nothing if the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<T> {
        let next = self.tree.next(self.position);
        let item = self.tree.extract(self.position).ok()?;
        self.position = next;
        Some(item)
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor::new(&*self.tree, self.position)
    }
}

impl<'a, K, V, C> CursorMut<'a, Entry<K, V>, C> {
    /// Returns a mutable reference to the value under the cursor, or `None` at the end.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.tree
            .get_mut(self.position)
            .map(|entry| &mut entry.value)
    }
}

/// An iterator over a tree that yields items in order by reference.
pub struct Iter<'a, T> {
    nodes: &'a NodeStore<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a NodeStore<T>, len: usize) -> Self {
        Iter {
            nodes,
            front: nodes.head.leftmost,
            back: nodes.head.rightmost,
            remaining: len,
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let id = self.front?;
        self.remaining -= 1;
        self.front = nodes.successor(id);
        Some(&nodes[id].item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let id = self.back?;
        self.remaining -= 1;
        self.back = nodes.predecessor(id);
        Some(&nodes[id].item)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

/// An iterator over a tree that yields items in order by mutable reference.
///
/// Ancestors whose items are still pending sit on a stack. A node's links are read before its
/// item is handed out, and the node is never touched again afterwards.
pub struct IterMut<'a, T> {
    nodes: NonNull<NodeStore<T>>,
    current: Link,
    stack: Vec<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(nodes: &'a mut NodeStore<T>, len: usize) -> Self {
        IterMut {
            current: nodes.head.root,
            nodes: NonNull::from(nodes),
            stack: Vec::new(),
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T>
where
    T: 'a,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // The store is exclusively borrowed for 'a and `node_ptr` borrows a single block, so items
        // already yielded are never aliased.
        let nodes = unsafe { &mut *self.nodes.as_ptr() };
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = unsafe { (*nodes.node_ptr(id)).left };
        }
        let id = self.stack.pop()?;
        let node = nodes.node_ptr(id);
        self.remaining -= 1;
        unsafe {
            self.current = (*node).right;
            Some(&mut (*node).item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> where T: 'a {}

/// An owning iterator over a tree that yields items in order.
pub struct IntoIter<T> {
    items: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        IntoIter {
            items: items.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::{Cursor, Position};
    use crate::red_black_tree::tree::RedBlackTree;

    fn tree_of(keys: &[u32]) -> RedBlackTree<u32> {
        let mut tree = RedBlackTree::new();
        for key in keys {
            tree.insert_unique(*key);
        }
        tree
    }

    #[test]
    fn test_iter_both_ends() {
        let tree = tree_of(&[3, 1, 4, 5, 2]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(tree.iter().rev().collect::<Vec<&u32>>(), vec![&5, &4, &3, &2, &1]);
    }

    #[test]
    fn test_cursor_walk_and_wrap() {
        let tree = tree_of(&[2, 1, 3]);
        let mut cursor = tree.cursor(tree.begin());
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_prev();
        assert_eq!(cursor.position(), Position::End);
        assert_eq!(cursor.get(), None);
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&1));
    }

    #[test]
    fn test_cursor_equality() {
        let tree = tree_of(&[2, 1, 3]);
        let mut a = tree.cursor(tree.begin());
        let b = tree.cursor(tree.find(&2));
        assert!(a != b);
        a.move_next();
        assert!(a == b);
        assert!(a.clone() == b);
    }

    #[test]
    fn test_cursor_mut_remove_current() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        let start = tree.find(&4);
        let mut cursor = tree.cursor_mut(start);
        assert_eq!(cursor.remove_current(), Some(4));
        assert_eq!(cursor.get(), Some(&5));
        assert_eq!(cursor.as_cursor().get(), Some(&5));
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));

        let cursor: Cursor<'_, u32, _> = cursor.into();
        assert_eq!(cursor.get(), Some(&3));
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_cursor_mut_remove_at_end() {
        let mut tree = tree_of(&[1]);
        let end = tree.end();
        let mut cursor = tree.cursor_mut(end);
        assert_eq!(cursor.remove_current(), None);
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(1));
        assert_eq!(cursor.position(), Position::End);
        assert!(tree.is_empty());
    }
}
