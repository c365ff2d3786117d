use crate::compare::{Compare, Natural};
use crate::error::Result;
use crate::red_black_tree::iter::{Cursor, CursorMut, IntoIter, Iter, Position};
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// and keeps the number of black nodes equal on every root-to-leaf path, which bounds its height
/// to twice the optimum. Duplicate keys are rejected.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T, C = Natural> {
    tree: RedBlackTree<T, C>,
}

impl<T> RedBlackSet<T, Natural> {
    /// Constructs a new, empty `RedBlackSet<T>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        RedBlackSet {
            tree: RedBlackTree::with_compare(compare),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the theoretical maximum number of elements the set can hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets. Positions keep naming the same elements, which now
    /// live in the other set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut a = RedBlackSet::new();
    /// let mut b = RedBlackSet::new();
    /// a.insert(1);
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert!(b.contains(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
    }

    /// Returns the position of the minimum element, or the end position if the set is empty.
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the past-the-end position.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position after `pos`. Stepping forward from the end wraps to the minimum.
    pub fn next(&self, pos: Position) -> Position {
        self.tree.next(pos)
    }

    /// Returns the position before `pos`. Stepping backward from the end wraps to the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(set.get(set.prev(set.end())), Some(&3));
    /// ```
    pub fn prev(&self, pos: Position) -> Position {
        self.tree.prev(pos)
    }

    /// Returns the element at `pos`, or `None` if `pos` does not refer to an element.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.tree.get(pos)
    }

    /// Removes the element at `pos` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `pos` is the end position or was already removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (pos, _) = set.insert(1);
    /// assert_eq!(set.erase(pos), Ok(1));
    /// assert!(set.erase(set.end()).is_err());
    /// ```
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        self.tree.extract(pos)
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Returns an iterator over the set. The iterator will yield elements using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Returns a read-only cursor starting at `pos`.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, T, C> {
        self.tree.cursor(pos)
    }

    /// Returns a cursor starting at `pos` that can remove elements.
    pub fn cursor_mut(&mut self, pos: Position) -> CursorMut<'_, T, C> {
        self.tree.cursor_mut(pos)
    }
}

impl<T, C> RedBlackSet<T, C>
where
    C: Compare<T>,
{
    /// Inserts a key into the set. Returns the position of the key and `true` if it was
    /// inserted, or the position of the equal key already in the set and `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (pos, inserted) = set.insert(1);
    /// assert!(inserted);
    /// assert_eq!(set.insert(1), (pos, false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> (Position, bool) {
        self.tree.insert_unique(key)
    }

    /// Inserts every key of `keys` and reports the outcome of each insertion.
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let pos = self.tree.find(key);
        self.tree.extract(pos).ok()
    }

    /// Returns the position of `key`, or the end position if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get(set.find(&1)), Some(&1));
    /// assert_eq!(set.find(&2), set.end());
    /// ```
    pub fn find(&self, key: &T) -> Position {
        self.tree.find(key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    /// Returns the position of the first element that is not less than `key`.
    pub fn lower_bound(&self, key: &T) -> Position {
        self.tree.lower_bound(key)
    }

    /// Returns the position of the first element that is greater than `key`.
    pub fn upper_bound(&self, key: &T) -> Position {
        self.tree.upper_bound(key)
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        let pos = self.tree.upper_bound(key);
        if pos == self.tree.begin() {
            return None;
        }
        self.tree.get(self.tree.prev(pos))
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.tree.get(self.tree.lower_bound(key))
    }

    /// Moves every element of `other` that is not already in this set into this set. Elements
    /// that collide stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut a: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let mut b: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// a.merge(&mut b);
    /// assert_eq!(a.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(b.iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T, Natural>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for RedBlackSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> Default for RedBlackSet<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
