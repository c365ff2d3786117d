use crate::compare::{Compare, Natural};
use crate::error::Result;
use crate::red_black_tree::iter::{Cursor, CursorMut, IntoIter, Iter, Position};
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// An ordered multiset implemented using a red black tree.
///
/// Equal keys are kept side by side in the order they were inserted. Runs of equal keys are
/// located with `lower_bound`, `upper_bound` and `equal_range`.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMultiset;
///
/// let mut set = RedBlackMultiset::new();
/// set.insert(8);
/// set.insert(1);
/// set.insert(8);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.count(&8), 2);
///
/// let (first, last) = set.equal_range(&8);
/// assert_eq!(set.get(first), Some(&8));
/// assert_eq!(last, set.end());
/// ```
#[derive(Clone)]
pub struct RedBlackMultiset<T, C = Natural> {
    tree: RedBlackTree<T, C>,
}

impl<T> RedBlackMultiset<T, Natural> {
    /// Constructs a new, empty `RedBlackMultiset<T>` ordered by `Ord`.
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> RedBlackMultiset<T, C> {
    /// Constructs a new, empty `RedBlackMultiset<T, C>` ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        RedBlackMultiset {
            tree: RedBlackTree::with_compare(compare),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two multisets.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
    }

    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    pub fn end(&self) -> Position {
        self.tree.end()
    }

    pub fn next(&self, pos: Position) -> Position {
        self.tree.next(pos)
    }

    pub fn prev(&self, pos: Position) -> Position {
        self.tree.prev(pos)
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.tree.get(pos)
    }

    /// Removes the element at `pos` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `pos` is the end position or was already removed.
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        self.tree.extract(pos)
    }

    pub fn min(&self) -> Option<&T> {
        self.tree.first()
    }

    pub fn max(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Returns an iterator over the multiset. Equal elements are yielded in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let set: RedBlackMultiset<u32> = vec![3, 1, 3].into_iter().collect();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    pub fn cursor(&self, pos: Position) -> Cursor<'_, T, C> {
        self.tree.cursor(pos)
    }

    pub fn cursor_mut(&mut self, pos: Position) -> CursorMut<'_, T, C> {
        self.tree.cursor_mut(pos)
    }
}

impl<T, C> RedBlackMultiset<T, C>
where
    C: Compare<T>,
{
    /// Inserts a key after every equal key already in the multiset and returns its position.
    pub fn insert(&mut self, key: T) -> Position {
        self.tree.insert_multi(key)
    }

    /// Inserts every key of `keys`. Every insertion succeeds.
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        keys.into_iter()
            .map(|key| (self.insert(key), true))
            .collect()
    }

    /// Removes the first occurrence of `key` and returns it, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut set: RedBlackMultiset<u32> = vec![1, 1].into_iter().collect();
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.count(&1), 1);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let pos = self.tree.find(key);
        self.tree.extract(pos).ok()
    }

    /// Returns the position of the first occurrence of `key`, or the end position.
    pub fn find(&self, key: &T) -> Position {
        self.tree.find(key)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    /// Returns the number of elements equal to `key`.
    ///
    /// This walks the run of equal elements, so it takes time proportional to the count.
    pub fn count(&self, key: &T) -> usize {
        let compare = self.tree.compare();
        let mut pos = self.tree.lower_bound(key);
        let mut count = 0;
        while let Some(item) = self.tree.get(pos) {
            if compare.less(key, item) {
                break;
            }
            count += 1;
            pos = self.tree.next(pos);
        }
        count
    }

    /// Returns the position of the first element that is not less than `key`.
    pub fn lower_bound(&self, key: &T) -> Position {
        self.tree.lower_bound(key)
    }

    /// Returns the position of the first element that is greater than `key`.
    pub fn upper_bound(&self, key: &T) -> Position {
        self.tree.upper_bound(key)
    }

    /// Returns the run of elements equal to `key` as a half-open pair of positions.
    pub fn equal_range(&self, key: &T) -> (Position, Position) {
        (self.tree.lower_bound(key), self.tree.upper_bound(key))
    }

    pub fn floor(&self, key: &T) -> Option<&T> {
        let pos = self.tree.upper_bound(key);
        if pos == self.tree.begin() {
            return None;
        }
        self.tree.get(self.tree.prev(pos))
    }

    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.tree.get(self.tree.lower_bound(key))
    }

    /// Moves every element of `other` into this multiset, keeping duplicates. `other` ends up
    /// empty.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }
}

impl<T, C> IntoIterator for RedBlackMultiset<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackMultiset<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for RedBlackMultiset<T, Natural>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackMultiset::new();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for RedBlackMultiset<T, C>
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

impl<T> Default for RedBlackMultiset<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for RedBlackMultiset<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMultiset;
    use crate::red_black_tree::tree::tests::assert_valid;

    fn sample() -> RedBlackMultiset<u32> {
        vec![1, 1, 1, 8, 8, 8, 20].into_iter().collect()
    }

    #[test]
    fn test_insert_keeps_duplicates() {
        let mut set = RedBlackMultiset::new();
        let a = set.insert(1);
        let b = set.insert(1);
        assert!(a != b);
        assert_eq!(set.len(), 2);
        assert_eq!(set.next(a), b);
    }

    #[test]
    fn test_bounds() {
        let set = sample();
        let lower = set.lower_bound(&8);
        assert_eq!(set.get(lower), Some(&8));
        assert_eq!(set.get(set.prev(lower)), Some(&1));
        assert_eq!(set.get(set.upper_bound(&8)), Some(&20));
        assert_eq!(set.equal_range(&8), (lower, set.find(&20)));
        assert_eq!(set.count(&8), 3);
        assert_eq!(set.count(&1), 3);
        assert_eq!(set.count(&20), 1);
        assert_eq!(set.count(&5), 0);
        assert_eq!(set.count(&21), 0);
    }

    #[test]
    fn test_equal_range_absent() {
        let set = sample();
        let (first, last) = set.equal_range(&5);
        assert_eq!(first, last);
        assert_eq!(set.get(first), Some(&8));
    }

    #[test]
    fn test_find_returns_first_occurrence() {
        let set = sample();
        assert_eq!(set.find(&8), set.lower_bound(&8));
        assert_eq!(set.find(&9), set.end());
    }

    #[test]
    fn test_remove() {
        let mut set = sample();
        assert_eq!(set.remove(&8), Some(8));
        assert_eq!(set.count(&8), 2);
        assert_eq!(set.remove(&9), None);
        assert_eq!(set.len(), 6);
        assert_valid(&set.tree);
    }

    #[test]
    fn test_erase_run() {
        let mut set = sample();
        let (mut pos, last) = set.equal_range(&1);
        while pos != last {
            let next = set.next(pos);
            set.erase(pos).unwrap();
            pos = next;
        }
        assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), vec![8, 8, 8, 20]);
        assert_valid(&set.tree);
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let mut set = sample();
        let mut other = sample();
        set.merge(&mut other);
        assert!(other.is_empty());
        assert_eq!(set.len(), 14);
        assert_eq!(set.count(&8), 6);
        assert_valid(&set.tree);
    }

    #[test]
    fn test_stable_among_equal_keys() {
        let mut set = RedBlackMultiset::with_compare(|a: &(u32, char), b: &(u32, char)| a.0 < b.0);
        set.insert((2, 'a'));
        set.insert((1, 'b'));
        set.insert((2, 'c'));
        set.insert((2, 'd'));
        let (first, last) = set.equal_range(&(2, ' '));
        let mut run = Vec::new();
        let mut pos = first;
        while pos != last {
            run.push(set.get(pos).unwrap().1);
            pos = set.next(pos);
        }
        assert_eq!(run, vec!['a', 'c', 'd']);
    }

    #[test]
    fn test_floor_ceil() {
        let set = sample();
        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&9), Some(&8));
        assert_eq!(set.ceil(&9), Some(&20));
        assert_eq!(set.ceil(&21), None);
    }

    #[test]
    fn test_insert_many() {
        let mut set = RedBlackMultiset::new();
        let outcomes = set.insert_many(vec![3, 1, 3]);
        assert!(outcomes.iter().all(|pair| pair.1));
        assert!(outcomes[0].0 != outcomes[2].0);
        assert_eq!(set.next(outcomes[0].0), outcomes[2].0);
        assert_eq!(set.count(&3), 2);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_swap() {
        let mut a = sample();
        let mut b: RedBlackMultiset<u32> = vec![4, 4].into_iter().collect();
        let pos = a.find(&20);
        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.count(&4), 2);
        assert_eq!(b.get(pos), Some(&20));
        assert_eq!(b.len(), 7);
    }

    #[test]
    fn test_into_iter() {
        let set = sample();
        assert_eq!(
            set.into_iter().collect::<Vec<u32>>(),
            vec![1, 1, 1, 8, 8, 8, 20],
        );
    }
}
