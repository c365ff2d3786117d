use crate::compare::{ByKey, Compare, Natural};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::iter::{Cursor, CursorMut, IntoIter, Iter, IterMut, Position};
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red black tree.
///
/// Entries are ordered by key only; the comparator never looks at values. Each key appears at
/// most once.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// *map.get_or_insert_default(5) += 6;
/// assert_eq!(map.at(&5), Ok(&6));
/// assert!(map.at(&6).is_err());
///
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackMap<K, V, C = Natural> {
    tree: RedBlackTree<Entry<K, V>, ByKey<C>>,
}

impl<K, V> RedBlackMap<K, V, Natural> {
    /// Constructs a new, empty `RedBlackMap<K, V>` ordered by `Ord` on keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Constructs a new, empty `RedBlackMap<K, V, C>` whose keys are ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        RedBlackMap {
            tree: RedBlackTree::with_compare(ByKey(compare)),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the theoretical maximum number of entries the map can hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps.
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

    /// Returns the key-value pair at `pos`, or `None` if `pos` does not refer to an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (pos, _) = map.insert(1, 2);
    /// assert_eq!(map.entry_at(pos), Some((&1, &2)));
    /// assert_eq!(map.entry_at(map.end()), None);
    /// ```
    pub fn entry_at(&self, pos: Position) -> Option<(&K, &V)> {
        self.tree.get(pos).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the key and a mutable reference to the value at `pos`.
    pub fn entry_at_mut(&mut self, pos: Position) -> Option<(&K, &mut V)> {
        self.tree.get_mut(pos).map(|entry| {
            let Entry {
                ref key,
                ref mut value,
            } = *entry;
            (key, value)
        })
    }

    /// Removes the entry at `pos` and returns it as a key-value pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `pos` is the end position or was already removed.
    pub fn erase(&mut self, pos: Position) -> Result<(K, V)> {
        self.tree.extract(pos).map(Entry::into_pair)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree.first().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree.last().map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, K, V> {
        RedBlackMapIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> RedBlackMapIterMut<'_, K, V> {
        RedBlackMapIterMut {
            tree_iter: self.tree.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a read-only cursor over the entries starting at `pos`.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, Entry<K, V>, ByKey<C>> {
        self.tree.cursor(pos)
    }

    /// Returns a cursor over the entries starting at `pos` that can modify values and remove
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let begin = map.begin();
    /// let mut cursor = map.cursor_mut(begin);
    /// *cursor.value_mut().unwrap() = 10;
    /// cursor.move_next();
    /// assert_eq!(cursor.remove_current().map(|entry| entry.key), Some(2));
    ///
    /// assert_eq!(map.get(&1), Some(&10));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn cursor_mut(&mut self, pos: Position) -> CursorMut<'_, Entry<K, V>, ByKey<C>> {
        self.tree.cursor_mut(pos)
    }
}

impl<K, V, C> RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts a key-value pair into the map unless the key is already present. Returns the
    /// position of the entry for the key and whether the pair was inserted. An existing value is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (pos, inserted) = map.insert(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.insert(1, 2), (pos, false));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert_unique(Entry::new(key, value))
    }

    /// Inserts a key-value pair, overwriting the value if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (pos, inserted) = map.insert_or_assign(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.insert_or_assign(1, 2), (pos, false));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        let pos = self.find(&key);
        if let Some(entry) = self.tree.get_mut(pos) {
            entry.value = value;
            return (pos, false);
        }
        self.tree.insert_unique(Entry::new(key, value))
    }

    /// Inserts every pair of `pairs` and reports the outcome of each insertion.
    pub fn insert_many<I>(&mut self, pairs: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let pos = self.find(key);
        self.erase(pos).ok()
    }

    /// Returns the position of the entry for `key`, or the end position if it is absent.
    pub fn find(&self, key: &K) -> Position {
        let compare = &self.tree.compare().0;
        self.tree.find_by(
            |entry| compare.less(&entry.key, key),
            |entry| compare.less(key, &entry.key),
        )
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key) != Position::End
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(self.find(key)).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let pos = self.find(key);
        self.tree.get_mut(pos).map(|entry| &mut entry.value)
    }

    /// Returns the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the key does not exist. The map is never modified.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the key does not exist. The map is never modified.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value associated with `key`, inserting
    /// `V::default()` first if the key does not exist.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let pos = match self.find(&key) {
            Position::End => self.insert(key, V::default()).0,
            pos => pos,
        };
        &mut self
            .tree
            .get_mut(pos)
            .expect("Expected entry to exist after insertion.")
            .value
    }

    /// Returns the position of the first entry whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Position {
        let compare = &self.tree.compare().0;
        self.tree
            .lower_bound_by(|entry| compare.less(&entry.key, key))
    }

    /// Returns the position of the first entry whose key is greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Position {
        let compare = &self.tree.compare().0;
        self.tree
            .upper_bound_by(|entry| compare.less(key, &entry.key))
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &K) -> Option<&K> {
        let pos = self.upper_bound(key);
        if pos == self.begin() {
            return None;
        }
        self.entry_at(self.prev(pos)).map(|(key, _)| key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &K) -> Option<&K> {
        self.entry_at(self.lower_bound(key)).map(|(key, _)| key)
    }

    /// Moves every entry of `other` whose key is not already in this map into this map. Entries
    /// that collide stay in `other`.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> {
    type IntoIter = RedBlackMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = RedBlackMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RedBlackMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = RedBlackMapIterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<K, V> {
    tree_iter: IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for RedBlackMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(Entry::into_pair)
    }
}

/// An iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, K, V> {
    tree_iter: Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter
            .next()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, V> DoubleEndedIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

/// A mutable iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references to
/// values.
pub struct RedBlackMapIterMut<'a, K, V> {
    tree_iter: IterMut<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| {
            let Entry {
                ref key,
                ref mut value,
            } = *entry;
            (key, value)
        })
    }
}

impl<K, V> FromIterator<(K, V)> for RedBlackMap<K, V, Natural>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RedBlackMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> Default for RedBlackMap<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> fmt::Debug for RedBlackMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> Index<&'a K> for RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, C> IndexMut<&'a K> for RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    fn index_mut(&mut self, key: &K) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
