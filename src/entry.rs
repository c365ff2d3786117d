/// A key-value pair stored in a `RedBlackMap<K, V>`.
///
/// Entries are ordered by their key alone through `ByKey<C>`; the value never takes part in a
/// comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
