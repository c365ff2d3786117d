//! Strict weak orderings used to arrange keys inside a tree.

use crate::entry::Entry;

/// A strict less-than relation over `T`.
///
/// Implementations must be irreflexive, asymmetric and transitive. Two values `a` and `b` are
/// considered equal when neither `less(a, b)` nor `less(b, a)` holds.
///
/// # Examples
///
/// ```
/// use rb_collections::compare::Compare;
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// struct Descending;
///
/// impl Compare<u32> for Descending {
///     fn less(&self, a: &u32, b: &u32) -> bool {
///         b < a
///     }
/// }
///
/// let mut set = RedBlackSet::with_compare(Descending);
/// set.insert(1);
/// set.insert(3);
/// set.insert(2);
/// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
/// ```
pub trait Compare<T> {
    fn less(&self, a: &T, b: &T) -> bool;

    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders values by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord,
{
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders `Entry<K, V>` values by key only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByKey<C>(pub C);

impl<K, V, C> Compare<Entry<K, V>> for ByKey<C>
where
    C: Compare<K>,
{
    fn less(&self, a: &Entry<K, V>, b: &Entry<K, V>) -> bool {
        self.0.less(&a.key, &b.key)
    }
}
