//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! A single `RedBlackTree<T, C>` engine backs three adapters: `RedBlackSet` keeps unique keys,
//! `RedBlackMultiset` keeps duplicates in insertion order, and `RedBlackMap` orders key-value
//! entries by key.

mod bound;
mod iter;
mod map;
mod multiset;
mod node;
mod rebalance;
mod set;
mod tree;

pub use self::iter::{Cursor, CursorMut, IntoIter, Iter, Position};
pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter, RedBlackMapIterMut};
pub use self::multiset::RedBlackMultiset;
pub use self::set::RedBlackSet;
pub use self::tree::{RedBlackTree, DEFAULT_CHUNK_SIZE};
