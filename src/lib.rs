//! Ordered collections built on an arena-backed red black tree.
//!
//! # Examples
//!
//! ```
//! use rb_collections::red_black_tree::{RedBlackMap, RedBlackMultiset, RedBlackSet};
//!
//! let set: RedBlackSet<u32> = vec![3, 1, 2, 1].into_iter().collect();
//! assert_eq!(set.len(), 3);
//!
//! let multiset: RedBlackMultiset<u32> = vec![3, 1, 2, 1].into_iter().collect();
//! assert_eq!(multiset.count(&1), 2);
//!
//! let mut map = RedBlackMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//! assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"a", &"b"]);
//! ```

mod entry;
pub mod arena;
pub mod compare;
pub mod error;
pub mod red_black_tree;

pub use crate::entry::Entry;
pub use crate::error::{Error, Result};
