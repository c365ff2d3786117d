//! Chunked slot allocator that hands out stable handles.

use log::trace;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable reference to an object stored in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Objects never move once they are
/// allocated, so a handle can be held across any number of other allocations and frees.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// Slot storage for objects of a single type, addressed by `Handle`.
///
/// Storage grows one chunk of `chunk_size` blocks at a time and a chunk is never resized once
/// pushed, which is what keeps handles stable. A freed block joins a singly linked free list
/// threaded through the vacant blocks themselves, and the next allocation takes the most
/// recently freed block. Clearing or dropping the arena drops every live object.
///
/// # Examples
///
/// ```
/// use rb_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(!arena.contains(&x));
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn block(&self, handle: &Handle) -> Option<&Block<T>> {
        self.chunks.get(handle.chunk_index)?.get(handle.block_index)
    }

    fn block_mut(&mut self, handle: &Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk_index)?
            .get_mut(handle.block_index)
    }

    /// Constructs an empty arena that grows by `chunk_size` blocks at a time. A chunk size of
    /// zero is raised to one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(16);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    fn push_block(&mut self, value: T) -> Handle {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
            trace!(
                "arena grew to {} chunks ({} blocks)",
                self.chunks.len(),
                self.capacity,
            );
        }
        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(Block::Occupied(value));
        Handle {
            chunk_index,
            block_index: chunk.len() - 1,
        }
    }

    /// Stores `value` and returns the handle that names it, reusing a freed block if one exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        let handle = match self.free_head {
            None => self.push_block(value),
            Some(handle) => {
                let block = self
                    .block_mut(&handle)
                    .expect("Expected free list to name a block.");
                match mem::replace(block, Block::Occupied(value)) {
                    Block::Vacant(next) => self.free_head = next,
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
                handle
            },
        };
        self.len += 1;
        handle
    }

    /// Takes the object named by `handle` out of the arena and puts its block on the free list.
    ///
    /// # Panics
    ///
    /// Panics if `handle` corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        let next = self.free_head;
        let block = self
            .block_mut(handle)
            .expect("Error: attempting to free invalid block.");
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        let value = match mem::replace(block, Block::Vacant(next)) {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        };
        self.len -= 1;
        self.free_head = Some(*handle);
        value
    }

    /// Returns `true` if `handle` refers to a live object.
    pub fn contains(&self, handle: &Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the object named by `handle`, or `None` for a vacant or foreign handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.block(handle)? {
            Block::Occupied(value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.block_mut(handle)? {
            Block::Occupied(value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    // Only the block named by `handle` is borrowed, never a slice over its chunk, so references
    // previously obtained through this method for other handles stay usable.
    pub(crate) fn get_ptr(&mut self, handle: &Handle) -> Option<*mut T> {
        let chunk = self.chunks.get_mut(handle.chunk_index)?;
        if handle.block_index >= chunk.len() {
            return None;
        }
        let block = unsafe { &mut *chunk.as_mut_ptr().add(handle.block_index) };
        match block {
            Block::Occupied(value) => Some(value as *mut T),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases all chunks. Every outstanding handle becomes invalid.
    pub fn clear(&mut self) {
        self.free_head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }

    /// Returns an iterator over the live objects in storage order, paired with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> + '_ {
        self.chunks
            .iter_mut()
            .enumerate()
            .flat_map(|(chunk_index, chunk)| {
                chunk
                    .iter_mut()
                    .enumerate()
                    .filter_map(move |(block_index, block)| {
                        match block {
                            Block::Occupied(value) => {
                                let handle = Handle {
                                    chunk_index,
                                    block_index,
                                };
                                Some((handle, value))
                            },
                            Block::Vacant(_) => None,
                        }
                    })
            })
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}
