use crate::arena::{Handle, TypedArena};
use std::ops::{Index, IndexMut};

pub type Link = Option<Handle>;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// The links are plain handles into the owning tree's arena. They describe the shape of the tree
/// and never own the nodes they point at.
#[derive(Clone)]
pub struct Node<T> {
    pub item: T,
    pub color: Color,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T> Node<T> {
    pub fn new(item: T, parent: Link) -> Self {
        Node {
            item,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

/// The head of a tree: the root together with cached minimum and maximum nodes.
#[derive(Clone, Copy, Default)]
pub struct Head {
    pub root: Link,
    pub leftmost: Link,
    pub rightmost: Link,
}

/// The node graph of a red black tree: every node lives in an arena and is linked by handle.
#[derive(Clone)]
pub struct NodeStore<T> {
    arena: TypedArena<Node<T>>,
    pub head: Head,
}

impl<T> NodeStore<T> {
    pub fn new(chunk_size: usize) -> Self {
        NodeStore {
            arena: TypedArena::new(chunk_size),
            head: Head::default(),
        }
    }

    pub fn allocate(&mut self, node: Node<T>) -> Handle {
        self.arena.allocate(node)
    }

    pub fn free(&mut self, id: Handle) -> Node<T> {
        self.arena.free(&id)
    }

    pub fn contains(&self, id: Handle) -> bool {
        self.arena.contains(&id)
    }

    pub fn get(&self, id: Handle) -> Option<&Node<T>> {
        self.arena.get(&id)
    }

    pub fn get_mut(&mut self, id: Handle) -> Option<&mut Node<T>> {
        self.arena.get_mut(&id)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = Head::default();
    }

    // Borrows only the block of `id`, see `TypedArena::get_ptr`.
    pub fn node_ptr(&mut self, id: Handle) -> *mut Node<T> {
        self.arena
            .get_ptr(&id)
            .expect("Error: handle out of bounds.")
    }

    pub fn parent(&self, id: Handle) -> Link {
        self[id].parent
    }

    pub fn left(&self, id: Handle) -> Link {
        self[id].left
    }

    pub fn right(&self, id: Handle) -> Link {
        self[id].right
    }

    pub fn color(&self, id: Handle) -> Color {
        self[id].color
    }

    pub fn set_color(&mut self, id: Handle, color: Color) {
        self[id].color = color;
    }

    /// Absent links count as black.
    pub fn is_red(&self, link: Link) -> bool {
        match link {
            Some(id) => self.color(id) == Color::Red,
            None => false,
        }
    }

    /// Points whatever referred to `old` as a child (a parent or the head) at `new` instead.
    pub fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.head.root = new,
            Some(parent) => {
                if self.left(parent) == Some(old) {
                    self[parent].left = new;
                } else {
                    self[parent].right = new;
                }
            },
        }
    }

    pub fn rotate_left(&mut self, id: Handle) {
        let child = self
            .right(id)
            .expect("Expected right child node to be `Some`.");
        let grandchild = self.left(child);
        let parent = self.parent(id);

        self[id].right = grandchild;
        if let Some(grandchild) = grandchild {
            self[grandchild].parent = Some(id);
        }
        self[child].parent = parent;
        self.replace_child(parent, id, Some(child));
        self[child].left = Some(id);
        self[id].parent = Some(child);
    }

    pub fn rotate_right(&mut self, id: Handle) {
        let child = self
            .left(id)
            .expect("Expected left child node to be `Some`.");
        let grandchild = self.right(child);
        let parent = self.parent(id);

        self[id].left = grandchild;
        if let Some(grandchild) = grandchild {
            self[grandchild].parent = Some(id);
        }
        self[child].parent = parent;
        self.replace_child(parent, id, Some(child));
        self[child].right = Some(id);
        self[id].parent = Some(child);
    }

    pub fn subtree_min(&self, mut id: Handle) -> Handle {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    pub fn subtree_max(&self, mut id: Handle) -> Handle {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// Returns the in-order successor of `id`, or `None` if `id` is the maximum.
    pub fn successor(&self, mut id: Handle) -> Link {
        if let Some(right) = self.right(id) {
            return Some(self.subtree_min(right));
        }
        while let Some(parent) = self.parent(id) {
            if self.left(parent) == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    /// Returns the in-order predecessor of `id`, or `None` if `id` is the minimum.
    pub fn predecessor(&self, mut id: Handle) -> Link {
        if let Some(left) = self.left(id) {
            return Some(self.subtree_max(left));
        }
        while let Some(parent) = self.parent(id) {
            if self.right(parent) == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    /// Exchanges the places of `a` and `b` in the tree, colors included, while each item stays in
    /// its own slot. Handles to either node keep referring to the same item afterwards.
    pub fn swap_positions(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        let remap = |link: Link| {
            match link {
                Some(id) if id == a => Some(b),
                Some(id) if id == b => Some(a),
                link => link,
            }
        };

        let (a_parent, a_left, a_right, a_color) = {
            let node = &self[a];
            (node.parent, node.left, node.right, node.color)
        };
        let (b_parent, b_left, b_right, b_color) = {
            let node = &self[b];
            (node.parent, node.left, node.right, node.color)
        };

        let mut neighbors: Vec<Handle> = Vec::with_capacity(6);
        for link in &[a_parent, a_left, a_right, b_parent, b_left, b_right] {
            if let Some(id) = *link {
                if id != a && id != b && !neighbors.contains(&id) {
                    neighbors.push(id);
                }
            }
        }
        for id in neighbors {
            let node = &mut self[id];
            node.parent = remap(node.parent);
            node.left = remap(node.left);
            node.right = remap(node.right);
        }

        self.head.root = remap(self.head.root);
        self.head.leftmost = remap(self.head.leftmost);
        self.head.rightmost = remap(self.head.rightmost);

        {
            let node = &mut self[a];
            node.parent = remap(b_parent);
            node.left = remap(b_left);
            node.right = remap(b_right);
            node.color = b_color;
        }
        let node = &mut self[b];
        node.parent = remap(a_parent);
        node.left = remap(a_left);
        node.right = remap(a_right);
        node.color = a_color;
    }
}

impl<T> Index<Handle> for NodeStore<T> {
    type Output = Node<T>;

    fn index(&self, id: Handle) -> &Self::Output {
        &self.arena[id]
    }
}

impl<T> IndexMut<Handle> for NodeStore<T> {
    fn index_mut(&mut self, id: Handle) -> &mut Self::Output {
        &mut self.arena[id]
    }
}
