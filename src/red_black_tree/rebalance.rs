//! Recoloring and rotation procedures that restore the red black invariants.

use crate::arena::Handle;
use crate::red_black_tree::node::{Color, NodeStore};

/// Restores the "no red node has a red child" invariant after `id` was attached as a red leaf.
pub fn after_insert<T>(nodes: &mut NodeStore<T>, mut id: Handle) {
    while let Some(mut parent) = nodes.parent(id) {
        if nodes.color(parent) == Color::Black {
            break;
        }
        let grandparent = nodes
            .parent(parent)
            .expect("Expected red parent node to have a parent.");

        if nodes.left(grandparent) == Some(parent) {
            let uncle = nodes.right(grandparent);
            if let Some(uncle) = uncle.filter(|uncle| nodes.color(*uncle) == Color::Red) {
                nodes.set_color(parent, Color::Black);
                nodes.set_color(uncle, Color::Black);
                nodes.set_color(grandparent, Color::Red);
                id = grandparent;
                continue;
            }
            if nodes.right(parent) == Some(id) {
                nodes.rotate_left(parent);
                id = parent;
                parent = nodes
                    .parent(id)
                    .expect("Expected rotated node to have a parent.");
            }
            nodes.set_color(parent, Color::Black);
            nodes.set_color(grandparent, Color::Red);
            nodes.rotate_right(grandparent);
        } else {
            let uncle = nodes.left(grandparent);
            if let Some(uncle) = uncle.filter(|uncle| nodes.color(*uncle) == Color::Red) {
                nodes.set_color(parent, Color::Black);
                nodes.set_color(uncle, Color::Black);
                nodes.set_color(grandparent, Color::Red);
                id = grandparent;
                continue;
            }
            if nodes.left(parent) == Some(id) {
                nodes.rotate_right(parent);
                id = parent;
                parent = nodes
                    .parent(id)
                    .expect("Expected rotated node to have a parent.");
            }
            nodes.set_color(parent, Color::Black);
            nodes.set_color(grandparent, Color::Red);
            nodes.rotate_left(grandparent);
        }
        break;
    }

    if let Some(root) = nodes.head.root {
        nodes.set_color(root, Color::Black);
    }
}

/// Prepares the black leaf `id` for removal.
///
/// Detaching a black leaf shortens every path through it by one black node. This pushes the
/// deficit up the tree until a red node can absorb it or a rotation rebalances the sibling side.
/// `id` stays attached and is still a leaf afterwards.
pub fn before_remove<T>(nodes: &mut NodeStore<T>, mut id: Handle) {
    while let Some(parent) = nodes.parent(id) {
        if nodes.left(parent) == Some(id) {
            let mut sibling = nodes
                .right(parent)
                .expect("Expected black node to have a sibling.");

            if nodes.color(sibling) == Color::Red {
                nodes.set_color(sibling, Color::Black);
                nodes.set_color(parent, Color::Red);
                nodes.rotate_left(parent);
                sibling = nodes
                    .right(parent)
                    .expect("Expected black node to have a sibling.");
            }

            if !nodes.is_red(nodes.left(sibling)) && !nodes.is_red(nodes.right(sibling)) {
                nodes.set_color(sibling, Color::Red);
                if nodes.color(parent) == Color::Red {
                    nodes.set_color(parent, Color::Black);
                    return;
                }
                id = parent;
                continue;
            }

            if !nodes.is_red(nodes.right(sibling)) {
                let near = nodes
                    .left(sibling)
                    .expect("Expected red near nephew to be `Some`.");
                nodes.set_color(near, Color::Black);
                nodes.set_color(sibling, Color::Red);
                nodes.rotate_right(sibling);
                sibling = near;
            }

            let far = nodes
                .right(sibling)
                .expect("Expected red far nephew to be `Some`.");
            nodes.set_color(far, Color::Black);
            let parent_color = nodes.color(parent);
            nodes.set_color(sibling, parent_color);
            nodes.set_color(parent, Color::Black);
            nodes.rotate_left(parent);
            return;
        } else {
            let mut sibling = nodes
                .left(parent)
                .expect("Expected black node to have a sibling.");

            if nodes.color(sibling) == Color::Red {
                nodes.set_color(sibling, Color::Black);
                nodes.set_color(parent, Color::Red);
                nodes.rotate_right(parent);
                sibling = nodes
                    .left(parent)
                    .expect("Expected black node to have a sibling.");
            }

            if !nodes.is_red(nodes.left(sibling)) && !nodes.is_red(nodes.right(sibling)) {
                nodes.set_color(sibling, Color::Red);
                if nodes.color(parent) == Color::Red {
                    nodes.set_color(parent, Color::Black);
                    return;
                }
                id = parent;
                continue;
            }

            if !nodes.is_red(nodes.left(sibling)) {
                let near = nodes
                    .right(sibling)
                    .expect("Expected red near nephew to be `Some`.");
                nodes.set_color(near, Color::Black);
                nodes.set_color(sibling, Color::Red);
                nodes.rotate_left(sibling);
                sibling = near;
            }

            let far = nodes
                .left(sibling)
                .expect("Expected red far nephew to be `Some`.");
            nodes.set_color(far, Color::Black);
            let parent_color = nodes.color(parent);
            nodes.set_color(sibling, parent_color);
            nodes.set_color(parent, Color::Black);
            nodes.rotate_right(parent);
            return;
        }
    }
}
