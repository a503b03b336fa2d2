//! This crate exposes three ordered key-value trees behind one map contract,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key (with its associated value) and will sometimes have child
//! `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)` where `height` is the number of nodes on the
//! longest path from the root to a leaf. The trees in this crate differ in
//! how (and whether) they keep that height near `O(lg N)`:
//!
//! - [`bst::Tree`] never rebalances. Inserting ascending keys yields a list.
//! - [`avl::Tree`] keeps the heights of every node's subtrees within one of
//!   each other using rotations.
//! - [`rb::Tree`] colors every node red or black and keeps the number of
//!   black nodes equal on every root-to-leaf path.
//!
//! All three implement [`OrderedMap`] so callers can swap them freely.
//!
//! # Examples
//!
//! ```
//! use trees::{avl, bst, rb, OrderedMap};
//!
//! fn exercise<T: OrderedMap<i32, &'static str> + Default>() -> Vec<i32> {
//!     let mut tree = T::default();
//!     tree.insert(10, "A");
//!     tree.insert(5, "B");
//!     tree.insert(15, "C");
//!     tree.erase(&10);
//!     tree.iter().map(|(k, _)| *k).collect()
//! }
//!
//! assert_eq!(exercise::<bst::Tree<_, _>>(), [5, 15]);
//! assert_eq!(exercise::<avl::Tree<_, _>>(), [5, 15]);
//! assert_eq!(exercise::<rb::Tree<_, _>>(), [5, 15]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
mod error;
pub mod map;
pub mod node;
pub mod rb;
pub mod traverse;
pub mod validate;

pub use error::InvariantError;
pub use map::OrderedMap;
pub use traverse::{Cursor, Order};
pub use validate::Validate;

#[cfg(test)]
mod test;
