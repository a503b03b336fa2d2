//! The node shape shared by the boxed trees ([`bst`](crate::bst) and
//! [`avl`](crate::avl)).
//!
//! A `Node` owns its children outright through `Option<Box<Node>>` links so
//! the topology can never be cyclic. The red-black tree needs parent
//! back-references and keeps its own arena-backed node instead (see
//! [`rb::NodeRef`](crate::rb::NodeRef)) but exposes the same accessors.

use std::fmt;

use crate::traverse::Cursor;

/// An owning edge to a child subtree. `None` is the empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A `Node` has a key that is used for searching/sorting and a value that is
/// associated with that key. Either child may be absent.
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// The key this node is sorted by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored alongside the key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The stored height of this subtree. Only the AVL tree keeps this
    /// accurate; the plain BST leaves it at 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `height(left) - height(right)` using the stored child heights.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }
}

/// Stored height of a possibly-empty subtree.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K, V> Cursor<'a> for &'a Node<K, V> {
    type Key = K;
    type Value = V;

    fn key(self) -> &'a K {
        &self.key
    }

    fn value(self) -> &'a V {
        &self.value
    }

    fn left(self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(self) -> Option<Self> {
        self.right.as_deref()
    }
}

/// Drops every node under `link` without recursing, so degenerate (list
/// shaped) trees can't overflow the stack. Returns how many nodes went away.
pub(crate) fn drain<K, V>(link: &mut Link<K, V>) -> usize {
    let mut dropped = 0;
    let mut stack: Vec<Box<Node<K, V>>> = link.take().into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
        dropped += 1;
    }
    dropped
}
