//! A self-balancing BST (specifically, an AVL tree). Every node stores the
//! height of its subtree and, after any insert or erase, every node on the
//! path back to the root is re-measured and rotated if one side got more than
//! one level taller than the other.
//!
//! Inserting an existing key overwrites its value.
//!
//! # Examples
//!
//! ```
//! use trees::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Ascending inserts would make a plain BST a list. Here they rotate.
//! tree.insert(30, "A");
//! tree.insert(20, "B");
//! tree.insert(10, "C");
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &20);
//! assert_eq!(root.left().map(|n| *n.key()), Some(10));
//! assert_eq!(root.right().map(|n| *n.key()), Some(30));
//! assert_eq!(tree.height(), 2);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.remove(&20), Some("B"));
//! assert_eq!(tree.get(&20), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::map::OrderedMap;
use crate::node::{self, Link, Node};
use crate::traverse::{Order, Traversal};

/// A height-balanced Binary Search Tree. This can be used for inserting, finding, and deleting
/// keys and values.
#[derive(Clone)]
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

/// An in-order (or [`Tree::traverse`]-ordered) walk over a [`Tree`].
pub type Iter<'a, K, V> = Traversal<'a, &'a Node<K, V>>;

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether this tree holds `key`.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.get(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwites its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.get(&1), Some(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.get(&1), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        if insert(&mut self.root, key, value) {
            self.len += 1;
        }
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let removed = remove(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Like [`remove`](Self::remove) but only reports whether the key was present.
    pub fn erase(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.remove(key).is_some()
    }

    /// Drops every node in the tree.
    pub fn clean(&mut self) {
        let dropped = node::drain(&mut self.root);
        self.len = 0;
        debug!("cleaned {} nodes out of avl tree", dropped);
    }

    /// Number of nodes on the longest root-to-leaf path. 0 when empty.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walks the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.traverse(Order::InOrder)
    }

    /// Walks the tree in the given depth-first `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, K, V> {
        Traversal::new(self.root(), order)
    }

    /// The root node. Handy for checking the shape of the tree in tests; not needed for normal
    /// map usage.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
}

/// Inserts into the subtree at `link`, rebalancing on the way back up. Returns whether a new node
/// was created.
fn insert<K: Ord, V>(link: &mut Link<K, V>, key: K, value: V) -> bool {
    let Some(node) = link.as_mut() else {
        *link = Some(Node::new_boxed(key, value));
        return true;
    };
    let created = match key.cmp(&node.key) {
        Ordering::Less => insert(&mut node.left, key, value),
        Ordering::Equal => {
            node.value = value;
            false
        }
        Ordering::Greater => insert(&mut node.right, key, value),
    };

    // Only a new node can change heights, and once one ancestor is rotated the heights above it
    // are back to what they were, so the remaining calls are no-ops.
    if created {
        balance(link);
    }
    created
}

/// Removes `key` from the subtree at `link`, rebalancing every node on the way back up.
fn remove<K: Ord, V>(link: &mut Link<K, V>, key: &K) -> Option<V> {
    let ordering = key.cmp(&link.as_ref()?.key);
    let removed = match ordering {
        Ordering::Less => remove(&mut link.as_mut()?.left, key)?,
        Ordering::Greater => remove(&mut link.as_mut()?.right, key)?,
        Ordering::Equal => {
            let mut target = link.take()?;
            match (target.left.take(), target.right.take()) {
                (None, None) => {}
                (Some(child), None) | (None, Some(child)) => *link = Some(child),
                (Some(left), Some(right)) => {
                    // Swap the in-order successor's entry into this node and drop the successor.
                    target.left = Some(left);
                    target.right = Some(right);
                    if let Some(successor) = take_min(&mut target.right) {
                        let Node {
                            key: next_key,
                            value: next_value,
                            ..
                        } = *successor;
                        target.key = next_key;
                        let removed = mem::replace(&mut target.value, next_value);
                        *link = Some(target);
                        balance(link);
                        return Some(removed);
                    }
                    *link = Some(target);
                    return None;
                }
            }
            trace!("unlinked avl node with at most one child");
            target.value
        }
    };
    balance(link);
    Some(removed)
}

/// Detaches the leftmost node under `link`, rebalancing every node above it.
fn take_min<K, V>(link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let node = link.as_mut()?;
    if node.left.is_some() {
        let min = take_min(&mut node.left);
        balance(link);
        min
    } else {
        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }
}

/// Re-measures the node at `link` and rotates it if its subtrees' heights differ by more than one.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
fn balance<K, V>(link: &mut Link<K, V>) {
    let Some(root) = link.as_mut() else {
        return;
    };
    root.fix_height();
    let left_balance = root.left().map_or(0, Node::balance_factor);
    let right_balance = root.right().map_or(0, Node::balance_factor);
    match root.balance_factor() {
        bf if bf > 1 => {
            if left_balance < 0 {
                trace!("left-right case");
                rotate_left(&mut root.left);
            } else {
                trace!("left-left case");
            }
            rotate_right(link);
        }
        bf if bf < -1 => {
            if right_balance > 0 {
                trace!("right-left case");
                rotate_right(&mut root.right);
            } else {
                trace!("right-right case");
            }
            rotate_left(link);
        }
        _ => {}
    }

    if cfg!(debug_assertions) {
        if let Some(root) = link.as_deref() {
            let left_height = root.left().map_or(0, Node::height);
            let right_height = root.right().map_or(0, Node::height);
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }
}

/// Rotate the node at `link` to the right. This moves the left child up vertically and the node
/// down vertically. Used to rebalance the tree when the left child is too tall. Does nothing if
/// there is no left child.
///
/// # Diagram
///
/// ```text
///      link                      link
///       |                         |
///    old_root                  new_root
///    /     \                   /     \
/// new_root  z     rotate ->   x    old_root
///  / \                              /  \
/// x   y                            y    z
/// ```
fn rotate_right<K, V>(link: &mut Link<K, V>) {
    let Some(mut old_root) = link.take() else {
        return;
    };
    let Some(mut new_root) = old_root.left.take() else {
        *link = Some(old_root);
        return;
    };

    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();
    *link = Some(new_root);
}

/// The mirror image of [`rotate_right`]: the right child moves up and the node moves down to its
/// left. Does nothing if there is no right child.
fn rotate_left<K, V>(link: &mut Link<K, V>) {
    let Some(mut old_root) = link.take() else {
        return;
    };
    let Some(mut new_root) = old_root.right.take() else {
        *link = Some(old_root);
        return;
    };

    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();
    *link = Some(new_root);
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> OrderedMap<K, V> for Tree<K, V> {
    type Iter<'a> = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn height(&self) -> usize {
        Tree::height(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        Tree::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Tree::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        Tree::insert(self, key, value)
    }

    fn erase(&mut self, key: &K) -> bool {
        Tree::erase(self, key)
    }

    fn clean(&mut self) {
        Tree::clean(self)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }

    fn traverse(&self, order: Order) -> Self::Iter<'_> {
        Tree::traverse(self, order)
    }
}
