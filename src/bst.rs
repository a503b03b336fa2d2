//! A plain, never-rebalanced BST. Inserting keys in sorted order degrades it
//! into a list, so every walk in here is iterative rather than recursive.
//!
//! Repeated inserts of the same key don't create new nodes. The node keeps a
//! duplicate count instead (and takes the newest value). `erase` counts back
//! down and only unlinks the node once the count reaches zero.
//!
//! # Examples
//!
//! ```
//! use trees::bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.get(&1), Some(&2));
//!
//! // Inserting the same key again overwrites the value and bumps the count.
//! tree.insert(1, 3);
//! assert_eq!(tree.get(&1), Some(&3));
//! assert_eq!(tree.count(&1), 2);
//!
//! // Each erase takes one off the count.
//! assert!(tree.erase(&1));
//! assert_eq!(tree.count(&1), 1);
//! assert!(tree.erase(&1));
//! assert!(!tree.contains_key(&1));
//!
//! // Erasing a missing key is fine.
//! assert!(!tree.erase(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::map::OrderedMap;
use crate::node::{self, Link, Node};
use crate::traverse::{self, Cursor, Order, Traversal};

/// A value along with how many times its key has been inserted.
#[derive(Clone, Debug)]
pub(crate) struct Counted<V> {
    pub(crate) value: V,
    pub(crate) count: usize,
}

/// An unbalanced Binary Search Tree with per-key duplicate counts.
pub struct Tree<K, V> {
    root: Link<K, Counted<V>>,
    /// Number of distinct keys.
    len: usize,
}

/// An in-order (or [`Tree::traverse`]-ordered) walk over a [`Tree`].
pub type Iter<'a, K, V> = Traversal<'a, NodeRef<'a, K, V>>;

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        node::drain(&mut self.root);
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.find(key).map(|n| &n.value.value)
    }

    /// Whether this tree holds `key`.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// How many times `key` has been inserted without being erased. 0 when absent.
    pub fn count(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.find(key).map_or(0, |n| n.value.count)
    }

    /// Inserts the given value into the tree stored at the given key. Inserting an existing key
    /// overwrites its value and increments its duplicate count.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// tree.insert(1, 3);
    /// assert_eq!(tree.get(&1), Some(&3));
    /// assert_eq!(tree.count(&1), 2);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let slot = locate(&mut self.root, &key);
        match slot {
            Some(node) => {
                node.value.value = value;
                node.value.count += 1;
                trace!("duplicate insert, count is now {}", node.value.count);
            }
            None => {
                *slot = Some(Node::new_boxed(key, Counted { value, count: 1 }));
                self.len += 1;
            }
        }
    }

    /// Erases one occurrence of `key`. The node is unlinked once its duplicate count drops to
    /// zero. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10, "A");
    /// tree.insert(5, "B");
    /// tree.insert(15, "C");
    ///
    /// assert!(tree.erase(&10));
    /// assert!(!tree.contains_key(&10));
    /// assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [5, 15]);
    /// ```
    pub fn erase(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let slot = locate(&mut self.root, key);
        let Some(node) = slot.as_mut() else {
            return false;
        };
        if node.value.count > 1 {
            node.value.count -= 1;
            trace!("duplicate erase, count is now {}", node.value.count);
            return true;
        }

        if splice(slot).is_some() {
            self.len -= 1;
        }
        true
    }

    /// Drops every node in the tree.
    pub fn clean(&mut self) {
        let dropped = node::drain(&mut self.root);
        self.len = 0;
        debug!("cleaned {} nodes out of bst", dropped);
    }

    /// Number of nodes on the longest root-to-leaf path. 0 when empty.
    pub fn height(&self) -> usize {
        traverse::height(self.root())
    }

    /// Number of distinct keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walks the tree in ascending key order. Each key appears once regardless of its count.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.traverse(Order::InOrder)
    }

    /// Walks the tree in the given depth-first `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::{bst::Tree, Order};
    ///
    /// let tree: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// let keys = |order| tree.traverse(order).map(|(k, _)| *k).collect::<Vec<_>>();
    ///
    /// assert_eq!(keys(Order::PreOrder), [2, 1, 3]);
    /// assert_eq!(keys(Order::InOrder), [1, 2, 3]);
    /// assert_eq!(keys(Order::PostOrder), [1, 3, 2]);
    /// ```
    pub fn traverse(&self, order: Order) -> Iter<'_, K, V> {
        Traversal::new(self.root(), order)
    }

    /// A read-only handle to the root node, for inspecting the tree's shape.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.as_deref().map(NodeRef)
    }

    fn find(&self, key: &K) -> Option<&Node<K, Counted<V>>>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

/// Walks down from `link` and returns the link that holds `key`, or the empty link where `key`
/// would be attached.
fn locate<'a, K: Ord, V>(mut link: &'a mut Link<K, V>, key: &K) -> &'a mut Link<K, V> {
    loop {
        let ordering = link.as_deref().map(|node| key.cmp(&node.key));
        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, found) => return found,
        };
    }
}

/// Unlinks the node in `slot` and puts the appropriate replacement in its place:
///
/// - no children: nothing.
/// - one child: that child.
/// - two children: the in-order successor, which takes over both subtrees.
///
/// Returns the unlinked node.
fn splice<K, V>(slot: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let mut removed = slot.take()?;
    *slot = match (removed.left.take(), removed.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let mut rest = Some(right);
            match take_min(&mut rest) {
                Some(mut successor) => {
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(successor)
                }
                None => Some(left),
            }
        }
    };
    debug!("spliced a node out of bst");
    Some(removed)
}

/// Detaches the leftmost node under `link`, handing its right subtree to its parent.
fn take_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    loop {
        let has_left = link.as_ref().map_or(false, |n| n.left.is_some());
        link = match (has_left, link) {
            (true, Some(node)) => &mut node.left,
            (_, leftmost) => {
                let mut min = leftmost.take()?;
                *leftmost = min.right.take();
                return Some(min);
            }
        };
    }
}

/// A read-only handle to a node in a [`bst::Tree`](Tree).
pub struct NodeRef<'a, K, V>(&'a Node<K, Counted<V>>);

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    /// How many times this node's key has been inserted without being erased.
    pub fn count(self) -> usize {
        self.0.value.count
    }
}

impl<'a, K, V> Cursor<'a> for NodeRef<'a, K, V> {
    type Key = K;
    type Value = V;

    fn key(self) -> &'a K {
        &self.0.key
    }

    fn value(self) -> &'a V {
        &self.0.value.value
    }

    fn left(self) -> Option<Self> {
        self.0.left.as_deref().map(NodeRef)
    }

    fn right(self) -> Option<Self> {
        self.0.right.as_deref().map(NodeRef)
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Copies each node straight into the matching slot of the new tree, so even a list-shaped
    /// tree clones in linear time without recursing.
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        let mut stack: Vec<(&Node<K, Counted<V>>, &mut Link<K, Counted<V>>)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, &mut tree.root));
        }
        while let Some((source, slot)) = stack.pop() {
            let copy: &mut Node<K, Counted<V>> =
                slot.insert(Node::new_boxed(source.key.clone(), source.value.clone()));
            if let Some(left) = source.left.as_deref() {
                stack.push((left, &mut copy.left));
            }
            if let Some(right) = source.right.as_deref() {
                stack.push((right, &mut copy.right));
            }
        }
        tree.len = self.len;
        tree
    }
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
