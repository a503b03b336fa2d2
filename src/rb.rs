//! A red-black tree. Nodes live in a `Vec` arena and point at each other by
//! index, which lets every node keep a parent link without shared ownership.
//! Rotations and the insert/delete fixups walk those parent links upward
//! instead of recursing.
//!
//! After every public operation:
//!
//! 1. Every node is red or black, and missing children count as black.
//! 2. The root is black.
//! 3. A red node never has a red child.
//! 4. Every path from a node down to a missing child passes the same number
//!    of black nodes.
//!
//! Inserting an existing key overwrites its value.
//!
//! # Examples
//!
//! ```
//! use trees::rb::{Color, Tree};
//! use trees::Cursor;
//!
//! let mut tree = Tree::new();
//! for (key, value) in [(10, "A"), (5, "B"), (15, "C")] {
//!     tree.insert(key, value);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &10);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(root.left().map(|n| n.color()), Some(Color::Red));
//!
//! assert_eq!(tree.remove(&10), Some("A"));
//! assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [5, 15]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::map::OrderedMap;
use crate::traverse::{self, Cursor, Order, Traversal};

/// The color of a red-black node. Missing children are black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// May not have a red parent.
    Red,
    /// Counted by the black-height.
    Black,
}

/// Which child slot. Rotations and fixups are written once and mirrored through this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
struct RbNode<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<K, V> RbNode<K, V> {
    fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A Red-Black Tree. This can be used for inserting, finding, and deleting keys and values.
#[derive(Clone)]
pub struct Tree<K, V> {
    /// Every live node, densely packed. Erasing moves the last node into the freed slot.
    nodes: Vec<RbNode<K, V>>,
    root: Option<usize>,
}

/// An in-order (or [`Tree::traverse`]-ordered) walk over a [`Tree`].
pub type Iter<'a, K, V> = Traversal<'a, NodeRef<'a, K, V>>;

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.find(key).map(|index| &self.nodes[index].value)
    }

    /// Whether this tree holds `key`.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwites its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::rb::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10, "A");
    /// tree.insert(10, "B");
    ///
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&10), Some(&"B"));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(index) = current {
            let node = &mut self.nodes[index];
            parent = Some(index);
            (side, current) = match key.cmp(&node.key) {
                Ordering::Less => (Side::Left, node.left),
                Ordering::Equal => {
                    node.value = value;
                    return;
                }
                Ordering::Greater => (Side::Right, node.right),
            };
        }

        let index = self.nodes.len();
        self.nodes.push(RbNode {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            Some(parent) => *self.nodes[parent].child_mut(side) = Some(index),
            None => self.root = Some(index),
        }
        self.fix_insertion(index);
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use trees::rb::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let target = self.find(key)?;
        let mut removed_color = self.nodes[target].color;

        // `replacement` ends up where a node was unlinked and `replacement_parent` above it. The
        // parent is tracked separately since `replacement` is often a missing child.
        let replacement;
        let replacement_parent;
        match (self.nodes[target].left, self.nodes[target].right) {
            (None, only) | (only, None) => {
                replacement = only;
                replacement_parent = self.nodes[target].parent;
                self.transplant(target, only);
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.nodes[successor].color;
                replacement = self.nodes[successor].right;
                if successor == right {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = self.nodes[successor].parent;
                    self.transplant(successor, replacement);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }
                self.transplant(target, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[target].color;
            }
        }

        if removed_color == Color::Black {
            self.fix_deletion(replacement, replacement_parent);
        }
        Some(self.release(target))
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
        debug!("cleaned {} nodes out of rb tree", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Number of nodes on the longest root-to-leaf path. 0 when empty.
    pub fn height(&self) -> usize {
        traverse::height(self.root())
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.traverse(Order::InOrder)
    }

    /// Walks the tree in the given depth-first `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, K, V> {
        Traversal::new(self.root(), order)
    }

    /// A read-only handle to the root node. Handy for checking the shape and colors of the tree in
    /// tests; not needed for normal map usage.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|index| NodeRef { tree: self, index })
    }

    fn find(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(index),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn minimum(&self, mut index: usize) -> usize {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    fn is_red(&self, node: Option<usize>) -> bool {
        node.map_or(false, |index| self.nodes[index].color == Color::Red)
    }

    fn set_color(&mut self, node: Option<usize>, color: Color) {
        if let Some(index) = node {
            self.nodes[index].color = color;
        }
    }

    /// Which side of `parent` holds `child`. A missing `child` is whichever slot is empty.
    fn side_of(&self, parent: usize, child: Option<usize>) -> Side {
        if self.nodes[parent].left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever held `old` (a parent's child slot or the root) at `new`.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                *self.nodes[parent].child_mut(side) = new;
            }
            None => self.root = new,
        }
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new`, from the parent's point
    /// of view. `old`'s own links are left alone.
    fn transplant(&mut self, old: usize, new: Option<usize>) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Rotates around `node` toward `side`: the child on the opposite side moves up into `node`'s
    /// place and `node` becomes its `side` child. Does nothing without that child.
    ///
    /// # Diagram
    ///
    /// Rotating `x` toward `Side::Left`:
    ///
    /// ```text
    ///     p               p
    ///     |               |
    ///     x               y
    ///    / \             / \
    ///   a   y    ->     x   c
    ///      / \         / \
    ///     b   c       a   b
    /// ```
    fn rotate(&mut self, node: usize, side: Side) {
        let Some(riser) = self.nodes[node].child(side.opposite()) else {
            return;
        };
        trace!("rotating {:?} around node {}", side, node);

        let inner = self.nodes[riser].child(side);
        *self.nodes[node].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.replace_child(parent, node, Some(riser));
        self.nodes[riser].parent = parent;

        *self.nodes[riser].child_mut(side) = Some(node);
        self.nodes[node].parent = Some(riser);
    }

    /// Restores the coloring rules after `node` was attached as a red leaf.
    fn fix_insertion(&mut self, mut node: usize) {
        while let Some(mut parent) = self.nodes[node].parent.filter(|&p| self.is_red(Some(p))) {
            // A red parent is never the root, so there's always a grandparent.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let side = self.side_of(grandparent, Some(parent));
            let uncle = self.nodes[grandparent].child(side.opposite());

            if self.is_red(uncle) {
                trace!("red uncle, recoloring and moving up");
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            if self.nodes[parent].child(side.opposite()) == Some(node) {
                trace!("inner child, straightening");
                self.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }
            trace!("outer child, rotating grandparent");
            self.set_color(Some(parent), Color::Black);
            self.set_color(Some(grandparent), Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        self.set_color(self.root, Color::Black);
    }

    /// Restores the black-height after a black node was unlinked. `node` (possibly missing) sits
    /// where it was unlinked, under `parent`, and is short one black.
    fn fix_deletion(&mut self, mut node: Option<usize>, mut parent: Option<usize>) {
        while node != self.root && !self.is_red(node) {
            let Some(above) = parent else {
                break;
            };
            let side = self.side_of(above, node);
            // The sibling's side still holds at least one black, so it can't be missing.
            let Some(mut sibling) = self.nodes[above].child(side.opposite()) else {
                break;
            };

            if self.is_red(Some(sibling)) {
                trace!("red sibling");
                self.set_color(Some(sibling), Color::Black);
                self.set_color(Some(above), Color::Red);
                self.rotate(above, side);
                match self.nodes[above].child(side.opposite()) {
                    Some(next) => sibling = next,
                    None => break,
                }
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                trace!("black sibling with black children, moving up");
                self.set_color(Some(sibling), Color::Red);
                node = Some(above);
                parent = self.nodes[above].parent;
                continue;
            }

            if !self.is_red(far) {
                trace!("black sibling with red near child");
                self.set_color(near, Color::Black);
                self.set_color(Some(sibling), Color::Red);
                self.rotate(sibling, side.opposite());
                match self.nodes[above].child(side.opposite()) {
                    Some(next) => sibling = next,
                    None => break,
                }
            }

            trace!("black sibling with red far child");
            self.nodes[sibling].color = self.nodes[above].color;
            self.set_color(Some(above), Color::Black);
            self.set_color(self.nodes[sibling].child(side.opposite()), Color::Black);
            self.rotate(above, side);
            node = self.root;
            parent = None;
        }
        self.set_color(node, Color::Black);
    }

    /// Takes an already unlinked node out of the arena. The last node in the arena moves into its
    /// slot, so everything pointing at the last node is re-pointed.
    fn release(&mut self, index: usize) -> V {
        let removed = self.nodes.swap_remove(index);
        let moved_from = self.nodes.len();
        if index < moved_from {
            let (parent, left, right) = {
                let moved = &self.nodes[index];
                (moved.parent, moved.left, moved.right)
            };
            match parent {
                Some(parent) => {
                    let side = self.side_of(parent, Some(moved_from));
                    *self.nodes[parent].child_mut(side) = Some(index);
                }
                None => self.root = Some(index),
            }
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(index);
            }
        }
        removed.value
    }
}

/// A read-only handle to a node in an [`rb::Tree`](Tree). Key, value and children come from
/// [`Cursor`].
pub struct NodeRef<'a, K, V> {
    tree: &'a Tree<K, V>,
    pub(crate) index: usize,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    fn node(self) -> &'a RbNode<K, V> {
        &self.tree.nodes[self.index]
    }

    fn at(self, index: Option<usize>) -> Option<Self> {
        index.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    /// This node's color.
    pub fn color(self) -> Color {
        self.node().color
    }

    /// This node's parent. `None` for the root.
    pub fn parent(self) -> Option<Self> {
        self.at(self.node().parent)
    }
}

impl<'a, K, V> Cursor<'a> for NodeRef<'a, K, V> {
    type Key = K;
    type Value = V;

    fn key(self) -> &'a K {
        &self.node().key
    }

    fn value(self) -> &'a V {
        &self.node().value
    }

    fn left(self) -> Option<Self> {
        self.at(self.node().left)
    }

    fn right(self) -> Option<Self> {
        self.at(self.node().right)
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
