//! The map contract all three trees implement.

use crate::traverse::Order;

/// An ordered key-value container. [`bst::Tree`](crate::bst::Tree),
/// [`avl::Tree`](crate::avl::Tree) and [`rb::Tree`](crate::rb::Tree) are
/// interchangeable through this trait.
///
/// Missing keys are never an error: `contains_key` answers `false`, `get`
/// answers `None` and `erase` does nothing.
pub trait OrderedMap<K: Ord, V> {
    /// The iterator returned by [`iter`](Self::iter) and
    /// [`traverse`](Self::traverse).
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Number of nodes on the longest root-to-leaf path. 0 when empty.
    fn height(&self) -> usize;

    /// Whether a node with exactly this key exists.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// The value stored at `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Stores `value` at `key`. What happens to an existing key depends on
    /// the tree's duplicate policy.
    fn insert(&mut self, key: K, value: V);

    /// Removes `key`. Returns `false` (and leaves the tree alone) when the key
    /// is absent.
    fn erase(&mut self, key: &K) -> bool;

    /// Drops every node. Calling it on an empty tree is fine.
    fn clean(&mut self);

    /// Number of distinct keys stored.
    fn len(&self) -> usize;

    /// Whether the tree holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks the tree in the given depth-first `order`.
    fn traverse(&self, order: Order) -> Self::Iter<'_>;

    /// Walks the tree in ascending key order.
    fn iter(&self) -> Self::Iter<'_> {
        self.traverse(Order::InOrder)
    }
}
