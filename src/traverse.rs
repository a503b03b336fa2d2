//! Depth-first traversals shared by every tree.
//!
//! Each tree hands out a [`Cursor`] for its root and [`Traversal`] walks from
//! there with an explicit stack, so even a degenerate BST never recurses.
//! A `Traversal` borrows its tree immutably for its whole life, which means
//! the tree can't be mutated mid-walk; calling `iter` again restarts it.

use std::marker::PhantomData;

/// The order in which a [`Traversal`] yields entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Yields ascending keys.
    #[default]
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// A cheap, copyable, read-only handle to a node somewhere in a tree.
pub trait Cursor<'a>: Copy {
    /// The tree's key type.
    type Key: 'a;
    /// The tree's value type.
    type Value: 'a;

    /// The key of the node under the cursor.
    fn key(self) -> &'a Self::Key;
    /// The value of the node under the cursor.
    fn value(self) -> &'a Self::Value;
    /// A cursor on the left child, if there is one.
    fn left(self) -> Option<Self>;
    /// A cursor on the right child, if there is one.
    fn right(self) -> Option<Self>;
}

enum Step<C> {
    /// Schedule this subtree's nodes.
    Expand(C),
    /// Yield this node.
    Emit(C),
}

/// A lazy depth-first walk over a tree, yielding `(key, value)` pairs.
pub struct Traversal<'a, C> {
    order: Order,
    stack: Vec<Step<C>>,
    _tree: PhantomData<&'a ()>,
}

impl<'a, C: Cursor<'a>> Traversal<'a, C> {
    /// Starts a walk of the subtree under `root` in the given `order`.
    pub fn new(root: Option<C>, order: Order) -> Self {
        Self {
            order,
            stack: root.map(Step::Expand).into_iter().collect(),
            _tree: PhantomData,
        }
    }

    /// The order this walk yields entries in.
    pub fn order(&self) -> Order {
        self.order
    }
}

impl<'a, C: Cursor<'a>> Iterator for Traversal<'a, C> {
    type Item = (&'a C::Key, &'a C::Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Step::Emit(node) => return Some((node.key(), node.value())),
                Step::Expand(node) => {
                    // Pushed in reverse so the first thing to visit is on top.
                    let left = node.left().map(Step::Expand);
                    let right = node.right().map(Step::Expand);
                    match self.order {
                        Order::PreOrder => {
                            self.stack.extend(right);
                            self.stack.extend(left);
                            return Some((node.key(), node.value()));
                        }
                        Order::InOrder => {
                            self.stack.extend(right);
                            self.stack.push(Step::Emit(node));
                            self.stack.extend(left);
                        }
                        Order::PostOrder => {
                            self.stack.push(Step::Emit(node));
                            self.stack.extend(right);
                            self.stack.extend(left);
                        }
                    }
                }
            }
        }
    }
}

/// Number of nodes on the longest root-to-leaf path below `root`.
pub(crate) fn height<'a, C: Cursor<'a>>(root: Option<C>) -> usize {
    let mut tallest = 0;
    let mut stack: Vec<(C, usize)> = root.map(|n| (n, 1)).into_iter().collect();
    while let Some((node, depth)) = stack.pop() {
        tallest = tallest.max(depth);
        stack.extend(node.left().map(|n| (n, depth + 1)));
        stack.extend(node.right().map(|n| (n, depth + 1)));
    }
    tallest
}
