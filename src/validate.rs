//! Invariant checks for tests. None of this is needed to use the trees; it's
//! here so property tests can assert after every operation that a tree is
//! still well formed and report *which* rule broke when it isn't.

use std::fmt::Debug;

use crate::error::InvariantError;
use crate::node::Node;
use crate::traverse::{Cursor, Order, Traversal};
use crate::{avl, bst, rb};

/// Something that can check its own structural invariants.
pub trait Validate {
    /// Walks the whole structure and returns the first broken invariant, if any.
    fn validate(&self) -> Result<(), InvariantError>;
}

fn show<T: Debug>(value: &T) -> String {
    format!("{:?}", value)
}

/// Checks that an in-order walk under `root` is strictly ascending and visits `len` nodes.
fn check_order<'a, C>(root: Option<C>, len: usize) -> Result<(), InvariantError>
where
    C: Cursor<'a>,
    C::Key: Ord + Debug,
{
    let mut counted = 0;
    let mut previous: Option<&C::Key> = None;
    for (key, _) in Traversal::new(root, Order::InOrder) {
        if let Some(previous) = previous.filter(|previous| *previous >= key) {
            return Err(InvariantError::OutOfOrder {
                key: show(previous),
                next: show(key),
            });
        }
        previous = Some(key);
        counted += 1;
    }

    if counted != len {
        return Err(InvariantError::LengthMismatch {
            recorded: len,
            counted,
        });
    }
    Ok(())
}

/// Recomputes the height of the subtree under `node`, checking the stored heights and balance
/// factors along the way.
fn avl_height<K: Debug, V>(node: Option<&Node<K, V>>) -> Result<usize, InvariantError> {
    let Some(node) = node else {
        return Ok(0);
    };
    let left = avl_height(node.left())?;
    let right = avl_height(node.right())?;

    let actual = left.max(right) + 1;
    if node.height() != actual {
        return Err(InvariantError::StaleHeight {
            key: show(node.key()),
            stored: node.height(),
            actual,
        });
    }
    let balance = left as isize - right as isize;
    if balance.abs() > 1 {
        return Err(InvariantError::Unbalanced {
            key: show(node.key()),
            balance,
        });
    }
    Ok(actual)
}

/// Returns the number of black nodes on every path from `node` down to a missing child (counting
/// the missing child), checking the coloring and parent links along the way.
fn black_height<K: Debug, V>(node: Option<rb::NodeRef<'_, K, V>>) -> Result<usize, InvariantError> {
    let Some(node) = node else {
        return Ok(1);
    };

    for child in [node.left(), node.right()].into_iter().flatten() {
        if child.parent().map(|p| p.index) != Some(node.index) {
            return Err(InvariantError::BrokenParentLink {
                key: show(child.key()),
            });
        }
        if node.color() == rb::Color::Red && child.color() == rb::Color::Red {
            return Err(InvariantError::DoubleRed {
                key: show(node.key()),
                child: show(child.key()),
            });
        }
    }

    let left = black_height(node.left())?;
    let right = black_height(node.right())?;
    if left != right {
        return Err(InvariantError::BlackHeightMismatch {
            key: show(node.key()),
            left,
            right,
        });
    }
    Ok(left + usize::from(node.color() == rb::Color::Black))
}

impl<K: Ord + Debug, V> Validate for bst::Tree<K, V> {
    fn validate(&self) -> Result<(), InvariantError> {
        check_order(self.root(), self.len())?;

        let mut stack: Vec<_> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.count() == 0 {
                return Err(InvariantError::EmptyCount {
                    key: show(node.key()),
                });
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        Ok(())
    }
}

impl<K: Ord + Debug, V> Validate for avl::Tree<K, V> {
    fn validate(&self) -> Result<(), InvariantError> {
        check_order(self.root(), self.len())?;
        avl_height(self.root()).map(|_| ())
    }
}

impl<K: Ord + Debug, V> Validate for rb::Tree<K, V> {
    fn validate(&self) -> Result<(), InvariantError> {
        check_order(self.root(), self.len())?;

        if let Some(root) = self.root() {
            if root.parent().is_some() {
                return Err(InvariantError::BrokenParentLink {
                    key: show(root.key()),
                });
            }
            if root.color() == rb::Color::Red {
                return Err(InvariantError::RedRoot {
                    key: show(root.key()),
                });
            }
        }
        black_height(self.root()).map(|_| ())
    }
}
