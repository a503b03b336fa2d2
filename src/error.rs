use thiserror::Error;

/// A broken structural invariant found by [`Validate`](crate::Validate).
///
/// None of the trees in this crate produce these through their public
/// operations. They exist so tests can say *which* invariant broke instead of
/// failing an anonymous `assert!`. Keys are captured with their `Debug`
/// representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// An in-order walk saw `key` at or after `next`.
    #[error("key {key} is not less than its in-order successor {next}")]
    OutOfOrder {
        /// The earlier key in the walk.
        key: String,
        /// The key that followed it.
        next: String,
    },
    /// A node's stored height doesn't match its subtrees.
    #[error("node {key} stores height {stored} but its subtrees give {actual}")]
    StaleHeight {
        /// The node's key.
        key: String,
        /// The height stored on the node.
        stored: usize,
        /// `1 + max(height(left), height(right))`.
        actual: usize,
    },
    /// An AVL node's subtrees differ in height by more than one.
    #[error("node {key} has balance factor {balance}")]
    Unbalanced {
        /// The node's key.
        key: String,
        /// `height(left) - height(right)`.
        balance: isize,
    },
    /// The root of a red-black tree is red.
    #[error("root {key} is red")]
    RedRoot {
        /// The root's key.
        key: String,
    },
    /// A red node has a red child.
    #[error("red node {key} has a red child {child}")]
    DoubleRed {
        /// The parent's key.
        key: String,
        /// The child's key.
        child: String,
    },
    /// Two paths below a node pass through different numbers of black nodes.
    #[error("node {key} has black-height {left} on the left but {right} on the right")]
    BlackHeightMismatch {
        /// The node's key.
        key: String,
        /// Black-height through the left child.
        left: usize,
        /// Black-height through the right child.
        right: usize,
    },
    /// A child's parent index doesn't point back at the node holding it.
    #[error("node {key} does not point back at its parent")]
    BrokenParentLink {
        /// The child's key.
        key: String,
    },
    /// A BST node survived with a duplicate count of zero.
    #[error("node {key} has a duplicate count of zero")]
    EmptyCount {
        /// The node's key.
        key: String,
    },
    /// The tree's recorded length disagrees with the nodes reachable from the root.
    #[error("tree records {recorded} entries but {counted} are reachable")]
    LengthMismatch {
        /// What `len()` reports.
        recorded: usize,
        /// What a traversal found.
        counted: usize,
    },
}
