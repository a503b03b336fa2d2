use trees::rb::Color;
use trees::{avl, bst, rb, OrderedMap, Validate};

use crate::init_logging;

fn in_order<T: OrderedMap<i32, &'static str>>(tree: &T) -> Vec<i32> {
    tree.iter().map(|(k, _)| *k).collect()
}

fn build<T: OrderedMap<i32, &'static str> + Default>(entries: &[(i32, &'static str)]) -> T {
    let mut tree = T::default();
    for (key, value) in entries {
        tree.insert(*key, *value);
    }
    tree
}

#[test]
fn bst_height_of_four_inserts() {
    init_logging();
    let tree: bst::Tree<_, _> = build(&[(10, "A"), (5, "B"), (15, "C"), (1, "D")]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn bst_erase_node_with_two_children() {
    init_logging();
    let mut tree: bst::Tree<_, _> = build(&[(10, "A"), (5, "B"), (15, "C")]);

    assert!(tree.erase(&10));

    assert_eq!(in_order(&tree), [5, 15]);
    assert!(!tree.contains_key(&10));
    tree.validate().unwrap();
}

#[test]
fn avl_single_rotation() {
    init_logging();
    let tree: avl::Tree<_, _> = build(&[(30, "A"), (20, "B"), (10, "C")]);

    let root = tree.root().expect("tree has a root");
    assert_eq!(*root.key(), 20);
    assert_eq!(root.left().map(|n| *n.key()), Some(10));
    assert_eq!(root.right().map(|n| *n.key()), Some(30));
    tree.validate().unwrap();
}

#[test]
fn avl_double_rotation() {
    init_logging();
    let tree: avl::Tree<_, _> = build(&[(10, "A"), (30, "B"), (20, "C")]);

    let root = tree.root().expect("tree has a root");
    assert_eq!(*root.key(), 20);
    assert_eq!(root.left().map(|n| *n.key()), Some(10));
    assert_eq!(root.right().map(|n| *n.key()), Some(30));
    tree.validate().unwrap();
}

#[test]
fn duplicate_key_policies() {
    init_logging();
    let entries = [(10, "A"), (10, "B")];

    let tree: rb::Tree<_, _> = build(&entries);
    assert_eq!(tree.iter().collect::<Vec<_>>(), [(&10, &"B")]);

    let tree: avl::Tree<_, _> = build(&entries);
    assert_eq!(tree.iter().collect::<Vec<_>>(), [(&10, &"B")]);

    let mut tree: bst::Tree<_, _> = build(&entries);
    assert_eq!(tree.iter().collect::<Vec<_>>(), [(&10, &"B")]);
    assert_eq!(tree.count(&10), 2);
    assert!(tree.erase(&10));
    assert!(tree.contains_key(&10));
    assert!(tree.erase(&10));
    assert!(!tree.contains_key(&10));
}

#[test]
fn rb_erase_keeps_colors_valid() {
    init_logging();
    let mut tree: rb::Tree<_, _> = build(&[(10, "A"), (5, "B"), (15, "C")]);

    assert!(tree.erase(&10));

    assert_eq!(in_order(&tree), [5, 15]);
    assert_eq!(tree.root().map(|n| n.color()), Some(Color::Black));
    tree.validate().unwrap();
}

#[test]
fn driver_walkthrough() {
    fn walk<T: OrderedMap<i32, &'static str> + Validate + Default>() {
        let mut tree: T = build(&[(8, "h"), (3, "c"), (10, "j"), (1, "a"), (6, "f")]);
        assert!(tree.erase(&3));
        tree.validate().unwrap();

        tree.clean();
        assert!(tree.is_empty());

        for (key, value) in [(4, "d"), (2, "b"), (7, "g")] {
            tree.insert(key, value);
        }
        assert_eq!(tree.height(), 2);
        assert!(tree.contains_key(&7));
        assert!(!tree.contains_key(&8));
        assert_eq!(tree.get(&2), Some(&"b"));
        assert_eq!(in_order(&tree), [2, 4, 7]);
        tree.validate().unwrap();
    }

    init_logging();
    walk::<bst::Tree<_, _>>();
    walk::<avl::Tree<_, _>>();
    walk::<rb::Tree<_, _>>();
}

#[test]
fn independent_instances() {
    let mut first: rb::Tree<i32, &str> = rb::Tree::new();
    let mut second: rb::Tree<i32, &str> = rb::Tree::new();
    first.insert(1, "one");
    second.insert(2, "two");
    first.clean();

    assert!(first.is_empty());
    assert_eq!(second.get(&2), Some(&"two"));
}
