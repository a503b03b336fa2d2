use std::collections::BTreeMap;

use trees::{avl, bst, rb, Order, OrderedMap, Validate};

use crate::Op;

/// Applies `ops` to a tree and to a model of what the tree should hold. `counted` says whether
/// repeated inserts stack up (and need as many erases) or just overwrite.
fn matches_model<T>(ops: &[Op<i8, i8>], counted: bool) -> bool
where
    T: OrderedMap<i8, i8> + Validate + Default,
{
    let mut tree = T::default();
    let mut model: BTreeMap<i8, (i8, usize)> = BTreeMap::new();

    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                tree.insert(k, v);
                let entry = model.entry(k).or_insert((v, 0));
                entry.0 = v;
                entry.1 = if counted { entry.1 + 1 } else { 1 };
            }
            Op::Erase(k) => {
                let expected = match model.get_mut(&k) {
                    Some(entry) if entry.1 > 1 => {
                        entry.1 -= 1;
                        true
                    }
                    Some(_) => model.remove(&k).is_some(),
                    None => false,
                };
                if tree.erase(&k) != expected {
                    return false;
                }
            }
            Op::Clean => {
                tree.clean();
                model.clear();
            }
        }
        if tree.validate().is_err() {
            return false;
        }
    }

    tree.len() == model.len()
        && tree.iter().eq(model.iter().map(|(k, (v, _))| (k, v)))
        && (i8::MIN..=i8::MAX).all(|k| tree.contains_key(&k) == model.contains_key(&k))
}

/// Inserts distinct keys, then erases all of them in a shuffled order.
fn round_trip<T>(keys: Vec<i16>, seed: u8) -> bool
where
    T: OrderedMap<i16, ()> + Validate + Default,
{
    let mut tree = T::default();
    let mut distinct: Vec<i16> = Vec::new();
    for key in keys {
        if !distinct.contains(&key) {
            distinct.push(key);
            tree.insert(key, ());
        }
    }
    if tree.len() != distinct.len() {
        return false;
    }

    let shift = usize::from(seed) % distinct.len().max(1);
    distinct.rotate_left(shift);
    for key in &distinct {
        if !tree.erase(key) || tree.contains_key(key) || tree.validate().is_err() {
            return false;
        }
    }
    tree.is_empty() && tree.height() == 0 && tree.iter().next().is_none()
}

/// In-order is strictly ascending, and every order visits each key once.
fn orders_agree<T>(keys: Vec<i8>) -> bool
where
    T: OrderedMap<i8, i8> + Default,
{
    let mut tree = T::default();
    for key in &keys {
        tree.insert(*key, *key);
    }

    let in_order: Vec<i8> = tree.iter().map(|(k, _)| *k).collect();
    let ascending = in_order.windows(2).all(|w| w[0] < w[1]);

    let mut pre: Vec<i8> = tree.traverse(Order::PreOrder).map(|(k, _)| *k).collect();
    let mut post: Vec<i8> = tree.traverse(Order::PostOrder).map(|(k, _)| *k).collect();
    pre.sort_unstable();
    post.sort_unstable();

    ascending && pre == in_order && post == in_order
}

fn clean_twice<T>(keys: Vec<i8>) -> bool
where
    T: OrderedMap<i8, ()> + Default,
{
    let mut tree = T::default();
    for key in keys {
        tree.insert(key, ());
    }
    tree.clean();
    let once = tree.is_empty() && tree.height() == 0;
    tree.clean();
    once && tree.is_empty() && tree.height() == 0 && tree.iter().count() == 0
}

quickcheck::quickcheck! {
    fn bst_matches_model(ops: Vec<Op<i8, i8>>) -> bool {
        crate::init_logging();
        matches_model::<bst::Tree<_, _>>(&ops, true)
    }

    fn avl_matches_model(ops: Vec<Op<i8, i8>>) -> bool {
        matches_model::<avl::Tree<_, _>>(&ops, false)
    }

    fn rb_matches_model(ops: Vec<Op<i8, i8>>) -> bool {
        matches_model::<rb::Tree<_, _>>(&ops, false)
    }

    fn bst_round_trip(keys: Vec<i16>, seed: u8) -> bool {
        round_trip::<bst::Tree<_, _>>(keys, seed)
    }

    fn avl_round_trip(keys: Vec<i16>, seed: u8) -> bool {
        round_trip::<avl::Tree<_, _>>(keys, seed)
    }

    fn rb_round_trip(keys: Vec<i16>, seed: u8) -> bool {
        round_trip::<rb::Tree<_, _>>(keys, seed)
    }

    fn bst_orders_agree(keys: Vec<i8>) -> bool {
        orders_agree::<bst::Tree<_, _>>(keys)
    }

    fn avl_orders_agree(keys: Vec<i8>) -> bool {
        orders_agree::<avl::Tree<_, _>>(keys)
    }

    fn rb_orders_agree(keys: Vec<i8>) -> bool {
        orders_agree::<rb::Tree<_, _>>(keys)
    }

    fn bst_clean_twice(keys: Vec<i8>) -> bool {
        clean_twice::<bst::Tree<_, _>>(keys)
    }

    fn avl_clean_twice(keys: Vec<i8>) -> bool {
        clean_twice::<avl::Tree<_, _>>(keys)
    }

    fn rb_clean_twice(keys: Vec<i8>) -> bool {
        clean_twice::<rb::Tree<_, _>>(keys)
    }
}
