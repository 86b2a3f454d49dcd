//! Query operators
//!
//! Pure functions over sequences. None of them mutate their input and none
//! of them fail: an empty input produces an empty output, a zero sum or
//! `None`.

use crate::model::{Money, OrderItem};
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::{Filter, Sum, Take};

/// Lazily keeps the elements matching `predicate`.
///
/// The returned iterator is restartable by cloning whenever the input
/// iterator and the predicate are `Clone`.
pub fn filter<I, P>(seq: I, predicate: P) -> Filter<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    seq.into_iter().filter(predicate)
}

/// Groups elements by key.
///
/// Groups appear in the order their key was first seen; elements within a
/// group keep their input order.
pub fn group_by<I, K, F>(seq: I, mut key_fn: F) -> IndexMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: IndexMap<K, Vec<I::Item>> = IndexMap::new();
    for item in seq {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Sums `value_fn` over the sequence. Empty input sums to zero.
pub fn sum<I, V, F>(seq: I, value_fn: F) -> V
where
    I: IntoIterator,
    V: Sum<V>,
    F: FnMut(I::Item) -> V,
{
    seq.into_iter().map(value_fn).sum()
}

/// Value of one order line after discount: `unit_price * quantity - discount`.
///
/// Every monetary total in the reports is built from this.
pub fn line_total(item: &OrderItem) -> Money {
    item.unit_price * item.quantity - item.discount
}

/// Sorts descending by key. The sort is stable: equal keys keep their input
/// order. Each key is computed once.
pub fn order_by_descending<I, K, F>(seq: I, mut key_fn: F) -> Vec<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut rows: Vec<I::Item> = seq.into_iter().collect();
    rows.sort_by_cached_key(|row| Reverse(key_fn(row)));
    rows
}

/// First `n` elements. Shorter input yields fewer elements.
pub fn top_n<I>(seq: I, n: usize) -> Take<I::IntoIter>
where
    I: IntoIterator,
{
    seq.into_iter().take(n)
}

/// Element with the greatest key; the first one wins ties.
pub fn max_by<I, K, F>(seq: I, mut key_fn: F) -> Option<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<(K, I::Item)> = None;
    for item in seq {
        let key = key_fn(&item);
        let replace = match &best {
            Some((best_key, _)) => key > *best_key,
            None => true,
        };
        if replace {
            best = Some((key, item));
        }
    }
    best.map(|(_, item)| item)
}

/// Inner equi-join.
///
/// The right side is hashed (build phase), then the left side is scanned
/// (probe phase). Output follows left order, and for each left element the
/// matching right elements in their input order.
pub fn hash_join<L, R, K, FL, FR>(
    left: L,
    right: R,
    mut left_key: FL,
    mut right_key: FR,
) -> Vec<(L::Item, R::Item)>
where
    L: IntoIterator,
    R: IntoIterator,
    L::Item: Clone,
    R::Item: Clone,
    K: Hash + Eq,
    FL: FnMut(&L::Item) -> K,
    FR: FnMut(&R::Item) -> K,
{
    let mut hash_table: HashMap<K, Vec<R::Item>> = HashMap::new();
    for r_row in right {
        hash_table.entry(right_key(&r_row)).or_default().push(r_row);
    }

    let mut result = Vec::new();
    for l_row in left {
        if let Some(matching_rows) = hash_table.get(&left_key(&l_row)) {
            for r_row in matching_rows {
                result.push((l_row.clone(), r_row.clone()));
            }
        }
    }
    result
}
