//! Query engine module
//!
//! Composable operators over entity sequences, plus a fluent [`Query`]
//! adapter that chains them.

pub mod operators;

pub use operators::{
    filter, group_by, hash_join, line_total, max_by, order_by_descending, sum, top_n,
};

use indexmap::IndexMap;
use std::hash::Hash;
use std::iter::{Filter, Map, Sum, Take};

/// Fluent query over a sequence.
///
/// Each step wraps the previous one; nothing is evaluated until a terminal
/// step (`execute`, `sum`, `group_by`, `max_by`, `count`) runs, except
/// `order_by_descending`, which must see the whole input.
///
/// ```
/// use webstore_core::query::Query;
///
/// let top: Vec<_> = Query::new([100, 50, 200, 75])
///     .order_by_descending(|t| *t)
///     .top_n(3)
///     .execute();
/// assert_eq!(top, vec![200, 100, 75]);
/// ```
#[derive(Debug, Clone)]
pub struct Query<I> {
    rows: I,
}

impl<I: Iterator> Query<I> {
    /// Starts a query over any sequence
    pub fn new<S>(seq: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Query {
            rows: seq.into_iter(),
        }
    }

    /// Add a WHERE clause
    pub fn filter<P>(self, predicate: P) -> Query<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Query {
            rows: filter(self.rows, predicate),
        }
    }

    /// Project each element
    pub fn map<B, F>(self, f: F) -> Query<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Query {
            rows: self.rows.map(f),
        }
    }

    /// Stable descending sort
    pub fn order_by_descending<K, F>(self, key_fn: F) -> Query<std::vec::IntoIter<I::Item>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        Query {
            rows: order_by_descending(self.rows, key_fn).into_iter(),
        }
    }

    /// Keep at most `n` elements
    pub fn top_n(self, n: usize) -> Query<Take<I>> {
        Query {
            rows: top_n(self.rows, n),
        }
    }

    /// Group by key in first-seen order
    pub fn group_by<K, F>(self, key_fn: F) -> IndexMap<K, Vec<I::Item>>
    where
        K: Hash + Eq,
        F: FnMut(&I::Item) -> K,
    {
        group_by(self.rows, key_fn)
    }

    /// Sum a value over all elements
    pub fn sum<V, F>(self, value_fn: F) -> V
    where
        V: Sum<V>,
        F: FnMut(I::Item) -> V,
    {
        sum(self.rows, value_fn)
    }

    /// Element with the greatest key, first occurrence on ties
    pub fn max_by<K, F>(self, key_fn: F) -> Option<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        max_by(self.rows, key_fn)
    }

    /// Number of elements
    pub fn count(self) -> usize {
        self.rows.count()
    }

    /// Execute the query, materializing the result
    pub fn execute(self) -> Vec<I::Item> {
        self.rows.collect()
    }
}

impl<I: Iterator> IntoIterator for Query<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.rows
    }
}
