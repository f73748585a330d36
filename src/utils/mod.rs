//! Small shared helpers

pub mod paths;

use std::collections::HashSet;
use std::hash::Hash;

/// Drop repeated items, keeping the first occurrence of each.
pub fn dedup_preserving_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
