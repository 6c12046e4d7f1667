use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Split `items` into groups of `size`. The last group holds the remainder.
/// A `size` of zero yields no groups.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Remove duplicates, keeping the first occurrence of each value.
pub fn uniq<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    uniq_by(items, T::clone)
}

/// Like [`uniq`], comparing the keys computed by `key`.
pub fn uniq_by<T: Clone, K: Eq + Hash>(items: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(key(*item)))
        .cloned()
        .collect()
}

pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> Vec<T> {
    nested.iter().flatten().cloned().collect()
}

/// Values of `items` that do not appear in `exclude`, in order.
pub fn difference<T: Eq + Hash + Clone>(items: &[T], exclude: &[T]) -> Vec<T> {
    let exclude: HashSet<&T> = exclude.iter().collect();
    items
        .iter()
        .filter(|item| !exclude.contains(item))
        .cloned()
        .collect()
}

/// Unique values present in both slices, in the order of `a`.
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let b: HashSet<&T> = b.iter().collect();
    let common: Vec<T> = a.iter().filter(|item| b.contains(item)).cloned().collect();
    uniq(&common)
}

pub fn group_by<T: Clone, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> BTreeMap<K, Vec<T>> {
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}

/// Split into the values matching `pred` and the rest.
pub fn partition<T: Clone>(items: &[T], pred: impl Fn(&T) -> bool) -> (Vec<T>, Vec<T>) {
    items.iter().cloned().partition(|item| pred(item))
}
