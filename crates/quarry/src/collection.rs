use crate::{stmt::Value, Result};

use serde::{Serialize, Serializer};
use std::{
    cmp::Ordering,
    collections::HashSet,
    fmt,
    hash::Hash,
    ops::Index,
};

/// An ordered sequence of results.
///
/// Every operation returns a new collection and leaves the receiver as it
/// was. Positions are always `0..len`; operations that drop items renumber
/// the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

/// Loose truthiness, as used by [`Collection::compact`].
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Collection<T> {
        Collection { items }
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn first_or<'a>(&'a self, default: &'a T) -> &'a T {
        self.first().unwrap_or(default)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn last_or<'a>(&'a self, default: &'a T) -> &'a T {
        self.last().unwrap_or(default)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn keys(&self) -> Collection<usize> {
        Collection::new((0..self.items.len()).collect())
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T, usize) -> bool) -> Collection<T>
    where
        T: Clone,
    {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, item)| predicate(item, *index))
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// Drop every falsy item.
    pub fn compact(&self) -> Collection<T>
    where
        T: Clone + Truthy,
    {
        self.filter(|item, _| item.is_truthy())
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T, usize) -> U) -> Collection<U> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| f(item, index))
            .collect()
    }

    /// Append the items of `other` after this collection's items.
    pub fn merge(&self, other: impl IntoIterator<Item = T>) -> Collection<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().chain(other).collect()
    }

    /// Drop structural duplicates, keeping each first occurrence in place.
    pub fn unique(&self) -> Collection<T>
    where
        T: Clone + PartialEq,
    {
        let mut out: Vec<T> = Vec::with_capacity(self.items.len());

        for item in &self.items {
            if !out.contains(item) {
                out.push(item.clone());
            }
        }

        Collection::new(out)
    }

    /// Drop items whose key was already seen, keeping each first occurrence.
    pub fn unique_by<K: Hash + Eq>(&self, mut key: impl FnMut(&T) -> K) -> Collection<T>
    where
        T: Clone,
    {
        let mut seen = HashSet::new();
        self.filter(|item, _| seen.insert(key(item)))
    }

    /// Stable sort with a caller supplied comparator.
    pub fn sort(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Collection<T>
    where
        T: Clone,
    {
        let mut items = self.items.clone();
        items.sort_by(compare);
        Collection::new(items)
    }

    pub fn reverse(&self) -> Collection<T>
    where
        T: Clone,
    {
        self.items.iter().rev().cloned().collect()
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    pub fn to_json(&self) -> Result<serde_json::Value>
    where
        T: Serialize,
    {
        Ok(serde_json::to_value(self)?)
    }
}

impl Collection<Value> {
    /// Flatten nested lists at any depth. Records are kept whole.
    pub fn flatten(&self) -> Collection<Value> {
        fn walk(items: &[Value], out: &mut Vec<Value>) {
            for item in items {
                match item {
                    Value::List(nested) => walk(nested, out),
                    other => out.push(other.clone()),
                }
            }
        }

        let mut out = vec![];
        walk(&self.items, &mut out);
        Collection::new(out)
    }
}

impl Collection<Collection<Value>> {
    /// Flatten nested collections of values, then their nested lists.
    pub fn flatten(&self) -> Collection<Value> {
        self.collapse().flatten()
    }
}

impl<T: Clone> Collection<Collection<T>> {
    /// Concatenate the nested collections, one level deep.
    pub fn collapse(&self) -> Collection<T> {
        self.items
            .iter()
            .flat_map(|nested| nested.items.iter().cloned())
            .collect()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { items: vec![] }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Collection { items }
    }
}

impl From<Collection<Value>> for Value {
    fn from(collection: Collection<Value>) -> Self {
        Value::List(collection.items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<T: Serialize> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && *self != "0"
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Collection<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}
