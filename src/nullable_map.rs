//! An associative container whose key domain includes a single "null" key,
//! modelled as `Option<K>`. `Some` keys live in an ordinary `HashMap`; the
//! `None` key occupies one reserved slot and is never hashed or compared
//! against the others.

use crate::error::MemorizeError;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct NullableMap<K, V> {
    entries: HashMap<K, V>,
    //value and occupancy of the null slot in one field: a stored value equal
    //to the default is still distinguishable from an empty slot
    null_slot: Option<V>,
}

impl<K, V> NullableMap<K, V> {
    pub fn new() -> Self {
        NullableMap {
            entries: HashMap::new(),
            null_slot: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len() + if self.null_slot.is_some() { 1 } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.null_slot.is_none()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.null_slot = None;
    }
}

impl<K, V> NullableMap<K, V>
where
    K: Eq + Hash,
{
    pub fn contains_key(&self, key: Option<&K>) -> bool {
        match key {
            None => self.null_slot.is_some(),
            Some(k) => self.entries.contains_key(k),
        }
    }

    /// Inserts or overwrites the entry for `key` and returns the previous
    /// value, if any. Never fails, the null key included.
    pub fn insert(&mut self, key: Option<K>, value: V) -> Option<V> {
        match key {
            None => self.null_slot.replace(value),
            Some(k) => self.entries.insert(k, value),
        }
    }

    /// Strict insertion: fails with [`MemorizeError::DuplicateKey`] if `key`
    /// already has an entry. The null key is rejected on duplicates like any
    /// other key.
    pub fn try_insert(&mut self, key: Option<K>, value: V) -> Result<(), MemorizeError> {
        if self.contains_key(key.as_ref()) {
            return Err(MemorizeError::DuplicateKey);
        }
        self.insert(key, value);
        Ok(())
    }

    /// Returns the value for `key`, or [`MemorizeError::KeyNotFound`] if no
    /// entry exists, an unoccupied null slot included.
    pub fn get(&self, key: Option<&K>) -> Result<&V, MemorizeError> {
        self.try_get(key).ok_or(MemorizeError::KeyNotFound)
    }

    /// Non-failing lookup: `None` reports absence.
    pub fn try_get(&self, key: Option<&K>) -> Option<&V> {
        match key {
            None => self.null_slot.as_ref(),
            Some(k) => self.entries.get(k),
        }
    }

    /// Removes the entry for `key` if present and returns its value. For the
    /// null key this empties the slot.
    pub fn remove(&mut self, key: Option<&K>) -> Option<V> {
        match key {
            None => self.null_slot.take(),
            Some(k) => self.entries.remove(k),
        }
    }

    /// All keys, the null key (if occupied) yielded after all `Some` keys.
    /// The order of the `Some` keys is the hash map's and must not be relied
    /// upon.
    pub fn keys(&self) -> impl Iterator<Item = Option<&K>> + '_ {
        self.entries
            .keys()
            .map(Some)
            .chain(self.null_slot.is_some().then_some(None))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().chain(self.null_slot.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&K>, &V)> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| (Some(k), v))
            .chain(self.null_slot.as_ref().map(|v| (None, v)))
    }
}

impl<K, V> Default for NullableMap<K, V> {
    fn default() -> Self {
        NullableMap::new()
    }
}

impl<K, V> Extend<(Option<K>, V)> for NullableMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (Option<K>, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(Option<K>, V)> for NullableMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (Option<K>, V)>>(iter: I) -> Self {
        let mut map = NullableMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> fmt::Display for NullableMap<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut vec: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        vec.sort();
        if let Some(v) = &self.null_slot {
            vec.push(format!("_: {}", v));
        }
        write!(f, "{{{}}}", vec.iter().join(", "))
    }
}
