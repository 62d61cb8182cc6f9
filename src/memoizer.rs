//! Memoization of single-argument functions. [`Memoizer`] covers keys that
//! are never null; [`NullableMemoizer`] additionally accepts the null key.
//! Both delegate storage to a [`NullableMap`] and never invalidate entries
//! on their own: [`Memoizer::clear`] is the only way to force recomputation.
//!
//! The wrapped function is expected to be pure and deterministic. This is a
//! caller contract, not something the cache can enforce.

use crate::error::MemorizeError;
use crate::nullable_map::NullableMap;
use log::{debug, trace};
use std::hash::Hash;

pub struct Memoizer<K, V, F> {
    results: NullableMap<K, V>,
    compute: F,
}

impl<K, V, F> Memoizer<K, V, F> {
    pub fn new(compute: F) -> Self {
        Memoizer {
            results: NullableMap::new(),
            compute,
        }
    }
}

impl<K, V, F> Memoizer<K, V, F>
where
    K: Eq + Hash,
{
    /// Whether a result is already stored for `key`. Never invokes the
    /// wrapped function.
    pub fn is_memoized(&self, key: &K) -> bool {
        self.results.contains_key(Some(key))
    }

    /// The stored result for `key`, or [`MemorizeError::KeyNotFound`] if it
    /// has not been computed yet. Never invokes the wrapped function.
    pub fn get_memoized(&self, key: &K) -> Result<&V, MemorizeError> {
        self.results.get(Some(key))
    }

    pub fn try_get_memoized(&self, key: &K) -> Option<&V> {
        self.results.try_get(Some(key))
    }

    /// Drops all stored results; subsequent invocations recompute.
    pub fn clear(&mut self) {
        debug!("clearing {} memoized results", self.results.len());
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<K, V, F> Memoizer<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> V,
{
    /// Returns the stored result for `key`, computing and storing it first
    /// if absent. The wrapped function is called at most once per key.
    pub fn invoke(&mut self, key: K) -> V {
        if let Some(value) = self.results.try_get(Some(&key)) {
            trace!("cache hit");
            return value.clone();
        }
        trace!("cache miss, invoking wrapped function");
        let value = (self.compute)(&key);
        self.results.insert(Some(key), value.clone());
        value
    }
}

impl<K, V, E, F> Memoizer<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> Result<V, E>,
{
    /// [`Memoizer::invoke`] for fallible functions. An `Err` propagates
    /// unchanged and leaves no entry behind, so a later call retries the
    /// computation.
    pub fn try_invoke(&mut self, key: K) -> Result<V, E> {
        if let Some(value) = self.results.try_get(Some(&key)) {
            trace!("cache hit");
            return Ok(value.clone());
        }
        trace!("cache miss, invoking wrapped function");
        let value = (self.compute)(&key)?;
        self.results.insert(Some(key), value.clone());
        Ok(value)
    }
}

/// A [`Memoizer`] over the full nullable key domain: `None` is an ordinary
/// argument, cached in the backing map's null slot independently of every
/// `Some` key.
pub struct NullableMemoizer<K, V, F> {
    results: NullableMap<K, V>,
    compute: F,
}

impl<K, V, F> NullableMemoizer<K, V, F> {
    pub fn new(compute: F) -> Self {
        NullableMemoizer {
            results: NullableMap::new(),
            compute,
        }
    }
}

impl<K, V, F> NullableMemoizer<K, V, F>
where
    K: Eq + Hash,
{
    pub fn is_memoized(&self, key: Option<&K>) -> bool {
        self.results.contains_key(key)
    }

    pub fn get_memoized(&self, key: Option<&K>) -> Result<&V, MemorizeError> {
        self.results.get(key)
    }

    pub fn try_get_memoized(&self, key: Option<&K>) -> Option<&V> {
        self.results.try_get(key)
    }

    pub fn clear(&mut self) {
        debug!("clearing {} memoized results", self.results.len());
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<K, V, F> NullableMemoizer<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(Option<&K>) -> V,
{
    pub fn invoke(&mut self, key: Option<K>) -> V {
        if let Some(value) = self.results.try_get(key.as_ref()) {
            trace!("cache hit");
            return value.clone();
        }
        trace!("cache miss, invoking wrapped function");
        let value = (self.compute)(key.as_ref());
        self.results.insert(key, value.clone());
        value
    }
}

impl<K, V, E, F> NullableMemoizer<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(Option<&K>) -> Result<V, E>,
{
    pub fn try_invoke(&mut self, key: Option<K>) -> Result<V, E> {
        if let Some(value) = self.results.try_get(key.as_ref()) {
            trace!("cache hit");
            return Ok(value.clone());
        }
        trace!("cache miss, invoking wrapped function");
        let value = (self.compute)(key.as_ref())?;
        self.results.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn invoke_computes_once_per_key() {
        let calls = Cell::new(0);
        let mut memoizer = Memoizer::new(|x: &i32| {
            calls.set(calls.get() + 1);
            x * 2
        });
        assert_eq!(memoizer.invoke(5), 10);
        assert_eq!(memoizer.invoke(5), 10);
        assert_eq!(calls.get(), 1);
        assert_eq!(memoizer.invoke(7), 14);
        assert_eq!(calls.get(), 2);
        assert_eq!(memoizer.len(), 2);
    }

    #[test]
    fn is_memoized_has_no_side_effects() {
        let calls = Cell::new(0);
        let mut memoizer = Memoizer::new(|x: &i32| {
            calls.set(calls.get() + 1);
            x * 2
        });
        assert!(!memoizer.is_memoized(&5));
        assert_eq!(calls.get(), 0);
        memoizer.invoke(5);
        assert!(memoizer.is_memoized(&5));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn get_memoized() {
        let mut memoizer = Memoizer::new(|s: &String| s.len());
        assert_eq!(
            memoizer.get_memoized(&"hello".to_string()),
            Err(MemorizeError::KeyNotFound)
        );
        assert_eq!(memoizer.try_get_memoized(&"hello".to_string()), None);
        memoizer.invoke("hello".to_string());
        assert_eq!(memoizer.get_memoized(&"hello".to_string()), Ok(&5));
        assert_eq!(memoizer.try_get_memoized(&"hello".to_string()), Some(&5));
    }

    #[test]
    fn clear_forces_recomputation() {
        let calls = Cell::new(0);
        let mut memoizer = Memoizer::new(|x: &i32| {
            calls.set(calls.get() + 1);
            x * 2
        });
        memoizer.invoke(5);
        memoizer.clear();
        assert!(memoizer.is_empty());
        assert!(!memoizer.is_memoized(&5));
        assert_eq!(memoizer.invoke(5), 10);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_invocation_leaves_no_entry() {
        let calls = Cell::new(0);
        let mut memoizer = Memoizer::new(|x: &i32| {
            calls.set(calls.get() + 1);
            if *x < 0 {
                Err("negative input")
            } else {
                Ok(x * 2)
            }
        });
        assert_eq!(memoizer.try_invoke(-1), Err("negative input"));
        assert!(!memoizer.is_memoized(&-1));
        //the failed key is retried, not served from a poisoned entry
        assert_eq!(memoizer.try_invoke(-1), Err("negative input"));
        assert_eq!(calls.get(), 2);
        assert_eq!(memoizer.try_invoke(4), Ok(8));
        assert!(memoizer.is_memoized(&4));
        assert_eq!(memoizer.try_invoke(4), Ok(8));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn nullable_invoke_caches_null_key_independently() {
        let calls = Cell::new(0);
        let mut memoizer = NullableMemoizer::new(|key: Option<&i32>| {
            calls.set(calls.get() + 1);
            key.copied().unwrap_or(-1) * 2
        });
        assert!(!memoizer.is_memoized(None));
        assert_eq!(memoizer.invoke(Some(5)), 10);
        assert!(!memoizer.is_memoized(None));
        assert_eq!(memoizer.invoke(None), -2);
        assert!(memoizer.is_memoized(None));
        assert_eq!(memoizer.invoke(None), -2);
        assert_eq!(calls.get(), 2);
        assert_eq!(memoizer.len(), 2);
    }

    #[test]
    fn nullable_get_and_clear() {
        let mut memoizer = NullableMemoizer::new(|key: Option<&i32>| key.is_some());
        assert_eq!(memoizer.get_memoized(None), Err(MemorizeError::KeyNotFound));
        memoizer.invoke(None);
        memoizer.invoke(Some(1));
        assert_eq!(memoizer.get_memoized(None), Ok(&false));
        assert_eq!(memoizer.get_memoized(Some(&1)), Ok(&true));
        memoizer.clear();
        assert!(memoizer.is_empty());
        assert_eq!(memoizer.try_get_memoized(None), None);
    }

    #[test]
    fn nullable_try_invoke_propagates_errors() {
        let mut memoizer = NullableMemoizer::new(|key: Option<&i32>| {
            key.copied().ok_or("null input not supported")
        });
        assert_eq!(memoizer.try_invoke(None), Err("null input not supported"));
        assert!(!memoizer.is_memoized(None));
        assert_eq!(memoizer.try_invoke(Some(3)), Ok(3));
        assert!(memoizer.is_memoized(Some(&3)));
    }
}
