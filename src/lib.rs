//! Memoization of single-argument, deterministic functions.
//!
//! The crate is built bottom-up from a [`NullableMap`], an associative
//! container keyed by `Option<K>` in which `None` is a valid, storable key
//! held in a dedicated slot. [`Memoizer`] and [`NullableMemoizer`] are thin
//! caches over that map: on invocation they return a stored result if one
//! exists, otherwise they call the wrapped function once, store the result,
//! and return it.
//!
//! The cache is unbounded and in-process, with no eviction, expiration, or
//! thread-safety. Callers needing concurrent access must wrap it in their
//! own synchronization.

pub mod error;
pub mod memoizer;
pub mod nullable_map;

pub use error::MemorizeError;
pub use memoizer::{Memoizer, NullableMemoizer};
pub use nullable_map::NullableMap;
