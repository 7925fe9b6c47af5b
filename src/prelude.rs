//! Shared collection aliases.
//!
//! Maps keyed by names use the Fx hasher throughout the crate. Objects need
//! deterministic iteration order, so they use an insertion-ordered map with
//! the same hasher.

pub use rustc_hash::FxHashMap;

pub use std::collections::VecDeque;
pub use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════════
// IndexMap - insertion ordered, FxHasher
// ═══════════════════════════════════════════════════════════════════════════════

pub type IndexMap<K, V> =
    indexmap::IndexMap<K, V, core::hash::BuildHasherDefault<rustc_hash::FxHasher>>;

/// Create an empty IndexMap
#[inline]
pub fn index_map_new<K, V>() -> IndexMap<K, V>
where
    K: core::hash::Hash + Eq,
{
    indexmap::IndexMap::with_hasher(Default::default())
}
