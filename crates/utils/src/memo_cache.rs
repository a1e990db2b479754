use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Unbounded memoization map using `FxHasher`.
/// Values are computed once per key and never evicted, the map lives
/// as long as its owner.
pub struct MemoCache<K, V>
where
    K: Hash + Eq,
{
    inner: FxHashMap<K, V>,
    misses: usize,
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self {
            inner: FxHashMap::default(),
            misses: 0,
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains_key(&self, k: &K) -> bool {
        self.inner.contains_key(k)
    }

    #[inline]
    pub fn get(&self, k: &K) -> Option<&V> {
        self.inner.get(k)
    }

    /// Returns the value for `k`, calling `cb` only when it's not cached yet
    #[inline]
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, k: K, cb: F) -> &V {
        let misses = &mut self.misses;
        self.inner.entry(k).or_insert_with(|| {
            *misses += 1;
            cb()
        })
    }

    /// Number of times a value had to be computed
    #[inline]
    pub fn misses(&self) -> usize {
        self.misses
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }
}
