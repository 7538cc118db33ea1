//! Bounded caches around the parser and the layout builder.
//!
//! Both caches evict the least-recently-used entry once full. They are keyed by the raw source text
//! (and the font size, for layouts), so editing a formula naturally yields a new entry; nothing is ever
//! invalidated implicitly. Entries live as long as the cache holds them, or as long as a caller keeps the
//! returned [`Arc`].

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::layout::LayoutNode;
use crate::parser::symbols::SymbolRegistry;
use crate::parser::{Parser, Parsed};
use crate::parser::lexer::tokenize;

/// Default capacity of a [`ParseCache`]
pub const DEFAULT_PARSE_CAPACITY  : usize = 500;
/// Default capacity of a [`LayoutCache`]
pub const DEFAULT_LAYOUT_CAPACITY : usize = 1000;


/// Cache statistics for monitoring performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found an entry
    pub hits      : u64,
    /// Number of lookups that found nothing
    pub misses    : u64,
    /// Number of entries dropped because the cache was full
    pub evictions : u64,
}

impl CacheStats {
    /// Get the hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}


/// A map bounded to `capacity` entries, evicting the least-recently-accessed entry on overflow.
///
/// A capacity of zero disables caching: inserted entries are handed back right away.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    entries  : HashMap<K, V>,
    /// LRU order (front = most recently used)
    order    : VecDeque<K>,
    capacity : usize,
    stats    : CacheStats,
}

impl<K : Eq + Hash + Clone, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries
    pub fn new(capacity : usize) -> Self {
        Self {
            entries  : HashMap::with_capacity(capacity),
            order    : VecDeque::with_capacity(capacity),
            capacity,
            stats    : CacheStats::default(),
        }
    }

    /// Looks up `key`, making it the most recently used entry
    pub fn get(&mut self, key : &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.stats.hits += 1;
            self.touch(key);
            self.entries.get(key)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Whether `key` is cached
    pub fn contains_key(&self, key : &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts an entry as the most recently used one, replacing any previous value for `key`.
    /// Returns the entry evicted to make room, if any.
    pub fn insert(&mut self, key : K, value : V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return Some((key, value));
        }

        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return None;
        }
        self.order.push_front(key);

        if self.entries.len() > self.capacity {
            let oldest = self.order.pop_back()?;
            let value = self.entries.remove(&oldest)?;
            self.stats.evictions += 1;
            return Some((oldest, value));
        }
        None
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximal number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hits, misses and evictions so far
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn touch(&mut self, key : &K) {
        // Remove from current position
        self.order.retain(|k| k != key);
        // Add to front
        self.order.push_front(key.clone());
    }
}


fn lock<T>(mutex : &Mutex<T>) -> MutexGuard<'_, T> {
    // the caches hold no invariant a panicking thread could break halfway
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}


/// Memoizes [`Parsed`] trees by source text. Safe to share between threads.
#[derive(Debug)]
pub struct ParseCache {
    inner : Mutex<LruCache<String, Arc<Parsed>>>,
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_PARSE_CAPACITY)
    }
}

impl ParseCache {
    /// Creates an empty cache holding at most `capacity` trees
    pub fn new(capacity : usize) -> Self {
        Self { inner : Mutex::new(LruCache::new(capacity)) }
    }

    /// Returns the cached tree for `source`, if any
    pub fn get(&self, source : &str) -> Option<Arc<Parsed>> {
        let found = lock(&self.inner).get(&source.to_string()).cloned();
        trace!("parse cache {} for {:?}", if found.is_some() { "hit" } else { "miss" }, source);
        found
    }

    /// Caches the tree for `source`
    pub fn insert(&self, source : &str, parsed : Arc<Parsed>) {
        if let Some((evicted, _)) = lock(&self.inner).insert(source.to_string(), parsed) {
            debug!("parse cache evicted {:?}", evicted);
        }
    }

    /// Returns the cached tree for `source`, parsing it with `symbols` on a miss.
    /// The lock is not held while parsing.
    pub fn get_or_parse(&self, source : &str, symbols : &SymbolRegistry) -> Arc<Parsed> {
        if let Some(parsed) = self.get(source) {
            return parsed;
        }
        let tokens = tokenize(source);
        let parsed = Arc::new(Parser::new(&tokens).with_symbols(symbols).parse());
        self.insert(source, Arc::clone(&parsed));
        parsed
    }

    /// Drops every entry
    pub fn clear(&self) {
        lock(&self.inner).clear()
    }

    /// Number of cached trees
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// Whether no tree is cached
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    /// Hits, misses and evictions so far
    pub fn stats(&self) -> CacheStats {
        lock(&self.inner).stats()
    }
}


/// Key of a [`LayoutCache`] entry. The font size is compared through its bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    source         : String,
    font_size_bits : u64,
}

impl LayoutKey {
    /// Creates a key
    pub fn new(source : &str, font_size : f64) -> Self {
        Self {
            source         : source.to_string(),
            font_size_bits : font_size.to_bits(),
        }
    }

    /// The source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The font size
    pub fn font_size(&self) -> f64 {
        f64::from_bits(self.font_size_bits)
    }
}

/// Memoizes box trees by source text and font size. Safe to share between threads.
#[derive(Debug)]
pub struct LayoutCache {
    inner : Mutex<LruCache<LayoutKey, Arc<LayoutNode>>>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_CAPACITY)
    }
}

impl LayoutCache {
    /// Creates an empty cache holding at most `capacity` trees
    pub fn new(capacity : usize) -> Self {
        Self { inner : Mutex::new(LruCache::new(capacity)) }
    }

    /// Returns the cached tree for `source` at `font_size`, if any
    pub fn get(&self, source : &str, font_size : f64) -> Option<Arc<LayoutNode>> {
        let found = lock(&self.inner).get(&LayoutKey::new(source, font_size)).cloned();
        trace!("layout cache {} for {:?} at {}", if found.is_some() { "hit" } else { "miss" }, source, font_size);
        found
    }

    /// Caches the tree for `source` at `font_size`
    pub fn insert(&self, source : &str, font_size : f64, node : Arc<LayoutNode>) {
        if let Some((evicted, _)) = lock(&self.inner).insert(LayoutKey::new(source, font_size), node) {
            debug!("layout cache evicted {:?} at {}", evicted.source(), evicted.font_size());
        }
    }

    /// Drops every entry
    pub fn clear(&self) {
        lock(&self.inner).clear()
    }

    /// Number of cached trees
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// Whether no tree is cached
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    /// Hits, misses and evictions so far
    pub fn stats(&self) -> CacheStats {
        lock(&self.inner).stats()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.insert("a", 1), None);
        assert_eq!(cache.insert("b", 2), None);
        assert_eq!(cache.insert("c", 3), None);

        // "a" becomes the most recently used one, leaving "b" as the oldest
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.insert("d", 4), Some(("b", 2)));

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains_key(&"b"));
        assert!(["a", "c", "d"].iter().all(|key| cache.contains_key(key)));
        assert_eq!(cache.stats(), CacheStats { hits : 1, misses : 0, evictions : 1 });
    }

    #[test]
    fn replacing_refreshes_without_evicting() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert("a", 10), None);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.insert("c", 3), Some(("b", 2)));
    }

    #[test]
    fn zero_capacity_caches_nothing() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.insert(1, "one"), Some((1, "one")));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn clear_keeps_capacity_and_stats() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.insert(i, i * i);
        }
        assert_eq!(cache.get(&2), Some(&4));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn hit_ratio() {
        assert_eq!(CacheStats::default().hit_ratio(), 0.0);
        let stats = CacheStats { hits : 3, misses : 1, evictions : 0 };
        assert!((stats.hit_ratio() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn parse_cache_shares_trees() {
        let cache = ParseCache::new(2);
        let first  = cache.get_or_parse(r"\frac{a}{b}", SymbolRegistry::builtin());
        let second = cache.get_or_parse(r"\frac{a}{b}", SymbolRegistry::builtin());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits : 1, misses : 1, evictions : 0 });

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(r"\frac{a}{b}").is_none());
    }

    #[test]
    fn layout_keys_distinguish_font_sizes() {
        assert_ne!(LayoutKey::new("x", 12.), LayoutKey::new("x", 12.5));
        assert_eq!(LayoutKey::new("x", 12.).font_size(), 12.);
        assert_eq!(LayoutKey::new("x", 12.).source(), "x");
    }
}
