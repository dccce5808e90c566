//! Compiled regex cache keyed by pattern source

use crate::error::{Error, Result};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const PATTERN_CACHE_MAX: usize = 1024;

static GLOBAL_CACHE: OnceLock<PatternCache> = OnceLock::new();

/// Cache of compiled patterns.
///
/// Bounded: once `capacity` entries are held the cache is cleared and
/// refilled on demand. Equal sources always compile to equivalent regexes,
/// so eviction never changes matching behaviour.
#[derive(Debug)]
pub struct PatternCache {
    compiled: RwLock<HashMap<String, Regex>>,
    capacity: usize,
}

impl PatternCache {
    /// Create an empty cache holding at most `capacity` patterns
    pub fn new(capacity: usize) -> Self {
        Self {
            compiled: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Process-wide cache used by [`match_with_filter`](super::match_with_filter)
    pub fn global() -> &'static PatternCache {
        GLOBAL_CACHE.get_or_init(|| PatternCache::new(PATTERN_CACHE_MAX))
    }

    /// Compiled regex for `pattern`, compiling it on first use
    pub fn get(&self, pattern: &str) -> Result<Regex> {
        if let Some(re) = self.compiled.read().get(pattern) {
            return Ok(re.clone());
        }

        let compiled = Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e))?;

        let mut compiled_map = self.compiled.write();
        if compiled_map.len() >= self.capacity {
            compiled_map.clear();
        }
        compiled_map.insert(pattern.to_string(), compiled.clone());

        Ok(compiled)
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(PATTERN_CACHE_MAX)
    }
}
