//! Process-wide strategy cache.
//!
//! Append-only by key: the first strategy written under a name stays for the
//! lifetime of the cache, so concurrent readers never observe a replacement.

use super::StrategyConfig;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, write-once-per-key map from strategy name to strategy.
#[derive(Debug, Default)]
pub struct StrategyCache {
    strategies: RwLock<HashMap<String, Arc<StrategyConfig>>>,
}

impl StrategyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached strategy by name.
    pub fn get(&self, name: &str) -> Option<Arc<StrategyConfig>> {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Cache `strategy` under `key` unless that key is already taken.
    ///
    /// `key` is the name callers look the strategy up by, which need not match
    /// the strategy's own `name` field. Returns the cached value, which is the
    /// earlier entry when one exists.
    pub fn insert_if_absent(&self, key: &str, strategy: Arc<StrategyConfig>) -> Arc<StrategyConfig> {
        let mut strategies = self
            .strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(strategies.entry(key.to_string()).or_insert(strategy))
    }

    /// Whether a strategy is cached under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all cached strategies, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Number of cached strategies
    pub fn len(&self) -> usize {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::CustomStrategyOptions;

    fn strategy(name: &str, description: &str) -> Arc<StrategyConfig> {
        Arc::new(
            StrategyConfig::custom(
                name,
                vec!["character".into()],
                vec!["relationship".into()],
                CustomStrategyOptions::default().description(description),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_first_write_wins() {
        let cache = StrategyCache::new();
        let first = cache.insert_if_absent("custom", strategy("custom", "first"));
        let second = cache.insert_if_absent("custom", strategy("custom", "second"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get("custom").unwrap().description, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keyed_by_lookup_name() {
        let cache = StrategyCache::new();
        cache.insert_if_absent("news", strategy("press", "from news.yaml"));

        assert_eq!(cache.get("news").unwrap().name, "press");
        assert!(cache.get("press").is_none());
    }

    #[test]
    fn test_concurrent_readers_share_entries() {
        let cache = Arc::new(StrategyCache::new());
        cache.insert_if_absent("shared", strategy("shared", "value"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("shared").map(|s| s.description.clone()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("value"));
        }
        assert_eq!(cache.names(), vec!["shared".to_string()]);
    }
}
