//! Batch configs: member rules plus duplicate detection.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::eval::EvalConfig;

/// Per-pass record of the keys a duplicate config has seen.
pub(crate) trait SeenKeys<V> {
    /// Records the item's key. Returns true if an equal key was seen earlier.
    fn observe(&mut self, item: &V) -> bool;
}

trait KeyExtractor<V>: Send + Sync {
    fn tracker(&self) -> Box<dyn SeenKeys<V> + '_>;
}

struct Keyed<X, K> {
    extract: X,
    _key: PhantomData<fn() -> K>,
}

impl<V, K, X> KeyExtractor<V> for Keyed<X, K>
where
    X: Fn(&V) -> Option<K> + Send + Sync,
    K: Eq + Hash + 'static,
{
    fn tracker(&self) -> Box<dyn SeenKeys<V> + '_> {
        Box::new(Tracker {
            extract: &self.extract,
            seen: HashSet::new(),
        })
    }
}

struct Tracker<'a, X, K> {
    extract: &'a X,
    seen: HashSet<K>,
}

impl<V, K, X> SeenKeys<V> for Tracker<'_, X, K>
where
    X: Fn(&V) -> Option<K>,
    K: Eq + Hash,
{
    fn observe(&mut self, item: &V) -> bool {
        match (self.extract)(item) {
            Some(key) => !self.seen.insert(key),
            None => false,
        }
    }
}

/// Flags batch items whose extracted key repeats an earlier item's key.
///
/// The first occurrence of a key is valid; every later occurrence fails with the
/// configured failure. Seen keys live only for one evaluation call.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, DuplicateConfig, Runner};
///
/// let by_value = DuplicateConfig::new(|n: &i32| *n, "duplicate");
/// let batch = Config::batch(Config::rules::<i32, &str>()).with_duplicates(by_value);
///
/// let runner = Runner::new("null", |_| "unexpected error");
/// let outcomes = runner.validate_each(&[Some(1), Some(2), Some(1)], &batch);
/// assert!(outcomes[0].is_success());
/// assert!(outcomes[2].is_failure());
/// ```
pub struct DuplicateConfig<V, F> {
    key: Box<dyn KeyExtractor<V>>,
    failure: F,
}

impl<V: 'static, F> DuplicateConfig<V, F> {
    /// Creates a config whose key extractor is total: every item has a key, and
    /// items with equal keys are duplicates.
    pub fn new<K, X>(key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self::optional(move |item: &V| Some(key(item)), failure)
    }

    /// Creates a config whose key extractor may yield no key.
    ///
    /// Items without a key are never duplicates of anything.
    pub fn optional<K, X>(key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&V) -> Option<K> + Send + Sync + 'static,
    {
        Self {
            key: Box::new(Keyed {
                extract: key,
                _key: PhantomData,
            }),
            failure,
        }
    }
}

impl<V, F> DuplicateConfig<V, F> {
    /// Returns the failure assigned to duplicates.
    pub fn failure(&self) -> &F {
        &self.failure
    }

    pub(crate) fn tracker(&self) -> Box<dyn SeenKeys<V> + '_> {
        self.key.tracker()
    }
}

impl<V, F: fmt::Debug> fmt::Debug for DuplicateConfig<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateConfig")
            .field("failure", &self.failure)
            .finish()
    }
}

/// Rules for a member type plus any number of duplicate configs.
///
/// Duplicate configs are consulted in the order they were added; the first one
/// that flags an item decides its failure.
pub struct BatchConfig<V, F> {
    rules: EvalConfig<V, F>,
    duplicates: Vec<DuplicateConfig<V, F>>,
}

impl<V: 'static, F> BatchConfig<V, F> {
    /// Creates a batch config with the given member rules and no duplicate detection.
    pub fn new(rules: EvalConfig<V, F>) -> Self {
        Self {
            rules,
            duplicates: Vec::new(),
        }
    }

    /// Adds a duplicate config.
    pub fn with_duplicates(mut self, duplicates: DuplicateConfig<V, F>) -> Self {
        self.duplicates.push(duplicates);
        self
    }

    /// Flags items whose key equals an earlier item's key.
    pub fn unique_by<K, X>(self, key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&V) -> K + Send + Sync + 'static,
    {
        self.with_duplicates(DuplicateConfig::new(key, failure))
    }

    /// Flags items whose key equals an earlier item's key, ignoring items without one.
    pub fn unique_by_optional<K, X>(self, key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&V) -> Option<K> + Send + Sync + 'static,
    {
        self.with_duplicates(DuplicateConfig::optional(key, failure))
    }
}

impl<V, F> BatchConfig<V, F> {
    /// Returns the member rules.
    pub fn rules(&self) -> &EvalConfig<V, F> {
        &self.rules
    }

    /// Returns the duplicate configs in declared order.
    pub fn duplicates(&self) -> &[DuplicateConfig<V, F>] {
        &self.duplicates
    }
}

impl<V, F: fmt::Debug> fmt::Debug for BatchConfig<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("rules", &self.rules)
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_key_tracks_repeats() {
        let config = DuplicateConfig::new(|s: &String| s.len(), "dup");
        let mut tracker = config.tracker();

        assert!(!tracker.observe(&"ab".to_string()));
        assert!(!tracker.observe(&"abc".to_string()));
        assert!(tracker.observe(&"xy".to_string()));
    }

    #[test]
    fn test_missing_keys_are_never_duplicates() {
        let config = DuplicateConfig::optional(|n: &Option<u8>| *n, "dup");
        let mut tracker = config.tracker();

        assert!(!tracker.observe(&None));
        assert!(!tracker.observe(&None));
        assert!(!tracker.observe(&Some(1)));
        assert!(tracker.observe(&Some(1)));
    }

    #[test]
    fn test_total_key_over_options_treats_none_as_key() {
        let config = DuplicateConfig::new(|n: &Option<u8>| *n, "dup");
        let mut tracker = config.tracker();

        assert!(!tracker.observe(&None));
        assert!(tracker.observe(&None));
    }

    #[test]
    fn test_each_tracker_starts_empty() {
        let config = DuplicateConfig::new(|n: &i32| *n, "dup");

        let mut first = config.tracker();
        assert!(!first.observe(&1));
        assert!(first.observe(&1));

        let mut second = config.tracker();
        assert!(!second.observe(&1));
    }

    #[test]
    fn test_batch_config_keeps_duplicate_order() {
        let batch = BatchConfig::new(EvalConfig::<(i32, i32), &str>::new())
            .unique_by(|p: &(i32, i32)| p.0, "dup first")
            .unique_by_optional(|p: &(i32, i32)| (p.1 != 0).then_some(p.1), "dup second");

        let failures: Vec<_> = batch.duplicates().iter().map(|d| *d.failure()).collect();
        assert_eq!(failures, vec!["dup first", "dup second"]);
        assert!(batch.rules().is_empty());
    }
}
