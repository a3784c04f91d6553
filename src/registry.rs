//! Type-keyed rule registration.
//!
//! This module provides [`RuleRegistry`], which maps a validatable type to the
//! rules that apply to it. Rules are registered explicitly at configuration time;
//! looking them up later needs only the type.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::{self, Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::EvalConfig;
use crate::outcome::Outcome;
use crate::runner::Runner;

/// A registered config together with the name of the type it validates.
struct Entry {
    type_name: &'static str,
    config: Arc<dyn Any + Send + Sync>,
}

/// Type alias for the config storage map.
type ConfigMap = Arc<RwLock<IndexMap<TypeId, Entry>>>;

/// A thread-safe registry of rule lists keyed by validatable type.
///
/// All configs in one registry share the failure type `F`.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, RuleRegistry, Runner};
///
/// struct Invoice { total: i64 }
///
/// let registry = RuleRegistry::<&str>::new();
/// registry
///     .register(
///         Config::rules::<Invoice, &str>()
///             .check(|i: &Invoice| (i.total < 0).then_some("negative total")),
///     )
///     .unwrap();
///
/// let runner = Runner::new("null", |_| "thrown");
/// let result = registry.validate(&runner, &Invoice { total: -1 }).unwrap();
/// assert_eq!(result, Some("negative total"));
/// ```
pub struct RuleRegistry<F> {
    configs: ConfigMap,
    _failure: PhantomData<fn() -> F>,
}

impl<F: 'static> RuleRegistry<F> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            configs: Arc::new(RwLock::new(IndexMap::new())),
            _failure: PhantomData,
        }
    }

    /// Registers the rules for type `V`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateType` if rules for `V` are already registered.
    pub fn register<V: 'static>(&self, config: EvalConfig<V, F>) -> Result<(), RegistryError> {
        let mut configs = self.configs.write();
        let type_id = TypeId::of::<V>();

        if configs.contains_key(&type_id) {
            return Err(RegistryError::DuplicateType(any::type_name::<V>()));
        }

        configs.insert(
            type_id,
            Entry {
                type_name: any::type_name::<V>(),
                config: Arc::new(config),
            },
        );
        Ok(())
    }

    /// Retrieves the rules for type `V`, or `None` if none are registered.
    pub fn get<V: 'static>(&self) -> Option<Arc<EvalConfig<V, F>>> {
        let configs = self.configs.read();
        let entry = configs.get(&TypeId::of::<V>())?;
        Arc::clone(&entry.config)
            .downcast::<EvalConfig<V, F>>()
            .ok()
    }

    /// Returns true if rules for type `V` are registered.
    pub fn contains<V: 'static>(&self) -> bool {
        self.configs.read().contains_key(&TypeId::of::<V>())
    }

    /// Returns the names of the registered types, in registration order.
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.configs
            .read()
            .values()
            .map(|entry| entry.type_name)
            .collect()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.configs.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.configs.read().is_empty()
    }
}

impl<F: Clone + 'static> RuleRegistry<F> {
    /// Validates an item against the rules registered for its type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotRegistered` if no rules exist for `V`.
    pub fn validate<V: 'static>(
        &self,
        runner: &Runner<F>,
        item: &V,
    ) -> Result<Option<F>, RegistryError> {
        let config = self.require::<V>()?;
        Ok(runner.validate(item, &config))
    }

    /// Validates every item of a batch against the rules registered for its type.
    ///
    /// No duplicate detection is applied; use a [`BatchConfig`](crate::BatchConfig)
    /// for that.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotRegistered` if no rules exist for `V`.
    pub fn validate_each<'a, V: 'static>(
        &self,
        runner: &Runner<F>,
        items: &'a [Option<V>],
    ) -> Result<Vec<Outcome<&'a V, F>>, RegistryError> {
        let config = self.require::<V>()?;
        Ok(runner.each_with(items, &[], |item| runner.validate(item, &config)))
    }

    fn require<V: 'static>(&self) -> Result<Arc<EvalConfig<V, F>>, RegistryError> {
        self.get::<V>()
            .ok_or_else(|| RegistryError::NotRegistered(any::type_name::<V>()))
    }
}

impl<F: 'static> Default for RuleRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for RuleRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            configs: Arc::clone(&self.configs),
            _failure: PhantomData,
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register rules for a type that already has them.
    #[error("rules for type '{0}' already registered")]
    DuplicateType(&'static str),

    /// Attempted to validate a type with no registered rules.
    #[error("no rules registered for type '{0}'")]
    NotRegistered(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    struct Bean {
        id: i32,
    }

    #[test]
    fn test_get_returns_registered_config() {
        let registry = RuleRegistry::<&str>::new();
        registry
            .register(
                Config::rules::<Bean, &str>().check(|b: &Bean| (b.id < 0).then_some("neg")),
            )
            .unwrap();

        let config = registry.get::<Bean>().unwrap();
        assert_eq!(config.len(), 1);
        assert!(registry.get::<String>().is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = RuleRegistry::<&str>::new();
        registry.register(Config::rules::<Bean, &str>()).unwrap();

        let result = registry.register(Config::rules::<Bean, &str>());
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateType(name)) if name.ends_with("Bean")
        ));
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = RuleRegistry::<&str>::new();
        registry.register(Config::rules::<u8, &str>()).unwrap();
        registry.register(Config::rules::<Bean, &str>()).unwrap();
        registry.register(Config::rules::<i64, &str>()).unwrap();

        let types = registry.registered_types();
        assert_eq!(types[0], "u8");
        assert!(types[1].ends_with("Bean"));
        assert_eq!(types[2], "i64");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = RuleRegistry::<&str>::default();
        let clone = registry.clone();
        registry.register(Config::rules::<Bean, &str>()).unwrap();

        assert!(clone.contains::<Bean>());
        assert!(!clone.is_empty());
    }
}
