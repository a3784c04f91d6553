//! Batch-of-batch configs: containers that each hold a batch of members.

use std::fmt;
use std::hash::Hash;

use super::batch::{BatchConfig, DuplicateConfig};
use super::container::ContainerConfig;

type MemberAccessor<C, M> = Box<dyn Fn(&C) -> &[Option<M>] + Send + Sync>;

/// How to reach a container's members and how to validate them.
pub struct MemberBatch<C, M, F> {
    accessor: MemberAccessor<C, M>,
    config: BatchConfig<M, F>,
}

impl<C, M, F> MemberBatch<C, M, F> {
    /// Pairs a member accessor with the batch config for the members.
    pub fn new<A>(accessor: A, config: BatchConfig<M, F>) -> Self
    where
        A: Fn(&C) -> &[Option<M>] + Send + Sync + 'static,
    {
        Self {
            accessor: Box::new(accessor),
            config,
        }
    }

    /// Returns the members of a container.
    pub fn of<'a>(&self, container: &'a C) -> &'a [Option<M>] {
        (self.accessor)(container)
    }

    /// Returns the batch config applied to members.
    pub fn config(&self) -> &BatchConfig<M, F> {
        &self.config
    }
}

/// Validation for a batch of containers, each holding a batch of members.
///
/// Containers are validated first (null check, duplicate detection, size bounds,
/// container rules). Only containers that pass have their members validated.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, Runner};
///
/// struct Team {
///     name: String,
///     players: Vec<Option<String>>,
/// }
///
/// let players = Config::batch(
///     Config::rules::<String, &str>().check(|p: &String| p.is_empty().then_some("blank player")),
/// );
/// let config = Config::nested(
///     Config::container(|t: &Team| t.players.len()).max_batch_size(11, "too many players"),
///     Config::members(|t: &Team| t.players.as_slice(), players),
/// )
/// .unique_by(|t: &Team| t.name.clone(), "duplicate team");
///
/// let runner = Runner::new("missing", |_| "unexpected error");
/// let teams = vec![Some(Team {
///     name: "a".into(),
///     players: vec![Some("x".into()), Some(String::new())],
/// })];
/// assert_eq!(runner.validate_any_nested(&teams, &config), Some("blank player"));
/// ```
pub struct NestedConfig<C, M, F> {
    container: ContainerConfig<C, F>,
    duplicates: Vec<DuplicateConfig<C, F>>,
    members: MemberBatch<C, M, F>,
}

impl<C: 'static, M, F> NestedConfig<C, M, F> {
    /// Creates a nested config from a container config and a member batch.
    pub fn new(container: ContainerConfig<C, F>, members: MemberBatch<C, M, F>) -> Self {
        Self {
            container,
            duplicates: Vec::new(),
            members,
        }
    }

    /// Adds a duplicate config applied across containers.
    pub fn with_duplicates(mut self, duplicates: DuplicateConfig<C, F>) -> Self {
        self.duplicates.push(duplicates);
        self
    }

    /// Flags containers whose key equals an earlier container's key.
    pub fn unique_by<K, X>(self, key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&C) -> K + Send + Sync + 'static,
    {
        self.with_duplicates(DuplicateConfig::new(key, failure))
    }

    /// Flags containers whose key equals an earlier container's key, ignoring
    /// containers without one.
    pub fn unique_by_optional<K, X>(self, key: X, failure: F) -> Self
    where
        K: Eq + Hash + 'static,
        X: Fn(&C) -> Option<K> + Send + Sync + 'static,
    {
        self.with_duplicates(DuplicateConfig::optional(key, failure))
    }
}

impl<C, M, F> NestedConfig<C, M, F> {
    /// Returns the container config.
    pub fn container(&self) -> &ContainerConfig<C, F> {
        &self.container
    }

    /// Returns the duplicate configs applied across containers.
    pub fn duplicates(&self) -> &[DuplicateConfig<C, F>] {
        &self.duplicates
    }

    /// Returns the member accessor and member batch config.
    pub fn members(&self) -> &MemberBatch<C, M, F> {
        &self.members
    }
}

impl<C, M, F: fmt::Debug> fmt::Debug for NestedConfig<C, M, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedConfig")
            .field("container", &self.container)
            .field("duplicates", &self.duplicates)
            .field("members", &self.members.config)
            .finish()
    }
}
