//! Validation configs.
//!
//! Configs are built once with chained builder methods and are immutable and
//! reusable afterwards. They are `Send + Sync`, so one config can serve many
//! threads.
//!
//! - [`EvalConfig`]: ordered rules for one type, with an optional skip predicate
//! - [`BatchConfig`]: member rules plus [`DuplicateConfig`]s
//! - [`ContainerConfig`]: batch-size bounds plus rules on the container itself
//! - [`NestedConfig`]: containers holding a [`MemberBatch`] of members
//!
//! # Example
//!
//! ```rust
//! use failfast::Config;
//!
//! let rules = Config::rules::<i32, &str>()
//!     .check(|n: &i32| (*n < 0).then_some("negative"));
//! let batch = Config::batch(rules).unique_by(|n: &i32| *n, "duplicate");
//! assert_eq!(batch.duplicates().len(), 1);
//! ```

mod batch;
mod container;
mod eval;
mod nested;

pub(crate) use batch::SeenKeys;
pub use batch::{BatchConfig, DuplicateConfig};
pub use container::ContainerConfig;
pub use eval::EvalConfig;
pub use nested::{MemberBatch, NestedConfig};

/// Entry point for building validation configs.
///
/// `Config` only groups factory functions; each returns a builder for one
/// config type.
pub struct Config;

impl Config {
    /// Creates an empty rule list for validatables of type `V`.
    pub fn rules<V: 'static, F: 'static>() -> EvalConfig<V, F> {
        EvalConfig::new()
    }

    /// Creates a batch config from member rules.
    pub fn batch<V: 'static, F>(rules: EvalConfig<V, F>) -> BatchConfig<V, F> {
        BatchConfig::new(rules)
    }

    /// Creates a container config measuring the batch returned by `batch_size`.
    pub fn container<C, F, A>(batch_size: A) -> ContainerConfig<C, F>
    where
        C: 'static,
        F: 'static,
        A: Fn(&C) -> usize + Send + Sync + 'static,
    {
        ContainerConfig::new(batch_size)
    }

    /// Pairs a member accessor with the member batch config.
    pub fn members<C, M, F, A>(accessor: A, config: BatchConfig<M, F>) -> MemberBatch<C, M, F>
    where
        A: Fn(&C) -> &[Option<M>] + Send + Sync + 'static,
    {
        MemberBatch::new(accessor, config)
    }

    /// Creates a batch-of-batch config.
    pub fn nested<C: 'static, M, F>(
        container: ContainerConfig<C, F>,
        members: MemberBatch<C, M, F>,
    ) -> NestedConfig<C, M, F> {
        NestedConfig::new(container, members)
    }
}
