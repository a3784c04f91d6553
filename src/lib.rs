//! # Failfast
//!
//! A validation engine that stops at the first failure per item and reports
//! exactly one failure for each invalid item.
//!
//! ## Overview
//!
//! Rules are registered explicitly in [`Config`] builders and evaluated in
//! declared order. For each validatable, evaluation short-circuits on the first
//! failing rule; later rules are never invoked. Batches produce one outcome per
//! position, and container batches ("batch of batch") are decided before their
//! members are read.
//!
//! Rule panics and errors never escape: they are caught at an exception
//! boundary and converted to ordinary failures by the runner's throwable
//! mapper.
//!
//! ## Core Types
//!
//! - [`Config`]: Entry point for building configs
//! - [`EvalConfig`]: Ordered rules for one type
//! - [`BatchConfig`]: Member rules plus duplicate detection
//! - [`ContainerConfig`] / [`NestedConfig`]: Batch-of-batch validation
//! - [`Runner`]: Holds the null failure and throwable mapper, and runs configs
//! - [`Outcome`]: Per-item result (stillwater's `Validation`)
//!
//! ## Example
//!
//! ```rust
//! use failfast::{Config, Runner};
//!
//! struct Order {
//!     id: u32,
//!     quantity: i64,
//! }
//!
//! let batch = Config::batch(
//!     Config::rules::<Order, &str>()
//!         .check(|o: &Order| (o.quantity < 1).then_some("quantity must be positive")),
//! )
//! .unique_by(|o: &Order| o.id, "duplicate order");
//!
//! let runner = Runner::new("missing order", |_| "unexpected error");
//! let orders = [
//!     Some(Order { id: 1, quantity: 2 }),
//!     Some(Order { id: 1, quantity: 5 }),
//!     None,
//!     Some(Order { id: 2, quantity: 0 }),
//! ];
//!
//! let failures: Vec<_> = runner
//!     .validate_each(&orders, &batch)
//!     .into_iter()
//!     .map(|outcome| outcome.into_result().err())
//!     .collect();
//! assert_eq!(
//!     failures,
//!     vec![
//!         None,
//!         Some("duplicate order"),
//!         Some("missing order"),
//!         Some("quantity must be positive"),
//!     ]
//! );
//!
//! // "Any" mode returns a single failure. Null and duplicate positions are
//! // found before any rule runs.
//! assert_eq!(runner.validate_any(&orders, &batch), Some("duplicate order"));
//! ```

pub mod config;
pub mod error;
pub mod outcome;
pub mod registry;
pub mod rule;
pub mod runner;

pub use config::{
    BatchConfig, Config, ContainerConfig, DuplicateConfig, EvalConfig, MemberBatch, NestedConfig,
};
pub use error::{ConfigError, Thrown};
pub use outcome::{AnyFailure, NestedAnyFailure, NestedFailure, Outcome};
pub use registry::{RegistryError, RuleRegistry};
pub use rule::{Rule, SimpleCheck};
pub use runner::{Runner, ThrowableMapper};
