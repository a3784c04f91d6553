//! Fail-fast evaluation.
//!
//! A [`Runner`] carries the two caller decisions every evaluation needs: which
//! failure a missing (null) item gets, and how a thrown rule error becomes a
//! failure. With those fixed, it evaluates configs against single items, flat
//! batches, containers, and batches of containers.
//!
//! | Input | Each item | First failure only |
//! |-------|-----------|--------------------|
//! | one item | [`Runner::validate`] | |
//! | batch | [`Runner::validate_each`] | [`Runner::validate_any`] |
//! | container | [`Runner::validate_container`] | |
//! | batch of batches | [`Runner::validate_each_nested`] | [`Runner::validate_any_nested`] |
//!
//! Evaluation is synchronous and keeps no state between calls.
//!
//! Rules, skip predicates, duplicate key extractors, batch-size accessors and
//! member accessors all run inside the exception boundary: a panic in any of
//! them becomes the mapped failure of the item being evaluated. Pair mappers
//! passed to the `*_with_pair` methods only describe an already-found failure
//! and run outside it.

mod any;
mod boundary;
mod container;
mod duplicates;
mod each;
mod nested;
mod single;

use std::fmt;
use std::sync::Arc;

use crate::error::Thrown;

/// Converts what a rule threw into a failure.
pub type ThrowableMapper<F> = Arc<dyn Fn(&Thrown) -> F + Send + Sync>;

/// Evaluates validation configs in fail-fast mode.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, Runner};
///
/// let rules = Config::rules::<i32, String>()
///     .check(|n: &i32| (*n < 0).then(|| "negative".to_string()))
///     .check(|n: &i32| if *n == 13 { panic!("unlucky") } else { None });
///
/// let runner = Runner::new("missing".to_string(), |thrown| thrown.to_string());
///
/// assert_eq!(runner.validate(&-1, &rules), Some("negative".to_string()));
/// assert_eq!(runner.validate(&13, &rules), Some("rule panicked: unlucky".to_string()));
/// assert_eq!(runner.validate(&7, &rules), None);
/// ```
pub struct Runner<F> {
    null_failure: F,
    throwable_mapper: ThrowableMapper<F>,
}

impl<F> Runner<F> {
    /// Creates a runner.
    ///
    /// `null_failure` is assigned to every missing batch position. The throwable
    /// mapper is called once for each rule invocation that panics or returns an
    /// error.
    pub fn new<T>(null_failure: F, throwable_mapper: T) -> Self
    where
        T: Fn(&Thrown) -> F + Send + Sync + 'static,
    {
        Self {
            null_failure,
            throwable_mapper: Arc::new(throwable_mapper),
        }
    }

    /// Returns the failure assigned to missing items.
    pub fn null_failure(&self) -> &F {
        &self.null_failure
    }

    /// Runs a caller-supplied hook, mapping a panic to a failure.
    fn shielded<T>(&self, hook: impl FnOnce() -> T) -> Result<T, F> {
        boundary::shield(hook).map_err(|thrown| boundary::map(&thrown, &self.throwable_mapper))
    }
}

impl<F: Clone> Clone for Runner<F> {
    fn clone(&self) -> Self {
        Self {
            null_failure: self.null_failure.clone(),
            throwable_mapper: Arc::clone(&self.throwable_mapper),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for Runner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("null_failure", &self.null_failure)
            .finish_non_exhaustive()
    }
}
