//! The exception boundary around every rule invocation.
//!
//! Rules are guarded with [`guard`]. The other caller-supplied hooks an
//! evaluation reads through (skip predicates, duplicate key extractors, batch
//! size and member accessors) are run through [`shield`] so a panic in them is
//! mapped the same way.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::error::Thrown;
use crate::rule::Rule;

use super::ThrowableMapper;

/// Runs one rule, turning a panic or returned error into a mapped failure.
///
/// Nothing a rule throws escapes this function.
pub(super) fn guard<V, F>(
    rule: &dyn Rule<V, F>,
    item: &V,
    mapper: &ThrowableMapper<F>,
) -> Option<F> {
    match shield(|| rule.check(item)) {
        Ok(Ok(result)) => result,
        Ok(Err(thrown)) | Err(thrown) => Some(map(&thrown, mapper)),
    }
}

/// Runs a caller-supplied hook, capturing a panic as [`Thrown::Panic`].
pub(super) fn shield<T>(hook: impl FnOnce() -> T) -> Result<T, Thrown> {
    // Hooks are pure, so no state they touched can be observed half-updated.
    panic::catch_unwind(AssertUnwindSafe(hook)).map_err(Thrown::from_panic)
}

/// Converts a captured throw into a failure.
pub(super) fn map<F>(thrown: &Thrown, mapper: &ThrowableMapper<F>) -> F {
    debug!(error = %thrown, "rule threw, mapping to failure");
    mapper(thrown)
}
