//! Single-item evaluation.

use tracing::trace;

use crate::config::EvalConfig;

use super::{boundary, Runner};

impl<F: Clone> Runner<F> {
    /// Validates one item, returning the first failure or `None` if it is valid.
    ///
    /// Rules run in declared order; no rule after the first failing one is invoked.
    /// A rule that panics or errors yields the mapped failure and stops evaluation
    /// the same way. If the config's skip predicate matches, no rule runs; a skip
    /// predicate that panics yields the mapped failure.
    pub fn validate<V>(&self, item: &V, config: &EvalConfig<V, F>) -> Option<F> {
        match self.shielded(|| config.should_skip(item)) {
            Ok(false) => {}
            Ok(true) => {
                trace!("skip predicate matched, bypassing rules");
                return None;
            }
            Err(failure) => return Some(failure),
        }
        config.rules().iter().enumerate().find_map(|(index, rule)| {
            let failure = boundary::guard(rule.as_ref(), item, &self.throwable_mapper);
            if failure.is_some() {
                trace!(rule = index, "rule failed");
            }
            failure
        })
    }

    /// Validates an item that may be missing. A missing item gets the null failure.
    pub fn validate_optional<V>(
        &self,
        item: Option<&V>,
        config: &EvalConfig<V, F>,
    ) -> Option<F> {
        match item {
            Some(item) => self.validate(item, config),
            None => Some(self.null_failure.clone()),
        }
    }
}
