//! "Validate each": one outcome per batch position.

use stillwater::Validation;
use tracing::debug;

use crate::config::{BatchConfig, DuplicateConfig};
use crate::outcome::Outcome;

use super::Runner;

impl<F: Clone> Runner<F> {
    /// Validates every item of a batch.
    ///
    /// Null and duplicate positions are decided first; every position still valid
    /// is then run through the member rules. A failure assigned by the duplicate
    /// filter is never replaced by a rule failure, and duplicates are not passed to
    /// the rules at all.
    ///
    /// The result has exactly one outcome per input position, in input order. Valid
    /// outcomes borrow the original item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failfast::{Config, Runner};
    ///
    /// let batch = Config::batch(
    ///     Config::rules::<i32, &str>().check(|n: &i32| (*n < 0).then_some("negative")),
    /// );
    /// let runner = Runner::new("null", |_| "thrown");
    ///
    /// let outcomes = runner.validate_each(&[Some(1), None, Some(-2)], &batch);
    /// let results: Vec<_> = outcomes.into_iter().map(|o| o.into_result()).collect();
    /// assert_eq!(results, vec![Ok(&1), Err("null"), Err("negative")]);
    /// ```
    pub fn validate_each<'a, V>(
        &self,
        items: &'a [Option<V>],
        config: &BatchConfig<V, F>,
    ) -> Vec<Outcome<&'a V, F>> {
        self.each_with(items, config.duplicates(), |item| {
            self.validate(item, config.rules())
        })
    }

    /// Shared "each" pass: duplicate filtering, then `check` on every surviving item.
    pub(crate) fn each_with<'a, V, C>(
        &self,
        items: &'a [Option<V>],
        duplicates: &[DuplicateConfig<V, F>],
        check: C,
    ) -> Vec<Outcome<&'a V, F>>
    where
        C: Fn(&V) -> Option<F>,
    {
        let outcomes: Vec<_> = self
            .filter_duplicates(items, duplicates)
            .into_iter()
            .map(|outcome| match outcome {
                Validation::Success(item) => match check(item) {
                    Some(failure) => Validation::Failure(failure),
                    None => Validation::Success(item),
                },
                failed => failed,
            })
            .collect();
        debug!(
            items = outcomes.len(),
            invalid = outcomes.iter().filter(|o| o.is_failure()).count(),
            "validated batch"
        );
        outcomes
    }
}
