//! Null and duplicate pre-filtering for batches.

use stillwater::Validation;
use tracing::trace;

use crate::config::{DuplicateConfig, SeenKeys};
use crate::outcome::Outcome;

use super::Runner;

type Trackers<'c, V> = Vec<Box<dyn SeenKeys<V> + 'c>>;

impl<F: Clone> Runner<F> {
    /// Classifies every position of a batch as null, duplicate, or still valid.
    ///
    /// Missing items get the null failure and take no part in key extraction.
    /// Each duplicate config keeps its own seen keys and records every present
    /// item, so configs are independent of one another. When several configs flag
    /// the same item, the first in declared order decides its failure.
    ///
    /// The result has one outcome per input position, in input order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failfast::{DuplicateConfig, Runner};
    ///
    /// let runner = Runner::new("null", |_| "thrown");
    /// let by_value = DuplicateConfig::new(|c: &char| *c, "duplicate");
    ///
    /// let items = [Some('a'), None, Some('b'), Some('a')];
    /// let outcomes = runner.filter_duplicates(&items, &[by_value]);
    ///
    /// let failures: Vec<_> = outcomes.into_iter().map(|o| o.into_result().err()).collect();
    /// assert_eq!(failures, vec![None, Some("null"), None, Some("duplicate")]);
    /// ```
    pub fn filter_duplicates<'a, V>(
        &self,
        items: &'a [Option<V>],
        configs: &[DuplicateConfig<V, F>],
    ) -> Vec<Outcome<&'a V, F>> {
        let mut trackers = trackers(configs);
        items
            .iter()
            .map(|item| self.classify(item.as_ref(), configs, &mut trackers))
            .collect()
    }

    /// Returns the first null or duplicate position, stopping the scan there.
    pub(crate) fn first_invalid<'a, V>(
        &self,
        items: &'a [Option<V>],
        configs: &[DuplicateConfig<V, F>],
    ) -> Option<(usize, Option<&'a V>, F)> {
        let mut trackers = trackers(configs);
        items.iter().enumerate().find_map(|(index, item)| {
            match self.classify(item.as_ref(), configs, &mut trackers) {
                Validation::Failure(failure) => Some((index, item.as_ref(), failure)),
                Validation::Success(_) => None,
            }
        })
    }

    fn classify<'a, V>(
        &self,
        item: Option<&'a V>,
        configs: &[DuplicateConfig<V, F>],
        trackers: &mut Trackers<'_, V>,
    ) -> Outcome<&'a V, F> {
        let Some(item) = item else {
            trace!("null item in batch");
            return Validation::Failure(self.null_failure.clone());
        };
        let mut verdict = None;
        for (index, (config, tracker)) in configs.iter().zip(trackers.iter_mut()).enumerate() {
            // Every config records the item, even once an earlier one flagged it.
            match self.shielded(|| tracker.observe(item)) {
                Ok(false) => {}
                Ok(true) if verdict.is_none() => {
                    trace!(config = index, "duplicate item in batch");
                    verdict = Some(config.failure().clone());
                }
                Ok(true) => {}
                Err(failure) => {
                    verdict.get_or_insert(failure);
                }
            }
        }
        match verdict {
            Some(failure) => Validation::Failure(failure),
            None => Validation::Success(item),
        }
    }
}

fn trackers<V, F>(configs: &[DuplicateConfig<V, F>]) -> Trackers<'_, V> {
    configs.iter().map(DuplicateConfig::tracker).collect()
}
