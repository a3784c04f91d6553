//! "Validate any": stop at the first failing batch position.

use tracing::debug;

use crate::config::{BatchConfig, DuplicateConfig};
use crate::outcome::AnyFailure;

use super::Runner;

impl<F: Clone> Runner<F> {
    /// Returns the first failure in a batch, or `None` if every item is valid.
    ///
    /// See [`validate_any_with_pair`](Runner::validate_any_with_pair) for the scan order.
    pub fn validate_any<V>(&self, items: &[Option<V>], config: &BatchConfig<V, F>) -> Option<F> {
        self.validate_any_with_pair(items, config, |_| None::<()>)
            .map(|found| found.failure)
    }

    /// Returns the first failure in a batch with caller-supplied context for the
    /// failing item.
    ///
    /// The batch is first scanned for a null or duplicate position; if one exists it
    /// is reported even when an earlier item would fail a rule. Otherwise items are
    /// run through the rules in order and the scan stops at the first failure, so
    /// later items are never evaluated. `pair` receives the failing item (`None` for
    /// a null position) and is only called for the reported item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failfast::{Config, Runner};
    ///
    /// struct Payment { id: u32, amount: i64 }
    ///
    /// let batch = Config::batch(
    ///     Config::rules::<Payment, &str>()
    ///         .check(|p: &Payment| (p.amount <= 0).then_some("no amount")),
    /// );
    /// let runner = Runner::new("null", |_| "thrown");
    /// let payments = [Some(Payment { id: 1, amount: 5 }), Some(Payment { id: 2, amount: 0 })];
    ///
    /// let found = runner
    ///     .validate_any_with_pair(&payments, &batch, |p: Option<&Payment>| p.map(|p| p.id))
    ///     .unwrap();
    /// assert_eq!((found.index, found.pair, found.failure), (1, Some(2), "no amount"));
    /// ```
    pub fn validate_any_with_pair<V, P, M>(
        &self,
        items: &[Option<V>],
        config: &BatchConfig<V, F>,
        pair: M,
    ) -> Option<AnyFailure<P, F>>
    where
        M: Fn(Option<&V>) -> Option<P>,
    {
        self.any_with(
            items,
            config.duplicates(),
            |item| self.validate(item, config.rules()),
            pair,
        )
    }

    /// Shared "any" scan: first null or duplicate, else first item failing `check`.
    pub(crate) fn any_with<V, P, C, M>(
        &self,
        items: &[Option<V>],
        duplicates: &[DuplicateConfig<V, F>],
        check: C,
        pair: M,
    ) -> Option<AnyFailure<P, F>>
    where
        C: Fn(&V) -> Option<F>,
        M: Fn(Option<&V>) -> Option<P>,
    {
        if let Some((index, item, failure)) = self.first_invalid(items, duplicates) {
            debug!(index, "batch has a null or duplicate item");
            return Some(AnyFailure::new(index, pair(item), failure));
        }
        let found = items.iter().enumerate().find_map(|(index, item)| {
            let item = item.as_ref()?;
            check(item).map(|failure| AnyFailure::new(index, pair(Some(item)), failure))
        });
        if let Some(found) = &found {
            debug!(index = found.index, "batch item failed");
        }
        found
    }
}
