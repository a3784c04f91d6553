//! Container configs: batch-size bounds plus rules on the container itself.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::ConfigError;

use super::eval::EvalConfig;

type BatchSize<C> = Box<dyn Fn(&C) -> usize + Send + Sync>;

/// An inclusive limit on a batch's member count and the failure for violating it.
#[derive(Debug, Clone, PartialEq)]
struct SizeBound<F> {
    limit: usize,
    failure: F,
}

/// Validation for an object that holds one or more batches of members.
///
/// Size bounds are checked first, against every configured batch in declared
/// order (minimum before maximum). A violation fails the container immediately
/// without running the container rules.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, Runner};
///
/// struct Order {
///     lines: Vec<u32>,
/// }
///
/// let config = Config::container(|o: &Order| o.lines.len())
///     .batch_size_range(1..=2, "too few lines", "too many lines")
///     .unwrap();
///
/// let runner = Runner::new("null order", |_| "unexpected error");
/// let order = Order { lines: vec![1, 2, 3] };
/// assert_eq!(runner.validate_container(&order, &config), Some("too many lines"));
/// ```
pub struct ContainerConfig<C, F> {
    batch_sizes: Vec<BatchSize<C>>,
    min: Option<SizeBound<F>>,
    max: Option<SizeBound<F>>,
    rules: EvalConfig<C, F>,
}

impl<C: 'static, F: 'static> ContainerConfig<C, F> {
    /// Creates a container config measuring one batch.
    pub fn new<A>(batch_size: A) -> Self
    where
        A: Fn(&C) -> usize + Send + Sync + 'static,
    {
        Self {
            batch_sizes: vec![Box::new(batch_size)],
            min: None,
            max: None,
            rules: EvalConfig::new(),
        }
    }

    /// Adds another batch to which the size bounds also apply.
    pub fn and_batch<A>(mut self, batch_size: A) -> Self
    where
        A: Fn(&C) -> usize + Send + Sync + 'static,
    {
        self.batch_sizes.push(Box::new(batch_size));
        self
    }

    /// Requires every batch to hold at least `min` members.
    pub fn min_batch_size(mut self, min: usize, failure: F) -> Self {
        self.min = Some(SizeBound {
            limit: min,
            failure,
        });
        self
    }

    /// Requires every batch to hold at most `max` members.
    pub fn max_batch_size(mut self, max: usize, failure: F) -> Self {
        self.max = Some(SizeBound {
            limit: max,
            failure,
        });
        self
    }

    /// Sets both bounds at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedRange`] if the range's start exceeds its end.
    pub fn batch_size_range(
        self,
        range: RangeInclusive<usize>,
        too_few: F,
        too_many: F,
    ) -> Result<Self, ConfigError> {
        let (min, max) = range.into_inner();
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(self
            .min_batch_size(min, too_few)
            .max_batch_size(max, too_many))
    }

    /// Replaces the rules applied to the container itself.
    pub fn with_rules(mut self, rules: EvalConfig<C, F>) -> Self {
        self.rules = rules;
        self
    }

    /// Appends a container rule from a closure returning an optional failure.
    pub fn check<R>(mut self, check: R) -> Self
    where
        R: Fn(&C) -> Option<F> + Send + Sync + 'static,
    {
        self.rules = self.rules.check(check);
        self
    }
}

impl<C, F> ContainerConfig<C, F> {
    /// Returns the rules applied to the container itself.
    pub fn rules(&self) -> &EvalConfig<C, F> {
        &self.rules
    }

    /// Returns the failure of the first bound the container violates, if any.
    pub(crate) fn size_violation(&self, container: &C) -> Option<&F> {
        self.batch_sizes.iter().find_map(|batch_size| {
            let size = batch_size(container);
            match (&self.min, &self.max) {
                (Some(min), _) if size < min.limit => Some(&min.failure),
                (_, Some(max)) if size > max.limit => Some(&max.failure),
                _ => None,
            }
        })
    }
}

impl<C, F: fmt::Debug> fmt::Debug for ContainerConfig<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("batches", &self.batch_sizes.len())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("rules", &self.rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Header {
        first: Vec<u8>,
        second: Vec<u8>,
    }

    fn header(first: usize, second: usize) -> Header {
        Header {
            first: vec![0; first],
            second: vec![0; second],
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = ContainerConfig::new(|h: &Header| h.first.len())
            .min_batch_size(1, "min")
            .max_batch_size(2, "max");

        assert_eq!(config.size_violation(&header(0, 0)), Some(&"min"));
        assert_eq!(config.size_violation(&header(1, 0)), None);
        assert_eq!(config.size_violation(&header(2, 0)), None);
        assert_eq!(config.size_violation(&header(3, 0)), Some(&"max"));
    }

    #[test]
    fn test_no_bounds_never_violated() {
        let config = ContainerConfig::<Header, &str>::new(|h: &Header| h.first.len());
        assert_eq!(config.size_violation(&header(1000, 0)), None);
    }

    #[test]
    fn test_every_batch_is_measured_in_order() {
        let config = ContainerConfig::new(|h: &Header| h.first.len())
            .and_batch(|h: &Header| h.second.len())
            .min_batch_size(1, "min")
            .max_batch_size(2, "max");

        assert_eq!(config.size_violation(&header(1, 0)), Some(&"min"));
        assert_eq!(config.size_violation(&header(1, 5)), Some(&"max"));
        assert_eq!(config.size_violation(&header(5, 0)), Some(&"max"));
        assert_eq!(config.size_violation(&header(2, 2)), None);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let result = ContainerConfig::new(|h: &Header| h.first.len())
            .batch_size_range(3..=1, "min", "max");
        assert_eq!(
            result.err(),
            Some(ConfigError::InvertedRange { min: 3, max: 1 })
        );
    }

    #[test]
    fn test_range_sets_both_bounds() {
        let config = ContainerConfig::new(|h: &Header| h.first.len())
            .batch_size_range(1..=1, "min", "max")
            .unwrap();
        assert_eq!(config.size_violation(&header(0, 0)), Some(&"min"));
        assert_eq!(config.size_violation(&header(2, 0)), Some(&"max"));
    }

    #[test]
    fn test_container_rules_accumulate() {
        let config = ContainerConfig::<Header, &str>::new(|h: &Header| h.first.len())
            .check(|_: &Header| None)
            .check(|_: &Header| Some("always"));
        assert_eq!(config.rules().len(), 2);
    }
}
