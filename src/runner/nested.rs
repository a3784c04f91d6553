//! Batch-of-batch evaluation.
//!
//! Containers are always decided before their members: a container that is
//! null, duplicated, out of its size bounds, or failing a container rule is
//! reported as a container-level failure and its members are never read.

use stillwater::{NonEmptyVec, Validation};
use tracing::debug;

use crate::config::NestedConfig;
use crate::outcome::{NestedAnyFailure, NestedFailure, Outcome};

use super::Runner;

impl<F: Clone> Runner<F> {
    /// Validates every container and, for valid containers, every member.
    ///
    /// Each container yields one outcome, in input order:
    /// - `Failure(NestedFailure::Container(_))` if the container itself failed
    /// - `Failure(NestedFailure::Members(_))` with the failures of the failing
    ///   members, in member order, if any member failed
    /// - `Success(container)` otherwise
    ///
    /// A member accessor that panics fails its container with the mapped failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failfast::{Config, NestedFailure, Runner};
    /// use stillwater::Validation;
    ///
    /// struct Basket { items: Vec<Option<u32>> }
    ///
    /// let config = Config::nested(
    ///     Config::container(|b: &Basket| b.items.len()).min_batch_size(1, "empty basket"),
    ///     Config::members(
    ///         |b: &Basket| b.items.as_slice(),
    ///         Config::batch(
    ///             Config::rules::<u32, &str>().check(|n: &u32| (*n == 0).then_some("zero")),
    ///         ),
    ///     ),
    /// );
    /// let runner = Runner::new("missing", |_| "thrown");
    /// let baskets = [
    ///     Some(Basket { items: vec![Some(1), Some(0), Some(2)] }),
    ///     Some(Basket { items: vec![] }),
    /// ];
    ///
    /// let outcomes = runner.validate_each_nested(&baskets, &config);
    /// match &outcomes[0] {
    ///     Validation::Failure(NestedFailure::Members(failures)) => {
    ///         assert_eq!(failures.clone().into_vec(), vec!["zero"]);
    ///     }
    ///     _ => panic!("expected member failures"),
    /// }
    /// assert!(matches!(
    ///     &outcomes[1],
    ///     Validation::Failure(NestedFailure::Container("empty basket"))
    /// ));
    /// ```
    pub fn validate_each_nested<'a, C, M>(
        &self,
        containers: &'a [Option<C>],
        config: &NestedConfig<C, M, F>,
    ) -> Vec<Outcome<&'a C, NestedFailure<F>>> {
        self.each_with(containers, config.duplicates(), |container| {
            self.validate_container(container, config.container())
        })
        .into_iter()
        .map(|outcome| match outcome {
            Validation::Failure(failure) => Validation::Failure(NestedFailure::Container(failure)),
            Validation::Success(container) => {
                let members = config.members();
                let items = match self.shielded(|| members.of(container)) {
                    Ok(items) => items,
                    Err(failure) => return Validation::Failure(NestedFailure::Container(failure)),
                };
                let failures: Vec<F> = self
                    .validate_each(items, members.config())
                    .into_iter()
                    .filter_map(|outcome| match outcome {
                        Validation::Failure(failure) => Some(failure),
                        Validation::Success(_) => None,
                    })
                    .collect();
                match NonEmptyVec::from_vec(failures) {
                    Some(failures) => Validation::Failure(NestedFailure::Members(failures)),
                    None => Validation::Success(container),
                }
            }
        })
        .collect()
    }

    /// Returns the first container-level or member-level failure, or `None`.
    pub fn validate_any_nested<C, M>(
        &self,
        containers: &[Option<C>],
        config: &NestedConfig<C, M, F>,
    ) -> Option<F> {
        self.validate_any_nested_with_pair(containers, config, |_| None::<()>, |_| None::<()>)
            .map(NestedAnyFailure::into_failure)
    }

    /// Returns the first failure across containers and members, tagged with its
    /// level and caller-supplied context.
    ///
    /// All containers are scanned first, as in
    /// [`validate_any_with_pair`](Runner::validate_any_with_pair); any container
    /// failure is returned before a single member is read. Only when every
    /// container passes are members scanned, container by container in order, and
    /// the first member failure is returned together with its container's context.
    pub fn validate_any_nested_with_pair<C, M, CP, MP, CM, MM>(
        &self,
        containers: &[Option<C>],
        config: &NestedConfig<C, M, F>,
        container_pair: CM,
        member_pair: MM,
    ) -> Option<NestedAnyFailure<CP, MP, F>>
    where
        CM: Fn(Option<&C>) -> Option<CP>,
        MM: Fn(Option<&M>) -> Option<MP>,
    {
        let container_failure = self.any_with(
            containers,
            config.duplicates(),
            |container| self.validate_container(container, config.container()),
            &container_pair,
        );
        if let Some(found) = container_failure {
            return Some(NestedAnyFailure::Container {
                index: found.index,
                pair: found.pair,
                failure: found.failure,
            });
        }

        let members = config.members();
        containers
            .iter()
            .enumerate()
            .find_map(|(container_index, container)| {
                let container = container.as_ref()?;
                let items = match self.shielded(|| members.of(container)) {
                    Ok(items) => items,
                    Err(failure) => {
                        return Some(NestedAnyFailure::Container {
                            index: container_index,
                            pair: container_pair(Some(container)),
                            failure,
                        })
                    }
                };
                let found =
                    self.validate_any_with_pair(items, members.config(), &member_pair)?;
                debug!(container_index, member_index = found.index, "member failed");
                Some(NestedAnyFailure::Member {
                    container_index,
                    container_pair: container_pair(Some(container)),
                    member_index: found.index,
                    member_pair: found.pair,
                    failure: found.failure,
                })
            })
    }
}
