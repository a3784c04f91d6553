//! Evaluation results.
//!
//! Per-item results are stillwater [`Validation`]s: `Success` carries the (borrowed)
//! valid item, `Failure` carries the caller's failure value. The remaining types
//! describe the single failure reported by "validate any" scans and the aggregate
//! failure of a container in nested "validate each" mode.

use std::fmt;

use stillwater::{NonEmptyVec, Validation};

/// The result for one batch position: the valid item or its failure.
pub type Outcome<V, F> = Validation<V, F>;

/// Why a container failed in nested "validate each" mode.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedFailure<F> {
    /// The container itself failed; its members were never validated.
    Container(F),
    /// The container passed but some members failed. Holds the member failures in
    /// member order; valid members are omitted.
    Members(NonEmptyVec<F>),
}

impl<F> NestedFailure<F> {
    /// Returns true for a container-level failure.
    pub fn is_container_level(&self) -> bool {
        matches!(self, NestedFailure::Container(_))
    }

    /// Returns the member failures, or `None` for a container-level failure.
    pub fn member_failures(&self) -> Option<&NonEmptyVec<F>> {
        match self {
            NestedFailure::Members(failures) => Some(failures),
            NestedFailure::Container(_) => None,
        }
    }
}

/// The first failure found by a "validate any" scan.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyFailure<P, F> {
    /// Position of the failing item in the input.
    pub index: usize,
    /// Caller-supplied context for the failing item (e.g. its identifier).
    pub pair: Option<P>,
    /// The failure.
    pub failure: F,
}

impl<P, F> AnyFailure<P, F> {
    pub(crate) fn new(index: usize, pair: Option<P>, failure: F) -> Self {
        Self {
            index,
            pair,
            failure,
        }
    }
}

/// The first failure found by a nested "validate any" scan, tagged with the level
/// it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedAnyFailure<CP, MP, F> {
    /// A container failed (null, duplicate, size bound, or container rule).
    Container {
        /// Position of the container.
        index: usize,
        /// Context for the container.
        pair: Option<CP>,
        /// The failure.
        failure: F,
    },
    /// A member of an otherwise valid container failed.
    Member {
        /// Position of the container holding the member.
        container_index: usize,
        /// Context for the container.
        container_pair: Option<CP>,
        /// Position of the member within its container.
        member_index: usize,
        /// Context for the member.
        member_pair: Option<MP>,
        /// The failure.
        failure: F,
    },
}

impl<CP, MP, F> NestedAnyFailure<CP, MP, F> {
    /// Returns true for a container-level failure.
    pub fn is_container_level(&self) -> bool {
        matches!(self, NestedAnyFailure::Container { .. })
    }

    /// Returns the failure regardless of level.
    pub fn failure(&self) -> &F {
        match self {
            NestedAnyFailure::Container { failure, .. }
            | NestedAnyFailure::Member { failure, .. } => failure,
        }
    }

    /// Consumes the result, returning the failure.
    pub fn into_failure(self) -> F {
        match self {
            NestedAnyFailure::Container { failure, .. }
            | NestedAnyFailure::Member { failure, .. } => failure,
        }
    }
}

impl<CP, MP, F: fmt::Display> fmt::Display for NestedAnyFailure<CP, MP, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedAnyFailure::Container { index, failure, .. } => {
                write!(f, "[{}]: {}", index, failure)
            }
            NestedAnyFailure::Member {
                container_index,
                member_index,
                failure,
                ..
            } => write!(f, "[{}][{}]: {}", container_index, member_index, failure),
        }
    }
}
