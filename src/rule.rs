//! Rules: single checks over one validatable value.
//!
//! A [`Rule`] inspects a value and yields `Ok(None)` when it passes, `Ok(Some(failure))`
//! when it fails, or `Err(Thrown)` when it could not decide. Rules are plain values
//! registered explicitly on an [`EvalConfig`](crate::EvalConfig); nothing is
//! discovered at runtime.
//!
//! Three closure shapes are supported out of the box:
//!
//! - [`from_fn`]: `Fn(&V) -> Option<F>`, the common case
//! - [`try_from_fn`]: `Fn(&V) -> Result<Option<F>, E>` for rules that can error
//! - [`simple`]: `Fn(&V) -> F` plus a `none` sentinel meaning "valid"
//!
//! Declarative per-field checks implement [`SimpleCheck`] instead and are lifted
//! onto a field with [`EvalConfig::field_check`](crate::EvalConfig::field_check).

use std::error::Error;
use std::marker::PhantomData;

use crate::error::Thrown;

/// A single check over a value of type `V` producing an optional failure `F`.
///
/// Rules must be pure: the engine invokes each rule at most once per item in a
/// pass and relies on that for its short-circuit guarantees.
///
/// # Example
///
/// ```rust
/// use failfast::{Rule, Thrown};
///
/// struct NonEmptyName;
///
/// impl Rule<String, &'static str> for NonEmptyName {
///     fn check(&self, value: &String) -> Result<Option<&'static str>, Thrown> {
///         Ok(value.is_empty().then_some("name is empty"))
///     }
/// }
///
/// assert_eq!(NonEmptyName.check(&String::new()).unwrap(), Some("name is empty"));
/// ```
pub trait Rule<V, F>: Send + Sync {
    /// Checks a value, returning the failure if the value is invalid.
    fn check(&self, value: &V) -> Result<Option<F>, Thrown>;
}

/// The shape of a declarative per-field check.
///
/// A simple check knows nothing about its surroundings: it gets the field value and
/// two caller-chosen sentinels and returns one of them. Returning anything equal to
/// `none` means the value passed.
///
/// # Example
///
/// ```rust
/// use failfast::SimpleCheck;
///
/// struct Positive;
///
/// impl SimpleCheck<i64> for Positive {
///     fn check<F>(&self, value: &i64, failure: F, none: F) -> F {
///         if *value < 1 { failure } else { none }
///     }
/// }
///
/// assert_eq!(Positive.check(&0, "not positive", "ok"), "not positive");
/// assert_eq!(Positive.check(&3, "not positive", "ok"), "ok");
/// ```
pub trait SimpleCheck<T: ?Sized>: Send + Sync {
    /// Returns `failure` if the value is invalid, `none` otherwise.
    fn check<F>(&self, value: &T, failure: F, none: F) -> F;
}

/// A rule backed by an infallible closure. See [`from_fn`].
pub struct FnRule<R>(R);

impl<V, F, R> Rule<V, F> for FnRule<R>
where
    R: Fn(&V) -> Option<F> + Send + Sync,
{
    fn check(&self, value: &V) -> Result<Option<F>, Thrown> {
        Ok((self.0)(value))
    }
}

/// A rule backed by a fallible closure. See [`try_from_fn`].
pub struct TryFnRule<R, E> {
    check: R,
    _error: PhantomData<fn() -> E>,
}

impl<V, F, E, R> Rule<V, F> for TryFnRule<R, E>
where
    R: Fn(&V) -> Result<Option<F>, E> + Send + Sync,
    E: Error + Send + Sync + 'static,
{
    fn check(&self, value: &V) -> Result<Option<F>, Thrown> {
        (self.check)(value).map_err(|error| Thrown::Error(Box::new(error)))
    }
}

/// A rule backed by a sentinel-returning closure. See [`simple`].
pub struct SimpleRule<R, F> {
    check: R,
    none: F,
}

impl<V, F, R> Rule<V, F> for SimpleRule<R, F>
where
    R: Fn(&V) -> F + Send + Sync,
    F: PartialEq + Send + Sync,
{
    fn check(&self, value: &V) -> Result<Option<F>, Thrown> {
        let result = (self.check)(value);
        if result == self.none {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }
}

/// Creates a rule from a closure returning an optional failure.
///
/// # Example
///
/// ```rust
/// use failfast::rule::{self, Rule};
///
/// let adult = rule::from_fn(|age: &u32| (*age < 18).then_some("minor"));
/// assert_eq!(adult.check(&12).unwrap(), Some("minor"));
/// assert_eq!(adult.check(&30).unwrap(), None);
/// ```
pub fn from_fn<V, F, R>(check: R) -> FnRule<R>
where
    R: Fn(&V) -> Option<F> + Send + Sync,
{
    FnRule(check)
}

/// Creates a rule from a closure that may return an error.
///
/// An `Err` is captured as [`Thrown::Error`] and later converted to a failure by the
/// runner's throwable mapper.
pub fn try_from_fn<V, F, E, R>(check: R) -> TryFnRule<R, E>
where
    R: Fn(&V) -> Result<Option<F>, E> + Send + Sync,
    E: Error + Send + Sync + 'static,
{
    TryFnRule {
        check,
        _error: PhantomData,
    }
}

/// Creates a rule from a closure that always returns a failure value, where a value
/// equal to `none` means "valid".
///
/// # Example
///
/// ```rust
/// use failfast::rule::{self, Rule};
///
/// let even = rule::simple(|n: &i32| if n % 2 == 0 { "none" } else { "odd" }, "none");
/// assert_eq!(even.check(&3).unwrap(), Some("odd"));
/// assert_eq!(even.check(&4).unwrap(), None);
/// ```
pub fn simple<V, F, R>(check: R, none: F) -> SimpleRule<R, F>
where
    R: Fn(&V) -> F + Send + Sync,
    F: PartialEq + Send + Sync,
{
    SimpleRule { check, none }
}
