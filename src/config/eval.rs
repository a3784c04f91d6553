//! Ordered rule lists for a single validatable type.

use std::fmt;

use crate::rule::{self, Rule, SimpleCheck};

type SkipPredicate<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

/// An ordered sequence of rules for one validatable type.
///
/// Rules run in the order they were added and evaluation stops at the first
/// failure. An optional skip predicate bypasses the whole config for items it
/// matches.
///
/// # Example
///
/// ```rust
/// use failfast::{Config, Runner};
///
/// struct Account {
///     id: u64,
///     email: Option<String>,
/// }
///
/// let rules = Config::rules::<Account, &str>()
///     .check(|a: &Account| (a.id == 0).then_some("missing id"))
///     .required(|a: &Account| a.email.as_ref(), "missing email");
///
/// let runner = Runner::new("null account", |_| "unexpected error");
/// let account = Account { id: 7, email: None };
/// assert_eq!(runner.validate(&account, &rules), Some("missing email"));
/// ```
pub struct EvalConfig<V, F> {
    rules: Vec<Box<dyn Rule<V, F>>>,
    skip_when: Option<SkipPredicate<V>>,
}

impl<V: 'static, F: 'static> EvalConfig<V, F> {
    /// Creates an empty config. An empty config accepts every item.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            skip_when: None,
        }
    }

    /// Appends a rule.
    pub fn rule<R>(mut self, rule: R) -> Self
    where
        R: Rule<V, F> + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a rule from a closure returning an optional failure.
    pub fn check<R>(self, check: R) -> Self
    where
        R: Fn(&V) -> Option<F> + Send + Sync + 'static,
    {
        self.rule(rule::from_fn(check))
    }

    /// Appends a rule from a closure that can return an error.
    ///
    /// Errors are converted to failures by the runner's throwable mapper.
    pub fn try_check<E, R>(self, check: R) -> Self
    where
        R: Fn(&V) -> Result<Option<F>, E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.rule(rule::try_from_fn(check))
    }

    /// Appends a sentinel-style rule: any result equal to `none` means valid.
    pub fn simple<R>(self, check: R, none: F) -> Self
    where
        R: Fn(&V) -> F + Send + Sync + 'static,
        F: PartialEq + Send + Sync,
    {
        self.rule(rule::simple(check, none))
    }

    /// Appends a rule failing with `failure` when the accessor yields `None`.
    pub fn required<T, A>(self, accessor: A, failure: F) -> Self
    where
        T: ?Sized + 'static,
        A: Fn(&V) -> Option<&T> + Send + Sync + 'static,
        F: Clone + Send + Sync,
    {
        self.check(move |item: &V| accessor(item).is_none().then(|| failure.clone()))
    }

    /// Lifts a [`SimpleCheck`] onto one field of the validatable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failfast::{Config, Runner, SimpleCheck};
    ///
    /// struct Positive;
    ///
    /// impl SimpleCheck<i64> for Positive {
    ///     fn check<F>(&self, value: &i64, failure: F, none: F) -> F {
    ///         if *value < 1 { failure } else { none }
    ///     }
    /// }
    ///
    /// struct Line { quantity: i64 }
    ///
    /// let rules = Config::rules::<Line, &str>()
    ///     .field_check(|l: &Line| &l.quantity, Positive, "quantity must be positive", "none");
    ///
    /// let runner = Runner::new("null line", |_| "unexpected error");
    /// let empty = Line { quantity: 0 };
    /// assert_eq!(runner.validate(&empty, &rules), Some("quantity must be positive"));
    /// assert_eq!(runner.validate(&Line { quantity: 2 }, &rules), None);
    /// ```
    pub fn field_check<T, A, C>(self, accessor: A, check: C, failure: F, none: F) -> Self
    where
        T: ?Sized + 'static,
        A: Fn(&V) -> &T + Send + Sync + 'static,
        C: SimpleCheck<T> + 'static,
        F: Clone + PartialEq + Send + Sync,
    {
        self.check(move |item: &V| {
            let result = check.check(accessor(item), failure.clone(), none.clone());
            (result != none).then_some(result)
        })
    }

    /// Lifts a [`SimpleCheck`] onto an optional field. The check runs only when the
    /// accessor yields a value; an absent field passes.
    ///
    /// Pair with [`required`](Self::required) when absence is itself a failure.
    pub fn optional_field_check<T, A, C>(
        self,
        accessor: A,
        check: C,
        failure: F,
        none: F,
    ) -> Self
    where
        T: ?Sized + 'static,
        A: Fn(&V) -> Option<&T> + Send + Sync + 'static,
        C: SimpleCheck<T> + 'static,
        F: Clone + PartialEq + Send + Sync,
    {
        self.check(move |item: &V| {
            let value = accessor(item)?;
            let result = check.check(value, failure.clone(), none.clone());
            (result != none).then_some(result)
        })
    }

    /// Sets a predicate that, when true for an item, bypasses every rule.
    pub fn skip_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.skip_when = Some(Box::new(predicate));
        self
    }
}

impl<V, F> EvalConfig<V, F> {
    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn should_skip(&self, item: &V) -> bool {
        self.skip_when
            .as_ref()
            .is_some_and(|predicate| predicate(item))
    }

    pub(crate) fn rules(&self) -> &[Box<dyn Rule<V, F>>] {
        &self.rules
    }
}

impl<V: 'static, F: 'static> Default for EvalConfig<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> fmt::Debug for EvalConfig<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalConfig")
            .field("rules", &self.rules.len())
            .field("skip_when", &self.skip_when.is_some())
            .finish()
    }
}
