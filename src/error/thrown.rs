//! What a rule "threw".
//!
//! A rule can fail abnormally in two ways: by panicking, or (for fallible rules)
//! by returning `Err`. Both are captured at the exception boundary as a
//! [`Thrown`] and handed to the caller's throwable mapper, which turns it into
//! an ordinary failure value.

use std::any::Any;
use std::error::Error;

/// An abnormal rule termination captured by the exception boundary.
///
/// # Example
///
/// ```rust
/// use failfast::Thrown;
///
/// let thrown = Thrown::message("lookup table missing");
/// assert_eq!(thrown.to_string(), "rule returned an error: lookup table missing");
/// assert!(!thrown.is_panic());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Thrown {
    /// The rule panicked. Holds the panic message when it was a string.
    #[error("rule panicked: {0}")]
    Panic(String),

    /// The rule returned an error.
    #[error("rule returned an error: {0}")]
    Error(#[source] Box<dyn Error + Send + Sync>),
}

impl Thrown {
    /// Wraps a plain message as a returned error.
    pub fn message(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Thrown::Error(message.into())
    }

    /// Builds a `Thrown` from a payload caught by `catch_unwind`.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Thrown::Panic(message)
    }

    /// Returns true if the rule panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, Thrown::Panic(_))
    }

    /// Attempts to view the returned error as a concrete type.
    ///
    /// Returns `None` for panics or when the error is of another type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Thrown::Error(error) => error.downcast_ref::<E>(),
            Thrown::Panic(_) => None,
        }
    }
}

// Mappers receive `&Thrown` from any thread a caller evaluates on.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Thrown>();
    assert_sync::<Thrown>();
};
