use std::{
    convert::Infallible,
    fmt::{Debug, Display},
};

use serde::{Deserialize, Serialize};

use self::Outcome::{Failure, Success};

/// Result of a computation: either it succeeded with a value or it failed with a cause.
///
/// The cause is an ordinary value, it does not have to implement [`std::error::Error`].
/// Combinators never clone payloads: whatever they do not transform is moved through
/// untouched, so a boxed cause keeps its address across `map`, `flat_map`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
}

pub fn success<T, E>(value: T) -> Outcome<T, E> {
    Success(value)
}

pub fn failure<T, E>(cause: E) -> Outcome<T, E> {
    Failure(cause)
}

pub trait IntoOutcome: Sized {
    fn into_success<E>(self) -> Outcome<Self, E> {
        Success(self)
    }

    fn into_failure<T>(self) -> Outcome<T, Self> {
        Failure(self)
    }
}

impl<V> IntoOutcome for V {}

impl<T, E> Outcome<Option<T>, E> {
    pub const NONE: Self = Success(None);
}

impl<E> Outcome<bool, E> {
    pub const TRUE: Self = Success(true);

    pub const FALSE: Self = Success(false);

    pub fn of(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }
}

impl<E> Outcome<(), E> {
    pub const UNIT: Self = Success(());
}

impl<T, E> Outcome<Vec<T>, E> {
    /// Shared `Success` of an empty list. Building it never allocates.
    pub const EMPTY_LIST: Self = Success(Vec::new());
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Success(_))
    }

    /// The predicate is never called on `Failure`.
    pub fn is_success_and<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&T) -> bool,
    {
        match self {
            Success(value) => predicate(value),
            Failure(_) => false,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Failure(_))
    }

    pub fn is_failure_and<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&E) -> bool,
    {
        match self {
            Success(_) => false,
            Failure(cause) => predicate(cause),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Success(value) => Success(value),
            Failure(cause) => Failure(cause),
        }
    }

    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Success(value) => on_success(value),
            Failure(cause) => on_failure(cause),
        }
    }

    /// Transforms the value of `Success`. A `Failure` is handed back with the same cause.
    ///
    /// ```rust
    /// use outcome::{failure, success, Outcome};
    ///
    /// assert_eq!(success::<i32, &str>(5).map(|x| x + 1), success(6));
    /// assert_eq!(failure::<i32, &str>("e").map(|x| x + 1), failure("e"));
    /// ```
    pub fn map<R, F>(self, transform: F) -> Outcome<R, E>
    where
        F: FnOnce(T) -> R,
    {
        self.flat_map(|value| Success(transform(value)))
    }

    /// Chains a computation that may fail itself. Alias: [`Outcome::and_then`].
    pub fn flat_map<R, F>(self, transform: F) -> Outcome<R, E>
    where
        F: FnOnce(T) -> Outcome<R, E>,
    {
        match self {
            Success(value) => transform(value),
            Failure(cause) => Failure(cause),
        }
    }

    pub fn and_then<R, F>(self, block: F) -> Outcome<R, E>
    where
        F: FnOnce(T) -> Outcome<R, E>,
    {
        self.flat_map(block)
    }

    /// Transforms the cause of `Failure`, `Success` is handed back with the same value.
    pub fn map_failure<R, F>(self, transform: F) -> Outcome<T, R>
    where
        F: FnOnce(E) -> R,
    {
        match self {
            Success(value) => Success(value),
            Failure(cause) => Failure(transform(cause)),
        }
    }

    /// Runs `block` on the value of `Success` and returns `self` as it was.
    pub fn on_success<F>(self, block: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Success(value) = &self {
            block(value);
        }
        self
    }

    pub fn on_failure<F>(self, block: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Failure(cause) = &self {
            block(cause);
        }
        self
    }

    /// Turns `Failure` into `Success` with the value computed from the cause.
    pub fn recover<F>(self, block: F) -> Self
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Failure(cause) => Success(block(cause)),
            other => other,
        }
    }

    pub fn recover_with<F>(self, block: F) -> Self
    where
        F: FnOnce(E) -> Self,
    {
        match self {
            Failure(cause) => block(cause),
            other => other,
        }
    }

    pub fn get_or_none(self) -> Option<T> {
        match self {
            Success(value) => Some(value),
            Failure(_) => None,
        }
    }

    pub fn get_failure_or_none(self) -> Option<E> {
        match self {
            Success(_) => None,
            Failure(cause) => Some(cause),
        }
    }

    pub fn get_or_else(self, default: T) -> T {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    pub fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Success(value) => value,
            Failure(cause) => default(cause),
        }
    }

    /// Replaces `Failure` with whatever `default` produces, the cause is dropped.
    pub fn or_else<F>(self, default: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Failure(_) => default(),
            other => other,
        }
    }

    /// Returns the value, or panics with the error built from the cause.
    ///
    /// Only meant for program boundaries where a failure can not be handled anymore,
    /// see [`Outcome::into_anyhow`] for a recoverable alternative.
    #[track_caller]
    pub fn or_throw<X, F>(self, error: F) -> T
    where
        X: Display,
        F: FnOnce(E) -> X,
    {
        match self {
            Success(value) => value,
            Failure(cause) => panic!("{}", error(cause)),
        }
    }

    /// Returns the value, or passes the whole failure to a handler that never returns,
    /// typically [`crate::Raise::raise_failure`] of an enclosing scope.
    pub fn get_or_forward<F>(self, block: F) -> T
    where
        F: FnOnce(Outcome<Infallible, E>) -> Infallible,
    {
        match self {
            Success(value) => value,
            // The handler returns an uninhabited value, so the match is never reached.
            #[allow(unreachable_code)]
            Failure(cause) => match block(Failure(cause)) {},
        }
    }

    pub fn for_each<F>(self, block: F)
    where
        F: FnOnce(T),
    {
        if let Success(value) = self {
            block(value)
        }
    }

    /// Keeps `Success` only if its value matches `predicate`, otherwise fails with `default()`.
    ///
    /// Neither closure runs on `Failure`.
    pub fn filter_or_else<P, F>(self, predicate: P, default: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce() -> E,
    {
        match self {
            Success(value) => {
                if predicate(&value) {
                    Success(value)
                } else {
                    Failure(default())
                }
            }
            Failure(cause) => Failure(cause),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E> Outcome<Option<T>, E> {
    /// Narrows `Success(Some(v))` to `Success(v)`; `Success(None)` fails with `failure()`.
    pub fn filter_some<F>(self, failure: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Success(Some(value)) => Success(value),
            Success(None) => Failure(failure()),
            Failure(cause) => Failure(cause),
        }
    }
}

impl<T> Outcome<T, T> {
    pub fn merge(self) -> T {
        self.fold(|value| value, |cause| cause)
    }
}

impl<T, E> Outcome<T, E>
where
    E: Display + Debug + Send + Sync + 'static,
{
    /// Converts into `anyhow::Result`, the cause becomes the error message.
    pub fn into_anyhow(self) -> anyhow::Result<T> {
        match self {
            Success(value) => Ok(value),
            Failure(cause) => Err(anyhow::Error::msg(cause)),
        }
    }

    /// Like [`Outcome::into_anyhow`], with `context` wrapped around the cause.
    pub fn context<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.into_anyhow().map_err(|e| e.context(context))
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Success(value),
            Err(cause) => Failure(cause),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Success(value) => Ok(value),
            Failure(cause) => Err(cause),
        }
    }
}
