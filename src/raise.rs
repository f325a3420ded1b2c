use std::{
    cell::Cell,
    convert::Infallible,
    fmt,
    marker::PhantomData,
    panic::{self, AssertUnwindSafe},
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, trace};

use crate::outcome::Outcome::{self, Failure, Success};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a single `run_scoped` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unwinding payload that marks an abort of one scope.
///
/// The cause itself waits in the slot of the [`Raise`] that was aborted.
struct Abort {
    scope: ScopeId,
}

/// The right to abort the enclosing [`run_scoped`] block with a failure of type `E`.
///
/// A scope is handed out by reference to the block and is only valid while that block
/// runs. It is neither `Send` nor `Sync`: raising unwinds the stack of the thread that
/// runs the block, so the token can not be used from anywhere else.
///
/// # Unwinding
///
/// Aborting is a real unwind. A `std::sync::Mutex` or `RwLock` guard that is alive in the
/// block when it aborts poisons its lock, and `Drop` impls on the way out observe
/// `std::thread::panicking() == true`. Release guards before raising, or use
/// [`scoped`](crate::scoped), which turns direct uses of the scope into early returns.
///
/// ```compile_fail
/// use outcome::{run_scoped, Raise};
///
/// let mut leaked: Option<&Raise<String>> = None;
/// let _ = run_scoped(|raise: &Raise<String>| leaked = Some(raise));
/// ```
///
/// ```compile_fail
/// use outcome::{run_scoped, Raise};
///
/// let _ = run_scoped(|raise: &Raise<String>| {
///     std::thread::scope(|s| {
///         s.spawn(|| raise.raise("from another thread".to_string()));
///     })
/// });
/// ```
pub struct Raise<E> {
    id: ScopeId,
    cause: Cell<Option<E>>,
    _marker: PhantomData<*const ()>,
}

impl<E> Raise<E> {
    fn new() -> Self {
        Self {
            id: ScopeId::next(),
            cause: Cell::new(None),
            _marker: PhantomData,
        }
    }

    /// Returns the value of `Success`, or aborts the block with the cause of `Failure`.
    pub fn bind<T>(&self, outcome: Outcome<T, E>) -> T {
        match outcome {
            Success(value) => value,
            Failure(cause) => self.raise(cause),
        }
    }

    /// Aborts the block, [`run_scoped`] returns `Failure(cause)`.
    pub fn raise(&self, cause: E) -> ! {
        trace!("raise scope {} is aborting", self.id);
        self.cause.set(Some(cause));
        // resume_unwind skips the panic hook, nothing gets printed on the way out.
        panic::resume_unwind(Box::new(Abort { scope: self.id }))
    }

    /// Aborts the block with a failure obtained elsewhere, see [`Outcome::get_or_forward`].
    pub fn raise_failure(&self, failure: Outcome<Infallible, E>) -> ! {
        match failure {
            Success(never) => match never {},
            Failure(cause) => self.raise(cause),
        }
    }

    pub fn raise_if_failure<T>(&self, outcome: Outcome<T, E>) {
        if let Failure(cause) = outcome {
            self.raise(cause)
        }
    }

    /// Aborts the block with `cause()` unless `condition` holds.
    pub fn ensure<F>(&self, condition: bool, cause: F)
    where
        F: FnOnce() -> E,
    {
        if !condition {
            self.raise(cause())
        }
    }

    pub fn ensure_some<T, F>(&self, value: Option<T>, cause: F) -> T
    where
        F: FnOnce() -> E,
    {
        match value {
            Some(value) => value,
            None => self.raise(cause()),
        }
    }
}

impl<E> fmt::Debug for Raise<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raise").field("id", &self.id.0).finish()
    }
}

impl<T, E> Outcome<T, E> {
    /// Suffix form of [`Raise::bind`]: `let port = parse(input).bind(raise);`.
    pub fn bind(self, raise: &Raise<E>) -> T {
        raise.bind(self)
    }
}

/// Runs `block` with a fresh [`Raise`] scope and wraps what it returns into `Success`.
///
/// When the block is aborted through this very scope the failure is returned instead.
/// Aborts raised through any other scope (an enclosing one, for example) travel on
/// untouched, as do ordinary panics.
///
/// ```rust
/// use outcome::{failure, run_scoped, success, Outcome};
///
/// let doubled: Outcome<i32, String> = run_scoped(|raise| raise.bind(success(10)) * 2);
/// assert_eq!(doubled, success(20));
///
/// let blank: Outcome<i32, &str> = run_scoped(|raise| {
///     raise.ensure(false, || "blank");
///     1
/// });
/// assert_eq!(blank, failure("blank"));
/// ```
///
/// # Unwinding
///
/// Aborting unwinds the stack of the block, so the mechanism is unavailable in builds with
/// `panic = "abort"`. Locks guarded across an abort are poisoned, see [`Raise`].
pub fn run_scoped<T, E, F>(block: F) -> Outcome<T, E>
where
    F: FnOnce(&Raise<E>) -> T,
{
    let raise = Raise::new();
    trace!("raise scope {} opened", raise.id);

    let result = panic::catch_unwind(AssertUnwindSafe(|| block(&raise)));

    let payload = match result {
        Ok(value) => {
            trace!("raise scope {} closed", raise.id);
            return Success(value);
        }
        Err(payload) => payload,
    };

    match payload.downcast::<Abort>() {
        Ok(abort) if abort.scope == raise.id => match raise.cause.take() {
            Some(cause) => {
                debug!("raise scope {} intercepted its own abort", raise.id);
                Failure(cause)
            }
            None => panic::resume_unwind(abort),
        },
        Ok(abort) => {
            debug!(
                "raise scope {} passes on the abort of scope {}",
                raise.id, abort.scope
            );
            panic::resume_unwind(abort)
        }
        Err(payload) => panic::resume_unwind(payload),
    }
}
