//! Operations that check a fallible step and raise on failure.
//!
//! Raising unwinds the current thread with a [`Raised`] payload until the
//! nearest enclosing catch operation intercepts it. The unwind is started with
//! [`std::panic::resume_unwind`], so the panic hook does not run for raises.

use std::error::Error as StdError;

use crate::{BoxError, Raised, chain::chain_contains};

/// Unconditionally raises `cause`.
///
/// The panic hook does not run for a raise. If no catch intercepts it, the
/// thread ends without printing anything; its joiner receives the [`Raised`]
/// payload, and an uncaught raise on the main thread exits the process with
/// status 101. Binaries that want the cause reported should wrap `main`'s body
/// in [`catch`](crate::catch) or [`catch_into`](crate::catch_into).
pub fn raise<E>(cause: E) -> !
where
    E: Into<BoxError>,
{
    let raised = Raised::new(cause);
    log::trace!("raising: {raised}");
    std::panic::resume_unwind(Box::new(raised))
}

/// Raises the error, if there is one.
///
/// ```
/// use raise_scope::{catch, raise_if_err};
///
/// let msg = catch(
///     || {
///         raise_if_err(Err("sample error"));
///         String::from("not reached")
///     },
///     |err| format!("Catched {err}"),
/// );
/// assert_eq!(msg, "Catched sample error");
/// ```
pub fn raise_if_err<E>(result: Result<(), E>)
where
    E: Into<BoxError>,
{
    if let Err(err) = result {
        raise(err);
    }
}

/// Returns the value on success, otherwise raises the error.
pub fn value_or_raise<T, E>(result: Result<T, E>) -> T
where
    E: Into<BoxError>,
{
    match result {
        Ok(value) => value,
        Err(err) => raise(err),
    }
}

/// Passes through success and errors equal to one of `allowed`, and raises
/// any other error.
///
/// Matching is plain equality against the error itself; wrapped errors do not
/// match. See [`raise_unless_chain_contains`] for chain-aware matching.
pub fn raise_unless_one_of<T, E>(result: Result<T, E>, allowed: &[E]) -> Result<T, E>
where
    E: PartialEq + Into<BoxError>,
{
    match result {
        Err(err) if !allowed.contains(&err) => raise(err),
        other => other,
    }
}

/// Passes through success and errors whose chain contains one of `allowed`,
/// and raises any other error.
///
/// An error matches if it, or any error reachable through its
/// [`source`](StdError::source) links, is an `A` equal to an allowed entry.
/// Boxed causes go through [`raise_unless_chain_contains_boxed`].
pub fn raise_unless_chain_contains<T, E, A>(result: Result<T, E>, allowed: &[A]) -> Result<T, E>
where
    E: StdError + Send + Sync + 'static,
    A: StdError + PartialEq + 'static,
{
    match result {
        Err(err) if !chain_contains(&err, allowed) => raise(err),
        other => other,
    }
}

/// [`raise_unless_chain_contains`] for a boxed cause, such as the error slot
/// filled by [`catch_into`](crate::catch_into) with `E = BoxError`.
pub fn raise_unless_chain_contains_boxed<T, A>(
    result: Result<T, BoxError>,
    allowed: &[A],
) -> Result<T, BoxError>
where
    A: StdError + PartialEq + 'static,
{
    match result {
        Err(err) if !chain_contains(&*err, allowed) => raise(err),
        other => other,
    }
}

/// Raises `err` unless `test` holds.
pub fn require_true<E>(test: bool, err: E)
where
    E: Into<BoxError>,
{
    if !test {
        raise(err);
    }
}

pub trait ResultExt<T, E> {
    /// Method form of [`value_or_raise`].
    fn or_raise(self) -> T;

    /// Method form of [`raise_unless_one_of`].
    #[must_use]
    fn or_raise_unless(self, allowed: &[E]) -> Self
    where
        E: PartialEq;

    /// Method form of [`raise_unless_chain_contains`].
    #[must_use]
    fn or_raise_unless_chained<A>(self, allowed: &[A]) -> Self
    where
        E: StdError,
        A: StdError + PartialEq + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Into<BoxError> + Send + Sync + 'static,
{
    fn or_raise(self) -> T {
        value_or_raise(self)
    }

    fn or_raise_unless(self, allowed: &[E]) -> Self
    where
        E: PartialEq,
    {
        raise_unless_one_of(self, allowed)
    }

    fn or_raise_unless_chained<A>(self, allowed: &[A]) -> Self
    where
        E: StdError,
        A: StdError + PartialEq + 'static,
    {
        raise_unless_chain_contains(self, allowed)
    }
}

/// Raises a [`Message`](crate::Message) cause built from a format string.
#[macro_export]
macro_rules! raise {
    ($($arg:tt)+) => {
        $crate::raise($crate::Message::from_args(::std::format_args!($($arg)+)))
    };
}

/// Raises a [`Message`](crate::Message) cause unless the condition holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::raise!($($arg)+);
        }
    };
}
