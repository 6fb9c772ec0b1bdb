//! Scope combinators that intercept raised causes.
//!
//! Each operation runs its body under [`catch_unwind`], so the interception
//! logic runs exactly once however the body exits. Only unwinds carrying a
//! [`Raised`] payload are intercepted. Every other panic is resumed with the
//! payload box it arrived with.
//!
//! Bodies are run as if they were [`UnwindSafe`](std::panic::UnwindSafe). A
//! raise hands nothing out of the body except the cause, and the caller decides
//! what to do with state the body left behind, exactly as with early returns.

use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use crate::{Annotated, BoxError, Raised, annotate};

/// Runs `body`, turning a raise into `Err(cause)` and resuming any other
/// panic.
fn intercept<T, F>(body: F) -> Result<T, BoxError>
where
    F: FnOnce() -> T,
{
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => Ok(value),
        Err(payload) => match Raised::from_panic(payload) {
            Ok(raised) => {
                log::debug!("intercepted raised cause: {raised}");
                Err(raised.into_cause())
            }
            Err(foreign) => {
                log::trace!("foreign panic passing through catch scope");
                resume_unwind(foreign)
            }
        },
    }
}

/// Runs `body`; if it raises, hands the cause to `handler`, whose result
/// takes the place of the body's.
///
/// The handler runs outside the intercepted scope, so raising from it
/// propagates to the next enclosing catch.
///
/// ```
/// use raise_scope::{catch, value_or_raise};
///
/// fn divide(x: i32, y: i32) -> Result<i32, &'static str> {
///     if y == 0 {
///         return Err("division by zero");
///     }
///     Ok(x / y)
/// }
///
/// let quotient = catch(|| Some(value_or_raise(divide(4, 0))), |_| None);
/// assert_eq!(quotient, None);
/// ```
pub fn catch<T, F, H>(body: F, handler: H) -> T
where
    F: FnOnce() -> T,
    H: FnOnce(BoxError) -> T,
{
    intercept(body).unwrap_or_else(handler)
}

/// Runs `body`, which returns the scope's own result; a raised cause becomes
/// that result's error.
///
/// ```
/// use raise_scope::{BoxError, catch_into, raise_if_err};
///
/// fn foo() -> Result<(), BoxError> {
///     catch_into(|| {
///         raise_if_err(Err("sample error"));
///         Ok(())
///     })
/// }
///
/// assert_eq!(foo().unwrap_err().to_string(), "sample error");
/// ```
pub fn catch_into<T, E, F>(body: F) -> Result<T, E>
where
    E: From<BoxError>,
    F: FnOnce() -> Result<T, E>,
{
    intercept(body).unwrap_or_else(|cause| Err(E::from(cause)))
}

/// Like [`catch_into`], but annotates the cause with `template` first.
///
/// `template` must contain exactly one `{}`, which is replaced by the cause's
/// text. The stored error keeps the cause as its source. See
/// [`annotate`](crate::annotate).
pub fn catch_into_annotated<T, E, F>(template: &str, body: F) -> Result<T, E>
where
    E: From<Annotated>,
    F: FnOnce() -> Result<T, E>,
{
    intercept(body).unwrap_or_else(|cause| Err(E::from(annotate(cause, template))))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::panic::panic_any;

    use crate::{
        ErrorExt as _, chain_contains, raise, raise_if_err, raise_unless_chain_contains,
        raise_unless_chain_contains_boxed, raise_unless_one_of, require_true, value_or_raise,
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq, thiserror::Error)]
    #[error("{0}")]
    struct Sentinel(&'static str);

    #[derive(Debug, PartialEq)]
    struct Foreign(u32);

    fn divide(x: i32, y: i32) -> Result<i32, Sentinel> {
        if y == 0 {
            return Err(Sentinel("division by zero"));
        }
        Ok(x / y)
    }

    #[test]
    fn catch_reports_raised_error() {
        let message = catch(
            || {
                raise_if_err(Err(Sentinel("sample error")));
                String::from("Will not be printed")
            },
            |err| format!("Catched {err}"),
        );
        assert_eq!(message, "Catched sample error");
    }

    #[test]
    fn catch_passes_value_through_without_calling_handler() {
        let called = Cell::new(false);
        let value = catch(|| value_or_raise(divide(4, 2)), |_| {
            called.set(true);
            0
        });
        assert_eq!(value, 2);
        assert!(!called.get());
    }

    #[test]
    fn catch_stops_at_failed_division() {
        let lines = RefCell::new(Vec::new());
        let say = |line: String| lines.borrow_mut().push(line);
        catch(
            || {
                say(format!("4 / 2 = {}", value_or_raise(divide(4, 2))));
                say(format!("4 / 0 = {}", value_or_raise(divide(4, 0))));
            },
            |err| say(format!("Catched {err}")),
        );
        assert_eq!(lines.into_inner(), ["4 / 2 = 2", "Catched division by zero"]);
    }

    #[test]
    fn catch_handler_receives_original_cause() {
        let cause = catch(|| -> BoxError { raise(Sentinel("sample error")) }, |cause| cause);
        assert_eq!(cause.downcast_ref::<Sentinel>(), Some(&Sentinel("sample error")));
    }

    #[test]
    fn catch_with_allow_list() {
        let good = Sentinel("good error");
        let bad = Sentinel("bad error");
        let lines = RefCell::new(Vec::new());
        let say = |line: String| lines.borrow_mut().push(line);
        catch(
            || {
                let err = raise_unless_one_of::<(), _>(Err(good.clone()), &[good.clone()]);
                say(err.unwrap_err().to_string());
                let err = raise_unless_one_of::<(), _>(Err(bad.clone()), &[good.clone()]);
                say(err.unwrap_err().to_string());
            },
            |err| say(format!("Catched {err}")),
        );
        assert_eq!(lines.into_inner(), ["good error", "Catched bad error"]);
    }

    #[test]
    fn catch_require_true() {
        let lines = RefCell::new(Vec::new());
        let say = |line: String| lines.borrow_mut().push(line);
        let answer = 42;
        catch(
            || {
                require_true(answer == 42, Sentinel("not a 42"));
                say(String::from("is a 42"));
                require_true(answer == 43, Sentinel("not a 43"));
                say(String::from("is a 43"));
            },
            |err| say(format!("Catched: {err}")),
        );
        assert_eq!(lines.into_inner(), ["is a 42", "Catched: not a 43"]);
    }

    #[test]
    fn foreign_panic_is_not_intercepted() {
        let called = Cell::new(false);
        let result = catch_unwind(AssertUnwindSafe(|| {
            catch(|| -> u8 { panic_any(Foreign(7)) }, |_| {
                called.set(true);
                0
            })
        }));
        let payload = result.expect_err("foreign panics must propagate");
        assert_eq!(payload.downcast_ref::<Foreign>(), Some(&Foreign(7)));
        assert!(!called.get());
    }

    #[test]
    fn foreign_panic_payload_is_resumed_as_is() {
        let inner = Box::new(0xfeed_u32);
        let address = std::ptr::from_ref::<u32>(&inner) as usize;
        let result = catch_unwind(AssertUnwindSafe(|| {
            catch_into::<(), BoxError, _>(|| panic_any(inner))
        }));
        let payload = result.expect_err("foreign panics must propagate");
        let inner = payload
            .downcast::<Box<u32>>()
            .expect("payload keeps its type");
        assert_eq!(std::ptr::from_ref::<u32>(&inner) as usize, address);
        assert_eq!(**inner, 0xfeed);
    }

    #[test]
    fn foreign_message_panic_keeps_message() {
        let result = catch_unwind(|| {
            catch_into_annotated::<(), Annotated, _>("wrapped {}", || panic!("boom"))
        });
        let payload = result.expect_err("foreign panics must propagate");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    }

    #[test]
    fn innermost_catch_intercepts() {
        let outer_called = Cell::new(false);
        let inner = catch(
            || catch(|| -> &'static str { raise(Sentinel("inner")) }, |_| "inner handled"),
            |_| {
                outer_called.set(true);
                "outer handled"
            },
        );
        assert_eq!(inner, "inner handled");
        assert!(!outer_called.get());
    }

    #[test]
    fn raise_from_handler_reaches_outer_catch() {
        let outer = catch(
            || {
                catch(
                    || raise(Sentinel("first")),
                    |err| raise(crate::annotate(err, "rethrown {}")),
                )
            },
            |err| err.to_string(),
        );
        assert_eq!(outer, "rethrown first");
    }

    #[test]
    fn catch_into_returns_raised_error() {
        fn foo() -> Result<(), BoxError> {
            catch_into(|| {
                raise_if_err(Err(Sentinel("sample error")));
                Ok(())
            })
        }

        let err = foo().expect_err("foo raises");
        assert_eq!(err.to_string(), "sample error");
        assert!(err.is::<Sentinel>());
    }

    #[test]
    fn catch_into_keeps_body_result() {
        let ok: Result<u8, BoxError> = catch_into(|| Ok(3));
        assert_eq!(ok.ok(), Some(3));

        let err: Result<u8, BoxError> = catch_into(|| Err("returned".into()));
        assert_eq!(err.unwrap_err().to_string(), "returned");
    }

    #[test]
    fn catch_into_annotated_wraps_cause() {
        fn load() -> Result<(), Annotated> {
            catch_into_annotated("wrapped {}", || raise(Sentinel("sample error")))
        }

        let err = load().expect_err("load raises");
        assert_eq!(err.to_string(), "wrapped sample error");
        assert!(err.chain_contains(&[Sentinel("sample error")]));
    }

    #[test]
    fn catch_into_annotated_result_matches_original_cause() {
        let cause = Sentinel("sample error");
        let result = catch_into_annotated::<(), Annotated, _>("wrapped {}", || raise(cause.clone()));
        let err = raise_unless_chain_contains(result, &[cause]).expect_err("still an error");
        assert_eq!(err.to_string(), "wrapped sample error");
    }

    #[test]
    fn catch_into_annotated_into_boxed_slot() {
        let result: Result<(), BoxError> =
            catch_into_annotated("loading: {}", || raise(Sentinel("missing")));
        let err = result.expect_err("body raised");
        assert_eq!(err.to_string(), "loading: missing");
        assert!(chain_contains(&*err, &[Sentinel("missing")]));
    }

    #[test]
    fn boxed_slot_chain_check_returns_allowed_cause() {
        let result: Result<(), BoxError> =
            catch_into_annotated("wrapped {}", || raise(Sentinel("sample error")));
        let err = raise_unless_chain_contains_boxed(result, &[Sentinel("sample error")])
            .expect_err("still an error");
        assert_eq!(err.to_string(), "wrapped sample error");
    }

    #[test]
    fn boxed_slot_chain_check_raises_to_outer_catch() {
        let msg = catch(
            || {
                let result: Result<(), BoxError> =
                    catch_into_annotated("wrapped {}", || raise(Sentinel("bad error")));
                drop(raise_unless_chain_contains_boxed(result, &[Sentinel("good error")]));
                String::from("not reached")
            },
            |err| format!("Catched {err}"),
        );
        assert_eq!(msg, "Catched wrapped bad error");
    }

    #[test]
    fn uncaught_raise_ends_thread_with_payload() {
        let handle = std::thread::spawn(|| {
            raise_if_err(Err(Sentinel("sample error")));
        });
        let Err(payload) = handle.join() else {
            panic!("thread should have been unwound");
        };
        let raised = Raised::from_panic(payload).expect("payload is a raise");
        let cause = raised.into_cause();
        assert_eq!(cause.downcast_ref::<Sentinel>(), Some(&Sentinel("sample error")));
    }
}
