//! Small programs exercising each raise and catch operation. Every scenario
//! returns the lines it printed, in order.

use std::cell::RefCell;

use itertools::Itertools as _;
use raise_scope::{
    BoxError, annotate, catch, catch_into, chain, prelude::*, raise_if_err,
    raise_unless_chain_contains, require_true,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum DemoError {
    #[error("sample error")]
    Sample,
    #[error("division by zero")]
    DivisionByZero,
    #[error("division overflow")]
    Overflow,
    #[error("good error")]
    Good,
    #[error("bad error")]
    Bad,
    #[error("not a {0}")]
    NotA(i64),
}

#[derive(Default)]
struct Transcript(RefCell<Vec<String>>);

impl Transcript {
    fn say(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    fn into_lines(self) -> Vec<String> {
        self.0.into_inner()
    }
}

fn divide(x: i64, y: i64) -> Result<i64, DemoError> {
    if y == 0 {
        return Err(DemoError::DivisionByZero);
    }
    x.checked_div(y).ok_or(DemoError::Overflow)
}

pub(crate) fn raise_and_catch() -> Vec<String> {
    let out = Transcript::default();
    catch(
        || {
            raise_if_err(Err(DemoError::Sample));
            out.say("Will not be printed");
        },
        |err| out.say(format!("Catched {err}")),
    );
    out.into_lines()
}

/// Divides each pair in turn, stopping at the first failure.
pub(crate) fn divisions(pairs: &[(i64, i64)]) -> Vec<String> {
    let out = Transcript::default();
    catch(
        || {
            for &(x, y) in pairs {
                let quotient = divide(x, y).or_raise();
                out.say(format!("{x} / {y} = {quotient}"));
            }
        },
        |err| out.say(format!("Catched {err}")),
    );
    out.into_lines()
}

pub(crate) fn allow_list() -> Vec<String> {
    let out = Transcript::default();
    catch(
        || {
            for err in [DemoError::Good, DemoError::Bad] {
                let allowed = Err::<(), _>(err).or_raise_unless(&[DemoError::Good]);
                if let Err(err) = allowed {
                    out.say(err.to_string());
                }
            }
        },
        |err| out.say(format!("Catched {err}")),
    );
    out.into_lines()
}

pub(crate) fn chain_aware_allow_list() -> Vec<String> {
    let out = Transcript::default();
    catch(
        || {
            let wrapped = annotate(DemoError::Good, "wrapped {}");
            let allowed = raise_unless_chain_contains::<(), _, _>(Err(wrapped), &[DemoError::Good]);
            if let Err(err) = allowed {
                out.say(err.to_string());
                out.say(format!("chain: {}", chain(&err).join(" -> ")));
            }
        },
        |err| out.say(format!("Catched {err}")),
    );
    out.into_lines()
}

fn foo() -> Result<(), BoxError> {
    catch_into(|| {
        raise_if_err(Err(DemoError::Sample));
        Ok(())
    })
}

pub(crate) fn return_slot() -> Vec<String> {
    match foo() {
        Ok(()) => vec![String::from("Returned nothing")],
        Err(err) => vec![format!("Returned {err}")],
    }
}

/// Requires `actual == expected` for each pair, stopping at the first
/// mismatch.
pub(crate) fn requirements(checks: &[(i64, i64)]) -> Vec<String> {
    let out = Transcript::default();
    catch(
        || {
            for &(actual, expected) in checks {
                require_true(actual == expected, DemoError::NotA(expected));
                out.say(format!("{actual} == {expected}"));
            }
        },
        |err| out.say(format!("Catched: {err}")),
    );
    out.into_lines()
}
