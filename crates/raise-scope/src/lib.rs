//! Scoped raising and catching of errors.
//!
//! A fallible step deep in a call stack can [raise](raise()) its error
//! instead of threading a `Result` through every caller. The raise unwinds
//! the thread carrying a [`Raised`] payload, and the nearest enclosing catch
//! operation turns it back into an ordinary value or error return:
//!
//! ```
//! use raise_scope::{BoxError, catch_into, value_or_raise};
//!
//! fn parse_pair(text: &str) -> Result<(i32, i32), BoxError> {
//!     catch_into(|| {
//!         let (a, b) = text.split_once(',').ok_or("missing comma")?;
//!         Ok((value_or_raise(a.trim().parse()), value_or_raise(b.trim().parse())))
//!     })
//! }
//!
//! assert_eq!(parse_pair("4, 2").unwrap(), (4, 2));
//! assert!(parse_pair("4, x").is_err());
//! ```
//!
//! Catch operations intercept only raises. Any other panic passes through
//! them untouched, with its original payload.
//!
//! Raising is local to a thread. A raise that no catch intercepts ends the
//! thread like any other panic; the payload handed to the thread's joiner can
//! be recognized with [`Raised::from_panic`]. Raises skip the panic hook, so
//! nothing is printed for them: an uncaught raise on the main thread exits
//! with status 101 silently. Wrap `main` in a catch to report the cause.

mod annotate;
mod catch;
mod chain;
mod payload;
mod raise;

pub mod prelude {
    pub use super::chain::ErrorExt as _;
    pub use super::raise::ResultExt as _;
}

pub use self::annotate::{Annotated, Message, PLACEHOLDER, annotate};
pub use self::catch::{catch, catch_into, catch_into_annotated};
pub use self::chain::{Chain, ErrorExt, chain, chain_contains};
pub use self::payload::Raised;
pub use self::raise::{
    ResultExt, raise, raise_if_err, raise_unless_chain_contains, raise_unless_chain_contains_boxed,
    raise_unless_one_of, require_true, value_or_raise,
};

/// The cause carried by a raise.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
