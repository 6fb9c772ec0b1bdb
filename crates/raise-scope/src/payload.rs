//! The payload carried by every unwind started from this crate.

use std::any::Any;
use std::fmt::Debug;
use std::fmt::Display;

use crate::BoxError;

/// Marks an unwind as raised by this crate, holding the cause that was
/// raised.
///
/// Every raise operation unwinds with exactly one `Raised` as its panic
/// payload, and the catch operations intercept only unwinds carrying one. The
/// type is public so that code outside a catch scope (a thread join, a custom
/// `catch_unwind`) can recognize the unwind with [`Raised::from_panic`].
pub struct Raised(BoxError);

impl Raised {
    pub fn new<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Raised(cause.into())
    }

    /// Recovers a `Raised` from a panic payload, returning the payload
    /// untouched if the panic came from somewhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// use raise_scope::Raised;
    ///
    /// let Err(payload) = std::panic::catch_unwind(|| raise_scope::raise("sample error")) else {
    ///     unreachable!();
    /// };
    /// let raised = Raised::from_panic(payload).ok().unwrap();
    /// assert_eq!(raised.to_string(), "sample error");
    /// ```
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        payload.downcast::<Raised>().map(|raised| *raised)
    }

    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Consumes the payload, returning the cause exactly as it was raised.
    #[must_use]
    pub fn into_cause(self) -> BoxError {
        self.0
    }
}

impl Display for Raised {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Raised {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("Raised").field(&self.0).finish()
    }
}

impl std::error::Error for Raised {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}
