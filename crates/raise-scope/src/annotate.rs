use std::borrow::Cow;

use crate::BoxError;

/// The placeholder an annotation template substitutes the cause into.
pub const PLACEHOLDER: &str = "{}";

/// A cause annotated with surrounding text.
///
/// Displays as the template it was built from with the placeholder replaced
/// by the cause's text. Its [`source`](std::error::Error::source) is the
/// cause, so chain matching against the cause still succeeds.
#[derive(Debug, thiserror::Error)]
#[error("{prefix}{source}{suffix}")]
pub struct Annotated {
    prefix: String,
    source: BoxError,
    suffix: String,
}

impl Annotated {
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.source
    }

    #[must_use]
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// Wraps `cause` using `template`, which must contain exactly one
/// [`PLACEHOLDER`].
///
/// ```
/// use raise_scope::annotate;
///
/// let err = annotate("disk full", "saving project: {}");
/// assert_eq!(err.to_string(), "saving project: disk full");
/// ```
pub fn annotate<E>(cause: E, template: &str) -> Annotated
where
    E: Into<BoxError>,
{
    debug_assert!(
        template.matches(PLACEHOLDER).count() == 1,
        "annotation template must contain exactly one `{PLACEHOLDER}`: {template:?}"
    );
    let (prefix, suffix) = template.split_once(PLACEHOLDER).unwrap_or((template, ""));
    Annotated {
        prefix: prefix.to_owned(),
        source: cause.into(),
        suffix: suffix.to_owned(),
    }
}

/// A cause made only of a message, as produced by [`raise!`](crate::raise!)
/// and [`ensure!`](crate::ensure!).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Message(Cow<'static, str>);

impl Message {
    pub fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Message(msg.into())
    }

    #[doc(hidden)]
    pub fn from_args(args: std::fmt::Arguments<'_>) -> Self {
        match args.as_str() {
            Some(static_str) => Message(Cow::Borrowed(static_str)),
            None => Message(Cow::Owned(args.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
