use std::error::Error as StdError;

/// An iterator over an error and every error it wraps, following
/// [`source()`](StdError::source) links outward-in.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

/// Returns the chain starting at `err`.
#[must_use]
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// Returns true iff some link of `err`'s chain is of type `A` and equal to
/// one of `allowed`.
///
/// This is the form to use with boxed causes, which do not implement
/// [`StdError`] themselves: `chain_contains(&*cause, &[...])`.
pub fn chain_contains<A>(err: &(dyn StdError + 'static), allowed: &[A]) -> bool
where
    A: StdError + PartialEq + 'static,
{
    chain(err).any(|link| {
        link.downcast_ref::<A>()
            .is_some_and(|link| allowed.contains(link))
    })
}

pub trait ErrorExt {
    fn get_in_chain<E: StdError + 'static>(&self) -> Option<&E>;

    fn chain_contains<A>(&self, allowed: &[A]) -> bool
    where
        A: StdError + PartialEq + 'static;
}

impl<E> ErrorExt for E
where
    E: StdError + 'static,
{
    fn get_in_chain<Target: StdError + 'static>(&self) -> Option<&Target> {
        chain(self).find_map(|link| link.downcast_ref::<Target>())
    }

    fn chain_contains<A>(&self, allowed: &[A]) -> bool
    where
        A: StdError + PartialEq + 'static,
    {
        chain_contains(self, allowed)
    }
}
