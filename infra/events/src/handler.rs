use crate::event::Event;
use std::fmt;
use std::sync::Arc;

/// A cloneable reference to a subscriber callback.
///
/// Identity is reference equality: two handlers compare equal only when they
/// were cloned from the same [`Handler::new`] allocation. Two separately
/// wrapped closures with identical bodies are different handlers, so the
/// caller keeps a clone of the handler it intends to unsubscribe later.
///
/// # Examples
/// ```rust
/// use herald_event_bus::Handler;
///
/// let original = Handler::new(|_event| {});
/// let alias = original.clone();
/// let lookalike = Handler::new(|_event| {});
///
/// assert_eq!(original, alias);
/// assert_ne!(original, lookalike);
/// ```
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&Event) + Send + Sync + 'static>);

impl Handler {
    /// Wraps a callback into a shared handler reference.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invokes the callback with the dispatched event.
    #[inline]
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// Returns `true` when both references point at the same callback allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F> From<F> for Handler
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preserves_identity() {
        let handler = Handler::new(|_event| {});
        let clone = handler.clone();

        assert!(handler.ptr_eq(&clone));
        assert_eq!(handler, clone);
    }

    #[test]
    fn test_identical_bodies_are_distinct() {
        let first = Handler::new(|_event| {});
        let second = Handler::new(|_event| {});

        assert!(!first.ptr_eq(&second));
        assert_ne!(first, second);
    }
}
