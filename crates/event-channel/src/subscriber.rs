//! Subscriber callables.

use crate::error::Result;
use std::rc::Rc;

type Callback<P, E> = dyn Fn(&P, &E) -> Result<()>;

/// A callable registered on an [`EventChannel`](crate::EventChannel).
///
/// Cloning a subscriber is cheap and keeps its identity: the clone can be
/// used to unsubscribe the original. Two subscribers built from the same
/// closure separately are different subscribers.
pub struct Subscriber<P, E> {
    callback: Rc<Callback<P, E>>,
}

impl<P, E> Subscriber<P, E> {
    pub fn new(callback: impl Fn(&P, &E) -> Result<()> + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Identity comparison.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    #[inline]
    pub(crate) fn call(&self, publisher: &P, payload: &E) -> Result<()> {
        (self.callback)(publisher, payload)
    }
}

impl<P, E> Clone for Subscriber<P, E> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<P, E> std::fmt::Debug for Subscriber<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
