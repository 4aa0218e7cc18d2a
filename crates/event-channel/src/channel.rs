//! Ordered synchronous event channel.

use crate::error::Result;
use crate::subscriber::Subscriber;
use std::cell::RefCell;
use tracing::trace;

/// Broadcasts payloads of type `E` on behalf of a publisher `P`.
///
/// Subscribers are called synchronously, newest first, each receiving the
/// publisher and the payload. The subscriber list may be changed from inside
/// a callback: the list is never borrowed while a subscriber runs.
///
/// # Example
///
/// ```
/// use event_channel::{EventChannel, Subscriber};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let channel: EventChannel<&str, u32> = EventChannel::new("counter");
///
/// let log = Rc::clone(&seen);
/// channel.subscribe(Subscriber::new(move |publisher: &&str, n: &u32| {
///     log.borrow_mut().push(format!("{publisher}:{n}"));
///     Ok(())
/// }));
///
/// channel.raise(&7)?;
/// assert_eq!(*seen.borrow(), vec!["counter:7".to_string()]);
/// # Ok::<(), event_channel::DispatchError>(())
/// ```
pub struct EventChannel<P, E> {
    publisher: P,
    subscribers: RefCell<Vec<Subscriber<P, E>>>,
}

impl<P, E> EventChannel<P, E> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// The value handed to every subscriber as the sender.
    #[inline]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Register `subscriber`. Registering the same subscriber twice makes
    /// it fire twice per event.
    pub fn subscribe(&self, subscriber: Subscriber<P, E>) -> bool {
        self.subscribers.borrow_mut().push(subscriber);
        true
    }

    /// Remove the most recent registration of `subscriber`.
    ///
    /// Returns false if it was not registered.
    pub fn unsubscribe(&self, subscriber: &Subscriber<P, E>) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        match subscribers.iter().rposition(|s| s.same_as(subscriber)) {
            Some(position) => {
                subscribers.remove(position);
                true
            }
            None => false,
        }
    }

    /// Call every subscriber once, most recently registered first.
    ///
    /// The cursor is clamped to the live list length before each call, so a
    /// subscriber may unsubscribe itself (or anything registered after it)
    /// without another subscriber being skipped or called twice. Subscribers
    /// added during the pass are not called by it.
    ///
    /// Removing an *older* subscriber the pass has not reached yet shifts the
    /// list under the cursor: the current subscriber is called a second time
    /// and the one just below the removed entry is skipped.
    ///
    /// The first subscriber error stops the pass and is returned.
    pub fn raise(&self, payload: &E) -> Result<()> {
        let mut cursor = self.subscribers.borrow().len();
        trace!(subscribers = cursor, "raising event");

        loop {
            let next = {
                let subscribers = self.subscribers.borrow();
                cursor = cursor.min(subscribers.len());
                if cursor == 0 {
                    break;
                }
                cursor -= 1;
                subscribers[cursor].clone()
            };
            next.call(&self.publisher, payload)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Drop every subscriber.
    pub fn clear(&self) {
        self.subscribers.borrow_mut().clear();
    }
}

impl<P: std::fmt::Debug, E> std::fmt::Debug for EventChannel<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("publisher", &self.publisher)
            .field("subscribers", &self.len())
            .finish()
    }
}
