//! Lifecycle channels shared by every model.

use event_channel::EventChannel;
use std::cell::Cell;

/// The load/process notifications every model publishes.
pub struct LifecycleEvents<P> {
    pub on_loading: EventChannel<P, ()>,
    pub on_loaded: EventChannel<P, ()>,
    pub on_processing: EventChannel<P, ()>,
    pub on_processed: EventChannel<P, ()>,
    pub on_item_updated: EventChannel<P, ()>,
    initialised: Cell<bool>,
}

impl<P: Clone> LifecycleEvents<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            on_loading: EventChannel::new(publisher.clone()),
            on_loaded: EventChannel::new(publisher.clone()),
            on_processing: EventChannel::new(publisher.clone()),
            on_processed: EventChannel::new(publisher.clone()),
            on_item_updated: EventChannel::new(publisher),
            initialised: Cell::new(false),
        }
    }
}

impl<P> LifecycleEvents<P> {
    /// True once the owning model has finished its first load.
    pub fn is_initialised(&self) -> bool {
        self.initialised.get()
    }

    pub(crate) fn mark_initialised(&self) {
        self.initialised.set(true);
    }
}
