//! Observer roles and the glue that subscribes them to channels.
//!
//! Each role is a trait whose hooks default to [`Outcome::NotImplemented`].
//! Views implement the hooks they care about; the rest are reported through
//! their [`Diagnostics`] instead of being printed.

use crate::collection::ItemHandle;
use crate::events::LifecycleEvents;
use crate::item::Visibility;
use event_channel::{DispatchError, EventChannel, Subscriber};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// What a hook did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// The hook has no behaviour for this view; carries the hook name.
    NotImplemented(&'static str),
}

pub type Reaction = Result<Outcome, DispatchError>;

/// A hook that fell through to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unhandled {
    pub view: &'static str,
    pub hook: &'static str,
}

/// Per-view record of hooks that were not implemented.
#[derive(Debug, Default)]
pub struct Diagnostics {
    unhandled: RefCell<Vec<Unhandled>>,
}

impl Diagnostics {
    pub fn record(&self, view: &'static str, outcome: Outcome) {
        if let Outcome::NotImplemented(hook) = outcome {
            debug!(view, hook, "hook not implemented");
            self.unhandled.borrow_mut().push(Unhandled { view, hook });
        }
    }

    pub fn unhandled(&self) -> Vec<Unhandled> {
        self.unhandled.borrow().clone()
    }

    /// How many times `hook` fell through.
    pub fn count(&self, hook: &str) -> usize {
        self.unhandled
            .borrow()
            .iter()
            .filter(|u| u.hook == hook)
            .count()
    }
}

/// Anything that observes models.
pub trait View {
    fn label(&self) -> &'static str;
    fn diagnostics(&self) -> &Diagnostics;
}

pub trait Renderable {
    fn render(&self) -> Reaction {
        Ok(Outcome::NotImplemented("render"))
    }
}

pub trait LifecycleObserver {
    fn on_loading(&self) -> Reaction {
        Ok(Outcome::NotImplemented("on_loading"))
    }

    fn on_loaded(&self) -> Reaction {
        Ok(Outcome::NotImplemented("on_loaded"))
    }

    fn on_processing(&self) -> Reaction {
        Ok(Outcome::NotImplemented("on_processing"))
    }

    fn on_processed(&self) -> Reaction {
        Ok(Outcome::NotImplemented("on_processed"))
    }

    fn on_item_updated(&self) -> Reaction {
        Ok(Outcome::NotImplemented("on_item_updated"))
    }
}

pub trait CollectionObserver {
    fn on_item_added(&self, _handle: ItemHandle) -> Reaction {
        Ok(Outcome::NotImplemented("on_item_added"))
    }

    fn on_item_removed(&self, _handle: ItemHandle) -> Reaction {
        Ok(Outcome::NotImplemented("on_item_removed"))
    }
}

pub trait ItemObserver {
    fn on_filter_changed(&self, _visibility: Visibility) -> Reaction {
        Ok(Outcome::NotImplemented("on_filter_changed"))
    }
}

/// Build a subscriber that forwards to `hook` on `view` and records the
/// outcome. Holds the view weakly; once the view is gone the subscriber does
/// nothing.
pub fn relay<P, E, V>(view: &Rc<V>, hook: fn(&V, &E) -> Reaction) -> Subscriber<P, E>
where
    P: 'static,
    E: 'static,
    V: View + 'static,
{
    let view: Weak<V> = Rc::downgrade(view);
    Subscriber::new(move |_: &P, payload: &E| {
        let Some(view) = view.upgrade() else {
            return Ok(());
        };
        let outcome = hook(&*view, payload)?;
        view.diagnostics().record(view.label(), outcome);
        Ok(())
    })
}

/// Subscribe all lifecycle hooks of `view` to `events`.
pub fn observe_lifecycle<P, V>(events: &LifecycleEvents<P>, view: &Rc<V>)
where
    P: 'static,
    V: View + LifecycleObserver + 'static,
{
    let pairs: [(&EventChannel<P, ()>, fn(&V, &()) -> Reaction); 5] = [
        (&events.on_loading, |v, _| v.on_loading()),
        (&events.on_loaded, |v, _| v.on_loaded()),
        (&events.on_processing, |v, _| v.on_processing()),
        (&events.on_processed, |v, _| v.on_processed()),
        (&events.on_item_updated, |v, _| v.on_item_updated()),
    ];
    for (channel, hook) in pairs {
        channel.subscribe(relay(view, hook));
    }
}
