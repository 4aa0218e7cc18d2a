//! Individual collection entries.

use crate::events::LifecycleEvents;
use event_channel::{DispatchError, EventChannel};
use serde::Deserialize;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Attributes an item is matched against.
///
/// Deserializes from a bare name string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    pub name: String,
}

impl Filter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Exact, case-sensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

impl From<&str> for Filter {
    fn from(name: &str) -> Self {
        Self::by_name(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    fn from_flag(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}

/// A named entry that can be shown or hidden by a [`Filter`].
///
/// Items are created behind an `Rc` so their channels can name the item
/// itself as publisher without keeping it alive.
pub struct ItemModel {
    name: String,
    visible: Cell<bool>,
    events: LifecycleEvents<Weak<ItemModel>>,
    on_filter_changed: EventChannel<Weak<ItemModel>, Visibility>,
}

impl ItemModel {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        let name = name.into();
        Rc::new_cyclic(|me| Self {
            name,
            visible: Cell::new(true),
            events: LifecycleEvents::new(me.clone()),
            on_filter_changed: EventChannel::new(me.clone()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_flag(self.visible.get())
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn events(&self) -> &LifecycleEvents<Weak<ItemModel>> {
        &self.events
    }

    pub fn on_filter_changed(&self) -> &EventChannel<Weak<ItemModel>, Visibility> {
        &self.on_filter_changed
    }

    /// Show the item iff `filter` matches its name.
    ///
    /// Raises `on_filter_changed` when the visibility flipped, unless
    /// `prevent_event` is set. Returns whether it flipped.
    pub fn set_filter(
        &self,
        filter: &Filter,
        prevent_event: bool,
    ) -> Result<bool, DispatchError> {
        let was_visible = self.visible.get();
        let visible = filter.matches(&self.name);
        if visible {
            debug!(name = %self.name, "filter matched on name");
        }
        self.visible.set(visible);

        let changed = was_visible != visible;
        if changed && !prevent_event {
            self.on_filter_changed.raise(&self.visibility())?;
        }
        Ok(changed)
    }

    /// Tell observers the item's content changed.
    pub fn touch(&self) -> Result<(), DispatchError> {
        self.events.on_item_updated.raise(&())
    }
}

impl std::fmt::Debug for ItemModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemModel")
            .field("name", &self.name)
            .field("visible", &self.visible.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_channel::Subscriber;
    use std::cell::RefCell;

    #[test]
    fn test_filter_is_exact_match() {
        let filter = Filter::by_name("Borris");
        assert!(filter.matches("Borris"));
        assert!(!filter.matches("borris"));
        assert!(!filter.matches(" Borris "));
    }

    #[test]
    fn test_set_filter_raises_only_on_change() {
        let item = ItemModel::new("Gerry");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        item.on_filter_changed()
            .subscribe(Subscriber::new(move |sender: &Weak<ItemModel>, v: &Visibility| {
                let name = sender.upgrade().map(|m| m.name().to_string());
                sink.borrow_mut().push((name, *v));
                Ok(())
            }));

        assert!(!item.set_filter(&Filter::by_name("Gerry"), false).unwrap());
        assert!(item.set_filter(&Filter::by_name("Gray"), false).unwrap());
        assert!(!item.set_filter(&Filter::by_name("Gray"), false).unwrap());

        assert_eq!(
            *seen.borrow(),
            vec![(Some("Gerry".to_string()), Visibility::Hidden)]
        );
    }

    #[test]
    fn test_prevent_event_still_updates_state() {
        let item = ItemModel::new("Mike");
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        item.on_filter_changed()
            .subscribe(Subscriber::new(move |_: &Weak<ItemModel>, _: &Visibility| {
                count.set(count.get() + 1);
                Ok(())
            }));

        assert!(item.set_filter(&Filter::by_name("Harold"), true).unwrap());
        assert!(!item.is_visible());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_publisher_does_not_keep_item_alive() {
        let item = ItemModel::new("Gray");
        let publisher = item.on_filter_changed().publisher().clone();
        drop(item);
        assert!(publisher.upgrade().is_none());
    }
}
