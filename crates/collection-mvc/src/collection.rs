//! Collection model backed by a slot pool.

use crate::error::{CollectionError, Result};
use crate::events::LifecycleEvents;
use crate::item::{Filter, ItemModel};
use event_channel::EventChannel;
use slot_pool::{Handle, PoolError, SlotPool};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

/// Handle to an item stored in a [`CollectionModel`].
pub type ItemHandle = Handle<Rc<ItemModel>>;

/// Default number of items a collection can hold.
pub const DEFAULT_CAPACITY: usize = 128;

/// What one [`CollectionModel::load`] pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: usize,
    pub removed: usize,
    /// Whether looking up the removed item's handle failed as it should.
    /// `None` when nothing was removed.
    pub stale_lookup_rejected: Option<bool>,
    /// Items left visible by the final filter.
    pub visible: usize,
}

/// An ordered set of [`ItemModel`]s addressed by [`ItemHandle`]s.
///
/// No internal borrow is held while an event is raised, so subscribers may
/// call back into the collection.
pub struct CollectionModel {
    items: RefCell<SlotPool<Rc<ItemModel>>>,
    /// Live handles in insertion order.
    order: RefCell<Vec<ItemHandle>>,
    events: LifecycleEvents<Weak<CollectionModel>>,
    on_item_added: EventChannel<Weak<CollectionModel>, ItemHandle>,
    on_item_removed: EventChannel<Weak<CollectionModel>, ItemHandle>,
}

impl CollectionModel {
    pub fn new(capacity: usize) -> Result<Rc<Self>> {
        let items = SlotPool::new(capacity)?;
        Ok(Rc::new_cyclic(|me| Self {
            items: RefCell::new(items),
            order: RefCell::new(Vec::new()),
            events: LifecycleEvents::new(me.clone()),
            on_item_added: EventChannel::new(me.clone()),
            on_item_removed: EventChannel::new(me.clone()),
        }))
    }

    pub fn events(&self) -> &LifecycleEvents<Weak<CollectionModel>> {
        &self.events
    }

    pub fn on_item_added(&self) -> &EventChannel<Weak<CollectionModel>, ItemHandle> {
        &self.on_item_added
    }

    pub fn on_item_removed(&self) -> &EventChannel<Weak<CollectionModel>, ItemHandle> {
        &self.on_item_removed
    }

    pub fn capacity(&self) -> usize {
        self.items.borrow().capacity()
    }

    pub fn len(&self) -> usize {
        self.order.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.borrow().is_empty()
    }

    /// Live handles, oldest first.
    pub fn handles(&self) -> Vec<ItemHandle> {
        self.order.borrow().clone()
    }

    /// Store `item` and announce it on `on_item_added` unless `prevent_event`.
    pub fn add_item(&self, item: Rc<ItemModel>, prevent_event: bool) -> Result<ItemHandle> {
        let handle = {
            let mut items = self.items.borrow_mut();
            let name = item.name().to_string();
            let handle = items.insert(item).map_err(|err| match err {
                PoolError::PoolExhausted { capacity } => CollectionError::Full { capacity },
                other => CollectionError::Pool(other),
            })?;
            debug!(%handle, %name, "item added");
            handle
        };
        self.order.borrow_mut().push(handle);

        if !prevent_event {
            self.on_item_added.raise(&handle)?;
        }
        Ok(handle)
    }

    /// The item behind `handle`, or `None` once it has been removed.
    pub fn get_item(&self, handle: ItemHandle) -> Option<Rc<ItemModel>> {
        self.items.borrow().get(&handle).cloned()
    }

    /// Release `handle` and announce it on `on_item_removed` unless
    /// `prevent_event`.
    ///
    /// The announcement goes out even when the handle was already stale, so
    /// observers holding on to it can drop their state.
    pub fn remove_item(
        &self,
        handle: ItemHandle,
        prevent_event: bool,
    ) -> Result<Option<Rc<ItemModel>>> {
        let removed = self.items.borrow_mut().release(handle);
        {
            let mut order = self.order.borrow_mut();
            if let Some(position) = order.iter().position(|h| *h == handle) {
                order.remove(position);
            }
        }
        debug!(%handle, found = removed.is_some(), "item removed");

        if !prevent_event {
            self.on_item_removed.raise(&handle)?;
        }
        Ok(removed)
    }

    /// Apply `filter` to every item, newest first. Returns the number of
    /// items left visible.
    pub fn filter_items(&self, filter: &Filter, prevent_event: bool) -> Result<usize> {
        let mut visible = 0;
        for handle in self.handles().into_iter().rev() {
            let Some(item) = self.get_item(handle) else {
                continue;
            };
            item.set_filter(filter, prevent_event)?;
            if item.is_visible() {
                visible += 1;
            }
        }
        Ok(visible)
    }

    /// Items currently passing the last filter, oldest first.
    pub fn visible_names(&self) -> Vec<String> {
        self.handles()
            .into_iter()
            .filter_map(|h| self.get_item(h))
            .filter(|item| item.is_visible())
            .map(|item| item.name().to_string())
            .collect()
    }

    /// Fetch every item: the full load sequence.
    ///
    /// Raises `on_loading`, `on_loaded` and `on_processing`, then adds the
    /// names in order. The item at `remove_index` is removed again once the
    /// next item has arrived (or after the last add) and its handle is looked
    /// up once more, which must fail. Ends with `on_processed`, marks the
    /// model initialised and applies `filter`.
    pub fn load<S: AsRef<str>>(
        &self,
        names: &[S],
        remove_index: Option<usize>,
        filter: &Filter,
    ) -> Result<LoadSummary> {
        self.events.on_loading.raise(&())?;
        // The data arrives synchronously.
        self.events.on_loaded.raise(&())?;
        self.events.on_processing.raise(&())?;

        let mut added = 0;
        let mut removed = 0;
        let mut pending: Option<ItemHandle> = None;
        let mut stale: Option<ItemHandle> = None;

        for (i, name) in names.iter().enumerate() {
            let handle = self.add_item(ItemModel::new(name.as_ref()), false)?;
            added += 1;
            if let Some(old) = pending.take() {
                self.remove_item(old, false)?;
                removed += 1;
                stale = Some(old);
            }
            if remove_index == Some(i) {
                pending = Some(handle);
            }
        }
        if let Some(old) = pending.take() {
            self.remove_item(old, false)?;
            removed += 1;
            stale = Some(old);
        }

        let stale_lookup_rejected = stale.map(|h| self.get_item(h).is_none());

        self.events.on_processed.raise(&())?;
        self.events.mark_initialised();

        let visible = self.filter_items(filter, false)?;
        info!(added, removed, visible, "load finished");
        Ok(LoadSummary {
            added,
            removed,
            stale_lookup_rejected,
            visible,
        })
    }
}

impl std::fmt::Debug for CollectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionModel")
            .field("items", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
