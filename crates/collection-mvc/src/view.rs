//! Views over the collection and its items.
//!
//! Nothing is drawn: rendering is counted and logged so that the wiring can
//! be observed.

use crate::collection::{CollectionModel, ItemHandle};
use crate::item::{Filter, Visibility};
use crate::roles::{
    CollectionObserver, Diagnostics, ItemObserver, LifecycleObserver, Outcome, Reaction,
    Renderable, Unhandled, View, observe_lifecycle, relay,
};
use event_channel::{DispatchError, EventChannel};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::info;

/// View of a single item.
pub struct ItemView {
    handle: ItemHandle,
    name: String,
    renders: Cell<usize>,
    diagnostics: Diagnostics,
}

impl ItemView {
    /// Create a view for `handle` and subscribe it to the item's channels.
    ///
    /// If the handle is already stale the view is created detached.
    pub fn attach(handle: ItemHandle, model: &CollectionModel) -> Rc<Self> {
        let item = model.get_item(handle);
        let view = Rc::new(Self {
            handle,
            name: item
                .as_ref()
                .map(|i| i.name().to_string())
                .unwrap_or_default(),
            renders: Cell::new(0),
            diagnostics: Diagnostics::default(),
        });

        if let Some(item) = item {
            observe_lifecycle(item.events(), &view);
            item.on_filter_changed()
                .subscribe(relay(&view, |v: &ItemView, vis: &Visibility| {
                    v.on_filter_changed(*vis)
                }));
        }
        view
    }

    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }
}

impl View for ItemView {
    fn label(&self) -> &'static str {
        "item-view"
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl Renderable for ItemView {
    fn render(&self) -> Reaction {
        self.renders.set(self.renders.get() + 1);
        info!(handle = %self.handle, name = %self.name, "item view rendered");
        Ok(Outcome::Handled)
    }
}

impl LifecycleObserver for ItemView {
    fn on_item_updated(&self) -> Reaction {
        self.render()
    }
}

impl ItemObserver for ItemView {
    fn on_filter_changed(&self, visibility: Visibility) -> Reaction {
        info!(handle = %self.handle, ?visibility, "item filter changed");
        self.render()
    }
}

/// View of the whole collection; keeps one [`ItemView`] per live item.
pub struct CollectionView {
    model: Weak<CollectionModel>,
    item_views: RefCell<Vec<Rc<ItemView>>>,
    renders: Cell<usize>,
    diagnostics: Diagnostics,
    on_filter_changed: EventChannel<Weak<CollectionView>, Filter>,
}

impl CollectionView {
    /// Create the view and subscribe it to `model`.
    pub fn attach(model: &Rc<CollectionModel>) -> Rc<Self> {
        let view = Rc::new_cyclic(|me| Self {
            model: Rc::downgrade(model),
            item_views: RefCell::new(Vec::new()),
            renders: Cell::new(0),
            diagnostics: Diagnostics::default(),
            on_filter_changed: EventChannel::new(me.clone()),
        });

        model
            .on_item_added()
            .subscribe(relay(&view, |v: &CollectionView, h: &ItemHandle| {
                v.on_item_added(*h)
            }));
        model
            .on_item_removed()
            .subscribe(relay(&view, |v: &CollectionView, h: &ItemHandle| {
                v.on_item_removed(*h)
            }));
        observe_lifecycle(model.events(), &view);
        view
    }

    /// Filter requests coming from the user side of the view.
    pub fn on_filter_changed(&self) -> &EventChannel<Weak<CollectionView>, Filter> {
        &self.on_filter_changed
    }

    /// Ask whoever controls the model to apply `filter`.
    pub fn request_filter(&self, filter: &Filter) -> Result<(), DispatchError> {
        self.on_filter_changed.raise(filter)
    }

    pub fn item_views(&self) -> Vec<Rc<ItemView>> {
        self.item_views.borrow().clone()
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    /// Unhandled hooks of this view and all its item views.
    pub fn unhandled(&self) -> Vec<Unhandled> {
        let mut all = self.diagnostics.unhandled();
        for item_view in self.item_views.borrow().iter() {
            all.extend(item_view.diagnostics().unhandled());
        }
        all
    }
}

impl View for CollectionView {
    fn label(&self) -> &'static str {
        "collection-view"
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl Renderable for CollectionView {
    fn render(&self) -> Reaction {
        self.renders.set(self.renders.get() + 1);
        info!(items = self.item_views.borrow().len(), "collection view rendered");
        Ok(Outcome::Handled)
    }
}

impl LifecycleObserver for CollectionView {}

impl CollectionObserver for CollectionView {
    fn on_item_added(&self, handle: ItemHandle) -> Reaction {
        let Some(model) = self.model.upgrade() else {
            return Ok(Outcome::Handled);
        };
        let item_view = ItemView::attach(handle, &model);
        self.item_views.borrow_mut().push(item_view);
        Ok(Outcome::Handled)
    }

    fn on_item_removed(&self, handle: ItemHandle) -> Reaction {
        self.item_views
            .borrow_mut()
            .retain(|item_view| item_view.handle() != handle);
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemModel;

    #[test]
    fn test_item_views_follow_collection() {
        let model = CollectionModel::new(4).unwrap();
        let view = CollectionView::attach(&model);

        let a = model.add_item(ItemModel::new("a"), false).unwrap();
        let _b = model.add_item(ItemModel::new("b"), false).unwrap();
        assert_eq!(view.item_views().len(), 2);

        model.remove_item(a, false).unwrap();
        let remaining: Vec<_> = view.item_views().iter().map(|v| v.handle()).collect();
        assert_eq!(remaining.len(), 1);
        assert!(!remaining.contains(&a));
        assert_eq!(view.renders(), 1);
    }

    #[test]
    fn test_silent_add_creates_no_item_view() {
        let model = CollectionModel::new(4).unwrap();
        let view = CollectionView::attach(&model);
        model.add_item(ItemModel::new("quiet"), true).unwrap();
        assert!(view.item_views().is_empty());
    }

    #[test]
    fn test_unimplemented_lifecycle_hooks_are_recorded() {
        let model = CollectionModel::new(1).unwrap();
        let view = CollectionView::attach(&model);
        model.events().on_loading.raise(&()).unwrap();
        model.events().on_loading.raise(&()).unwrap();
        model.events().on_processed.raise(&()).unwrap();

        assert_eq!(view.diagnostics().count("on_loading"), 2);
        assert_eq!(
            view.unhandled().last(),
            Some(&Unhandled {
                view: "collection-view",
                hook: "on_processed"
            })
        );
    }

    #[test]
    fn test_item_view_renders_on_update_and_filter() {
        let model = CollectionModel::new(2).unwrap();
        let view = CollectionView::attach(&model);
        let h = model.add_item(ItemModel::new("Gray"), false).unwrap();
        let item = model.get_item(h).unwrap();

        item.touch().unwrap();
        item.set_filter(&Filter::by_name("Gerry"), false).unwrap();

        let item_view = &view.item_views()[0];
        assert_eq!(item_view.renders(), 2);
        assert!(item_view.diagnostics().unhandled().is_empty());

        item.events().on_loaded.raise(&()).unwrap();
        assert_eq!(item_view.diagnostics().count("on_loaded"), 1);
    }

    #[test]
    fn test_dropped_view_is_inert() {
        let model = CollectionModel::new(2).unwrap();
        let view = CollectionView::attach(&model);
        drop(view);
        assert!(model.add_item(ItemModel::new("a"), false).is_ok());
    }
}
