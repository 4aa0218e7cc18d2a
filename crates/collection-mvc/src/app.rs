//! Composition root.
//!
//! Builds the model, the views and the controller wiring in a fixed order
//! and owns all of them for the lifetime of the [`App`].

use crate::collection::CollectionModel;
use crate::config::AppConfig;
use crate::error::{CollectionError, Result};
use crate::item::Filter;
use crate::roles::Unhandled;
use crate::view::CollectionView;
use event_channel::{DispatchError, Subscriber};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::info;

/// What a run of the scripted load did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub added: usize,
    pub removed: usize,
    pub live: usize,
    pub visible: Vec<String>,
    /// Whether looking up the removed item's handle failed as it should.
    /// `None` when nothing was removed.
    pub stale_lookup_rejected: Option<bool>,
    pub item_views: usize,
    pub collection_renders: usize,
    pub unhandled: Vec<Unhandled>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "added {} / removed {} / live {}",
            self.added, self.removed, self.live
        )?;
        writeln!(f, "visible: {:?}", self.visible)?;
        match self.stale_lookup_rejected {
            Some(true) => writeln!(f, "stale handle rejected")?,
            Some(false) => writeln!(f, "stale handle was accepted")?,
            None => writeln!(f, "no stale handle checked")?,
        }
        writeln!(
            f,
            "item views: {}, collection renders: {}",
            self.item_views, self.collection_renders
        )?;
        for u in &self.unhandled {
            writeln!(f, "not implemented: {}::{}", u.view, u.hook)?;
        }
        Ok(())
    }
}

pub struct App {
    config: AppConfig,
    model: Rc<CollectionModel>,
    view: Rc<CollectionView>,
}

impl App {
    /// Build model, then view, then the controller subscription from the
    /// view back to the model.
    pub fn build(config: AppConfig) -> Result<Self> {
        let model = CollectionModel::new(config.capacity)?;
        let view = CollectionView::attach(&model);
        view.on_filter_changed()
            .subscribe(apply_filter_to(Rc::downgrade(&model)));

        info!(capacity = config.capacity, "app built");
        Ok(Self {
            config,
            model,
            view,
        })
    }

    pub fn model(&self) -> &Rc<CollectionModel> {
        &self.model
    }

    pub fn view(&self) -> &Rc<CollectionView> {
        &self.view
    }

    /// Run the scripted load on the model and report what happened.
    pub fn run(&self) -> Result<RunReport> {
        let summary = self.model.load(
            self.config.names.as_slice(),
            self.config.remove_index,
            &self.config.filter,
        )?;

        let report = RunReport {
            added: summary.added,
            removed: summary.removed,
            live: self.model.len(),
            visible: self.model.visible_names(),
            stale_lookup_rejected: summary.stale_lookup_rejected,
            item_views: self.view.item_views().len(),
            collection_renders: self.view.renders(),
            unhandled: self.view.unhandled(),
        };
        info!(live = report.live, "run finished");
        Ok(report)
    }
}

/// Controller hook: filter requests from the view are applied to the model.
fn apply_filter_to(model: Weak<CollectionModel>) -> Subscriber<Weak<CollectionView>, Filter> {
    Subscriber::new(move |_: &Weak<CollectionView>, filter: &Filter| {
        let Some(model) = model.upgrade() else {
            return Ok(());
        };
        match model.filter_items(filter, false) {
            Ok(visible) => {
                info!(filter = %filter.name, visible, "filter applied");
                Ok(())
            }
            Err(CollectionError::Dispatch(err)) => Err(err),
            Err(other) => Err(DispatchError::Failed(Box::new(other))),
        }
    })
}
