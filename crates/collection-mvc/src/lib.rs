//! # Collection-MVC
//!
//! A collection model whose items live in a [`slot_pool::SlotPool`] and are
//! addressed by handles, observed by views through
//! [`event_channel::EventChannel`]s.
//!
//! - [`CollectionModel`] / [`ItemModel`] publish lifecycle, add/remove and
//!   filter events with typed payloads
//! - Views implement role traits ([`Renderable`], [`LifecycleObserver`],
//!   [`CollectionObserver`], [`ItemObserver`]); hooks they leave out are
//!   reported as [`Outcome::NotImplemented`]
//! - [`App`] is the composition root that wires everything and runs the
//!   scripted load

mod app;
mod collection;
mod config;
mod error;
mod events;
mod item;
pub mod roles;
mod view;

pub use app::{App, RunReport};
pub use collection::{CollectionModel, DEFAULT_CAPACITY, ItemHandle, LoadSummary};
pub use config::AppConfig;
pub use error::{CollectionError, Result};
pub use events::LifecycleEvents;
pub use item::{Filter, ItemModel, Visibility};
pub use roles::{
    CollectionObserver, Diagnostics, ItemObserver, LifecycleObserver, Outcome, Renderable,
    Unhandled, View,
};
pub use view::{CollectionView, ItemView};
