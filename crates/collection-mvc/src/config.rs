//! Settings for the scripted collection load.

use crate::collection::DEFAULT_CAPACITY;
use crate::item::Filter;
use serde::Deserialize;

/// Everything [`App`](crate::App) needs to build and run.
///
/// Missing fields fall back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Slots in the collection's pool.
    pub capacity: usize,
    /// Filter applied once loading is done. Written as a plain name.
    pub filter: Filter,
    /// Items loaded, in order.
    pub names: Vec<String>,
    /// Position of the item removed again once the next item has arrived.
    pub remove_index: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            filter: Filter::by_name("Gerry"),
            names: [
                "Harold", " Mike ", "Gerald", "Gray", "Borris", "Borris", "Borris", "borris",
                "Gerry",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            remove_index: Some(2),
        }
    }
}
