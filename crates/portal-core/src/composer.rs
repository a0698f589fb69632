//! Presentation Composer
//!
//! Turns a visible capability list into category groups of tiles. Holds no
//! navigation state; activating a tile goes straight to the dispatcher.

use crate::capability::CapabilityId;
use crate::catalog::{Category, Descriptor};
use crate::dispatcher::Dispatcher;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::task::JoinHandle;

/// Selectable tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile<'a> {
    pub name: CapabilityId,
    pub title: &'a str,
    pub short_description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_description: Option<&'a str>,
    pub icon: &'a str,
}

impl<'a> Tile<'a> {
    fn from_descriptor(d: &'a Descriptor) -> Self {
        Self {
            name: d.name,
            title: &d.display.title,
            short_description: &d.display.short_description,
            localized_description: d.display.localized_description.as_deref(),
            icon: &d.display.icon,
        }
    }

    /// Open this tile's capability
    pub fn activate(&self, dispatcher: &Dispatcher) -> Option<JoinHandle<()>> {
        dispatcher.select(self.name.as_str())
    }
}

/// Tiles of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileGroup<'a> {
    pub category: Category,
    pub title: &'static str,
    pub tiles: Vec<Tile<'a>>,
}

/// Case-insensitive match on title and descriptions
fn matches(d: &Descriptor, needle: &str) -> bool {
    let display = &d.display;
    display.title.to_lowercase().contains(needle)
        || display.short_description.to_lowercase().contains(needle)
        || display
            .localized_description
            .as_ref()
            .is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Filter by free-text query. A blank query returns the list unchanged.
pub fn search<'a>(visible: &[&'a Descriptor], query: &str) -> Vec<&'a Descriptor> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return visible.to_vec();
    }

    visible
        .iter()
        .copied()
        .filter(|d| matches(d, &needle))
        .collect()
}

/// Search, then group by category in declaration order, dropping empty groups
pub fn compose<'a>(visible: &[&'a Descriptor], query: &str) -> Vec<TileGroup<'a>> {
    let mut groups: BTreeMap<Category, Vec<Tile<'a>>> = BTreeMap::new();
    for d in search(visible, query) {
        groups.entry(d.category).or_default().push(Tile::from_descriptor(d));
    }

    groups
        .into_iter()
        .map(|(category, tiles)| TileGroup {
            category,
            title: category.title(),
            tiles,
        })
        .collect()
}
