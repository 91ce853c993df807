//! Static catalog of playable Adzan recordings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable recording.
///
/// The `id` is generated at construction, so two items with identical text
/// (or the same underlying asset) are still distinct catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableItem {
    id: Uuid,
    display_name: String,
    location_label: String,
    audio_asset_id: String,
}

impl PlayableItem {
    pub fn new(
        display_name: impl Into<String>,
        location_label: impl Into<String>,
        audio_asset_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            location_label: location_label.into(),
            audio_asset_id: audio_asset_id.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    pub fn audio_asset_id(&self) -> &str {
        &self.audio_asset_id
    }
}

/// Config-file form of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub location: String,
    pub asset: String,
}

impl CatalogEntry {
    pub fn new(name: &str, location: &str, asset: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            asset: asset.to_string(),
        }
    }
}

/// The bundled recordings. Both share the `mekkah` asset.
pub fn default_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Adzan Mekkah", "Mekkah", "mekkah"),
        CatalogEntry::new("Adzan Cianjur", "Cianjur", "mekkah"),
    ]
}

/// Fixed, ordered list of items. Insertion order is display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<PlayableItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_entries(&default_entries())
    }
}

impl Catalog {
    pub fn new(items: Vec<PlayableItem>) -> Self {
        Self { items }
    }

    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let items = entries
            .iter()
            .map(|e| PlayableItem::new(&e.name, &e.location, &e.asset))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Safe indexed lookup; `None` outside the catalog bounds.
    pub fn get(&self, index: usize) -> Option<&PlayableItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayableItem> {
        self.items.iter()
    }
}
