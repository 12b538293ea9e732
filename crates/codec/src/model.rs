//! Editable domain model projected out of a preset file.

use hotbarkit_nbt::{Compound, NbtFile};
use serde::{Deserialize, Serialize};

use crate::format;

/// One stack of a game object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque namespaced identifier, e.g. `"minecraft:compass"`. Empty
    /// means the source node had no identifier; the UI treats such items
    /// as absent.
    pub id: String,
    /// Stack size, at least 1.
    pub count: u8,
    /// Position within the owning container; absent means position 0.
    pub slot: Option<u8>,
    /// Optional metadata. `None` and an all-empty tag encode identically
    /// (no `tag` node is emitted).
    pub tag: Option<ItemTag>,
}

impl Item {
    pub fn new(id: impl Into<String>, count: u8) -> Self {
        Self {
            id: id.into(),
            count,
            slot: None,
            tag: None,
        }
    }

    pub fn with_slot(mut self, slot: u8) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Slot this item occupies, defaulting to 0 when unset.
    pub fn effective_slot(&self) -> u8 {
        self.slot.unwrap_or(0)
    }

    /// True for the designated empty-slot sentinel or a missing identifier.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() || self.id == format::EMPTY_ID
    }
}

/// Recognized item metadata plus a verbatim passthrough bag.
///
/// Everything under the source `tag` compound that is not one of the
/// recognized fields is kept in `extra` untouched, so a full edit/save
/// cycle cannot destroy metadata the editor does not understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTag {
    pub damage: Option<i32>,
    pub enchantments: Vec<Enchantment>,
    /// Raw display-name string as stored in the file (usually JSON text).
    pub display_name: Option<String>,
    /// Unrecognized metadata, preserved byte-for-byte across a round trip.
    pub extra: Compound,
}

impl ItemTag {
    /// True when no recognized field is set and the passthrough bag is
    /// empty; such a tag is not emitted at all.
    pub fn is_empty(&self) -> bool {
        self.damage.is_none()
            && self.enchantments.is_empty()
            && self.display_name.is_none()
            && self.extra.is_empty()
    }
}

/// One enchantment entry under an item's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    pub id: String,
    pub level: i16,
}

/// One storage object nested inside a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    /// Plain-text display label (JSON wrapping already removed).
    pub name: Option<String>,
    /// Items in insertion order, not slot order.
    pub items: Vec<Item>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            items: Vec::new(),
        }
    }

    /// Item occupying the given slot, if any.
    pub fn item_at(&self, slot: u8) -> Option<&Item> {
        self.items.iter().find(|i| i.effective_slot() == slot)
    }
}

/// One named, user-editable bundle of containers.
///
/// By convention container 0 holds the hotbar role and container 1 the
/// main-inventory role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    /// Root position this preset was read from (0-8). Only slot 0 is
    /// editable; other slots are read-only passthrough.
    pub slot: u8,
    pub containers: Vec<Container>,
}

/// Top-level editable result: the presets projected from a file.
///
/// Protected root entries and root slots 1-8 are not part of this model;
/// they live only in the retained original tree used at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotbarData {
    pub presets: Vec<Preset>,
}

/// A note about a node the extractor skipped instead of failing on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Where in the tree the node sat, e.g. `"root slot 0, entry 2"`.
    pub location: String,
    pub reason: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

/// Result of parsing a preset file: the editable model, the retained
/// original tree (required at save time to keep untouched regions
/// untouched), and any skipped-node diagnostics.
#[derive(Debug, Clone)]
pub struct ParsedPresetFile {
    pub data: HotbarData,
    pub raw: NbtFile,
    pub diagnostics: Vec<Diagnostic>,
}
