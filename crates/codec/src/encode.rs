//! Preset re-encoder: rebuild root slot 0 from the edited model while
//! leaving every untouched region of the original tree unchanged.
//!
//! Re-encoding must always run against the tree captured at the most
//! recent decode, never against previously re-encoded output; that is
//! what guarantees untouched bytes survive repeated edit/save cycles.

use hotbarkit_nbt::{Compound, NbtFile, Tag};

use crate::container::encode_container;
use crate::error::CodecError;
use crate::format::{
    DATA_VERSION, EDITABLE_CONTAINER_ID, EMPTY_ID, EXTRA_DATA_MARKER, FIELD_BLOCK_ENTITY,
    FIELD_COUNT, FIELD_CUSTOM_NAME, FIELD_DATA_VERSION, FIELD_DISPLAY, FIELD_ID, FIELD_ITEMS,
    FIELD_LORE, FIELD_NAME, FIELD_SLOT, FIELD_TAG, ROOT_LIST_LEN, ROOT_SLOT_COUNT,
};
use crate::model::{HotbarData, Preset};
use crate::text;

/// Rebuild the tree for the edited model.
///
/// With an original tree, only root slot `"0"` is replaced: freshly built
/// editable entries first, then every originally-present protected entry
/// in its original relative order. Without one (a from-scratch export),
/// a placeholder baseline is synthesized.
pub fn reencode(data: &HotbarData, original: Option<&NbtFile>) -> Result<NbtFile, CodecError> {
    if let Some(preset) = data.presets.iter().find(|p| p.slot != 0) {
        return Err(CodecError::UnsupportedRootSlot(preset.slot));
    }

    let built: Vec<Tag> = data
        .presets
        .iter()
        .enumerate()
        .map(|(position, preset)| Tag::Compound(encode_preset_entry(preset, position)))
        .collect();

    match original {
        Some(original) => {
            let mut root = original.root.clone();

            let mut entries = built;
            entries.extend(protected_entries(&original.root));
            root.insert("0", Tag::list_of(entries));

            Ok(NbtFile {
                name: original.name.clone(),
                root,
                compressed: original.compressed,
            })
        }
        None => Ok(from_scratch(built)),
    }
}

/// Build one editable root entry for a preset at the given list position.
fn encode_preset_entry(preset: &Preset, position: usize) -> Compound {
    for (index, container) in preset.containers.iter().enumerate() {
        warn_slot_collisions(&preset.name, index, container);
    }

    let name_json = text::wrap_text(&preset.name);

    let mut display = Compound::new();
    display.insert(FIELD_NAME, Tag::String(name_json.clone()));
    display.insert(
        FIELD_LORE,
        Tag::list_of(vec![Tag::String(EXTRA_DATA_MARKER.into())]),
    );

    let children: Vec<Tag> = preset
        .containers
        .iter()
        .enumerate()
        .map(|(index, container)| Tag::Compound(encode_container(container, index)))
        .collect();

    // The consuming system reads the name from both places.
    let mut block_entity = Compound::new();
    block_entity.insert(FIELD_CUSTOM_NAME, Tag::String(name_json));
    block_entity.insert(FIELD_ITEMS, Tag::list_of(children));

    let mut tag = Compound::new();
    tag.insert(FIELD_DISPLAY, Tag::Compound(display));
    tag.insert(FIELD_BLOCK_ENTITY, Tag::Compound(block_entity));

    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(position as i8));
    node.insert(FIELD_ID, Tag::String(EDITABLE_CONTAINER_ID.into()));
    node.insert(FIELD_COUNT, Tag::Byte(1));
    node.insert(FIELD_TAG, Tag::Compound(tag));
    node
}

/// Everything in the original root slot 0 that is neither an editable
/// entry nor the empty sentinel, in original relative order. Entries with
/// no identifier count as protected.
fn protected_entries(root: &Compound) -> Vec<Tag> {
    let Some(entries) = root.get("0").and_then(Tag::as_list) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| {
            let id = entry
                .as_compound()
                .and_then(|node| node.get(FIELD_ID))
                .and_then(Tag::as_str);
            match id {
                Some(id) => id != EDITABLE_CONTAINER_ID && id != EMPTY_ID,
                None => true,
            }
        })
        .cloned()
        .collect()
}

/// Baseline for an export with no prior decode: each root slot is a full
/// placeholder list of empty sentinels, with the built entries overlaid
/// onto the front of slot 0.
fn from_scratch(built: Vec<Tag>) -> NbtFile {
    let mut root = Compound::new();

    for root_slot in 0..ROOT_SLOT_COUNT {
        let mut entries: Vec<Tag> = (0..ROOT_LIST_LEN).map(placeholder_entry).collect();
        if root_slot == 0 {
            for (position, entry) in built.iter().enumerate() {
                if position < entries.len() {
                    entries[position] = entry.clone();
                } else {
                    entries.push(entry.clone());
                }
            }
        }
        root.insert(root_slot.to_string(), Tag::list_of(entries));
    }
    root.insert(FIELD_DATA_VERSION, Tag::Int(DATA_VERSION));

    NbtFile {
        name: String::new(),
        root,
        compressed: false,
    }
}

fn placeholder_entry(position: usize) -> Tag {
    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(position as i8));
    node.insert(FIELD_ID, Tag::String(EMPTY_ID.into()));
    node.insert(FIELD_COUNT, Tag::Byte(1));
    Tag::Compound(node)
}

/// Two items claiming one slot is not auto-resolved (last write wins by
/// list order); it is surfaced so the caller can warn the user.
fn warn_slot_collisions(preset_name: &str, container_index: usize, container: &crate::model::Container) {
    let mut seen = std::collections::BTreeMap::new();
    for item in &container.items {
        if let Some(previous) = seen.insert(item.effective_slot(), &item.id) {
            tracing::warn!(
                preset = preset_name,
                container = container_index,
                slot = item.effective_slot(),
                first = %previous,
                second = %item.id,
                "slot collision in rebuilt container; last write wins"
            );
        }
    }
}
