//! Shared builders for unit tests: hand-rolled tree nodes shaped like the
//! entries found in real preset files.

use hotbarkit_nbt::{Compound, NbtFile, Tag};

use crate::format::{
    DATA_VERSION, EDITABLE_CONTAINER_ID, FIELD_BLOCK_ENTITY, FIELD_COUNT, FIELD_DATA_VERSION,
    FIELD_DISPLAY, FIELD_ID, FIELD_ITEMS, FIELD_NAME, FIELD_SLOT, FIELD_TAG,
};

/// An item-shaped compound entry.
pub fn item_node(id: &str, slot: i8, count: i8) -> Tag {
    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(slot));
    node.insert(FIELD_ID, Tag::String(id.into()));
    node.insert(FIELD_COUNT, Tag::Byte(count));
    Tag::Compound(node)
}

/// A container-shaped entry: an item carrying nested item-list metadata.
pub fn simple_container_node(id: &str, items: Vec<Tag>) -> Tag {
    let mut block_entity = Compound::new();
    block_entity.insert(FIELD_ITEMS, Tag::list_of(items));

    let mut tag = Compound::new();
    tag.insert(FIELD_BLOCK_ENTITY, Tag::Compound(block_entity));

    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(0));
    node.insert(FIELD_ID, Tag::String(id.into()));
    node.insert(FIELD_COUNT, Tag::Byte(1));
    node.insert(FIELD_TAG, Tag::Compound(tag));
    Tag::Compound(node)
}

/// An editable (barrel) root entry holding container children, with an
/// optional raw display-name string.
pub fn barrel_entry(display_name: Option<&str>, children: Vec<Tag>) -> Tag {
    let mut block_entity = Compound::new();
    block_entity.insert(FIELD_ITEMS, Tag::list_of(children));

    let mut tag = Compound::new();
    if let Some(raw) = display_name {
        let mut display = Compound::new();
        display.insert(FIELD_NAME, Tag::String(raw.into()));
        tag.insert(FIELD_DISPLAY, Tag::Compound(display));
    }
    tag.insert(FIELD_BLOCK_ENTITY, Tag::Compound(block_entity));

    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(0));
    node.insert(FIELD_ID, Tag::String(EDITABLE_CONTAINER_ID.into()));
    node.insert(FIELD_COUNT, Tag::Byte(1));
    node.insert(FIELD_TAG, Tag::Compound(tag));
    Tag::Compound(node)
}

/// A decoded file with the given root slots populated.
pub fn root_file(slots: Vec<(u8, Vec<Tag>)>) -> NbtFile {
    let mut root = Compound::new();
    for (slot, entries) in slots {
        root.insert(slot.to_string(), Tag::list_of(entries));
    }
    root.insert(FIELD_DATA_VERSION, Tag::Int(DATA_VERSION));
    NbtFile {
        name: String::new(),
        root,
        compressed: false,
    }
}
