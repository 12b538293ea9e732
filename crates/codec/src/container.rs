//! Container projector: one container-shaped tree node to/from
//! [`Container`].
//!
//! The presence of nested item-list metadata is what distinguishes "a
//! barrel holding a chest full of items" from "a barrel holding a sword":
//! a node without it is a simple item and projects to `None`.

use hotbarkit_nbt::{Compound, Tag};

use crate::format::{
    DOUBLE_CHEST_CAPACITY, EXTRA_DATA_MARKER, FIELD_BLOCK_ENTITY, FIELD_COUNT, FIELD_DISPLAY,
    FIELD_ID, FIELD_ITEMS, FIELD_LORE, FIELD_NAME, FIELD_SLOT, FIELD_TAG,
};
use crate::item::{decode_item, encode_item};
use crate::model::Container;
use crate::text;

/// Project a container-shaped node, or `None` when the node carries no
/// nested item list.
pub fn decode_container(node: &Compound) -> Option<Container> {
    let tag = node.get(FIELD_TAG)?.as_compound()?;
    let block_entity = tag.get(FIELD_BLOCK_ENTITY)?.as_compound()?;
    let item_nodes = block_entity.get(FIELD_ITEMS)?.as_list()?;

    let id = node
        .get(FIELD_ID)
        .and_then(Tag::as_str)
        .unwrap_or_default()
        .to_owned();

    let name = tag
        .get(FIELD_DISPLAY)
        .and_then(Tag::as_compound)
        .and_then(|display| display.get(FIELD_NAME))
        .and_then(Tag::as_str)
        .map(text::display_name);

    // Sentinel-empty entries are absence, not zero-value items.
    let items: Vec<_> = item_nodes
        .iter()
        .filter_map(Tag::as_compound)
        .map(decode_item)
        .filter(|item| !item.is_empty())
        .collect();

    for item in &items {
        if item.effective_slot() >= DOUBLE_CHEST_CAPACITY {
            tracing::warn!(
                container = %id,
                item = %item.id,
                slot = item.effective_slot(),
                "item slot exceeds any known container capacity"
            );
        }
    }

    Some(Container { id, name, items })
}

/// Rebuild the container wrapper; `index` becomes the wrapper's slot in
/// its parent list.
pub fn encode_container(container: &Container, index: usize) -> Compound {
    let mut display = Compound::new();
    if let Some(name) = &container.name {
        display.insert(FIELD_NAME, Tag::String(text::wrap_text(name)));
    }
    display.insert(
        FIELD_LORE,
        Tag::list_of(vec![Tag::String(EXTRA_DATA_MARKER.into())]),
    );

    let items = container.items.iter().map(encode_item).collect::<Vec<_>>();

    let mut block_entity = Compound::new();
    block_entity.insert(
        FIELD_ITEMS,
        Tag::list_of(items.into_iter().map(Tag::Compound).collect()),
    );

    let mut tag = Compound::new();
    tag.insert(FIELD_DISPLAY, Tag::Compound(display));
    tag.insert(FIELD_BLOCK_ENTITY, Tag::Compound(block_entity));

    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(index as i8));
    node.insert(FIELD_ID, Tag::String(container.id.clone()));
    node.insert(FIELD_COUNT, Tag::Byte(1));
    node.insert(FIELD_TAG, Tag::Compound(tag));
    node
}
