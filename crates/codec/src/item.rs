//! Item projector: one item-shaped tree node to/from [`Item`].
//!
//! Decoding is deliberately permissive: a node missing its identifier
//! projects to an empty-id item (treated as absent by the UI) rather than
//! failing, and anything unrecognized under `tag` is carried through the
//! passthrough bag untouched.

use hotbarkit_nbt::{Compound, Tag};

use crate::format::{
    FIELD_COUNT, FIELD_DAMAGE, FIELD_DISPLAY, FIELD_ENCHANTMENTS, FIELD_ENCHANT_LEVEL, FIELD_ID,
    FIELD_NAME, FIELD_SLOT, FIELD_TAG,
};
use crate::model::{Enchantment, Item, ItemTag};

/// Project an item-shaped node into the typed model.
pub fn decode_item(node: &Compound) -> Item {
    let id = node
        .get(FIELD_ID)
        .and_then(Tag::as_str)
        .unwrap_or_default()
        .to_owned();

    // Absent or invalid counts default to 1; a stack never has fewer.
    let count = node
        .get(FIELD_COUNT)
        .and_then(Tag::as_int)
        .filter(|&c| c >= 1)
        .unwrap_or(1)
        .min(u8::MAX as i64) as u8;

    let slot = node
        .get(FIELD_SLOT)
        .and_then(Tag::as_int)
        .filter(|&s| (0..=u8::MAX as i64).contains(&s))
        .map(|s| s as u8);

    let tag = node
        .get(FIELD_TAG)
        .and_then(Tag::as_compound)
        .map(decode_tag)
        .filter(|t| !t.is_empty());

    Item {
        id,
        count,
        slot,
        tag,
    }
}

/// Inverse of [`decode_item`]. Field order is stable for diffability:
/// slot, id, count, then tag.
pub fn encode_item(item: &Item) -> Compound {
    let mut node = Compound::new();
    node.insert(FIELD_SLOT, Tag::Byte(item.effective_slot() as i8));
    node.insert(FIELD_ID, Tag::String(item.id.clone()));
    node.insert(FIELD_COUNT, Tag::Byte(item.count.min(i8::MAX as u8) as i8));

    if let Some(tag) = item.tag.as_ref().filter(|t| !t.is_empty()) {
        node.insert(FIELD_TAG, Tag::Compound(encode_tag(tag)));
    }

    node
}

fn decode_tag(source: &Compound) -> ItemTag {
    let mut tag = ItemTag::default();

    for (key, value) in source.iter() {
        match (key, value) {
            (FIELD_DAMAGE, v) if v.as_int().is_some() => {
                tag.damage = v.as_int().map(|d| d as i32);
            }
            (FIELD_ENCHANTMENTS, Tag::List(_, entries)) => {
                tag.enchantments = decode_enchantments(entries);
            }
            (FIELD_DISPLAY, Tag::Compound(display)) => {
                tag.display_name = display
                    .get(FIELD_NAME)
                    .and_then(Tag::as_str)
                    .map(str::to_owned);

                // Anything else under `display` (lore, color, ...) rides
                // along in the passthrough bag, minus the recognized name.
                let residue: Compound = display
                    .iter()
                    .filter(|(k, _)| *k != FIELD_NAME)
                    .map(|(k, v)| (k.to_owned(), v.clone()))
                    .collect();
                if !residue.is_empty() {
                    tag.extra.insert(FIELD_DISPLAY, Tag::Compound(residue));
                }
            }
            _ => tag.extra.insert(key, value.clone()),
        }
    }

    tag
}

fn decode_enchantments(entries: &[Tag]) -> Vec<Enchantment> {
    entries
        .iter()
        .filter_map(Tag::as_compound)
        .map(|entry| Enchantment {
            id: entry
                .get(FIELD_ID)
                .and_then(Tag::as_str)
                .unwrap_or_default()
                .to_owned(),
            level: entry
                .get(FIELD_ENCHANT_LEVEL)
                .and_then(Tag::as_int)
                .unwrap_or(1) as i16,
        })
        .collect()
}

fn encode_tag(tag: &ItemTag) -> Compound {
    let mut out = Compound::new();

    if let Some(damage) = tag.damage {
        out.insert(FIELD_DAMAGE, Tag::Int(damage));
    }

    if !tag.enchantments.is_empty() {
        let entries = tag
            .enchantments
            .iter()
            .map(|e| {
                let mut entry = Compound::new();
                entry.insert(FIELD_ID, Tag::String(e.id.clone()));
                entry.insert(FIELD_ENCHANT_LEVEL, Tag::Short(e.level));
                Tag::Compound(entry)
            })
            .collect();
        out.insert(FIELD_ENCHANTMENTS, Tag::list_of(entries));
    }

    // Passthrough entries keep their stored order; the recognized name is
    // merged back into the display residue at its original position.
    let mut display_emitted = false;
    for (key, value) in tag.extra.iter() {
        if key == FIELD_DISPLAY {
            if let Tag::Compound(residue) = value {
                out.insert(
                    FIELD_DISPLAY,
                    Tag::Compound(merged_display(tag.display_name.as_deref(), residue)),
                );
                display_emitted = true;
                continue;
            }
        }
        out.insert(key, value.clone());
    }

    if !display_emitted {
        if let Some(name) = &tag.display_name {
            let mut display = Compound::new();
            display.insert(FIELD_NAME, Tag::String(name.clone()));
            out.insert(FIELD_DISPLAY, Tag::Compound(display));
        }
    }

    out
}

fn merged_display(name: Option<&str>, residue: &Compound) -> Compound {
    let mut display = Compound::new();
    if let Some(name) = name {
        display.insert(FIELD_NAME, Tag::String(name.to_owned()));
    }
    for (k, v) in residue.iter() {
        display.insert(k, v.clone());
    }
    display
}
