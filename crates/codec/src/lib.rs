//! Preset codec: bidirectional transformation between binary hotbar
//! preset files and an editable model of presets, containers, and items.
//!
//! Parsing projects the recognized editable entries out of the tagged
//! tree; saving re-embeds the edited model into the original tree so that
//! every region the user did not touch survives unchanged (other root
//! slots, protected entries, unrecognized item metadata).

mod container;
mod edit;
mod encode;
mod error;
mod extract;
mod item;
mod model;
mod text;

pub mod format;

#[cfg(test)]
mod testutil;

pub use container::{decode_container, encode_container};
pub use edit::ui_slot_to_placement;
pub use encode::reencode;
pub use error::{CodecError, EditError};
pub use extract::extract_presets;
pub use item::{decode_item, encode_item};
pub use model::{
    Container, Diagnostic, Enchantment, HotbarData, Item, ItemTag, ParsedPresetFile, Preset,
};

pub use hotbarkit_nbt::{Compound, NbtError, NbtFile, Tag};

/// Parse a preset file from its raw bytes.
///
/// Fails only when the bytes are not a valid instance of the binary
/// format; everything past that is salvage — malformed entries are
/// skipped with diagnostics and the call succeeds, possibly with zero
/// presets.
pub fn parse_preset_file(bytes: &[u8]) -> Result<ParsedPresetFile, CodecError> {
    let raw = hotbarkit_nbt::decode(bytes).map_err(CodecError::Decode)?;
    let (data, diagnostics) = extract_presets(&raw);

    tracing::debug!(
        presets = data.presets.len(),
        skipped = diagnostics.len(),
        compressed = raw.compressed,
        "parsed preset file"
    );

    Ok(ParsedPresetFile {
        data,
        raw,
        diagnostics,
    })
}

/// Rebuild a preset file from the edited model.
///
/// `original` must be the tree retained from the most recent
/// [`parse_preset_file`] call (not from a previous rebuild); pass `None`
/// for a from-scratch export.
pub fn build_preset_file(
    data: &HotbarData,
    original: Option<&NbtFile>,
) -> Result<Vec<u8>, CodecError> {
    let rebuilt = reencode(data, original)?;
    hotbarkit_nbt::encode(&rebuilt).map_err(CodecError::Encode)
}
