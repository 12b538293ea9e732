//! Preset extractor: scan the root structure for editable entries.
//!
//! The scan is salvage-oriented: a corrupt or foreign file yields as many
//! valid presets as can be recovered, never a hard failure. Nodes that do
//! not match the expected shape are skipped; skips that lose potential
//! data are recorded as diagnostics alongside the model.

use hotbarkit_nbt::{NbtFile, Tag};

use crate::container::decode_container;
use crate::format::{
    EDITABLE_CONTAINER_ID, EMPTY_ID, FIELD_BLOCK_ENTITY, FIELD_DISPLAY, FIELD_ID, FIELD_ITEMS,
    FIELD_NAME, FIELD_TAG, ROOT_SLOT_COUNT,
};
use crate::model::{Container, Diagnostic, HotbarData, Preset};
use crate::text;

/// Scan root slots 0-8 and project every recognized editable entry into a
/// [`Preset`]. Protected and empty entries stay behind in the tree.
pub fn extract_presets(file: &NbtFile) -> (HotbarData, Vec<Diagnostic>) {
    let mut presets = Vec::new();
    let mut diagnostics = Vec::new();

    for root_slot in 0..ROOT_SLOT_COUNT {
        let key = root_slot.to_string();
        let Some(value) = file.root.get(&key) else {
            continue;
        };

        let entries = match value.as_list() {
            Some(entries) if !entries.is_empty() => entries,
            Some(_) => continue,
            None => {
                diagnostics.push(Diagnostic {
                    location: format!("root slot {root_slot}"),
                    reason: "expected a list of entries".into(),
                });
                continue;
            }
        };

        for (position, entry) in entries.iter().enumerate() {
            let location = format!("root slot {root_slot}, entry {position}");

            let Some(node) = entry.as_compound() else {
                diagnostics.push(Diagnostic {
                    location,
                    reason: "entry is not a compound".into(),
                });
                continue;
            };

            let id = node.get(FIELD_ID).and_then(Tag::as_str).unwrap_or_default();
            if id.is_empty() || id == EMPTY_ID {
                continue;
            }
            if id != EDITABLE_CONTAINER_ID {
                // Protected object: retained in the tree, never surfaced.
                tracing::debug!(%location, %id, "protected entry retained as passthrough");
                continue;
            }

            let containers = decode_entry_containers(node, &location, &mut diagnostics);
            if containers.is_empty() {
                diagnostics.push(Diagnostic {
                    location,
                    reason: "editable entry holds no containers".into(),
                });
                continue;
            }

            let name = entry_display_name(node)
                .unwrap_or_else(|| format!("Preset {}", presets.len() + 1));
            presets.push(Preset {
                name,
                slot: root_slot,
                containers,
            });
        }
    }

    if !diagnostics.is_empty() {
        tracing::warn!(
            count = diagnostics.len(),
            "skipped malformed or non-editable entries while extracting presets"
        );
    }

    (HotbarData { presets }, diagnostics)
}

/// Decode the nested container list of one editable entry, defaulting to
/// empty when the metadata is absent.
fn decode_entry_containers(
    node: &hotbarkit_nbt::Compound,
    location: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Container> {
    let children = node
        .get(FIELD_TAG)
        .and_then(Tag::as_compound)
        .and_then(|tag| tag.get(FIELD_BLOCK_ENTITY))
        .and_then(Tag::as_compound)
        .and_then(|be| be.get(FIELD_ITEMS))
        .and_then(Tag::as_list)
        .unwrap_or(&[]);

    let mut containers = Vec::new();
    for (child_index, child) in children.iter().enumerate() {
        let Some(child_node) = child.as_compound() else {
            diagnostics.push(Diagnostic {
                location: format!("{location}, child {child_index}"),
                reason: "container entry is not a compound".into(),
            });
            continue;
        };

        match decode_container(child_node) {
            Some(container) => containers.push(container),
            None => {
                // A loose item sitting in an editable entry is not part of
                // the model and will not survive a rebuild.
                diagnostics.push(Diagnostic {
                    location: format!("{location}, child {child_index}"),
                    reason: "child is a simple item, not a container".into(),
                });
            }
        }
    }
    containers
}

fn entry_display_name(node: &hotbarkit_nbt::Compound) -> Option<String> {
    let raw = node
        .get(FIELD_TAG)
        .and_then(Tag::as_compound)
        .and_then(|tag| tag.get(FIELD_DISPLAY))
        .and_then(Tag::as_compound)
        .and_then(|display| display.get(FIELD_NAME))
        .and_then(Tag::as_str)?;
    Some(text::display_name(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{barrel_entry, item_node, root_file, simple_container_node};

    #[test]
    fn extracts_named_preset_from_slot_zero() {
        let barrel = barrel_entry(
            Some(r#"{"text":"Nether Enter"}"#),
            vec![simple_container_node(
                "minecraft:barrel",
                vec![item_node("minecraft:compass", 0, 1)],
            )],
        );
        let file = root_file(vec![(0, vec![barrel])]);

        let (data, diagnostics) = extract_presets(&file);
        assert!(diagnostics.is_empty());
        assert_eq!(data.presets.len(), 1);

        let preset = &data.presets[0];
        assert_eq!(preset.name, "Nether Enter");
        assert_eq!(preset.slot, 0);
        assert_eq!(preset.containers.len(), 1);
        assert_eq!(preset.containers[0].items[0].id, "minecraft:compass");
    }

    #[test]
    fn missing_name_generates_label() {
        let barrel = barrel_entry(
            None,
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        let file = root_file(vec![(0, vec![barrel])]);

        let (data, _) = extract_presets(&file);
        assert_eq!(data.presets[0].name, "Preset 1");
    }

    #[test]
    fn sentinel_and_protected_entries_are_not_presets() {
        let air = item_node("minecraft:air", 0, 1);
        let command_block = item_node("minecraft:command_block", 1, 1);
        let barrel = barrel_entry(
            Some(r#"{"text":"Kit"}"#),
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        let file = root_file(vec![(0, vec![air, command_block, barrel])]);

        let (data, _) = extract_presets(&file);
        assert_eq!(data.presets.len(), 1);
        assert_eq!(data.presets[0].name, "Kit");
    }

    #[test]
    fn barrel_without_containers_is_skipped_with_diagnostic() {
        let barrel = barrel_entry(Some(r#"{"text":"Hollow"}"#), vec![]);
        let file = root_file(vec![(0, vec![barrel])]);

        let (data, diagnostics) = extract_presets(&file);
        assert!(data.presets.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].reason.contains("no containers"));
    }

    #[test]
    fn presets_found_on_non_zero_root_slots() {
        let barrel = barrel_entry(
            Some(r#"{"text":"Elsewhere"}"#),
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        let file = root_file(vec![(5, vec![barrel])]);

        let (data, _) = extract_presets(&file);
        assert_eq!(data.presets.len(), 1);
        assert_eq!(data.presets[0].slot, 5);
    }

    #[test]
    fn multiple_presets_share_one_root_slot() {
        let a = barrel_entry(
            Some(r#"{"text":"A"}"#),
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        let b = barrel_entry(
            Some(r#"{"text":"B"}"#),
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        let file = root_file(vec![(0, vec![a, b])]);

        let (data, _) = extract_presets(&file);
        let names: Vec<_> = data.presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn malformed_entries_are_salvaged_around() {
        let mut file = root_file(vec![]);
        // Root slot 0 is a string instead of a list.
        file.root.insert("0", Tag::String("garbage".into()));
        // Root slot 3 has a non-compound entry next to a valid barrel.
        let barrel = barrel_entry(
            Some(r#"{"text":"Survivor"}"#),
            vec![simple_container_node("minecraft:barrel", vec![])],
        );
        file.root
            .insert("3", Tag::list_of(vec![Tag::Int(5), barrel]));

        let (data, diagnostics) = extract_presets(&file);
        assert_eq!(data.presets.len(), 1);
        assert_eq!(data.presets[0].name, "Survivor");
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn loose_item_in_barrel_gets_diagnostic() {
        let barrel = barrel_entry(
            Some(r#"{"text":"Mixed"}"#),
            vec![
                simple_container_node("minecraft:barrel", vec![]),
                item_node("minecraft:diamond_sword", 1, 1),
            ],
        );
        let file = root_file(vec![(0, vec![barrel])]);

        let (data, diagnostics) = extract_presets(&file);
        assert_eq!(data.presets.len(), 1);
        assert_eq!(data.presets[0].containers.len(), 1);
        assert!(diagnostics
            .iter()
            .any(|d| d.reason.contains("simple item")));
    }
}
