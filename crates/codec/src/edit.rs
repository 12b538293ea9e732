//! Slot-addressed editing of [`HotbarData`].
//!
//! Writes are idempotent under repetition: setting the same item twice
//! yields the same state, and deleting an absent item is a no-op rather
//! than an error. Moves are swaps.

use crate::error::EditError;
use crate::format::{role_capacity, EDITABLE_CONTAINER_ID, HOTBAR_CAPACITY, UI_SLOT_COUNT};
use crate::model::{Container, HotbarData, Item};

/// Translate a flat UI slot (0-35) into a `(container_index, slot)` pair:
/// band 0 is the hotbar container, band 1 the main-inventory container
/// offset by 9.
pub fn ui_slot_to_placement(ui_slot: u8) -> Option<(usize, u8)> {
    if ui_slot < HOTBAR_CAPACITY {
        Some((0, ui_slot))
    } else if ui_slot < UI_SLOT_COUNT {
        Some((1, ui_slot - HOTBAR_CAPACITY))
    } else {
        None
    }
}

impl HotbarData {
    /// Write or clear the item at `(container_index, slot)` of a preset.
    ///
    /// Writing past the preset's current container count synthesizes empty
    /// editable containers up to the target index. Writing `Some` replaces
    /// whatever occupies the slot (at most one item per slot afterwards);
    /// writing `None` deletes, and deleting an absent item is a no-op.
    pub fn set_item_at_slot(
        &mut self,
        preset_index: usize,
        container_index: usize,
        slot: u8,
        item: Option<Item>,
    ) -> Result<(), EditError> {
        let capacity = role_capacity(container_index);
        if slot >= capacity {
            return Err(EditError::SlotOutOfRange {
                container: container_index,
                slot,
                capacity,
            });
        }

        let preset = self
            .presets
            .get_mut(preset_index)
            .ok_or(EditError::NoSuchPreset(preset_index))?;

        match item {
            Some(mut item) => {
                if item.count == 0 {
                    return Err(EditError::InvalidCount(0));
                }
                item.slot = Some(slot);

                while preset.containers.len() <= container_index {
                    preset.containers.push(Container::new(EDITABLE_CONTAINER_ID));
                }
                let container = &mut preset.containers[container_index];

                // Replace in place when the slot is occupied, dropping any
                // further occupants so the slot ends up unique.
                match container
                    .items
                    .iter()
                    .position(|i| i.effective_slot() == slot)
                {
                    Some(position) => {
                        container.items[position] = item;
                        let mut index = 0;
                        container.items.retain(|i| {
                            let keep = index == position || i.effective_slot() != slot;
                            index += 1;
                            keep
                        });
                    }
                    None => container.items.push(item),
                }
            }
            None => {
                // Deletion never synthesizes containers.
                if let Some(container) = preset.containers.get_mut(container_index) {
                    container.items.retain(|i| i.effective_slot() != slot);
                }
            }
        }

        Ok(())
    }

    /// Delete any item at `(container_index, slot)` of a preset.
    pub fn delete_item_at_slot(
        &mut self,
        preset_index: usize,
        container_index: usize,
        slot: u8,
    ) -> Result<(), EditError> {
        self.set_item_at_slot(preset_index, container_index, slot, None)
    }

    /// Swap the items at two UI-addressed slots, clearing the source when
    /// the destination was empty.
    pub fn move_item(
        &mut self,
        preset_index: usize,
        from_ui_slot: u8,
        to_ui_slot: u8,
    ) -> Result<(), EditError> {
        let (from_container, from_slot) =
            ui_slot_to_placement(from_ui_slot).ok_or(EditError::UiSlotOutOfRange(from_ui_slot))?;
        let (to_container, to_slot) =
            ui_slot_to_placement(to_ui_slot).ok_or(EditError::UiSlotOutOfRange(to_ui_slot))?;

        let preset = self
            .presets
            .get_mut(preset_index)
            .ok_or(EditError::NoSuchPreset(preset_index))?;

        let source = take_item(preset, from_container, from_slot);
        let destination = take_item(preset, to_container, to_slot);

        if let Some(item) = source {
            self.set_item_at_slot(preset_index, to_container, to_slot, Some(item))?;
        }
        if let Some(item) = destination {
            self.set_item_at_slot(preset_index, from_container, from_slot, Some(item))?;
        }

        Ok(())
    }
}

fn take_item(
    preset: &mut crate::model::Preset,
    container_index: usize,
    slot: u8,
) -> Option<Item> {
    let container = preset.containers.get_mut(container_index)?;
    let position = container
        .items
        .iter()
        .position(|i| i.effective_slot() == slot)?;
    Some(container.items.remove(position))
}
