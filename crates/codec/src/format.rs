//! Wire-level constants for the hotbar preset file shape.

/// Identifier of the entry kind the editor recognizes as a preset holder.
pub const EDITABLE_CONTAINER_ID: &str = "minecraft:barrel";

/// Sentinel identifier meaning "this slot holds no item" (distinct from the
/// slot being absent from the list entirely).
pub const EMPTY_ID: &str = "minecraft:air";

/// Flavor-text marker written on rebuilt container wrappers; the consuming
/// game renders it to signal that the item carries extra data.
pub const EXTRA_DATA_MARKER: &str = "(+NBT)";

/// Number of root slots in a preset file.
pub const ROOT_SLOT_COUNT: u8 = 9;

/// Length of a synthesized root-slot list in a from-scratch export.
pub const ROOT_LIST_LEN: usize = 9;

/// Slot capacity of the hotbar-role container (container 0).
pub const HOTBAR_CAPACITY: u8 = 9;

/// Slot capacity of the main-inventory-role container (container 1+).
pub const MAIN_CAPACITY: u8 = 27;

/// Flat UI slot count: 9 hotbar + 27 main inventory.
pub const UI_SLOT_COUNT: u8 = 36;

/// Declared capacity of a shulker-box-like container kind.
pub const SHULKER_CAPACITY: u8 = 27;

/// Declared capacity of a double-chest-like container kind; the loosest
/// bound any known kind declares.
pub const DOUBLE_CHEST_CAPACITY: u8 = 54;

/// Schema version stamped on from-scratch exports (the one observed
/// version; other versions are out of scope).
pub const DATA_VERSION: i32 = 3465;

// Field names of the item-shaped node.
pub const FIELD_SLOT: &str = "Slot";
pub const FIELD_ID: &str = "id";
pub const FIELD_COUNT: &str = "Count";
pub const FIELD_TAG: &str = "tag";
pub const FIELD_DAMAGE: &str = "Damage";
pub const FIELD_ENCHANTMENTS: &str = "Enchantments";
pub const FIELD_ENCHANT_LEVEL: &str = "lvl";
pub const FIELD_DISPLAY: &str = "display";
pub const FIELD_NAME: &str = "Name";
pub const FIELD_LORE: &str = "Lore";
pub const FIELD_BLOCK_ENTITY: &str = "BlockEntityTag";
pub const FIELD_ITEMS: &str = "Items";
pub const FIELD_CUSTOM_NAME: &str = "CustomName";
pub const FIELD_DATA_VERSION: &str = "DataVersion";

/// Capacity of the container role addressed by `container_index` in the
/// mutation API: container 0 is the hotbar, everything after it holds a
/// main-inventory grid.
pub fn role_capacity(container_index: usize) -> u8 {
    if container_index == 0 {
        HOTBAR_CAPACITY
    } else {
        MAIN_CAPACITY
    }
}
