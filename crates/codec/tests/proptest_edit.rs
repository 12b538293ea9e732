//! Property tests for the item projector and the mutation API.

use hotbarkit_codec::{decode_item, encode_item, Container, HotbarData, Item, Preset};
use proptest::prelude::*;

fn arb_item() -> impl Strategy<Value = Item> {
    ("[a-z_]{1,16}", 1u8..=64, 0u8..=26).prop_map(|(name, count, slot)| {
        Item::new(format!("minecraft:{name}"), count).with_slot(slot)
    })
}

fn one_preset() -> HotbarData {
    HotbarData {
        presets: vec![Preset {
            name: "Kit".into(),
            slot: 0,
            containers: vec![Container::new("minecraft:barrel")],
        }],
    }
}

proptest! {
    /// Property: item projection round-trips for editor-produced items.
    #[test]
    fn item_projection_roundtrips(item in arb_item()) {
        let decoded = decode_item(&encode_item(&item));
        prop_assert_eq!(decoded, item);
    }

    /// Property: any sequence of writes leaves every container with at
    /// most one item per slot.
    #[test]
    fn writes_keep_slots_unique(
        ops in prop::collection::vec((0usize..3, 0u8..9, arb_item()), 0..32),
    ) {
        let mut data = one_preset();
        for (container, slot, item) in ops {
            data.set_item_at_slot(0, container, slot, Some(item)).unwrap();
        }

        for container in &data.presets[0].containers {
            let mut slots: Vec<u8> =
                container.items.iter().map(|i| i.effective_slot()).collect();
            let occupied = slots.len();
            slots.sort_unstable();
            slots.dedup();
            prop_assert_eq!(slots.len(), occupied);
        }
    }

    /// Property: repeating a write or a delete changes nothing.
    #[test]
    fn set_and_delete_are_idempotent(
        slot in 0u8..9,
        item in arb_item(),
    ) {
        let mut data = one_preset();
        data.set_item_at_slot(0, 0, slot, Some(item.clone())).unwrap();
        let after_set = data.clone();
        data.set_item_at_slot(0, 0, slot, Some(item)).unwrap();
        prop_assert_eq!(&data, &after_set);

        data.delete_item_at_slot(0, 0, slot).unwrap();
        let after_delete = data.clone();
        data.delete_item_at_slot(0, 0, slot).unwrap();
        prop_assert_eq!(&data, &after_delete);
    }
}
