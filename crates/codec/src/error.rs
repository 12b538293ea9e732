//! Error types for the preset codec.

use hotbarkit_nbt::NbtError;
use thiserror::Error;

/// Errors from parsing or rebuilding a preset file.
///
/// Anything that is not one of these is handled by the structural-skip
/// policy: malformed nodes are omitted from the projected model (with a
/// diagnostic) instead of failing the whole file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input bytes are not a valid instance of the binary format.
    #[error("failed to decode preset file: {0}")]
    Decode(#[source] NbtError),
    /// The rebuilt tree could not be written back to bytes.
    #[error("failed to encode preset file: {0}")]
    Encode(#[source] NbtError),
    /// A preset carries a root slot the re-encoder does not rebuild.
    /// Only root slot 0 is editable; anything else would be silently
    /// dropped, so it is rejected instead.
    #[error("preset at root slot {0} cannot be re-encoded (only slot 0 is editable)")]
    UnsupportedRootSlot(u8),
}

/// Errors from the slot-addressed mutation API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no preset at index {0}")]
    NoSuchPreset(usize),
    #[error("slot {slot} out of range for container {container} (capacity {capacity})")]
    SlotOutOfRange {
        container: usize,
        slot: u8,
        capacity: u8,
    },
    #[error("UI slot {0} out of range (0-35)")]
    UiSlotOutOfRange(u8),
    #[error("item count must be at least 1, got {0}")]
    InvalidCount(u8),
}
