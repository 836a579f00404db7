// librc522-rs/librc522/src/prelude.rs

pub use crate::constants::Register;
pub use crate::device::Received;
pub use crate::device::{Initialized, Reader, Uninitialized};
pub use crate::records::{
    TextEncoding, decode_slot, decode_slot_encrypted, decode_text, encode_slot,
    encode_slot_encrypted, encode_text,
};
pub use crate::tag::Tag;
pub use crate::{
    AuthSession, BlockData, Error, Key, KeyType, PageData, PageVariant, Result, TagKind, Uid,
    WakeMode,
};

// Re-export small utilities for convenience
pub use crate::utils::{PollBudget, bytes_to_hex, bytes_to_hex_spaced};
