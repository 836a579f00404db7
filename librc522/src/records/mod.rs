// librc522-rs/librc522/src/records/mod.rs

//! Persisted binary formats layered on top of block I/O. Pure
//! encode/decode; nothing here touches the bus.

pub mod slot;
pub mod text;

pub use slot::{decode_slot, decode_slot_encrypted, encode_slot, encode_slot_encrypted};
pub use text::{TextEncoding, decode_text, encode_text};
