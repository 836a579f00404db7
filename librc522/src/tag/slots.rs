// librc522-rs/librc522/src/tag/slots.rs

//! Password-slot operations over a sector card.
//!
//! Slot `n` (1..=15) lives in sector `n`: the sector's first three blocks
//! hold the record, the trailer is never touched. Every operation
//! authenticates the sector with key A before any block I/O; the caller
//! owns the session lifecycle (`stop_crypto` when done).

use log::debug;

use crate::device::handle::{Initialized, Reader};
use crate::records::slot::{decode_slot, decode_slot_encrypted, encode_slot, encode_slot_encrypted};
use crate::tag::Tag;
use crate::types::{BlockData, Key, KeyType};
use crate::{Error, Result};

pub const SLOT_MIN: u8 = 1;
pub const SLOT_MAX: u8 = 15;

fn slot_blocks(slot: u8) -> Result<[u8; 3]> {
    if !(SLOT_MIN..=SLOT_MAX).contains(&slot) {
        return Err(Error::OutOfRange {
            address: slot,
            max: SLOT_MAX,
        });
    }
    let base = slot * 4;
    Ok([base, base + 1, base + 2])
}

fn fetch_blocks(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
) -> Result<[BlockData; 3]> {
    let addrs = slot_blocks(slot)?;
    tag.authenticate(reader, KeyType::A, addrs[0], key)?;

    let mut blocks = [BlockData::ZERO; 3];
    for (out, &addr) in blocks.iter_mut().zip(addrs.iter()) {
        *out = reader.read_block(addr)?.ok_or(Error::NoTag)?;
    }
    Ok(blocks)
}

fn store_blocks(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
    blocks: &[BlockData; 3],
) -> Result<()> {
    let addrs = slot_blocks(slot)?;
    tag.authenticate(reader, KeyType::A, addrs[0], key)?;

    for (block, &addr) in blocks.iter().zip(addrs.iter()) {
        reader.write_block(addr, block)?;
    }
    debug!("slot {} written (blocks {:?})", slot, addrs);
    Ok(())
}

/// Read and verify the secret stored in a slot.
pub fn read_slot(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
) -> Result<Vec<u8>> {
    let blocks = fetch_blocks(reader, tag, slot, key)?;
    decode_slot(&blocks)
}

/// Read, decrypt and verify the secret stored in a UID-encrypted slot.
pub fn read_slot_encrypted(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
) -> Result<Vec<u8>> {
    let blocks = fetch_blocks(reader, tag, slot, key)?;
    decode_slot_encrypted(&blocks, tag.uid())
}

/// Store a secret in a slot.
pub fn write_slot(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
    secret: &[u8],
) -> Result<()> {
    let blocks = encode_slot(secret)?;
    store_blocks(reader, tag, slot, key, &blocks)
}

/// Store a secret in a slot, encrypted under the tag UID.
pub fn write_slot_encrypted(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
    secret: &[u8],
) -> Result<()> {
    let blocks = encode_slot_encrypted(secret, tag.uid())?;
    store_blocks(reader, tag, slot, key, &blocks)
}

/// Zero all three record blocks of a slot.
pub fn clear_slot(reader: &mut Reader<Initialized>, tag: &Tag, slot: u8, key: &Key) -> Result<()> {
    store_blocks(reader, tag, slot, key, &[BlockData::ZERO; 3])
}

/// Whether a slot's record blocks are all zero.
pub fn is_slot_empty(
    reader: &mut Reader<Initialized>,
    tag: &Tag,
    slot: u8,
    key: &Key,
) -> Result<bool> {
    let blocks = fetch_blocks(reader, tag, slot, key)?;
    Ok(blocks.iter().all(BlockData::is_zero))
}
