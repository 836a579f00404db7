// librc522-rs/librc522/src/picc/block.rs

use crate::constants::{BLOCK_MAX, PICC_READ, PICC_WRITE};
use crate::device::command::Received;
use crate::device::handle::{Initialized, Reader};
use crate::types::BlockData;
use crate::{Error, Result};

/// Read a 16-byte block. `Ok(None)` means the tag did not deliver the
/// block (absent, or a malformed answer): an expected outcome, not a
/// failure of the call itself. Bus faults still surface as errors.
pub fn read_raw(reader: &mut Reader<Initialized>, block: u8) -> Result<Option<BlockData>> {
    let mut frame = vec![PICC_READ, block];
    let crc = reader.calculate_crc(&frame)?;
    frame.extend_from_slice(&crc);

    match reader.transceive(&frame, 0) {
        Ok(recv) => Ok(BlockData::try_from(&recv.data[..]).ok()),
        Err(Error::NoTag | Error::Timeout | Error::Protocol { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write a 16-byte block: two-phase, address frame then data frame, each
/// acknowledged with the 4-bit MIFARE ACK.
///
/// A first-phase failure leaves the block unmodified; after a second-phase
/// failure the block's contents are unspecified.
pub fn write_raw(reader: &mut Reader<Initialized>, block: u8, data: &BlockData) -> Result<()> {
    let mut frame = vec![PICC_WRITE, block];
    let crc = reader.calculate_crc(&frame)?;
    frame.extend_from_slice(&crc);
    ensure_ack(&reader.transceive(&frame, 0)?)?;

    let mut payload = data.as_bytes().to_vec();
    let crc = reader.calculate_crc(&payload)?;
    payload.extend_from_slice(&crc);
    ensure_ack(&reader.transceive(&payload, 0)?)
}

/// Session-gated sector-card read.
pub fn read_block(reader: &mut Reader<Initialized>, block: u8) -> Result<Option<BlockData>> {
    if block > BLOCK_MAX {
        return Err(Error::OutOfRange {
            address: block,
            max: BLOCK_MAX,
        });
    }
    ensure_session(reader, block)?;
    read_raw(reader, block)
}

/// Session-gated sector-card write.
pub fn write_block(reader: &mut Reader<Initialized>, block: u8, data: &BlockData) -> Result<()> {
    if block > BLOCK_MAX {
        return Err(Error::OutOfRange {
            address: block,
            max: BLOCK_MAX,
        });
    }
    ensure_session(reader, block)?;
    write_raw(reader, block, data)
}

fn ensure_ack(recv: &Received) -> Result<()> {
    if recv.bits != 4 || recv.data.first().is_none_or(|b| b & 0x0F != 0x0A) {
        return Err(Error::NotAcknowledged);
    }
    Ok(())
}

fn ensure_session(reader: &mut Reader<Initialized>, block: u8) -> Result<()> {
    match reader.session() {
        Some(session) if session.covers(block) => Ok(()),
        _ => Err(Error::AuthMissing { block }),
    }
}
