// librc522-rs/librc522/src/picc/select.rs

use log::debug;

use crate::constants::{CASCADE_TAG, PICC_SEL_CL1, PICC_SEL_CL2, PICC_SEL_CL3};
use crate::device::handle::{Initialized, Reader};
use crate::types::Uid;
use crate::{Error, Result};

/// Resolve the UID of the tag in the field via the cascaded
/// anticollision/selection procedure.
///
/// Each cascade level contributes up to four UID bytes. A level whose first
/// byte is the cascade tag (0x88) carries three bytes and defers the rest to
/// the next level, so genuine 7- and 10-byte UIDs need two or three rounds.
/// Any failure aborts; partial UIDs are never returned.
pub fn select_uid(reader: &mut Reader<Initialized>) -> Result<Uid> {
    let mut uid_bytes: Vec<u8> = Vec::with_capacity(10);

    for (level, selector) in [PICC_SEL_CL1, PICC_SEL_CL2, PICC_SEL_CL3]
        .into_iter()
        .enumerate()
    {
        let part = anticollision(reader, selector)?;
        select_level(reader, selector, &part)?;

        if part[0] == CASCADE_TAG && level < 2 {
            uid_bytes.extend_from_slice(&part[1..4]);
        } else {
            uid_bytes.extend_from_slice(&part[0..4]);
            break;
        }
    }

    let uid = Uid::try_from(&uid_bytes[..])?;
    debug!("anticollision resolved uid={}", uid.to_hex());
    Ok(uid)
}

/// One ANTICOLL round: ask the level's tags for their serial bytes and
/// validate the XOR check byte.
fn anticollision(reader: &mut Reader<Initialized>, selector: u8) -> Result<[u8; 5]> {
    let recv = reader.transceive(&[selector, 0x20], 0)?;
    if recv.data.len() != 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: recv.data.len(),
        });
    }

    let check = recv.data[..4].iter().fold(0u8, |acc, &b| acc ^ b);
    if check != recv.data[4] {
        return Err(Error::ChecksumMismatch {
            expected: check as u16,
            actual: recv.data[4] as u16,
        });
    }

    let mut part = [0u8; 5];
    part.copy_from_slice(&recv.data);
    Ok(part)
}

/// One SELECT round: lock the level's serial bytes in. The tag must answer
/// with its 24-bit SAK frame.
fn select_level(reader: &mut Reader<Initialized>, selector: u8, part: &[u8; 5]) -> Result<()> {
    let mut frame = vec![selector, 0x70];
    frame.extend_from_slice(part);
    let crc = reader.calculate_crc(&frame)?;
    frame.extend_from_slice(&crc);

    let recv = reader.transceive(&frame, 0)?;
    if recv.bits != 0x18 {
        return Err(Error::NotAcknowledged);
    }
    Ok(())
}
