// librc522-rs/librc522/src/records/slot.rs

use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::device::crc::crc_a;
use crate::types::{BlockData, Uid};
use crate::{Error, Result};

/// Longest secret a slot record can carry (two payload blocks).
pub const SECRET_MAX: usize = 32;

/// Encode a secret into the three blocks of a slot record.
///
/// Blocks 0 and 1 hold the secret zero-padded; block 2 is
/// `[crc_hi, crc_lo, len_lo, len_hi, 12×0]` with the CRC_A computed over
/// the unpadded secret.
pub fn encode_slot(secret: &[u8]) -> Result<[BlockData; 3]> {
    if secret.len() > SECRET_MAX {
        return Err(Error::InvalidLength {
            expected: SECRET_MAX,
            actual: secret.len(),
        });
    }

    let mut payload = [0u8; SECRET_MAX];
    payload[..secret.len()].copy_from_slice(secret);

    let crc = crc_a(secret);
    let mut trailer = [0u8; 16];
    trailer[0] = crc[1];
    trailer[1] = crc[0];
    trailer[2] = (secret.len() & 0xFF) as u8;
    trailer[3] = (secret.len() >> 8) as u8;

    let mut block0 = [0u8; 16];
    block0.copy_from_slice(&payload[..16]);
    let mut block1 = [0u8; 16];
    block1.copy_from_slice(&payload[16..]);

    Ok([
        BlockData::from_bytes(block0),
        BlockData::from_bytes(block1),
        BlockData::from_bytes(trailer),
    ])
}

/// Decode a slot record back into the secret.
///
/// A stored length beyond [`SECRET_MAX`] or a CRC mismatch is reported as
/// corruption; wrong data is never returned silently.
pub fn decode_slot(blocks: &[BlockData; 3]) -> Result<Vec<u8>> {
    let trailer = blocks[2].as_bytes();
    let stored = ((trailer[0] as u16) << 8) | trailer[1] as u16;
    let len = trailer[2] as usize | ((trailer[3] as usize) << 8);

    if len > SECRET_MAX {
        return Err(Error::InvalidLength {
            expected: SECRET_MAX,
            actual: len,
        });
    }

    let mut secret = Vec::with_capacity(SECRET_MAX);
    secret.extend_from_slice(blocks[0].as_bytes());
    secret.extend_from_slice(blocks[1].as_bytes());
    secret.truncate(len);

    let crc = crc_a(&secret);
    let computed = ((crc[1] as u16) << 8) | crc[0] as u16;
    if computed != stored {
        return Err(Error::ChecksumMismatch {
            expected: computed,
            actual: stored,
        });
    }

    Ok(secret)
}

/// Encrypted variant: every block of the record is passed through
/// AES-128-ECB keyed by the tag UID.
pub fn encode_slot_encrypted(secret: &[u8], uid: &Uid) -> Result<[BlockData; 3]> {
    let cipher = cipher_for(uid);
    let blocks = encode_slot(secret)?;
    Ok(blocks.map(|block| {
        let mut buf = GenericArray::clone_from_slice(block.as_bytes());
        cipher.encrypt_block(&mut buf);
        let mut out = [0u8; 16];
        out.copy_from_slice(&buf);
        BlockData::from_bytes(out)
    }))
}

/// Decrypt and decode an encrypted slot record.
pub fn decode_slot_encrypted(blocks: &[BlockData; 3], uid: &Uid) -> Result<Vec<u8>> {
    let cipher = cipher_for(uid);
    let plain = blocks.map(|block| {
        let mut buf = GenericArray::clone_from_slice(block.as_bytes());
        cipher.decrypt_block(&mut buf);
        let mut out = [0u8; 16];
        out.copy_from_slice(&buf);
        BlockData::from_bytes(out)
    });
    decode_slot(&plain)
}

/// AES key: the UID left-zero-padded to 16 bytes.
fn cipher_for(uid: &Uid) -> Aes128 {
    let mut key = [0u8; 16];
    let bytes = uid.as_bytes();
    key[16 - bytes.len()..].copy_from_slice(bytes);
    Aes128::new(GenericArray::from_slice(&key))
}
