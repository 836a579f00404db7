// librc522-rs/librc522/src/records/text.rs

use crate::{Error, Result};

/// Character encoding flag carried in the first payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

impl TextEncoding {
    fn flag(self) -> u8 {
        match self {
            Self::Utf8 => 0x00,
            Self::Utf16 => 0x80,
        }
    }
}

/// Encode a single short text record.
///
/// Layout: `[0xD1, 0x01, payload_len, 0x54, flag, encoded text…]` where
/// `payload_len` is one byte for the flag plus the encoded text length.
/// Texts whose payload does not fit the single length byte are rejected.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    let encoded = match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf16 => {
            // BOM + little-endian code units
            let mut out = Vec::with_capacity(2 + text.len() * 2);
            for unit in std::iter::once(0xFEFFu16).chain(text.encode_utf16()) {
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
    };

    let payload_len = 1 + encoded.len();
    if payload_len > 0xFF {
        return Err(Error::InvalidLength {
            expected: 0xFF,
            actual: payload_len,
        });
    }

    let mut message = Vec::with_capacity(4 + payload_len);
    message.push(0xD1);
    message.push(0x01);
    message.push(payload_len as u8);
    message.push(0x54);
    message.push(encoding.flag());
    message.extend_from_slice(&encoded);
    Ok(message)
}

/// Decode a single text record; `None` for any other record type or
/// malformed input.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if bytes.len() < 5 {
        return None;
    }

    let payload_len = bytes[2] as usize;
    let record_type = bytes[3];
    if record_type != 0x54 {
        return None;
    }

    let payload = bytes.get(4..4 + payload_len)?;
    let (&flag, text_bytes) = payload.split_first()?;

    if flag & 0x80 != 0 {
        decode_utf16(text_bytes)
    } else {
        String::from_utf8(text_bytes.to_vec()).ok()
    }
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let (bytes, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        rest => (rest, false),
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}
