// librc522-rs/librc522/src/picc/request.rs

use crate::device::handle::{Initialized, Reader};
use crate::types::WakeMode;
use crate::{Error, Result};

/// Probe the field for a tag with REQA/WUPA.
///
/// The probe is a short frame: only seven bits of the command byte go out.
/// A present tag answers with its 16-bit ATQA; anything else counts as an
/// empty field.
pub fn request(reader: &mut Reader<Initialized>, mode: WakeMode) -> Result<[u8; 2]> {
    let recv = reader.transceive(&[mode.command_byte()], 7)?;
    if recv.bits != 0x10 || recv.data.len() < 2 {
        return Err(Error::NoTag);
    }
    Ok([recv.data[0], recv.data[1]])
}
