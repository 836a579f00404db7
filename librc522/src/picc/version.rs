// librc522-rs/librc522/src/picc/version.rs

use log::debug;

use crate::constants::PICC_GET_VERSION;
use crate::device::handle::{Initialized, Reader};
use crate::types::{PageVariant, TagKind};
use crate::{Error, Result};

/// Send GET_VERSION and return the raw answer (8 bytes on NTAG21x).
pub fn get_version(reader: &mut Reader<Initialized>) -> Result<Vec<u8>> {
    let mut frame = vec![PICC_GET_VERSION];
    let crc = reader.calculate_crc(&frame)?;
    frame.extend_from_slice(&crc);
    Ok(reader.transceive(&frame, 0)?.data)
}

/// Classify the selected tag.
///
/// Sector cards do not implement GET_VERSION, so a silent tag maps to
/// [`TagKind::SectorTag`]. A tag that answers but fails any of the fixed
/// header checks maps to [`TagKind::Unknown`].
pub fn detect(reader: &mut Reader<Initialized>) -> Result<TagKind> {
    let answer = match get_version(reader) {
        Ok(answer) => answer,
        Err(Error::NoTag | Error::Timeout | Error::Protocol { .. }) => {
            return Ok(TagKind::SectorTag);
        }
        Err(e) => return Err(e),
    };

    let kind = classify(&answer);
    debug!("version answer {:?} -> {:?}", answer, kind);
    Ok(kind)
}

/// Fixed-offset checks: header, vendor, product type, subtype, protocol,
/// then the storage-variant byte.
fn classify(answer: &[u8]) -> TagKind {
    if answer.len() < 8 {
        return TagKind::Unknown;
    }
    if answer[0] != 0 || answer[1] != 4 || answer[2] != 4 || answer[3] != 2 || answer[7] != 3 {
        return TagKind::Unknown;
    }

    if answer[6] == 0x0F {
        return page_tag(PageVariant::Ntag213);
    }
    if answer[6] == 0x11 {
        return page_tag(PageVariant::Ntag215);
    }
    // The large-model branch inspects byte 7, which the protocol check
    // above already pins to 3.
    if answer[7] == 0x13 {
        return page_tag(PageVariant::Ntag216);
    }
    TagKind::Unknown
}

fn page_tag(variant: PageVariant) -> TagKind {
    TagKind::PageTag {
        variant,
        max_page: variant.max_page(),
    }
}
