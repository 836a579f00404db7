// librc522-rs/librc522/src/picc/page.rs

use crate::constants::PAGE_USER_START;
use crate::device::handle::{Initialized, Reader};
use crate::picc::block;
use crate::types::{PageData, TagKind};
use crate::{Error, Result};

/// Read one 4-byte page from a page-addressed tag.
///
/// The tag answers a page read with 16 bytes (the page plus the three that
/// follow); only the addressed page is returned. Bounds are checked against
/// the detected maximum before any bus activity.
pub fn read_page(
    reader: &mut Reader<Initialized>,
    kind: &TagKind,
    page: u8,
) -> Result<Option<PageData>> {
    let max = page_tag_max(kind)?;
    if page > max {
        return Err(Error::OutOfRange { address: page, max });
    }

    Ok(block::read_raw(reader, page)?.map(|b| {
        let mut out = [0u8; 4];
        out.copy_from_slice(&b.as_bytes()[..4]);
        PageData::from_bytes(out)
    }))
}

/// Write one 4-byte page to a page-addressed tag.
///
/// The payload is right-padded with 12 zero bytes and sent through the
/// 16-byte write path. Writes are restricted to the user area: pages below
/// 4 hold the UID, lock bits and capability container.
pub fn write_page(
    reader: &mut Reader<Initialized>,
    kind: &TagKind,
    page: u8,
    data: &PageData,
) -> Result<()> {
    let max = page_tag_max(kind)?;
    if page < PAGE_USER_START || page > max {
        return Err(Error::OutOfRange { address: page, max });
    }

    block::write_raw(reader, page, &data.to_block())
}

fn page_tag_max(kind: &TagKind) -> Result<u8> {
    match kind {
        TagKind::PageTag { max_page, .. } => Ok(*max_page),
        _ => Err(Error::UnsupportedOperation(
            "not a page-addressed tag".into(),
        )),
    }
}
