// librc522-rs/librc522/src/tag/mod.rs

use std::ops::Range;

use crate::constants::PAGE_USER_START;
use crate::device::handle::{Initialized, Reader};
use crate::types::{BlockData, Key, KeyType, PageData, TagKind, Uid};
use crate::{Error, Result};

pub mod slots;

/// A selected tag: its resolved UID plus the classification from the
/// version query. Valid only while the tag stays selected.
pub struct Tag {
    uid: Uid,
    kind: TagKind,
}

impl Tag {
    pub fn new(uid: Uid, kind: TagKind) -> Self {
        Self { uid, kind }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Authenticate a sector of this tag.
    pub fn authenticate(
        &self,
        reader: &mut Reader<Initialized>,
        key_type: KeyType,
        block: u8,
        key: &Key,
    ) -> Result<()> {
        reader.authenticate(key_type, block, key, &self.uid)
    }

    /// Read one 4-byte page (page tags).
    pub fn read_page(
        &self,
        reader: &mut Reader<Initialized>,
        page: u8,
    ) -> Result<Option<PageData>> {
        crate::picc::page::read_page(reader, &self.kind, page)
    }

    /// Write one 4-byte page (page tags).
    pub fn write_page(
        &self,
        reader: &mut Reader<Initialized>,
        page: u8,
        data: &PageData,
    ) -> Result<()> {
        crate::picc::page::write_page(reader, &self.kind, page, data)
    }

    /// Lay a message's bytes out in 4-byte pages starting at the first
    /// user page, zero-padding the final page.
    pub fn write_message(&self, reader: &mut Reader<Initialized>, message: &[u8]) -> Result<()> {
        let mut page = PAGE_USER_START;
        for chunk in message.chunks(4) {
            let mut data = [0u8; 4];
            data[..chunk.len()].copy_from_slice(chunk);
            self.write_page(reader, page, &PageData::from_bytes(data))?;
            page += 1;
        }
        Ok(())
    }

    /// Read message bytes from the user pages, stopping at the first
    /// all-zero page (or the end of the tag).
    pub fn read_message(&self, reader: &mut Reader<Initialized>) -> Result<Vec<u8>> {
        let max = match self.kind {
            TagKind::PageTag { max_page, .. } => max_page,
            _ => {
                return Err(Error::UnsupportedOperation(
                    "not a page-addressed tag".into(),
                ));
            }
        };

        let mut message = Vec::new();
        for page in PAGE_USER_START..=max {
            match self.read_page(reader, page)? {
                Some(data) if data.as_bytes() != &[0u8; 4] => {
                    message.extend_from_slice(data.as_bytes());
                }
                _ => break,
            }
        }
        Ok(message)
    }

    /// Authenticated dump of a block range on a sector card. Stops at the
    /// first block the tag withholds; authentication failures abort.
    pub fn dump_blocks(
        &self,
        reader: &mut Reader<Initialized>,
        key_type: KeyType,
        key: &Key,
        blocks: Range<u8>,
    ) -> Result<Vec<(u8, BlockData)>> {
        let mut out = Vec::new();
        for block in blocks {
            self.authenticate(reader, key_type, block, key)?;
            match reader.read_block(block)? {
                Some(data) => out.push((block, data)),
                None => break,
            }
        }
        Ok(out)
    }
}
