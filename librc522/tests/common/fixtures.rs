// fixtures.rs provides commonly used test values
#![allow(dead_code)]

use librc522::{Key, Tag, TagKind, Uid};

pub fn sample_uid_bytes() -> [u8; 4] {
    [0x12, 0x34, 0x56, 0x78]
}

pub fn sample_uid() -> Uid {
    Uid::try_from(&sample_uid_bytes()[..]).unwrap()
}

pub fn sample_key() -> Key {
    Key::DEFAULT
}

pub fn sector_tag() -> Tag {
    Tag::new(sample_uid(), TagKind::SectorTag)
}

pub fn ntag213_tag() -> Tag {
    let uid = Uid::try_from(&[0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66][..]).unwrap();
    Tag::new(
        uid,
        TagKind::PageTag {
            variant: librc522::PageVariant::Ntag213,
            max_page: 44,
        },
    )
}

pub fn sample_block_bytes(fill: u8) -> [u8; 16] {
    [fill; 16]
}
