// Capability detection and full selection flows.

use librc522::test_support::{
    initialized_mock_reader, page_tag_select, sector_card_select, version_reply,
};
use librc522::transport::mock::Reply;
use librc522::{PageVariant, TagKind, WakeMode};

#[test]
fn storage_byte_0f_detects_ntag213() {
    let mut reader = initialized_mock_reader(vec![version_reply(0x0F)]);
    assert_eq!(
        reader.detect().unwrap(),
        TagKind::PageTag {
            variant: PageVariant::Ntag213,
            max_page: 44
        }
    );
}

#[test]
fn storage_byte_11_detects_ntag215() {
    let mut reader = initialized_mock_reader(vec![version_reply(0x11)]);
    assert_eq!(
        reader.detect().unwrap(),
        TagKind::PageTag {
            variant: PageVariant::Ntag215,
            max_page: 134
        }
    );
}

#[test]
fn silent_version_query_detects_sector_card() {
    let mut reader = initialized_mock_reader(vec![Reply::Timer]);
    assert_eq!(reader.detect().unwrap(), TagKind::SectorTag);
}

#[test]
fn malformed_version_answers_are_unknown() {
    // Wrong vendor byte
    let mut reader = initialized_mock_reader(vec![Reply::Bytes {
        data: vec![0x00, 0x05, 0x04, 0x02, 0x01, 0x00, 0x0F, 0x03],
        valid_bits: 0,
    }]);
    assert_eq!(reader.detect().unwrap(), TagKind::Unknown);

    // Short answer
    let mut reader = initialized_mock_reader(vec![Reply::Bytes {
        data: vec![0x00, 0x04, 0x04],
        valid_bits: 0,
    }]);
    assert_eq!(reader.detect().unwrap(), TagKind::Unknown);
}

#[test]
fn full_select_of_a_sector_card() {
    let mut reader = initialized_mock_reader(sector_card_select([0x12, 0x34, 0x56, 0x78]));
    let tag = reader.select(WakeMode::Idle).unwrap();
    assert_eq!(tag.uid().as_bytes(), &[0x12, 0x34, 0x56, 0x78]);
    assert_eq!(tag.kind(), TagKind::SectorTag);
}

#[test]
fn full_select_of_a_page_tag() {
    let uid = [0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
    let mut reader = initialized_mock_reader(page_tag_select(uid, 0x0F));
    let tag = reader.select(WakeMode::Idle).unwrap();
    assert_eq!(tag.uid().as_bytes(), &uid);
    assert_eq!(
        tag.kind(),
        TagKind::PageTag {
            variant: PageVariant::Ntag213,
            max_page: 44
        }
    );
}
