// Page-oriented I/O on page-addressed tags.

use librc522::device::crc::crc_a;
use librc522::test_support::{initialized_mock_reader, shared_mock_reader};
use librc522::transport::mock::Reply;
use librc522::{Error, PageData};

use crate::common::ntag213_tag;

#[test]
fn page_read_returns_first_four_bytes() {
    let mut answer = vec![0xDE, 0xAD, 0xBE, 0xEF];
    answer.extend_from_slice(&[0x11; 12]);
    let mut reader = initialized_mock_reader(vec![Reply::Bytes {
        data: answer,
        valid_bits: 0,
    }]);

    let tag = ntag213_tag();
    let page = tag.read_page(&mut reader, 7).unwrap().unwrap();
    assert_eq!(page.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn page_write_pads_to_a_full_block() {
    let (mock, mut reader) = shared_mock_reader(vec![Reply::Ack, Reply::Ack]);
    let tag = ntag213_tag();
    tag.write_page(&mut reader, 5, &PageData::from_bytes([1, 2, 3, 4]))
        .unwrap();

    let mock = mock.borrow();
    let mut payload = vec![1u8, 2, 3, 4];
    payload.extend_from_slice(&[0u8; 12]);
    let mut data_frame = payload.clone();
    data_frame.extend_from_slice(&crc_a(&payload));
    assert_eq!(mock.sent_frames[1], data_frame);
}

#[test]
fn page_bounds_checked_before_bus_activity() {
    let (mock, mut reader) = shared_mock_reader(vec![]);
    let tag = ntag213_tag();

    match tag.read_page(&mut reader, 45) {
        Err(Error::OutOfRange {
            address: 45,
            max: 44,
        }) => {}
        other => panic!("expected out-of-range, got {:?}", other),
    }
    assert!(mock.borrow().sent_frames.is_empty());
}

#[test]
fn writes_below_user_area_rejected() {
    let (mock, mut reader) = shared_mock_reader(vec![]);
    let tag = ntag213_tag();
    assert!(matches!(
        tag.write_page(&mut reader, 2, &PageData::from_bytes([0; 4])),
        Err(Error::OutOfRange { .. })
    ));
    assert!(mock.borrow().sent_frames.is_empty());
}

#[test]
fn page_io_requires_a_page_tag() {
    let mut reader = initialized_mock_reader(vec![]);
    let tag = crate::common::sector_tag();
    assert!(matches!(
        tag.read_page(&mut reader, 4),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn message_roundtrip_through_pages() {
    use librc522::{TextEncoding, decode_text, encode_text};

    let message = encode_text("hi", TextEncoding::Utf8).unwrap();
    // Message is 7 bytes -> two pages; writes then reads them back with a
    // terminating all-zero page.
    let mut replies = vec![Reply::Ack, Reply::Ack, Reply::Ack, Reply::Ack];
    let mut page0 = message[..4].to_vec();
    page0.extend_from_slice(&[0x77; 12]);
    let mut page1 = message[4..].to_vec();
    page1.push(0);
    page1.extend_from_slice(&[0x77; 12]);
    let mut page2 = vec![0u8; 4];
    page2.extend_from_slice(&[0x77; 12]);
    for data in [page0, page1, page2] {
        replies.push(Reply::Bytes {
            data,
            valid_bits: 0,
        });
    }

    let mut reader = initialized_mock_reader(replies);
    let tag = ntag213_tag();
    tag.write_message(&mut reader, &message).unwrap();

    let bytes = tag.read_message(&mut reader).unwrap();
    assert_eq!(decode_text(&bytes).unwrap(), "hi");
}
