// Cascaded anticollision/selection against scripted tag answers.

use librc522::device::crc::crc_a;
use librc522::test_support::{anticoll_reply, cascade_level, shared_mock_reader};
use librc522::transport::mock::Reply;
use librc522::Error;

#[test]
fn four_byte_uid_resolves_in_one_level() {
    let (mock, mut reader) = shared_mock_reader(cascade_level([0x12, 0x34, 0x56, 0x78]));
    let uid = reader.select_uid().unwrap();
    assert_eq!(uid.as_bytes(), &[0x12, 0x34, 0x56, 0x78]);

    let mock = mock.borrow();
    assert_eq!(mock.sent_frames[0], vec![0x93, 0x20]);

    // SELECT carries selector, NVB 0x70, the five answer bytes and CRC_A.
    let mut expected = vec![0x93, 0x70, 0x12, 0x34, 0x56, 0x78, 0x12 ^ 0x34 ^ 0x56 ^ 0x78];
    let crc = crc_a(&expected);
    expected.extend_from_slice(&crc);
    assert_eq!(mock.sent_frames[1], expected);
}

#[test]
fn seven_byte_uid_resolves_across_two_levels() {
    let mut replies = cascade_level([0x88, 0x04, 0x11, 0x22]);
    replies.extend(cascade_level([0x33, 0x44, 0x55, 0x66]));
    let (mock, mut reader) = shared_mock_reader(replies);

    let uid = reader.select_uid().unwrap();
    assert_eq!(uid.as_bytes(), &[0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

    let mock = mock.borrow();
    assert_eq!(mock.sent_frames[0], vec![0x93, 0x20]);
    assert_eq!(mock.sent_frames[2], vec![0x95, 0x20]);
}

#[test]
fn ten_byte_uid_resolves_across_three_levels() {
    let mut replies = cascade_level([0x88, 0x01, 0x02, 0x03]);
    replies.extend(cascade_level([0x88, 0x04, 0x05, 0x06]));
    replies.extend(cascade_level([0x07, 0x08, 0x09, 0x0A]));
    let (mock, mut reader) = shared_mock_reader(replies);

    let uid = reader.select_uid().unwrap();
    assert_eq!(
        uid.as_bytes(),
        &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]
    );
    assert_eq!(mock.borrow().sent_frames[4], vec![0x97, 0x20]);
}

#[test]
fn corrupted_check_byte_aborts() {
    let mut data = vec![0x12, 0x34, 0x56, 0x78];
    let check = 0x12 ^ 0x34 ^ 0x56 ^ 0x78;
    data.push(check ^ 0x01);
    let (_, mut reader) = shared_mock_reader(vec![Reply::Bytes {
        data,
        valid_bits: 0,
    }]);

    match reader.select_uid() {
        Err(Error::ChecksumMismatch { .. }) => {}
        other => panic!("expected checksum mismatch, got {:?}", other),
    }
}

#[test]
fn short_anticoll_answer_aborts() {
    let (_, mut reader) = shared_mock_reader(vec![Reply::Bytes {
        data: vec![0x12, 0x34, 0x56],
        valid_bits: 0,
    }]);
    match reader.select_uid() {
        Err(Error::InvalidLength { .. }) => {}
        other => panic!("expected invalid length, got {:?}", other),
    }
}

#[test]
fn wrong_sak_width_aborts() {
    // SELECT must be answered with a 24-bit frame; 16 bits is a failure.
    let replies = vec![
        anticoll_reply([0x12, 0x34, 0x56, 0x78]),
        Reply::Bytes {
            data: vec![0x08, 0x00],
            valid_bits: 0,
        },
    ];
    let (_, mut reader) = shared_mock_reader(replies);
    match reader.select_uid() {
        Err(Error::NotAcknowledged) => {}
        other => panic!("expected not-acknowledged, got {:?}", other),
    }
}

#[test]
fn silent_field_aborts_with_no_uid() {
    let (_, mut reader) = shared_mock_reader(vec![Reply::Timer]);
    assert!(matches!(reader.select_uid(), Err(Error::NoTag)));
}

#[test]
fn second_level_failure_discards_partial_uid() {
    let mut replies = cascade_level([0x88, 0x04, 0x11, 0x22]);
    replies.push(Reply::Timer);
    let (_, mut reader) = shared_mock_reader(replies);
    assert!(matches!(reader.select_uid(), Err(Error::NoTag)));
}
