// Slot record codec properties.

use librc522::{
    BlockData, Error, Uid, decode_slot, decode_slot_encrypted, encode_slot, encode_slot_encrypted,
};
use proptest::prelude::*;

fn arb_uid() -> impl Strategy<Value = Uid> {
    prop::sample::select(vec![4usize, 7, 10])
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
        .prop_map(|bytes| Uid::try_from(&bytes[..]).unwrap())
}

proptest! {
    #[test]
    fn roundtrip_all_lengths(secret in prop::collection::vec(any::<u8>(), 0..=32)) {
        let blocks = encode_slot(&secret).unwrap();
        prop_assert_eq!(decode_slot(&blocks).unwrap(), secret);
    }

    #[test]
    fn encrypted_roundtrip_all_lengths(
        secret in prop::collection::vec(any::<u8>(), 0..=32),
        uid in arb_uid(),
    ) {
        let blocks = encode_slot_encrypted(&secret, &uid).unwrap();
        prop_assert_eq!(decode_slot_encrypted(&blocks, &uid).unwrap(), secret);
    }

    // Flipping any single bit of the stored CRC must surface as corruption.
    #[test]
    fn crc_corruption_always_detected(
        secret in prop::collection::vec(any::<u8>(), 1..=32),
        bit in 0usize..16,
    ) {
        let blocks = encode_slot(&secret).unwrap();
        let mut trailer = *blocks[2].as_bytes();
        trailer[bit / 8] ^= 1 << (bit % 8);
        let tampered = [blocks[0], blocks[1], BlockData::from_bytes(trailer)];
        let detected = matches!(
            decode_slot(&tampered),
            Err(Error::ChecksumMismatch { .. })
        );
        prop_assert!(detected);
    }

    // Flipping any single bit inside the secret itself must be detected;
    // wrong data is never returned.
    #[test]
    fn payload_corruption_always_detected(
        secret in prop::collection::vec(any::<u8>(), 1..=32),
        flip in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let blocks = encode_slot(&secret).unwrap();
        let index = flip.index(secret.len());

        let mut payload = [0u8; 32];
        payload[..16].copy_from_slice(blocks[0].as_bytes());
        payload[16..].copy_from_slice(blocks[1].as_bytes());
        payload[index] ^= 1 << bit;

        let mut b0 = [0u8; 16];
        b0.copy_from_slice(&payload[..16]);
        let mut b1 = [0u8; 16];
        b1.copy_from_slice(&payload[16..]);
        let tampered = [
            BlockData::from_bytes(b0),
            BlockData::from_bytes(b1),
            blocks[2],
        ];

        match decode_slot(&tampered) {
            Err(Error::ChecksumMismatch { .. }) => {}
            Ok(decoded) => prop_assert_ne!(decoded, secret),
            other => prop_assert!(false, "unexpected outcome: {:?}", other),
        }
    }
}

#[test]
fn trailer_layout_for_known_secret() {
    let secret = hex::decode("404142434445").unwrap();
    let blocks = encode_slot(&secret).unwrap();
    let crc = librc522::device::crc::crc_a(&secret);
    assert_eq!(blocks[2].as_bytes()[..4], [crc[1], crc[0], 6, 0]);
    assert_eq!(blocks[2].as_bytes()[4..], [0u8; 12]);
}

#[test]
fn encode_rejects_oversized_secrets() {
    assert!(matches!(
        encode_slot(&[0u8; 33]),
        Err(Error::InvalidLength { .. })
    ));
}
