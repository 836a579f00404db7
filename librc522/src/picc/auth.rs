// librc522-rs/librc522/src/picc/auth.rs

use log::debug;

use crate::constants::{CMD_MF_AUTHENT, CRYPTO1_ON, Register};
use crate::device::handle::{Initialized, Reader};
use crate::types::{AuthSession, Key, KeyType, Uid};
use crate::utils::PollBudget;
use crate::{Error, Result};

/// Run the MFAuthent handshake for the sector containing `block`.
///
/// The frame is `[key command, block, key(6), uid(4)]`. Success engages the
/// chip's crypto unit for that sector until [`stop_crypto`] or a superseding
/// authenticate call; the driver-side session record mirrors that state so
/// callers (and tests) can observe it. A failed handshake is never retried
/// here.
pub fn authenticate(
    reader: &mut Reader<Initialized>,
    key_type: KeyType,
    block: u8,
    key: &Key,
    uid: &Uid,
) -> Result<()> {
    let mut frame = Vec::with_capacity(12);
    frame.push(key_type.command_byte());
    frame.push(block);
    frame.extend_from_slice(key.as_bytes());
    frame.extend_from_slice(&uid.key_bytes());

    match reader.communicate(CMD_MF_AUTHENT, &frame, 0, PollBudget::default()) {
        Ok(_) => {
            reader.set_session(Some(AuthSession { block, key_type }));
            debug!("authenticated block {} with key {:?}", block, key_type);
            Ok(())
        }
        Err(Error::NoTag | Error::Timeout | Error::Protocol { .. }) => {
            // Whatever session was open before, the failed handshake has
            // torn it down on the chip as well.
            reader.set_session(None);
            Err(Error::AuthFailed { block })
        }
        Err(other) => {
            reader.set_session(None);
            Err(other)
        }
    }
}

/// Disengage the crypto unit and clear the session record.
pub fn stop_crypto(reader: &mut Reader<Initialized>) -> Result<()> {
    reader.clear_bits(Register::Status2, CRYPTO1_ON)?;
    reader.set_session(None);
    Ok(())
}
