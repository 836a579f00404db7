// librc522-rs/librc522/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the serial bus away from driver logic.
///
/// Every method is one framed, exclusively-owned bus transaction: the
/// implementation asserts chip select for the duration of the call and
/// releases it before returning. Callers never see partial transactions.
pub trait Transport {
    /// Send raw bytes to the chip in a single chip-select-guarded write.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Send a register address frame and read one byte back within the
    /// same chip-select assertion.
    fn write_read(&mut self, addr_frame: u8) -> Result<u8>;

    /// Pulse the reset line low then high. Called once at startup.
    fn reset(&mut self) -> Result<()>;
}
