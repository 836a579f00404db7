// librc522-rs/librc522/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("reader not found")]
    ReaderNotFound,

    // SPI 実装を後から有効化できるように optional dependency にしている
    #[cfg(feature = "rpi")]
    #[error("spi error: {0}")]
    Spi(#[from] rppal::spi::Error),

    #[cfg(feature = "rpi")]
    #[error("gpio error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("bus error: {0}")]
    Bus(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("no tag in field")]
    NoTag,

    #[error("protocol error: error register bits {bits:#04x}")]
    Protocol { bits: u8 },

    #[error("checksum mismatch: expected {expected:#06x}, got {actual:#06x}")]
    ChecksumMismatch { expected: u16, actual: u16 },

    #[error("tag did not acknowledge the frame")]
    NotAcknowledged,

    #[error("authentication rejected for block {block}")]
    AuthFailed { block: u8 },

    #[error("no authentication session covers block {block}")]
    AuthMissing { block: u8 },

    #[error("address {address} out of range (max {max})")]
    OutOfRange { address: u8, max: u8 },

    #[error("operation timed out")]
    Timeout,

    #[cfg(feature = "serde")]
    #[error("malformed key file: {0}")]
    KeyFile(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
