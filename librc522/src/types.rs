// librc522-rs/librc522/src/types.rs

use crate::Error;
use std::convert::TryFrom;

/// Tag UID - Newtype Pattern (4/7/10 バイト)
///
/// Valid only while the tag stays selected; a new selection cycle or field
/// loss invalidates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First four UID bytes, as consumed by the MFAuthent handshake.
    pub fn key_bytes(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.0[..4]);
        out
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 | 7 | 10 => Ok(Self(bytes.to_vec())),
            n => Err(Error::InvalidLength {
                expected: 4,
                actual: n,
            }),
        }
    }
}

/// 6-byte sector key. Opaque to the driver; supplied by the caller's
/// key source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key([u8; 6]);

impl Key {
    /// Transport-default key shipped on blank cards.
    pub const DEFAULT: Self = Self([0xFF; 6]);

    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 6];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Which of the two sector keys to authenticate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyType {
    A,
    B,
}

impl KeyType {
    /// MIFARE authentication command byte for this key slot.
    pub fn command_byte(self) -> u8 {
        match self {
            Self::A => crate::constants::PICC_AUTH_KEY_A,
            Self::B => crate::constants::PICC_AUTH_KEY_B,
        }
    }
}

/// Wake-up mode for the presence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeMode {
    /// REQA: wake only tags not yet halted.
    Idle,
    /// WUPA: wake all tags, including halted ones.
    All,
}

impl WakeMode {
    pub fn command_byte(self) -> u8 {
        match self {
            Self::Idle => crate::constants::PICC_REQIDL,
            Self::All => crate::constants::PICC_REQALL,
        }
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub const ZERO: Self = Self([0u8; 16]);

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 16 {
            return Err(Error::InvalidLength {
                expected: 16,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// PageData (4 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageData([u8; 4]);

impl PageData {
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Right-pad to a full 16-byte block for the shared write path.
    pub fn to_block(&self) -> BlockData {
        let mut block = [0u8; 16];
        block[..4].copy_from_slice(&self.0);
        BlockData::from_bytes(block)
    }
}

impl TryFrom<&[u8]> for PageData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// NTAG21x model detected via the version query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageVariant {
    Ntag213,
    Ntag215,
    Ntag216,
}

impl PageVariant {
    /// Highest addressable page for the variant.
    pub fn max_page(self) -> u8 {
        match self {
            Self::Ntag213 => 44,
            Self::Ntag215 => 134,
            Self::Ntag216 => 230,
        }
    }
}

/// Tag classification, returned once by detection and threaded explicitly
/// through later calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagKind {
    Unknown,
    /// MIFARE Classic style card: 16-byte blocks 0-63, key-gated sectors.
    SectorTag,
    /// NTAG21x style tag: 4-byte pages, no authentication.
    PageTag { variant: PageVariant, max_page: u8 },
}

/// Driver-side record of the chip's single authentication session.
///
/// The chip retains only one active session; a new authenticate call
/// supersedes the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSession {
    pub block: u8,
    pub key_type: KeyType,
}

impl AuthSession {
    /// Whether this session's sector covers `block`.
    pub fn covers(&self, block: u8) -> bool {
        self.block / 4 == block / 4
    }
}

/// Absolute block address for a (sector, block-in-sector) pair.
pub fn absolute_block(sector: u8, block: u8) -> u8 {
    sector * 4 + (block % 4)
}

/// Whether `block` is a sector trailer (keys + access bits, never payload).
pub fn is_trailer(block: u8) -> bool {
    block % 4 == 3
}

/// JSON key file layout used by callers that load their default key from
/// storage.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct KeyFile {
    pub default_key: Key,
}

#[cfg(feature = "serde")]
impl KeyFile {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::KeyFile(e.to_string()))
    }
}
