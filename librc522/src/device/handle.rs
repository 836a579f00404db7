// librc522-rs/librc522/src/device/handle.rs

use std::marker::PhantomData;

use log::debug;

use crate::constants::{CMD_SOFT_RESET, Register};
use crate::device::command::{self, Received};
use crate::device::crc;
use crate::transport::Transport;
use crate::types::{AuthSession, BlockData, Key, KeyType, TagKind, Uid, WakeMode};
use crate::Result;
use crate::utils::PollBudget;

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader handle that enforces initialization state at compile time.
///
/// Exactly one in-flight command at a time: every operation takes `&mut
/// self`, and callers must serialize all access against one instance.
pub struct Reader<State = Uninitialized> {
    transport: Box<dyn Transport>,
    session: Option<AuthSession>,
    _state: PhantomData<State>,
}

impl<State> Reader<State> {
    /// Read a chip register: one framed bus transaction.
    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        self.transport.write_read(reg.read_frame())
    }

    /// Write a chip register: one framed bus transaction.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.transport.write(&[reg.write_frame(), value])
    }

    /// Read-modify-write setting `mask` bits.
    pub fn set_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value | mask)
    }

    /// Read-modify-write clearing `mask` bits.
    pub fn clear_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value & !mask)
    }
}

impl Reader<Uninitialized> {
    /// Create a Reader from an existing Transport instance. This is
    /// primarily intended for tests where a MockTransport is provided.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            session: None,
            _state: PhantomData,
        }
    }

    /// Bring the chip up: reset-line pulse, soft reset, timer and
    /// modulation setup, antenna on. Returns an initialized Reader.
    pub fn initialize(self) -> Result<Reader<Initialized>> {
        let mut this = self;
        this.transport.reset()?;
        this.write_register(Register::Command, CMD_SOFT_RESET)?;

        // Timeout timer: TAuto, prescaler and reload chosen so slow but
        // valid tag answers still land inside the window.
        this.write_register(Register::TMode, 0x8D)?;
        this.write_register(Register::TPrescaler, 0x3E)?;
        this.write_register(Register::TReloadLow, 30)?;
        this.write_register(Register::TReloadHigh, 0)?;
        // Force 100% ASK modulation, CRC preset 0x6363.
        this.write_register(Register::TxAsk, 0x40)?;
        this.write_register(Register::Mode, 0x3D)?;

        let mut reader = Reader {
            transport: this.transport,
            session: None,
            _state: PhantomData,
        };
        reader.antenna_on()?;
        debug!("reader initialized, antenna on");
        Ok(reader)
    }
}

impl Reader<Initialized> {
    /// Switch the antenna drivers on if they are not already.
    pub fn antenna_on(&mut self) -> Result<()> {
        if self.read_register(Register::TxControl)? & 0x03 != 0x03 {
            self.set_bits(Register::TxControl, 0x03)?;
        }
        Ok(())
    }

    /// Switch the antenna drivers off.
    pub fn antenna_off(&mut self) -> Result<()> {
        self.clear_bits(Register::TxControl, 0x03)
    }

    /// Set the receiver gain (RFCfgReg bits 4-6, 18-48 dB).
    pub fn set_antenna_gain(&mut self, gain: u8) -> Result<()> {
        self.clear_bits(Register::RfCfg, 0x07 << 4)?;
        self.set_bits(Register::RfCfg, gain & (0x07 << 4))
    }

    /// Compute CRC_A over `data` using the chip's coprocessor.
    pub fn calculate_crc(&mut self, data: &[u8]) -> Result<[u8; 2]> {
        crc::coprocessor_crc(self, data)
    }

    /// Run one command cycle with an explicit poll budget.
    pub fn communicate(
        &mut self,
        cmd: u8,
        send: &[u8],
        tx_last_bits: u8,
        budget: PollBudget,
    ) -> Result<Received> {
        command::communicate(self, cmd, send, tx_last_bits, budget)
    }

    /// Transceive `send` over the field with the default poll budget.
    pub fn transceive(&mut self, send: &[u8], tx_last_bits: u8) -> Result<Received> {
        command::transceive(self, send, tx_last_bits)
    }

    /// Probe for a tag in the field; success yields the 16-bit ATQA.
    pub fn request(&mut self, mode: WakeMode) -> Result<[u8; 2]> {
        crate::picc::request::request(self, mode)
    }

    /// Run the cascaded anticollision/selection procedure.
    pub fn select_uid(&mut self) -> Result<Uid> {
        crate::picc::select::select_uid(self)
    }

    /// Probe, select and classify the tag in the field.
    pub fn select(&mut self, mode: WakeMode) -> Result<crate::tag::Tag> {
        let atqa = self.request(mode)?;
        let uid = self.select_uid()?;
        let kind = self.detect()?;
        debug!("selected uid={} atqa={:02x}{:02x}", uid.to_hex(), atqa[1], atqa[0]);
        Ok(crate::tag::Tag::new(uid, kind))
    }

    /// Authenticate one sector; supersedes any previous session.
    pub fn authenticate(
        &mut self,
        key_type: KeyType,
        block: u8,
        key: &Key,
        uid: &Uid,
    ) -> Result<()> {
        crate::picc::auth::authenticate(self, key_type, block, key, uid)
    }

    /// Disengage the crypto unit and forget the session.
    pub fn stop_crypto(&mut self) -> Result<()> {
        crate::picc::auth::stop_crypto(self)
    }

    /// The currently open authentication session, if any.
    pub fn session(&self) -> Option<AuthSession> {
        self.session
    }

    pub(crate) fn set_session(&mut self, session: Option<AuthSession>) {
        self.session = session;
    }

    /// Read a 16-byte block without session gating.
    pub fn read_raw(&mut self, block: u8) -> Result<Option<BlockData>> {
        crate::picc::block::read_raw(self, block)
    }

    /// Write a 16-byte block without session gating.
    pub fn write_raw(&mut self, block: u8, data: &BlockData) -> Result<()> {
        crate::picc::block::write_raw(self, block, data)
    }

    /// Read a sector-card block; requires an open session for its sector.
    pub fn read_block(&mut self, block: u8) -> Result<Option<BlockData>> {
        crate::picc::block::read_block(self, block)
    }

    /// Write a sector-card block; requires an open session for its sector.
    pub fn write_block(&mut self, block: u8, data: &BlockData) -> Result<()> {
        crate::picc::block::write_block(self, block, data)
    }

    /// Raw GET_VERSION answer from the tag.
    pub fn get_version(&mut self) -> Result<Vec<u8>> {
        crate::picc::version::get_version(self)
    }

    /// Classify the selected tag.
    pub fn detect(&mut self) -> Result<TagKind> {
        crate::picc::version::detect(self)
    }
}
