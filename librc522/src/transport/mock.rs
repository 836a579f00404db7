// librc522-rs/librc522/src/transport/mock.rs

use std::collections::VecDeque;

use crate::constants::{
    CMD_CALC_CRC, CMD_MF_AUTHENT, CMD_SOFT_RESET, CMD_TRANSCEIVE, CRC_IRQ, CRYPTO1_ON, FIFO_FLUSH,
    Register,
};
use crate::device::crc::crc_a;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// One scripted tag-side reaction to a Transceive or MFAuthent cycle.
///
/// Exchanges are consumed in order, one per command start. A command with no
/// scripted exchange behaves like [`Reply::Silence`].
#[derive(Debug, Clone)]
pub enum Reply {
    /// The tag answers with `data`; `valid_bits` is the number of valid bits
    /// in the last byte (0 = all eight).
    Bytes { data: Vec<u8>, valid_bits: u8 },
    /// 4-bit MIFARE ACK (low nibble 0xA).
    Ack,
    /// 4-bit MIFARE NAK.
    Nak,
    /// The timer expires with nothing received.
    Timer,
    /// No interrupt ever fires; the driver runs out its poll budget.
    Silence,
    /// The error register latches the given bits.
    ErrorBits(u8),
    /// MFAuthent succeeds and the crypto unit engages.
    AuthOk,
}

/// Mock transport for unit tests: a register-level simulation of the chip.
///
/// Registers behave as plain bytes except where the driver depends on chip
/// side effects: FIFO access, FIFO flush, the Set1/Set2 semantics of the two
/// interrupt registers, the CRC coprocessor and the command register. Tag
/// behavior is scripted through a queue of [`Reply`] values; transmitted
/// frames are recorded for assertions.
#[derive(Debug)]
pub struct MockTransport {
    regs: [u8; 64],
    fifo: VecDeque<u8>,
    replies: VecDeque<Reply>,
    /// FIFO payload captured at each Transceive/MFAuthent start.
    pub sent_frames: Vec<Vec<u8>>,
    /// Number of interrupt-status register reads, for poll-budget tests.
    pub irq_polls: u32,
    /// Number of reset-line pulses.
    pub resets: usize,
    /// Testing hook: number of upcoming bus transactions that should fail.
    pub io_failures: usize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            regs: [0u8; 64],
            fifo: VecDeque::new(),
            replies: VecDeque::new(),
            sent_frames: Vec::new(),
            irq_polls: 0,
            resets: 0,
            io_failures: 0,
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    /// Set how many subsequent bus transactions should fail (for tests).
    pub fn set_io_failures(&mut self, n: usize) {
        self.io_failures = n;
    }

    /// Direct register inspection for assertions.
    pub fn register(&self, reg: Register) -> u8 {
        self.regs[reg as usize]
    }

    fn check_io(&mut self) -> Result<()> {
        if self.io_failures > 0 {
            self.io_failures -= 1;
            return Err(Error::Bus("injected fault".into()));
        }
        Ok(())
    }

    fn store(&mut self, addr: u8, value: u8) {
        let reg = addr as usize & 0x3F;
        match addr {
            a if a == Register::FifoData as u8 => {
                self.fifo.push_back(value);
            }
            a if a == Register::FifoLevel as u8 => {
                if value & FIFO_FLUSH != 0 {
                    self.fifo.clear();
                }
                self.regs[reg] = 0;
            }
            // CommIrqReg / DivIrqReg: bit 7 selects set (1) or clear (0)
            // of the marked bits, as on the chip.
            a if a == Register::CommIrq as u8 || a == Register::DivIrq as u8 => {
                if value & 0x80 != 0 {
                    self.regs[reg] |= value & 0x7F;
                } else {
                    self.regs[reg] &= !value;
                }
            }
            a if a == Register::Command as u8 => {
                self.regs[reg] = value;
                self.run_command(value);
            }
            _ => {
                self.regs[reg] = value;
            }
        }
    }

    fn load(&mut self, addr: u8) -> u8 {
        match addr {
            a if a == Register::FifoData as u8 => self.fifo.pop_front().unwrap_or(0),
            a if a == Register::FifoLevel as u8 => self.fifo.len() as u8,
            a if a == Register::CommIrq as u8 => {
                self.irq_polls += 1;
                self.regs[addr as usize]
            }
            _ => self.regs[addr as usize & 0x3F],
        }
    }

    fn run_command(&mut self, cmd: u8) {
        match cmd {
            CMD_SOFT_RESET => {
                self.regs = [0u8; 64];
                self.fifo.clear();
            }
            CMD_CALC_CRC => {
                let data: Vec<u8> = self.fifo.drain(..).collect();
                let crc = crc_a(&data);
                self.regs[Register::CrcResultLow as usize] = crc[0];
                self.regs[Register::CrcResultHigh as usize] = crc[1];
                self.regs[Register::DivIrq as usize] |= CRC_IRQ;
            }
            CMD_TRANSCEIVE | CMD_MF_AUTHENT => {
                let sent: Vec<u8> = self.fifo.drain(..).collect();
                self.sent_frames.push(sent);
                let reply = self.replies.pop_front().unwrap_or(Reply::Silence);
                self.apply_reply(reply);
            }
            _ => {}
        }
    }

    fn apply_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Bytes { data, valid_bits } => {
                self.fifo = data.into();
                self.regs[Register::Control as usize] = valid_bits & 0x07;
                self.regs[Register::Error as usize] = 0;
                self.regs[Register::CommIrq as usize] |= 0x30;
            }
            Reply::Ack => self.apply_reply(Reply::Bytes {
                data: vec![0x0A],
                valid_bits: 4,
            }),
            Reply::Nak => self.apply_reply(Reply::Bytes {
                data: vec![0x04],
                valid_bits: 4,
            }),
            Reply::Timer => {
                self.regs[Register::Error as usize] = 0;
                self.regs[Register::CommIrq as usize] |= 0x01;
            }
            Reply::Silence => {}
            Reply::ErrorBits(bits) => {
                self.regs[Register::Error as usize] = bits;
                self.regs[Register::CommIrq as usize] |= 0x30;
            }
            Reply::AuthOk => {
                self.regs[Register::Error as usize] = 0;
                self.regs[Register::CommIrq as usize] |= 0x10;
                self.regs[Register::Status2 as usize] |= CRYPTO1_ON;
            }
        }
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.check_io()?;
        // Register write frames arrive as [addr_frame, value] pairs.
        if data.len() != 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: data.len(),
            });
        }
        let addr = (data[0] & 0x7E) >> 1;
        self.store(addr, data[1]);
        Ok(())
    }

    fn write_read(&mut self, addr_frame: u8) -> Result<u8> {
        self.check_io()?;
        let addr = (addr_frame & 0x7E) >> 1;
        Ok(self.load(addr))
    }

    fn reset(&mut self) -> Result<()> {
        self.resets += 1;
        Ok(())
    }
}
