// librc522-rs/librc522/src/device/command.rs

use log::trace;

use crate::constants::{
    CMD_IDLE, CMD_MF_AUTHENT, CMD_TRANSCEIVE, ERROR_IRQ_MASK, FIFO_FLUSH, FIFO_MAX, Register,
    START_SEND, TIMER_IRQ,
};
use crate::device::handle::{Initialized, Reader};
use crate::utils::PollBudget;
use crate::{Error, Result};

/// Bytes received from the field by one successful command cycle.
///
/// `bits` is the received bit count; anticollision frames are not always
/// byte-aligned, so it is not simply `data.len() * 8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub data: Vec<u8>,
    pub bits: u16,
}

/// Run one command execution cycle: load the FIFO, start the command, poll
/// the interrupt status under `budget`, drain the FIFO, classify.
///
/// Supports Transceive (send + receive over the field) and MFAuthent (the
/// key handshake; nothing is received on success). The ceiling is the only
/// timeout mechanism; there is no mid-command cancellation. CRC validation
/// is left entirely to callers.
pub fn communicate(
    reader: &mut Reader<Initialized>,
    cmd: u8,
    send: &[u8],
    tx_last_bits: u8,
    budget: PollBudget,
) -> Result<Received> {
    let (irq_en, wait_irq) = match cmd {
        CMD_MF_AUTHENT => (0x12u8, 0x10u8),
        CMD_TRANSCEIVE => (0x77u8, 0x30u8),
        other => {
            return Err(Error::UnsupportedOperation(format!(
                "command {:#04x} is not field-facing",
                other
            )));
        }
    };

    reader.write_register(Register::CommIEn, irq_en | 0x80)?;
    reader.write_register(Register::CommIrq, 0x7F)?;
    reader.set_bits(Register::FifoLevel, FIFO_FLUSH)?;
    reader.write_register(Register::Command, CMD_IDLE)?;

    for &b in send {
        reader.write_register(Register::FifoData, b)?;
    }
    reader.write_register(Register::BitFraming, tx_last_bits & 0x07)?;
    reader.write_register(Register::Command, cmd)?;
    if cmd == CMD_TRANSCEIVE {
        reader.set_bits(Register::BitFraming, START_SEND)?;
    }

    let mut polls = 0u32;
    let mut timed_out = false;
    let irq = loop {
        let n = reader.read_register(Register::CommIrq)?;
        polls += 1;
        if n & (TIMER_IRQ | wait_irq) != 0 {
            break n;
        }
        if polls >= budget.ceiling() {
            timed_out = true;
            break n;
        }
    };
    reader.clear_bits(Register::BitFraming, START_SEND)?;

    if timed_out {
        trace!("command {:#04x}: no irq after {} polls", cmd, polls);
        return Err(Error::Timeout);
    }

    let err_bits = reader.read_register(Register::Error)? & ERROR_IRQ_MASK;
    if err_bits != 0 {
        return Err(Error::Protocol { bits: err_bits });
    }
    if irq & TIMER_IRQ != 0 {
        return Err(Error::NoTag);
    }

    if cmd == CMD_MF_AUTHENT {
        return Ok(Received {
            data: Vec::new(),
            bits: 0,
        });
    }

    let level = reader.read_register(Register::FifoLevel)? as usize;
    let last_bits = (reader.read_register(Register::Control)? & 0x07) as u16;
    let bits = if last_bits != 0 {
        (level.max(1) as u16 - 1) * 8 + last_bits
    } else {
        level as u16 * 8
    };

    let level = level.clamp(1, FIFO_MAX);
    let mut data = Vec::with_capacity(level);
    for _ in 0..level {
        data.push(reader.read_register(Register::FifoData)?);
    }
    trace!("transceive: {} bits <- {:?}", bits, data);

    Ok(Received { data, bits })
}

/// Transceive `send` with the default poll budget.
pub fn transceive(
    reader: &mut Reader<Initialized>,
    send: &[u8],
    tx_last_bits: u8,
) -> Result<Received> {
    communicate(reader, CMD_TRANSCEIVE, send, tx_last_bits, PollBudget::default())
}
