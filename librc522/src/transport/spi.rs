// librc522-rs/librc522/src/transport/spi.rs

//! Raspberry Pi SPI transport backed by `rppal`.
//!
//! Chip select is owned by the SPI peripheral (one assertion per transfer),
//! so every [`Transport`] call maps to exactly one framed bus transaction.

use std::thread;
use std::time::Duration;

use rppal::gpio::{Gpio, OutputPin};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::Result;
use crate::transport::traits::Transport;

/// Default SPI clock for the MFRC522 (the chip tops out at 10 MHz).
pub const DEFAULT_CLOCK_HZ: u32 = 1_000_000;

pub struct SpiTransport {
    spi: Spi,
    rst: OutputPin,
}

impl SpiTransport {
    /// Open the given SPI bus/slave-select pair and claim the BCM pin
    /// wired to the chip's RST terminal.
    pub fn open(bus: Bus, select: SlaveSelect, rst_pin: u8) -> Result<Self> {
        let spi = Spi::new(bus, select, DEFAULT_CLOCK_HZ, Mode::Mode0)?;
        let rst = Gpio::new()?.get(rst_pin)?.into_output_high();
        Ok(Self { spi, rst })
    }
}

impl Transport for SpiTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.spi.write(data)?;
        Ok(())
    }

    fn write_read(&mut self, addr_frame: u8) -> Result<u8> {
        // Full duplex: clock the address frame out while the chip shifts
        // the register value back on the second byte.
        let tx = [addr_frame, 0x00];
        let mut rx = [0u8; 2];
        self.spi.transfer(&mut rx, &tx)?;
        Ok(rx[1])
    }

    fn reset(&mut self) -> Result<()> {
        self.rst.set_low();
        thread::sleep(Duration::from_micros(50));
        self.rst.set_high();
        thread::sleep(Duration::from_millis(50));
        Ok(())
    }
}
