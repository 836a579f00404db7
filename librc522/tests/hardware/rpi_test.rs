#![cfg(feature = "rpi")]

//! 共通: 実機テスト
//!
//! このファイルは `--features rpi` でコンパイルされる実機テストです。
//! RC522 モジュールが SPI0/CE0 に接続されている環境でのみ意味があるため、
//! CI では `#[ignore]` で実行されません。

use librc522::transport::spi::SpiTransport;
use librc522::transport::traits::Transport;
use librc522::{Reader, Result, Uninitialized, WakeMode};
use rppal::spi::{Bus, SlaveSelect};
use serial_test::serial;

const RST_PIN: u8 = 25;

fn open_reader() -> Result<librc522::Reader<librc522::Initialized>> {
    let transport = SpiTransport::open(Bus::Spi0, SlaveSelect::Ss0, RST_PIN)?;
    let boxed: Box<dyn Transport> = Box::new(transport);
    Reader::<Uninitialized>::new_with_transport(boxed).initialize()
}

// This integration test requires a real RC522 wired up. Run manually with:
//
// cargo test -p librc522 --test hardware --features rpi -- --ignored

#[test]
#[ignore]
#[serial]
fn initialize_and_probe() -> Result<()> {
    let mut reader = open_reader()?;
    // An empty field answers with NoTag; both outcomes prove the bus works.
    match reader.request(WakeMode::Idle) {
        Ok(_) | Err(librc522::Error::NoTag) | Err(librc522::Error::Timeout) => Ok(()),
        Err(e) => Err(e),
    }
}

#[test]
#[ignore]
#[serial]
fn coprocessor_crc_against_software() -> Result<()> {
    let mut reader = open_reader()?;
    let data = [0x30u8, 0x00];
    let hw = reader.calculate_crc(&data)?;
    assert_eq!(hw, librc522::device::crc::crc_a(&data));
    Ok(())
}
