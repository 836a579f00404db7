// Dump the readable blocks of a MIFARE Classic 1K card with the transport
// default key.
//
// cargo run -p librc522 --example dump_classic --features rpi

#[cfg(feature = "rpi")]
fn main() -> anyhow::Result<()> {
    use librc522::transport::spi::SpiTransport;
    use librc522::transport::traits::Transport;
    use librc522::{Error, Key, KeyType, Reader, Uninitialized, WakeMode};
    use rppal::spi::{Bus, SlaveSelect};

    env_logger::init();

    let transport = SpiTransport::open(Bus::Spi0, SlaveSelect::Ss0, 25)?;
    let boxed: Box<dyn Transport> = Box::new(transport);
    let mut reader = Reader::<Uninitialized>::new_with_transport(boxed).initialize()?;

    println!("waiting for a card...");
    let tag = loop {
        match reader.select(WakeMode::Idle) {
            Ok(tag) => break tag,
            Err(Error::NoTag | Error::Timeout) => {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            Err(e) => return Err(e.into()),
        }
    };
    println!("uid: {}", tag.uid().to_hex());

    let blocks = tag.dump_blocks(&mut reader, KeyType::A, &Key::DEFAULT, 0..64)?;
    for (addr, data) in blocks {
        println!(
            "{:02} S{:02} B{}: {}  {}",
            addr,
            addr / 4,
            addr % 4,
            data.to_hex(),
            data.to_ascii_safe()
        );
    }
    reader.stop_crypto()?;
    Ok(())
}

#[cfg(not(feature = "rpi"))]
fn main() {
    eprintln!("build with --features rpi to run this example");
}
