// Poll for a tag on SPI0/CE0 and print its UID and kind.
//
// cargo run -p librc522 --example read_uid --features rpi

#[cfg(feature = "rpi")]
fn main() -> anyhow::Result<()> {
    use librc522::transport::spi::SpiTransport;
    use librc522::transport::traits::Transport;
    use librc522::{Error, Reader, Uninitialized, WakeMode};
    use rppal::spi::{Bus, SlaveSelect};

    env_logger::init();

    let transport = SpiTransport::open(Bus::Spi0, SlaveSelect::Ss0, 25)?;
    let boxed: Box<dyn Transport> = Box::new(transport);
    let mut reader = Reader::<Uninitialized>::new_with_transport(boxed).initialize()?;

    println!("waiting for a tag...");
    loop {
        match reader.select(WakeMode::Idle) {
            Ok(tag) => {
                println!("uid: {}  kind: {:?}", tag.uid().to_hex(), tag.kind());
                return Ok(());
            }
            Err(Error::NoTag | Error::Timeout) => {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(not(feature = "rpi"))]
fn main() {
    eprintln!("build with --features rpi to run this example");
}
