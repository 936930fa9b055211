//! Board wiring for the Nokia 5110 breakout
//!
//! The panel sits alone on SPI1, so chip enable is driven by hand around
//! each transfer instead of going through a shared-bus device.

use embassy_stm32::gpio::Output;
use embassy_time::{block_for, Duration};
use embedded_hal::spi::SpiBus;
use pcd8544::{Tag, Transport};

/// Reset pulse width; the controller needs at least 100 ns
const RESET_PULSE: Duration = Duration::from_micros(10);

/// PCD8544 transport over a transmit-only SPI bus plus CE/DC/RST lines
pub struct BoardTransport<SPI> {
    spi: SPI,
    ce: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
}

impl<SPI: SpiBus> BoardTransport<SPI> {
    pub fn new(spi: SPI, ce: Output<'static>, dc: Output<'static>, rst: Output<'static>) -> Self {
        Self { spi, ce, dc, rst }
    }
}

impl<SPI: SpiBus> Transport for BoardTransport<SPI> {
    type Error = SPI::Error;

    fn send(&mut self, byte: u8, tag: Tag) -> Result<(), Self::Error> {
        self.send_all(&[byte], tag)
    }

    fn send_all(&mut self, bytes: &[u8], tag: Tag) -> Result<(), Self::Error> {
        match tag {
            Tag::Command => self.dc.set_low(),
            Tag::Data => self.dc.set_high(),
        }

        self.ce.set_low();
        let result = self.spi.write(bytes).and_then(|()| self.spi.flush());
        // CE goes back up even when the transfer failed
        self.ce.set_high();
        result
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.rst.set_low();
        block_for(RESET_PULSE);
        self.rst.set_high();
        Ok(())
    }
}
