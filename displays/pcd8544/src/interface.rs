//! embedded-hal SPI transport
//!
//! Wires a [`Transport`] onto an embedded-hal 1.0 `SpiDevice` plus the D/C
//! and RST lines. Chip select belongs to the `SpiDevice`, so sharing the bus
//! with other peripherals works through the usual bus-sharing wrappers.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::transport::{Tag, Transport};

/// Reset pulse width in microseconds (datasheet minimum is 100 ns)
pub const RESET_PULSE_US: u32 = 10;

/// Errors from the SPI transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceError<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// D/C or RST pin could not be driven
    Pin(P),
}

/// PCD8544 transport over a write-only SPI link
pub struct SpiTransport<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
}

impl<SPI, DC, RST, D> SpiTransport<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    /// Create a new SPI transport
    ///
    /// # Arguments
    /// - `spi`: SPI device (mode 0, up to 4 MHz), owns chip select
    /// - `dc`: Data/command select, low = command
    /// - `rst`: Active-low reset
    /// - `delay`: Used for the reset pulse
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        Self { spi, dc, rst, delay }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, RST, D) {
        (self.spi, self.dc, self.rst, self.delay)
    }

    fn select(&mut self, tag: Tag) -> Result<(), InterfaceError<SPI::Error, DC::Error>> {
        match tag {
            Tag::Command => self.dc.set_low(),
            Tag::Data => self.dc.set_high(),
        }
        .map_err(InterfaceError::Pin)
    }
}

impl<SPI, DC, RST, D> Transport for SpiTransport<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send(&mut self, byte: u8, tag: Tag) -> Result<(), Self::Error> {
        self.send_all(&[byte], tag)
    }

    fn send_all(&mut self, bytes: &[u8], tag: Tag) -> Result<(), Self::Error> {
        self.select(tag)?;
        self.spi.write(bytes).map_err(InterfaceError::Spi)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        self.delay.delay_us(RESET_PULSE_US);
        self.rst.set_high().map_err(InterfaceError::Pin)
    }
}
