//! Byte transport to the controller
//!
//! The driver only ever needs to push single bytes to the panel, each one
//! tagged as either a command or display data. How that happens (SPI
//! peripheral, bit-banged GPIO, a test recorder) is up to the implementation.

use crate::command;

/// Whether a byte is an instruction or display RAM data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    /// D/C line low
    Command,
    /// D/C line high
    Data,
}

/// Byte sink to a PCD8544 controller
///
/// Implementations are expected to be synchronous and order preserving.
/// The driver never retries; a returned error is passed straight to the
/// caller.
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Send one byte
    fn send(&mut self, byte: u8, tag: Tag) -> Result<(), Self::Error>;

    /// Send a run of bytes with the same tag
    ///
    /// Override when the hardware can do this in one transfer.
    fn send_all(&mut self, bytes: &[u8], tag: Tag) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.send(byte, tag)?;
        }
        Ok(())
    }

    /// Point the controller's write pointer at `column` within `bank`
    ///
    /// Must be issued while the basic instruction set is active.
    fn set_address(&mut self, column: u8, bank: u8) -> Result<(), Self::Error> {
        self.send(command::SET_X | column, Tag::Command)?;
        self.send(command::SET_Y | bank, Tag::Command)
    }

    /// Pulse the reset line
    fn reset(&mut self) -> Result<(), Self::Error>;
}
