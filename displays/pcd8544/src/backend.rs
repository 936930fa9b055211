//! Display backend traits
//!
//! Hardware-agnostic interface for menu-style UIs, in character cells and
//! pixels. `Pcd8544` implements both traits on top of its own drawing
//! primitives so UI code can target it like any other panel.

use crate::driver::Pcd8544;
use crate::status::{PixelMode, Status};
use crate::text::{TEXT_COLUMNS, TEXT_ROWS};
use crate::transport::Transport;
use crate::{HEIGHT, WIDTH};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Text-cell view of a panel
///
/// The PCD8544 grid is 14 columns by 6 rows of 6x8 cells. Drawing only
/// touches the framebuffer until `flush`.
pub trait DisplayBackend {
    /// Blank the framebuffer (the whole panel goes out on the next flush)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write `text` starting at cell (`col`, `row`)
    ///
    /// Text that runs past column 13 is cut off instead of wrapping.
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert cells `start_col..end_col` of `row`, e.g. a selected menu entry
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Send the dirty byte range to the panel (partial update)
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// (columns, rows) in text cells
    fn dimensions(&self) -> (u8, u8);

    /// Whether the controller has been initialized
    fn is_ready(&self) -> bool;
}

/// Pixel drawing on top of [`DisplayBackend`]
///
/// Shapes reaching past the 84x48 panel report
/// `DisplayError::InvalidCoordinates`. Their on-panel pixels are still
/// drawn unless a value does not fit in a `u8`.
pub trait GraphicsDisplayBackend: DisplayBackend {
    fn draw_hline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError>;

    fn draw_vline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError>;

    /// Outline, one pixel wide
    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError>;

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError>;

    /// (width, height) in pixels
    fn pixel_dimensions(&self) -> (u16, u16);
}

fn check(status: Status) -> Result<(), DisplayError> {
    match status {
        Status::OutOfBorder => Err(DisplayError::InvalidCoordinates),
        Status::Ok | Status::OkWithWrap => Ok(()),
    }
}

/// Narrow a pixel coordinate or length; anything past 255 is off-panel anyway
fn narrow(value: u16) -> Result<u8, DisplayError> {
    u8::try_from(value).map_err(|_| DisplayError::InvalidCoordinates)
}

impl<T: Transport> DisplayBackend for Pcd8544<T> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Pcd8544::clear(self);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        check(self.goto_text_position(col, row))?;
        for ch in text.chars() {
            if self.put_char(ch) == Status::OkWithWrap {
                break;
            }
        }
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        check(self.framebuffer_mut().invert_cells(row, start_col, end_col))
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.is_initialized() {
            return Err(DisplayError::NotInitialized);
        }
        self.update().map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u8, u8) {
        (TEXT_COLUMNS as u8, TEXT_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.is_initialized()
    }
}

impl<T: Transport> GraphicsDisplayBackend for Pcd8544<T> {
    fn draw_hline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError> {
        let (x, y, length) = (narrow(x)?, narrow(y)?, narrow(length)?);
        check(self.framebuffer_mut().draw_hline(x, y, length, PixelMode::On))
    }

    fn draw_vline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError> {
        let (x, y, length) = (narrow(x)?, narrow(y)?, narrow(length)?);
        check(self.framebuffer_mut().draw_vline(x, y, length, PixelMode::On))
    }

    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        let (x, y) = (narrow(x)?, narrow(y)?);
        let (width, height) = (narrow(width)?, narrow(height)?);
        check(self.framebuffer_mut().draw_rect(x, y, width, height, PixelMode::On))
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        let (x, y) = (narrow(x)?, narrow(y)?);
        let (width, height) = (narrow(width)?, narrow(height)?);
        check(self.framebuffer_mut().fill_rect(x, y, width, height, PixelMode::On))
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}
