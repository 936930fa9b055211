//! Text engine
//!
//! Text is laid out on a grid of 6x8 pixel cells: a 5 pixel wide glyph plus
//! one blank column, one cell row per bank. That gives 14 columns by 6 rows.
//! Glyph columns are copied straight into the framebuffer bytes since a
//! glyph column already is a packed vertical strip of 8 pixels.

use crate::font::{self, GLYPH_WIDTH};
use crate::framebuffer::Framebuffer;
use crate::status::Status;
use crate::{BANKS, WIDTH};

/// Width of a text cell including the gap column
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;

/// Text columns per row
pub const TEXT_COLUMNS: usize = WIDTH / CELL_WIDTH;

/// Text rows on the panel
pub const TEXT_ROWS: usize = BANKS;

/// Text cursor in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    column: u8,
    row: u8,
}

impl Cursor {
    /// Cursor at the top-left cell
    pub const fn new() -> Self {
        Self { column: 0, row: 0 }
    }

    /// Current cell column
    pub const fn column(&self) -> u8 {
        self.column
    }

    /// Current cell row
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Move to a cell
    ///
    /// Returns `OutOfBorder` and leaves the cursor alone when the cell is
    /// off the grid.
    pub fn goto(&mut self, column: u8, row: u8) -> Status {
        if usize::from(column) >= TEXT_COLUMNS || usize::from(row) >= TEXT_ROWS {
            return Status::OutOfBorder;
        }
        self.column = column;
        self.row = row;
        Status::Ok
    }

    /// Framebuffer index of the first byte of the current cell
    pub const fn byte_index(&self) -> usize {
        self.row as usize * WIDTH + self.column as usize * CELL_WIDTH
    }

    /// Step one cell forward; returns true if the cursor wrapped
    fn advance(&mut self) -> bool {
        self.column += 1;
        if usize::from(self.column) < TEXT_COLUMNS {
            return false;
        }

        self.column = 0;
        self.row += 1;
        if usize::from(self.row) >= TEXT_ROWS {
            // Wrap to the top; the panel never scrolls
            self.row = 0;
        }
        true
    }

    /// Render one character at the cursor and advance
    ///
    /// Characters the font does not cover render as blanks. Returns
    /// `OkWithWrap` when this character filled the last cell of a row.
    pub fn put_char(&mut self, fb: &mut Framebuffer, ch: char) -> Status {
        let start = self.byte_index();
        for (offset, &column) in font::glyph(ch).iter().enumerate() {
            fb.set_byte(start + offset, column);
        }
        fb.set_byte(start + GLYPH_WIDTH, 0x00);

        if self.advance() {
            Status::OkWithWrap
        } else {
            Status::Ok
        }
    }

    /// Render a string, stopping at the first non-`Ok` status
    ///
    /// The character that triggered a wrap is drawn; everything after it
    /// is not.
    pub fn put_str(&mut self, fb: &mut Framebuffer, text: &str) -> Status {
        for ch in text.chars() {
            let status = self.put_char(fb, ch);
            if !status.is_ok() {
                return status;
            }
        }
        Status::Ok
    }
}

impl Framebuffer {
    /// Invert text cells `start_col..end_col` on `row` (for selection highlighting)
    pub fn invert_cells(&mut self, row: u8, start_col: u8, end_col: u8) -> Status {
        if usize::from(row) >= TEXT_ROWS
            || start_col > end_col
            || usize::from(end_col) > TEXT_COLUMNS
        {
            return Status::OutOfBorder;
        }

        let base = usize::from(row) * WIDTH;
        let start = base + usize::from(start_col) * CELL_WIDTH;
        let end = base + usize::from(end_col) * CELL_WIDTH;
        for index in start..end {
            self.set_byte(index, !self.byte(index));
        }
        Status::Ok
    }
}
