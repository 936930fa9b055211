//! Driver for PCD8544-based Nokia 3310/5110 LCD panels
//!
//! This crate provides:
//! - `Framebuffer` - the bit-packed 84x48 pixel store with dirty-range tracking
//! - Pixel, line, rectangle and bar-graph drawing with `PixelMode` combination
//! - A 5x7 font text engine with a cell cursor and wrap-around semantics
//! - `Pcd8544` - the driver that synchronises the framebuffer to the panel,
//!   either as a partial (dirty range) or a stepped full update
//! - `Transport` - the single byte-sink seam to the hardware, plus an
//!   embedded-hal SPI implementation
//! - `DisplayBackend` implementations for text-mode UI rendering
//!
//! # Memory layout
//!
//! ```text
//!          x = 0 ......................... 83
//! bank 0  [  0][  1][  2] ............ [ 83]   rows 0..8
//! bank 1  [ 84][ 85][ 86] ............ [167]   rows 8..16
//!   ...
//! bank 5  [420][421][422] ............ [503]   rows 40..48
//! ```
//!
//! Each byte holds 8 vertically stacked pixels of one column, bit 0 on top.
//!
//! # Drawing results
//!
//! Drawing calls never fail hard. They report a [`Status`]: `Ok`,
//! `OutOfBorder` when a coordinate fell outside the panel (nothing is drawn
//! there), or `OkWithWrap` when text wrapped to the next line. Only
//! operations that talk to the panel return a `Result` carrying the
//! transport's error.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod command;
pub mod config;
pub mod driver;
pub mod font;
pub mod framebuffer;
pub mod graphics;
pub mod interface;
pub mod status;
pub mod text;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

/// Panel width in pixels
pub const WIDTH: usize = 84;

/// Panel height in pixels
pub const HEIGHT: usize = 48;

/// Number of 8-row banks
pub const BANKS: usize = HEIGHT / 8;

/// Framebuffer size in bytes (84 * 48 / 8)
pub const BUFFER_LEN: usize = WIDTH * BANKS;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, GraphicsDisplayBackend};
pub use config::{Config, ConfigError, DisplayMode};
pub use driver::{FrameProgress, Pcd8544};
pub use framebuffer::{DirtyRange, Framebuffer};
pub use interface::{InterfaceError, SpiTransport};
pub use status::{PixelMode, Status};
pub use text::{Cursor, TEXT_COLUMNS, TEXT_ROWS};
pub use transport::{Tag, Transport};
