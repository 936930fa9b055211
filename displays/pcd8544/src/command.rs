//! PCD8544 instruction set
//!
//! The controller has two instruction pages selected by the H bit of the
//! function-set command. Addressing and display control live on the basic
//! page; bias, temperature coefficient and operating voltage on the
//! extended page.

/// Function set: `0x20 | PD | V | H`
pub const FUNCTION_SET: u8 = 0x20;

/// Function set flag: power down
pub const POWER_DOWN: u8 = 0x04;

/// Function set flag: vertical addressing
pub const VERTICAL_ADDRESSING: u8 = 0x02;

/// Function set flag: extended instruction set
pub const EXTENDED: u8 = 0x01;

/// Display control: `0x08 | D << 2 | E` (basic page)
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Set Y address (bank 0-5, basic page)
pub const SET_Y: u8 = 0x40;

/// Set X address (column 0-83, basic page)
pub const SET_X: u8 = 0x80;

/// Temperature coefficient `0x04 | TC` (extended page)
pub const TEMPERATURE_COEFFICIENT: u8 = 0x04;

/// Bias system `0x10 | BS` (extended page)
pub const BIAS: u8 = 0x10;

/// Operating voltage `0x80 | Vop` (extended page)
pub const SET_VOP: u8 = 0x80;

/// Largest Vop value
pub const MAX_VOP: u8 = 0x7F;

/// Largest temperature coefficient
pub const MAX_TEMPERATURE_COEFFICIENT: u8 = 0x03;

/// Largest bias value
pub const MAX_BIAS: u8 = 0x07;
