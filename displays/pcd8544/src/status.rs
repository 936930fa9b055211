//! Drawing result and pixel combination types

/// Outcome of a drawing or cursor operation
///
/// None of these are errors in the `Result` sense: drawing always runs to
/// completion and the status only tells the caller what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Everything was drawn
    Ok,
    /// At least one coordinate was outside the panel and was skipped
    OutOfBorder,
    /// Text reached the end of a line and the cursor wrapped
    OkWithWrap,
}

impl Status {
    /// Returns true for `Status::Ok`
    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Combine two results, keeping the first non-`Ok` one
    pub const fn and(self, other: Status) -> Status {
        match self {
            Status::Ok => other,
            _ => self,
        }
    }
}

/// How a drawn pixel combines with the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelMode {
    /// Clear the pixel
    Off,
    /// Set the pixel
    #[default]
    On,
    /// Toggle the pixel
    Xor,
}

impl PixelMode {
    /// Apply this mode to `byte` using `mask` for the affected bit
    #[inline]
    pub const fn apply(self, byte: u8, mask: u8) -> u8 {
        match self {
            PixelMode::Off => byte & !mask,
            PixelMode::On => byte | mask,
            PixelMode::Xor => byte ^ mask,
        }
    }
}
