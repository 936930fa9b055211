//! Bit-packed framebuffer with dirty-range tracking
//!
//! The buffer mirrors the controller's display RAM: 6 banks of 84 bytes,
//! each byte a vertical strip of 8 pixels with bit 0 on top. Every write
//! widens a single `[low, high]` byte interval so that the driver can send
//! just the modified part of the screen.

use crate::{BANKS, BUFFER_LEN, HEIGHT, WIDTH};

/// Smallest contiguous byte interval known to contain every change
/// since the last flush
///
/// Deliberately a single interval: two writes at opposite corners of the
/// panel mark almost the whole buffer dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRange {
    low: usize,
    high: usize,
    pending: bool,
}

impl Default for DirtyRange {
    fn default() -> Self {
        Self::empty()
    }
}

impl DirtyRange {
    /// A range with nothing to flush
    pub const fn empty() -> Self {
        Self {
            low: 0,
            high: 0,
            pending: false,
        }
    }

    /// Widen the range to include `index`
    pub fn mark(&mut self, index: usize) {
        debug_assert!(index < BUFFER_LEN);
        if self.pending {
            self.low = self.low.min(index);
            self.high = self.high.max(index);
        } else {
            self.low = index;
            self.high = index;
            self.pending = true;
        }
    }

    /// Mark the entire buffer dirty
    pub fn mark_all(&mut self) {
        self.low = 0;
        self.high = BUFFER_LEN - 1;
        self.pending = true;
    }

    /// Whether an update is pending
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Inclusive `(low, high)` bounds, or `None` when nothing is dirty
    pub const fn bounds(&self) -> Option<(usize, usize)> {
        if self.pending {
            Some((self.low, self.high))
        } else {
            None
        }
    }

    /// Forget all pending changes
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

/// In-memory copy of the panel's display RAM
#[derive(Clone)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_LEN],
    dirty: DirtyRange,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer with nothing pending
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
            dirty: DirtyRange::empty(),
        }
    }

    /// Blank every pixel and mark the whole buffer dirty
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.dirty.mark_all();
    }

    /// Overwrite the buffer with a full-screen image in bank layout
    pub fn load(&mut self, image: &[u8; BUFFER_LEN]) {
        self.bytes.copy_from_slice(image);
        self.dirty.mark_all();
    }

    /// Read a raw byte
    ///
    /// # Panics
    ///
    /// Panics if `index >= BUFFER_LEN`.
    pub fn byte(&self, index: usize) -> u8 {
        assert!(index < BUFFER_LEN, "framebuffer index {} out of range", index);
        self.bytes[index]
    }

    /// Write a raw byte and mark it dirty
    ///
    /// # Panics
    ///
    /// Panics if `index >= BUFFER_LEN`.
    pub fn set_byte(&mut self, index: usize, value: u8) {
        assert!(index < BUFFER_LEN, "framebuffer index {} out of range", index);
        self.bytes[index] = value;
        self.dirty.mark(index);
    }

    /// Widen the dirty range to include `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= BUFFER_LEN`.
    pub fn mark_dirty(&mut self, index: usize) {
        assert!(index < BUFFER_LEN, "framebuffer index {} out of range", index);
        self.dirty.mark(index);
    }

    /// Current dirty range
    pub const fn dirty(&self) -> &DirtyRange {
        &self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty.reset();
    }

    /// Whole buffer, in bank layout
    pub const fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    /// Bytes `start..end` in bank layout
    pub(crate) fn span(&self, start: usize, end: usize) -> &[u8] {
        &self.bytes[start..end]
    }

    /// Read back a pixel; `None` outside the panel
    pub fn pixel(&self, x: u8, y: u8) -> Option<bool> {
        let (index, bit) = locate(x, y)?;
        Some(self.bytes[index] & (1 << bit) != 0)
    }

    /// Number of pixels currently set
    pub fn lit_pixels(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }
}

/// Map a pixel coordinate to its `(byte index, bit index)` pair
pub const fn locate(x: u8, y: u8) -> Option<(usize, u8)> {
    let (x, y) = (x as usize, y as usize);
    if x >= WIDTH || y >= HEIGHT {
        return None;
    }
    Some(((y / 8) * WIDTH + x, (y % 8) as u8))
}

/// Map a byte index to the `(column, bank)` the controller addresses it by
pub const fn address_of(index: usize) -> (u8, u8) {
    debug_assert!(index < BUFFER_LEN);
    ((index % WIDTH) as u8, (index / WIDTH) as u8)
}

const _: () = assert!(BANKS * 8 == HEIGHT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank_and_clean() {
        let fb = Framebuffer::new();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert!(!fb.dirty().is_pending());
        assert_eq!(fb.dirty().bounds(), None);
    }

    #[test]
    fn test_clear_marks_everything() {
        let mut fb = Framebuffer::new();
        fb.set_byte(100, 0xAA);
        fb.clear_dirty();

        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.dirty().bounds(), Some((0, BUFFER_LEN - 1)));
    }

    #[test]
    fn test_dirty_range_widens() {
        let mut range = DirtyRange::empty();
        range.mark(200);
        assert_eq!(range.bounds(), Some((200, 200)));

        range.mark(150);
        range.mark(170);
        assert_eq!(range.bounds(), Some((150, 200)));

        range.mark(503);
        assert_eq!(range.bounds(), Some((150, 503)));

        range.reset();
        assert!(!range.is_pending());
    }

    #[test]
    fn test_set_byte_marks_dirty() {
        let mut fb = Framebuffer::new();
        fb.set_byte(42, 0x7F);
        assert_eq!(fb.byte(42), 0x7F);
        assert_eq!(fb.dirty().bounds(), Some((42, 42)));
    }

    #[test]
    fn test_mark_dirty_without_write() {
        let mut fb = Framebuffer::new();
        fb.mark_dirty(10);
        fb.mark_dirty(12);
        assert_eq!(fb.dirty().bounds(), Some((10, 12)));
        assert_eq!(fb.byte(10), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_byte_out_of_range_panics() {
        let fb = Framebuffer::new();
        let _ = fb.byte(BUFFER_LEN);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_byte_out_of_range_panics() {
        let mut fb = Framebuffer::new();
        fb.set_byte(BUFFER_LEN, 1);
    }

    #[test]
    fn test_locate() {
        assert_eq!(locate(0, 0), Some((0, 0)));
        assert_eq!(locate(83, 0), Some((83, 0)));
        assert_eq!(locate(0, 7), Some((0, 7)));
        assert_eq!(locate(0, 8), Some((84, 0)));
        assert_eq!(locate(83, 47), Some((503, 7)));
        assert_eq!(locate(84, 0), None);
        assert_eq!(locate(0, 48), None);
    }

    #[test]
    fn test_address_of() {
        assert_eq!(address_of(0), (0, 0));
        assert_eq!(address_of(83), (83, 0));
        assert_eq!(address_of(84), (0, 1));
        assert_eq!(address_of(503), (83, 5));
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut image = [0u8; BUFFER_LEN];
        image[0] = 0x01;
        image[503] = 0x80;

        let mut fb = Framebuffer::new();
        fb.load(&image);

        assert_eq!(fb.pixel(0, 0), Some(true));
        assert_eq!(fb.pixel(83, 47), Some(true));
        assert_eq!(fb.lit_pixels(), 2);
        assert_eq!(fb.dirty().bounds(), Some((0, BUFFER_LEN - 1)));
    }
}
