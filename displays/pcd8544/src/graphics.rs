//! Pixel and line drawing
//!
//! Everything here goes through [`Framebuffer::set_pixel`], so out-of-panel
//! points are dropped individually and reported as `Status::OutOfBorder`
//! without aborting the rest of the shape. No clipping is done up front.

use crate::framebuffer::{locate, Framebuffer};
use crate::status::{PixelMode, Status};

/// Left edge of the first bar in [`Framebuffer::draw_bars`]
pub const BAR_X: u8 = 5;

/// Baseline row of the bar graph (bars grow upwards from here)
pub const BAR_Y: u8 = 38;

/// Blank columns between two bars
pub const EMPTY_SPACE_BARS: u8 = 2;

impl Framebuffer {
    /// Set, clear or toggle a single pixel
    pub fn set_pixel(&mut self, x: u8, y: u8, mode: PixelMode) -> Status {
        let Some((index, bit)) = locate(x, y) else {
            return Status::OutOfBorder;
        };
        let value = mode.apply(self.byte(index), 1 << bit);
        self.set_byte(index, value);
        Status::Ok
    }

    /// Draw a line between two points, both endpoints included
    ///
    /// Integer Bresenham stepping along the major axis. Vertical,
    /// horizontal and single-point lines need no special casing.
    pub fn draw_line(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, mode: PixelMode) -> Status {
        let (mut x, mut y) = (i16::from(x1), i16::from(y1));
        let dx = (i16::from(x2) - x).abs();
        let dy = (i16::from(y2) - y).abs();
        let step_x = if x2 >= x1 { 1 } else { -1 };
        let step_y = if y2 >= y1 { 1 } else { -1 };
        let x_major = dx >= dy;
        let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };

        let mut status = self.plot(x, y, mode);
        let mut err = 0;
        for _ in 0..major {
            err += minor;
            let step_minor = err * 2 >= major;
            if step_minor {
                err -= major;
            }

            if x_major {
                x += step_x;
                if step_minor {
                    y += step_y;
                }
            } else {
                y += step_y;
                if step_minor {
                    x += step_x;
                }
            }

            status = status.and(self.plot(x, y, mode));
        }

        status
    }

    // Points on the line never leave the box spanned by the u8 endpoints.
    fn plot(&mut self, x: i16, y: i16, mode: PixelMode) -> Status {
        self.set_pixel(x as u8, y as u8, mode)
    }

    /// Draw `length` pixels to the right of `(x, y)`
    pub fn draw_hline(&mut self, x: u8, y: u8, length: u8, mode: PixelMode) -> Status {
        match length {
            0 => Status::Ok,
            _ => self.draw_line(x, y, x.saturating_add(length - 1), y, mode),
        }
    }

    /// Draw `length` pixels downwards from `(x, y)`
    pub fn draw_vline(&mut self, x: u8, y: u8, length: u8, mode: PixelMode) -> Status {
        match length {
            0 => Status::Ok,
            _ => self.draw_line(x, y, x, y.saturating_add(length - 1), mode),
        }
    }

    /// Draw a rectangle outline with its top-left corner at `(x, y)`
    pub fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8, mode: PixelMode) -> Status {
        if width == 0 || height == 0 {
            return Status::Ok;
        }
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);

        // Corners are shared between edges; XOR must touch them only once.
        let mut status = self.draw_hline(x, y, width, mode);
        if height > 1 {
            status = status.and(self.draw_hline(x, bottom, width, mode));
        }
        if height > 2 {
            let below_top = y.saturating_add(1);
            status = status.and(self.draw_vline(x, below_top, height - 2, mode));
            if width > 1 {
                status = status.and(self.draw_vline(right, below_top, height - 2, mode));
            }
        }
        status
    }

    /// Fill a rectangle with its top-left corner at `(x, y)`
    pub fn fill_rect(&mut self, x: u8, y: u8, width: u8, height: u8, mode: PixelMode) -> Status {
        let mut status = Status::Ok;
        for row in 0..height {
            status = status.and(self.draw_hline(x, y.saturating_add(row), width, mode));
        }
        status
    }

    /// Draw a bar graph
    ///
    /// Bar `i` occupies `width` columns starting at
    /// `BAR_X + i * (width + EMPTY_SPACE_BARS)` and grows upwards from
    /// `BAR_Y` by `value * multiplier` pixels. Each bar column is cleared
    /// from row 0 down to the baseline first so bars can shrink between
    /// calls; anything else drawn in those columns must be redrawn. Bars
    /// taller than the panel are cut at the top edge and reported as
    /// `OutOfBorder`.
    pub fn draw_bars(&mut self, values: &[u8], width: u8, multiplier: u8) -> Status {
        let mut status = Status::Ok;
        let pitch = usize::from(width) + usize::from(EMPTY_SPACE_BARS);

        for (i, &value) in values.iter().enumerate() {
            let left = usize::from(BAR_X) + i * pitch;
            let height = u16::from(value) * u16::from(multiplier);

            for column in 0..usize::from(width) {
                let Ok(x) = u8::try_from(left + column) else {
                    status = status.and(Status::OutOfBorder);
                    continue;
                };

                status = status.and(self.draw_line(x, 0, x, BAR_Y, PixelMode::Off));
                if height == 0 {
                    continue;
                }
                let top = match u16::from(BAR_Y).checked_sub(height - 1) {
                    Some(top) => top as u8,
                    None => {
                        status = status.and(Status::OutOfBorder);
                        0
                    }
                };
                status = status.and(self.draw_line(x, BAR_Y, x, top, PixelMode::On));
            }
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BUFFER_LEN, HEIGHT, WIDTH};

    fn lit_in_row(fb: &Framebuffer, y: u8) -> usize {
        (0..WIDTH as u8).filter(|&x| fb.pixel(x, y) == Some(true)).count()
    }

    #[test]
    fn test_set_pixel_modes() {
        let mut fb = Framebuffer::new();

        assert_eq!(fb.set_pixel(10, 10, PixelMode::On), Status::Ok);
        assert_eq!(fb.pixel(10, 10), Some(true));
        assert_eq!(fb.byte(94), 0b0000_0100);

        assert_eq!(fb.set_pixel(10, 10, PixelMode::Xor), Status::Ok);
        assert_eq!(fb.pixel(10, 10), Some(false));

        fb.set_pixel(10, 10, PixelMode::Xor);
        fb.set_pixel(10, 10, PixelMode::Off);
        assert_eq!(fb.pixel(10, 10), Some(false));
    }

    #[test]
    fn test_set_pixel_out_of_border() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.set_pixel(84, 0, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.set_pixel(0, 48, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.set_pixel(255, 255, PixelMode::Xor), Status::OutOfBorder);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert!(!fb.dirty().is_pending());
    }

    #[test]
    fn test_set_pixel_marks_dirty() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(5, 9, PixelMode::On);
        fb.set_pixel(1, 0, PixelMode::Off);
        assert_eq!(fb.dirty().bounds(), Some((1, 89)));
    }

    #[test]
    fn test_horizontal_line_across_panel() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_line(0, 0, 83, 0, PixelMode::On), Status::Ok);
        assert_eq!(lit_in_row(&fb, 0), WIDTH);
        assert_eq!(fb.lit_pixels(), WIDTH as u32);
    }

    #[test]
    fn test_vertical_line() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_line(7, 47, 7, 0, PixelMode::On), Status::Ok);
        for y in 0..HEIGHT as u8 {
            assert_eq!(fb.pixel(7, y), Some(true));
        }
        assert_eq!(fb.lit_pixels(), HEIGHT as u32);
    }

    #[test]
    fn test_single_point_line_matches_set_pixel() {
        let mut line = Framebuffer::new();
        let mut pixel = Framebuffer::new();
        assert_eq!(line.draw_line(30, 20, 30, 20, PixelMode::Xor), Status::Ok);
        assert_eq!(pixel.set_pixel(30, 20, PixelMode::Xor), Status::Ok);
        assert_eq!(line.as_bytes(), pixel.as_bytes());
        assert_eq!(line.dirty(), pixel.dirty());
    }

    #[test]
    fn test_diagonal_line() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 47, 47, PixelMode::On);
        for i in 0..48 {
            assert_eq!(fb.pixel(i, i), Some(true));
        }
        assert_eq!(fb.lit_pixels(), 48);
    }

    #[test]
    fn test_shallow_line_one_pixel_per_column() {
        let mut fb = Framebuffer::new();
        fb.draw_line(80, 10, 2, 3, PixelMode::On);
        assert_eq!(fb.pixel(80, 10), Some(true));
        assert_eq!(fb.pixel(2, 3), Some(true));
        for x in 2..=80 {
            let lit = (0..HEIGHT as u8)
                .filter(|&y| fb.pixel(x, y) == Some(true))
                .count();
            assert_eq!(lit, 1, "column {}", x);
        }
    }

    #[test]
    fn test_steep_line_one_pixel_per_row() {
        let mut fb = Framebuffer::new();
        fb.draw_line(3, 0, 12, 47, PixelMode::On);
        for y in 0..HEIGHT as u8 {
            assert_eq!(lit_in_row(&fb, y), 1, "row {}", y);
        }
    }

    #[test]
    fn test_line_out_of_border_keeps_drawing() {
        let mut fb = Framebuffer::new();
        let status = fb.draw_line(80, 5, 90, 5, PixelMode::On);
        assert_eq!(status, Status::OutOfBorder);
        for x in 80..84 {
            assert_eq!(fb.pixel(x, 5), Some(true));
        }
        assert_eq!(fb.lit_pixels(), 4);
    }

    #[test]
    fn test_xor_line_twice_is_identity() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 47, 83, 0, PixelMode::Xor);
        fb.draw_line(0, 47, 83, 0, PixelMode::Xor);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_rect_outline() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_rect(10, 10, 5, 4, PixelMode::Xor), Status::Ok);
        // 2 * 5 + 2 * 2 distinct perimeter pixels, corners toggled once
        assert_eq!(fb.lit_pixels(), 14);
        assert_eq!(fb.pixel(10, 10), Some(true));
        assert_eq!(fb.pixel(14, 13), Some(true));
        assert_eq!(fb.pixel(12, 11), Some(false));
    }

    #[test]
    fn test_degenerate_rects() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_rect(0, 0, 0, 10, PixelMode::On), Status::Ok);
        assert_eq!(fb.lit_pixels(), 0);

        fb.draw_rect(0, 0, 1, 1, PixelMode::Xor);
        assert_eq!(fb.lit_pixels(), 1);

        fb.draw_rect(5, 5, 1, 3, PixelMode::Xor);
        assert_eq!(fb.lit_pixels(), 4);
    }

    #[test]
    fn test_rects_at_coordinate_limit() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_rect(10, 255, 5, 3, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.draw_rect(255, 10, 3, 5, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.draw_rect(255, 255, 255, 255, PixelMode::Xor), Status::OutOfBorder);
        assert_eq!(fb.fill_rect(250, 250, 255, 255, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.draw_vline(0, 255, 255, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.draw_hline(255, 0, 255, PixelMode::On), Status::OutOfBorder);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert!(!fb.dirty().is_pending());

        // Partly on-panel rectangles still draw their visible edges
        assert_eq!(fb.draw_rect(80, 44, 255, 255, PixelMode::On), Status::OutOfBorder);
        assert_eq!(fb.pixel(80, 44), Some(true));
        assert_eq!(fb.pixel(83, 44), Some(true));
        assert_eq!(fb.pixel(80, 47), Some(true));
    }

    #[test]
    fn test_fill_rect_and_border() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.fill_rect(0, 0, 84, 48, PixelMode::On), Status::Ok);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));

        let status = fb.fill_rect(80, 40, 10, 10, PixelMode::Off);
        assert_eq!(status, Status::OutOfBorder);
        assert_eq!(fb.lit_pixels(), (BUFFER_LEN * 8 - 4 * 8) as u32);
    }

    #[test]
    fn test_bars() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_bars(&[2, 0, 5], 3, 2), Status::Ok);

        // First bar: columns 5..8, 4 pixels tall ending at the baseline
        for x in 5..8 {
            assert_eq!(fb.pixel(x, BAR_Y), Some(true));
            assert_eq!(fb.pixel(x, BAR_Y - 3), Some(true));
            assert_eq!(fb.pixel(x, BAR_Y - 4), Some(false));
        }
        // Gap columns stay blank
        assert_eq!(fb.pixel(8, BAR_Y), Some(false));
        assert_eq!(fb.pixel(9, BAR_Y), Some(false));
        // Second bar is empty, third starts at 5 + 2 * 5
        assert_eq!(fb.pixel(10, BAR_Y), Some(false));
        assert_eq!(fb.pixel(15, BAR_Y - 9), Some(true));
        assert_eq!(fb.lit_pixels(), 3 * 4 + 3 * 10);

        // Shrinking a bar clears its old pixels
        fb.draw_bars(&[1], 3, 1);
        assert_eq!(fb.pixel(5, BAR_Y - 1), Some(false));
        assert_eq!(fb.pixel(5, BAR_Y), Some(true));
    }

    #[test]
    fn test_bars_erase_only_their_columns() {
        let mut fb = Framebuffer::new();
        fb.fill_rect(0, 0, 84, 48, PixelMode::On);
        fb.draw_bars(&[0, 0], 2, 1);

        // Bar columns 5, 6 and 9, 10 are blank from the top to the baseline
        for x in [5, 6, 9, 10] {
            for y in 0..=BAR_Y {
                assert_eq!(fb.pixel(x, y), Some(false));
            }
            assert_eq!(fb.pixel(x, BAR_Y + 1), Some(true));
        }
        // Left margin, gaps and everything past the last bar survive
        for x in [0, 4, 7, 8, 11, 83] {
            assert_eq!(fb.pixel(x, 0), Some(true));
        }
        assert_eq!(fb.lit_pixels(), (BUFFER_LEN * 8) as u32 - 4 * (u32::from(BAR_Y) + 1));
    }

    #[test]
    fn test_text_drawn_after_bars_survives() {
        let mut fb = Framebuffer::new();
        let mut cursor = crate::text::Cursor::new();
        cursor.put_str(&mut fb, "Bars");
        fb.draw_bars(&[3], 6, 1);
        assert!(fb.as_bytes()[BAR_X as usize..BAR_X as usize + 6]
            .iter()
            .all(|&b| b == 0));

        cursor.goto(0, 0);
        cursor.put_str(&mut fb, "Bars");
        assert_eq!(&fb.as_bytes()[6..11], crate::font::glyph('a'));
        assert_eq!(fb.pixel(BAR_X, BAR_Y - 2), Some(true));
    }

    #[test]
    fn test_bars_clipped_at_top() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_bars(&[200], 1, 1), Status::OutOfBorder);
        for y in 0..=BAR_Y {
            assert_eq!(fb.pixel(BAR_X, y), Some(true));
        }
    }
}
