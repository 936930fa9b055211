//! PCD8544 driver
//!
//! Owns the framebuffer, the text cursor and the transport. Drawing calls
//! only touch RAM; the panel is brought up to date by [`Pcd8544::update`]
//! (dirty range only) or [`Pcd8544::full_update`] (whole buffer, optionally
//! split over several calls).
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = Pcd8544::new(SpiTransport::new(spi, dc, rst, delay));
//! lcd.init()?;
//! lcd.goto_text_position(0, 0);
//! lcd.put_str("Hello");
//! lcd.draw_line(0, 10, 83, 10, PixelMode::On);
//! lcd.update()?;
//!
//! // Or refresh the whole panel over three timer ticks:
//! loop {
//!     ticker.next().await;
//!     lcd.full_update(3)?;
//! }
//! ```

use crate::command;
use crate::config::{Config, ConfigError, DisplayMode};
use crate::framebuffer::{address_of, Framebuffer};
use crate::status::{PixelMode, Status};
use crate::text::Cursor;
use crate::transport::{Tag, Transport};
use crate::BUFFER_LEN;

/// Progress of a stepped full update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameProgress {
    /// `done` of `steps` chunks have been sent
    InProgress { done: u8, steps: u8 },
    /// The last chunk went out and the dirty range was cleared
    Complete,
}

/// Position within a stepped full update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameState {
    steps: u8,
    next: u8,
}

impl FrameState {
    const fn idle() -> Self {
        Self { steps: 1, next: 0 }
    }

    /// Byte range `start..end` of chunk `next`
    fn chunk(&self) -> (usize, usize) {
        let steps = usize::from(self.steps);
        let next = usize::from(self.next);
        (BUFFER_LEN * next / steps, BUFFER_LEN * (next + 1) / steps)
    }
}

/// PCD8544 LCD driver
pub struct Pcd8544<T> {
    transport: T,
    config: Config,
    framebuffer: Framebuffer,
    cursor: Cursor,
    frame: FrameState,
    initialized: bool,
}

impl<T: Transport> Pcd8544<T> {
    /// Create a driver with the default configuration
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: Config::default(),
            framebuffer: Framebuffer::new(),
            cursor: Cursor::new(),
            frame: FrameState::idle(),
            initialized: false,
        }
    }

    /// Create a driver with a custom configuration
    pub fn with_config(transport: T, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut lcd = Self::new(transport);
        lcd.config = config;
        Ok(lcd)
    }

    /// Reset and configure the controller, then blank the panel
    pub fn init(&mut self) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("pcd8544: init {}", self.config);

        self.transport.reset()?;
        self.command(command::FUNCTION_SET | command::EXTENDED)?;
        self.command(command::SET_VOP | self.config.contrast)?;
        self.command(command::TEMPERATURE_COEFFICIENT | self.config.temperature_coefficient)?;
        self.command(command::BIAS | self.config.bias)?;
        self.command(command::FUNCTION_SET)?;
        self.command(self.config.mode.command())?;

        self.clear();
        self.cursor = Cursor::new();
        self.frame = FrameState::idle();
        self.full_update(1)?;

        self.initialized = true;
        Ok(())
    }

    /// Whether `init()` has completed
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, byte: u8) -> Result<(), T::Error> {
        self.transport.send(byte, Tag::Command)
    }

    /// Blank the framebuffer and mark it fully dirty
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Replace the framebuffer with a full-screen image in bank layout
    pub fn load_image(&mut self, image: &[u8; BUFFER_LEN]) {
        self.framebuffer.load(image);
    }

    /// Send the dirty byte range to the panel
    ///
    /// Does nothing if no drawing happened since the last flush.
    pub fn update(&mut self) -> Result<(), T::Error> {
        let Some((low, high)) = self.framebuffer.dirty().bounds() else {
            return Ok(());
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("pcd8544: update {}..={}", low, high);

        self.transmit(low, high + 1)?;
        self.framebuffer.clear_dirty();
        Ok(())
    }

    /// Send the whole framebuffer, one of `steps` chunks per call
    ///
    /// Call `steps` times to complete a frame. The dirty range is cleared
    /// after the last chunk. Changing `steps` mid-frame starts over with
    /// the first chunk; `0` is treated as `1`. Drawing between calls is
    /// fine but changes to already-sent chunks wait for the next flush.
    pub fn full_update(&mut self, steps: u8) -> Result<FrameProgress, T::Error> {
        let steps = steps.max(1);
        if self.frame.steps != steps {
            self.frame = FrameState { steps, next: 0 };
        }

        let (start, end) = self.frame.chunk();

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "pcd8544: full update step {}/{} ({}..{})",
            self.frame.next + 1,
            steps,
            start,
            end
        );

        self.transmit(start, end)?;

        let done = self.frame.next + 1;
        if done == steps {
            self.frame.next = 0;
            self.framebuffer.clear_dirty();
            Ok(FrameProgress::Complete)
        } else {
            self.frame.next = done;
            Ok(FrameProgress::InProgress { done, steps })
        }
    }

    /// Address `start` and send bytes `start..end` as one data run
    fn transmit(&mut self, start: usize, end: usize) -> Result<(), T::Error> {
        let (column, bank) = address_of(start);
        self.transport.set_address(column, bank)?;
        self.transport
            .send_all(self.framebuffer.span(start, end), Tag::Data)
    }

    /// Change the operating voltage (contrast), 0-127
    ///
    /// Values above 127 are masked to 7 bits.
    pub fn set_contrast(&mut self, value: u8) -> Result<(), T::Error> {
        let vop = value & command::MAX_VOP;

        #[cfg(feature = "defmt")]
        defmt::debug!("pcd8544: contrast {}", vop);

        self.command(command::FUNCTION_SET | command::EXTENDED)?;
        self.command(command::SET_VOP | vop)?;
        self.command(command::FUNCTION_SET)?;
        self.config.contrast = vop;
        Ok(())
    }

    /// Switch between blank, all-on, normal and inverse display
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), T::Error> {
        self.command(mode.command())?;
        self.config.mode = mode;
        Ok(())
    }

    /// Move the text cursor to a cell (column 0-13, row 0-5)
    pub fn goto_text_position(&mut self, column: u8, row: u8) -> Status {
        self.cursor.goto(column, row)
    }

    /// Render a character at the cursor
    pub fn put_char(&mut self, ch: char) -> Status {
        self.cursor.put_char(&mut self.framebuffer, ch)
    }

    /// Render a string at the cursor, stopping at the first wrap
    pub fn put_str(&mut self, text: &str) -> Status {
        self.cursor.put_str(&mut self.framebuffer, text)
    }

    /// Draw a line, both endpoints included
    pub fn draw_line(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, mode: PixelMode) -> Status {
        self.framebuffer.draw_line(x1, y1, x2, y2, mode)
    }

    /// Set, clear or toggle one pixel
    pub fn set_pixel(&mut self, x: u8, y: u8, mode: PixelMode) -> Status {
        self.framebuffer.set_pixel(x, y, mode)
    }

    /// Draw a bar graph (see [`Framebuffer::draw_bars`])
    pub fn draw_bars(&mut self, values: &[u8], width: u8, multiplier: u8) -> Status {
        self.framebuffer.draw_bars(values, width, multiplier)
    }

    /// Current text cursor
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Active configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Read access to the framebuffer
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable access for the other drawing helpers
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Access the transport
    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Destroy the driver and return the transport
    pub fn release(self) -> T {
        self.transport
    }
}
