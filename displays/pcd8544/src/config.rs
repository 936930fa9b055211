//! Panel configuration
//!
//! Electrical settings sent during `init()`. The defaults suit the common
//! red/blue Nokia 5110 breakout boards at 3.3 V. With the `serde` feature
//! the configuration can be stored in flash as postcard-serialized bytes.

use crate::command;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayMode {
    /// All segments off, RAM untouched
    Blank,
    /// All segments on, RAM untouched
    AllOn,
    /// RAM contents, set bits dark
    #[default]
    Normal,
    /// RAM contents, set bits light
    Inverse,
}

impl DisplayMode {
    /// Display control command for this mode
    pub const fn command(self) -> u8 {
        command::DISPLAY_CONTROL
            | match self {
                DisplayMode::Blank => 0b000,
                DisplayMode::AllOn => 0b001,
                DisplayMode::Normal => 0b100,
                DisplayMode::Inverse => 0b101,
            }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Contrast (Vop) above 127
    ContrastOutOfRange,
    /// Temperature coefficient above 3
    TemperatureCoefficientOutOfRange,
    /// Bias above 7
    BiasOutOfRange,
}

/// PCD8544 electrical configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Operating voltage setting (Vop, 0-127)
    pub contrast: u8,
    /// Temperature coefficient (0-3)
    pub temperature_coefficient: u8,
    /// Bias system (0-7, 3 = 1:48 mux)
    pub bias: u8,
    /// Display mode after init
    pub mode: DisplayMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contrast: 0x48,
            temperature_coefficient: 2,
            bias: 3,
            mode: DisplayMode::Normal,
        }
    }
}

impl Config {
    /// Check every field against the controller's register widths
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contrast > command::MAX_VOP {
            return Err(ConfigError::ContrastOutOfRange);
        }
        if self.temperature_coefficient > command::MAX_TEMPERATURE_COEFFICIENT {
            return Err(ConfigError::TemperatureCoefficientOutOfRange);
        }
        if self.bias > command::MAX_BIAS {
            return Err(ConfigError::BiasOutOfRange);
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize a configuration written by [`Config::to_slice`]
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
